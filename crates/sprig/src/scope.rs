//! Binding and lookup on scope values.
//!
//! Scopes map symbols to values by string content, so two symbols with the
//! same text always name the same binding whether or not interning is on.
//! Lookup walks the parent chain and fails with `not-found` at the root.

use crate::{
    error::{ErrorKind, RunError, RunResult},
    heap::ValueId,
    runtime::Runtime,
    value::{Binding, ValueData},
};

impl Runtime {
    /// Binds `symbol` to `value` in `scope`, inserting or overwriting.
    ///
    /// As a side effect, a lambda value bound for the first time adopts the
    /// symbol as its display name.
    ///
    /// # Panics
    /// Panics if `scope` is not a scope value or `symbol` is not a symbol;
    /// both are host programming errors, not language errors.
    pub fn bind(&mut self, scope: ValueId, symbol: ValueId, value: ValueId) {
        let ValueData::Symbol(name) = self.heap.get(symbol) else {
            panic!("bind: key must be a symbol value");
        };
        let name = name.clone();

        if let ValueData::Lambda(lambda) = self.heap.get_mut(value)
            && lambda.binding.is_none()
        {
            lambda.binding = Some(symbol);
        }

        let ValueData::Scope(data) = self.heap.get_mut(scope) else {
            panic!("bind: target must be a scope value");
        };
        data.map.insert(name, Binding { symbol, value });
    }

    /// Looks `symbol` up in `scope`, then in its parents. Fails with
    /// `not-found` when no scope in the chain binds it.
    pub fn lookup(&mut self, scope: ValueId, symbol: ValueId) -> RunResult<ValueId> {
        let ValueData::Symbol(name) = self.heap.get(symbol) else {
            return Err(RunError::wrong_type(
                "lookup",
                crate::value::Kind::Symbol,
                self.heap.kind(symbol),
            ));
        };
        let name = name.clone();
        self.lookup_name(scope, &name)
    }

    /// Same as [`lookup`](Self::lookup) but keyed by a plain string, for host
    /// convenience. Result is identical to constructing a symbol with `name`
    /// and looking that up.
    pub fn lookup_name(&mut self, scope: ValueId, name: &str) -> RunResult<ValueId> {
        let mut cur = scope;
        loop {
            let ValueData::Scope(data) = self.heap.get(cur) else {
                return Err(RunError::wrong_type(
                    "lookup",
                    crate::value::Kind::Scope,
                    self.heap.kind(cur),
                ));
            };
            if let Some(binding) = data.map.get(name) {
                return Ok(binding.value);
            }
            match data.parent {
                Some(parent) => cur = parent,
                None => {
                    return Err(ErrorKind::NotFound.err(format!("symbol not found in scope: {name}")));
                }
            }
        }
    }
}
