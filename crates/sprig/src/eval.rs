//! The evaluator and call protocol.
//!
//! Evaluation dispatches on the value kind: integers and strings are
//! self-evaluating, symbols are looked up in the scope chain, and lists are
//! function calls. Every call pushes the callee onto the runtime's call
//! stack, so errors can carry a snapshot of the in-flight frames.

use smallvec::SmallVec;

use crate::{
    error::{ErrorKind, RunError, RunResult, StackFrame},
    heap::ValueId,
    runtime::Runtime,
    value::{Kind, LambdaData, LambdaKind, ValueData},
};

impl Runtime {
    /// Evaluates `value` in `scope`.
    ///
    /// Failures are recorded on the runtime's error slot in addition to being
    /// returned, so hosts can inspect them through
    /// [`last_error`](Self::last_error) after the fact.
    pub fn eval(&mut self, scope: ValueId, value: ValueId) -> RunResult<ValueId> {
        match self.eval_inner(scope, value) {
            Ok(v) => Ok(v),
            Err(err) => Err(self.record(err)),
        }
    }

    fn eval_inner(&mut self, scope: ValueId, value: ValueId) -> RunResult<ValueId> {
        match self.heap.get(value) {
            ValueData::Int(_) | ValueData::Str(_) => Ok(value),
            ValueData::Symbol(_) => self.lookup(scope, value),
            ValueData::Cell { left, right } => {
                let (Some(left), Some(right)) = (*left, *right) else {
                    // The empty list evaluates to itself.
                    return Ok(value);
                };
                if self.heap.kind(right) != Kind::List {
                    return Err(ErrorKind::Syntax.err("malformed function call"));
                }
                let callee = self.eval(scope, left)?;
                self.call(scope, callee, right)
            }
            other => Err(ErrorKind::NotEvaluable.err(format!(
                "cannot evaluate a {kind} value",
                kind = other.kind()
            ))),
        }
    }

    /// Calls `callee` with the argument list `args`.
    ///
    /// Arguments are evaluated or passed through raw according to the callee:
    /// pre-evaluating natives and function lambdas see evaluated arguments,
    /// special forms and macros see the raw list. The callee is pushed as a
    /// call-stack frame for the duration of the call.
    pub fn call(&mut self, scope: ValueId, callee: ValueId, args: ValueId) -> RunResult<ValueId> {
        if !self.is_proper_list(args) {
            let err = ErrorKind::Syntax.err("argument list must be a proper list");
            return Err(self.record(err));
        }
        self.call_stack.push(callee);
        self.stack_depth += 1;
        let mut result = self.call_inner(scope, callee, args);
        if let Err(err) = &mut result
            && !err.has_stack()
        {
            err.set_stack(self.stack_frames());
        }
        self.call_stack.pop();
        self.stack_depth -= 1;
        result.map_err(|err| self.record(err))
    }

    fn call_inner(&mut self, scope: ValueId, callee: ValueId, args: ValueId) -> RunResult<ValueId> {
        match self.heap.get(callee) {
            ValueData::Native(native) => {
                let func = native.func;
                let pre_evaluate = native.eval_args;
                let data = native.data.clone();
                let args = if pre_evaluate {
                    self.eval_args(scope, args)?
                } else {
                    args
                };
                func(self, scope, args, data.as_ref())
            }
            ValueData::Lambda(lambda) => {
                let lambda = *lambda;
                match lambda.kind {
                    LambdaKind::Function => {
                        let argv = self.eval_args(scope, args)?;
                        let inner = self.bind_params(&lambda, argv)?;
                        self.progn(inner, lambda.body)
                    }
                    LambdaKind::Macro => {
                        // Macro arguments stay raw; the body produces an
                        // expression which is then evaluated in the caller's
                        // scope. That second evaluation is what makes macros
                        // substitutional.
                        let inner = self.bind_params(&lambda, args)?;
                        let expansion = self.progn(inner, lambda.body)?;
                        self.eval(scope, expansion)
                    }
                }
            }
            other => Err(ErrorKind::NotCallable.err(format!(
                "cannot call a {kind} value",
                kind = other.kind()
            ))),
        }
    }

    /// Evaluates every element of a proper list left to right, returning a new
    /// list of the results. This is the argument-evaluation step of the call
    /// protocol, exposed for native callables that manage their own arguments.
    pub fn eval_args(&mut self, scope: ValueId, args: ValueId) -> RunResult<ValueId> {
        let mut out: SmallVec<[ValueId; 8]> = SmallVec::new();
        let mut cur = args;
        while !self.heap.is_nil(cur) {
            let (left, right) = self.cell_parts(cur)?;
            out.push(self.eval(scope, left)?);
            cur = right;
        }
        Ok(self.list_from_slice(&out))
    }

    /// Evaluates a list of expressions in order, returning the last result.
    /// The empty list evaluates to nil.
    pub fn progn(&mut self, scope: ValueId, body: ValueId) -> RunResult<ValueId> {
        let mut result = self.nil();
        let mut cur = body;
        while !self.heap.is_nil(cur) {
            let (expr, rest) = self.cell_parts(cur)?;
            result = self.eval(scope, expr)?;
            cur = rest;
        }
        Ok(result)
    }

    /// Creates the activation scope for a lambda call: a child of the
    /// captured scope with parameters bound to arguments pairwise.
    fn bind_params(&mut self, lambda: &LambdaData, argv: ValueId) -> RunResult<ValueId> {
        let inner = self.new_child_scope(lambda.closure);
        let mut params = lambda.params;
        let mut values = argv;
        loop {
            match (self.heap.is_nil(params), self.heap.is_nil(values)) {
                (true, true) => return Ok(inner),
                (true, false) => return Err(RunError::too_many_args(&self.lambda_name(lambda))),
                (false, true) => return Err(RunError::too_few_args(&self.lambda_name(lambda))),
                (false, false) => {
                    let (param, params_rest) = self.cell_parts(params)?;
                    let (value, values_rest) = self.cell_parts(values)?;
                    self.bind(inner, param, value);
                    params = params_rest;
                    values = values_rest;
                }
            }
        }
    }

    fn lambda_name(&self, lambda: &LambdaData) -> String {
        match lambda.binding {
            Some(symbol) => self.display(symbol),
            None => "(anonymous)".to_owned(),
        }
    }

    /// Splits a non-nil cell into its two sides. Fails with a syntax error on
    /// nil or non-cell values, which is the failure mode for improper lists
    /// in call position.
    pub(crate) fn cell_parts(&self, id: ValueId) -> RunResult<(ValueId, ValueId)> {
        match self.heap.get(id) {
            ValueData::Cell {
                left: Some(left),
                right: Some(right),
            } => Ok((*left, *right)),
            _ => Err(ErrorKind::Syntax.err("expected a proper list")),
        }
    }

    /// True when `id` is a nil-terminated chain of cells.
    pub(crate) fn is_proper_list(&self, id: ValueId) -> bool {
        let mut cur = id;
        loop {
            match self.heap.get(cur) {
                ValueData::Cell {
                    left: None,
                    right: None,
                } => return true,
                ValueData::Cell {
                    right: Some(right), ..
                } => cur = *right,
                _ => return false,
            }
        }
    }

    /// Truthiness: an integer other than zero. Every other value is false.
    pub(crate) fn truthy(&self, id: ValueId) -> bool {
        matches!(self.heap.get(id), ValueData::Int(n) if *n != 0)
    }

    /// Snapshot of the current call stack, most recent call first.
    fn stack_frames(&self) -> Vec<StackFrame> {
        self.call_stack
            .iter()
            .rev()
            .map(|&id| StackFrame::new(self.display(id)))
            .collect()
    }
}
