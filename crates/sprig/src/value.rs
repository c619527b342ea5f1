use std::{any::Any, fmt, fmt::Write as _, rc::Rc};

use ahash::AHashSet;
use indexmap::IndexMap;
use strum::{Display, IntoStaticStr};

use crate::{
    error::RunResult,
    heap::{Heap, ValueId},
    runtime::Runtime,
};

/// The static type descriptor of a value.
///
/// One descriptor exists per variant of [`ValueData`]; descriptors are plain
/// enum values, never allocated on the heap and never collected. The strum
/// `Display` impl yields the user-visible type name (e.g. `Integer` ->
/// "integer").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Kind {
    Integer,
    String,
    Symbol,
    List,
    Scope,
    Builtin,
    Lambda,
    Type,
}

/// Signature of a native callable registered by the host.
///
/// Receives the runtime, the scope the call was evaluated in, the argument
/// list (pre-evaluated or raw depending on the registration flag), and the
/// opaque data pointer supplied at registration.
pub type NativeFunc =
    fn(&mut Runtime, ValueId, ValueId, Option<&Rc<dyn Any>>) -> RunResult<ValueId>;

/// One entry in a scope: the symbol value used as the key, plus the bound value.
///
/// The key symbol is stored alongside the value so the collector can trace it;
/// lookup itself is by string content, not symbol identity.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Binding {
    pub symbol: ValueId,
    pub value: ValueId,
}

pub(crate) type ScopeMap = IndexMap<Box<str>, Binding, ahash::RandomState>;

/// A binding environment: symbol-content -> value, with an optional parent.
#[derive(Debug)]
pub(crate) struct ScopeData {
    pub map: ScopeMap,
    pub parent: Option<ValueId>,
}

impl ScopeData {
    pub fn new(parent: Option<ValueId>) -> Self {
        Self {
            map: ScopeMap::default(),
            parent,
        }
    }
}

/// A native callable provided by the host (or the builtin set).
pub(crate) struct NativeData {
    pub name: Box<str>,
    pub func: NativeFunc,
    /// When set, the call protocol evaluates every argument before invoking
    /// the function; special forms register with this cleared.
    pub eval_args: bool,
    pub data: Option<Rc<dyn Any>>,
}

impl fmt::Debug for NativeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeData")
            .field("name", &self.name)
            .field("eval_args", &self.eval_args)
            .field("has_data", &self.data.is_some())
            .finish()
    }
}

/// Whether a lambda value is an ordinary function or a macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LambdaKind {
    Function,
    Macro,
}

/// A lambda or macro: parameter list, body, captured scope, and the first
/// symbol it was bound to (display only).
#[derive(Debug, Clone, Copy)]
pub(crate) struct LambdaData {
    pub kind: LambdaKind,
    /// Proper list of parameter symbols.
    pub params: ValueId,
    /// Proper list of body expressions, evaluated in sequence.
    pub body: ValueId,
    /// Scope captured at creation; lookups from the body chain through it.
    pub closure: ValueId,
    /// First symbol this lambda was bound to, for display. Never affects
    /// semantics and is ignored by structural comparison.
    pub binding: Option<ValueId>,
}

/// Payload of a heap value.
///
/// Every language value is one of these variants, stored in a heap slot and
/// addressed by [`ValueId`]. The empty list is the distinguished `Cell` with
/// both sides absent; it exists exactly once per runtime (slot 0) and all
/// other cells have both sides present.
#[derive(Debug)]
pub(crate) enum ValueData {
    Int(i64),
    Str(Box<str>),
    Symbol(Box<str>),
    Cell {
        left: Option<ValueId>,
        right: Option<ValueId>,
    },
    Scope(ScopeData),
    Native(NativeData),
    Lambda(LambdaData),
    TypeDesc(Kind),
}

impl ValueData {
    /// A non-nil cons cell. The nil singleton is built directly by the heap.
    pub fn cell(left: ValueId, right: ValueId) -> Self {
        Self::Cell {
            left: Some(left),
            right: Some(right),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Self::Int(_) => Kind::Integer,
            Self::Str(_) => Kind::String,
            Self::Symbol(_) => Kind::Symbol,
            Self::Cell { .. } => Kind::List,
            Self::Scope(_) => Kind::Scope,
            Self::Native(_) => Kind::Builtin,
            Self::Lambda(_) => Kind::Lambda,
            Self::TypeDesc(_) => Kind::Type,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(
            self,
            Self::Cell {
                left: None,
                right: None
            }
        )
    }
}

/// Structural (deep) equality between two values.
///
/// Lists, scopes, integers, and text compare by content; types and native
/// callables compare by identity; lambdas compare by parameter list, body,
/// and captured scope, ignoring the display-only binding field.
///
/// Closure graphs are cyclic (scope -> lambda -> scope), so the recursion
/// carries the set of value pairs already under comparison; a pair seen
/// again is taken as equal, the comparison analogue of the queued mark the
/// collector uses on the same graphs.
pub(crate) fn values_equal(heap: &Heap, a: ValueId, b: ValueId) -> bool {
    let mut seen = AHashSet::new();
    values_equal_inner(heap, a, b, &mut seen)
}

fn values_equal_inner(
    heap: &Heap,
    a: ValueId,
    b: ValueId,
    seen: &mut AHashSet<(ValueId, ValueId)>,
) -> bool {
    if a == b {
        return true;
    }
    match (heap.get(a), heap.get(b)) {
        (ValueData::Int(x), ValueData::Int(y)) => x == y,
        (ValueData::Str(x), ValueData::Str(y)) => x == y,
        (ValueData::Symbol(x), ValueData::Symbol(y)) => x == y,
        (
            ValueData::Cell { left: l1, right: r1 },
            ValueData::Cell { left: l2, right: r2 },
        ) => {
            if !seen.insert((a, b)) {
                return true;
            }
            sides_equal(heap, *l1, *l2, seen) && sides_equal(heap, *r1, *r2, seen)
        }
        (ValueData::Scope(s1), ValueData::Scope(s2)) => {
            if !seen.insert((a, b)) {
                return true;
            }
            scopes_equal(heap, s1, s2, seen)
        }
        (ValueData::Native(n1), ValueData::Native(n2)) => {
            std::ptr::fn_addr_eq(n1.func, n2.func)
                && n1.eval_args == n2.eval_args
                && n1.name == n2.name
                && match (&n1.data, &n2.data) {
                    (Some(d1), Some(d2)) => Rc::ptr_eq(d1, d2),
                    (None, None) => true,
                    _ => false,
                }
        }
        (ValueData::Lambda(f1), ValueData::Lambda(f2)) => {
            if !seen.insert((a, b)) {
                return true;
            }
            f1.kind == f2.kind
                && values_equal_inner(heap, f1.params, f2.params, seen)
                && values_equal_inner(heap, f1.body, f2.body, seen)
                && values_equal_inner(heap, f1.closure, f2.closure, seen)
        }
        (ValueData::TypeDesc(k1), ValueData::TypeDesc(k2)) => k1 == k2,
        _ => false,
    }
}

fn sides_equal(
    heap: &Heap,
    a: Option<ValueId>,
    b: Option<ValueId>,
    seen: &mut AHashSet<(ValueId, ValueId)>,
) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => values_equal_inner(heap, a, b, seen),
        (None, None) => true,
        _ => false,
    }
}

fn scopes_equal(
    heap: &Heap,
    a: &ScopeData,
    b: &ScopeData,
    seen: &mut AHashSet<(ValueId, ValueId)>,
) -> bool {
    if a.map.len() != b.map.len() {
        return false;
    }
    let parents = match (a.parent, b.parent) {
        (Some(p1), Some(p2)) => values_equal_inner(heap, p1, p2, seen),
        (None, None) => true,
        _ => false,
    };
    parents
        && a.map.iter().all(|(name, binding)| {
            b.map
                .get(name)
                .is_some_and(|other| values_equal_inner(heap, binding.value, other.value, seen))
        })
}

/// Writes the printed form of a value.
///
/// The output is informational, not a faithful re-readable serialization:
/// strings print verbatim with no quotes or escaping.
pub(crate) fn write_value(heap: &Heap, id: ValueId, out: &mut String) {
    match heap.get(id) {
        ValueData::Int(n) => {
            let _ = write!(out, "{n}");
        }
        ValueData::Str(s) | ValueData::Symbol(s) => out.push_str(s),
        ValueData::Cell { .. } => write_list(heap, id, out),
        ValueData::Scope(scope) => {
            out.push_str("(scope:");
            for binding in scope.map.values() {
                out.push(' ');
                write_value(heap, binding.symbol, out);
                out.push_str(": ");
                write_value(heap, binding.value, out);
            }
            out.push(')');
        }
        ValueData::Native(native) => {
            let _ = write!(out, "<builtin function {name}>", name = native.name);
        }
        ValueData::Lambda(lambda) => {
            out.push('<');
            out.push_str(match lambda.kind {
                LambdaKind::Function => "lambda ",
                LambdaKind::Macro => "macro ",
            });
            match lambda.binding {
                Some(symbol) => write_value(heap, symbol, out),
                None => out.push_str("(anonymous)"),
            }
            out.push('>');
        }
        ValueData::TypeDesc(kind) => out.push_str((*kind).into()),
    }
}

fn write_list(heap: &Heap, id: ValueId, out: &mut String) {
    out.push('(');
    let mut cur = id;
    let mut first = true;
    loop {
        let ValueData::Cell { left, right } = heap.get(cur) else {
            unreachable!("write_list called on a non-cell value");
        };
        let (Some(left), Some(right)) = (*left, *right) else {
            break; // nil terminator
        };
        if !first {
            out.push(' ');
        }
        first = false;
        write_value(heap, left, out);
        if heap.get(right).kind() == Kind::List {
            cur = right;
        } else {
            out.push_str(" . ");
            write_value(heap, right, out);
            break;
        }
    }
    out.push(')');
}
