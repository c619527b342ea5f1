//! The quoting family: `quote`, `quasiquote`, `unquote`.

use std::{any::Any, rc::Rc};

use smallvec::SmallVec;

use crate::{
    args::take_args,
    error::RunResult,
    heap::ValueId,
    runtime::Runtime,
    value::{Kind, ValueData},
};

/// `(quote x)`: returns `x` unevaluated.
pub(crate) fn quote(
    rt: &mut Runtime,
    _scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let [value] = take_args(rt, "quote", args, "*")?;
    Ok(value)
}

/// `(unquote x)`: evaluates `x`. Only meaningful inside `quasiquote`, where
/// the expander dispatches to it, but harmless on its own.
pub(crate) fn unquote(
    rt: &mut Runtime,
    scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let [expr] = take_args(rt, "unquote", args, "*")?;
    rt.eval(scope, expr)
}

/// `(quasiquote x)`: returns `x` with every `(unquote y)` in the tree
/// replaced by the evaluation of `y`; all other structure is preserved,
/// including dotted tails.
pub(crate) fn quasiquote(
    rt: &mut Runtime,
    scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let [template] = take_args(rt, "quasiquote", args, "*")?;
    expand(rt, scope, template)
}

/// Tree-walking expander, mutually recursive with the evaluator through the
/// `unquote` dispatch.
fn expand(rt: &mut Runtime, scope: ValueId, template: ValueId) -> RunResult<ValueId> {
    if rt.kind_of(template) != Kind::List || rt.is_nil(template) {
        return Ok(template);
    }
    let (head, _) = rt.cell_parts(template)?;
    if let ValueData::Symbol(name) = rt.heap.get(head)
        && &**name == "unquote"
    {
        // Evaluating `(unquote y)` runs the unquote builtin, which
        // evaluates y in the caller's scope.
        return rt.eval(scope, template);
    }

    let mut items: SmallVec<[ValueId; 8]> = SmallVec::new();
    let mut tail = rt.nil();
    let mut cur = template;
    loop {
        let (left, right) = rt.cell_parts(cur)?;
        items.push(expand(rt, scope, left)?);
        if rt.is_nil(right) {
            break;
        }
        if rt.kind_of(right) != Kind::List {
            tail = expand(rt, scope, right)?;
            break;
        }
        cur = right;
    }
    let mut list = tail;
    for &item in items.iter().rev() {
        list = rt.new_cell(item, list);
    }
    Ok(list)
}
