//! List primitives: `car`, `cdr`, `cons`, `list`, `null?`, `map`, `reduce`.

use std::{any::Any, rc::Rc};

use smallvec::SmallVec;

use crate::{
    args::take_args,
    error::{ErrorKind, RunError, RunResult},
    heap::ValueId,
    runtime::Runtime,
};

pub(crate) fn car(
    rt: &mut Runtime,
    _scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let [list] = take_args(rt, "car", args, "l")?;
    if rt.is_nil(list) {
        return Err(ErrorKind::BadValue.err("car of the empty list"));
    }
    let (left, _) = rt.cell_parts(list)?;
    Ok(left)
}

pub(crate) fn cdr(
    rt: &mut Runtime,
    _scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let [list] = take_args(rt, "cdr", args, "l")?;
    if rt.is_nil(list) {
        return Err(ErrorKind::BadValue.err("cdr of the empty list"));
    }
    let (_, right) = rt.cell_parts(list)?;
    Ok(right)
}

pub(crate) fn cons(
    rt: &mut Runtime,
    _scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let [left, right] = take_args(rt, "cons", args, "**")?;
    Ok(rt.new_cell(left, right))
}

/// `(list a b ...)`: the evaluated arguments, as a list. The call protocol
/// already built exactly that list, so this is the identity function.
pub(crate) fn list(
    _rt: &mut Runtime,
    _scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    Ok(args)
}

pub(crate) fn null_p(
    rt: &mut Runtime,
    _scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let [value] = take_args(rt, "null?", args, "*")?;
    let is_nil = rt.is_nil(value);
    Ok(rt.new_int(i64::from(is_nil)))
}

/// `(map f l1 l2 ...)`: calls `f` with the heads of every list, collecting
/// the results; stops as soon as any list is exhausted.
///
/// Heads are passed quoted so they reach `f` without being evaluated again.
pub(crate) fn map(
    rt: &mut Runtime,
    scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let [func, lists] = take_args(rt, "map", args, "*R")?;

    let mut tails: SmallVec<[ValueId; 4]> = SmallVec::new();
    let mut cur = lists;
    while !rt.is_nil(cur) {
        let (list, rest) = rt.cell_parts(cur)?;
        if !rt.is_proper_list(list) {
            return Err(ErrorKind::BadValue.err("map: arguments after the callable must be lists"));
        }
        tails.push(list);
        cur = rest;
    }

    let mut results = Vec::new();
    loop {
        if tails.iter().any(|&tail| rt.is_nil(tail)) {
            break;
        }
        let mut call_args: SmallVec<[ValueId; 4]> = SmallVec::new();
        for tail in &mut tails {
            let (head, rest) = rt.cell_parts(*tail)?;
            call_args.push(rt.quote(head));
            *tail = rest;
        }
        let arg_list = rt.list_from_slice(&call_args);
        results.push(rt.call(scope, func, arg_list)?);
    }
    Ok(rt.list_from_slice(&results))
}

/// `(reduce f L)` / `(reduce f init L)`: left fold. The two-argument form
/// takes the initial accumulator from the head of the list.
pub(crate) fn reduce(
    rt: &mut Runtime,
    scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let (func, mut acc, mut cur) = match rt.list_length(args) {
        2 => {
            let [func, list] = take_args(rt, "reduce", args, "*l")?;
            if rt.list_length(list) < 2 {
                return Err(ErrorKind::BadValue.err("reduce: list must have at least 2 entries"));
            }
            let (init, rest) = rt.cell_parts(list)?;
            (func, init, rest)
        }
        3 => {
            let [func, init, list] = take_args(rt, "reduce", args, "**l")?;
            if rt.is_nil(list) {
                return Err(ErrorKind::BadValue.err("reduce: list must have at least 1 entry"));
            }
            (func, init, list)
        }
        n if n < 2 => return Err(RunError::too_few_args("reduce")),
        _ => return Err(RunError::too_many_args("reduce")),
    };

    while !rt.is_nil(cur) {
        let (item, rest) = rt.cell_parts(cur)?;
        let quoted_acc = rt.quote(acc);
        let quoted_item = rt.quote(item);
        let pair = rt.list_from_slice(&[quoted_acc, quoted_item]);
        acc = rt.call(scope, func, pair)?;
        cur = rest;
    }
    Ok(acc)
}
