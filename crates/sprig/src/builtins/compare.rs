//! Comparison primitives.
//!
//! The ordering operators are integer-only; any other operand kind raises
//! `wrong-type`. `eq?` is cell identity, `equal?` is deep structural
//! equality.

use std::{any::Any, rc::Rc};

use crate::{
    args::take_args,
    error::RunResult,
    heap::ValueId,
    runtime::Runtime,
    value::{values_equal, ValueData},
};

fn int_pair(rt: &Runtime, name: &str, args: ValueId) -> RunResult<(i64, i64)> {
    let [a, b] = take_args(rt, name, args, "dd")?;
    let (ValueData::Int(a), ValueData::Int(b)) = (rt.heap.get(a), rt.heap.get(b)) else {
        unreachable!("take_args verified both operands are integers");
    };
    Ok((*a, *b))
}

fn bool_int(rt: &mut Runtime, b: bool) -> ValueId {
    rt.new_int(i64::from(b))
}

pub(crate) fn eq(
    rt: &mut Runtime,
    _scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let (a, b) = int_pair(rt, "=", args)?;
    Ok(bool_int(rt, a == b))
}

pub(crate) fn ne(
    rt: &mut Runtime,
    _scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let (a, b) = int_pair(rt, "!=", args)?;
    Ok(bool_int(rt, a != b))
}

pub(crate) fn lt(
    rt: &mut Runtime,
    _scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let (a, b) = int_pair(rt, "<", args)?;
    Ok(bool_int(rt, a < b))
}

pub(crate) fn le(
    rt: &mut Runtime,
    _scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let (a, b) = int_pair(rt, "<=", args)?;
    Ok(bool_int(rt, a <= b))
}

pub(crate) fn gt(
    rt: &mut Runtime,
    _scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let (a, b) = int_pair(rt, ">", args)?;
    Ok(bool_int(rt, a > b))
}

pub(crate) fn ge(
    rt: &mut Runtime,
    _scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let (a, b) = int_pair(rt, ">=", args)?;
    Ok(bool_int(rt, a >= b))
}

/// `(eq? a b)`: identity: true iff both arguments are the same heap cell.
pub(crate) fn eq_p(
    rt: &mut Runtime,
    _scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let [a, b] = take_args(rt, "eq?", args, "**")?;
    Ok(bool_int(rt, a == b))
}

/// `(equal? a b)`: deep structural equality.
pub(crate) fn equal_p(
    rt: &mut Runtime,
    _scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let [a, b] = take_args(rt, "equal?", args, "**")?;
    let equal = values_equal(&rt.heap, a, b);
    Ok(bool_int(rt, equal))
}
