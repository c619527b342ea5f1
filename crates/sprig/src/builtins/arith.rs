//! Integer arithmetic: `+`, `-`, `*`, `/`.
//!
//! All operands are `i64` and overflow wraps (explicit `wrapping_*` ops, so
//! debug and release builds behave identically).

use std::{any::Any, rc::Rc};

use smallvec::SmallVec;

use crate::{
    error::{ErrorKind, RunError, RunResult},
    heap::ValueId,
    runtime::Runtime,
    value::{Kind, ValueData},
};

/// Collects the arguments as integers, type-checking each one.
fn int_args(rt: &Runtime, name: &str, args: ValueId) -> RunResult<SmallVec<[i64; 8]>> {
    let mut out = SmallVec::new();
    let mut cur = args;
    while !rt.is_nil(cur) {
        let (left, right) = rt.cell_parts(cur)?;
        match rt.heap.get(left) {
            ValueData::Int(n) => out.push(*n),
            other => return Err(RunError::wrong_type(name, Kind::Integer, other.kind())),
        }
        cur = right;
    }
    Ok(out)
}

pub(crate) fn add(
    rt: &mut Runtime,
    _scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let operands = int_args(rt, "+", args)?;
    let sum = operands.iter().fold(0i64, |acc, &n| acc.wrapping_add(n));
    Ok(rt.new_int(sum))
}

/// `-` with a single argument negates; with more, subtracts left to right.
pub(crate) fn sub(
    rt: &mut Runtime,
    _scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let operands = int_args(rt, "-", args)?;
    let result = match operands.split_first() {
        None => return Err(RunError::too_few_args("-")),
        Some((&only, [])) => only.wrapping_neg(),
        Some((&first, rest)) => rest.iter().fold(first, |acc, &n| acc.wrapping_sub(n)),
    };
    Ok(rt.new_int(result))
}

pub(crate) fn mul(
    rt: &mut Runtime,
    _scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let operands = int_args(rt, "*", args)?;
    let product = operands.iter().fold(1i64, |acc, &n| acc.wrapping_mul(n));
    Ok(rt.new_int(product))
}

pub(crate) fn div(
    rt: &mut Runtime,
    _scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let operands = int_args(rt, "/", args)?;
    let Some((&first, rest)) = operands.split_first() else {
        return Err(RunError::too_few_args("/"));
    };
    let mut quotient = first;
    for &divisor in rest {
        if divisor == 0 {
            return Err(ErrorKind::BadValue.err("divide by zero"));
        }
        quotient = quotient.wrapping_div(divisor);
    }
    Ok(rt.new_int(quotient))
}
