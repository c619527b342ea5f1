//! Output and assertion primitives: `print`, `dump-stack`, `assert`,
//! `assert-error`.

use std::{any::Any, io, rc::Rc, str::FromStr};

use crate::{
    args::take_args,
    error::{ErrorKind, RunError, RunResult},
    heap::ValueId,
    runtime::Runtime,
    value::{Kind, ValueData},
};

/// `(print x1 x2 ...)`: prints each argument, then a newline. Returns nil.
pub(crate) fn print(
    rt: &mut Runtime,
    _scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let mut cur = args;
    while !rt.is_nil(cur) {
        let (value, rest) = rt.cell_parts(cur)?;
        let text = rt.display(value);
        rt.print.write_fragment(&text);
        cur = rest;
    }
    rt.print.write_end('\n');
    Ok(rt.nil())
}

/// `(dump-stack)`: writes the current call stack to stderr. Returns nil.
pub(crate) fn dump_stack(
    rt: &mut Runtime,
    _scope: ValueId,
    _args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let _ = rt.dump_stack(&mut io::stderr());
    Ok(rt.nil())
}

/// `(assert x)`: fails with `assertion-failed` when `x` is zero, otherwise
/// returns `x`.
pub(crate) fn assert_true(
    rt: &mut Runtime,
    _scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let [value] = take_args(rt, "assert", args, "d")?;
    let ValueData::Int(n) = rt.heap.get(value) else {
        unreachable!("take_args verified the operand is an integer");
    };
    if *n == 0 {
        Err(ErrorKind::AssertionFailed.err("assertion error"))
    } else {
        Ok(value)
    }
}

/// `(assert-error KIND expr)`: evaluates `expr` expecting it to fail with
/// the named error kind; the expected failure is swallowed. Success, or a
/// failure of a different kind, is an assertion error.
pub(crate) fn assert_error(
    rt: &mut Runtime,
    scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let [kind_expr, expr] = take_args(rt, "assert-error", args, "**")?;

    let kind_value = rt.eval(scope, kind_expr)?;
    let ValueData::Symbol(name) = rt.heap.get(kind_value) else {
        return Err(RunError::wrong_type(
            "assert-error",
            Kind::Symbol,
            rt.kind_of(kind_value),
        ));
    };
    let expected = ErrorKind::from_str(name)
        .map_err(|_| ErrorKind::BadValue.err(format!("unrecognized error kind: {name}")))?;

    match rt.eval(scope, expr) {
        Err(err) if err.kind() == expected => {
            rt.clear_error();
            Ok(kind_value)
        }
        Err(err) => Err(ErrorKind::AssertionFailed.err(format!(
            "expected error {expected}, got {got}: {msg}",
            got = err.kind(),
            msg = err.message()
        ))),
        Ok(_) => Err(ErrorKind::AssertionFailed.err(format!(
            "expected error {expected}, but evaluation succeeded"
        ))),
    }
}
