//! Control flow and definition forms: `eval`, `define`, `lambda`, `macro`,
//! `if`, `cond`, `progn`.

use std::{any::Any, rc::Rc};

use crate::{
    args::take_args,
    error::{ErrorKind, RunError, RunResult},
    heap::ValueId,
    runtime::Runtime,
    value::{Kind, LambdaData, LambdaKind},
};

/// `(eval x)`: re-evaluates an already evaluated value in the current scope.
pub(crate) fn eval_form(
    rt: &mut Runtime,
    scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let [expr] = take_args(rt, "eval", args, "*")?;
    rt.eval(scope, expr)
}

/// `(define sym expr)`: evaluates `expr`, binds the result to `sym` in the
/// current scope, and returns it.
pub(crate) fn define(
    rt: &mut Runtime,
    scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let [symbol, expr] = take_args(rt, "define", args, "s*")?;
    let value = rt.eval(scope, expr)?;
    rt.bind(scope, symbol, value);
    Ok(value)
}

fn make_lambda(
    rt: &mut Runtime,
    scope: ValueId,
    args: ValueId,
    name: &str,
    kind: LambdaKind,
) -> RunResult<ValueId> {
    let [params, body] = take_args(rt, name, args, "lR")?;
    let mut cur = params;
    while !rt.is_nil(cur) {
        let (param, rest) = rt.cell_parts(cur)?;
        let got = rt.kind_of(param);
        if got != Kind::Symbol {
            return Err(RunError::wrong_type(name, Kind::Symbol, got));
        }
        cur = rest;
    }
    Ok(rt.new_lambda(LambdaData {
        kind,
        params,
        body,
        closure: scope,
        binding: None,
    }))
}

/// `(lambda (params...) body...)`: builds a function closing over the
/// current scope.
pub(crate) fn lambda(
    rt: &mut Runtime,
    scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    make_lambda(rt, scope, args, "lambda", LambdaKind::Function)
}

/// `(macro (params...) body...)`: like `lambda`, but arguments arrive raw
/// and the body's result is evaluated again in the caller's scope.
pub(crate) fn macro_form(
    rt: &mut Runtime,
    scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    make_lambda(rt, scope, args, "macro", LambdaKind::Macro)
}

/// `(if c t e)`: evaluates `c`; a nonzero integer selects `t`, anything else
/// selects `e`.
pub(crate) fn if_form(
    rt: &mut Runtime,
    scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    let [condition, when_true, when_false] = take_args(rt, "if", args, "***")?;
    let condition = rt.eval(scope, condition)?;
    if rt.truthy(condition) {
        rt.eval(scope, when_true)
    } else {
        rt.eval(scope, when_false)
    }
}

/// `(cond (t1 v1) (t2 v2) ...)`: evaluates each test in turn; the first
/// truthy test selects its value expression. All tests false yields nil.
pub(crate) fn cond(
    rt: &mut Runtime,
    scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    if rt.is_nil(args) {
        return Err(ErrorKind::Syntax.err("bad syntax for cond"));
    }
    let mut cur = args;
    while !rt.is_nil(cur) {
        let (clause, rest) = rt.cell_parts(cur)?;
        if rt.kind_of(clause) != Kind::List
            || !rt.is_proper_list(clause)
            || rt.list_length(clause) != 2
        {
            return Err(ErrorKind::Syntax.err("bad syntax for cond"));
        }
        let (test, value_node) = rt.cell_parts(clause)?;
        let (value, _) = rt.cell_parts(value_node)?;
        let test = rt.eval(scope, test)?;
        if rt.truthy(test) {
            return rt.eval(scope, value);
        }
        cur = rest;
    }
    Ok(rt.nil())
}

/// `(progn e1 e2 ...)`: sequential evaluation, returning the last value.
pub(crate) fn progn(
    rt: &mut Runtime,
    scope: ValueId,
    args: ValueId,
    _data: Option<&Rc<dyn Any>>,
) -> RunResult<ValueId> {
    rt.progn(scope, args)
}
