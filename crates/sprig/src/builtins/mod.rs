//! The default builtin set.
//!
//! Each submodule implements one group of primitives as plain functions with
//! the [`NativeFunc`] signature; [`install`] registers them all in a scope.
//! Special forms (the ones that must see raw, unevaluated arguments) are
//! registered with the pre-evaluate flag cleared.

mod arith;
mod compare;
mod control;
mod lists;
mod output;
mod quoting;

use crate::{heap::ValueId, runtime::Runtime, value::NativeFunc};

/// Builtins whose arguments are evaluated before the call.
const PREEVAL: &[(&str, NativeFunc)] = &[
    ("eval", control::eval_form),
    ("car", lists::car),
    ("cdr", lists::cdr),
    ("cons", lists::cons),
    ("list", lists::list),
    ("null?", lists::null_p),
    ("map", lists::map),
    ("reduce", lists::reduce),
    ("+", arith::add),
    ("-", arith::sub),
    ("*", arith::mul),
    ("/", arith::div),
    ("=", compare::eq),
    ("==", compare::eq),
    ("!=", compare::ne),
    ("<", compare::lt),
    ("<=", compare::le),
    (">", compare::gt),
    (">=", compare::ge),
    ("eq?", compare::eq_p),
    ("equal?", compare::equal_p),
    ("print", output::print),
    ("dump-stack", output::dump_stack),
    ("assert", output::assert_true),
];

/// Special forms: arguments arrive raw.
const NO_PREEVAL: &[(&str, NativeFunc)] = &[
    ("quote", quoting::quote),
    ("quasiquote", quoting::quasiquote),
    ("unquote", quoting::unquote),
    ("define", control::define),
    ("lambda", control::lambda),
    ("macro", control::macro_form),
    ("if", control::if_form),
    ("cond", control::cond),
    ("progn", control::progn),
    ("assert-error", output::assert_error),
];

/// Seeds `scope` with every language builtin.
pub(crate) fn install(rt: &mut Runtime, scope: ValueId) {
    for &(name, func) in PREEVAL {
        rt.add_native(scope, name, func, true, None);
    }
    for &(name, func) in NO_PREEVAL {
        rt.add_native(scope, name, func, false, None);
    }
}
