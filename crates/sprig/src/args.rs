//! Argument-shape checking for builtins.
//!
//! A format descriptor states the expected shape of an argument list, one
//! character per argument:
//!
//! | char | meaning |
//! |------|---------------------------|
//! | `d`  | integer                   |
//! | `l`  | list                      |
//! | `s`  | symbol                    |
//! | `S`  | string                    |
//! | `o`  | scope                     |
//! | `b`  | native callable           |
//! | `t`  | type descriptor           |
//! | `*`  | any value                 |
//! | `R`  | rest: binds the remaining list, which must be non-empty |
//!
//! Checking is all-or-nothing: on a count or type mismatch an error is
//! returned and no bindings are produced.

use crate::{
    error::{RunError, RunResult},
    heap::{Heap, ValueId},
    runtime::Runtime,
    value::Kind,
};

fn format_kind(spec: u8) -> Option<Kind> {
    match spec {
        b'd' => Some(Kind::Integer),
        b'l' => Some(Kind::List),
        b's' => Some(Kind::Symbol),
        b'S' => Some(Kind::String),
        b'o' => Some(Kind::Scope),
        b'b' => Some(Kind::Builtin),
        b't' => Some(Kind::Type),
        _ => None,
    }
}

/// Validates `args` against `format` and returns the bound values.
///
/// `N` must equal the number of format characters; `R`, when present, must be
/// last and binds the remaining (non-empty) list as one value. `name` is the
/// builtin name used in error messages.
pub(crate) fn take_args<const N: usize>(
    rt: &Runtime,
    name: &str,
    args: ValueId,
    format: &str,
) -> RunResult<[ValueId; N]> {
    debug_assert_eq!(N, format.len(), "format length must match binding count");
    let mut out = [Heap::NIL; N];
    let mut slot = 0;
    let mut cur = args;
    for spec in format.bytes() {
        if rt.is_nil(cur) {
            return Err(RunError::too_few_args(name));
        }
        if spec == b'R' {
            debug_assert_eq!(slot, N - 1, "R must be the last format character");
            out[slot] = cur;
            return Ok(out);
        }
        let (left, right) = rt.cell_parts(cur)?;
        if let Some(expected) = format_kind(spec) {
            let got = rt.kind_of(left);
            if got != expected {
                return Err(RunError::wrong_type(name, expected, got));
            }
        } else {
            debug_assert_eq!(spec, b'*', "unknown format character");
        }
        out[slot] = left;
        slot += 1;
        cur = right;
    }
    if rt.is_nil(cur) {
        Ok(out)
    } else {
        Err(RunError::too_many_args(name))
    }
}
