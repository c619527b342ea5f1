//! sprig: an embeddable, garbage-collected Lisp interpreter.
//!
//! A host constructs a [`Runtime`], seeds a root scope with
//! [`Runtime::new_default_scope`] (and any native callables of its own via
//! [`Runtime::add_native`]), reads source text with [`Runtime::read_progn`],
//! and evaluates it with [`Runtime::eval`]. All language values live on the
//! runtime's heap and are addressed by [`ValueId`] handles; collection is
//! host-driven through [`Runtime::mark`] and [`Runtime::sweep`].
//!
//! ```
//! use sprig::Runtime;
//!
//! let mut rt = Runtime::new();
//! let scope = rt.new_default_scope();
//! let program = rt.read_progn("(+ 1 2 3)").unwrap();
//! let result = rt.eval(scope, program).unwrap();
//! assert_eq!(rt.display(result), "6");
//! rt.mark(scope);
//! rt.sweep();
//! ```

mod args;
mod builtins;
mod error;
mod eval;
mod heap;
mod intern;
mod io;
mod parse;
mod runtime;
mod scope;
mod value;

pub use crate::{
    error::{ErrorKind, RunError, RunResult, StackFrame},
    heap::{HeapStats, ValueId},
    io::{CollectPrint, NoPrint, PrintWriter, StdPrint},
    runtime::{Runtime, RuntimeConfig},
    value::{Kind, NativeFunc},
};

/// Version of the interpreter library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
