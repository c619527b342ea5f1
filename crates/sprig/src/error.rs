use std::fmt::{self, Display};

use strum::{Display as StrumDisplay, EnumString, IntoStaticStr};

use crate::value::Kind;

/// Result type alias for operations that can produce an interpreter error.
pub type RunResult<T> = Result<T, RunError>;

/// The category of an interpreter error.
///
/// Uses strum derives for automatic `Display`, `FromStr`, and `Into<&'static str>`
/// implementations. The string form is the kind name used by `assert-error`
/// (e.g. `WrongType` -> "wrong-type").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumString, IntoStaticStr)]
pub enum ErrorKind {
    /// Catch-all for errors raised without a more specific category.
    #[strum(serialize = "generic")]
    Generic,
    /// The reader ran out of input mid-expression. The REPL uses this kind to
    /// decide whether to prompt for a continuation line.
    #[strum(serialize = "end-of-input")]
    EndOfInput,
    /// Malformed source text (bad integer, unterminated list, stray `)`).
    #[strum(serialize = "syntax")]
    Syntax,
    /// A file could not be opened or read.
    #[strum(serialize = "file-i/o")]
    FileIo,
    #[strum(serialize = "too-many-args")]
    TooManyArgs,
    #[strum(serialize = "too-few-args")]
    TooFewArgs,
    #[strum(serialize = "wrong-type")]
    WrongType,
    /// A value that is not a builtin or lambda was applied.
    #[strum(serialize = "not-callable")]
    NotCallable,
    /// A value with no evaluation rule (scope, builtin, lambda, type) was evaluated.
    #[strum(serialize = "not-evaluable")]
    NotEvaluable,
    /// Symbol lookup failed in every scope up the parent chain.
    #[strum(serialize = "not-found")]
    NotFound,
    /// The host (typically the REPL) asked the interpreter to stop.
    #[strum(serialize = "exit-request")]
    ExitRequest,
    #[strum(serialize = "assertion-failed")]
    AssertionFailed,
    /// A well-typed argument with an unacceptable value (divide by zero,
    /// car of the empty list).
    #[strum(serialize = "bad-value")]
    BadValue,
}

impl ErrorKind {
    /// Creates an error of this kind with the given message.
    pub fn err(self, message: impl Into<String>) -> RunError {
        RunError::new(self, message)
    }
}

/// One frame of the call-stack snapshot attached to an error.
///
/// Frames are plain data, captured at the moment of failure: they do not keep
/// the callee value alive and are unaffected by garbage collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    name: String,
}

impl StackFrame {
    pub(crate) fn new(name: String) -> Self {
        Self { name }
    }

    /// Display name of the callee for this frame.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A structured interpreter error.
///
/// Every fallible operation returns `RunResult<T>` and propagates errors with
/// `?`. The reader populates [`line`](Self::line); the call protocol attaches
/// a call-stack snapshot the first time an error crosses a call frame. Public
/// runtime entry points additionally record the error on the runtime so hosts
/// can query it after the fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunError {
    kind: ErrorKind,
    message: String,
    line: Option<u32>,
    stack: Vec<StackFrame>,
}

impl RunError {
    /// Creates a new error with no line number and no stack snapshot.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            line: None,
            stack: Vec::new(),
        }
    }

    /// A `wrong-type` error naming the expected and actual kinds.
    pub(crate) fn wrong_type(context: &str, expected: Kind, got: Kind) -> Self {
        ErrorKind::WrongType.err(format!("{context}: expected {expected}, got {got}"))
    }

    pub(crate) fn too_few_args(context: &str) -> Self {
        ErrorKind::TooFewArgs.err(format!("{context}: too few arguments"))
    }

    pub(crate) fn too_many_args(context: &str) -> Self {
        ErrorKind::TooManyArgs.err(format!("{context}: too many arguments"))
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Source line (1-based) the reader was on when it failed, if any.
    #[must_use]
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// The call-stack snapshot, most recent call first. Empty when the error
    /// was raised outside of any call frame.
    #[must_use]
    pub fn stack(&self) -> &[StackFrame] {
        &self.stack
    }

    /// Attaches a source line, keeping an already-recorded line.
    #[must_use]
    pub(crate) fn with_line(mut self, line: u32) -> Self {
        if self.line.is_none() {
            self.line = Some(line);
        }
        self
    }

    pub(crate) fn has_stack(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Records the call-stack snapshot. Only the first (innermost) snapshot is
    /// kept so the trace reflects the moment of failure.
    pub(crate) fn set_stack(&mut self, stack: Vec<StackFrame>) {
        if self.stack.is_empty() {
            self.stack = stack;
        }
    }
}

impl Display for RunError {
    /// Formats the error the way the reference host prints it:
    ///
    /// ```text
    /// at line 3: Error wrong-type: +: expected integer, got string
    /// Stack trace (most recent call first):
    ///   in +
    ///   in main
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.line {
            write!(f, "at line {line}: ")?;
        }
        write!(f, "Error {kind}: {msg}", kind = self.kind, msg = self.message)?;
        if !self.stack.is_empty() {
            write!(f, "\nStack trace (most recent call first):")?;
            for frame in &self.stack {
                write!(f, "\n  in {name}", name = frame.name())?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for RunError {}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn kind_names_round_trip() {
        for kind in [
            ErrorKind::Generic,
            ErrorKind::EndOfInput,
            ErrorKind::Syntax,
            ErrorKind::FileIo,
            ErrorKind::TooManyArgs,
            ErrorKind::TooFewArgs,
            ErrorKind::WrongType,
            ErrorKind::NotCallable,
            ErrorKind::NotEvaluable,
            ErrorKind::NotFound,
            ErrorKind::ExitRequest,
            ErrorKind::AssertionFailed,
            ErrorKind::BadValue,
        ] {
            let name = kind.to_string();
            assert_eq!(ErrorKind::from_str(&name), Ok(kind), "round trip for {name}");
        }
    }

    #[test]
    fn display_includes_line_and_stack() {
        let mut err = ErrorKind::BadValue.err("divide by zero").with_line(7);
        err.set_stack(vec![StackFrame::new("/".to_owned()), StackFrame::new("main".to_owned())]);
        let text = err.to_string();
        assert_eq!(
            text,
            "at line 7: Error bad-value: divide by zero\nStack trace (most recent call first):\n  in /\n  in main"
        );
    }
}
