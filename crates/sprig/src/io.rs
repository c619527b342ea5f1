use std::{
    cell::RefCell,
    fmt::Debug,
    io::{self, Write as _},
    rc::Rc,
};

/// Trait for handling output from the `print` builtin.
///
/// Implement this to capture or redirect print output from embedded code. The
/// runtime owns one writer; the default is [`StdPrint`].
pub trait PrintWriter: Debug {
    /// Called once for each printed argument, with its formatted text.
    ///
    /// This method must write only the given fragment; the terminating newline
    /// is emitted separately via [`write_end`](Self::write_end).
    fn write_fragment(&mut self, text: &str);

    /// Writes a single terminator character (the newline after `print`).
    fn write_end(&mut self, end: char);
}

/// Default `PrintWriter` that writes straight to stdout.
///
/// Write errors are ignored: embedded code has no meaningful way to react to
/// a broken stdout.
#[derive(Debug, Default)]
pub struct StdPrint;

impl PrintWriter for StdPrint {
    fn write_fragment(&mut self, text: &str) {
        let _ = io::stdout().write_all(text.as_bytes());
    }

    fn write_end(&mut self, end: char) {
        let mut buf = [0u8; 4];
        let _ = io::stdout().write_all(end.encode_utf8(&mut buf).as_bytes());
        let _ = io::stdout().flush();
    }
}

/// A `PrintWriter` that collects all output into a shared string buffer.
///
/// The buffer is handed out as an `Rc<RefCell<String>>` so callers can keep a
/// handle while the writer itself is owned by the runtime. Useful for testing
/// or capturing print output programmatically.
#[derive(Debug, Default)]
pub struct CollectPrint {
    buf: Rc<RefCell<String>>,
}

impl CollectPrint {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle to the shared output buffer.
    #[must_use]
    pub fn handle(&self) -> Rc<RefCell<String>> {
        Rc::clone(&self.buf)
    }
}

impl PrintWriter for CollectPrint {
    fn write_fragment(&mut self, text: &str) {
        self.buf.borrow_mut().push_str(text);
    }

    fn write_end(&mut self, end: char) {
        self.buf.borrow_mut().push(end);
    }
}

/// `PrintWriter` that ignores all output.
///
/// Useful for suppressing print output during testing or benchmarking.
#[derive(Debug, Default)]
pub struct NoPrint;

impl PrintWriter for NoPrint {
    fn write_fragment(&mut self, _text: &str) {}

    fn write_end(&mut self, _end: char) {}
}
