//! The reader: a recursive-descent parser over source text.
//!
//! The reader consumes one complete datum per invocation and reports the
//! offset it stopped at, so callers can pull expressions out of a buffer one
//! at a time. Errors carry the 1-based source line, computed by counting
//! newlines in the prefix up to the failing offset.

use crate::{
    error::{ErrorKind, RunError, RunResult},
    heap::ValueId,
    runtime::Runtime,
};

/// Characters that terminate a symbol token.
fn is_delimiter(c: char) -> bool {
    c.is_ascii_whitespace() || matches!(c, '(' | ')' | '.' | '\'' | '`' | ',' | ';' | '"')
}

/// Translates the character after a backslash in a string literal.
///
/// The named escapes produce their control character; any other escaped
/// character stands for itself (so `\"` and `\\` fall out for free).
fn unescape(c: char) -> char {
    match c {
        'a' => '\x07',
        'b' => '\x08',
        'f' => '\x0c',
        'n' => '\n',
        't' => '\t',
        'v' => '\x0b',
        other => other,
    }
}

pub(crate) struct Reader<'src> {
    src: &'src str,
    pos: usize,
}

impl<'src> Reader<'src> {
    pub fn new(src: &'src str) -> Self {
        Self { src, pos: 0 }
    }

    /// Offset of the next unconsumed byte.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Skips whitespace and `;` line comments, then reports whether another
    /// datum can start here.
    pub fn has_more(&mut self) -> bool {
        self.skip_trivia();
        self.pos < self.src.len()
    }

    fn skip_trivia(&mut self) {
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len() {
            let b = bytes[self.pos];
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else if b == b';' {
                while self.pos < bytes.len() && bytes[self.pos] != b'\n' {
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    /// 1-based line number of the current position.
    fn line(&self) -> u32 {
        let newlines = self.src.as_bytes()[..self.pos]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        u32::try_from(newlines).unwrap_or(u32::MAX).saturating_add(1)
    }

    fn err(&self, kind: ErrorKind, message: impl Into<String>) -> RunError {
        kind.err(message).with_line(self.line())
    }

    /// Reads one complete datum. Fails with `end-of-input` when the input is
    /// exhausted (possibly mid-datum) and `syntax` on malformed text.
    pub fn read_expr(&mut self, rt: &mut Runtime) -> RunResult<ValueId> {
        self.skip_trivia();
        let Some(c) = self.peek() else {
            return Err(self.err(ErrorKind::EndOfInput, "unexpected end of input"));
        };
        match c {
            '(' => {
                self.bump(c);
                self.read_list(rt)
            }
            ')' => Err(self.err(ErrorKind::Syntax, "unmatched ')'")),
            '.' => Err(self.err(ErrorKind::Syntax, "'.' outside of a list")),
            '"' => {
                self.bump(c);
                self.read_string(rt)
            }
            '\'' => self.read_quoted(rt, "quote"),
            '`' => self.read_quoted(rt, "quasiquote"),
            ',' => self.read_quoted(rt, "unquote"),
            _ if c.is_ascii_digit() => self.read_integer(rt),
            '+' | '-' if self.second_is_digit() => self.read_integer(rt),
            _ => self.read_symbol(rt),
        }
    }

    fn second_is_digit(&self) -> bool {
        self.src.as_bytes().get(self.pos + 1).is_some_and(u8::is_ascii_digit)
    }

    fn read_quoted(&mut self, rt: &mut Runtime, sym: &str) -> RunResult<ValueId> {
        self.pos += 1; // the quote character, always one byte
        let inner = self.read_expr(rt)?;
        Ok(rt.quote_with(inner, sym))
    }

    fn read_integer(&mut self, rt: &mut Runtime) -> RunResult<ValueId> {
        let start = self.pos;
        let bytes = self.src.as_bytes();
        if matches!(bytes[self.pos], b'+' | b'-') {
            self.pos += 1;
        }
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        let text = &self.src[start..self.pos];
        let n: i64 = text
            .parse()
            .map_err(|_| self.err(ErrorKind::Syntax, format!("malformed integer: {text}")))?;
        Ok(rt.new_int(n))
    }

    fn read_string(&mut self, rt: &mut Runtime) -> RunResult<ValueId> {
        let mut text = String::new();
        loop {
            let Some(c) = self.peek() else {
                return Err(self.err(ErrorKind::EndOfInput, "unterminated string"));
            };
            self.bump(c);
            match c {
                '"' => return Ok(rt.new_string(&text)),
                '\\' => {
                    let Some(escaped) = self.peek() else {
                        return Err(self.err(ErrorKind::EndOfInput, "unterminated string"));
                    };
                    self.bump(escaped);
                    text.push(unescape(escaped));
                }
                other => text.push(other),
            }
        }
    }

    fn read_symbol(&mut self, rt: &mut Runtime) -> RunResult<ValueId> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_delimiter(c) {
                break;
            }
            self.bump(c);
        }
        debug_assert!(self.pos > start, "read_symbol called at a delimiter");
        Ok(rt.new_symbol(&self.src[start..self.pos]))
    }

    /// Reads list elements after the opening `(`, including the empty list
    /// and the dotted-pair tail form.
    fn read_list(&mut self, rt: &mut Runtime) -> RunResult<ValueId> {
        let mut elements: Vec<ValueId> = Vec::new();
        let mut tail = rt.nil();
        loop {
            self.skip_trivia();
            let Some(c) = self.peek() else {
                return Err(self.err(ErrorKind::EndOfInput, "unterminated list"));
            };
            match c {
                ')' => {
                    self.bump(c);
                    break;
                }
                '.' => {
                    self.bump(c);
                    if elements.is_empty() {
                        return Err(self.err(ErrorKind::Syntax, "'.' at the start of a list"));
                    }
                    tail = self.read_expr(rt)?;
                    self.skip_trivia();
                    match self.peek() {
                        Some(')') => {
                            self.bump(')');
                            break;
                        }
                        Some(_) => {
                            return Err(self.err(ErrorKind::Syntax, "expected ')' after dotted pair"));
                        }
                        None => {
                            return Err(self.err(ErrorKind::EndOfInput, "unterminated list"));
                        }
                    }
                }
                _ => elements.push(self.read_expr(rt)?),
            }
        }
        let mut list = tail;
        for &element in elements.iter().rev() {
            list = rt.new_cell(element, list);
        }
        Ok(list)
    }
}

impl Runtime {
    /// Reads a single datum from `source`.
    ///
    /// Returns the parsed value and the offset of the first unconsumed byte,
    /// or `None` when `source` holds nothing but whitespace and comments.
    pub fn read(&mut self, source: &str) -> RunResult<Option<(ValueId, usize)>> {
        let mut reader = Reader::new(source);
        if !reader.has_more() {
            return Ok(None);
        }
        match reader.read_expr(self) {
            Ok(value) => Ok(Some((value, reader.pos()))),
            Err(err) => Err(self.record(err)),
        }
    }

    /// Reads every top-level datum in `source` and wraps them in a `progn`
    /// form, so the whole input can be evaluated as one expression. Empty
    /// input parses to `(progn)`.
    pub fn read_progn(&mut self, source: &str) -> RunResult<ValueId> {
        let mut reader = Reader::new(source);
        let mut exprs = vec![self.new_symbol("progn")];
        while reader.has_more() {
            match reader.read_expr(self) {
                Ok(value) => exprs.push(value),
                Err(err) => return Err(self.record(err)),
            }
        }
        Ok(self.list_from_slice(&exprs))
    }
}
