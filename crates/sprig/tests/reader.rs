//! Tests for the reader: datum parsing, desugaring, error reporting, and the
//! whole-input progn wrapping.

use pretty_assertions::assert_eq;
use sprig::{ErrorKind, Runtime};

/// Reads a single datum and returns its printed form.
fn read_display(rt: &mut Runtime, src: &str) -> String {
    let (value, _) = rt.read(src).unwrap().expect("input holds a datum");
    rt.display(value)
}

// =============================================================================
// 1. Atoms
// =============================================================================

#[test]
fn integers_round_trip() {
    let mut rt = Runtime::new();
    for n in [0i64, 1, -1, 42, -7, 123_456, i64::MAX, i64::MIN] {
        let text = n.to_string();
        assert_eq!(read_display(&mut rt, &text), text, "round trip for {n}");
    }
}

#[test]
fn signed_integers_and_sign_symbols_are_distinguished() {
    let mut rt = Runtime::new();
    let (value, _) = rt.read("+5").unwrap().unwrap();
    assert_eq!(rt.as_int(value), Some(5));
    // A bare sign is the builtin's name, not a number.
    let (value, _) = rt.read("-").unwrap().unwrap();
    assert_eq!(rt.symbol_name(value), Some("-"));
}

#[test]
fn symbols_keep_their_text() {
    let mut rt = Runtime::new();
    for sym in ["foo", "null?", "<=", "with-dash", "a1"] {
        assert_eq!(read_display(&mut rt, sym), sym);
    }
}

#[test]
fn string_escapes_are_translated() {
    let mut rt = Runtime::new();
    let (value, _) = rt.read(r#""a\tb\nc\"d\\e\qf""#).unwrap().unwrap();
    assert_eq!(rt.as_str(value), Some("a\tb\nc\"d\\eqf"));
}

// =============================================================================
// 2. Lists and dotted pairs
// =============================================================================

#[test]
fn lists_print_back_to_their_source() {
    let mut rt = Runtime::new();
    for src in ["()", "(a)", "(a b c)", "(a (b c) d)", "(a . b)", "(a b . c)"] {
        assert_eq!(read_display(&mut rt, src), src);
    }
}

#[test]
fn empty_list_is_the_nil_singleton() {
    let mut rt = Runtime::new();
    let (a, _) = rt.read("()").unwrap().unwrap();
    let (b, _) = rt.read("( )").unwrap().unwrap();
    assert_eq!(a, rt.nil());
    assert_eq!(b, rt.nil());
}

#[test]
fn reader_reports_consumed_offset() {
    let mut rt = Runtime::new();
    let src = "(+ 1 2) trailing";
    let (_, offset) = rt.read(src).unwrap().unwrap();
    assert_eq!(&src[offset..], " trailing");
}

// =============================================================================
// 3. Quoting desugars to the primitive forms
// =============================================================================

#[test]
fn quote_family_desugars() {
    let mut rt = Runtime::new();
    assert_eq!(read_display(&mut rt, "'x"), "(quote x)");
    assert_eq!(read_display(&mut rt, "`x"), "(quasiquote x)");
    assert_eq!(read_display(&mut rt, ",x"), "(unquote x)");
    assert_eq!(read_display(&mut rt, "'(1 2)"), "(quote (1 2))");
    assert_eq!(read_display(&mut rt, "`(a ,b)"), "(quasiquote (a (unquote b)))");
}

// =============================================================================
// 4. Trivia: whitespace and comments
// =============================================================================

#[test]
fn comments_and_whitespace_are_skipped() {
    let mut rt = Runtime::new();
    let src = "  ; leading comment\n  42 ; trailing";
    let (value, _) = rt.read(src).unwrap().unwrap();
    assert_eq!(rt.as_int(value), Some(42));
}

#[test]
fn blank_input_reads_as_nothing() {
    let mut rt = Runtime::new();
    assert!(rt.read("").unwrap().is_none());
    assert!(rt.read("  \n ; just a comment\n").unwrap().is_none());
}

// =============================================================================
// 5. Whole-input parsing
// =============================================================================

#[test]
fn read_progn_wraps_every_top_level_expression() {
    let mut rt = Runtime::new();
    let program = rt.read_progn("1 2 3").unwrap();
    assert_eq!(rt.display(program), "(progn 1 2 3)");
}

#[test]
fn empty_input_parses_to_bare_progn() {
    let mut rt = Runtime::new();
    let program = rt.read_progn("").unwrap();
    assert_eq!(rt.display(program), "(progn)");
}

// =============================================================================
// 6. Errors
// =============================================================================

#[test]
fn reader_rejects_stray_close_paren() {
    let mut rt = Runtime::new();
    let err = rt.read_progn(")").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.line(), Some(1));
}

#[test]
fn unterminated_forms_report_end_of_input() {
    let mut rt = Runtime::new();
    for src in ["(a b", "\"unclosed", "'", "(a . b"] {
        let err = rt.read_progn(src).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EndOfInput, "for source {src:?}");
    }
}

#[test]
fn errors_carry_the_failing_line() {
    let mut rt = Runtime::new();
    let err = rt.read_progn("ok\nalso-ok\n)").unwrap_err();
    assert_eq!(err.line(), Some(3));
}

#[test]
fn dotted_pair_must_close_after_tail() {
    let mut rt = Runtime::new();
    let err = rt.read_progn("(a . b c)").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
}

#[test]
fn parse_errors_are_recorded_on_the_runtime() {
    let mut rt = Runtime::new();
    assert!(rt.last_error().is_none());
    let _ = rt.read_progn(")");
    assert_eq!(rt.error_kind(), Some(ErrorKind::Syntax));
    rt.clear_error();
    assert!(rt.last_error().is_none());
}
