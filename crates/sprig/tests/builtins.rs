//! Tests for the builtin set: arithmetic, comparison, list operations,
//! printing, and assertions.

use pretty_assertions::assert_eq;
use sprig::{CollectPrint, ErrorKind, RunError, Runtime, ValueId};

fn eval_str(rt: &mut Runtime, scope: ValueId, src: &str) -> Result<ValueId, RunError> {
    let program = rt.read_progn(src)?;
    rt.eval(scope, program)
}

fn eval_display(rt: &mut Runtime, scope: ValueId, src: &str) -> String {
    let value = eval_str(rt, scope, src).unwrap();
    rt.display(value)
}

fn eval_err(rt: &mut Runtime, scope: ValueId, src: &str) -> RunError {
    eval_str(rt, scope, src).unwrap_err()
}

// =============================================================================
// 1. Arithmetic
// =============================================================================

#[test]
fn addition_and_multiplication() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    assert_eq!(eval_display(&mut rt, scope, "(+ 1 2 3)"), "6");
    assert_eq!(eval_display(&mut rt, scope, "(+)"), "0");
    assert_eq!(eval_display(&mut rt, scope, "(* 2 3 4)"), "24");
    assert_eq!(eval_display(&mut rt, scope, "(*)"), "1");
}

/// `+` and `*` commute.
#[test]
fn addition_and_multiplication_commute() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    assert_eq!(
        eval_display(&mut rt, scope, "(+ 2 5)"),
        eval_display(&mut rt, scope, "(+ 5 2)")
    );
    assert_eq!(
        eval_display(&mut rt, scope, "(* 2 5)"),
        eval_display(&mut rt, scope, "(* 5 2)")
    );
}

#[test]
fn subtraction_and_single_argument_negation() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    assert_eq!(eval_display(&mut rt, scope, "(- 10 3 2)"), "5");
    assert_eq!(eval_display(&mut rt, scope, "(- 4)"), "-4");
    assert_eq!(eval_err(&mut rt, scope, "(-)").kind(), ErrorKind::TooFewArgs);
}

#[test]
fn division_and_divide_by_zero() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    assert_eq!(eval_display(&mut rt, scope, "(/ 20 2 5)"), "2");
    let err = eval_err(&mut rt, scope, "(/ 1 0)");
    assert_eq!(err.kind(), ErrorKind::BadValue);
    assert!(err.message().contains("divide by zero"), "message: {}", err.message());
}

#[test]
fn arithmetic_type_checks_every_argument() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    for src in ["(+ 1 \"x\")", "(- 'a)", "(* 1 '(2))", "(/ 1 \"x\")"] {
        assert_eq!(eval_err(&mut rt, scope, src).kind(), ErrorKind::WrongType, "for {src}");
    }
}

/// Overflow wraps: i64 two's-complement, identical in debug and release.
#[test]
fn arithmetic_overflow_wraps() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    let max = i64::MAX;
    let result = eval_display(&mut rt, scope, &format!("(+ {max} 1)"));
    assert_eq!(result, i64::MIN.to_string());
}

// =============================================================================
// 2. Comparison
// =============================================================================

#[test]
fn integer_orderings() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    for (src, expected) in [
        ("(= 3 3)", "1"),
        ("(== 3 4)", "0"),
        ("(!= 3 4)", "1"),
        ("(< 1 2)", "1"),
        ("(<= 2 2)", "1"),
        ("(> 1 2)", "0"),
        ("(>= 3 2)", "1"),
    ] {
        assert_eq!(eval_display(&mut rt, scope, src), expected, "for {src}");
    }
}

/// Ordering operators are integer-only; anything else is wrong-type.
#[test]
fn comparisons_reject_non_integers() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    for src in ["(< \"a\" \"b\")", "(= 'a 'a)", "(>= 1 '())"] {
        assert_eq!(eval_err(&mut rt, scope, src).kind(), ErrorKind::WrongType, "for {src}");
    }
}

#[test]
fn identity_versus_structural_equality() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    // Two separately constructed lists: structurally equal, not identical.
    assert_eq!(eval_display(&mut rt, scope, "(eq? '(1 2) '(1 2))"), "0");
    assert_eq!(eval_display(&mut rt, scope, "(equal? '(1 2) '(1 2))"), "1");
    // The same cell is identical to itself.
    assert_eq!(eval_display(&mut rt, scope, "(define l '(1 2)) (eq? l l)"), "1");
    // With interning enabled, equal symbols share a cell.
    assert_eq!(eval_display(&mut rt, scope, "(eq? 'a 'a)"), "1");
}

#[test]
fn structural_equality_distinguishes_kinds_and_contents() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    assert_eq!(eval_display(&mut rt, scope, "(equal? 1 \"1\")"), "0");
    assert_eq!(eval_display(&mut rt, scope, "(equal? '(1 2) '(1 3))"), "0");
    assert_eq!(eval_display(&mut rt, scope, "(equal? '(1 (2 . 3)) '(1 (2 . 3)))"), "1");
}

/// Two independently built self-referential closures (each captures a scope
/// that binds the closure itself) compare equal without diverging: once a
/// pair of values repeats, the comparison takes it as equal, the analogue of
/// the collector's queued mark on the same cyclic graphs.
#[test]
fn structural_equality_tolerates_cyclic_closures() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    let src = "
        (define make (lambda () (define s (lambda (x) (s x))) s))
        (define a (make))
        (define b (make))
        (equal? a b)
    ";
    assert_eq!(eval_display(&mut rt, scope, src), "1");
}

/// Cyclic closures that genuinely differ still compare unequal, and the
/// comparison still terminates.
#[test]
fn differing_cyclic_closures_compare_unequal() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    let src = "
        (define make (lambda () (define s (lambda (x) (s x))) s))
        (define make-other (lambda () (define s (lambda (x) (s x x))) s))
        (equal? (make) (make-other))
    ";
    assert_eq!(eval_display(&mut rt, scope, src), "0");
}

// =============================================================================
// 3. List operations
// =============================================================================

#[test]
fn car_cdr_cons() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    assert_eq!(eval_display(&mut rt, scope, "(car '(1 2 3))"), "1");
    assert_eq!(eval_display(&mut rt, scope, "(cdr '(1 2 3))"), "(2 3)");
    assert_eq!(eval_display(&mut rt, scope, "(cons 1 '(2 3))"), "(1 2 3)");
    assert_eq!(eval_display(&mut rt, scope, "(cons 1 2)"), "(1 . 2)");
}

#[test]
fn car_and_cdr_of_nil_are_bad_values() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    assert_eq!(eval_err(&mut rt, scope, "(car '())").kind(), ErrorKind::BadValue);
    assert_eq!(eval_err(&mut rt, scope, "(cdr '())").kind(), ErrorKind::BadValue);
}

#[test]
fn list_and_null_p() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    assert_eq!(eval_display(&mut rt, scope, "(list 1 (+ 1 1) 3)"), "(1 2 3)");
    assert_eq!(eval_display(&mut rt, scope, "(list)"), "()");
    assert_eq!(eval_display(&mut rt, scope, "(null? '())"), "1");
    assert_eq!(eval_display(&mut rt, scope, "(null? '(1))"), "0");
    assert_eq!(eval_display(&mut rt, scope, "(null? 0)"), "0");
}

#[test]
fn map_over_one_list() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    assert_eq!(
        eval_display(&mut rt, scope, "(map (lambda (x) (* x x)) '(1 2 3 4))"),
        "(1 4 9 16)"
    );
}

/// Zipwise mapping stops when the shortest list is exhausted.
#[test]
fn map_zips_multiple_lists() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    assert_eq!(
        eval_display(&mut rt, scope, "(map + '(1 2 3) '(10 20))"),
        "(11 22)"
    );
}

/// Heads are passed quoted, so list elements reach the callable unevaluated.
#[test]
fn map_does_not_re_evaluate_elements() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    assert_eq!(
        eval_display(&mut rt, scope, "(map car '((1 2) (3 4)))"),
        "(1 3)"
    );
}

#[test]
fn map_argument_errors() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    assert_eq!(eval_err(&mut rt, scope, "(map car)").kind(), ErrorKind::TooFewArgs);
    assert_eq!(eval_err(&mut rt, scope, "(map car 5)").kind(), ErrorKind::BadValue);
}

#[test]
fn reduce_two_and_three_argument_forms() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    assert_eq!(eval_display(&mut rt, scope, "(reduce + '(1 2 3 4))"), "10");
    assert_eq!(eval_display(&mut rt, scope, "(reduce + 100 '(1 2 3))"), "106");
    assert_eq!(eval_display(&mut rt, scope, "(reduce - '(10 1 2))"), "7");
}

#[test]
fn reduce_list_length_requirements() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    assert_eq!(eval_err(&mut rt, scope, "(reduce + '(1))").kind(), ErrorKind::BadValue);
    assert_eq!(eval_err(&mut rt, scope, "(reduce + 0 '())").kind(), ErrorKind::BadValue);
    assert_eq!(eval_err(&mut rt, scope, "(reduce +)").kind(), ErrorKind::TooFewArgs);
    assert_eq!(eval_err(&mut rt, scope, "(reduce + 0 '(1) 2)").kind(), ErrorKind::TooManyArgs);
}

// =============================================================================
// 4. Control flow
// =============================================================================

#[test]
fn if_selects_on_integer_truthiness() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    assert_eq!(eval_display(&mut rt, scope, "(if 1 'yes 'no)"), "yes");
    assert_eq!(eval_display(&mut rt, scope, "(if 0 'yes 'no)"), "no");
    // Non-integer values are false.
    assert_eq!(eval_display(&mut rt, scope, "(if \"truthy?\" 'yes 'no)"), "no");
    assert_eq!(eval_display(&mut rt, scope, "(if '() 'yes 'no)"), "no");
}

#[test]
fn if_evaluates_only_the_selected_branch() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    // The untaken branch would divide by zero.
    assert_eq!(eval_display(&mut rt, scope, "(if 1 'ok (/ 1 0))"), "ok");
}

#[test]
fn cond_selects_the_first_truthy_clause() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    let src = "(cond ((= 1 2) 'first) ((= 2 2) 'second) (1 'third))";
    assert_eq!(eval_display(&mut rt, scope, src), "second");
    let all_false = eval_str(&mut rt, scope, "(cond (0 'a) (0 'b))").unwrap();
    assert!(rt.is_nil(all_false));
}

#[test]
fn progn_returns_the_last_value() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    assert_eq!(eval_display(&mut rt, scope, "(progn 1 2 3)"), "3");
}

// =============================================================================
// 5. Printing and assertions
// =============================================================================

#[test]
fn print_writes_arguments_then_a_newline() {
    let mut rt = Runtime::new();
    let collect = CollectPrint::new();
    let out = collect.handle();
    rt.set_print_writer(Box::new(collect));
    let scope = rt.new_default_scope();
    let result = eval_str(&mut rt, scope, "(print 1 \"two\" '(3 4))").unwrap();
    assert!(rt.is_nil(result));
    assert_eq!(out.borrow().as_str(), "1two(3 4)\n");
}

#[test]
fn assert_passes_nonzero_and_fails_zero() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    assert_eq!(eval_display(&mut rt, scope, "(assert 5)"), "5");
    assert_eq!(
        eval_err(&mut rt, scope, "(assert 0)").kind(),
        ErrorKind::AssertionFailed
    );
    assert_eq!(
        eval_err(&mut rt, scope, "(assert '())").kind(),
        ErrorKind::WrongType
    );
}

#[test]
fn assert_error_matches_and_clears_the_expected_failure() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    eval_str(&mut rt, scope, "(assert-error 'bad-value (/ 1 0))").unwrap();
    assert!(rt.last_error().is_none(), "matched errors are cleared");
}

#[test]
fn assert_error_rejects_wrong_kind_or_success() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    let err = eval_err(&mut rt, scope, "(assert-error 'wrong-type (/ 1 0))");
    assert_eq!(err.kind(), ErrorKind::AssertionFailed);
    let err = eval_err(&mut rt, scope, "(assert-error 'bad-value (+ 1 1))");
    assert_eq!(err.kind(), ErrorKind::AssertionFailed);
    let err = eval_err(&mut rt, scope, "(assert-error 'no-such-kind 1)");
    assert_eq!(err.kind(), ErrorKind::BadValue);
}

#[test]
fn dump_stack_builtin_returns_nil() {
    let mut rt = Runtime::new();
    let scope = rt.new_default_scope();
    let result = eval_str(&mut rt, scope, "(dump-stack)").unwrap();
    assert!(rt.is_nil(result));
}
