use indoc::indoc;
use meo_peg::ast::Printer;

use crate::language;

fn exp(source: &str) -> String {
    let tree = language().parse_exp(source).expect("parse failed");
    Printer::new(&*tree, source).dump()
}

fn block(source: &str) -> String {
    let tree = language().parse_block(source).expect("parse failed");
    Printer::new(&*tree, source).dump()
}

fn error(source: &str) -> String {
    language().parse_block(source).unwrap_err().to_string()
}

#[test]
fn precedence() {
    insta::assert_snapshot!(block("x = 1 + 2 * 3"), @r#"
    (block
      (assign
        (variable
          (name "x"))
        (binary
          (num "1")
          (op "+")
          (binary
            (num "2")
            (op "*")
            (num "3")))))
    "#);
}

#[test]
fn subtraction_is_left_associative() {
    insta::assert_snapshot!(exp("a - b - c"), @r#"
    (binary
      (binary
        (variable
          (name "a"))
        (op "-")
        (variable
          (name "b")))
      (op "-")
      (variable
        (name "c")))
    "#);
}

#[test]
fn power_binds_tighter_than_negation() {
    insta::assert_snapshot!(exp("-x ^ 2"), @r#"
    (unary
      (op "-")
      (binary
        (variable
          (name "x"))
        (op "^")
        (num "2")))
    "#);
}

#[test]
fn power_is_right_associative() {
    insta::assert_snapshot!(exp("2^3^2"), @r#"
    (binary
      (num "2")
      (op "^")
      (binary
        (num "3")
        (op "^")
        (num "2")))
    "#);
}

#[test]
fn parentheses() {
    insta::assert_snapshot!(exp("(1 + 2) * 3"), @r#"
    (binary
      (parens
        (binary
          (num "1")
          (op "+")
          (num "2")))
      (op "*")
      (num "3"))
    "#);
}

#[test]
fn chained_calls() {
    insta::assert_snapshot!(exp("f(a, g(1))(2)"), @r#"
    (call
      (call
        (variable
          (name "f"))
        (args
          (variable
            (name "a"))
          (call
            (variable
              (name "g"))
            (args
              (num "1")))))
      (args
        (num "2")))
    "#);
}

#[test]
fn call_without_arguments() {
    insta::assert_snapshot!(exp("f()"), @r#"
    (call
      (variable
        (name "f"))
      (args))
    "#);
}

#[test]
fn logical_operators() {
    insta::assert_snapshot!(exp("a or b and not c == d"), @r#"
    (binary
      (variable
        (name "a"))
      (op "or")
      (binary
        (variable
          (name "b"))
        (op "and")
        (binary
          (unary
            (op "not")
            (variable
              (name "c")))
          (op "==")
          (variable
            (name "d")))))
    "#);
}

#[test]
fn keywords_need_a_boundary() {
    insta::assert_snapshot!(exp("notable"), @r#"
    (variable
      (name "notable"))
    "#);
}

#[test]
fn statements_and_comments() {
    let source = indoc! {"
        -- setup
        x = 1

        y = x + 1 -- sum
        print(y)
    "};
    insta::assert_snapshot!(block(source), @r#"
    (block
      (assign
        (variable
          (name "x"))
        (num "1"))
      (assign
        (variable
          (name "y"))
        (binary
          (variable
            (name "x"))
          (op "+")
          (num "1")))
      (exp_stat
        (call
          (variable
            (name "print"))
          (args
            (variable
              (name "y"))))))
    "#);
}

#[test]
fn comparison_is_not_assignment() {
    insta::assert_snapshot!(block("x == 1"), @r#"
    (block
      (exp_stat
        (binary
          (variable
            (name "x"))
          (op "==")
          (num "1"))))
    "#);
}

#[test]
fn unclosed_call() {
    insta::assert_snapshot!(error("f(1,"), @"1:5: unexpected end of input");
}

#[test]
fn missing_operand() {
    insta::assert_snapshot!(error("x = = 1"), @"1:5: syntax error");
}

#[test]
fn error_on_later_line() {
    insta::assert_snapshot!(error("x = 1\ny = (2"), @"2:7: unexpected end of input");
}

#[test]
fn no_implicit_line_continuation() {
    insta::assert_snapshot!(error("x = 1 +\n2"), @"1:8: syntax error");
}
