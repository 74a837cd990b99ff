use crate::{ErrorKind, ErrorMessages, Errors, ParseError, Position, Span};

fn error(begin: usize, end: usize, kind: ErrorKind) -> ParseError {
    let span = Span::new(
        Position::new(begin, 1, begin as u32 + 1),
        Position::new(end, 1, end as u32 + 1),
    );
    ParseError::new(span, kind)
}

fn sample() -> Errors {
    Errors::new(vec![
        error(2, 3, ErrorKind::User(7)),
        error(4, 5, ErrorKind::Syntax),
    ])
}

#[test]
fn plain_without_source() {
    let errors = sample();
    insta::assert_snapshot!(errors.printer().render(), @"1:5: syntax error");
}

#[test]
fn plain_all_candidates() {
    let errors = sample();
    insta::assert_snapshot!(errors.printer().all(true).render(), @r"
    1:5: syntax error
    1:3: error 7
    ");
}

#[test]
fn user_messages() {
    let errors = sample();
    let messages = ErrorMessages::new().with(7, "operator expected");
    let result = errors.printer().messages(&messages).all(true).render();
    insta::assert_snapshot!(result, @r"
    1:5: syntax error
    1:3: operator expected
    ");
}

#[test]
fn snippet_with_source() {
    let errors = sample();
    let result = errors.printer().source("1 + * 2").render();
    insta::assert_snapshot!(result, @r"
    error: syntax error
      |
    1 | 1 + * 2
      |     ^ 1:5
    ");
}

#[test]
fn snippet_with_path() {
    let errors = sample();
    let result = errors
        .printer()
        .source("1 + * 2")
        .path("calc.txt")
        .render();
    insta::assert_snapshot!(result, @r"
    error: syntax error
     --> calc.txt:1:5
      |
    1 | 1 + * 2
      |     ^ 1:5
    ");
}

#[test]
fn empty_span_points_at_next_char() {
    let errors = Errors::new(vec![error(4, 4, ErrorKind::Syntax)]);
    let result = errors.printer().source("1 + x").render();
    insta::assert_snapshot!(result, @r"
    error: syntax error
      |
    1 | 1 + x
      |     ^ 1:5
    ");
}

#[test]
fn colored_snippet() {
    let errors = sample();
    let result = errors.printer().source("1 + * 2").colored(true).render();
    assert!(result.contains("syntax error"));
    assert!(result.contains('\x1b'));
}

#[test]
fn no_errors_renders_nothing() {
    let errors = Errors::default();
    assert!(errors.printer().render().is_empty());
    assert!(errors.printer().source("x").render().is_empty());
}
