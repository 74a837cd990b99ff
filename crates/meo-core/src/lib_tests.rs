use crate::{Position, Span};

#[test]
fn position_advances_by_char() {
    let mut pos = Position::START;
    pos.advance('a');
    pos.advance('é');
    assert_eq!(pos, Position::new(3, 1, 3));
}

#[test]
fn position_newline_resets_column() {
    let mut pos = Position::START;
    pos.advance_str("ab\n");
    pos.newline();
    assert_eq!(pos.offset, 3);
    assert_eq!(pos.line, 2);
    assert_eq!(pos.column, 1);
}

#[test]
fn position_orders_by_offset() {
    let a = Position::new(2, 1, 3);
    let b = Position::new(5, 2, 1);
    assert!(a < b);
    assert_eq!(a.max(b), b);
}

#[test]
fn position_display() {
    assert_eq!(Position::new(10, 3, 7).to_string(), "3:7");
}

#[test]
fn span_text_and_len() {
    let source = "let x = 1";
    let mut begin = Position::START;
    begin.advance_str("let ");
    let mut end = begin;
    end.advance('x');
    let span = Span::new(begin, end);

    assert_eq!(span.text(source), "x");
    assert_eq!(span.len(), 1);
    assert_eq!(span.range(), 4..5);
    assert!(!span.is_empty());
    assert!(Span::empty(begin).is_empty());
}

#[test]
fn span_text_out_of_bounds_is_empty() {
    let span = Span::new(Position::new(3, 1, 4), Position::new(9, 1, 10));
    assert_eq!(span.text("ab"), "");
}

#[test]
fn span_contains() {
    let outer = Span::new(Position::new(0, 1, 1), Position::new(5, 1, 6));
    let inner = Span::new(Position::new(1, 1, 2), Position::new(3, 1, 4));
    assert!(outer.contains(&inner));
    assert!(!inner.contains(&outer));
}

#[test]
fn span_serializes_positions() {
    let span = Span::new(Position::START, Position::new(2, 1, 3));
    let json = serde_json::to_string(&span).unwrap();
    assert_eq!(
        json,
        r#"{"begin":{"offset":0,"line":1,"column":1},"end":{"offset":2,"line":1,"column":3}}"#
    );
}
