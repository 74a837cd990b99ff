use crate::utils::{to_snake_case, truncate_text};

#[test]
fn snake_case_from_pascal() {
    assert_eq!(to_snake_case("FooBar"), "foo_bar");
    assert_eq!(to_snake_case("Num"), "num");
    assert_eq!(to_snake_case("ExpListLow"), "exp_list_low");
}

#[test]
fn snake_case_from_camel() {
    assert_eq!(to_snake_case("fooBar"), "foo_bar");
}

#[test]
fn snake_case_keeps_acronyms_together() {
    assert_eq!(to_snake_case("ASTNode"), "ast_node");
    assert_eq!(to_snake_case("IO"), "io");
}

#[test]
fn snake_case_idempotent() {
    assert_eq!(to_snake_case("foo_bar"), "foo_bar");
    assert_eq!(to_snake_case("Foo_Bar"), "foo_bar");
}

#[test]
fn truncate_short_text_unchanged() {
    assert_eq!(truncate_text("abc", 3), "abc");
}

#[test]
fn truncate_long_text_with_ellipsis() {
    assert_eq!(truncate_text("abcdef", 4), "abc…");
}

#[test]
fn truncate_escapes_newlines() {
    assert_eq!(truncate_text("a\nb", 10), "a\\nb");
    assert_eq!(truncate_text("a\tb\nc", 4), "a\\t…");
}
