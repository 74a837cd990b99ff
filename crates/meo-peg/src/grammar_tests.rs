use crate::{AstNode, Grammar, Parser, Span, lit, many1, range, set};

#[derive(Debug, Default, AstNode)]
struct Num {
    span: Span,
}

#[derive(Debug, Default, AstNode)]
#[ast(name = "number")]
struct Renamed {
    span: Span,
}

#[test]
fn rule_is_declared_once_per_name() {
    let mut g = Grammar::new();
    let a = g.rule("a");
    let b = g.rule("b");
    assert_ne!(a, b);
    assert_eq!(g.rule("a"), a);
    assert_eq!(g.get("b"), Some(b));
    assert_eq!(g.get("c"), None);
    assert_eq!(g.len(), 2);
}

#[test]
fn undefined_rules_are_listed() {
    let mut g = Grammar::new();
    g.rule("later");
    g.add("now", lit("x"));
    g.rule("never");

    let undefined: Vec<&str> = g.undefined().collect();
    assert_eq!(undefined, ["later", "never"]);
}

#[test]
#[should_panic(expected = "rules declared but never defined: later")]
fn parser_rejects_incomplete_grammar() {
    let mut g = Grammar::new();
    let later = g.rule("later");
    g.add("start", later);
    Parser::new(&g);
}

#[test]
#[should_panic(expected = "rule `a` is defined twice")]
fn define_twice_panics() {
    let mut g = Grammar::new();
    let a = g.add("a", lit("x"));
    g.define(a, lit("y"));
}

#[test]
#[should_panic(expected = "already bound to `num`")]
fn bind_twice_panics() {
    let mut g = Grammar::new();
    let a = g.add("a", lit("x"));
    g.bind::<Num>(a);
    g.bind::<Renamed>(a);
}

#[test]
#[should_panic(expected = "not found")]
fn foreign_rule_handle_panics() {
    let mut big = Grammar::new();
    big.rule("a");
    let b = big.rule("b");

    let small = Grammar::new();
    small.name(b);
}

#[test]
fn bind_records_node_name() {
    let mut g = Grammar::new();
    let num = g.add("num", range('0', '9').many1());
    let other = g.add("other", set("xy"));
    g.bind::<Renamed>(num);

    assert!(g.is_bound(num));
    assert!(!g.is_bound(other));
    assert_eq!(g.node_name(num), Some("number"));
    assert_eq!(g.node_name(other), None);
}

#[test]
fn grammar_display() {
    let mut g = Grammar::new();
    let digit = g.add("digit", range('0', '9'));
    let num = g.add("num", many1(digit));
    let sum = g.rule("sum");
    g.define(sum, sum >> '+' >> num | num);
    g.bind::<Num>(num);
    g.rule("todo");

    insta::assert_snapshot!(g, @r"
    digit <- [0-9]
    num   <- digit+ => num
    sum   <- sum '+' num / num
    todo  <- ?
    ");
}

#[test]
fn skip_expression() {
    let mut g = Grammar::new();
    assert!(g.skip().is_none());
    g.set_skip(set(" \t").many());
    assert_eq!(g.skip().map(ToString::to_string).as_deref(), Some("[\\t ]*"));
}

#[test]
fn grammar_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Grammar>();
}

#[test]
fn rules_iterate_in_declaration_order() {
    let mut g = Grammar::new();
    for name in ["c", "a", "b"] {
        g.rule(name);
    }
    let names: Vec<&str> = g.rules().map(|rule| g.name(rule)).collect();
    assert_eq!(names, ["c", "a", "b"]);
}
