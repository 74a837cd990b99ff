use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crate::ast::{AstList, AstPtr, AstSel, ConstructError, Printer, Traversal};
use crate::{
    AstNode, Error, ErrorKind, Grammar, Parser, Rule, RuntimeError, Span, ch, lit, many1, nl,
    range, set, term, user,
};

#[derive(Debug, Default, AstNode)]
struct Num {
    span: Span,
}

#[derive(Debug, Default, AstNode)]
struct Op {
    span: Span,
}

#[derive(Debug, Default, AstNode)]
struct Binary {
    span: Span,
    lhs: AstSel<true, (Num, Binary)>,
    op: AstPtr<true, Op>,
    rhs: AstSel<true, (Num, Binary)>,
}

/// Arithmetic with the usual precedence, left-associative operators and
/// optional spaces between tokens.
struct Calc {
    grammar: Grammar,
    sum: Rule,
}

fn calc() -> Calc {
    let mut g = Grammar::new();
    g.set_skip(set(" ").many());

    let num = g.add("num", range('0', '9').many1());
    let add_op = g.add("add_op", set("+-"));
    let mul_op = g.add("mul_op", set("*/"));

    let sum = g.rule("sum");
    let product = g.rule("product");
    let atom = g.add("atom", term(num) | term('(') >> sum >> term(')'));
    let add = g.add("add", sum >> term(add_op) >> product);
    let mul = g.add("mul", product >> term(mul_op) >> atom);
    g.define(sum, add | product);
    g.define(product, mul | atom);

    g.bind::<Num>(num);
    g.bind::<Op>(add_op);
    g.bind::<Op>(mul_op);
    g.bind::<Binary>(add);
    g.bind::<Binary>(mul);

    Calc { grammar: g, sum }
}

fn dump(input: &str) -> String {
    let calc = calc();
    let tree = Parser::new(&calc.grammar)
        .parse(input, calc.sum)
        .expect("parse failed");
    Printer::new(&*tree, input).dump()
}

#[test]
fn single_number() {
    insta::assert_snapshot!(dump("42"), @r#"(num "42")"#);
}

#[test]
fn precedence() {
    insta::assert_snapshot!(dump("1+2*3"), @r#"
    (binary
      (num "1")
      (op "+")
      (binary
        (num "2")
        (op "*")
        (num "3")))
    "#);
}

#[test]
fn subtraction_is_left_associative() {
    insta::assert_snapshot!(dump("1-2-3"), @r#"
    (binary
      (binary
        (num "1")
        (op "-")
        (num "2"))
      (op "-")
      (num "3"))
    "#);
}

#[test]
fn parentheses_and_spaces() {
    insta::assert_snapshot!(dump("(1 + 2) * 3"), @r#"
    (binary
      (binary
        (num "1")
        (op "+")
        (num "2"))
      (op "*")
      (num "3"))
    "#);
}

#[test]
fn long_chain_nests_to_the_left() {
    let calc = calc();
    let input = "1+2+3+4+5+6+7+8";
    let tree = Parser::new(&calc.grammar).parse(input, calc.sum).unwrap();

    let mut depth = 0;
    let mut node: &dyn AstNode = &*tree;
    while let Some(binary) = node.cast::<Binary>() {
        assert_eq!(binary.rhs.cast::<Num>().map(|n| n.span.text(input).len()), Some(1));
        depth += 1;
        node = binary.lhs.node();
    }
    assert_eq!(depth, 7);
    assert_eq!(node.text(input), "1");
}

#[test]
fn spans_cover_children() {
    let calc = calc();
    let input = "12*(3+45)-6/7";
    let tree = Parser::new(&calc.grammar).parse(input, calc.sum).unwrap();

    assert_eq!(tree.span().range(), 0..input.len());
    tree.traverse(&mut |node| {
        for child in node.children() {
            assert!(node.span().contains(&child.span()), "{node:?}");
        }
        Traversal::Continue
    });

    let mut numbers = Vec::new();
    tree.traverse(&mut |node| {
        if node.is::<Num>() {
            numbers.push(node.text(input));
        }
        Traversal::Continue
    });
    assert_eq!(numbers, ["12", "3", "45", "6", "7"]);
}

#[test]
fn failed_alternative_leaves_no_nodes() {
    let mut g = Grammar::new();
    let num = g.add("num", range('0', '9').many1());
    let op = g.add("op", ch('+'));
    let pair = g.add("pair", num >> op >> num);
    let start = g.add("start", pair | num);
    g.bind::<Num>(num);
    g.bind::<Op>(op);
    g.bind::<Binary>(pair);

    let tree = Parser::new(&g).parse("7", start).unwrap();
    assert!(tree.is::<Num>());
    assert_eq!(tree.text("7"), "7");
}

#[test]
fn trailing_input_is_an_error() {
    let calc = calc();
    let err = Parser::new(&calc.grammar)
        .parse("1+2)", calc.sum)
        .unwrap_err();

    let best = err.errors().and_then(|errors| errors.best()).unwrap();
    assert_eq!(best.span.begin.offset, 3);
    assert_eq!(best.kind, ErrorKind::Syntax);
    insta::assert_snapshot!(err, @"1:4: syntax error");
}

#[test]
fn unexpected_end_of_input() {
    let calc = calc();
    let err = Parser::new(&calc.grammar)
        .parse("(1+2", calc.sum)
        .unwrap_err();

    let best = err.errors().and_then(|errors| errors.best()).unwrap();
    assert_eq!(best.span.begin.offset, 4);
    assert_eq!(best.kind, ErrorKind::InvalidEof);
}

#[test]
fn error_is_reported_at_the_furthest_failure() {
    let calc = calc();
    let input = "1 + 2 * * 3";
    let err = Parser::new(&calc.grammar).parse(input, calc.sum).unwrap_err();

    let best = err.errors().and_then(|errors| errors.best()).unwrap();
    assert_eq!(best.span.begin.offset, 8);
    assert_eq!(best.span.text(input), "*");
}

#[test]
fn empty_input() {
    let calc = calc();
    let err = Parser::new(&calc.grammar).parse("", calc.sum).unwrap_err();
    insta::assert_snapshot!(err, @"1:1: unexpected end of input");
}

#[test]
fn parse_as_checks_root_type() {
    let calc = calc();
    let parser = Parser::new(&calc.grammar);

    let binary = parser.parse_as::<Binary>("1*2", calc.sum).unwrap();
    assert_eq!(binary.op.node().span.text("1*2"), "*");

    let err = parser.parse_as::<Binary>("1", calc.sum).unwrap_err();
    assert!(matches!(
        err,
        Error::Construct(ConstructError::RootType {
            expected: "binary",
            found: "num"
        })
    ));
}

#[test]
fn recognize_returns_consumed_span() {
    let mut g = Grammar::new();
    let word = g.add("word", range('a', 'z').many1());
    let span = Parser::new(&g).recognize("hello", word).unwrap();
    assert_eq!(span.range(), 0..5);
}

#[test]
fn unbound_start_rule_has_no_root() {
    let mut g = Grammar::new();
    let word = g.add("word", range('a', 'z').many1());
    let err = Parser::new(&g).parse("abc", word).unwrap_err();
    assert!(matches!(
        err,
        Error::Construct(ConstructError::RootCount { count: 0 })
    ));
}

#[test]
fn exec_fuel_is_enforced() {
    let calc = calc();
    let err = Parser::new(&calc.grammar)
        .exec_fuel(10)
        .parse("1+2+3+4", calc.sum)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Runtime(RuntimeError::ExecFuelExhausted(10))
    ));
    insta::assert_snapshot!(err, @"runtime execution limit exceeded (10 steps)");
}

#[test]
fn recursion_limit_is_enforced() {
    let mut g = Grammar::new();
    let nest = g.rule("nest");
    g.define(nest, '(' >> nest >> ')' | ch('x'));

    let parser = Parser::new(&g);
    assert!(parser.recursion_limit(10).recognize("((((x))))", nest).is_ok());

    let err = parser
        .recursion_limit(3)
        .recognize("((((x))))", nest)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Runtime(RuntimeError::RecursionLimitExceeded(3))
    ));
}

#[test]
fn nesting_limit_is_enforced() {
    let mut g = Grammar::new();
    let nest = g.rule("nest");
    g.define(nest, '(' >> nest >> ')' | ch('x'));

    let parser = Parser::new(&g);
    assert!(parser.nesting_limit(64).recognize("((((x))))", nest).is_ok());

    let err = parser
        .nesting_limit(8)
        .recognize("((((x))))", nest)
        .unwrap_err();
    insta::assert_snapshot!(err, @"runtime recursion limit exceeded (8 levels)");
}

#[test]
fn deep_nesting_fails_before_the_stack_overflows() {
    for depth in [1_000, 20_000] {
        let input = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
        // Default spawned-thread stack size.
        let err = thread::spawn(move || {
            let mut g = Grammar::new();
            let nest = g.rule("nest");
            g.define(nest, '(' >> nest >> ')' | ch('x'));
            Parser::new(&g).recognize(&input, nest).unwrap_err()
        })
        .join()
        .unwrap();
        assert!(matches!(
            err,
            Error::Runtime(RuntimeError::RecursionLimitExceeded(1024))
        ));
    }
}

#[test]
fn user_handler_sees_state() {
    let mut g = Grammar::new();
    let name = g.add(
        "name",
        user(range('a', 'z').many1(), |item| {
            let text = item.text().to_string();
            match item.state::<Vec<String>>() {
                Some(names) => {
                    names.push(text);
                    true
                }
                None => false,
            }
        }),
    );
    let list = g.add("list", name >> (',' >> name).many());
    g.bind::<Num>(list);

    let mut names: Vec<String> = Vec::new();
    let tree = Parser::new(&g)
        .parse_with_state("ab,c,def", list, &mut names)
        .unwrap();
    assert_eq!(tree.text("ab,c,def"), "ab,c,def");
    assert_eq!(names, ["ab", "c", "def"]);

    // Without state the handler vetoes every name.
    assert!(Parser::new(&g).recognize("ab", list).is_err());
}

#[test]
fn user_handler_reports_errors() {
    let mut g = Grammar::new();
    let short = g.add(
        "short",
        user(range('0', '9').many1(), |item| {
            if item.text().len() > 3 {
                item.report(1);
                return false;
            }
            true
        }),
    );

    let parser = Parser::new(&g);
    assert!(parser.recognize("123", short).is_ok());

    let input = "12345";
    let err = parser.recognize(input, short).unwrap_err();
    let errors = err.errors().unwrap();
    let reported: Vec<&str> = errors
        .iter()
        .filter(|e| e.kind == ErrorKind::User(1))
        .map(|e| e.span.text(input))
        .collect();
    assert_eq!(reported, ["12345"]);
}

#[test]
fn newlines_advance_lines() {
    let mut g = Grammar::new();
    let line = g.add("line", range('a', 'z').many() >> nl(ch('\n')));
    let start = g.add("start", many1(line));

    let err = Parser::new(&g).recognize("ab\ncd\ne!", start).unwrap_err();
    insta::assert_snapshot!(err, @"3:2: syntax error");
}

#[test]
fn grammar_is_shared_across_threads() {
    let calc = calc();
    let parser = Parser::new(&calc.grammar);
    let inputs = ["1+2", "3*(4-5)", "6/7/8", "9"];

    thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| scope.spawn(move || dump_with(&parser, input)))
            .collect();
        let dumps: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for (input, dump) in inputs.iter().zip(&dumps) {
            assert_eq!(*dump, dump_with(&parser, input));
        }
    });

    fn dump_with(parser: &Parser<'_>, input: &str) -> String {
        let tree = parser.parse(input, parser.grammar().get("sum").unwrap()).unwrap();
        Printer::new(&*tree, input).dump()
    }
}

static CREATED: AtomicUsize = AtomicUsize::new(0);
static DROPPED: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug)]
struct Tracked;

impl Default for Tracked {
    fn default() -> Self {
        CREATED.fetch_add(1, Ordering::SeqCst);
        Tracked
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        DROPPED.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Default, AstNode)]
struct Leaf {
    span: Span,
    #[ast(skip)]
    _tracked: Tracked,
}

#[derive(Debug, Default, AstNode)]
struct Pair {
    span: Span,
    #[ast(skip)]
    _tracked: Tracked,
    first: AstPtr<true, Leaf>,
    second: AstPtr<true, Leaf>,
}

#[test]
fn every_node_is_dropped_once() {
    let mut g = Grammar::new();
    let leaf = g.add("leaf", range('a', 'z'));
    let pair = g.add("pair", leaf >> ',' >> leaf);
    // `lone` builds a `Pair` from a single leaf, so construction fails
    // halfway through.
    let lone = g.add("lone", leaf >> ';');
    let start = g.add("start", pair | lone);
    g.bind::<Leaf>(leaf);
    g.bind::<Pair>(pair);
    g.bind::<Pair>(lone);

    let parser = Parser::new(&g);
    for i in 0..10_000 {
        let input = match i % 4 {
            0 => "a,b",
            1 => "a,",
            2 => "a;",
            _ => "x,y",
        };
        let _ = parser.parse(input, start);
    }

    assert!(CREATED.load(Ordering::SeqCst) > 0);
    assert_eq!(
        CREATED.load(Ordering::SeqCst),
        DROPPED.load(Ordering::SeqCst)
    );
}

#[test]
fn error_locality() {
    let mut g = Grammar::new();
    let ident = g.add("ident", range('a', 'z').many1());
    let call = g.rule("call");
    let arg = g.add("arg", call | ident | range('0', '9').many1());
    let args = g.add("args", -(arg >> (',' >> arg).many()));
    g.define(call, ident >> '(' >> args >> ')');

    let input = "foo(1,";
    let err = Parser::new(&g).recognize(input, call).unwrap_err();
    let best = err.errors().and_then(|errors| errors.best()).unwrap();
    assert!(best.span.begin.offset >= 5, "{best}");
    insta::assert_snapshot!(err, @"1:7: unexpected end of input");
}

#[test]
fn literal_alternatives_are_ordered() {
    let mut g = Grammar::new();
    let kw = g.add("kw", lit("if") | "ifend");
    let err = Parser::new(&g).recognize("ifend", kw).unwrap_err();
    insta::assert_snapshot!(err, @"1:3: syntax error");

    let mut g = Grammar::new();
    let kw = g.add("kw", lit("ifend") | "if");
    assert_eq!(Parser::new(&g).recognize("ifend", kw).unwrap().range(), 0..5);
}

#[derive(Debug, Default, AstNode)]
struct Split {
    span: Span,
    first: AstPtr<true, Num>,
    rest: AstList<false, Num>,
}

#[derive(Debug, Default, AstNode)]
struct Items {
    span: Span,
    items: AstList<true, Num>,
}

#[test]
fn list_takes_nodes_from_earlier_slots() {
    let mut g = Grammar::new();
    let num = g.add("num", range('0', '9').many1());
    let split = g.add("split", num >> (',' >> num).many());
    let items = g.add("items", num >> (',' >> num).many());
    g.bind::<Num>(num);
    g.bind::<Split>(split);
    g.bind::<Items>(items);
    let parser = Parser::new(&g);

    let err = parser.parse("1,2,3", split).unwrap_err();
    assert!(matches!(
        err,
        Error::Construct(ConstructError::Missing { node: "split", .. })
    ));

    let list = parser.parse_as::<Items>("1,2,3", items).unwrap();
    let texts: Vec<_> = list.items.iter().map(|n| n.span.text("1,2,3")).collect();
    assert_eq!(texts, ["1", "2", "3"]);
}
