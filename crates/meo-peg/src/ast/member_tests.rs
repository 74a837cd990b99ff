use crate::ast::{
    AnyNode, AstList, AstMember, AstNode, AstPtr, AstSel, AstSelList, AstStack, ConstructError,
    Node, Selection,
};
use crate::{AstNode as Derive, Span};

#[derive(Debug, Default, Derive)]
struct A {
    span: Span,
}

#[derive(Debug, Default, Derive)]
struct B {
    span: Span,
}

#[derive(Debug, Default, Derive)]
struct C {
    span: Span,
}

fn a(offset: usize) -> A {
    let mut node = A::default();
    node.span.begin.offset = offset;
    node
}

fn stack_of(nodes: Vec<Node>) -> AstStack {
    let mut stack = AstStack::new();
    for node in nodes {
        stack.push(node);
    }
    stack.set_owner("owner");
    stack
}

fn offsets<'a>(nodes: impl Iterator<Item = &'a A>) -> Vec<usize> {
    nodes.map(|node| node.span.begin.offset).collect()
}

#[test]
fn selection_expected_text() {
    assert_eq!(<(A,)>::expected(), "`a`");
    assert_eq!(<(A, B, C)>::expected(), "`a` or `b` or `c`");
    assert_eq!(AnyNode::expected(), "any node");
    assert!(<(A, B)>::accepts(&B::default()));
    assert!(!<(A, B)>::accepts(&C::default()));
    assert!(AnyNode::accepts(&C::default()));
}

#[test]
fn optional_ptr_stays_empty() {
    let mut stack = stack_of(vec![Box::new(B::default())]);
    let mut slot = AstPtr::<false, A>::default();
    slot.construct(&mut stack).unwrap();
    assert!(slot.is_none());
    assert_eq!(stack.available(), 1);
}

#[test]
fn required_ptr_reports_owner() {
    let mut stack = stack_of(vec![Box::new(B::default())]);
    let mut slot = AstPtr::<true, A>::default();
    let err = slot.construct(&mut stack).unwrap_err();
    assert_eq!(
        err,
        ConstructError::Mismatch {
            node: "owner",
            expected: "`a`".to_string(),
            found: "b",
        }
    );
}

#[test]
fn ptr_accessors() {
    let mut slot = AstPtr::<false, A>::default();
    assert!(slot.get().is_none());
    assert!(slot.set(a(1)).is_none());
    assert_eq!(slot.node().span.begin.offset, 1);

    let old = slot.set(a(2)).unwrap();
    assert_eq!(old.span.begin.offset, 1);
    slot.get_mut().unwrap().span.begin.offset = 3;
    assert_eq!(slot.take().map(|n| n.span.begin.offset), Some(3));
    assert!(slot.is_none());
}

#[test]
#[should_panic(expected = "empty slot: expected `a`")]
fn empty_ptr_node_panics() {
    let slot = AstPtr::<true, A>::default();
    slot.node();
}

#[test]
fn sel_takes_any_listed_type() {
    let mut stack = stack_of(vec![Box::new(A::default()), Box::new(B::default())]);
    let mut slot = AstSel::<true, (A, B)>::default();
    slot.construct(&mut stack).unwrap();
    assert!(slot.is::<B>());
    assert!(slot.cast::<A>().is_none());
    assert_eq!(stack.available(), 1);
}

#[test]
fn required_sel_rejects_other_types() {
    let mut stack = stack_of(vec![Box::new(C::default())]);
    let mut slot = AstSel::<true, (A, B)>::default();
    let err = slot.construct(&mut stack).unwrap_err();
    insta::assert_snapshot!(err, @"`owner` expected `a` or `b`, found `c`");
}

#[test]
fn sel_set_checks_type() {
    let mut slot = AstSel::<false, (A, B)>::default();
    assert!(slot.set(Box::new(A::default())).is_none());
    let old = slot.set(Box::new(B::default())).unwrap();
    assert!(old.is::<A>());
    assert_eq!(slot.node().name(), "b");
}

#[test]
#[should_panic(expected = "slot accepts `a` or `b`, cannot hold `c`")]
fn sel_set_wrong_type_panics() {
    let mut slot = AstSel::<false, (A, B)>::default();
    slot.set(Box::new(C::default()));
}

#[test]
fn list_takes_run_of_matching_nodes() {
    let mut stack = stack_of(vec![
        Box::new(a(0)),
        Box::new(B::default()),
        Box::new(a(1)),
        Box::new(a(2)),
    ]);
    let mut list = AstList::<false, A>::default();
    list.construct(&mut stack).unwrap();

    assert_eq!(offsets(list.iter()), [1, 2]);
    assert_eq!(stack.available(), 2);
    assert_eq!(stack.peek().map(|n| n.name()), Some("b"));
}

#[test]
fn list_construct_prepends_to_existing() {
    let mut stack = stack_of(vec![Box::new(a(1)), Box::new(a(2))]);
    let mut list = AstList::<false, A>::default();
    list.push_back(a(3));
    list.construct(&mut stack).unwrap();
    assert_eq!(offsets(list.iter()), [1, 2, 3]);
}

#[test]
fn required_list_needs_one() {
    let mut stack = stack_of(Vec::new());
    let mut list = AstList::<true, A>::default();
    insta::assert_snapshot!(
        list.construct(&mut stack).unwrap_err(),
        @"`owner` expected `a`, found nothing"
    );

    let mut optional = AstList::<false, A>::default();
    optional.construct(&mut stack).unwrap();
    assert!(optional.is_empty());
}

#[test]
fn list_editing() {
    let mut list = AstList::<false, A>::default();
    list.push_back(a(2));
    list.push_front(a(1));
    list.push_back(a(3));
    assert_eq!(list.len(), 3);
    assert_eq!(list.first().map(|n| n.span.begin.offset), Some(1));
    assert_eq!(list.last().map(|n| n.span.begin.offset), Some(3));

    let old = list.swap(1, a(9));
    assert_eq!(old.span.begin.offset, 2);
    assert_eq!(offsets((&list).into_iter()), [1, 9, 3]);

    assert_eq!(list.pop_front().map(|n| n.span.begin.offset), Some(1));
    assert_eq!(list.pop_back().map(|n| n.span.begin.offset), Some(3));
    list.get_mut(0).unwrap().span.begin.offset = 4;
    assert_eq!(list.get(0).map(|n| n.span.begin.offset), Some(4));

    list.clear();
    assert!(list.pop_front().is_none());
}

#[test]
fn sel_list_collects_mixed_types() {
    let mut stack = stack_of(vec![
        Box::new(C::default()),
        Box::new(a(1)),
        Box::new(B::default()),
        Box::new(a(2)),
    ]);
    let mut list = AstSelList::<true, (A, B)>::default();
    list.construct(&mut stack).unwrap();

    let names: Vec<&str> = list.iter().map(|n| n.name()).collect();
    assert_eq!(names, ["a", "b", "a"]);
    assert_eq!(offsets(list.iter_as::<A>()), [1, 2]);
    assert_eq!(stack.available(), 1);
}

#[test]
fn sel_list_editing() {
    let mut list = AstSelList::<false, AnyNode>::default();
    list.push_back(Box::new(B::default()));
    list.push_front(Box::new(a(1)));
    assert_eq!(list.len(), 2);
    assert!(list.get(0).is_some_and(|n| n.is::<A>()));

    let old = list.swap(1, Box::new(C::default()));
    assert!(old.is::<B>());
    assert!(list.pop_back().is_some_and(|n| n.is::<C>()));
    assert!(list.pop_front().is_some_and(|n| n.is::<A>()));
    assert!(list.is_empty());
}

#[test]
fn members_visit_in_order() {
    let mut list = AstList::<false, A>::default();
    list.push_back(a(1));
    list.push_back(a(2));

    let mut seen = Vec::new();
    let stopped = list.visit(&mut |node: &(dyn AstNode + 'static)| {
        seen.push(node.span().begin.offset);
        true
    });
    assert!(stopped);
    assert_eq!(seen, [1]);
}

#[test]
fn stack_floor_hides_lower_nodes() {
    let mut stack = stack_of(vec![Box::new(A::default()), Box::new(B::default())]);
    stack.enter(2);
    assert_eq!(stack.available(), 0);
    assert!(stack.peek().is_none());
    assert!(stack.pop().is_none());

    stack.leave();
    assert_eq!(stack.available(), 2);
    assert!(stack.pop_as::<A>().is_none());
    assert!(stack.pop_as::<B>().is_some());
    assert_eq!(stack.len(), 1);
}
