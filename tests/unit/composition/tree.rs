use super::*;

fn tl(duration: u64) -> FlatTimeline {
    FlatTimeline::floats(duration, 0.0, 1.0)
}

#[test]
fn new_tree_is_a_bare_root() {
    let mut tree = AnimateTree::new();
    let root = tree.root();
    assert!(tree.children(root).unwrap().is_empty());
    assert!(tree.is_attached(root).unwrap());
    tree.leaf(tl(100));
    assert!(tree.children(root).unwrap().is_empty());
}

#[test]
fn preorder_lists_a_predecessor_before_its_successors() {
    let mut tree = AnimateTree::new();
    let root = tree.root();
    let (a, b, c) = (tree.leaf(tl(10)), tree.leaf(tl(10)), tree.leaf(tl(10)));
    tree.add_child(root, c).unwrap();
    tree.add_child(root, b).unwrap();
    tree.add_child(root, a).unwrap();
    tree.add_next(a, b).unwrap();
    tree.add_next(b, c).unwrap();

    let mut ids = Vec::new();
    tree.collect_preorder(root, &mut ids);
    assert_eq!(ids, vec![root, a, b, c]);
}

#[test]
fn add_child_is_idempotent() {
    let mut tree = AnimateTree::new();
    let root = tree.root();
    let a = tree.leaf(tl(100));
    tree.add_child(root, a).unwrap();
    tree.add_child(root, a).unwrap();
    assert_eq!(tree.children(root).unwrap(), &[a]);
    assert_eq!(tree.parent(a).unwrap(), Some(root));
    assert!(tree.is_attached(a).unwrap());
}

#[test]
fn a_node_has_at_most_one_parent() {
    let mut tree = AnimateTree::new();
    let root = tree.root();
    let (c1, c2) = (tree.container(), tree.container());
    let a = tree.leaf(tl(100));
    tree.add_child(root, c1).unwrap();
    tree.add_child(root, c2).unwrap();
    tree.add_child(c1, a).unwrap();

    let err = tree.add_child(c2, a).unwrap_err();
    assert!(err.is_misuse());
    assert_eq!(tree.children(c2).unwrap().len(), 0);
}

#[test]
fn root_and_cycles_are_rejected() {
    let mut tree = AnimateTree::new();
    let root = tree.root();
    let (x, y) = (tree.container(), tree.container());
    tree.add_child(x, y).unwrap();

    assert!(tree.add_child(y, x).unwrap_err().is_misuse());
    assert!(tree.add_child(x, x).unwrap_err().is_misuse());
    assert!(tree.add_child(y, root).unwrap_err().is_misuse());
}

#[test]
fn leaves_cannot_hold_children() {
    let mut tree = AnimateTree::new();
    let (a, b) = (tree.leaf(tl(100)), tree.leaf(tl(100)));
    assert!(matches!(
        tree.add_child(a, b),
        Err(AnimateError::Misuse(_))
    ));
}

#[test]
fn unknown_ids_are_reported() {
    let mut tree = AnimateTree::new();
    let root = tree.root();
    assert!(matches!(
        tree.add_child(root, NodeId(99)),
        Err(AnimateError::UnknownNode(NodeId(99)))
    ));
    assert!(tree.animated_value(NodeId(7)).is_err());
}

#[test]
fn remove_child_splices_successors_onto_predecessor() {
    let mut tree = AnimateTree::new();
    let root = tree.root();
    let (a, b, c) = (tree.leaf(tl(100)), tree.leaf(tl(100)), tree.leaf(tl(100)));
    tree.add_child(root, a).unwrap();
    tree.add_next(a, b).unwrap();
    tree.add_next(b, c).unwrap();

    assert!(tree.remove_child(root, b).unwrap());
    assert_eq!(tree.next(a).unwrap(), &[c]);
    assert_eq!(tree.previous(c).unwrap(), Some(a));
    assert_eq!(tree.children(root).unwrap(), &[a, c]);
    assert_eq!(tree.parent(b).unwrap(), None);
    assert_eq!(tree.previous(b).unwrap(), None);
    assert!(tree.next(b).unwrap().is_empty());
}

#[test]
fn removing_a_chain_head_promotes_its_successors() {
    let mut tree = AnimateTree::new();
    let root = tree.root();
    let (a, b) = (tree.leaf(tl(100)), tree.leaf(tl(100)));
    tree.add_child(root, a).unwrap();
    tree.add_next(a, b).unwrap();

    assert!(tree.detach(a).unwrap());
    assert_eq!(tree.previous(b).unwrap(), None);
    assert_eq!(tree.children(root).unwrap(), &[b]);
    assert!(!tree.detach(a).unwrap());
}

#[test]
fn removing_a_non_child_changes_nothing() {
    let mut tree = AnimateTree::new();
    let root = tree.root();
    let a = tree.leaf(tl(100));
    assert!(!tree.remove_child(root, a).unwrap());
}

#[test]
fn add_next_requires_an_attached_predecessor() {
    let mut tree = AnimateTree::new();
    let (a, b) = (tree.leaf(tl(100)), tree.leaf(tl(100)));
    assert!(tree.add_next(a, b).unwrap_err().is_misuse());
}

#[test]
fn add_next_rejects_chain_loops() {
    let mut tree = AnimateTree::new();
    let root = tree.root();
    let (a, b) = (tree.leaf(tl(100)), tree.leaf(tl(100)));
    tree.add_child(root, a).unwrap();
    tree.add_next(a, b).unwrap();
    assert!(tree.add_next(b, a).unwrap_err().is_misuse());
    // Same link again is fine.
    tree.add_next(a, b).unwrap();
    assert_eq!(tree.next(a).unwrap(), &[b]);
}

#[test]
fn add_with_shares_the_predecessor() {
    let mut tree = AnimateTree::new();
    let root = tree.root();
    let (a, b, c, d) = (
        tree.leaf(tl(100)),
        tree.leaf(tl(100)),
        tree.leaf(tl(100)),
        tree.leaf(tl(100)),
    );
    tree.add_child(root, a).unwrap();
    tree.add_next(a, b).unwrap();
    tree.add_with(b, c).unwrap();
    tree.add_with(a, d).unwrap();

    assert_eq!(tree.previous(c).unwrap(), Some(a));
    assert_eq!(tree.next(a).unwrap(), &[b, c]);
    assert_eq!(tree.previous(d).unwrap(), None);
    assert_eq!(tree.parent(d).unwrap(), Some(root));
}

#[test]
fn container_durations_are_derived_only() {
    let mut tree = AnimateTree::new();
    let c = tree.container();
    let a = tree.leaf(tl(100));
    assert!(tree.set_duration(c, 10).unwrap_err().is_misuse());
    assert!(tree.source_mut(c).is_err());
    assert_eq!(tree.kind(c).unwrap(), NodeKind::Container);

    tree.set_duration(a, 500).unwrap();
    assert_eq!(tree.source(a).unwrap().duration(), 500);
    assert_eq!(tree.kind(a).unwrap(), NodeKind::Leaf);
}

#[test]
fn zero_repeat_count_is_rejected() {
    let mut tree = AnimateTree::new();
    let a = tree.leaf(tl(100));
    assert!(matches!(
        tree.set_repeat_count(a, 0),
        Err(AnimateError::Validation(_))
    ));
    tree.set_repeat_count(a, 4).unwrap();
    assert_eq!(tree.source(a).unwrap().repeat_count(), 4);
}

#[test]
fn listeners_register_and_remove() {
    let mut tree = AnimateTree::new();
    let a = tree.leaf(tl(100));
    let id = tree.on_event(a, |_: NodeId, _: AnimateEvent| {}).unwrap();
    assert_eq!(tree.listener_count(a).unwrap(), 1);
    assert!(tree.remove_listener(a, id).unwrap());
    assert!(!tree.remove_listener(a, id).unwrap());
    assert_eq!(tree.listener_count(a).unwrap(), 0);
}
