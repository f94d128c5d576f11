use super::*;
use crate::animation::timeline::FlatTimeline;
use std::cell::RefCell;
use std::rc::Rc;

fn leaf(tree: &mut AnimateTree, duration: u64) -> NodeId {
    tree.leaf(FlatTimeline::floats(duration, 0.0, 1.0))
}

fn serial_pair(tree: &mut AnimateTree) -> (NodeId, NodeId) {
    let root = tree.root();
    let (a, b) = (leaf(tree, 100), leaf(tree, 100));
    tree.add_child(root, a).unwrap();
    tree.add_next(a, b).unwrap();
    tree.measure();
    (a, b)
}

#[test]
fn repeat_index_counts_cycles_from_one() {
    assert_eq!(repeat_index(0, 900, 300, 3), 1);
    assert_eq!(repeat_index(299, 900, 300, 3), 1);
    assert_eq!(repeat_index(300, 900, 300, 3), 2);
    assert_eq!(repeat_index(600, 900, 300, 3), 3);
    assert_eq!(repeat_index(900, 900, 300, 3), 3);
    assert_eq!(repeat_index(0, 0, 0, 4), 4);
}

#[test]
fn covered_times_are_active_including_the_end() {
    let mut tree = AnimateTree::new();
    let (_, b) = serial_pair(&mut tree);
    assert_eq!(tree.local_time(b, 100), LocalTime::Active(0));
    assert_eq!(tree.local_time(b, 150), LocalTime::Active(50));
    assert_eq!(tree.local_time(b, 200), LocalTime::Active(100));
    assert_eq!(tree.local_time(b, 50), LocalTime::Skip);
}

#[test]
fn passed_windows_snap_to_their_end_once() {
    let mut tree = AnimateTree::new();
    let (a, _) = serial_pair(&mut tree);
    assert_eq!(tree.local_time(a, 180), LocalTime::Snap(100));

    let root = tree.root();
    tree.dispatch_play_time(root, 180);
    assert_eq!(tree.animated_play_time(a).unwrap(), 100);
    assert_eq!(tree.local_time(a, 180), LocalTime::Skip);
}

#[test]
fn reversed_windows_measure_from_the_back() {
    let mut tree = AnimateTree::new();
    let (a, b) = serial_pair(&mut tree);
    for n in &mut tree.nodes {
        n.is_reverse = true;
    }
    assert_eq!(tree.running_duration(b, 0), 100);
    assert_eq!(tree.running_duration(a, 150), 50);
    assert_eq!(tree.local_time(a, 50), LocalTime::Snap(100));
}

#[test]
fn start_and_end_follow_the_running_edge() {
    let mut tree = AnimateTree::new();
    let (a, b) = serial_pair(&mut tree);
    let log = Rc::new(RefCell::new(Vec::new()));
    for node in [a, b] {
        let sink = log.clone();
        tree.on_event(node, move |n: NodeId, ev: AnimateEvent| {
            if matches!(ev, AnimateEvent::Start | AnimateEvent::End) {
                sink.borrow_mut().push((n, ev));
            }
        })
        .unwrap();
    }

    let root = tree.root();
    for p in [0, 50, 100, 150, 200] {
        tree.dispatch_play_time(root, p);
    }
    assert_eq!(
        *log.borrow(),
        vec![
            (a, AnimateEvent::Start),
            (a, AnimateEvent::End),
            (b, AnimateEvent::Start),
            (b, AnimateEvent::End),
        ]
    );
}

#[test]
fn repeating_containers_replay_their_children() {
    let mut tree = AnimateTree::new();
    let root = tree.root();
    let sub = tree.container();
    let x = leaf(&mut tree, 100);
    tree.add_child(root, sub).unwrap();
    tree.add_child(sub, x).unwrap();
    tree.set_repeat_count(sub, 3).unwrap();
    tree.measure();

    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    tree.on_event(x, move |_: NodeId, ev: AnimateEvent| sink.borrow_mut().push(ev))
        .unwrap();

    for p in [0, 50, 100, 150] {
        tree.dispatch_play_time(root, p);
    }
    assert_eq!(tree.animated_play_time(x).unwrap(), 50);
    assert_eq!(tree.current_repeat(sub).unwrap(), 2);

    let events = log.borrow();
    let starts = events.iter().filter(|e| **e == AnimateEvent::Start).count();
    let ends = events.iter().filter(|e| **e == AnimateEvent::End).count();
    assert_eq!((starts, ends), (2, 1));
    assert!(events.contains(&AnimateEvent::Update {
        value: Value::Float(1.0),
        play_time: 100,
    }));
}
