use super::*;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn emit_routes_to_typed_callbacks() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    let mut set = ListenerSet::default();
    set.add(
        ListenerId(1),
        Box::new(EventFn(move |node: NodeId, ev: AnimateEvent| sink.borrow_mut().push((node, ev)))),
    );

    set.emit(NodeId(3), AnimateEvent::Start);
    set.emit(NodeId(3), AnimateEvent::Repeat { count: 2, total: 3 });

    assert_eq!(
        *log.borrow(),
        vec![
            (NodeId(3), AnimateEvent::Start),
            (NodeId(3), AnimateEvent::Repeat { count: 2, total: 3 }),
        ]
    );
}

#[test]
fn removed_listeners_stop_receiving() {
    let count = Rc::new(RefCell::new(0));
    let c = count.clone();
    let mut set = ListenerSet::default();
    set.add(ListenerId(9), Box::new(EventFn(move |_: NodeId, _: AnimateEvent| *c.borrow_mut() += 1)));
    set.emit(NodeId(0), AnimateEvent::Pause);
    assert!(set.remove(ListenerId(9)));
    assert!(!set.remove(ListenerId(9)));
    set.emit(NodeId(0), AnimateEvent::Pause);
    assert_eq!(*count.borrow(), 1);
    assert_eq!(set.len(), 0);
}

#[test]
fn events_serialize_with_a_type_tag() {
    let json = serde_json::to_string(&AnimateEvent::Reverse { is_reverse: true }).unwrap();
    assert_eq!(json, r#"{"type":"reverse","is_reverse":true}"#);
}
