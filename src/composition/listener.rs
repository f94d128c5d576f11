//! Per-node lifecycle callbacks.
//!
//! Every node owns its own listener set. Events fire synchronously while the tree is dispatching,
//! in traversal order: parent before children, a serial predecessor before its successor.

use crate::animation::property::Property;
use crate::animation::value::Value;
use crate::foundation::ids::{ListenerId, NodeId};

/// One lifecycle notification for a node.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnimateEvent {
    /// The node entered its active window.
    Start,
    /// The node left its active window (or, for the root, the tree finished).
    End,
    /// The tree was cancelled.
    Cancel,
    /// The tree was paused.
    Pause,
    /// The tree was resumed.
    Resume,
    /// The play direction flipped.
    Reverse {
        /// Direction after the flip.
        is_reverse: bool,
    },
    /// A new value was applied.
    Update {
        /// Leaf: interpolated keyframe value. Container: progress in `[0, 1]`.
        value: Value,
        /// Node-local play time that produced `value`.
        play_time: u64,
    },
    /// The node entered a new repeat cycle.
    Repeat {
        /// 1-based cycle index.
        count: u32,
        /// Total cycles configured.
        total: u32,
    },
}

/// Typed callbacks for node lifecycle events. Every method defaults to doing nothing.
pub trait AnimateListener {
    /// See [`AnimateEvent::Start`].
    fn on_start(&mut self, _node: NodeId) {}
    /// See [`AnimateEvent::End`].
    fn on_end(&mut self, _node: NodeId) {}
    /// See [`AnimateEvent::Cancel`].
    fn on_cancel(&mut self, _node: NodeId) {}
    /// See [`AnimateEvent::Pause`].
    fn on_pause(&mut self, _node: NodeId) {}
    /// See [`AnimateEvent::Resume`].
    fn on_resume(&mut self, _node: NodeId) {}
    /// See [`AnimateEvent::Reverse`].
    fn on_reverse(&mut self, _node: NodeId, _is_reverse: bool) {}
    /// See [`AnimateEvent::Update`].
    fn on_update(&mut self, _node: NodeId, _value: Value, _play_time: u64) {}
    /// See [`AnimateEvent::Repeat`].
    fn on_repeat(&mut self, _node: NodeId, _count: u32, _total: u32) {}
}

/// Adapter turning a closure over [`AnimateEvent`] into an [`AnimateListener`].
pub struct EventFn<F>(pub F);

impl<F> std::fmt::Debug for EventFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EventFn")
    }
}

impl<F> AnimateListener for EventFn<F>
where
    F: FnMut(NodeId, AnimateEvent),
{
    fn on_start(&mut self, node: NodeId) {
        (self.0)(node, AnimateEvent::Start)
    }

    fn on_end(&mut self, node: NodeId) {
        (self.0)(node, AnimateEvent::End)
    }

    fn on_cancel(&mut self, node: NodeId) {
        (self.0)(node, AnimateEvent::Cancel)
    }

    fn on_pause(&mut self, node: NodeId) {
        (self.0)(node, AnimateEvent::Pause)
    }

    fn on_resume(&mut self, node: NodeId) {
        (self.0)(node, AnimateEvent::Resume)
    }

    fn on_reverse(&mut self, node: NodeId, is_reverse: bool) {
        (self.0)(node, AnimateEvent::Reverse { is_reverse })
    }

    fn on_update(&mut self, node: NodeId, value: Value, play_time: u64) {
        (self.0)(node, AnimateEvent::Update { value, play_time })
    }

    fn on_repeat(&mut self, node: NodeId, count: u32, total: u32) {
        (self.0)(node, AnimateEvent::Repeat { count, total })
    }
}

/// Pushes every update value into a [`Property`].
pub(crate) struct PropertyBinding<P>(pub(crate) P);

impl<P: Property> AnimateListener for PropertyBinding<P> {
    fn on_update(&mut self, _node: NodeId, value: Value, _play_time: u64) {
        self.0.set(value);
    }
}

#[derive(Default)]
pub(crate) struct ListenerSet {
    entries: Vec<(ListenerId, Box<dyn AnimateListener>)>,
}

impl std::fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(id, _)| id))
            .finish()
    }
}

impl ListenerSet {
    pub(crate) fn add(&mut self, id: ListenerId, listener: Box<dyn AnimateListener>) {
        self.entries.push((id, listener));
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn emit(&mut self, node: NodeId, event: AnimateEvent) {
        for (_, l) in &mut self.entries {
            match event {
                AnimateEvent::Start => l.on_start(node),
                AnimateEvent::End => l.on_end(node),
                AnimateEvent::Cancel => l.on_cancel(node),
                AnimateEvent::Pause => l.on_pause(node),
                AnimateEvent::Resume => l.on_resume(node),
                AnimateEvent::Reverse { is_reverse } => l.on_reverse(node, is_reverse),
                AnimateEvent::Update { value, play_time } => l.on_update(node, value, play_time),
                AnimateEvent::Repeat { count, total } => l.on_repeat(node, count, total),
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/listener.rs"]
mod tests;
