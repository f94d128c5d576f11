//! Arena-backed composition tree: construction and structural edits.
//!
//! Nodes live in one `Vec` and refer to each other by [`NodeId`]. The root is a container created
//! with the tree and can never be attached anywhere else. Nodes created through the tree start
//! detached; only nodes reachable from the root take part in duration passes and dispatch.

use crate::animation::property::Property;
use crate::animation::source::{PlayState, SourceEvent, TimeSource};
use crate::animation::timeline::FlatTimeline;
use crate::animation::value::Value;
use crate::composition::listener::{AnimateEvent, AnimateListener, EventFn, PropertyBinding};
use crate::composition::node::{AnimateNode, NodeKind};
use crate::foundation::error::{AnimateError, AnimateResult};
use crate::foundation::ids::{ListenerId, NodeId};

/// A tree of animation nodes played by a single root clock.
#[derive(Debug)]
pub struct AnimateTree {
    pub(crate) nodes: Vec<AnimateNode>,
    pub(crate) root: NodeId,
    pub(crate) dirty: bool,
    pub(crate) state: PlayState,
    pub(crate) scratch: Vec<SourceEvent>,
    pub(crate) last_root_time: Option<u64>,
    next_listener: u64,
}

impl Default for AnimateTree {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimateTree {
    /// Empty tree whose root is driven by a [`FlatTimeline`].
    pub fn new() -> Self {
        Self::with_root_source(FlatTimeline::driver())
    }

    /// Empty tree whose root is driven by a host-provided source.
    ///
    /// The root's duration and keyframes are overwritten by every duration pass.
    pub fn with_root_source(source: impl TimeSource + 'static) -> Self {
        let root = AnimateNode::new(NodeKind::Container, Box::new(source));
        Self {
            nodes: vec![root],
            root: NodeId(0),
            dirty: true,
            state: PlayState::Idle,
            scratch: Vec::new(),
            last_root_time: None,
            next_listener: 0,
        }
    }

    /// The root container.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a detached leaf driven by `source`.
    pub fn leaf(&mut self, source: impl TimeSource + 'static) -> NodeId {
        self.push(NodeKind::Leaf, Box::new(source))
    }

    /// Create a detached leaf that occupies `duration` milliseconds and animates nothing.
    pub fn delay(&mut self, duration: u64) -> NodeId {
        self.leaf(FlatTimeline::delay(duration))
    }

    /// Create a detached container driven by a [`FlatTimeline`].
    pub fn container(&mut self) -> NodeId {
        self.container_with(FlatTimeline::driver())
    }

    /// Create a detached container driven by a host-provided source.
    pub fn container_with(&mut self, source: impl TimeSource + 'static) -> NodeId {
        self.push(NodeKind::Container, Box::new(source))
    }

    fn push(&mut self, kind: NodeKind, source: Box<dyn TimeSource>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(AnimateNode::new(kind, source));
        id
    }

    pub(crate) fn node(&self, id: NodeId) -> AnimateResult<&AnimateNode> {
        self.nodes
            .get(id.index())
            .ok_or(AnimateError::UnknownNode(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> AnimateResult<&mut AnimateNode> {
        self.nodes
            .get_mut(id.index())
            .ok_or(AnimateError::UnknownNode(id))
    }

    // Callers must have validated `id` already.
    pub(crate) fn at(&self, id: NodeId) -> &AnimateNode {
        &self.nodes[id.index()]
    }

    pub(crate) fn at_mut(&mut self, id: NodeId) -> &mut AnimateNode {
        &mut self.nodes[id.index()]
    }

    /// Make `node` a child of `parent`. Adding an existing child again is a no-op.
    ///
    /// Fails when `parent` is a leaf, when `node` is the root, already belongs to another
    /// parent, or is an ancestor of `parent`.
    pub fn add_child(&mut self, parent: NodeId, node: NodeId) -> AnimateResult<()> {
        let p = self.node(parent)?;
        let n = self.node(node)?;
        if p.kind != NodeKind::Container {
            return Err(AnimateError::misuse(format!(
                "{parent:?} is a leaf and cannot hold children"
            )));
        }
        if node == self.root {
            return Err(AnimateError::misuse("the root cannot be attached"));
        }
        match n.parent {
            Some(existing) if existing == parent => return Ok(()),
            Some(existing) => {
                return Err(AnimateError::misuse(format!(
                    "{node:?} already belongs to {existing:?}"
                )));
            }
            None => {}
        }
        if self.is_ancestor_or_self(node, parent) {
            return Err(AnimateError::misuse(format!(
                "attaching {node:?} under {parent:?} would create a cycle"
            )));
        }

        self.at_mut(parent).children.push(node);
        self.at_mut(node).parent = Some(parent);
        self.dirty = true;
        Ok(())
    }

    /// Detach `node` from `parent`, splicing its successors onto its predecessor.
    ///
    /// Returns false (and changes nothing) when `node` is not a child of `parent`. The removed
    /// node keeps its own children but loses every sibling relation.
    pub fn remove_child(&mut self, parent: NodeId, node: NodeId) -> AnimateResult<bool> {
        self.node(node)?;
        let Some(pos) = self.node(parent)?.children.iter().position(|c| *c == node) else {
            return Ok(false);
        };
        self.at_mut(parent).children.remove(pos);

        let successors = std::mem::take(&mut self.at_mut(node).next);
        let previous = self.at_mut(node).previous.take();
        if let Some(prev) = previous {
            self.at_mut(prev).next.retain(|n| *n != node);
        }
        for s in successors {
            self.at_mut(s).previous = previous;
            if let Some(prev) = previous {
                self.at_mut(prev).next.push(s);
            }
        }
        self.at_mut(node).parent = None;
        self.dirty = true;
        Ok(true)
    }

    /// Detach `node` from whatever parent it has. Returns false if it was not attached.
    pub fn detach(&mut self, node: NodeId) -> AnimateResult<bool> {
        let parent = self.node(node)?.parent;
        match parent {
            Some(parent) => self.remove_child(parent, node),
            None => Ok(false),
        }
    }

    /// Run `node` after `prev` finishes, as a sibling under `prev`'s parent.
    ///
    /// A node may have several successors; they all start together when it ends.
    pub fn add_next(&mut self, prev: NodeId, node: NodeId) -> AnimateResult<()> {
        let p = self.node(prev)?;
        let Some(parent) = p.parent else {
            return Err(AnimateError::misuse(format!(
                "{prev:?} is not attached and cannot have successors"
            )));
        };
        let previous = self.node(node)?.previous;
        match previous {
            Some(existing) if existing == prev => return Ok(()),
            Some(existing) => {
                return Err(AnimateError::misuse(format!(
                    "{node:?} already follows {existing:?}"
                )));
            }
            None => {}
        }
        if self.is_chain_predecessor(node, prev) {
            return Err(AnimateError::misuse(format!(
                "{node:?} already runs before {prev:?}"
            )));
        }

        self.add_child(parent, node)?;
        self.at_mut(prev).next.push(node);
        self.at_mut(node).previous = Some(prev);
        self.dirty = true;
        Ok(())
    }

    /// Run `node` in parallel with `sibling`: same parent, same predecessor.
    pub fn add_with(&mut self, sibling: NodeId, node: NodeId) -> AnimateResult<()> {
        let s = self.node(sibling)?;
        let Some(parent) = s.parent else {
            return Err(AnimateError::misuse(format!(
                "{sibling:?} is not attached and cannot have parallel siblings"
            )));
        };
        let previous = s.previous;
        match previous {
            Some(prev) => self.add_next(prev, node),
            None => self.add_child(parent, node),
        }
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut cursor = Some(of);
        while let Some(id) = cursor {
            if id == candidate {
                return true;
            }
            cursor = self.at(id).parent;
        }
        false
    }

    fn is_chain_predecessor(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut cursor = Some(of);
        while let Some(id) = cursor {
            if id == candidate {
                return true;
            }
            cursor = self.at(id).previous;
        }
        false
    }

    /// Set the cycle duration of a leaf. Container durations are always derived.
    pub fn set_duration(&mut self, node: NodeId, duration: u64) -> AnimateResult<()> {
        let n = self.node_mut(node)?;
        if n.is_container() {
            return Err(AnimateError::misuse(format!(
                "{node:?} is a container; its duration is derived from its children"
            )));
        }
        n.source.set_duration(duration);
        self.dirty = true;
        Ok(())
    }

    /// Set how many times a node plays its cycle (1-based). Works for containers, the root
    /// included.
    pub fn set_repeat_count(&mut self, node: NodeId, count: u32) -> AnimateResult<()> {
        if count == 0 {
            return Err(AnimateError::validation(
                "repeat count is 1-based and must be at least 1",
            ));
        }
        self.node_mut(node)?.source.set_repeat_count(count);
        self.dirty = true;
        Ok(())
    }

    /// Read access to a node's time source.
    pub fn source(&self, node: NodeId) -> AnimateResult<&dyn TimeSource> {
        Ok(self.node(node)?.source.as_ref())
    }

    /// Mutable access to a leaf's time source, for keyframe or easing changes.
    ///
    /// Duration edits made here are picked up by the next duration pass.
    pub fn source_mut(&mut self, node: NodeId) -> AnimateResult<&mut dyn TimeSource> {
        let n = self.node_mut(node)?;
        if n.is_container() {
            return Err(AnimateError::misuse(format!(
                "{node:?} is a container; its source is managed by the tree"
            )));
        }
        Ok(n.source.as_mut())
    }

    /// Leaf or container.
    pub fn kind(&self, node: NodeId) -> AnimateResult<NodeKind> {
        Ok(self.node(node)?.kind)
    }

    /// The node's container, if attached.
    pub fn parent(&self, node: NodeId) -> AnimateResult<Option<NodeId>> {
        Ok(self.node(node)?.parent)
    }

    /// Children in insertion order.
    pub fn children(&self, node: NodeId) -> AnimateResult<&[NodeId]> {
        Ok(self.node(node)?.children.as_slice())
    }

    /// Serial predecessor, if any.
    pub fn previous(&self, node: NodeId) -> AnimateResult<Option<NodeId>> {
        Ok(self.node(node)?.previous)
    }

    /// Serial successors in insertion order.
    pub fn next(&self, node: NodeId) -> AnimateResult<&[NodeId]> {
        Ok(self.node(node)?.next.as_slice())
    }

    /// Whether the node is reachable from the root.
    pub fn is_attached(&self, node: NodeId) -> AnimateResult<bool> {
        self.node(node)?;
        Ok(self.is_ancestor_or_self(self.root, node))
    }

    /// Pre-order walk where each serial chain is listed head first, matching dispatch order.
    pub(crate) fn collect_preorder(&self, from: NodeId, out: &mut Vec<NodeId>) {
        out.push(from);
        for &c in &self.at(from).children {
            if self.at(c).previous.is_none() {
                self.collect_chain(c, out);
            }
        }
    }

    fn collect_chain(&self, head: NodeId, out: &mut Vec<NodeId>) {
        self.collect_preorder(head, out);
        for &s in &self.at(head).next {
            self.collect_chain(s, out);
        }
    }

    /// Register a listener on `node`.
    pub fn add_listener(
        &mut self,
        node: NodeId,
        listener: impl AnimateListener + 'static,
    ) -> AnimateResult<ListenerId> {
        self.node(node)?;
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.at_mut(node).listeners.add(id, Box::new(listener));
        Ok(id)
    }

    /// Register a closure receiving every event of `node`.
    pub fn on_event<F>(&mut self, node: NodeId, f: F) -> AnimateResult<ListenerId>
    where
        F: FnMut(NodeId, AnimateEvent) + 'static,
    {
        self.add_listener(node, EventFn(f))
    }

    /// Write every value `node` produces into `property`.
    pub fn bind(
        &mut self,
        node: NodeId,
        property: impl Property + 'static,
    ) -> AnimateResult<ListenerId> {
        self.add_listener(node, PropertyBinding(property))
    }

    /// Remove a listener. Returns false if it was not registered on `node`.
    pub fn remove_listener(&mut self, node: NodeId, listener: ListenerId) -> AnimateResult<bool> {
        Ok(self.node_mut(node)?.listeners.remove(listener))
    }

    /// Number of listeners registered on `node`.
    pub fn listener_count(&self, node: NodeId) -> AnimateResult<usize> {
        Ok(self.node(node)?.listeners.len())
    }

    pub(crate) fn emit(&mut self, node: NodeId, event: AnimateEvent) {
        self.at_mut(node).listeners.emit(node, event);
    }

    /// Current value of the node's source.
    pub fn animated_value(&self, node: NodeId) -> AnimateResult<Value> {
        Ok(self.node(node)?.source.animated_value())
    }

    /// Local play time last applied to the node.
    pub fn animated_play_time(&self, node: NodeId) -> AnimateResult<u64> {
        Ok(self.node(node)?.source.current_time())
    }

    /// Last repeat index announced for the node (0 before its first cycle).
    pub fn current_repeat(&self, node: NodeId) -> AnimateResult<u32> {
        Ok(self.node(node)?.remembered_repeat)
    }

    /// Whether the node is inside its active window. For the root: whether the tree plays.
    pub fn is_running(&self, node: NodeId) -> AnimateResult<bool> {
        let n = self.node(node)?;
        if node == self.root {
            return Ok(self.state == PlayState::Running);
        }
        Ok(n.is_running)
    }

    /// Whether the node currently plays reversed.
    pub fn is_reverse(&self, node: NodeId) -> AnimateResult<bool> {
        Ok(self.node(node)?.is_reverse)
    }

    /// Longest serial chain inside a container (one cycle), or a leaf's own span. Valid after
    /// [`AnimateTree::measure`] or any lifecycle call.
    pub fn longest_duration(&self, node: NodeId) -> AnimateResult<u64> {
        Ok(self.node(node)?.longest_duration)
    }

    /// Root-time offset at which the node starts when playing forward.
    pub fn front_duration(&self, node: NodeId) -> AnimateResult<u64> {
        Ok(self.node(node)?.front_duration)
    }

    /// Root-time offset at which the node starts when playing reversed.
    pub fn back_duration(&self, node: NodeId) -> AnimateResult<u64> {
        Ok(self.node(node)?.back_duration)
    }

    /// Length of the node on its parent's timeline, repeats included.
    pub fn span(&self, node: NodeId) -> AnimateResult<u64> {
        Ok(self.node(node)?.span)
    }

    /// Whole-tree play length: root cycle times root repeat count.
    pub fn total_duration(&self) -> u64 {
        self.at(self.root).span
    }

    /// Coarse tree state.
    pub fn state(&self) -> PlayState {
        self.state
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/tree.rs"]
mod tests;
