//! Duration pass: derive container lengths and every node's front/back offsets.

use crate::animation::value::Keyframes;
use crate::composition::tree::AnimateTree;
use crate::foundation::ids::NodeId;

impl AnimateTree {
    /// Recompute derived durations if anything changed since the last pass.
    ///
    /// Lifecycle calls run this implicitly; call it directly to inspect durations before playing.
    pub fn measure(&mut self) {
        if self.needs_measure() {
            self.run_duration_pass();
        }
    }

    pub(crate) fn needs_measure(&self) -> bool {
        if self.dirty {
            return true;
        }
        let mut ids = Vec::with_capacity(self.nodes.len());
        self.collect_preorder(self.root, &mut ids);
        ids.into_iter().any(|id| {
            let n = self.at(id);
            n.source.play_span() != n.span
        })
    }

    #[tracing::instrument(skip(self))]
    fn run_duration_pass(&mut self) {
        let root = self.root;
        self.init_duration(root);
        self.at_mut(root).front_duration = 0;
        self.init_front_duration(root);

        let total = self.at(root).longest_duration;
        let mut ids = Vec::with_capacity(self.nodes.len());
        self.collect_preorder(root, &mut ids);
        for id in ids {
            let n = self.at_mut(id);
            n.back_duration = total.saturating_sub(n.front_duration.saturating_add(n.span));
        }
        self.dirty = false;
        tracing::debug!(longest = total, total = self.at(root).span, "durations measured");
    }

    // Post-order: children first, so a container sees final child spans.
    fn init_duration(&mut self, id: NodeId) {
        for k in 0..self.at(id).children.len() {
            let c = self.at(id).children[k];
            self.init_duration(c);
        }

        if !self.at(id).is_container() {
            let n = self.at_mut(id);
            n.span = n.source.play_span();
            n.longest_duration = n.span;
            return;
        }

        let mut longest = 0;
        for k in 0..self.at(id).children.len() {
            let c = self.at(id).children[k];
            if self.at(c).previous.is_none() {
                longest = longest.max(self.chain_duration(c));
            }
        }
        let n = self.at_mut(id);
        n.longest_duration = longest;
        n.source.set_duration(longest);
        n.source
            .set_keyframes(Keyframes::ints(&[0, i64::try_from(longest).unwrap_or(i64::MAX)]));
        n.span = n.source.play_span();
    }

    /// Span of `head` plus the longest run of successors hanging off it.
    fn chain_duration(&self, head: NodeId) -> u64 {
        let n = self.at(head);
        let tail = n
            .next
            .iter()
            .map(|&s| self.chain_duration(s))
            .max()
            .unwrap_or(0);
        n.span.saturating_add(tail)
    }

    // Pre-order: a container's own front is final before its children are placed.
    fn init_front_duration(&mut self, id: NodeId) {
        let front = self.at(id).front_duration;
        for k in 0..self.at(id).children.len() {
            let c = self.at(id).children[k];
            if self.at(c).previous.is_none() {
                self.place_chain(c, front);
            }
        }
        for k in 0..self.at(id).children.len() {
            let c = self.at(id).children[k];
            if self.at(c).is_container() {
                self.init_front_duration(c);
            }
        }
    }

    fn place_chain(&mut self, id: NodeId, front: u64) {
        let n = self.at_mut(id);
        n.front_duration = front;
        let end = front.saturating_add(n.span);
        for k in 0..self.at(id).next.len() {
            let s = self.at(id).next[k];
            self.place_chain(s, end);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/duration.rs"]
mod tests;
