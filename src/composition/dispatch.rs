//! Time dispatch: map one root play time onto every node of the tree.
//!
//! Each node is visited pre-order, with a serial chain visited head first. A node whose window
//! covers the time gets its local time applied; a node outside its window is snapped to whichever
//! end the time has passed, so coarse ticks never leave a value stuck mid-way. Start/End fire on
//! running-state edges only.

use crate::animation::value::Value;
use crate::composition::listener::AnimateEvent;
use crate::composition::tree::AnimateTree;
use crate::foundation::core::clamp_local;
use crate::foundation::ids::NodeId;

/// What a root play time means for one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LocalTime {
    /// Inside the window: apply this local time.
    Active(u64),
    /// Outside the window and the source is not at the passed end yet: move it there.
    Snap(u64),
    /// Nothing to do.
    Skip,
}

impl AnimateTree {
    /// Root cycle length; reversed local times are measured back from it.
    pub(crate) fn cycle_length(&self) -> u64 {
        self.at(self.root).longest_duration
    }

    /// Forward-equivalent local time of `id` for root time `p`, clamped to its span.
    pub(crate) fn running_duration(&self, id: NodeId, p: u64) -> u64 {
        let n = self.at(id);
        let local = if n.is_reverse {
            self.cycle_length() as i64 - p as i64 - n.front_duration as i64
        } else {
            p as i64 - n.front_duration as i64
        };
        clamp_local(local, n.span)
    }

    pub(crate) fn local_time(&self, id: NodeId, p: u64) -> LocalTime {
        let n = self.at(id);
        let window = n.window();
        if window.covers(p) {
            return LocalTime::Active(self.running_duration(id, p));
        }
        let current = n.source.current_time();
        if current > n.span {
            return LocalTime::Skip;
        }
        // Forward, a time before the window means "not yet started"; reversed it means the
        // node has not been rewound yet.
        let target = match (n.is_reverse, window.is_before(p)) {
            (false, true) | (true, false) => 0,
            (false, false) | (true, true) => n.span,
        };
        if target == current {
            LocalTime::Skip
        } else {
            LocalTime::Snap(target)
        }
    }

    pub(crate) fn dispatch_play_time(&mut self, id: NodeId, p: u64) {
        let is_root = id == self.root;
        if !is_root {
            let running = self.at(id).window().contains(p);
            let n = self.at_mut(id);
            n.is_running = running;
            if running && !n.last_running {
                self.emit(id, AnimateEvent::Start);
            }

            if self.at(id).span == 0 {
                self.pass_zero_length(id, p);
            } else {
                if self.retry_repeat(id, p) && self.at(id).is_container() {
                    let end = self.cycle_end_time(id);
                    self.dispatch_children(id, end);
                    self.reset_descendant_repeats(id);
                }

                match self.local_time(id, p) {
                    LocalTime::Active(t) => self.apply_local_time(id, t),
                    LocalTime::Snap(t) => {
                        tracing::trace!(node = id.0, p, snap = t, "compensating skipped window");
                        self.apply_local_time(id, t);
                    }
                    LocalTime::Skip => {}
                }
            }
        }

        let child_p = self.child_play_time(id, p);
        self.dispatch_children(id, child_p);

        if !is_root {
            let n = self.at_mut(id);
            let ended = n.last_running && !n.is_running;
            n.last_running = n.is_running;
            if ended {
                self.emit(id, AnimateEvent::End);
            }
        }
    }

    /// Visit the children of `id` chain by chain, so a predecessor is always dispatched before
    /// its successors whatever order the children were attached in.
    pub(crate) fn dispatch_children(&mut self, id: NodeId, p: u64) {
        for k in 0..self.at(id).children.len() {
            let c = self.at(id).children[k];
            if self.at(c).previous.is_none() {
                self.dispatch_chain(c, p);
            }
        }
    }

    fn dispatch_chain(&mut self, head: NodeId, p: u64) {
        self.dispatch_play_time(head, p);
        for k in 0..self.at(head).next.len() {
            let s = self.at(head).next[k];
            self.dispatch_chain(s, p);
        }
    }

    /// A zero-length node has a single instant for a window, which coarse ticks usually step
    /// over. It fires all of its repeats and its final value once the time reaches that instant.
    fn pass_zero_length(&mut self, id: NodeId, p: u64) {
        let n = self.at(id);
        let total = n.source.repeat_count().max(1);
        if p < n.window().start || n.remembered_repeat >= total {
            return;
        }
        self.announce_repeats(id, total, total);
        self.apply_local_time(id, 0);
    }

    fn apply_local_time(&mut self, id: NodeId, t: u64) {
        let n = self.at_mut(id);
        n.source.set_current_time(t);
        let value = if n.is_container() {
            Value::Float(if n.span == 0 {
                0.0
            } else {
                t as f64 / n.span as f64
            })
        } else {
            n.source.animated_value()
        };
        self.emit(
            id,
            AnimateEvent::Update {
                value,
                play_time: t,
            },
        );
    }

    /// Announce any repeat cycles `id` entered at root time `p`. Returns true when a cycle after
    /// the first was entered.
    fn retry_repeat(&mut self, id: NodeId, p: u64) -> bool {
        let n = self.at(id);
        if !n.window().covers(p) {
            return false;
        }
        let total = n.source.repeat_count().max(1);
        let local = self.running_duration(id, p);
        let elapsed = if n.is_reverse { n.span - local } else { local };
        let index = repeat_index(elapsed, n.span, n.source.duration(), total);
        self.announce_repeats(id, index, total)
    }

    /// Fire `Repeat` for every index between the remembered one and `index`.
    pub(crate) fn announce_repeats(&mut self, id: NodeId, index: u32, total: u32) -> bool {
        let mut wrapped = false;
        while self.at(id).remembered_repeat < index {
            let n = self.at_mut(id);
            n.remembered_repeat += 1;
            let count = n.remembered_repeat;
            wrapped |= count > 1;
            self.emit(id, AnimateEvent::Repeat { count, total });
        }
        wrapped
    }

    pub(crate) fn reset_descendant_repeats(&mut self, id: NodeId) {
        let mut ids = Vec::new();
        self.collect_preorder(id, &mut ids);
        for d in ids.into_iter().skip(1) {
            self.at_mut(d).remembered_repeat = 0;
        }
    }

    /// Time handed to the children of `id`. Repeating containers replay their first cycle.
    fn child_play_time(&self, id: NodeId, p: u64) -> u64 {
        let n = self.at(id);
        if id == self.root || !n.is_container() {
            return p;
        }
        let cycle = n.longest_duration;
        if n.source.repeat_count() <= 1 || cycle == 0 || !n.window().covers(p) {
            return p;
        }
        let local = self.running_duration(id, p);
        let folded = if local >= n.span { cycle } else { local % cycle };
        self.child_time_for(id, folded)
    }

    /// Child time at which a repeating container's cycle just finished.
    fn cycle_end_time(&self, id: NodeId) -> u64 {
        let n = self.at(id);
        let end = if n.is_reverse { 0 } else { n.longest_duration };
        self.child_time_for(id, end)
    }

    fn child_time_for(&self, id: NodeId, cycle_local: u64) -> u64 {
        let n = self.at(id);
        if n.is_reverse {
            self.cycle_length()
                .saturating_sub(n.front_duration.saturating_add(cycle_local))
        } else {
            n.front_duration.saturating_add(cycle_local)
        }
    }
}

/// 1-based repeat index for `elapsed` milliseconds into a `span` made of `cycle`-long repeats.
///
/// The window's final millisecond still belongs to the last cycle.
pub(crate) fn repeat_index(elapsed: u64, span: u64, cycle: u64, total: u32) -> u32 {
    if cycle == 0 {
        return total;
    }
    let index = if elapsed < span {
        elapsed / cycle + 1
    } else {
        elapsed / cycle
    };
    u32::try_from(index).unwrap_or(u32::MAX).clamp(1, total)
}

#[cfg(test)]
#[path = "../../tests/unit/composition/dispatch.rs"]
mod tests;
