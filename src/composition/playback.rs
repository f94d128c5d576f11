//! Lifecycle of a whole tree. Only the root clock is ever started or ticked; every other node
//! follows through dispatch.

use crate::animation::source::{PlayState, SourceEvent};
use crate::animation::value::Value;
use crate::composition::dispatch::repeat_index;
use crate::composition::listener::AnimateEvent;
use crate::composition::tree::AnimateTree;

impl AnimateTree {
    /// Play the tree from its current direction's beginning after `delay` milliseconds.
    #[tracing::instrument(skip(self))]
    pub fn start(&mut self, delay: u64) {
        self.measure();
        self.reset_run_state();
        let root = self.root;
        self.at_mut(root).source.start(delay);
        tracing::debug!(total = self.total_duration(), "tree started");
        self.pump();
    }

    /// Flip the play direction of every node.
    ///
    /// A playing tree continues from its mirrored position. A tree still inside its start delay
    /// keeps waiting and then plays from the new direction's beginning. An idle, ended or
    /// cancelled tree starts over from the far end.
    #[tracing::instrument(skip(self))]
    pub fn reverse(&mut self) {
        self.measure();
        let root = self.root;
        let was_started = self.at(root).source.is_started();
        let pending = self.at(root).source.is_delaying();
        let is_reverse = !self.at(root).is_reverse;

        let mut ids = Vec::new();
        self.collect_preorder(root, &mut ids);
        for &id in &ids {
            self.at_mut(id).is_reverse = is_reverse;
            self.emit(id, AnimateEvent::Reverse { is_reverse });
        }
        if !was_started || pending {
            self.reset_run_state();
        }
        self.last_root_time = None;

        self.at_mut(root).source.reverse();
        tracing::debug!(is_reverse, was_started, pending, "tree reversed");
        self.pump();
        if was_started && !pending {
            let t = self.at(root).source.current_time();
            self.root_update(t);
        }
    }

    /// Freeze a playing tree.
    pub fn pause(&mut self) {
        let root = self.root;
        self.at_mut(root).source.pause();
        self.pump();
    }

    /// Continue a paused tree.
    pub fn resume(&mut self) {
        let root = self.root;
        self.at_mut(root).source.resume();
        self.pump();
    }

    /// Stop a playing tree where it is. No node receives `End`.
    pub fn cancel(&mut self) {
        let root = self.root;
        self.at_mut(root).source.cancel();
        self.pump();
    }

    /// Jump to the end: every node gets its final value and the root fires `End`.
    #[tracing::instrument(skip(self))]
    pub fn end(&mut self) {
        self.measure();
        let root = self.root;
        if !self.at(root).source.is_started() {
            self.reset_run_state();
        }
        self.at_mut(root).source.end();
        self.pump();
    }

    /// Seek the whole tree to root time `t` (clamped to the total duration).
    pub fn set_current_play_time(&mut self, t: u64) {
        self.measure();
        let t = t.min(self.total_duration());
        let root = self.root;
        self.at_mut(root).source.set_current_time(t);
        self.last_root_time = None;
        self.root_update(t);
    }

    /// Advance the root clock by one host frame of `delta` milliseconds.
    pub fn advance(&mut self, delta: u64) {
        let root = self.root;
        self.at_mut(root).source.advance(delta);
        self.pump();
    }

    /// Whether the tree is paused.
    pub fn is_paused(&self) -> bool {
        self.state == PlayState::Paused
    }

    fn reset_run_state(&mut self) {
        for n in &mut self.nodes {
            n.reset_run_state();
        }
        self.last_root_time = None;
    }

    // Drain the root source until it stops producing events.
    fn pump(&mut self) {
        let root = self.root;
        loop {
            let mut events = std::mem::take(&mut self.scratch);
            self.at_mut(root).source.poll_events(&mut events);
            if events.is_empty() {
                self.scratch = events;
                return;
            }
            for event in events.drain(..) {
                self.handle_source_event(event);
            }
            self.scratch = events;
        }
    }

    fn handle_source_event(&mut self, event: SourceEvent) {
        let root = self.root;
        match event {
            SourceEvent::Started => {
                self.state = PlayState::Running;
                self.emit(root, AnimateEvent::Start);
                let t = self.at(root).source.current_time();
                self.root_update(t);
            }
            SourceEvent::Update(p) => self.root_update(p),
            SourceEvent::Ended => {
                let total = self.total_duration();
                self.root_update(total);
                self.state = PlayState::Ended;
                tracing::debug!("tree ended");
                self.emit(root, AnimateEvent::End);
            }
            SourceEvent::Paused => {
                self.state = PlayState::Paused;
                self.fan_out(AnimateEvent::Pause);
            }
            SourceEvent::Resumed => {
                self.state = PlayState::Running;
                self.fan_out(AnimateEvent::Resume);
            }
            SourceEvent::Cancelled => {
                self.state = PlayState::Cancelled;
                for n in &mut self.nodes {
                    n.is_running = false;
                    n.last_running = false;
                }
                tracing::debug!("tree cancelled");
                self.fan_out(AnimateEvent::Cancel);
            }
        }
    }

    fn fan_out(&mut self, event: AnimateEvent) {
        let mut ids = Vec::new();
        self.collect_preorder(self.root, &mut ids);
        for id in ids {
            self.emit(id, event);
        }
    }

    /// Apply root play time `p` (elapsed in the current direction) to the whole tree.
    pub(crate) fn root_update(&mut self, p: u64) {
        if self.last_root_time == Some(p) {
            return;
        }
        self.last_root_time = Some(p);

        let root = self.root;
        let cycle = self.cycle_length();
        let total = self.total_duration();

        let repeats = self.at(root).source.repeat_count().max(1);
        let index = if total == 0 {
            repeats
        } else {
            repeat_index(p, total, cycle, repeats)
        };
        if self.announce_repeats(root, index, repeats) {
            self.dispatch_play_time(root, cycle);
            self.reset_descendant_repeats(root);
        }

        let local = if self.at(root).is_reverse {
            total.saturating_sub(p)
        } else {
            p.min(total)
        };
        let progress = if total == 0 {
            0.0
        } else {
            local as f64 / total as f64
        };
        self.emit(
            root,
            AnimateEvent::Update {
                value: Value::Float(progress),
                play_time: local,
            },
        );

        let folded = if p >= total {
            cycle
        } else if cycle == 0 {
            0
        } else {
            p % cycle
        };
        tracing::trace!(p, folded, "dispatching root time");
        self.dispatch_play_time(root, folded);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/playback.rs"]
mod tests;
