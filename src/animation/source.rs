use crate::animation::value::{Keyframes, Value};

/// Native lifecycle notifications produced by a [`TimeSource`].
///
/// Sources queue these as they happen; the owner drains them with
/// [`TimeSource::poll_events`] after every imperative call or tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SourceEvent {
    /// Playback began (after any start delay elapsed).
    Started,
    /// Current play time after a tick, in milliseconds of elapsed play in the current direction.
    Update(u64),
    /// Playback was paused.
    Paused,
    /// Playback was resumed.
    Resumed,
    /// Playback was cancelled. No `Ended` follows.
    Cancelled,
    /// Playback reached its end, or was forced there with [`TimeSource::end`].
    Ended,
}

/// Coarse playback state shared by sources and trees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PlayState {
    /// Never started.
    #[default]
    Idle,
    /// Started and advancing (possibly still inside its start delay).
    Running,
    /// Started and frozen until resumed.
    Paused,
    /// Reached the end.
    Ended,
    /// Cancelled before reaching the end.
    Cancelled,
}

/// A flat, single-track timeline: the host primitive every tree node is driven by.
///
/// A source knows its cycle duration, repeat count, easing and keyframes, and can map a play
/// time onto a value. It knows nothing about other sources; hierarchical composition happens in
/// [`AnimateTree`](crate::AnimateTree), which only ever ticks the root source and sets the
/// current time of all the others.
///
/// Repeat counts are 1-based: a count of `n` plays the cycle `n` times.
pub trait TimeSource {
    /// Start from the beginning after `delay` milliseconds.
    fn start(&mut self, delay: u64);
    /// Flip playback direction. An idle or finished source starts playing in the new direction.
    fn reverse(&mut self);
    /// Freeze a started source.
    fn pause(&mut self);
    /// Unfreeze a paused source.
    fn resume(&mut self);
    /// Stop a started source without reaching the end.
    fn cancel(&mut self);
    /// Jump to the end.
    fn end(&mut self);
    /// Advance the source clock by one host frame of `delta` milliseconds.
    fn advance(&mut self, delta: u64);

    /// Seek to `t` milliseconds of play. Does not queue an update event.
    fn set_current_time(&mut self, t: u64);
    /// Milliseconds of play elapsed in the current direction.
    fn current_time(&self) -> u64;

    /// Length of one cycle.
    fn duration(&self) -> u64;
    /// Set the length of one cycle.
    fn set_duration(&mut self, duration: u64);
    /// Number of cycles played (at least 1).
    fn repeat_count(&self) -> u32;
    /// Set the number of cycles.
    fn set_repeat_count(&mut self, count: u32);
    /// Delay passed to the last [`TimeSource::start`].
    fn start_delay(&self) -> u64;

    /// Play length excluding the start delay: `duration * repeat_count`.
    fn play_span(&self) -> u64 {
        self.duration()
            .saturating_mul(u64::from(self.repeat_count().max(1)))
    }

    /// Full length including the start delay.
    fn total_duration(&self) -> u64 {
        self.start_delay().saturating_add(self.play_span())
    }

    /// Replace the keyframe values.
    fn set_keyframes(&mut self, keyframes: Keyframes);
    /// Value at the current time.
    fn animated_value(&self) -> Value;

    /// Started and not yet ended or cancelled (paused counts as started).
    fn is_started(&self) -> bool;
    /// Started, past its delay, and not paused.
    fn is_running(&self) -> bool;
    /// Paused.
    fn is_paused(&self) -> bool;
    /// Started but still waiting out its start delay (paused or not).
    fn is_delaying(&self) -> bool;

    /// Move all queued events into `out`, oldest first.
    fn poll_events(&mut self, out: &mut Vec<SourceEvent>);
}
