use crate::animation::ease::Ease;
use crate::animation::source::{PlayState, SourceEvent, TimeSource};
use crate::animation::value::{Keyframes, Value, ValueKind};
use crate::foundation::error::{AnimateError, AnimateResult};

/// Serializable configuration of a [`FlatTimeline`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TimelineOpts {
    /// Length of one cycle in milliseconds.
    pub duration_ms: u64,
    /// Number of cycles, 1-based.
    pub repeat_count: u32,
    /// Easing applied within each cycle.
    pub ease: Ease,
    /// Keyframe values, evenly spaced over the cycle.
    pub values: Vec<f64>,
    /// How `values` are interpolated.
    pub kind: ValueKind,
}

impl Default for TimelineOpts {
    fn default() -> Self {
        Self {
            duration_ms: 300,
            repeat_count: 1,
            ease: Ease::Linear,
            values: vec![0.0, 1.0],
            kind: ValueKind::Float,
        }
    }
}

impl TimelineOpts {
    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> AnimateResult<Self> {
        let opts: Self = serde_json::from_str(json)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Check the options describe a playable timeline.
    pub fn validate(&self) -> AnimateResult<()> {
        if self.repeat_count == 0 {
            return Err(AnimateError::validation(
                "repeat_count is 1-based and must be at least 1",
            ));
        }
        self.keyframes().validate()
    }

    fn keyframes(&self) -> Keyframes {
        Keyframes {
            values: self.values.clone(),
            kind: self.kind,
        }
    }
}

/// Reference [`TimeSource`]: a single value animator advanced by host frame deltas.
///
/// Play time counts elapsed milliseconds in the current direction, so after a reverse the
/// clock runs from zero again while the value runs backwards.
#[derive(Clone, Debug)]
pub struct FlatTimeline {
    duration: u64,
    repeat_count: u32,
    ease: Ease,
    keyframes: Keyframes,
    start_delay: u64,
    delay_left: u64,
    play_time: u64,
    state: PlayState,
    reversed: bool,
    events: Vec<SourceEvent>,
}

impl FlatTimeline {
    /// A linear timeline of `duration` milliseconds over `keyframes`.
    pub fn new(duration: u64, keyframes: Keyframes) -> Self {
        Self {
            duration,
            repeat_count: 1,
            ease: Ease::Linear,
            keyframes,
            start_delay: 0,
            delay_left: 0,
            play_time: 0,
            state: PlayState::Idle,
            reversed: false,
            events: Vec::new(),
        }
    }

    /// Float timeline from `from` to `to`.
    pub fn floats(duration: u64, from: f64, to: f64) -> Self {
        Self::new(duration, Keyframes::floats(vec![from, to]))
    }

    /// Build from validated options.
    pub fn from_opts(opts: &TimelineOpts) -> AnimateResult<Self> {
        opts.validate()?;
        Ok(Self::new(opts.duration_ms, opts.keyframes())
            .with_ease(opts.ease)
            .with_repeat_count(opts.repeat_count))
    }

    /// Occupies `duration` milliseconds and animates nothing.
    pub fn delay(duration: u64) -> Self {
        Self::new(duration, Keyframes::floats(vec![0.0, 0.0]))
    }

    /// Timeline used by container nodes; its duration and keyframes are derived later.
    pub fn driver() -> Self {
        Self::new(0, Keyframes::ints(&[0, 0]))
    }

    /// Set the easing.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Set the repeat count (values below 1 are treated as 1).
    pub fn with_repeat_count(mut self, count: u32) -> Self {
        self.repeat_count = count.max(1);
        self
    }

    /// Current coarse state.
    pub fn state(&self) -> PlayState {
        self.state
    }

    /// Whether playback currently runs backwards.
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    fn cycle_fraction(&self) -> f64 {
        let span = self.play_span();
        if self.duration == 0 || (span > 0 && self.play_time >= span) {
            return 1.0;
        }
        (self.play_time % self.duration) as f64 / self.duration as f64
    }
}

impl TimeSource for FlatTimeline {
    fn start(&mut self, delay: u64) {
        self.play_time = 0;
        self.start_delay = delay;
        self.delay_left = delay;
        self.state = PlayState::Running;
        if delay == 0 {
            self.events.push(SourceEvent::Started);
            if self.play_span() == 0 {
                self.state = PlayState::Ended;
                self.events.push(SourceEvent::Ended);
            }
        }
    }

    fn reverse(&mut self) {
        self.reversed = !self.reversed;
        if !self.is_started() {
            self.start(0);
        } else if self.delay_left == 0 {
            // A source still in its delay has nothing to mirror.
            let span = self.play_span();
            self.play_time = span - self.play_time.min(span);
        }
    }

    fn pause(&mut self) {
        if self.state == PlayState::Running {
            self.state = PlayState::Paused;
            self.events.push(SourceEvent::Paused);
        }
    }

    fn resume(&mut self) {
        if self.state == PlayState::Paused {
            self.state = PlayState::Running;
            self.events.push(SourceEvent::Resumed);
        }
    }

    fn cancel(&mut self) {
        if self.is_started() {
            self.state = PlayState::Cancelled;
            self.delay_left = 0;
            self.events.push(SourceEvent::Cancelled);
        }
    }

    fn end(&mut self) {
        if !self.is_started() {
            self.events.push(SourceEvent::Started);
        }
        self.delay_left = 0;
        self.play_time = self.play_span();
        self.state = PlayState::Ended;
        self.events.push(SourceEvent::Ended);
    }

    fn advance(&mut self, delta: u64) {
        if self.state != PlayState::Running {
            return;
        }
        let mut delta = delta;
        if self.delay_left > 0 {
            if delta < self.delay_left {
                self.delay_left -= delta;
                return;
            }
            delta -= self.delay_left;
            self.delay_left = 0;
            self.events.push(SourceEvent::Started);
        }
        let span = self.play_span();
        self.play_time = self.play_time.saturating_add(delta);
        if self.play_time >= span {
            self.play_time = span;
            self.events.push(SourceEvent::Update(span));
            self.state = PlayState::Ended;
            self.events.push(SourceEvent::Ended);
        } else {
            self.events.push(SourceEvent::Update(self.play_time));
        }
    }

    fn set_current_time(&mut self, t: u64) {
        self.play_time = t.min(self.play_span());
    }

    fn current_time(&self) -> u64 {
        self.play_time
    }

    fn duration(&self) -> u64 {
        self.duration
    }

    fn set_duration(&mut self, duration: u64) {
        self.duration = duration;
        self.play_time = self.play_time.min(self.play_span());
    }

    fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    fn set_repeat_count(&mut self, count: u32) {
        self.repeat_count = count.max(1);
    }

    fn start_delay(&self) -> u64 {
        self.start_delay
    }

    fn set_keyframes(&mut self, keyframes: Keyframes) {
        self.keyframes = keyframes;
    }

    fn animated_value(&self) -> Value {
        let mut fraction = self.cycle_fraction();
        if self.reversed {
            fraction = 1.0 - fraction;
        }
        self.keyframes.sample(self.ease.apply(fraction))
    }

    fn is_started(&self) -> bool {
        matches!(self.state, PlayState::Running | PlayState::Paused)
    }

    fn is_running(&self) -> bool {
        self.state == PlayState::Running && self.delay_left == 0
    }

    fn is_paused(&self) -> bool {
        self.state == PlayState::Paused
    }

    fn is_delaying(&self) -> bool {
        self.is_started() && self.delay_left > 0
    }

    fn poll_events(&mut self, out: &mut Vec<SourceEvent>) {
        out.append(&mut self.events);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
