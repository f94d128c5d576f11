/// Span of global play time during which a node is active.
///
/// Both bounds are in milliseconds from the start of the root timeline (or from its end when the
/// tree plays reversed).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeWindow {
    /// First millisecond of the window.
    pub start: u64,
    /// Length of the window.
    pub len: u64,
}

impl TimeWindow {
    /// Create a window starting at `start` lasting `len` milliseconds.
    pub fn new(start: u64, len: u64) -> Self {
        Self { start, len }
    }

    /// Exclusive end of the window.
    pub fn end(self) -> u64 {
        self.start.saturating_add(self.len)
    }

    /// Half-open membership: `start <= t < end`. Used for the running state.
    pub fn contains(self, t: u64) -> bool {
        self.start <= t && t < self.end()
    }

    /// Closed membership: `start <= t <= end`. Used to decide whether a tick applies a value,
    /// so the final value of a window is still committed on the tick that lands on its end.
    pub fn covers(self, t: u64) -> bool {
        self.start <= t && t <= self.end()
    }

    /// Whether `t` lies at or before the start of the window.
    pub fn is_before(self, t: u64) -> bool {
        t <= self.start
    }

    /// Whether `t` lies at or past the end of the window.
    pub fn is_after(self, t: u64) -> bool {
        t >= self.end()
    }
}

/// Clamp a signed local time into `[0, len]`.
///
/// Ticks rarely land exactly on window bounds; a few milliseconds of overshoot either way are
/// expected and folded back here.
pub fn clamp_local(local: i64, len: u64) -> u64 {
    if local <= 0 {
        return 0;
    }
    (local as u64).min(len)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
