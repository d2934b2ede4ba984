//! Sample rate estimation and update throttling from board timestamps.
//!
//! Board timestamps are in microseconds.

const MICROS_PER_SEC: f64 = 1e6;

/// Tracks the last two timestamps seen and derives an instantaneous rate.
#[derive(Debug, Clone, Default)]
pub struct SampleRate {
    tlast: Option<i64>,
    tnow: Option<i64>,
}

impl SampleRate {
    /// A tracker that has not seen any timestamp yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `ts` and return the rate in Hz, if it can be computed. It
    /// cannot for the very first timestamp, or when time did not move
    /// forward (a board reset, or a duplicated line).
    pub fn update(&mut self, ts: i64) -> Option<f64> {
        self.tlast = self.tnow;
        self.tnow = Some(ts);
        self.rate()
    }

    /// The rate between the last two timestamps.
    pub fn rate(&self) -> Option<f64> {
        let (tlast, tnow) = (self.tlast?, self.tnow?);
        match tnow.checked_sub(tlast) {
            Some(delta) if delta > 0 => Some(MICROS_PER_SEC / delta as f64),
            _ => None,
        }
    }
}

/// Lets through at most one update per `interval` microseconds of board time.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: i64,
    tlast: i64,
}

impl Throttle {
    /// `interval` is in microseconds. The clock starts at zero, so a board
    /// that has only just booted is held back for one interval.
    pub fn new(interval: i64) -> Self {
        Self { interval, tlast: 0 }
    }

    /// True if more than `interval` has passed since the last accepted
    /// timestamp, in which case `ts` becomes the new reference.
    pub fn ready(&mut self, ts: i64) -> bool {
        if ts.saturating_sub(self.tlast) > self.interval {
            self.tlast = ts;
            true
        } else {
            false
        }
    }
}
