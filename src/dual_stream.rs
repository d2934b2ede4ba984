//! Pairs up the reports of the left and right boards.
//!
//! The two boards report independently and at slightly different rates.
//! [DualStream] keeps the newest report from each side and hands out a
//! [Frame] whenever something new arrived and both sides have spoken at
//! least once. Continuous values come from the newest report; events are
//! collected from every report since the previous frame so none are lost
//! when one board outpaces the loop.

use crate::engine_event::Side;
use crate::telemetry::{BoardEvent, Report};

/// A left/right pair of reports, plus the events that arrived with them.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    #[allow(missing_docs)]
    pub left: Report,
    #[allow(missing_docs)]
    pub right: Report,
    /// Events from every left report since the last frame, oldest first.
    pub left_events: Vec<BoardEvent>,
    /// Events from every right report since the last frame, oldest first.
    pub right_events: Vec<BoardEvent>,
}

impl Frame {
    /// The report of one side.
    pub fn report(&self, side: Side) -> &Report {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// The events of one side.
    pub fn events(&self, side: Side) -> &[BoardEvent] {
        match side {
            Side::Left => &self.left_events,
            Side::Right => &self.right_events,
        }
    }
}

#[derive(Debug, Default)]
struct Latest {
    report: Option<Report>,
    events: Vec<BoardEvent>,
}

impl Latest {
    fn push(&mut self, report: Report) {
        self.events.extend(report.board_events());
        self.report = Some(report);
    }
}

/// See the [module documentation](self).
#[derive(Debug, Default)]
pub struct DualStream {
    left: Latest,
    right: Latest,
    fresh: bool,
}

impl DualStream {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a report from one board.
    pub fn push(&mut self, side: Side, report: Report) {
        match side {
            Side::Left => self.left.push(report),
            Side::Right => self.right.push(report),
        }
        self.fresh = true;
    }

    /// The next frame, if both boards have reported and at least one of them
    /// reported since the last frame.
    pub fn take_frame(&mut self) -> Option<Frame> {
        if !self.fresh {
            return None;
        }
        let left = self.left.report.clone()?;
        let right = self.right.report.clone()?;
        self.fresh = false;
        Some(Frame {
            left,
            right,
            left_events: std::mem::take(&mut self.left.events),
            right_events: std::mem::take(&mut self.right.events),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_events(ts: i64, events: &[&str]) -> Report {
        Report {
            ts: Some(ts),
            events: events.iter().map(|e| e.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn waits_for_both_sides() {
        let mut ds = DualStream::new();
        assert!(ds.take_frame().is_none());
        ds.push(Side::Left, with_events(1, &["hit0"]));
        assert!(ds.take_frame().is_none());
        ds.push(Side::Right, with_events(2, &[]));
        let frame = ds.take_frame().unwrap();
        assert_eq!(frame.left.ts, Some(1));
        assert_eq!(frame.report(Side::Right).ts, Some(2));
        // The left hit was held until the right board showed up.
        assert_eq!(frame.events(Side::Left), &[BoardEvent::Hit(0)]);
    }

    #[test]
    fn one_frame_per_update() {
        let mut ds = DualStream::new();
        ds.push(Side::Left, with_events(1, &[]));
        ds.push(Side::Right, with_events(2, &[]));
        assert!(ds.take_frame().is_some());
        assert!(ds.take_frame().is_none());
        ds.push(Side::Right, with_events(3, &["swl"]));
        let frame = ds.take_frame().unwrap();
        assert_eq!(frame.left.ts, Some(1));
        assert_eq!(frame.right.ts, Some(3));
        assert!(frame.left_events.is_empty());
        assert_eq!(frame.right_events, vec![BoardEvent::SwipeLeft]);
    }

    #[test]
    fn events_accumulate_between_frames() {
        let mut ds = DualStream::new();
        ds.push(Side::Right, with_events(0, &[]));
        ds.push(Side::Left, with_events(1, &["hit1"]));
        ds.push(Side::Left, with_events(2, &["bogus", "hit3"]));
        ds.push(Side::Left, with_events(3, &["swr"]));
        let frame = ds.take_frame().unwrap();
        assert_eq!(frame.left.ts, Some(3));
        assert_eq!(
            frame.left_events,
            vec![
                BoardEvent::Hit(1),
                BoardEvent::Hit(3),
                BoardEvent::SwipeRight
            ]
        );
    }
}
