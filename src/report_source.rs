//! The source of reports every consumer reads from.

use crate::telemetry::Report;
use std::collections::VecDeque;

/// `ReportSource`
///
/// A clearable iterator that emits the [`Report`]s a board has sent since the
/// last time it was drained. Iterating never blocks: once the reports that
/// already arrived are consumed, `next()` returns `None` until more come in.
pub trait ReportSource: Iterator<Item = Report> {
    /// Drop every report that has not been consumed yet.
    fn clear(&mut self);

    /// Whether the source can still produce reports.
    fn is_connected(&self) -> bool {
        true
    }

    /// Release whatever is feeding the source.
    fn stop(&mut self) {}
}

/// Reports a source keeps when nobody drains it. A paused monitor stops
/// draining, so past this the oldest reports go first.
pub const MAX_QUEUED: usize = 4096;

/// Queue `report` behind the others, dropping the oldest one if the queue is
/// full. Returns whether a report was dropped.
pub(crate) fn push_capped(queue: &mut VecDeque<Report>, report: Report) -> bool {
    let full = queue.len() >= MAX_QUEUED;
    if full {
        queue.pop_front();
    }
    queue.push_back(report);
    full
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ts: i64) -> Report {
        Report {
            ts: Some(ts),
            ..Default::default()
        }
    }

    #[test]
    fn full_queue_drops_the_oldest() {
        let mut queue = VecDeque::new();
        for ts in 0..MAX_QUEUED as i64 {
            assert!(!push_capped(&mut queue, at(ts)));
        }
        assert!(push_capped(&mut queue, at(-1)));
        assert!(push_capped(&mut queue, at(-2)));

        assert_eq!(queue.len(), MAX_QUEUED);
        assert_eq!(queue.front().unwrap().ts, Some(2));
        assert_eq!(queue.back().unwrap().ts, Some(-2));
    }
}
