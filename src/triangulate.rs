//! The headless loop behind the `triangulate` binary: drain both boards,
//! pair their reports, reduce, print.

use crate::dual_stream::DualStream;
use crate::engine_event::{write_frame, Side};
use crate::event_reducer::EventReducer;
use crate::report_source::ReportSource;

use log::{debug, warn};
use std::io::{self, Write};

/// Owns the pairing and reduction state between polls.
#[derive(Debug)]
pub struct Triangulator {
    stream: DualStream,
    reducer: EventReducer,
}

impl Triangulator {
    #[allow(missing_docs)]
    pub fn new(reducer: EventReducer) -> Self {
        Self {
            stream: DualStream::new(),
            reducer,
        }
    }

    /// Take in whatever both boards sent since the last poll and, if that
    /// completes a frame, write its events to `out`. Returns whether a frame
    /// was written. Frames with missing fields are logged and skipped.
    pub fn poll<L, R, W>(&mut self, left: &mut L, right: &mut R, out: &mut W) -> io::Result<bool>
    where
        L: ReportSource,
        R: ReportSource,
        W: Write,
    {
        for report in left.by_ref() {
            self.stream.push(Side::Left, report);
        }
        for report in right.by_ref() {
            self.stream.push(Side::Right, report);
        }

        let Some(frame) = self.stream.take_frame() else {
            return Ok(false);
        };
        match self.reducer.reduce(&frame) {
            Ok(events) => {
                debug!("frame with {} events", events.len());
                write_frame(out, &events)?;
                Ok(true)
            }
            Err(e) => {
                warn!("skipping frame: {}", e);
                Ok(false)
            }
        }
    }

    /// The reducer, e.g. to look at the current key.
    pub fn reducer(&self) -> &EventReducer {
        &self.reducer
    }
}
