//! State behind each of the live views. Each view consumes [`Report`]s and
//! exposes what should be drawn; the drawing itself lives in [`crate::gui`].

mod dashboard;
mod graphing;
mod jitter_scope;

pub use dashboard::Dashboard;
pub use graphing::Graphing;
pub use jitter_scope::JitterScope;

use crate::channel_readout::ChannelReadout;
use crate::strip_chart::StripChart;
use crate::telemetry::Report;
use std::time::Duration;

/// A live view over a single board.
pub trait View {
    /// Window title, given the name of the device being read.
    fn title(&self, device: &str) -> String;

    /// How often the view polls its source while running.
    fn refresh_period(&self) -> Duration;

    /// Take in one report.
    fn ingest(&mut self, report: &Report);

    /// The scrolling plots.
    fn chart(&self) -> &StripChart;

    /// Caption for plot `i`.
    fn chart_label(&self, i: usize) -> String;

    /// Y range every plot starts with, and goes back to on a zoom reset.
    fn default_y_range(&self) -> (f64, f64);

    /// Parameter readouts shown next to the plots.
    fn readouts(&self) -> &[ChannelReadout] {
        &[]
    }

    /// Sample rate panel text, for views that have one.
    fn sample_rate_label(&self) -> Option<&str> {
        None
    }
}
