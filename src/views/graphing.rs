use super::View;
use crate::strip_chart::{StripChart, CHART_WIDTH};
use crate::telemetry::{Report, ReportError, N_LIDAR};

use log::warn;
use std::time::Duration;

/// The plain four-channel distance plot, without throttling or
/// statistics. Reads either channel naming.
#[derive(Debug, Clone)]
pub struct Graphing {
    chart: StripChart,
}

impl Default for Graphing {
    fn default() -> Self {
        Self::new()
    }
}

impl Graphing {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self {
            chart: StripChart::new(N_LIDAR, CHART_WIDTH),
        }
    }
}

impl View for Graphing {
    fn title(&self, _device: &str) -> String {
        "Quadrant Data Visualizer".to_string()
    }

    fn refresh_period(&self) -> Duration {
        Duration::from_millis(50)
    }

    fn ingest(&mut self, report: &Report) {
        let column: Result<Vec<f32>, ReportError> = (0..N_LIDAR)
            .map(|i| report.require_dist(i).map(|d| d as f32))
            .collect();
        match column {
            Ok(column) => self.chart.push(&column),
            Err(e) => warn!("dropped report: {}", e),
        }
    }

    fn chart(&self) -> &StripChart {
        &self.chart
    }

    fn chart_label(&self, i: usize) -> String {
        format!("Channel {}", i)
    }

    fn default_y_range(&self) -> (f64, f64) {
        (0.0, 400.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_reports_are_plotted() {
        let mut graph = Graphing::new();
        let report: Report = r#"{"lidar0":{"distance":11,"engaged":true},"lidar1":{"distance":22,"engaged":true},"lidar2":{"distance":33,"engaged":false},"lidar3":{"distance":44,"engaged":false}}"#
            .parse()
            .unwrap();
        graph.ingest(&report);
        graph.ingest(&report);
        assert_eq!(graph.chart().channel(2)[CHART_WIDTH - 2..], [33.0, 33.0]);
        assert_eq!(graph.chart_label(3), "Channel 3");
    }

    #[test]
    fn incomplete_reports_are_dropped() {
        let mut graph = Graphing::new();
        let report: Report = r#"{"l0":{"dist":11,"en":true}}"#.parse().unwrap();
        graph.ingest(&report);
        assert!(graph.chart().channel(0).iter().all(|&v| v == 0.0));
    }
}
