use super::View;
use crate::sample_rate::SampleRate;
use crate::strip_chart::{StripChart, CHART_WIDTH, STATS_WINDOW};
use crate::telemetry::Report;

use std::time::Duration;

/// Plots the instantaneous sample rate of every report, to see how evenly
/// the board paces its output.
#[derive(Debug, Clone)]
pub struct JitterScope {
    chart: StripChart,
    sample_rate: SampleRate,
}

impl Default for JitterScope {
    fn default() -> Self {
        Self::new()
    }
}

impl JitterScope {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self {
            chart: StripChart::new(1, CHART_WIDTH),
            sample_rate: SampleRate::new(),
        }
    }
}

impl View for JitterScope {
    fn title(&self, device: &str) -> String {
        format!("JitterScope (Quadrant: {})", device)
    }

    fn refresh_period(&self) -> Duration {
        Duration::from_millis(15)
    }

    fn ingest(&mut self, report: &Report) {
        let Some(ts) = report.ts else {
            return;
        };
        if let Some(rate) = self.sample_rate.update(ts) {
            self.chart.push(&[rate as f32]);
        }
    }

    fn chart(&self) -> &StripChart {
        &self.chart
    }

    fn chart_label(&self, i: usize) -> String {
        let stats = self.chart.stats(i, STATS_WINDOW);
        format!(
            "Sample Rate = {:.1} (mean={:.1}, std={:.1})",
            stats.current, stats.mean, stats.std
        )
    }

    fn default_y_range(&self) -> (f64, f64) {
        (0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plots_rate_between_reports() {
        let mut scope = JitterScope::new();
        for ts in [0, 20_000, 40_000, 65_000] {
            scope.ingest(&Report {
                ts: Some(ts),
                ..Default::default()
            });
        }
        // Only the reports with a predecessor make it onto the plot.
        assert_eq!(scope.chart().channel(0)[CHART_WIDTH - 4..], [0.0, 50.0, 50.0, 40.0]);
        assert_eq!(scope.chart_label(0), "Sample Rate = 40.0 (mean=2.8, std=11.1)");
    }

    #[test]
    fn reports_without_timestamp_are_skipped() {
        let mut scope = JitterScope::new();
        scope.ingest(&Report::default());
        assert!(scope.chart().channel(0).iter().all(|&v| v == 0.0));
        assert_eq!(scope.title("x"), "JitterScope (Quadrant: x)");
    }
}
