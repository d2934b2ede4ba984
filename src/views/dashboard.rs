use super::View;
use crate::channel_readout::ChannelReadout;
use crate::sample_rate::{SampleRate, Throttle};
use crate::strip_chart::{StripChart, CHART_WIDTH, STATS_WINDOW};
use crate::telemetry::{Parameter, Report, N_LIDAR};

use log::warn;
use std::time::Duration;

/// Plotted in place of a distance the board did not send.
pub const MISSING_DIST: f32 = 8190.0;

/// Minimum board time between two plotted samples, in microseconds.
const PLOT_INTERVAL_US: i64 = 30_000;

/// Four LIDAR strip charts, one readout per parameter and the sample rate.
#[derive(Debug, Clone)]
pub struct Dashboard {
    chart: StripChart,
    throttle: Throttle,
    sample_rate: SampleRate,
    rate_label: String,
    readouts: Vec<ChannelReadout>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self {
            chart: StripChart::new(N_LIDAR, CHART_WIDTH),
            throttle: Throttle::new(PLOT_INTERVAL_US),
            sample_rate: SampleRate::new(),
            rate_label: "[sample rate]".to_string(),
            readouts: Parameter::ALL.into_iter().map(ChannelReadout::new).collect(),
        }
    }
}

impl View for Dashboard {
    fn title(&self, device: &str) -> String {
        format!("Quadrant Data Visualizer ({})", device)
    }

    fn refresh_period(&self) -> Duration {
        Duration::from_millis(15)
    }

    fn ingest(&mut self, report: &Report) {
        let Some(ts) = report.ts else {
            warn!("keyerror: ts");
            return;
        };

        if let Some(rate) = self.sample_rate.update(ts) {
            self.rate_label = format!("Sample Rate:\n{:.1} Hz", rate);
        }

        // The plots cannot keep up with the full report rate.
        if !self.throttle.ready(ts) {
            return;
        }

        let column: Vec<f32> = (0..N_LIDAR)
            .map(|i| match report.require_dist(i) {
                Ok(dist) => dist as f32,
                Err(e) => {
                    warn!("{}", e);
                    MISSING_DIST
                }
            })
            .collect();
        self.chart.push(&column);

        for readout in self.readouts.iter_mut() {
            match report.parameter(readout.parameter()) {
                Some(channel) => readout.update(channel),
                None => warn!("keyerror: {}", readout.parameter().field()),
            }
        }
    }

    fn chart(&self) -> &StripChart {
        &self.chart
    }

    fn chart_label(&self, i: usize) -> String {
        let stats = self.chart.stats(i, STATS_WINDOW);
        format!(
            "Channel {} = {:.1} (mean={:.1}, std={:.1})",
            i, stats.current, stats.mean, stats.std
        )
    }

    fn default_y_range(&self) -> (f64, f64) {
        (0.0, 400.0)
    }

    fn readouts(&self) -> &[ChannelReadout] {
        &self.readouts
    }

    fn sample_rate_label(&self) -> Option<&str> {
        Some(&self.rate_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(s: &str) -> Report {
        s.parse().unwrap()
    }

    #[test]
    fn throttles_plot_updates() {
        let mut dash = Dashboard::new();
        let line = |ts: i64, d: i64| {
            report(&format!(
                r#"{{"ts":{ts},"l0":{{"dist":{d},"en":true}},"l1":{{"dist":1,"en":true}},"l2":{{"dist":2,"en":true}},"l3":{{"dist":3,"en":true}}}}"#
            ))
        };
        dash.ingest(&line(10_000, 100));
        assert_eq!(dash.chart().stats(0, 1).current, 0.0);
        dash.ingest(&line(40_000, 200));
        assert_eq!(dash.chart().stats(0, 1).current, 200.0);
        dash.ingest(&line(50_000, 300));
        assert_eq!(dash.chart().stats(0, 1).current, 200.0);
        assert_eq!(dash.sample_rate_label(), Some("Sample Rate:\n100.0 Hz"));
        dash.ingest(&line(70_001, 400));
        assert_eq!(dash.chart().channel(0)[CHART_WIDTH - 2..], [200.0, 400.0]);
        assert_eq!(dash.chart().stats(3, 1).current, 3.0);
    }

    #[test]
    fn missing_distance_plots_sentinel() {
        let mut dash = Dashboard::new();
        dash.ingest(&report(
            r#"{"ts":50000,"l0":{"dist":5,"en":true},"l2":{"en":false}}"#,
        ));
        let chart = dash.chart();
        assert_eq!(chart.stats(0, 1).current, 5.0);
        assert_eq!(chart.stats(1, 1).current, MISSING_DIST);
        assert_eq!(chart.stats(2, 1).current, MISSING_DIST);
    }

    #[test]
    fn readouts_follow_engagement() {
        let mut dash = Dashboard::new();
        dash.ingest(&report(
            r#"{"ts":50000,"elevation":{"val":0.5,"en":true},"pitch":{"val":0.1,"en":false}}"#,
        ));
        let labels: Vec<_> = dash.readouts().iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["Elevation:\n0.500", "[pitch]", "[roll]", "[arc]"]);
    }

    #[test]
    fn reports_without_timestamp_are_ignored() {
        let mut dash = Dashboard::new();
        dash.ingest(&report(r#"{"l0":{"dist":5,"en":true}}"#));
        assert_eq!(dash.chart().stats(0, 1).current, 0.0);
        assert_eq!(dash.sample_rate_label(), Some("[sample rate]"));
    }

    #[test]
    fn chart_label_has_stats() {
        let dash = Dashboard::new();
        assert_eq!(dash.chart_label(2), "Channel 2 = 0.0 (mean=0.0, std=0.0)");
        assert_eq!(dash.title("/dev/ttyACM0"), "Quadrant Data Visualizer (/dev/ttyACM0)");
    }
}
