//! Fixed-width sample history for scrolling plots.

/// Default number of samples a chart holds.
pub const CHART_WIDTH: usize = 512;

/// Default number of trailing samples the statistics are computed over.
pub const STATS_WINDOW: usize = 50;

/// Statistics over the tail of one channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStats {
    /// The newest sample.
    pub current: f32,
    /// Mean over the window.
    pub mean: f32,
    /// Population standard deviation over the window.
    pub std: f32,
}

/// `channels` rows of `width` samples each. Pushing a column shifts every row
/// left by one and writes the new sample at the right edge, so index
/// `width - 1` is always the newest.
#[derive(Debug, Clone)]
pub struct StripChart {
    data: Vec<Vec<f32>>,
    width: usize,
}

impl StripChart {
    /// A zero-filled chart.
    pub fn new(channels: usize, width: usize) -> Self {
        assert!(width > 0, "a strip chart needs at least one column");
        Self {
            data: vec![vec![0.0; width]; channels],
            width,
        }
    }

    /// Number of rows.
    pub fn channels(&self) -> usize {
        self.data.len()
    }

    /// Number of samples per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Append one sample per channel.
    pub fn push(&mut self, column: &[f32]) {
        assert_eq!(column.len(), self.data.len());
        for (row, &sample) in self.data.iter_mut().zip(column) {
            row.rotate_left(1);
            row[self.width - 1] = sample;
        }
    }

    /// All samples of one channel, oldest first.
    pub fn channel(&self, i: usize) -> &[f32] {
        &self.data[i]
    }

    /// `(x, y)` pairs ready for plotting.
    pub fn points(&self, i: usize) -> Vec<(f64, f64)> {
        self.data[i]
            .iter()
            .enumerate()
            .map(|(x, &y)| (x as f64, y as f64))
            .collect()
    }

    /// Current value, mean and standard deviation of the last `window`
    /// samples of channel `i`.
    pub fn stats(&self, i: usize, window: usize) -> ChannelStats {
        let row = &self.data[i];
        let window = window.clamp(1, self.width);
        let tail = &row[self.width - window..];
        let n = tail.len() as f64;
        let mean = tail.iter().map(|&v| v as f64).sum::<f64>() / n;
        let var = tail
            .iter()
            .map(|&v| (v as f64 - mean).powi(2))
            .sum::<f64>()
            / n;

        ChannelStats {
            current: row[self.width - 1],
            mean: mean as f32,
            std: var.sqrt() as f32,
        }
    }

    /// Smallest and largest sample of channel `i`.
    pub fn bounds(&self, i: usize) -> (f32, f32) {
        self.data[i]
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed() {
        let chart = StripChart::new(4, CHART_WIDTH);
        assert_eq!(chart.channels(), 4);
        assert_eq!(chart.width(), CHART_WIDTH);
        assert!(chart.channel(3).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn push_shifts_left() {
        let mut chart = StripChart::new(2, 4);
        chart.push(&[1.0, 10.0]);
        chart.push(&[2.0, 20.0]);
        assert_eq!(chart.channel(0), &[0.0, 0.0, 1.0, 2.0]);
        assert_eq!(chart.channel(1), &[0.0, 0.0, 10.0, 20.0]);
        for v in 3..7 {
            chart.push(&[v as f32, 0.0]);
        }
        assert_eq!(chart.channel(0), &[3.0, 4.0, 5.0, 6.0]);
        assert_eq!(chart.points(0)[3], (3.0, 6.0));
    }

    #[test]
    fn stats_over_tail() {
        let mut chart = StripChart::new(1, 8);
        for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            chart.push(&[v]);
        }
        let stats = chart.stats(0, 8);
        assert_eq!(stats.current, 9.0);
        assert!((stats.mean - 5.0).abs() < 1e-6);
        assert!((stats.std - 2.0).abs() < 1e-6);

        let tail = chart.stats(0, 2);
        assert!((tail.mean - 8.0).abs() < 1e-6);
        assert!((tail.std - 1.0).abs() < 1e-6);
    }

    #[test]
    fn stats_window_larger_than_chart() {
        let mut chart = StripChart::new(1, 4);
        chart.push(&[4.0]);
        let stats = chart.stats(0, STATS_WINDOW);
        assert!((stats.mean - 1.0).abs() < 1e-6);
        assert_eq!(chart.bounds(0), (0.0, 4.0));
    }
}
