//! A one-line gauge: a marker that moves along a strip in proportion to a
//! value.

/// Which way the marker travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// The marker is a horizontal line moving up and down.
    Vertical,
    /// The marker is a vertical line moving left and right.
    Horizontal,
}

/// Range of values the gauge shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// `[0, 1]`
    Unipolar,
    /// `[-1, 1]`, with a centre line at zero.
    Bipolar,
}

/// Gauge state, independent of how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gauge {
    #[allow(missing_docs)]
    pub orientation: Orientation,
    #[allow(missing_docs)]
    pub polarity: Polarity,
    value: Option<f64>,
}

impl Gauge {
    /// An empty gauge.
    pub fn new(orientation: Orientation, polarity: Polarity) -> Self {
        Self {
            orientation,
            polarity,
            value: None,
        }
    }

    /// Show `value`, or nothing at all.
    pub fn set_value(&mut self, value: Option<f64>) {
        self.value = value;
    }

    #[allow(missing_docs)]
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Whether a dashed centre line is drawn.
    pub fn has_center_line(&self) -> bool {
        self.polarity == Polarity::Bipolar
    }

    /// Offset of the centre line along an axis of `extent` cells.
    pub fn center(&self, extent: u16) -> Option<u16> {
        self.has_center_line().then_some(extent / 2)
    }

    /// Offset of the marker along an axis of `extent` cells, measured from
    /// the top (vertical) or left (horizontal) edge.
    ///
    /// Note that a horizontal unipolar gauge runs right to left.
    pub fn position(&self, extent: u16) -> Option<u16> {
        let v = self.value?;
        if extent == 0 {
            return None;
        }
        let e = extent as f64;
        let pos = match (self.orientation, self.polarity) {
            (Orientation::Vertical, Polarity::Unipolar) => e * (1.0 - v),
            (Orientation::Vertical, Polarity::Bipolar) => e / 2.0 * (1.0 - v),
            (Orientation::Horizontal, Polarity::Unipolar) => e * (1.0 - v),
            (Orientation::Horizontal, Polarity::Bipolar) => e / 2.0 * (1.0 + v),
        };
        Some((pos.trunc().max(0.0) as u16).min(extent - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gauge(o: Orientation, p: Polarity, v: f64) -> Gauge {
        let mut g = Gauge::new(o, p);
        g.set_value(Some(v));
        g
    }

    #[test]
    fn empty_gauge_has_no_marker() {
        let g = Gauge::new(Orientation::Vertical, Polarity::Unipolar);
        assert_eq!(g.position(10), None);
        assert_eq!(g.center(10), None);
    }

    #[test]
    fn vertical_unipolar() {
        use Orientation::*;
        use Polarity::*;
        assert_eq!(gauge(Vertical, Unipolar, 1.0).position(10), Some(0));
        assert_eq!(gauge(Vertical, Unipolar, 0.25).position(10), Some(7));
        // Zero sits on the bottom row rather than just past it.
        assert_eq!(gauge(Vertical, Unipolar, 0.0).position(10), Some(9));
    }

    #[test]
    fn bipolar_positions() {
        use Orientation::*;
        use Polarity::*;
        assert_eq!(gauge(Vertical, Bipolar, 0.0).position(20), Some(10));
        assert_eq!(gauge(Vertical, Bipolar, 1.0).position(20), Some(0));
        assert_eq!(gauge(Vertical, Bipolar, -1.0).position(20), Some(19));
        assert_eq!(gauge(Horizontal, Bipolar, -1.0).position(20), Some(0));
        assert_eq!(gauge(Horizontal, Bipolar, 0.5).position(20), Some(15));
        assert_eq!(gauge(Horizontal, Bipolar, 0.0).center(20), Some(10));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        use Orientation::*;
        use Polarity::*;
        assert_eq!(gauge(Vertical, Unipolar, 1.5).position(10), Some(0));
        assert_eq!(gauge(Horizontal, Unipolar, -3.0).position(10), Some(9));
        assert_eq!(gauge(Horizontal, Unipolar, 0.5).position(0), None);
    }
}
