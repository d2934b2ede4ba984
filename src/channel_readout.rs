//! Label and gauge for one parameter channel of the dashboard.

use crate::gauge::{Gauge, Orientation, Polarity};
use crate::telemetry::{ParamChannel, Parameter};

/// What the dashboard shows for elevation, pitch, roll or arc.
#[derive(Debug, Clone)]
pub struct ChannelReadout {
    parameter: Parameter,
    label: String,
    gauge: Gauge,
}

impl ChannelReadout {
    /// A readout in its idle state, showing `[name]` and an empty gauge.
    pub fn new(parameter: Parameter) -> Self {
        let (orientation, polarity) = match parameter {
            Parameter::Elevation => (Orientation::Vertical, Polarity::Unipolar),
            Parameter::Pitch => (Orientation::Vertical, Polarity::Bipolar),
            Parameter::Roll => (Orientation::Horizontal, Polarity::Bipolar),
            Parameter::Arc => (Orientation::Vertical, Polarity::Bipolar),
        };
        Self {
            parameter,
            label: idle_label(parameter),
            gauge: Gauge::new(orientation, polarity),
        }
    }

    /// Show the latest reading. A channel that is not engaged, or has no
    /// value, goes back to the idle state.
    pub fn update(&mut self, channel: &ParamChannel) {
        match channel.val {
            Some(value) if channel.en => {
                self.label = format!("{}:\n{:1.3}", self.parameter.title(), value);
                self.gauge.set_value(Some(value));
            }
            _ => {
                self.label = idle_label(self.parameter);
                self.gauge.set_value(None);
            }
        }
    }

    #[allow(missing_docs)]
    pub fn parameter(&self) -> Parameter {
        self.parameter
    }

    #[allow(missing_docs)]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[allow(missing_docs)]
    pub fn gauge(&self) -> &Gauge {
        &self.gauge
    }
}

fn idle_label(parameter: Parameter) -> String {
    format!("[{}]", parameter.field())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engaged_shows_value() {
        let mut readout = ChannelReadout::new(Parameter::Pitch);
        assert_eq!(readout.label(), "[pitch]");
        readout.update(&ParamChannel {
            val: Some(-0.25),
            en: true,
        });
        assert_eq!(readout.label(), "Pitch:\n-0.250");
        assert_eq!(readout.gauge().value(), Some(-0.25));
        assert_eq!(readout.gauge().polarity, Polarity::Bipolar);
    }

    #[test]
    fn disengaged_goes_idle() {
        let mut readout = ChannelReadout::new(Parameter::Elevation);
        readout.update(&ParamChannel {
            val: Some(0.5),
            en: true,
        });
        readout.update(&ParamChannel {
            val: Some(0.7),
            en: false,
        });
        assert_eq!(readout.label(), "[elevation]");
        assert_eq!(readout.gauge().value(), None);
    }

    #[test]
    fn roll_is_horizontal() {
        let readout = ChannelReadout::new(Parameter::Roll);
        assert_eq!(readout.gauge().orientation, Orientation::Horizontal);
        assert_eq!(readout.parameter(), Parameter::Roll);
    }
}
