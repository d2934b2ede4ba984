use crate::gauge::{Gauge, Orientation};

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

/// Draws a [`Gauge`]: a dashed centre line for bipolar gauges, and a solid
/// marker line at the current value.
pub struct GaugeWidget<'a> {
    gauge: &'a Gauge,
    marker_style: Style,
    center_style: Style,
}

impl<'a> GaugeWidget<'a> {
    #[allow(missing_docs)]
    pub fn new(gauge: &'a Gauge) -> Self {
        Self {
            gauge,
            marker_style: Style::default(),
            center_style: Style::default(),
        }
    }

    #[allow(missing_docs)]
    pub fn marker_style(mut self, style: Style) -> Self {
        self.marker_style = style;
        self
    }

    #[allow(missing_docs)]
    pub fn center_style(mut self, style: Style) -> Self {
        self.center_style = style;
        self
    }
}

impl Widget for GaugeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        match self.gauge.orientation {
            Orientation::Vertical => {
                if let Some(y) = self.gauge.center(area.height) {
                    for x in (area.left()..area.right()).step_by(2) {
                        buf.set_string(x, area.y + y, "╌", self.center_style);
                    }
                }
                if let Some(y) = self.gauge.position(area.height) {
                    for x in area.left()..area.right() {
                        buf.set_string(x, area.y + y, "━", self.marker_style);
                    }
                }
            }
            Orientation::Horizontal => {
                if let Some(x) = self.gauge.center(area.width) {
                    for y in (area.top()..area.bottom()).step_by(2) {
                        buf.set_string(area.x + x, y, "╎", self.center_style);
                    }
                }
                if let Some(x) = self.gauge.position(area.width) {
                    for y in area.top()..area.bottom() {
                        buf.set_string(area.x + x, y, "┃", self.marker_style);
                    }
                }
            }
        }
    }
}
