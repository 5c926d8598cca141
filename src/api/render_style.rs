use serde::{Deserialize, Serialize};

use crate::core::Quantity;
use crate::error::{ChartError, ChartResult};
use crate::extensions::MarkerKind;
use crate::render::Color;

/// Style contract for chart render frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderStyle {
    pub temperature_line_color: Color,
    pub moisture_line_color: Color,
    pub light_line_color: Color,
    pub series_line_width: f64,
    pub focus_indicator_radius_px: f64,
    /// Horizontal offset of a focus label from its indicator center.
    pub focus_label_offset_x_px: f64,
    /// Vertical offset of a focus label baseline from its indicator center.
    pub focus_label_offset_y_px: f64,
    pub focus_label_font_size_px: f64,
    pub focus_label_color: Color,
    pub auto_marker_color: Color,
    pub manual_marker_color: Color,
    pub marker_stem_width: f64,
    pub marker_label_font_size_px: f64,
    pub marker_label_color: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            temperature_line_color: Color::rgb(0.84, 0.15, 0.16),
            moisture_line_color: Color::rgb(0.12, 0.47, 0.71),
            light_line_color: Color::rgb(0.99, 0.75, 0.18),
            series_line_width: 1.5,
            focus_indicator_radius_px: 4.5,
            focus_label_offset_x_px: 9.0,
            focus_label_offset_y_px: -6.5,
            focus_label_font_size_px: 10.0,
            focus_label_color: Color::rgb(0.2, 0.2, 0.2),
            auto_marker_color: Color::rgb(0.17, 0.63, 0.17),
            manual_marker_color: Color::rgb(0.58, 0.4, 0.74),
            marker_stem_width: 2.0,
            marker_label_font_size_px: 12.0,
            marker_label_color: Color::rgb(1.0, 1.0, 1.0),
        }
    }
}

impl RenderStyle {
    #[must_use]
    pub fn series_color(self, quantity: Quantity) -> Color {
        match quantity {
            Quantity::Temperature => self.temperature_line_color,
            Quantity::Moisture => self.moisture_line_color,
            Quantity::Light => self.light_line_color,
        }
    }

    #[must_use]
    pub fn marker_color(self, kind: MarkerKind) -> Color {
        match kind {
            MarkerKind::Auto => self.auto_marker_color,
            MarkerKind::Manual => self.manual_marker_color,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        for color in [
            self.temperature_line_color,
            self.moisture_line_color,
            self.light_line_color,
            self.focus_label_color,
            self.auto_marker_color,
            self.manual_marker_color,
            self.marker_label_color,
        ] {
            color.validate()?;
        }

        for (value, name) in [
            (self.series_line_width, "series_line_width"),
            (self.focus_indicator_radius_px, "focus_indicator_radius_px"),
            (self.focus_label_font_size_px, "focus_label_font_size_px"),
            (self.marker_stem_width, "marker_stem_width"),
            (self.marker_label_font_size_px, "marker_label_font_size_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "render style `{name}` must be finite and > 0"
                )));
            }
        }

        if !self.focus_label_offset_x_px.is_finite() || !self.focus_label_offset_y_px.is_finite() {
            return Err(ChartError::InvalidData(
                "render style focus label offsets must be finite".to_owned(),
            ));
        }

        Ok(self)
    }
}
