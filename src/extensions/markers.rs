use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::TimeScale;
use crate::error::{ChartError, ChartResult};

/// Irrigation trigger recorded by the pump controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    #[serde(rename = "PumpAuto", alias = "Auto")]
    Auto,
    #[serde(rename = "PumpManual", alias = "Manual")]
    Manual,
}

impl MarkerKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::Manual => "Manual",
        }
    }
}

/// Discrete timestamped irrigation event.
///
/// `quantity` is the raw controller count in hundredths of a millilitre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub date: f64,
    #[serde(rename = "type")]
    pub kind: MarkerKind,
    pub quantity: i64,
}

impl Marker {
    #[must_use]
    pub fn new(date: f64, kind: MarkerKind, quantity: i64) -> Self {
        Self {
            date,
            kind,
            quantity,
        }
    }

    /// Quantity formatted for the badge, e.g. `250` -> `"2.5mL"`.
    #[must_use]
    pub fn quantity_label(self) -> String {
        format!("{}mL", Decimal::new(self.quantity, 2).normalize())
    }
}

/// Timing and badge geometry for the marker reveal sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerAnimationConfig {
    /// Delay before the first marker is revealed.
    pub base_delay_ms: f64,
    /// Additional delay between consecutive markers.
    pub per_marker_delay_ms: f64,
    pub reveal_duration_ms: f64,
    /// Clip slide-in duration contributed by each marker.
    pub clip_duration_per_marker_ms: f64,
    pub badge_radius_px: f64,
    pub badge_inset_px: f64,
    /// Resting height above the plot top for manual markers.
    pub manual_lane_px: f64,
    pub auto_lane_px: f64,
}

impl Default for MarkerAnimationConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 1000.0,
            per_marker_delay_ms: 500.0,
            reveal_duration_ms: 1000.0,
            clip_duration_per_marker_ms: 1000.0,
            badge_radius_px: 32.0,
            badge_inset_px: 3.0,
            manual_lane_px: 160.0,
            auto_lane_px: 80.0,
        }
    }
}

impl MarkerAnimationConfig {
    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.base_delay_ms, "base_delay_ms"),
            (self.reveal_duration_ms, "reveal_duration_ms"),
            (
                self.clip_duration_per_marker_ms,
                "clip_duration_per_marker_ms",
            ),
            (self.badge_inset_px, "badge_inset_px"),
            (self.manual_lane_px, "manual_lane_px"),
            (self.auto_lane_px, "auto_lane_px"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "marker config `{name}` must be finite and >= 0"
                )));
            }
        }

        for (value, name) in [
            (self.per_marker_delay_ms, "per_marker_delay_ms"),
            (self.badge_radius_px, "badge_radius_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "marker config `{name}` must be finite and > 0"
                )));
            }
        }

        if self.manual_lane_px == self.auto_lane_px {
            return Err(ChartError::InvalidData(
                "manual and auto marker lanes must differ".to_owned(),
            ));
        }

        Ok(self)
    }

    #[must_use]
    pub fn lane_px(self, kind: MarkerKind) -> f64 {
        match kind {
            MarkerKind::Manual => self.manual_lane_px,
            MarkerKind::Auto => self.auto_lane_px,
        }
    }
}

/// Vertical stem between the badge and the plot baseline, in badge-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StemGeometry {
    pub x: f64,
    pub y1: f64,
    pub y2: f64,
}

impl StemGeometry {
    #[must_use]
    fn lerp(self, to: Self, t: f64) -> Self {
        Self {
            x: lerp(self.x, to.x, t),
            y1: lerp(self.y1, to.y1, t),
            y2: lerp(self.y2, to.y2, t),
        }
    }
}

/// Start and resting geometry of one marker badge in plot-local pixels.
///
/// The badge is a circle of `radius` whose bounding box top-left is at
/// `(x, y)`. It rises from just above the plot baseline to a fixed lane that
/// depends only on [`MarkerKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerLayout {
    pub marker: Marker,
    pub radius: f64,
    pub x: f64,
    pub y_start: f64,
    pub y_end: f64,
    pub stem_start: StemGeometry,
    pub stem_end: StemGeometry,
}

impl MarkerLayout {
    pub fn resolve(
        marker: Marker,
        time_scale: TimeScale,
        plot_height: f64,
        config: MarkerAnimationConfig,
    ) -> ChartResult<Self> {
        if !marker.date.is_finite() {
            return Err(ChartError::InvalidData(
                "marker date must be finite".to_owned(),
            ));
        }

        let radius = config.badge_radius_px;
        let inset = config.badge_inset_px;
        let x = time_scale.time_to_pixel(marker.date)? - radius - inset;
        let y_start = plot_height - radius - inset;
        let y_end = config.lane_px(marker.kind) + radius - inset;

        // Collapsed at the baseline, then stretched from the baseline up to the
        // badge's lower edge once settled.
        let stem_start = StemGeometry {
            x: radius,
            y1: plot_height - y_start,
            y2: plot_height - y_start,
        };
        let stem_end = StemGeometry {
            x: radius,
            y1: plot_height - y_end,
            y2: radius * 2.0,
        };

        Ok(Self {
            marker,
            radius,
            x,
            y_start,
            y_end,
            stem_start,
            stem_end,
        })
    }

    /// Samples the reveal at eased `progress` in `[0, 1]`.
    #[must_use]
    pub fn sample(&self, progress: f64) -> MarkerFrame {
        let t = progress.clamp(0.0, 1.0);
        MarkerFrame {
            marker: self.marker,
            radius: self.radius,
            x: self.x,
            y: lerp(self.y_start, self.y_end, t),
            opacity: t,
            stem: self.stem_start.lerp(self.stem_end, t),
        }
    }
}

/// Marker badge state at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerFrame {
    pub marker: Marker,
    pub radius: f64,
    /// Badge translate in plot-local pixels.
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
    /// Stem in badge-local pixels.
    pub stem: StemGeometry,
}

impl MarkerFrame {
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.radius, self.y + self.radius)
    }

    #[must_use]
    pub fn kind_label_anchor(&self) -> (f64, f64) {
        (self.x + self.radius, self.y + self.radius * 0.9)
    }

    #[must_use]
    pub fn quantity_label_anchor(&self) -> (f64, f64) {
        (self.x + self.radius, self.y + self.radius * 1.5)
    }
}

pub(crate) fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
