use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::datetime_to_unix_millis;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1000, 500)
    }
}

/// Fixed layout gutter between the drawing surface edge and the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.top, "top"),
            (self.right, "right"),
            (self.bottom, "bottom"),
            (self.left, "left"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "margin `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::new(20.0, 20.0, 40.0, 40.0)
    }
}

/// One sensor sample. `date` is milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: f64,
    pub temp: f64,
    pub mois: f64,
    pub light: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(date: f64, temp: f64, mois: f64, light: f64) -> Self {
        Self {
            date,
            temp,
            mois,
            light,
        }
    }

    /// Sample stamped with a UTC time instead of raw epoch milliseconds.
    #[must_use]
    pub fn from_datetime(time: DateTime<Utc>, temp: f64, mois: f64, light: f64) -> Self {
        Self::new(datetime_to_unix_millis(time), temp, mois, light)
    }

    fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.date, "date"),
            (self.temp, "temp"),
            (self.mois, "mois"),
            (self.light, "light"),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "data point `{name}` must be finite"
                )));
            }
        }
        Ok(self)
    }
}

/// Checks the build preconditions for a chart dataset: non-empty, finite and
/// sorted ascending by `date`.
pub fn validate_series(points: &[DataPoint]) -> ChartResult<()> {
    if points.is_empty() {
        return Err(ChartError::EmptyDataset);
    }

    for point in points {
        point.validate()?;
    }

    if let Some(index) = points
        .windows(2)
        .position(|pair| pair[1].date < pair[0].date)
    {
        return Err(ChartError::InvalidData(format!(
            "data points must be sorted by date (index {} precedes index {})",
            index + 1,
            index
        )));
    }

    Ok(())
}
