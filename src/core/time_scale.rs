use serde::{Deserialize, Serialize};

use crate::core::DataPoint;
use crate::core::scale::{LinearScale, normalize_extent};
use crate::error::{ChartError, ChartResult};

/// Half-width in milliseconds applied around a single-timestamp dataset.
const SINGLE_SAMPLE_HALF_SPAN_MS: f64 = 1.0;

/// Time axis: data date extent mapped onto `[0, plot_width]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(time_start: f64, time_end: f64, plot_width: f64) -> ChartResult<Self> {
        let (start, end) = normalize_extent(time_start, time_end, SINGLE_SAMPLE_HALF_SPAN_MS)?;
        Ok(Self {
            linear: LinearScale::new((start, end), (0.0, plot_width))?,
        })
    }

    /// Fits the domain to the minimum and maximum `date` across `points`.
    pub fn from_data(points: &[DataPoint], plot_width: f64) -> ChartResult<Self> {
        if points.is_empty() {
            return Err(ChartError::EmptyDataset);
        }

        let (min, max) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), point| {
                (min.min(point.date), max.max(point.date))
            });
        Self::new(min, max, plot_width)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn plot_width(self) -> f64 {
        self.linear.range().1
    }

    pub fn time_to_pixel(self, time: f64) -> ChartResult<f64> {
        self.linear.domain_to_pixel(time)
    }

    pub fn pixel_to_time(self, pixel: f64) -> ChartResult<f64> {
        self.linear.pixel_to_domain(pixel)
    }
}
