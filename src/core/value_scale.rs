use serde::{Deserialize, Serialize};

use crate::core::scale::LinearScale;
use crate::core::{DataPoint, Quantity};
use crate::error::{ChartError, ChartResult};

/// Measurement axis mapped to an inverted Y pixel axis (`0` at the bottom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    linear: LinearScale,
}

impl ValueScale {
    /// Builds a `[0, max]` domain over `[plot_height, 0]`.
    ///
    /// A zero maximum falls back to `[0, 1]`.
    pub fn new(max: f64, plot_height: f64) -> ChartResult<Self> {
        if !max.is_finite() {
            return Err(ChartError::InvalidData(
                "value scale maximum must be finite".to_owned(),
            ));
        }
        let max = if max == 0.0 { 1.0 } else { max };
        Ok(Self {
            linear: LinearScale::new((0.0, max), (plot_height, 0.0))?,
        })
    }

    /// Fits `[0, max(quantity)]` across `points`.
    pub fn from_data(
        points: &[DataPoint],
        quantity: Quantity,
        plot_height: f64,
    ) -> ChartResult<Self> {
        let max = points
            .iter()
            .map(|point| quantity.value(point))
            .reduce(f64::max)
            .ok_or(ChartError::EmptyDataset)?;
        Self::new(max, plot_height)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    pub fn value_to_pixel(self, value: f64) -> ChartResult<f64> {
        self.linear.domain_to_pixel(value)
    }

    pub fn pixel_to_value(self, pixel: f64) -> ChartResult<f64> {
        self.linear.pixel_to_domain(pixel)
    }
}

/// Y scales for the three measured quantities.
///
/// With `shared` set, every quantity maps through `[0, max(light)]`; temperature
/// and moisture are then drawn relative to the light range. Otherwise each
/// quantity is fitted to its own maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScales {
    shared: bool,
    temperature: ValueScale,
    moisture: ValueScale,
    light: ValueScale,
}

impl ValueScales {
    pub fn from_data(points: &[DataPoint], plot_height: f64, shared: bool) -> ChartResult<Self> {
        let light = ValueScale::from_data(points, Quantity::Light, plot_height)?;
        if shared {
            return Ok(Self {
                shared,
                temperature: light,
                moisture: light,
                light,
            });
        }

        Ok(Self {
            shared,
            temperature: ValueScale::from_data(points, Quantity::Temperature, plot_height)?,
            moisture: ValueScale::from_data(points, Quantity::Moisture, plot_height)?,
            light,
        })
    }

    #[must_use]
    pub fn is_shared(self) -> bool {
        self.shared
    }

    #[must_use]
    pub fn for_quantity(self, quantity: Quantity) -> ValueScale {
        match quantity {
            Quantity::Temperature => self.temperature,
            Quantity::Moisture => self.moisture,
            Quantity::Light => self.light,
        }
    }
}
