use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, TimeScale, ValueScale};
use crate::error::ChartResult;

/// One of the three measured quantities carried by a [`DataPoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantity {
    Temperature,
    Moisture,
    Light,
}

impl Quantity {
    /// Draw order used by the chart: moisture, light, then temperature on top.
    pub const DRAW_ORDER: [Self; 3] = [Self::Moisture, Self::Light, Self::Temperature];

    /// Focus indicator order.
    pub const ALL: [Self; 3] = [Self::Temperature, Self::Moisture, Self::Light];

    #[must_use]
    pub fn value(self, point: &DataPoint) -> f64 {
        match self {
            Self::Temperature => point.temp,
            Self::Moisture => point.mois,
            Self::Light => point.light,
        }
    }
}

/// Projected line segment in plot-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Piecewise-linear curve for one quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPath {
    pub quantity: Quantity,
    pub vertices: Vec<(f64, f64)>,
}

impl SeriesPath {
    #[must_use]
    pub fn segments(&self) -> Vec<LineSegment> {
        self.vertices
            .windows(2)
            .map(|pair| LineSegment {
                x1: pair[0].0,
                y1: pair[0].1,
                x2: pair[1].0,
                y2: pair[1].1,
            })
            .collect()
    }

    /// Path data in `M x,yLx,y` form; empty for an empty series.
    #[must_use]
    pub fn to_path_data(&self) -> String {
        let mut out = String::new();
        for (index, (x, y)) in self.vertices.iter().enumerate() {
            let command = if index == 0 { 'M' } else { 'L' };
            // Writing into a String cannot fail.
            let _ = write!(out, "{command}{x},{y}");
        }
        out
    }
}

/// Projects one quantity of `points` into plot pixel space.
///
/// Deterministic and side-effect free so rendering and tests consume the same
/// geometry.
pub fn project_series(
    points: &[DataPoint],
    time_scale: TimeScale,
    value_scale: ValueScale,
    quantity: Quantity,
) -> ChartResult<SeriesPath> {
    let mut vertices = Vec::with_capacity(points.len());
    for point in points {
        let x = time_scale.time_to_pixel(point.date)?;
        let y = value_scale.value_to_pixel(quantity.value(point))?;
        vertices.push((x, y));
    }

    Ok(SeriesPath { quantity, vertices })
}
