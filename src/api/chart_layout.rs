use serde::{Deserialize, Serialize};

use crate::core::{Margin, Viewport};
use crate::error::{ChartError, ChartResult};

/// Drawing surface split into margins and the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    surface: Viewport,
    margin: Margin,
    plot_width: f64,
    plot_height: f64,
}

impl ChartLayout {
    pub fn new(surface: Viewport, margin: Margin) -> ChartResult<Self> {
        if !surface.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: surface.width,
                height: surface.height,
            });
        }
        let margin = margin.validate()?;

        let plot_width = f64::from(surface.width) - margin.left - margin.right;
        let plot_height = f64::from(surface.height) - margin.top - margin.bottom;
        if plot_width <= 0.0 || plot_height <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "margins leave no plot area ({plot_width}x{plot_height})"
            )));
        }

        Ok(Self {
            surface,
            margin,
            plot_width,
            plot_height,
        })
    }

    #[must_use]
    pub fn surface(self) -> Viewport {
        self.surface
    }

    #[must_use]
    pub fn margin(self) -> Margin {
        self.margin
    }

    #[must_use]
    pub fn plot_width(self) -> f64 {
        self.plot_width
    }

    #[must_use]
    pub fn plot_height(self) -> f64 {
        self.plot_height
    }

    #[must_use]
    pub fn surface_to_plot(self, x: f64, y: f64) -> (f64, f64) {
        (x - self.margin.left, y - self.margin.top)
    }

    #[must_use]
    pub fn plot_to_surface(self, x: f64, y: f64) -> (f64, f64) {
        (x + self.margin.left, y + self.margin.top)
    }
}
