use serde::{Deserialize, Serialize};

use crate::core::{Margin, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::extensions::MarkerAnimationConfig;

use super::RenderStyle;

/// Chart bootstrap configuration.
///
/// Serializable so a dashboard can ship its chart setup alongside the data
/// feed. Every field has a default matching the stock dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub surface: Viewport,
    #[serde(default)]
    pub margin: Margin,
    /// Map all three quantities through the light range (`[0, max(light)]`).
    #[serde(default = "default_shared_scale")]
    pub shared_scale: bool,
    #[serde(default)]
    pub markers: MarkerAnimationConfig,
    #[serde(default)]
    pub style: RenderStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            surface: Viewport::default(),
            margin: Margin::default(),
            shared_scale: default_shared_scale(),
            markers: MarkerAnimationConfig::default(),
            style: RenderStyle::default(),
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn new(surface: Viewport) -> Self {
        Self {
            surface,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_shared_scale(mut self, shared_scale: bool) -> Self {
        self.shared_scale = shared_scale;
        self
    }

    #[must_use]
    pub fn with_marker_animation(mut self, markers: MarkerAnimationConfig) -> Self {
        self.markers = markers;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.surface.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.surface.width,
                height: self.surface.height,
            });
        }
        self.margin.validate()?;
        self.markers.validate()?;
        self.style.validate()?;
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))?;
        config.validate()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart config: {e}"))
        })
    }
}

fn default_shared_scale() -> bool {
    true
}
