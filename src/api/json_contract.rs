use serde::{Deserialize, Serialize};

use crate::core::DataPoint;
use crate::error::{ChartError, ChartResult};
use crate::extensions::Marker;

/// Data feed handed to the chart by the dashboard page.
///
/// ```json
/// { "data": [{ "date": 0, "temp": 20, "mois": 30, "light": 100 }],
///   "markers": [{ "date": 0, "type": "PumpManual", "quantity": 250 }] }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartInput {
    pub data: Vec<DataPoint>,
    #[serde(default)]
    pub markers: Vec<Marker>,
}

impl ChartInput {
    #[must_use]
    pub fn new(data: Vec<DataPoint>, markers: Vec<Marker>) -> Self {
        Self { data, markers }
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart input: {e}")))
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart input: {e}")))
    }
}
