//! sensor-chart: interactive sensor time-series chart model.
//!
//! Three overlaid curves (temperature, moisture, light) are projected against
//! a shared time axis. The crate owns the coordinate mapping, nearest-point
//! focus readout and the timed reveal of irrigation markers; pixel output is
//! delegated to a host-supplied [`render::Renderer`].

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{Chart, ChartConfig, ChartHost, ChartId, ChartInput};
pub use error::{ChartError, ChartResult};
