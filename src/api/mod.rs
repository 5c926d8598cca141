//! Chart assembly: configuration, the assembled chart state, timers and the
//! host that owns render containers.

mod chart;
mod chart_config;
mod chart_layout;
mod host;
mod json_contract;
mod render_style;
mod timeline;

pub use chart::{Chart, ChartId};
pub use chart_config::ChartConfig;
pub use chart_layout::ChartLayout;
pub use host::ChartHost;
pub use json_contract::ChartInput;
pub use render_style::RenderStyle;
pub use timeline::{FiredTimer, Timeline, TimerHandle, TimerTask};
