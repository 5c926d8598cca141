pub mod line_series;
pub mod locator;
pub mod primitives;
pub mod scale;
pub mod time_scale;
pub mod types;
pub mod value_scale;

pub use line_series::{LineSegment, Quantity, SeriesPath, project_series};
pub use locator::{locate, locate_index, lower_bound};
pub use scale::LinearScale;
pub use time_scale::TimeScale;
pub use types::{DataPoint, Margin, Viewport, validate_series};
pub use value_scale::{ValueScale, ValueScales};
