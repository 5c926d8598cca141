use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// The chart was asked to build from zero data points.
    #[error("dataset is empty")]
    EmptyDataset,

    #[error("render container `{id}` does not exist")]
    MissingContainer { id: String },

    #[error("container `{id}` has no mounted chart")]
    UnknownChart { id: String },
}
