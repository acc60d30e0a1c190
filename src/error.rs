use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Programming mistakes detected while building configuration.
    ///
    /// These are not recoverable at runtime and are reported as soon as the
    /// offending value is constructed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
