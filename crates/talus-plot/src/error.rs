//! Plot rendering errors

use thiserror::Error;

/// Errors that can occur during chart rendering
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("failed to save chart to file: {0}")]
    FileSave(#[from] std::io::Error),

    #[error("invalid chart data: {0}")]
    InvalidData(String),
}

pub type PlotResult<T> = Result<T, PlotError>;
