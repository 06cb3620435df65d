//! Rendered-figure handles

use std::path::{Path, PathBuf};

/// Record of a rendered figure: where it was written and which series
/// were drawn, so callers can redisplay or register it without
/// recomputing anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigureHandle {
    /// Output path of the PNG file
    pub path: PathBuf,
    /// Figure title
    pub title: String,
    /// Names of the series drawn, in draw order
    pub series: Vec<String>,
}

impl FigureHandle {
    pub(crate) fn new(path: &Path, title: impl Into<String>, series: Vec<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            title: title.into(),
            series,
        }
    }
}
