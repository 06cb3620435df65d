//! One-value-per-line writers for intermediate sequences
//!
//! Persists the derived volume and linear-size sequences as plain text,
//! matching the input format so the files can be re-ingested or handed
//! to other tools. Values are written at the fixed 2-decimal display
//! precision.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default file name for derived volume sequences (m³)
pub const DEFAULT_VOLUMES_FILE: &str = "volumes_m3.txt";

/// Default file name for derived linear-size sequences (m)
pub const DEFAULT_SIZES_FILE: &str = "sizes_m.txt";

/// Decimal places used when persisting values
pub const WRITE_PRECISION: usize = 2;

/// Write values one per line at the fixed display precision.
///
/// Returns the path written, so callers can report it to the user.
pub fn write_values(path: impl AsRef<Path>, values: &[f64]) -> io::Result<PathBuf> {
    let path = path.as_ref();
    let mut text = String::with_capacity(values.len() * 8);
    for value in values {
        text.push_str(&format!("{value:.prec$}", prec = WRITE_PRECISION));
        text.push('\n');
    }
    fs::write(path, text)?;
    tracing::debug!(path = %path.display(), count = values.len(), "wrote value file");
    Ok(path.to_path_buf())
}

/// Write a volume sequence (m³) into `dir` under the default name
pub fn write_volumes(dir: impl AsRef<Path>, volumes: &[f64]) -> io::Result<PathBuf> {
    write_values(dir.as_ref().join(DEFAULT_VOLUMES_FILE), volumes)
}

/// Write a linear-size sequence (m) into `dir` under the default name
pub fn write_sizes(dir: impl AsRef<Path>, sizes: &[f64]) -> io::Result<PathBuf> {
    write_values(dir.as_ref().join(DEFAULT_SIZES_FILE), sizes)
}
