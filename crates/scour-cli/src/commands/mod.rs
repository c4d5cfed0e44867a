//! CLI command implementations.

pub mod analyze;
pub mod clean;
pub mod summary;

use std::path::{Path, PathBuf};

use scour::{Scour, ScourConfig};
use tracing::debug;

/// Build a Scour instance, reading the configuration file if given.
pub fn build_scour(config: Option<&Path>) -> Result<Scour, Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            ScourConfig::from_json_file(path)?
        }
        None => ScourConfig::default(),
    };
    Ok(Scour::with_config(config))
}

/// Fail early with a readable message if the input is missing.
pub fn ensure_exists(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    Ok(())
}

/// `<dir>/<stem>_<suffix>.<ext>` next to `file`.
pub fn sibling_path(file: &Path, suffix: &str, ext: &str) -> PathBuf {
    let stem = file.file_stem().unwrap_or_default().to_string_lossy();
    file.with_file_name(format!("{}_{}.{}", stem, suffix, ext))
}
