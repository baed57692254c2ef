//! Locations of the configuration files a run reads.

use std::path::{Path, PathBuf};

pub const DEFAULT_TEMPLATES_PATH: &str = "config/templates.toml";
pub const DEFAULT_BRAND_PATH: &str = "config/brand.toml";

/// Where the template catalog and the brand profile live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Template catalog (required)
    pub templates: PathBuf,
    /// Brand profile (optional, defaults apply when absent)
    pub brand: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templates: PathBuf::from(DEFAULT_TEMPLATES_PATH),
            brand: PathBuf::from(DEFAULT_BRAND_PATH),
        }
    }
}

impl Config {
    pub fn new(templates: impl Into<PathBuf>, brand: impl Into<PathBuf>) -> Self {
        Self {
            templates: templates.into(),
            brand: brand.into(),
        }
    }

    /// Both files under one directory, with their default names.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join("templates.toml"), dir.join("brand.toml"))
    }
}
