//! Session configuration
//!
//! Canvas geometry, default parameter string, and palette, loadable from
//! a JSON file. Dimensions are fixed for the lifetime of a session; the
//! same values normalize point coordinates at capture and training time.

use crate::canvas::Palette;
use crate::core::{Result, SvmToyError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Configuration for one interactive session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Default training-parameter string (opaque to the pipeline)
    pub params: String,
    /// Marker, region, curve, and tube colors
    pub palette: Palette,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            params: "-t 2 -c 100".to_string(),
            palette: Palette::default(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from a JSON file; absent fields fall back to
    /// defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| SvmToyError::ParseError(format!("Failed to parse config: {e}")))
    }
}
