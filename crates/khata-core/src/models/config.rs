//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the khata pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KhataConfig {
    /// Statement extraction configuration.
    pub extraction: ExtractionConfig,
}

impl Default for KhataConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
        }
    }
}

/// Statement extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// How many leading rows to scan for a header row. `None` scans the
    /// whole sheet.
    pub header_scan_rows: Option<usize>,

    /// How many leading rows to scan for account holder details.
    pub profile_scan_rows: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            header_scan_rows: None,
            profile_scan_rows: 15,
        }
    }
}

impl KhataConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
