//! Configuration for the terminal engine

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{CharsetMap, CharsetState};

/// Terminal configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Width in columns
    pub cols: usize,
    /// Height in rows
    pub rows: usize,
    /// Maximum scrollback lines kept by the primary screen
    pub scrollback_lines: usize,
    /// Decode input as UTF-8 after construction and after every reset
    pub utf8: bool,
    /// Report BEL as a visual bell instead of an audible one
    pub visual_bell: bool,
    /// Initial G0-G3 bindings
    pub charsets: [CharsetMap; 4],
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            cols: 80,
            rows: 24,
            scrollback_lines: 500,
            utf8: true,
            visual_bell: false,
            charsets: CharsetState::DEFAULT_SLOTS,
        }
    }
}

impl TerminalConfig {
    /// Default configuration with the given size
    pub fn with_size(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            ..Self::default()
        }
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: TerminalConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
