//! Error types for the sidebar engine.
//!
//! Item and selection operations report unknown items through `bool` and
//! `Option` returns. [`SidebarError`] covers the fallible edges: reading and
//! validating configuration.

use std::path::PathBuf;

/// Result type alias for sidebar operations.
pub type Result<T> = std::result::Result<T, SidebarError>;

/// Errors that can occur while setting up a sidebar.
#[derive(Debug, thiserror::Error)]
pub enum SidebarError {
    /// File I/O error.
    #[error("Failed to read sidebar config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("Sidebar config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("Sidebar config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// A setting has an unusable value.
    #[error("Invalid value for '{field}': {message}")]
    InvalidConfig {
        field: &'static str,
        message: String,
    },
}

impl SidebarError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a validation error.
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }
}
