//! Sidebar configuration.
//!
//! [`SidebarConfig`] can be built in code or read from TOML. Every field has
//! a default, so a config file only needs the settings it changes:
//!
//! ```toml
//! selection_mode = "toggle_many"
//! hold_threshold_ms = 250
//! ```

use std::path::Path;
use std::time::Duration;

use fat_sidebar_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SidebarError};
use crate::model::{PeerDeselection, SelectionMode, SelectionPolicy};

/// Default time a press must be held before it becomes a drag.
pub const DEFAULT_HOLD_THRESHOLD_MS: u64 = 400;

/// Default item height used by the uniform metrics.
pub const DEFAULT_ITEM_EXTENT: f32 = 64.0;

/// Settings for a [`Sidebar`](crate::Sidebar).
///
/// # Example
///
/// ```
/// use fat_sidebar::SidebarConfig;
/// use fat_sidebar::model::SelectionMode;
///
/// let config = SidebarConfig::from_toml_str(r#"selection_mode = "push""#).unwrap();
/// assert_eq!(config.selection_mode, SelectionMode::Push);
/// assert_eq!(config.hold_threshold_ms, 400);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarConfig {
    /// How clicks affect the selection.
    pub selection_mode: SelectionMode,
    /// Ordering of forced peer deselection in single-selection toggles.
    pub peer_deselection: PeerDeselection,
    /// Hold time in milliseconds before a press becomes a drag.
    pub hold_threshold_ms: u64,
    /// Item height for the default uniform metrics.
    pub item_extent: f32,
    /// Whether the rendering layer should animate overlays and drops.
    pub animated: bool,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            selection_mode: SelectionMode::default(),
            peer_deselection: PeerDeselection::default(),
            hold_threshold_ms: DEFAULT_HOLD_THRESHOLD_MS,
            item_extent: DEFAULT_ITEM_EXTENT,
            animated: false,
        }
    }
}

impl SidebarConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| SidebarError::io(path, e))?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    /// Serializes to a TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Checks that the values are usable.
    pub fn validate(&self) -> Result<()> {
        if self.hold_threshold_ms == 0 {
            return Err(SidebarError::invalid_config(
                "hold_threshold_ms",
                "must be greater than zero",
            ));
        }
        if !self.item_extent.is_finite() || self.item_extent <= 0.0 {
            return Err(SidebarError::invalid_config(
                "item_extent",
                format!("must be a positive number, got {}", self.item_extent),
            ));
        }
        Ok(())
    }

    /// Hold threshold as a duration.
    pub fn hold_threshold(&self) -> Duration {
        Duration::from_millis(self.hold_threshold_ms)
    }

    /// The selection settings.
    pub fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy {
            mode: self.selection_mode,
            peer_deselection: self.peer_deselection,
        }
    }

    /// Sets the selection mode.
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Sets the peer deselection ordering.
    pub fn with_peer_deselection(mut self, peer_deselection: PeerDeselection) -> Self {
        self.peer_deselection = peer_deselection;
        self
    }

    /// Sets the hold threshold.
    pub fn with_hold_threshold(mut self, threshold: Duration) -> Self {
        self.hold_threshold_ms = u64::try_from(threshold.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the uniform item extent.
    pub fn with_item_extent(mut self, extent: f32) -> Self {
        self.item_extent = extent;
        self
    }

    /// Sets whether changes are animated.
    pub fn with_animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }
}
