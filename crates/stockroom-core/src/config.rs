//! # Store Configuration
//!
//! Settings that change how a [`Store`](crate::Store) processes orders.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOCKROOM_ORDER_MODE=atomic                                        │
//! │     STOCKROOM_MAX_ORDER_LINES=50                                       │
//! │                                                                         │
//! │  2. TOML Config File (path supplied by the caller)                     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     OrderMode::Sequential, 100 lines per order                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [order]
//! mode = "sequential"  # sequential | atomic
//! max_lines = 100
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::DEFAULT_MAX_ORDER_LINES;

/// Environment variable overriding [`OrderSettings::mode`].
pub const ENV_ORDER_MODE: &str = "STOCKROOM_ORDER_MODE";

/// Environment variable overriding [`OrderSettings::max_lines`].
pub const ENV_MAX_ORDER_LINES: &str = "STOCKROOM_MAX_ORDER_LINES";

// =============================================================================
// Order Mode
// =============================================================================

/// How a multi-line order is applied.
///
/// ## Mode Comparison
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Order: [(Widget, 2), (Widget, 10)]   Widget stock: 2                   │
/// │                                                                         │
/// │  SEQUENTIAL (Default)               │  ATOMIC                           │
/// │  ────────────────────               │  ──────                           │
/// │  line 1: buy 2 → stock 0            │  plan: Widget needs 12, has 2     │
/// │  line 2: buy 10 → fails             │  → fails before any debit         │
/// │  → OrderFailed, stock stays 0       │  → OrderFailed, stock stays 2     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderMode {
    /// Debit line by line; earlier lines stay debited when a later one fails.
    #[default]
    Sequential,

    /// Check every line against current stock first; debit only if all fit.
    Atomic,
}

impl std::fmt::Display for OrderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderMode::Sequential => write!(f, "sequential"),
            OrderMode::Atomic => write!(f, "atomic"),
        }
    }
}

impl std::str::FromStr for OrderMode {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequential" | "partial" => Ok(OrderMode::Sequential),
            "atomic" | "transactional" => Ok(OrderMode::Atomic),
            other => Err(StoreError::InvalidConfig(format!(
                "Unknown order mode: '{}'. Valid options: sequential, atomic",
                other
            ))),
        }
    }
}

// =============================================================================
// Order Settings
// =============================================================================

/// Order processing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSettings {
    #[serde(default)]
    pub mode: OrderMode,

    /// Maximum number of lines accepted in one order.
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,
}

fn default_max_lines() -> usize {
    DEFAULT_MAX_ORDER_LINES
}

impl Default for OrderSettings {
    fn default() -> Self {
        OrderSettings {
            mode: OrderMode::default(),
            max_lines: default_max_lines(),
        }
    }
}

// =============================================================================
// Store Configuration
// =============================================================================

/// Complete store configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub order: OrderSettings,
}

impl StoreConfig {
    /// Default configuration with the given order mode.
    pub fn with_order_mode(mode: OrderMode) -> Self {
        StoreConfig {
            order: OrderSettings {
                mode,
                ..OrderSettings::default()
            },
        }
    }

    /// Parses a TOML document and validates it. No environment overrides.
    pub fn from_toml_str(contents: &str) -> StoreResult<Self> {
        let config: StoreConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file, if `config_path` is given and exists
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`load`](Self::load) with an explicit variable source.
    fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> StoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides(lookup)?;
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns the default if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        if self.order.max_lines == 0 {
            return Err(StoreError::InvalidConfig(
                "order.max_lines must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Applies overrides from a variable source.
    ///
    /// `lookup` is `std::env::var` in production; tests pass a map.
    fn apply_env_overrides<F>(&mut self, lookup: F) -> StoreResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup(ENV_ORDER_MODE) {
            debug!(mode = %mode, "Overriding order mode from environment");
            self.order.mode = mode.parse()?;
        }

        if let Some(max_lines) = lookup(ENV_MAX_ORDER_LINES) {
            let parsed = max_lines.trim().parse::<usize>().map_err(|_| {
                StoreError::InvalidConfig(format!(
                    "{} must be a positive integer, got '{}'",
                    ENV_MAX_ORDER_LINES, max_lines
                ))
            })?;
            debug!(max_lines = parsed, "Overriding max order lines from environment");
            self.order.max_lines = parsed;
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
