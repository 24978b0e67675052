//! Configuration system for groundbook.
//!
//! This module provides layered configuration with support for:
//! - A YAML user configuration file (`<data-dir>/config.yaml`)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of the merged result
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`GROUNDBOOK_*`)
//! 3. User config (`~/.groundbook/config.yaml` or `$GROUNDBOOK_DATA_DIR/config.yaml`)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use groundbook::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_data_dir(Path::new("/srv/groundbook"))
//!     .build()
//!     .unwrap();
//! println!("store backend: {}", config.backend());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, CONFIG_FILE};
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat, StorageConfig, ValidationConfig};
pub use validator::ConfigValidator;
