//! Shared types, error model, and configuration for SiteNav.
//!
//! This crate is the foundation depended on by all other SiteNav crates.
//! It provides:
//! - [`SiteNavError`]: the unified error type
//! - Domain types ([`Page`])
//! - Configuration ([`AppConfig`], [`WidgetConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, FallbackLink, HttpConfig, SiteConfig, TopLevelConfig, WidgetConfig, WidgetSettings,
    config_dir, config_file_path, init_config, load_config, load_config_from, validate_config,
};
pub use error::{Result, SiteNavError};
pub use types::Page;
