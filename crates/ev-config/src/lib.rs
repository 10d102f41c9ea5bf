//! envveil settings loading and validation.
//!
//! This crate provides:
//! - A typed [`Settings`] struct for the settings.json file
//! - Path resolution (env → XDG → system → defaults)
//! - Semantic validation with non-fatal issues
//!
//! Settings only carry data; the overlay engine in `ev-overlay` interprets
//! feature names and env-file patterns.

pub mod error;
pub mod resolve;
pub mod settings;
pub mod validate;

pub use error::{ConfigError, Result};
pub use resolve::{load_settings, resolve_settings_path, ConfigSource, SettingsPath};
pub use settings::{Settings, SETTINGS_SCHEMA_VERSION};
pub use validate::{validate, IssueKind, ValidationIssue};
