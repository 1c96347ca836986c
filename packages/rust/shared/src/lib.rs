//! Shared types, error model, and configuration for blockport.
//!
//! This crate is the foundation depended on by all other blockport crates.
//! It provides:
//! - [`BlockportError`] — the unified error type
//! - Domain types ([`ImportManifest`], [`PageRecord`], [`JobId`])
//! - Configuration ([`AppConfig`], [`ImportOptions`], config loading)
//! - The root-relative link rewriter ([`links`])

pub mod config;
pub mod error;
pub mod links;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, ImportOptions, ImportPoliciesConfig, NavConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{BlockportError, Result};
pub use types::{CURRENT_SCHEMA_VERSION, ImportManifest, JobId, PageRecord};
