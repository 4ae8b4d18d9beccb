//! Configuration loading and management for the hours reconciler.
//!
//! This module provides the policy structure passed into every component
//! (cutoff, break rule, match threshold, category filter, denylist, alias
//! table) and a loader for YAML overrides.
//!
//! # Example
//!
//! ```no_run
//! use hours_reconciler::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/reconcile.yaml").unwrap();
//! println!("Overnight cutoff: {}", config.overnight_cutoff);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BlockTokens, ParsePolicy, ReconcileConfig};
