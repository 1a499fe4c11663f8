//! # wealthsync-core
//!
//! Core types, traits, and abstractions for the wealthsync workspace.
//!
//! This crate provides the foundational data structures, the error taxonomy,
//! startup configuration, and the collaborator trait seams that the other
//! wealthsync crates depend on.

pub mod config;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use config::{ProviderCredentials, ServerConfig, UnsupportedPolicy};
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
