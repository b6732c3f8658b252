//! # catpoint-adapter-storage-json
//!
//! File persistence adapter: the whole security state lives in one JSON
//! document, mirrored in memory.
//!
//! ## Responsibilities
//! - Implement the `SecurityRepository` port defined in `catpoint-app::ports`
//! - Load the state file on startup (a missing file means a fresh system)
//! - Rewrite the file atomically after every change
//!
//! ## Dependency rule
//! Depends on `catpoint-app` (for port traits) and `catpoint-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod config;
pub mod error;
pub mod security_repo;

mod state;

pub use config::Config;
pub use error::StorageError;
pub use security_repo::JsonSecurityRepository;
