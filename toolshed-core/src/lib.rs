//! # Toolshed Core
//!
//! Inventory and access-control core for the shared tool-lending registry.
//! This crate owns the data model, the registry operations, and the search
//! engine; the interactive client in `toolshed-cli` is thin glue over it.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their registry operations
//! - `search`: Filter predicates composed over the tool registry
//! - `session`: Proof-of-login value passed to owner-scoped operations
//! - `db`: Connection pool and migrations
//! - `error`: Common error types
//!
//! ## Outcome convention
//!
//! Every registry operation resolves to one of three classes:
//!
//! - `Ok(true)` — Success
//! - `Ok(false)` — Rejected: a business-rule precondition failed
//!   (duplicate name, not the owner, no such barcode). Recoverable by
//!   retrying with different input.
//! - `Err(RegistryError)` — an unexpected fault from the store.
//!
//! Rejections are values, never errors; no operation lets a store fault
//! escape as a panic.

pub mod db;
pub mod error;
pub mod models;
pub mod search;
pub mod session;

pub use error::{RegistryError, RegistryResult};
pub use session::AuthenticatedSession;

/// Current version of the toolshed core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
