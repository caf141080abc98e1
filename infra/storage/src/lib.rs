//! A small persistent key/value store for session state.
//!
//! [`LocalStore`] plays the role browser `localStorage` plays for a web front end:
//! string keys, string values, synchronous reads. Writes update the in-memory map
//! first and are then flushed to a single JSON file.
//!
//! # Core Features
//!
//! - **Atomic Writes**: unique temp file + `fsync` + `rename`, so a crash never leaves a
//!   half-written session file behind.
//! - **Self-Healing**: orphaned temp files from earlier crashes are removed on open, and
//!   an unreadable session file is treated as empty (the user simply logs in again).
//! - **Ephemeral Mode**: [`LocalStore::in_memory`] keeps everything in the process.
//!
//! # Example
//!
//! ```rust
//! use fdesk_storage::{LocalStore, StorageError};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), StorageError> {
//!     # let tmp = tempfile::tempdir().unwrap();
//!     # let path = tmp.path().join("session.json");
//!     let store = LocalStore::builder().path(&path).open().await?;
//!
//!     store.set("access_token", "abc").await?;
//!     assert_eq!(store.get("access_token").as_deref(), Some("abc"));
//!     assert_eq!(store.first_of(&["token", "access_token"]).as_deref(), Some("abc"));
//!
//!     let reopened = LocalStore::builder().path(&path).open().await?;
//!     assert_eq!(reopened.get("access_token").as_deref(), Some("abc"));
//!     Ok(())
//! }
//! ```

mod builder;
mod engine;
mod error;
mod maintenance;

pub use crate::builder::{LocalStoreBuilder, NoPath, WithPath};
pub use crate::engine::{LocalStore, LocalStoreInner};
pub use crate::error::{StorageError, StorageErrorExt};
