//! Storage layer for the snippets CLI
//!
//! Provides a thin client for a two-column PostgreSQL table
//! (`keyword`, `message`). The table is external state: it must already
//! exist with a uniqueness constraint on `keyword`, and this crate never
//! creates or migrates it.
//!
//! # Connection Model
//!
//! One connection per operation, no pooling. [`SnippetStore::connect`]
//! acquires the connection, [`SnippetStore::close`] releases it. Nothing
//! is shared across invocations; consistency under concurrent callers
//! rests on the database's transaction isolation and the uniqueness
//! constraint on `keyword`.
//!
//! # Example
//!
//! ```no_run
//! use snippets_storage::{SnippetStore, StoreConfig};
//!
//! # async fn example() -> Result<(), snippets_storage::StoreError> {
//! let config = StoreConfig::new("snippets");
//! let mut store = SnippetStore::connect(&config).await?;
//! store.put("snippets", "greeting", "hello").await?;
//! let snippet = store.get("snippets", "greeting").await?;
//! store.close().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod ident;
mod store;
mod types;

// Re-exports
pub use config::StoreConfig;
pub use error::{BoxedError, StoreError};
pub use ident::check_table_ident;
pub use store::SnippetStore;
pub use types::Snippet;
