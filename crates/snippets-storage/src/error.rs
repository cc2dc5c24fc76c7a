//! Storage error types

use std::error::Error as StdError;
use thiserror::Error;

/// Boxed error for wrapping driver-specific errors
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Storage layer errors
///
/// A uniqueness conflict on `put` is not represented here: it is recovered
/// locally by converting the insert into an update. Likewise a `get` miss
/// is a normal `Ok(None)` outcome, not an error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection failure
    #[error("connection failed: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<BoxedError>,
    },

    /// Query execution failure
    #[error("query failed: {message}")]
    Query {
        message: String,
        #[source]
        source: Option<BoxedError>,
    },

    /// Table name rejected before any SQL was built
    #[error("invalid table name: {0:?}")]
    InvalidTable(String),
}

impl StoreError {
    /// Create a connection error with source
    pub fn connection(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Connection {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a query error with source
    pub fn query(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Query {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
