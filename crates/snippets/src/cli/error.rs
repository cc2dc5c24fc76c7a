//! Exit-code policy and error formatting for the CLI.
//!
//! The historical tool exited 0 even when the underlying operation failed,
//! so automation could not tell a missing keyword from a dead database.
//! Codes here follow Unix conventions instead:
//!
//! * 0 - operation completed (put stored or updated; get found the keyword)
//! * 1 - operational failure: connection or query error
//! * 2 - usage error: bad arguments, bad configuration, or a rejected
//!   table name
//! * 3 - get: no record with that keyword

use snippets_storage::StoreError;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE: u8 = 2;
pub const EXIT_NOT_FOUND: u8 = 3;

/// Convert a store error to a user-friendly console message
pub fn format_store_error(err: &StoreError) -> String {
    match err {
        StoreError::Connection { .. } => format!("Connection error: {err}"),
        StoreError::Query { .. } => format!("Error with SQL statement: {err}"),
        StoreError::InvalidTable(name) => format!("Invalid table name: {name:?}"),
    }
}

/// Get the exit code for a failed store operation
pub fn exit_code_for_error(err: &StoreError) -> u8 {
    match err {
        StoreError::InvalidTable(_) => EXIT_USAGE,
        StoreError::Connection { .. } | StoreError::Query { .. } => EXIT_ERROR,
    }
}
