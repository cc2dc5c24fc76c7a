//! Table identifier validation
//!
//! The table name is supplied by the caller per operation and cannot
//! travel as a bind parameter, so it is spliced into the SQL text.
//! Validation happens before any statement is built: a malformed name is
//! rejected here and never reaches the server.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::StoreError;

// Unquoted PostgreSQL identifier: letter or underscore, then letters,
// digits, underscores, or dollar signs.
static IDENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_$]*$").unwrap());

/// Maximum identifier length PostgreSQL accepts (NAMEDATALEN - 1).
const MAX_IDENT_LEN: usize = 63;

/// Validates a table name, optionally schema-qualified (`schema.table`).
///
/// Returns the name unchanged on success. The name stays unquoted in the
/// generated SQL, so it case-folds exactly as it would in `psql`.
///
/// # Errors
/// `StoreError::InvalidTable` if the name is empty, has more than two
/// dot-separated parts, or any part is not a plain identifier.
pub fn check_table_ident(table: &str) -> Result<&str, StoreError> {
    let parts: Vec<&str> = table.split('.').collect();
    if parts.is_empty() || parts.len() > 2 {
        return Err(StoreError::InvalidTable(table.to_string()));
    }

    for part in parts {
        if part.len() > MAX_IDENT_LEN || !IDENT_REGEX.is_match(part) {
            return Err(StoreError::InvalidTable(table.to_string()));
        }
    }

    Ok(table)
}
