//! Core data types

/// A stored snippet: a keyword and its message body.
///
/// Mirrors the two-column table this tool operates on. At most one row per
/// keyword exists at any time; `put` overwrites the message in place and
/// nothing ever deletes a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Unique identifier, the table's primary key
    pub keyword: String,
    /// The stored text body
    pub message: String,
}
