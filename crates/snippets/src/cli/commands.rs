//! Command handlers for the snippets CLI.
//!
//! Bridge parsed CLI arguments to store operations and print the
//! user-facing result. Handlers return the exit code for outcomes that are
//! not errors (a `get` miss); store errors propagate to the caller.

use snippets_storage::{SnippetStore, StoreError};

use crate::cli::error::{EXIT_NOT_FOUND, EXIT_SUCCESS};

pub async fn put(
    store: &mut SnippetStore,
    table: &str,
    name: &str,
    snippet: &str,
) -> Result<u8, StoreError> {
    store.put(table, name, snippet).await?;
    // Success is silent; the stored snippet is in the log
    Ok(EXIT_SUCCESS)
}

pub async fn get(store: &mut SnippetStore, table: &str, name: &str) -> Result<u8, StoreError> {
    match store.get(table, name).await? {
        Some(snippet) => {
            println!("Retrieved snippet: {:?}", snippet.message);
            Ok(EXIT_SUCCESS)
        }
        None => {
            eprintln!("No record with keyword {name}");
            println!("Retrieved snippet: None");
            Ok(EXIT_NOT_FOUND)
        }
    }
}
