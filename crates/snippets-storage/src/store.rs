//! Snippet store over a single PostgreSQL connection
//!
//! One connection per tool invocation: acquired by [`SnippetStore::connect`]
//! at the start of an operation, released by [`SnippetStore::close`] at its
//! end. The target table is external state and is never created here; it is
//! expected to carry a uniqueness constraint on `keyword`.

use sqlx::postgres::PgConnection;
use sqlx::{ConnectOptions, Connection, Row};
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::ident::check_table_ident;
use crate::types::Snippet;

/// Client for a two-column snippet table
#[derive(Debug)]
pub struct SnippetStore {
    conn: PgConnection,
}

impl SnippetStore {
    /// Open a connection to the configured database.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connection` if the database cannot be reached.
    /// Callers treat this as fatal: every operation needs a live connection,
    /// so there is nothing useful to do but report and exit.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        debug!(database = %config.database, "connecting to PostgreSQL");

        let options = config.connect_options()?;
        let conn = options.connect().await.map_err(|e| {
            StoreError::connection(format!("could not connect to {}", config.database), e)
        })?;

        debug!("database connection established");
        Ok(Self { conn })
    }

    /// Store `message` under `keyword` in `table`, overwriting any previous
    /// message for the same keyword.
    ///
    /// The write is insert-first: a uniqueness conflict on `keyword` rolls
    /// the insert back and applies an update instead, so calling `put` twice
    /// with the same keyword always leaves exactly one row holding the
    /// latest message. This is deliberately not a native `ON CONFLICT`
    /// upsert; the conflict branch is the contract.
    ///
    /// # Errors
    ///
    /// * `StoreError::InvalidTable` - `table` is not a plain identifier;
    ///   nothing was sent to the server
    /// * `StoreError::Query` - the statement failed; the transaction was
    ///   rolled back and the table is unchanged
    pub async fn put(
        &mut self,
        table: &str,
        keyword: &str,
        message: &str,
    ) -> Result<Snippet, StoreError> {
        let table = check_table_ident(table)?;
        info!(table, keyword, "storing snippet");

        let insert = format!("INSERT INTO {table} (keyword, message) VALUES ($1, $2)");
        let mut tx = self
            .conn
            .begin()
            .await
            .map_err(|e| StoreError::query("failed to begin transaction", e))?;

        match sqlx::query(&insert)
            .bind(keyword)
            .bind(message)
            .execute(&mut *tx)
            .await
        {
            Ok(_) => {
                tx.commit()
                    .await
                    .map_err(|e| StoreError::query("insert commit failed", e))?;
            }
            Err(e) if is_unique_violation(&e) => {
                tx.rollback()
                    .await
                    .map_err(|e| StoreError::query("insert rollback failed", e))?;
                self.update(table, keyword, message).await?;
                info!(keyword, "keyword is present, converted insert to update");
            }
            Err(e) => {
                // Abort the transaction; the statement error is the one
                // worth reporting, not any rollback failure after it.
                tx.rollback().await.ok();
                return Err(StoreError::query("insert failed", e));
            }
        }

        debug!(keyword, "snippet stored");
        Ok(Snippet {
            keyword: keyword.to_string(),
            message: message.to_string(),
        })
    }

    async fn update(
        &mut self,
        table: &str,
        keyword: &str,
        message: &str,
    ) -> Result<(), StoreError> {
        let update = format!("UPDATE {table} SET message = $1 WHERE keyword = $2");
        let mut tx = self
            .conn
            .begin()
            .await
            .map_err(|e| StoreError::query("failed to begin transaction", e))?;

        match sqlx::query(&update)
            .bind(message)
            .bind(keyword)
            .execute(&mut *tx)
            .await
        {
            Ok(_) => tx
                .commit()
                .await
                .map_err(|e| StoreError::query("update commit failed", e)),
            Err(e) => {
                tx.rollback().await.ok();
                Err(StoreError::query("update failed", e))
            }
        }
    }

    /// Retrieve the snippet stored under `keyword` in `table`.
    ///
    /// Returns `Ok(None)` when no row matches. An absent snippet is a
    /// normal outcome, distinct from a stored empty message. Should the
    /// table hold more than one row for the keyword (its uniqueness
    /// constraint was dropped upstream), the first fetched row wins and
    /// the inconsistency is logged.
    ///
    /// # Errors
    ///
    /// * `StoreError::InvalidTable` - `table` is not a plain identifier
    /// * `StoreError::Query` - the select failed
    pub async fn get(&mut self, table: &str, keyword: &str) -> Result<Option<Snippet>, StoreError> {
        let table = check_table_ident(table)?;
        info!(table, keyword, "retrieving snippet");

        let select = format!("SELECT keyword, message FROM {table} WHERE keyword = $1");
        let rows = sqlx::query(&select)
            .bind(keyword)
            .fetch_all(&mut self.conn)
            .await
            .map_err(|e| StoreError::query("select failed", e))?;

        if rows.len() > 1 {
            warn!(
                keyword,
                rows = rows.len(),
                "multiple rows for keyword, first match wins"
            );
        }

        match rows.into_iter().next() {
            Some(row) => {
                debug!(keyword, "snippet retrieved");
                Ok(Some(Snippet {
                    keyword: row.get("keyword"),
                    message: row.get("message"),
                }))
            }
            None => {
                debug!(keyword, "no record with that keyword");
                Ok(None)
            }
        }
    }

    /// Close the connection, releasing it at the end of the operation.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connection` if the shutdown handshake fails.
    pub async fn close(self) -> Result<(), StoreError> {
        self.conn
            .close()
            .await
            .map_err(|e| StoreError::connection("failed to close connection", e))
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.kind() == sqlx::error::ErrorKind::UniqueViolation)
}
