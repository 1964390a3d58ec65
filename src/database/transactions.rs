// ABOUTME: Transaction management with an RAII guard for multi-statement writes
// ABOUTME: Guarantees automatic rollback when a composite write fails mid-flight
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

//! Transaction management with an RAII guard
//!
//! Every composite write (menu item create/update/delete, addon bulk
//! replace, actor creation with location validation) runs its statements
//! against a [`TransactionGuard`]. The guard wraps a sqlx transaction and
//! enforces the all-or-nothing contract:
//!
//! - dropping the guard without calling [`TransactionGuard::commit`] rolls
//!   the transaction back, so every early `?` return is a full rollback
//! - `commit` consumes the guard, preventing double-commit
//!
//! ```text
//! let tx = pool.begin().await?;
//! let mut guard = TransactionGuard::new(tx);
//!
//! sqlx::query("INSERT INTO menumaster ...").execute(guard.executor()?).await?;
//! sqlx::query("INSERT INTO menu_details ...").execute(guard.executor()?).await?;
//!
//! // If this line is not reached, nothing above is visible to any reader.
//! guard.commit().await?;
//! ```

use sqlx::{Sqlite, SqliteConnection, Transaction};
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};

/// RAII guard for `SQLite` transactions ensuring automatic rollback on drop
pub struct TransactionGuard<'c> {
    transaction: Option<Transaction<'c, Sqlite>>,
    committed: bool,
}

impl<'c> TransactionGuard<'c> {
    /// Create a new transaction guard from a transaction obtained via
    /// `pool.begin().await`
    #[must_use]
    pub fn new(transaction: Transaction<'c, Sqlite>) -> Self {
        debug!("TransactionGuard created - transaction will auto-rollback if not committed");
        Self {
            transaction: Some(transaction),
            committed: false,
        }
    }

    /// Get the underlying connection for executing queries
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction has already been committed or
    /// rolled back. This indicates a programming error where the guard is
    /// used after being consumed.
    pub fn executor(&mut self) -> AppResult<&mut SqliteConnection> {
        self.transaction.as_deref_mut().ok_or_else(|| {
            AppError::internal("Transaction already consumed - guard used after commit/rollback")
        })
    }

    /// Commit the transaction and consume the guard
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction was already consumed or the
    /// database commit operation fails
    pub async fn commit(mut self) -> AppResult<()> {
        match self.transaction.take() {
            Some(tx) => {
                tx.commit()
                    .await
                    .map_err(|e| AppError::database(format!("Transaction commit failed: {e}")))?;
                self.committed = true;
                debug!("TransactionGuard committed successfully");
                Ok(())
            }
            None => Err(AppError::internal(
                "Transaction already consumed - cannot commit",
            )),
        }
    }

    /// Explicitly roll back the transaction and consume the guard.
    ///
    /// Dropping the guard rolls back too; this method exists for paths that
    /// want to surface a rollback failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the rollback operation fails
    pub async fn rollback(mut self) -> AppResult<()> {
        match self.transaction.take() {
            Some(tx) => {
                tx.rollback()
                    .await
                    .map_err(|e| AppError::database(format!("Transaction rollback failed: {e}")))?;
                debug!("TransactionGuard rolled back explicitly");
                Ok(())
            }
            None => Err(AppError::internal(
                "Transaction already consumed - cannot rollback",
            )),
        }
    }

    /// Check if the transaction has been committed
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        self.committed
    }
}

impl Drop for TransactionGuard<'_> {
    fn drop(&mut self) {
        if self.transaction.is_some() && !self.committed {
            // sqlx rolls the inner transaction back on drop; log for observability
            warn!("TransactionGuard dropped without commit - transaction will be rolled back");
        }
    }
}
