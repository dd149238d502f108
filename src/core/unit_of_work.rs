use std::sync::Arc;

use sqlx::sqlite::Sqlite;
use sqlx::Transaction;

use crate::core::error::AppResult;
use crate::core::session::DbSession;

/// Commits the mutations staged on a session as one atomic write.
///
/// All repositories built over the same session share its pending buffer,
/// so a single `complete` flushes every staged add/update/delete across
/// entity types together. A rejected commit surfaces the store error
/// unchanged; nothing is retried.
pub struct UnitOfWork {
    session: Arc<DbSession>,
}

impl UnitOfWork {
    pub fn new(session: Arc<DbSession>) -> Self {
        Self { session }
    }

    /// Flush all staged mutations in one transaction. Returns whether any
    /// row was affected; with nothing staged this is `Ok(false)`.
    pub async fn complete(&self) -> AppResult<bool> {
        let staged = self.session.drain();
        if staged.is_empty() {
            return Ok(false);
        }

        let mut tx = self.session.pool().begin().await?;
        let mut affected = 0u64;
        for mutation in staged {
            affected += mutation.execute(&mut tx).await?;
        }
        tx.commit().await?;

        Ok(affected > 0)
    }

    /// Open an explicit transaction for multi-step work. The caller must
    /// commit or roll back the handle; dropping it rolls back.
    pub async fn begin_transaction(&self) -> AppResult<Transaction<'static, Sqlite>> {
        Ok(self.session.pool().begin().await?)
    }

    /// Flush the staged buffer inside a caller-owned transaction, so
    /// staged writes can interleave with other statements in the same
    /// scope. The transaction's fate stays with the caller.
    pub async fn complete_within(
        &self,
        tx: &mut Transaction<'static, Sqlite>,
    ) -> AppResult<bool> {
        let staged = self.session.drain();
        let mut affected = 0u64;
        for mutation in staged {
            affected += mutation.execute(tx).await?;
        }
        Ok(affected > 0)
    }
}
