// Request-scoped storage session.
//
// sqlx has no change tracker, so staged mutations are an explicit buffer:
// repositories push parameterized statements here and nothing touches the
// database until the unit of work flushes the buffer inside one transaction.
// A session must not outlive the request that created it and must not be
// shared across requests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use sqlx::query::{Query, QueryAs, QueryScalar};
use sqlx::sqlite::{Sqlite, SqliteArguments};
use sqlx::SqlitePool;

/// A single bind parameter for a staged or ad-hoc statement.
#[derive(Debug, Clone)]
pub enum SqlValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
    Null,
}

impl SqlValue {
    pub fn bind_query<'q>(
        self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        match self {
            SqlValue::Text(value) => query.bind(value),
            SqlValue::Integer(value) => query.bind(value),
            SqlValue::Boolean(value) => query.bind(value),
            SqlValue::Timestamp(value) => query.bind(value),
            SqlValue::Null => query.bind(None::<String>),
        }
    }

    pub fn bind_query_as<'q, T>(
        self,
        query: QueryAs<'q, Sqlite, T, SqliteArguments<'q>>,
    ) -> QueryAs<'q, Sqlite, T, SqliteArguments<'q>> {
        match self {
            SqlValue::Text(value) => query.bind(value),
            SqlValue::Integer(value) => query.bind(value),
            SqlValue::Boolean(value) => query.bind(value),
            SqlValue::Timestamp(value) => query.bind(value),
            SqlValue::Null => query.bind(None::<String>),
        }
    }

    pub fn bind_query_scalar<'q, T>(
        self,
        query: QueryScalar<'q, Sqlite, T, SqliteArguments<'q>>,
    ) -> QueryScalar<'q, Sqlite, T, SqliteArguments<'q>> {
        match self {
            SqlValue::Text(value) => query.bind(value),
            SqlValue::Integer(value) => query.bind(value),
            SqlValue::Boolean(value) => query.bind(value),
            SqlValue::Timestamp(value) => query.bind(value),
            SqlValue::Null => query.bind(None::<String>),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Integer(i64::from(value))
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Boolean(value)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(value: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(value)
    }
}

/// A mutation staged by a repository, executed later by the unit of work.
#[derive(Debug)]
pub struct StagedMutation {
    pub(crate) sql: String,
    pub(crate) binds: Vec<SqlValue>,
}

impl StagedMutation {
    pub(crate) async fn execute(
        self,
        tx: &mut sqlx::Transaction<'static, Sqlite>,
    ) -> Result<u64, sqlx::Error> {
        let StagedMutation { sql, binds } = self;
        let mut query = sqlx::query(&sql);
        for value in binds {
            query = value.bind_query(query);
        }
        Ok(query.execute(&mut **tx).await?.rows_affected())
    }
}

/// Storage context for one request. All repositories built over the same
/// session stage into the same pending buffer and are flushed together.
pub struct DbSession {
    pool: SqlitePool,
    pending: Mutex<Vec<StagedMutation>>,
}

impl DbSession {
    pub fn new(pool: SqlitePool) -> Arc<Self> {
        Arc::new(Self {
            pool,
            pending: Mutex::new(Vec::new()),
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub(crate) fn stage(&self, mutation: StagedMutation) {
        self.lock_pending().push(mutation);
    }

    pub(crate) fn drain(&self) -> Vec<StagedMutation> {
        self.lock_pending().drain(..).collect()
    }

    /// Number of mutations waiting for the next commit.
    pub fn pending_count(&self) -> usize {
        self.lock_pending().len()
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Vec<StagedMutation>> {
        // A poisoned lock only means another staging call panicked; the
        // buffer itself is still coherent.
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
