use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;

use crate::core::error::AppResult;
use crate::core::session::{DbSession, SqlValue};

/// Contract every persisted type fulfills so the generic repository can
/// query and mutate it. Ids are UUID text, immutable after creation;
/// `is_deleted` and `is_active` drive soft delete and the active toggle.
#[async_trait]
pub trait Entity:
    Clone + Send + Sync + Unpin + for<'r> sqlx::FromRow<'r, SqliteRow> + 'static
{
    const TABLE: &'static str;

    /// Column names, in the order produced by [`Entity::row_values`].
    /// The first column is always `id`.
    fn columns() -> &'static [&'static str];

    /// Column used for ordering when a listing request names none.
    fn default_sort_column() -> &'static str;

    /// Relation names callers may ask to expand.
    fn relations() -> &'static [&'static str] {
        &[]
    }

    fn id(&self) -> &str;

    fn is_deleted(&self) -> bool;

    fn set_deleted(&mut self, deleted: bool);

    fn is_active(&self) -> bool;

    fn set_active(&mut self, active: bool);

    /// Bind values for INSERT/UPDATE, aligned with [`Entity::columns`].
    fn row_values(&self) -> Vec<SqlValue>;

    /// Attach one declared relation to every entity in `items`, using a
    /// single batched query. Called only with names from
    /// [`Entity::relations`].
    async fn load_relation(
        _items: &mut [Self],
        _relation: &str,
        _session: &DbSession,
    ) -> AppResult<()> {
        Ok(())
    }
}

/// Relation-expansion selector for listing and lookup calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Expand {
    /// No related data (the default).
    #[default]
    None,
    /// Every relation the entity declares.
    All,
    /// An explicit subset of declared relation names.
    Only(Vec<String>),
}

impl Expand {
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expand::Only(names.into_iter().map(Into::into).collect())
    }

    /// Parse the `expand` query parameter: absent or empty means no
    /// expansion, `all` means everything, otherwise a comma-separated
    /// list of relation names.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Expand::None,
            Some("all") => Expand::All,
            Some(list) => Expand::Only(
                list.split(',')
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty())
                    .collect(),
            ),
        }
    }
}
