// Generic data access for one entity type.
//
// Reads go straight to the pool; every mutation is staged on the session
// and only hits the database when the unit of work commits. The
// repository performs no entity-level validation: constraint violations
// surface at commit time.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::core::entity::{Entity, Expand};
use crate::core::error::{AppError, AppResult};
use crate::core::filter::Filter;
use crate::core::query::{QueryResult, QuerySpec};
use crate::core::session::{DbSession, SqlValue, StagedMutation};

pub struct Repository<T: Entity> {
    session: Arc<DbSession>,
    _entity: PhantomData<T>,
}

impl<T: Entity> Repository<T> {
    pub fn new(session: Arc<DbSession>) -> Self {
        Self {
            session,
            _entity: PhantomData,
        }
    }

    /// Filtered, sorted, paged listing. `total_items` is counted over the
    /// filtered set before paging; soft-deleted rows are excluded unless
    /// the filter opts in. A page past the end yields empty items, not an
    /// error.
    pub async fn get_all(
        &self,
        filter: Option<&Filter>,
        spec: Option<&QuerySpec>,
        expand: &Expand,
    ) -> AppResult<QueryResult<T>> {
        let match_all = Filter::default();
        let filter = filter.unwrap_or(&match_all);
        let (where_sql, binds) = self.listing_where(filter)?;

        let count_sql = format!("SELECT COUNT(*) FROM {}{}", T::TABLE, where_sql);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for value in binds.clone() {
            count_query = value.bind_query_scalar(count_query);
        }
        let total_items = count_query.fetch_one(self.session.pool()).await?;

        let default_spec = QuerySpec::default();
        let spec = spec.unwrap_or(&default_spec);
        let order_sql = spec.order_clause(T::columns(), T::default_sort_column())?;
        let select_sql = format!(
            "SELECT {} FROM {}{} ORDER BY {} LIMIT ? OFFSET ?",
            T::columns().join(", "),
            T::TABLE,
            where_sql,
            order_sql,
        );
        let mut query = sqlx::query_as::<_, T>(&select_sql);
        for value in binds {
            query = value.bind_query_as(query);
        }
        query = query.bind(spec.limit()).bind(spec.offset());
        let mut items = query.fetch_all(self.session.pool()).await?;

        self.expand_items(&mut items, expand).await?;
        Ok(QueryResult { items, total_items })
    }

    /// Count matching rows regardless of soft-delete state (audit parity).
    pub async fn get_count(&self, filter: &Filter) -> AppResult<i64> {
        let (fragments, binds) = filter.to_sql(T::columns())?;
        let sql = format!(
            "SELECT COUNT(*) FROM {}{}",
            T::TABLE,
            Self::where_clause(&fragments),
        );
        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for value in binds {
            query = value.bind_query_scalar(query);
        }
        Ok(query.fetch_one(self.session.pool()).await?)
    }

    /// Lookup by id. Soft-deleted rows are still returned here so audit
    /// callers can reach them; absence is `None`, never an error.
    pub async fn get_by_id(&self, id: &str, expand: &Expand) -> AppResult<Option<T>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?",
            T::columns().join(", "),
            T::TABLE,
        );
        let found = sqlx::query_as::<_, T>(&sql)
            .bind(id.to_string())
            .fetch_optional(self.session.pool())
            .await?;

        match found {
            Some(entity) => {
                let mut items = vec![entity];
                self.expand_items(&mut items, expand).await?;
                Ok(items.pop())
            }
            None => Ok(None),
        }
    }

    /// First row matching the filter. Callers are responsible for
    /// predicates that select at most one row; extra matches are not
    /// reported.
    pub async fn get_single(&self, filter: &Filter, expand: &Expand) -> AppResult<Option<T>> {
        let (where_sql, binds) = self.listing_where(filter)?;
        let sql = format!(
            "SELECT {} FROM {}{} LIMIT 1",
            T::columns().join(", "),
            T::TABLE,
            where_sql,
        );
        let mut query = sqlx::query_as::<_, T>(&sql);
        for value in binds {
            query = value.bind_query_as(query);
        }
        let found = query.fetch_optional(self.session.pool()).await?;

        match found {
            Some(entity) => {
                let mut items = vec![entity];
                self.expand_items(&mut items, expand).await?;
                Ok(items.pop())
            }
            None => Ok(None),
        }
    }

    pub async fn exists(&self, filter: &Filter) -> AppResult<bool> {
        let (fragments, binds) = filter.to_sql(T::columns())?;
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {}{})",
            T::TABLE,
            Self::where_clause(&fragments),
        );
        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for value in binds {
            query = value.bind_query_scalar(query);
        }
        Ok(query.fetch_one(self.session.pool()).await? != 0)
    }

    /// Stage an INSERT for a new entity. Nothing is written until the
    /// unit of work commits.
    pub fn add(&self, entity: &T) {
        let placeholders = vec!["?"; T::columns().len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            T::TABLE,
            T::columns().join(", "),
            placeholders,
        );
        self.session.stage(StagedMutation {
            sql,
            binds: entity.row_values(),
        });
    }

    pub fn add_many(&self, entities: &[T]) {
        for entity in entities {
            self.add(entity);
        }
    }

    /// Stage an UPDATE of every column except the immutable id.
    pub fn update(&self, entity: &T) {
        let assignments: Vec<String> = T::columns()
            .iter()
            .filter(|column| **column != "id")
            .map(|column| format!("{} = ?", column))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?",
            T::TABLE,
            assignments.join(", "),
        );

        let mut binds = Vec::with_capacity(T::columns().len());
        for (column, value) in T::columns().iter().zip(entity.row_values()) {
            if *column != "id" {
                binds.push(value);
            }
        }
        binds.push(SqlValue::Text(entity.id().to_string()));

        self.session.stage(StagedMutation { sql, binds });
    }

    pub fn update_many(&self, entities: &[T]) {
        for entity in entities {
            self.update(entity);
        }
    }

    /// Stage a flip of `is_active`. The flip happens inside the store in a
    /// single statement, so concurrent togglers cannot lose an update.
    pub fn toggle_active(&self, id: &str) {
        let sql = format!(
            "UPDATE {} SET is_active = NOT is_active WHERE id = ?",
            T::TABLE,
        );
        self.session.stage(StagedMutation {
            sql,
            binds: vec![SqlValue::Text(id.to_string())],
        });
    }

    /// Flip `is_active` on an entity already in hand and stage the full
    /// update.
    pub fn toggle_active_entity(&self, entity: &mut T) {
        entity.set_active(!entity.is_active());
        self.update(entity);
    }

    /// Stage a soft delete. Idempotent: repeating it leaves the flag set.
    pub fn soft_delete(&self, id: &str) {
        let sql = format!("UPDATE {} SET is_deleted = TRUE WHERE id = ?", T::TABLE);
        self.session.stage(StagedMutation {
            sql,
            binds: vec![SqlValue::Text(id.to_string())],
        });
    }

    pub fn soft_delete_entity(&self, entity: &mut T) {
        entity.set_deleted(true);
        self.update(entity);
    }

    /// Stage a permanent removal. Distinct from soft delete; only the
    /// purge paths use this.
    pub fn hard_delete(&self, id: &str) {
        let sql = format!("DELETE FROM {} WHERE id = ?", T::TABLE);
        self.session.stage(StagedMutation {
            sql,
            binds: vec![SqlValue::Text(id.to_string())],
        });
    }

    pub fn hard_delete_entity(&self, entity: &T) {
        self.hard_delete(entity.id());
    }

    pub fn hard_delete_many(&self, entities: &[T]) {
        for entity in entities {
            self.hard_delete(entity.id());
        }
    }

    fn where_clause(fragments: &[String]) -> String {
        if fragments.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", fragments.join(" AND "))
        }
    }

    fn listing_where(&self, filter: &Filter) -> AppResult<(String, Vec<SqlValue>)> {
        let (mut fragments, binds) = filter.to_sql(T::columns())?;
        if !filter.includes_deleted() {
            fragments.push("is_deleted = FALSE".to_string());
        }
        Ok((Self::where_clause(&fragments), binds))
    }

    async fn expand_items(&self, items: &mut [T], expand: &Expand) -> AppResult<()> {
        if items.is_empty() {
            return Ok(());
        }
        let names: Vec<&str> = match expand {
            Expand::None => return Ok(()),
            Expand::All => T::relations().to_vec(),
            Expand::Only(selected) => {
                for name in selected {
                    if !T::relations().contains(&name.as_str()) {
                        return Err(AppError::validation(format!(
                            "Unknown relation '{}' for {}",
                            name,
                            T::TABLE,
                        )));
                    }
                }
                selected.iter().map(String::as_str).collect()
            }
        };
        for name in names {
            T::load_relation(items, name, &self.session).await?;
        }
        Ok(())
    }
}
