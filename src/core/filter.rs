use crate::core::error::{AppError, AppResult};
use crate::core::session::SqlValue;

/// Declarative filter for repository queries: a conjunction of
/// column/operator/value clauses. Soft-deleted rows are excluded unless
/// [`Filter::include_deleted`] is set.
///
/// Column names are checked against the entity's declared columns when
/// the query is built, so a stray name surfaces as a validation error
/// instead of a malformed statement.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<Clause>,
    include_deleted: bool,
}

#[derive(Debug, Clone)]
struct Clause {
    column: String,
    op: Op,
    value: SqlValue,
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Eq,
    Ne,
    Like,
    Gt,
    Lt,
}

impl Op {
    fn sql(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ne => "<>",
            Op::Like => "LIKE",
            Op::Gt => ">",
            Op::Lt => "<",
        }
    }
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.push(column, Op::Eq, value)
    }

    pub fn ne(self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.push(column, Op::Ne, value)
    }

    pub fn like(self, column: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.push(column, Op::Like, SqlValue::Text(pattern.into()))
    }

    pub fn gt(self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.push(column, Op::Gt, value)
    }

    pub fn lt(self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.push(column, Op::Lt, value)
    }

    /// Also match soft-deleted rows (audit access).
    pub fn include_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    pub(crate) fn includes_deleted(&self) -> bool {
        self.include_deleted
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    fn push(mut self, column: impl Into<String>, op: Op, value: impl Into<SqlValue>) -> Self {
        self.clauses.push(Clause {
            column: column.into(),
            op,
            value: value.into(),
        });
        self
    }

    /// Render the clauses as WHERE fragments plus their bind values,
    /// validating every column name against `allowed`.
    pub(crate) fn to_sql(&self, allowed: &[&str]) -> AppResult<(Vec<String>, Vec<SqlValue>)> {
        let mut fragments = Vec::with_capacity(self.clauses.len());
        let mut binds = Vec::with_capacity(self.clauses.len());

        for clause in &self.clauses {
            if !allowed.contains(&clause.column.as_str()) {
                return Err(AppError::validation(format!(
                    "Cannot filter by unknown column '{}'",
                    clause.column
                )));
            }
            fragments.push(format!("{} {} ?", clause.column, clause.op.sql()));
            binds.push(clause.value.clone());
        }

        Ok((fragments, binds))
    }
}
