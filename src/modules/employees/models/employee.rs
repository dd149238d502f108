use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, AppResult, DbSession, Entity, SqlValue};
use crate::modules::companies::models::Company;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub age: i64,
    pub position: String,
    pub is_deleted: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Populated only when the `company` relation is expanded.
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

impl Employee {
    pub fn new(
        company_id: impl Into<String>,
        name: impl Into<String>,
        age: i64,
        position: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            company_id: company_id.into(),
            name: name.into(),
            age,
            position: position.into(),
            is_deleted: false,
            is_active: true,
            created_at: now,
            updated_at: now,
            company: None,
        }
    }
}

#[async_trait]
impl Entity for Employee {
    const TABLE: &'static str = "employees";

    fn columns() -> &'static [&'static str] {
        &[
            "id",
            "company_id",
            "name",
            "age",
            "position",
            "is_deleted",
            "is_active",
            "created_at",
            "updated_at",
        ]
    }

    fn default_sort_column() -> &'static str {
        "name"
    }

    fn relations() -> &'static [&'static str] {
        &["company"]
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn set_deleted(&mut self, deleted: bool) {
        self.is_deleted = deleted;
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    fn row_values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Text(self.id.clone()),
            SqlValue::Text(self.company_id.clone()),
            SqlValue::Text(self.name.clone()),
            SqlValue::Integer(self.age),
            SqlValue::Text(self.position.clone()),
            SqlValue::Boolean(self.is_deleted),
            SqlValue::Boolean(self.is_active),
            SqlValue::Timestamp(self.created_at),
            SqlValue::Timestamp(self.updated_at),
        ]
    }

    async fn load_relation(
        items: &mut [Self],
        relation: &str,
        session: &DbSession,
    ) -> AppResult<()> {
        match relation {
            "company" => {
                let mut ids: Vec<String> =
                    items.iter().map(|employee| employee.company_id.clone()).collect();
                ids.sort();
                ids.dedup();

                let placeholders = vec!["?"; ids.len()].join(", ");
                let sql = format!(
                    "SELECT {} FROM {} WHERE id IN ({})",
                    Company::columns().join(", "),
                    Company::TABLE,
                    placeholders,
                );
                let mut query = sqlx::query_as::<_, Company>(&sql);
                for id in ids {
                    query = query.bind(id);
                }
                let companies = query.fetch_all(session.pool()).await?;

                for employee in items.iter_mut() {
                    employee.company = companies
                        .iter()
                        .find(|company| company.id == employee.company_id)
                        .cloned();
                }
                Ok(())
            }
            other => Err(AppError::validation(format!(
                "Unknown relation '{}' for employees",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub age: i64,
    pub position: String,
}

impl CreateEmployeeRequest {
    pub fn validate(&self) -> AppResult<()> {
        validate_employee_fields(&self.name, self.age, &self.position)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub name: String,
    pub age: i64,
    pub position: String,
}

impl UpdateEmployeeRequest {
    pub fn validate(&self) -> AppResult<()> {
        validate_employee_fields(&self.name, self.age, &self.position)
    }
}

fn validate_employee_fields(name: &str, age: i64, position: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Employee name must not be empty"));
    }
    if !(1..=150).contains(&age) {
        return Err(AppError::validation("Employee age must be between 1 and 150"));
    }
    if position.trim().is_empty() {
        return Err(AppError::validation("Employee position must not be empty"));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeResponse {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub age: i64,
    pub position: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        let Employee {
            id,
            company_id,
            name,
            age,
            position,
            is_active,
            created_at,
            company,
            ..
        } = employee;

        Self {
            id,
            company_id,
            name,
            age,
            position,
            is_active,
            created_at,
            company_name: company.map(|company| company.name),
        }
    }
}
