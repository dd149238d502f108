// Company entity and its transport objects.
//
// A company owns employees; expanding the `employees` relation attaches
// the non-deleted employees of every company in the batch with a single
// query.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, AppResult, DbSession, Entity, SqlValue};
use crate::modules::employees::models::{Employee, EmployeeResponse};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub address: String,
    pub country: String,
    pub is_deleted: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Populated only when the `employees` relation is expanded.
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub employees: Vec<Employee>,
}

impl Company {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            address: address.into(),
            country: country.into(),
            is_deleted: false,
            is_active: true,
            created_at: now,
            updated_at: now,
            employees: Vec::new(),
        }
    }
}

#[async_trait]
impl Entity for Company {
    const TABLE: &'static str = "companies";

    fn columns() -> &'static [&'static str] {
        &[
            "id",
            "name",
            "address",
            "country",
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
        &["employees"]
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
            SqlValue::Text(self.name.clone()),
            SqlValue::Text(self.address.clone()),
            SqlValue::Text(self.country.clone()),
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
            "employees" => {
                let ids: Vec<String> = items.iter().map(|company| company.id.clone()).collect();
                let placeholders = vec!["?"; ids.len()].join(", ");
                let sql = format!(
                    "SELECT {} FROM {} WHERE company_id IN ({}) AND is_deleted = FALSE ORDER BY name ASC, id ASC",
                    Employee::columns().join(", "),
                    Employee::TABLE,
                    placeholders,
                );
                let mut query = sqlx::query_as::<_, Employee>(&sql);
                for id in ids {
                    query = query.bind(id);
                }
                let employees = query.fetch_all(session.pool()).await?;

                for company in items.iter_mut() {
                    company.employees = employees
                        .iter()
                        .filter(|employee| employee.company_id == company.id)
                        .cloned()
                        .collect();
                }
                Ok(())
            }
            other => Err(AppError::validation(format!(
                "Unknown relation '{}' for companies",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCompanyRequest {
    pub name: String,
    pub address: String,
    pub country: String,
}

impl CreateCompanyRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Company name must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCompanyRequest {
    pub name: String,
    pub address: String,
    pub country: String,
}

impl UpdateCompanyRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Company name must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyResponse {
    pub id: String,
    pub name: String,
    pub address: String,
    pub country: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employees: Option<Vec<EmployeeResponse>>,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        let Company {
            id,
            name,
            address,
            country,
            is_active,
            created_at,
            employees,
            ..
        } = company;

        let employees = if employees.is_empty() {
            None
        } else {
            Some(employees.into_iter().map(EmployeeResponse::from).collect())
        };

        Self {
            id,
            name,
            address,
            country,
            is_active,
            created_at,
            employees,
        }
    }
}
