use std::sync::Arc;

use crate::core::{
    AppResult, DbSession, Expand, Filter, QueryResult, QuerySpec, Repository,
};
use crate::modules::employees::models::Employee;

/// Employee data access scoped to a parent company.
pub struct EmployeeRepository {
    inner: Repository<Employee>,
}

impl EmployeeRepository {
    pub fn new(session: Arc<DbSession>) -> Self {
        Self {
            inner: Repository::new(session),
        }
    }

    pub async fn get_employees(
        &self,
        company_id: &str,
        spec: &QuerySpec,
        expand: &Expand,
    ) -> AppResult<QueryResult<Employee>> {
        let filter = Filter::new().eq("company_id", company_id);
        self.inner.get_all(Some(&filter), Some(spec), expand).await
    }

    /// Single employee under a company; soft-deleted employees are not
    /// found here.
    pub async fn get_employee(
        &self,
        company_id: &str,
        id: &str,
        expand: &Expand,
    ) -> AppResult<Option<Employee>> {
        let filter = Filter::new().eq("id", id).eq("company_id", company_id);
        self.inner.get_single(&filter, expand).await
    }

    /// Every employee of a company, soft-deleted included. Purge only.
    pub async fn get_for_company_unfiltered(
        &self,
        company_id: &str,
    ) -> AppResult<Vec<Employee>> {
        let filter = Filter::new().eq("company_id", company_id).include_deleted();
        let result = self
            .inner
            .get_all(Some(&filter), Some(&QuerySpec::unpaged()), &Expand::None)
            .await?;
        Ok(result.items)
    }

    pub fn create(&self, employee: &Employee) {
        self.inner.add(employee);
    }

    pub fn update(&self, employee: &Employee) {
        self.inner.update(employee);
    }

    pub fn soft_delete(&self, id: &str) {
        self.inner.soft_delete(id);
    }

    pub fn toggle_active(&self, id: &str) {
        self.inner.toggle_active(id);
    }

    pub fn hard_delete_many(&self, employees: &[Employee]) {
        self.inner.hard_delete_many(employees);
    }
}
