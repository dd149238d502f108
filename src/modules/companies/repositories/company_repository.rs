use std::sync::Arc;

use crate::core::{AppResult, DbSession, Expand, QueryResult, QuerySpec, Repository};
use crate::modules::companies::models::Company;

/// Company data access, a thin specialization of the generic repository.
pub struct CompanyRepository {
    inner: Repository<Company>,
}

impl CompanyRepository {
    pub fn new(session: Arc<DbSession>) -> Self {
        Self {
            inner: Repository::new(session),
        }
    }

    pub async fn get_companies(
        &self,
        spec: &QuerySpec,
        expand: &Expand,
    ) -> AppResult<QueryResult<Company>> {
        self.inner.get_all(None, Some(spec), expand).await
    }

    /// Lookup by id, soft-deleted included; callers decide whether a
    /// deleted company counts as found.
    pub async fn get_company(&self, id: &str, expand: &Expand) -> AppResult<Option<Company>> {
        self.inner.get_by_id(id, expand).await
    }

    pub fn create(&self, company: &Company) {
        self.inner.add(company);
    }

    pub fn create_many(&self, companies: &[Company]) {
        self.inner.add_many(companies);
    }

    pub fn update(&self, company: &Company) {
        self.inner.update(company);
    }

    pub fn soft_delete(&self, id: &str) {
        self.inner.soft_delete(id);
    }

    pub fn toggle_active(&self, id: &str) {
        self.inner.toggle_active(id);
    }

    pub fn hard_delete(&self, id: &str) {
        self.inner.hard_delete(id);
    }
}
