use std::sync::Arc;

use chrono::Utc;

use crate::core::{
    AppError, AppResult, DbSession, Expand, PagedResponse, QuerySpec, UnitOfWork,
};
use crate::modules::companies::models::{
    Company, CompanyResponse, CreateCompanyRequest, UpdateCompanyRequest,
};
use crate::modules::companies::repositories::CompanyRepository;
use crate::modules::employees::repositories::EmployeeRepository;

/// Business logic for companies. Validates requests, resolves targets,
/// stages repository mutations and commits them through the unit of work,
/// then maps entities to transport objects.
pub struct CompanyService {
    companies: CompanyRepository,
    employees: EmployeeRepository,
    uow: UnitOfWork,
}

impl CompanyService {
    pub fn new(session: Arc<DbSession>) -> Self {
        Self {
            companies: CompanyRepository::new(session.clone()),
            employees: EmployeeRepository::new(session.clone()),
            uow: UnitOfWork::new(session),
        }
    }

    pub async fn get_companies(
        &self,
        spec: &QuerySpec,
        expand: &Expand,
    ) -> AppResult<PagedResponse<CompanyResponse>> {
        let result = self.companies.get_companies(spec, expand).await?;

        Ok(PagedResponse {
            items: result.items.into_iter().map(CompanyResponse::from).collect(),
            total_items: result.total_items,
            page: spec.page,
            page_size: spec.page_size,
        })
    }

    pub async fn get_company(&self, id: &str, expand: &Expand) -> AppResult<CompanyResponse> {
        let company = self.resolve_company(id, expand).await?;
        Ok(company.into())
    }

    pub async fn create_company(
        &self,
        request: CreateCompanyRequest,
    ) -> AppResult<CompanyResponse> {
        request.validate()?;

        let company = Company::new(request.name, request.address, request.country);
        self.companies.create(&company);
        self.uow.complete().await?;

        tracing::info!(company_id = %company.id, "company created");
        Ok(company.into())
    }

    /// Create a batch of companies in a single commit.
    pub async fn create_companies(
        &self,
        requests: Vec<CreateCompanyRequest>,
    ) -> AppResult<Vec<CompanyResponse>> {
        if requests.is_empty() {
            return Err(AppError::validation("Company collection must not be empty"));
        }
        for request in &requests {
            request.validate()?;
        }

        let companies: Vec<Company> = requests
            .into_iter()
            .map(|request| Company::new(request.name, request.address, request.country))
            .collect();
        self.companies.create_many(&companies);
        self.uow.complete().await?;

        tracing::info!(count = companies.len(), "company collection created");
        Ok(companies.into_iter().map(CompanyResponse::from).collect())
    }

    pub async fn update_company(
        &self,
        id: &str,
        request: UpdateCompanyRequest,
    ) -> AppResult<CompanyResponse> {
        request.validate()?;

        let mut company = self.resolve_company(id, &Expand::None).await?;
        company.name = request.name;
        company.address = request.address;
        company.country = request.country;
        company.updated_at = Utc::now();

        self.companies.update(&company);
        self.uow.complete().await?;

        Ok(company.into())
    }

    /// Soft delete: the company disappears from listings and lookups but
    /// stays in storage.
    pub async fn delete_company(&self, id: &str) -> AppResult<()> {
        self.resolve_company(id, &Expand::None).await?;

        self.companies.soft_delete(id);
        self.uow.complete().await?;

        tracing::info!(company_id = %id, "company soft-deleted");
        Ok(())
    }

    pub async fn toggle_company(&self, id: &str) -> AppResult<CompanyResponse> {
        self.resolve_company(id, &Expand::None).await?;

        self.companies.toggle_active(id);
        self.uow.complete().await?;

        let toggled = self
            .companies
            .get_company(id, &Expand::None)
            .await?
            .ok_or_else(|| {
                AppError::internal(format!("Company {} disappeared during toggle", id))
            })?;
        Ok(toggled.into())
    }

    /// Permanently remove a company and all of its employees, soft-deleted
    /// ones included. Works on soft-deleted companies so audit leftovers
    /// can be purged.
    pub async fn purge_company(&self, id: &str) -> AppResult<()> {
        let company = self
            .companies
            .get_company(id, &Expand::None)
            .await?
            .ok_or_else(|| Self::company_not_found(id))?;

        let employees = self.employees.get_for_company_unfiltered(id).await?;
        self.employees.hard_delete_many(&employees);
        self.companies.hard_delete(&company.id);
        self.uow.complete().await?;

        tracing::info!(
            company_id = %id,
            employees = employees.len(),
            "company purged"
        );
        Ok(())
    }

    async fn resolve_company(&self, id: &str, expand: &Expand) -> AppResult<Company> {
        self.companies
            .get_company(id, expand)
            .await?
            .filter(|company| !company.is_deleted)
            .ok_or_else(|| Self::company_not_found(id))
    }

    fn company_not_found(id: &str) -> AppError {
        AppError::not_found(format!("Company with id {} does not exist", id))
    }
}
