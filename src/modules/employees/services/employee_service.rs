use std::sync::Arc;

use chrono::Utc;

use crate::core::{
    AppError, AppResult, DbSession, Expand, PagedResponse, QuerySpec, UnitOfWork,
};
use crate::modules::companies::models::Company;
use crate::modules::companies::repositories::CompanyRepository;
use crate::modules::employees::models::{
    CreateEmployeeRequest, Employee, EmployeeResponse, UpdateEmployeeRequest,
};
use crate::modules::employees::repositories::EmployeeRepository;

/// Business logic for employees. Every operation resolves the parent
/// company first; an absent or soft-deleted company is a not-found error
/// naming its id.
pub struct EmployeeService {
    companies: CompanyRepository,
    employees: EmployeeRepository,
    uow: UnitOfWork,
}

impl EmployeeService {
    pub fn new(session: Arc<DbSession>) -> Self {
        Self {
            companies: CompanyRepository::new(session.clone()),
            employees: EmployeeRepository::new(session.clone()),
            uow: UnitOfWork::new(session),
        }
    }

    pub async fn get_employees(
        &self,
        company_id: &str,
        spec: &QuerySpec,
        expand: &Expand,
    ) -> AppResult<PagedResponse<EmployeeResponse>> {
        self.resolve_company(company_id).await?;

        let result = self.employees.get_employees(company_id, spec, expand).await?;

        Ok(PagedResponse {
            items: result.items.into_iter().map(EmployeeResponse::from).collect(),
            total_items: result.total_items,
            page: spec.page,
            page_size: spec.page_size,
        })
    }

    pub async fn get_employee(
        &self,
        company_id: &str,
        id: &str,
        expand: &Expand,
    ) -> AppResult<EmployeeResponse> {
        self.resolve_company(company_id).await?;

        let employee = self.resolve_employee(company_id, id, expand).await?;
        Ok(employee.into())
    }

    pub async fn create_employee(
        &self,
        company_id: &str,
        request: CreateEmployeeRequest,
    ) -> AppResult<EmployeeResponse> {
        request.validate()?;
        let company = self.resolve_company(company_id).await?;

        let employee = Employee::new(company.id, request.name, request.age, request.position);
        self.employees.create(&employee);
        self.uow.complete().await?;

        tracing::info!(
            employee_id = %employee.id,
            company_id = %company_id,
            "employee created"
        );
        Ok(employee.into())
    }

    pub async fn update_employee(
        &self,
        company_id: &str,
        id: &str,
        request: UpdateEmployeeRequest,
    ) -> AppResult<EmployeeResponse> {
        request.validate()?;
        self.resolve_company(company_id).await?;

        let mut employee = self.resolve_employee(company_id, id, &Expand::None).await?;
        employee.name = request.name;
        employee.age = request.age;
        employee.position = request.position;
        employee.updated_at = Utc::now();

        self.employees.update(&employee);
        self.uow.complete().await?;

        Ok(employee.into())
    }

    pub async fn delete_employee(&self, company_id: &str, id: &str) -> AppResult<()> {
        self.resolve_company(company_id).await?;
        self.resolve_employee(company_id, id, &Expand::None).await?;

        self.employees.soft_delete(id);
        self.uow.complete().await?;

        tracing::info!(employee_id = %id, company_id = %company_id, "employee soft-deleted");
        Ok(())
    }

    pub async fn toggle_employee(
        &self,
        company_id: &str,
        id: &str,
    ) -> AppResult<EmployeeResponse> {
        self.resolve_company(company_id).await?;
        self.resolve_employee(company_id, id, &Expand::None).await?;

        self.employees.toggle_active(id);
        self.uow.complete().await?;

        let toggled = self
            .employees
            .get_employee(company_id, id, &Expand::None)
            .await?
            .ok_or_else(|| {
                AppError::internal(format!("Employee {} disappeared during toggle", id))
            })?;
        Ok(toggled.into())
    }

    async fn resolve_company(&self, company_id: &str) -> AppResult<Company> {
        self.companies
            .get_company(company_id, &Expand::None)
            .await?
            .filter(|company| !company.is_deleted)
            .ok_or_else(|| {
                AppError::not_found(format!("Company with id {} does not exist", company_id))
            })
    }

    async fn resolve_employee(
        &self,
        company_id: &str,
        id: &str,
        expand: &Expand,
    ) -> AppResult<Employee> {
        self.employees
            .get_employee(company_id, id, expand)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Employee with id {} does not exist", id))
            })
    }
}
