use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::config::{AppConfig, Config};
use crate::core::{AppResult, DbSession, Expand, QuerySpec};
use crate::modules::employees::models::{CreateEmployeeRequest, UpdateEmployeeRequest};
use crate::modules::employees::services::EmployeeService;

/// Query parameters for listing a company's employees
#[derive(Debug, Deserialize)]
pub struct ListEmployeesQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_desc: bool,
    pub expand: Option<String>,
}

impl ListEmployeesQuery {
    fn to_spec(&self, config: &AppConfig) -> QuerySpec {
        QuerySpec {
            page: self.page.unwrap_or(1),
            page_size: self.page_size.unwrap_or(config.default_page_size),
            sort_by: self.sort_by.clone(),
            sort_desc: self.sort_desc,
        }
        .normalized(config.max_page_size)
    }
}

#[derive(Debug, Deserialize)]
pub struct ExpandQuery {
    pub expand: Option<String>,
}

fn service(pool: &web::Data<SqlitePool>) -> EmployeeService {
    EmployeeService::new(DbSession::new(pool.get_ref().clone()))
}

/// List employees for a company
/// GET /api/companies/{company_id}/employees
pub async fn list_employees(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    path: web::Path<String>,
    query: web::Query<ListEmployeesQuery>,
) -> AppResult<HttpResponse> {
    let company_id = path.into_inner();
    let spec = query.to_spec(&config.app);
    let expand = Expand::from_param(query.expand.as_deref());
    let page = service(&pool)
        .get_employees(&company_id, &spec, &expand)
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

/// Get one employee of a company
/// GET /api/companies/{company_id}/employees/{id}
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<(String, String)>,
    query: web::Query<ExpandQuery>,
) -> AppResult<HttpResponse> {
    let (company_id, id) = path.into_inner();
    let expand = Expand::from_param(query.expand.as_deref());
    let employee = service(&pool).get_employee(&company_id, &id, &expand).await?;

    Ok(HttpResponse::Ok().json(employee))
}

/// Create an employee under a company
/// POST /api/companies/{company_id}/employees
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
    request: web::Json<CreateEmployeeRequest>,
) -> AppResult<HttpResponse> {
    let company_id = path.into_inner();
    let employee = service(&pool)
        .create_employee(&company_id, request.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(employee))
}

/// Replace an employee's fields
/// PUT /api/companies/{company_id}/employees/{id}
pub async fn update_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<(String, String)>,
    request: web::Json<UpdateEmployeeRequest>,
) -> AppResult<HttpResponse> {
    let (company_id, id) = path.into_inner();
    service(&pool)
        .update_employee(&company_id, &id, request.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Soft-delete an employee
/// DELETE /api/companies/{company_id}/employees/{id}
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (company_id, id) = path.into_inner();
    service(&pool).delete_employee(&company_id, &id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Flip an employee's active flag
/// POST /api/companies/{company_id}/employees/{id}/toggle-active
pub async fn toggle_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (company_id, id) = path.into_inner();
    let employee = service(&pool).toggle_employee(&company_id, &id).await?;

    Ok(HttpResponse::Ok().json(employee))
}

/// Configure employee routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/companies/{company_id}/employees")
            .route("", web::get().to(list_employees))
            .route("", web::post().to(create_employee))
            .route("/{id}", web::get().to(get_employee))
            .route("/{id}", web::put().to(update_employee))
            .route("/{id}", web::delete().to(delete_employee))
            .route("/{id}/toggle-active", web::post().to(toggle_employee)),
    );
}
