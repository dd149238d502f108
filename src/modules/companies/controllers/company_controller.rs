use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::config::{AppConfig, Config};
use crate::core::{AppResult, DbSession, Expand, QuerySpec};
use crate::modules::companies::models::{CreateCompanyRequest, UpdateCompanyRequest};
use crate::modules::companies::services::CompanyService;

/// Query parameters for listing companies
#[derive(Debug, Deserialize)]
pub struct ListCompaniesQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_desc: bool,
    pub expand: Option<String>,
}

impl ListCompaniesQuery {
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

fn service(pool: &web::Data<SqlitePool>) -> CompanyService {
    CompanyService::new(DbSession::new(pool.get_ref().clone()))
}

/// List companies with paging, sorting and optional relation expansion
/// GET /api/companies
pub async fn list_companies(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    query: web::Query<ListCompaniesQuery>,
) -> AppResult<HttpResponse> {
    let spec = query.to_spec(&config.app);
    let expand = Expand::from_param(query.expand.as_deref());
    let page = service(&pool).get_companies(&spec, &expand).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// Get a single company by id
/// GET /api/companies/{id}
pub async fn get_company(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
    query: web::Query<ExpandQuery>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let expand = Expand::from_param(query.expand.as_deref());
    let company = service(&pool).get_company(&id, &expand).await?;

    Ok(HttpResponse::Ok().json(company))
}

/// Create a company
/// POST /api/companies
pub async fn create_company(
    pool: web::Data<SqlitePool>,
    request: web::Json<CreateCompanyRequest>,
) -> AppResult<HttpResponse> {
    let company = service(&pool).create_company(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(company))
}

/// Create several companies in one commit
/// POST /api/companies/collection
pub async fn create_company_collection(
    pool: web::Data<SqlitePool>,
    request: web::Json<Vec<CreateCompanyRequest>>,
) -> AppResult<HttpResponse> {
    let companies = service(&pool).create_companies(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(companies))
}

/// Replace a company's fields
/// PUT /api/companies/{id}
pub async fn update_company(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
    request: web::Json<UpdateCompanyRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    service(&pool).update_company(&id, request.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Soft-delete a company
/// DELETE /api/companies/{id}
pub async fn delete_company(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    service(&pool).delete_company(&id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Flip a company's active flag
/// POST /api/companies/{id}/toggle-active
pub async fn toggle_company(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let company = service(&pool).toggle_company(&id).await?;

    Ok(HttpResponse::Ok().json(company))
}

/// Permanently remove a company and its employees
/// DELETE /api/companies/{id}/purge
pub async fn purge_company(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    service(&pool).purge_company(&id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure company routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/companies")
            .route("", web::get().to(list_companies))
            .route("", web::post().to(create_company))
            .route("/collection", web::post().to(create_company_collection))
            .route("/{id}", web::get().to(get_company))
            .route("/{id}", web::put().to(update_company))
            .route("/{id}", web::delete().to(delete_company))
            .route("/{id}/toggle-active", web::post().to(toggle_company))
            .route("/{id}/purge", web::delete().to(purge_company)),
    );
}
