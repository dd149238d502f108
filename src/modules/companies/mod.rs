// Companies module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Company, CompanyResponse, CreateCompanyRequest, UpdateCompanyRequest};
pub use repositories::CompanyRepository;
pub use services::CompanyService;
