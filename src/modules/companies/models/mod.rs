pub mod company;

pub use company::{Company, CompanyResponse, CreateCompanyRequest, UpdateCompanyRequest};
