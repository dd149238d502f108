// Employees module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{CreateEmployeeRequest, Employee, EmployeeResponse, UpdateEmployeeRequest};
pub use repositories::EmployeeRepository;
pub use services::EmployeeService;
