pub mod employee;

pub use employee::{
    CreateEmployeeRequest, Employee, EmployeeResponse, UpdateEmployeeRequest,
};
