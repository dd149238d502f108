use serde_json::{json, Value};

use orgdesk::companies::models::Company;
use orgdesk::employees::models::Employee;

pub fn sample_company(name: &str) -> Company {
    Company::new(name, "1 Main St", "USA")
}

pub fn sample_employee(company_id: &str, name: &str) -> Employee {
    Employee::new(company_id, name, 30, "Engineer")
}

/// Valid JSON body for POST /api/companies
pub fn company_payload(name: &str) -> Value {
    json!({
        "name": name,
        "address": "1 Main St",
        "country": "USA"
    })
}

/// Valid JSON body for POST /api/companies/{id}/employees
pub fn employee_payload(name: &str) -> Value {
    json!({
        "name": name,
        "age": 34,
        "position": "Engineer"
    })
}
