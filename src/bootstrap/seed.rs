// Seed fixtures for an empty database.
//
// Generation is pure: callers supply the counts, the random source and
// the creation timestamp, and get records back. Nothing here keeps
// process-wide state, so the same seeded RNG always yields the same
// fixtures.

use chrono::{DateTime, Utc};
use rand::Rng;
use sqlx::SqlitePool;
use uuid::Builder;

use crate::core::{AppError, AppResult, DbSession, Filter, Repository, UnitOfWork};
use crate::modules::companies::models::Company;
use crate::modules::employees::models::Employee;

const COMPANY_STEMS: &[&str] = &[
    "Acme", "Globex", "Initech", "Umbrella", "Vandelay", "Stark", "Wayne", "Hooli",
    "Aperture", "Cyberdyne", "Wonka", "Tyrell",
];

const COMPANY_SUFFIXES: &[&str] = &["Ltd", "LLC", "Group", "Industries", "Labs", "Holdings"];

const STREETS: &[&str] = &[
    "Main St", "Oak Ave", "Maple Rd", "Harbor Blvd", "Station Ln", "Bridge Way",
];

const COUNTRIES: &[&str] = &[
    "USA", "Germany", "Japan", "Brazil", "Canada", "France", "India", "Australia",
];

const FIRST_NAMES: &[&str] = &[
    "Sam", "Alex", "Jordan", "Casey", "Robin", "Taylor", "Morgan", "Jamie", "Riley",
    "Quinn", "Avery", "Dana",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Lee", "Garcia", "Miller", "Davis", "Tanaka", "Novak",
    "Fischer", "Silva", "Kowalski", "Haddad",
];

const POSITIONS: &[&str] = &[
    "Software Engineer", "Accountant", "Sales Manager", "Designer", "Analyst",
    "Technician", "Product Manager", "Administrator",
];

/// Generate `count` companies from the given random source.
pub fn generate_companies(
    count: usize,
    rng: &mut impl Rng,
    created_at: DateTime<Utc>,
) -> Vec<Company> {
    (0..count)
        .map(|_| {
            let name = format!("{} {}", pick(rng, COMPANY_STEMS), pick(rng, COMPANY_SUFFIXES));
            let address = format!("{} {}", rng.gen_range(1..500), pick(rng, STREETS));
            Company {
                id: random_id(rng),
                name,
                address,
                country: pick(rng, COUNTRIES).to_string(),
                is_deleted: false,
                is_active: true,
                created_at,
                updated_at: created_at,
                employees: Vec::new(),
            }
        })
        .collect()
}

/// Generate `count` employees, each assigned to a random company from
/// `companies`. Companies must be generated first.
pub fn generate_employees(
    count: usize,
    companies: &[Company],
    rng: &mut impl Rng,
    created_at: DateTime<Utc>,
) -> AppResult<Vec<Employee>> {
    if companies.is_empty() && count > 0 {
        return Err(AppError::validation(
            "Companies must be generated before employees",
        ));
    }

    Ok((0..count)
        .map(|_| {
            let company = &companies[rng.gen_range(0..companies.len())];
            let name = format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES));
            Employee {
                id: random_id(rng),
                company_id: company.id.clone(),
                name,
                age: rng.gen_range(20..=60),
                position: pick(rng, POSITIONS).to_string(),
                is_deleted: false,
                is_active: true,
                created_at,
                updated_at: created_at,
                company: None,
            }
        })
        .collect())
}

/// Seed the store with generated fixtures when it holds no companies yet.
/// Returns whether anything was written.
pub async fn seed_if_empty(
    pool: &SqlitePool,
    company_count: u32,
    employee_count: u32,
) -> AppResult<bool> {
    let session = DbSession::new(pool.clone());
    let companies: Repository<Company> = Repository::new(session.clone());
    let employees: Repository<Employee> = Repository::new(session.clone());

    if companies.get_count(&Filter::new()).await? > 0 {
        return Ok(false);
    }

    let mut rng = rand::thread_rng();
    let now = Utc::now();
    let company_rows = generate_companies(company_count as usize, &mut rng, now);
    let employee_rows =
        generate_employees(employee_count as usize, &company_rows, &mut rng, now)?;

    companies.add_many(&company_rows);
    employees.add_many(&employee_rows);
    UnitOfWork::new(session).complete().await?;

    tracing::info!(
        companies = company_rows.len(),
        employees = employee_rows.len(),
        "seeded empty database"
    );
    Ok(true)
}

fn pick<'a>(rng: &mut impl Rng, pool: &'a [&'a str]) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

fn random_id(rng: &mut impl Rng) -> String {
    Builder::from_random_bytes(rng.gen()).into_uuid().to_string()
}
