// Generic repository behavior over a real (in-memory) store: filtering,
// ordering, paging, soft delete, relation expansion and the staged
// mutation flow.

#[path = "../helpers/mod.rs"]
#[allow(dead_code)]
mod helpers;

use std::collections::HashSet;
use std::sync::Arc;

use orgdesk::companies::models::Company;
use orgdesk::core::{
    AppError, DbSession, Expand, Filter, QuerySpec, Repository, UnitOfWork,
};
use orgdesk::employees::models::Employee;

use helpers::test_data::{sample_company, sample_employee};
use helpers::test_database::create_test_pool;

struct Harness {
    session: Arc<DbSession>,
    companies: Repository<Company>,
    employees: Repository<Employee>,
    uow: UnitOfWork,
}

async fn harness() -> Harness {
    let pool = create_test_pool().await;
    let session = DbSession::new(pool);
    Harness {
        companies: Repository::new(session.clone()),
        employees: Repository::new(session.clone()),
        uow: UnitOfWork::new(session.clone()),
        session,
    }
}

async fn insert_companies(h: &Harness, names: &[&str]) -> Vec<Company> {
    let companies: Vec<Company> = names.iter().map(|name| sample_company(name)).collect();
    h.companies.add_many(&companies);
    h.uow.complete().await.expect("insert companies");
    companies
}

#[tokio::test]
async fn test_add_then_get_by_id_round_trip() {
    let h = harness().await;
    let company = sample_company("Acme");
    h.companies.add(&company);
    assert!(h.uow.complete().await.unwrap());

    let found = h
        .companies
        .get_by_id(&company.id, &Expand::None)
        .await
        .unwrap()
        .expect("company should be stored");

    assert_eq!(found.id, company.id);
    assert_eq!(found.name, "Acme");
    assert_eq!(found.address, "1 Main St");
    assert_eq!(found.country, "USA");
    assert!(!found.is_deleted);
    assert!(found.is_active);
}

#[tokio::test]
async fn test_get_all_excludes_soft_deleted_but_get_by_id_returns_them() {
    let h = harness().await;
    let companies = insert_companies(&h, &["Acme", "Globex"]).await;

    h.companies.soft_delete(&companies[0].id);
    h.uow.complete().await.unwrap();

    let listed = h
        .companies
        .get_all(None, None, &Expand::None)
        .await
        .unwrap();
    assert_eq!(listed.total_items, 1);
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].name, "Globex");

    // Audit bypass: the soft-deleted row is still reachable by id.
    let deleted = h
        .companies
        .get_by_id(&companies[0].id, &Expand::None)
        .await
        .unwrap()
        .expect("soft-deleted row stays readable by id");
    assert!(deleted.is_deleted);

    // And listable when the filter opts in.
    let all = h
        .companies
        .get_all(Some(&Filter::new().include_deleted()), None, &Expand::None)
        .await
        .unwrap();
    assert_eq!(all.total_items, 2);
}

#[tokio::test]
async fn test_page_sum_equals_total_items() {
    let h = harness().await;
    let names: Vec<String> = (1..=15).map(|n| format!("Org {:02}", n)).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    insert_companies(&h, &name_refs).await;

    let mut seen = HashSet::new();
    let mut page = 1;
    loop {
        let spec = QuerySpec {
            page,
            page_size: 4,
            ..QuerySpec::default()
        };
        let result = h
            .companies
            .get_all(None, Some(&spec), &Expand::None)
            .await
            .unwrap();
        assert_eq!(result.total_items, 15);
        if result.items.is_empty() {
            break;
        }
        for company in result.items {
            assert!(seen.insert(company.id), "no row may appear on two pages");
        }
        page += 1;
    }

    assert_eq!(seen.len(), 15);
}

#[tokio::test]
async fn test_second_page_of_fifteen_rows() {
    let h = harness().await;
    let names: Vec<String> = (1..=15).map(|n| format!("Org {:02}", n)).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    insert_companies(&h, &name_refs).await;

    let spec = QuerySpec {
        page: 2,
        page_size: 10,
        ..QuerySpec::default()
    };
    let result = h
        .companies
        .get_all(None, Some(&spec), &Expand::None)
        .await
        .unwrap();

    assert_eq!(result.items.len(), 5);
    assert_eq!(result.total_items, 15);
}

#[tokio::test]
async fn test_page_past_the_end_is_empty_not_an_error() {
    let h = harness().await;
    insert_companies(&h, &["Acme", "Globex", "Initech"]).await;

    let spec = QuerySpec {
        page: 5,
        page_size: 10,
        ..QuerySpec::default()
    };
    let result = h
        .companies
        .get_all(None, Some(&spec), &Expand::None)
        .await
        .unwrap();

    assert!(result.items.is_empty());
    assert_eq!(result.total_items, 3);
}

#[tokio::test]
async fn test_ordering_by_requested_column() {
    let h = harness().await;
    insert_companies(&h, &["Beta", "Alpha", "Gamma"]).await;

    let ascending = h
        .companies
        .get_all(None, None, &Expand::None)
        .await
        .unwrap();
    let names: Vec<&str> = ascending.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);

    let spec = QuerySpec {
        sort_by: Some("name".to_string()),
        sort_desc: true,
        ..QuerySpec::default()
    };
    let descending = h
        .companies
        .get_all(None, Some(&spec), &Expand::None)
        .await
        .unwrap();
    let names: Vec<&str> = descending.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Gamma", "Beta", "Alpha"]);
}

#[tokio::test]
async fn test_unknown_sort_column_is_rejected() {
    let h = harness().await;
    insert_companies(&h, &["Acme"]).await;

    let spec = QuerySpec {
        sort_by: Some("password".to_string()),
        ..QuerySpec::default()
    };
    let err = h
        .companies
        .get_all(None, Some(&spec), &Expand::None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_unknown_filter_column_is_rejected() {
    let h = harness().await;
    let filter = Filter::new().eq("salary", 1i64);
    let err = h
        .companies
        .get_all(Some(&filter), None, &Expand::None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_update_round_trip() {
    let h = harness().await;
    let companies = insert_companies(&h, &["Acme"]).await;

    let mut company = companies.into_iter().next().unwrap();
    company.name = "Acme Rebranded".to_string();
    company.country = "Canada".to_string();
    h.companies.update(&company);
    assert!(h.uow.complete().await.unwrap());

    let found = h
        .companies
        .get_by_id(&company.id, &Expand::None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.name, "Acme Rebranded");
    assert_eq!(found.country, "Canada");
}

#[tokio::test]
async fn test_update_many_stages_every_entity() {
    let h = harness().await;
    let mut companies = insert_companies(&h, &["Acme", "Globex", "Initech"]).await;

    for company in companies.iter_mut() {
        company.address = "9 Harbor Blvd".to_string();
    }
    h.companies.update_many(&companies);
    h.uow.complete().await.unwrap();

    let listed = h
        .companies
        .get_all(None, None, &Expand::None)
        .await
        .unwrap();
    assert!(listed.items.iter().all(|c| c.address == "9 Harbor Blvd"));
}

#[tokio::test]
async fn test_soft_delete_twice_is_idempotent() {
    let h = harness().await;
    let companies = insert_companies(&h, &["Acme"]).await;
    let id = companies[0].id.clone();

    h.companies.soft_delete(&id);
    h.uow.complete().await.unwrap();

    h.companies.soft_delete(&id);
    h.uow
        .complete()
        .await
        .expect("second soft delete must not fail");

    let found = h
        .companies
        .get_by_id(&id, &Expand::None)
        .await
        .unwrap()
        .unwrap();
    assert!(found.is_deleted);
}

#[tokio::test]
async fn test_soft_delete_entity_variant() {
    let h = harness().await;
    let companies = insert_companies(&h, &["Acme"]).await;

    let mut company = companies.into_iter().next().unwrap();
    h.companies.soft_delete_entity(&mut company);
    assert!(company.is_deleted);
    h.uow.complete().await.unwrap();

    let listed = h
        .companies
        .get_all(None, None, &Expand::None)
        .await
        .unwrap();
    assert_eq!(listed.total_items, 0);
}

#[tokio::test]
async fn test_toggle_active_by_id_flips_in_store() {
    let h = harness().await;
    let companies = insert_companies(&h, &["Acme"]).await;
    let id = companies[0].id.clone();

    h.companies.toggle_active(&id);
    h.uow.complete().await.unwrap();
    let found = h.companies.get_by_id(&id, &Expand::None).await.unwrap().unwrap();
    assert!(!found.is_active);

    h.companies.toggle_active(&id);
    h.uow.complete().await.unwrap();
    let found = h.companies.get_by_id(&id, &Expand::None).await.unwrap().unwrap();
    assert!(found.is_active);
}

#[tokio::test]
async fn test_toggle_active_entity_variant() {
    let h = harness().await;
    let companies = insert_companies(&h, &["Acme"]).await;

    let mut company = companies.into_iter().next().unwrap();
    h.companies.toggle_active_entity(&mut company);
    assert!(!company.is_active);
    h.uow.complete().await.unwrap();

    let found = h
        .companies
        .get_by_id(&company.id, &Expand::None)
        .await
        .unwrap()
        .unwrap();
    assert!(!found.is_active);
}

#[tokio::test]
async fn test_hard_delete_removes_rows_permanently() {
    let h = harness().await;
    let companies = insert_companies(&h, &["Acme", "Globex", "Initech"]).await;

    h.companies.hard_delete(&companies[0].id);
    h.companies.hard_delete_entity(&companies[1]);
    h.uow.complete().await.unwrap();

    assert!(h
        .companies
        .get_by_id(&companies[0].id, &Expand::None)
        .await
        .unwrap()
        .is_none());
    assert!(h
        .companies
        .get_by_id(&companies[1].id, &Expand::None)
        .await
        .unwrap()
        .is_none());

    h.companies.hard_delete_many(&companies[2..]);
    h.uow.complete().await.unwrap();
    let count = h.companies.get_count(&Filter::new()).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_get_count_ignores_soft_delete_state() {
    let h = harness().await;
    let companies = insert_companies(&h, &["Acme", "Globex"]).await;

    h.companies.soft_delete(&companies[0].id);
    h.uow.complete().await.unwrap();

    // Audit parity: the raw count still sees both rows.
    assert_eq!(h.companies.get_count(&Filter::new()).await.unwrap(), 2);
    let listed = h
        .companies
        .get_all(None, None, &Expand::None)
        .await
        .unwrap();
    assert_eq!(listed.total_items, 1);
}

#[tokio::test]
async fn test_exists_and_get_single() {
    let h = harness().await;
    let companies = insert_companies(&h, &["Acme", "Globex"]).await;

    assert!(h
        .companies
        .exists(&Filter::new().eq("name", "Acme"))
        .await
        .unwrap());
    assert!(!h
        .companies
        .exists(&Filter::new().eq("name", "Missing Inc"))
        .await
        .unwrap());

    let single = h
        .companies
        .get_single(&Filter::new().eq("name", "Globex"), &Expand::None)
        .await
        .unwrap()
        .expect("Globex exists");
    assert_eq!(single.id, companies[1].id);

    // Soft-deleted rows are invisible to get_single unless requested.
    h.companies.soft_delete(&companies[1].id);
    h.uow.complete().await.unwrap();
    assert!(h
        .companies
        .get_single(&Filter::new().eq("name", "Globex"), &Expand::None)
        .await
        .unwrap()
        .is_none());
    assert!(h
        .companies
        .get_single(
            &Filter::new().eq("name", "Globex").include_deleted(),
            &Expand::None
        )
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_filtering_by_column_value() {
    let h = harness().await;
    let companies = insert_companies(&h, &["Acme", "Globex"]).await;
    let employees = vec![
        sample_employee(&companies[0].id, "Sam Smith"),
        sample_employee(&companies[0].id, "Alex Lee"),
        sample_employee(&companies[1].id, "Robin Novak"),
    ];
    h.employees.add_many(&employees);
    h.uow.complete().await.unwrap();

    let filter = Filter::new().eq("company_id", companies[0].id.as_str());
    let result = h
        .employees
        .get_all(Some(&filter), None, &Expand::None)
        .await
        .unwrap();
    assert_eq!(result.total_items, 2);
    assert!(result
        .items
        .iter()
        .all(|e| e.company_id == companies[0].id));
}

#[tokio::test]
async fn test_expand_company_employees_excludes_soft_deleted() {
    let h = harness().await;
    let companies = insert_companies(&h, &["Acme"]).await;
    let employees = vec![
        sample_employee(&companies[0].id, "Sam Smith"),
        sample_employee(&companies[0].id, "Alex Lee"),
        sample_employee(&companies[0].id, "Robin Novak"),
    ];
    h.employees.add_many(&employees);
    h.uow.complete().await.unwrap();

    h.employees.soft_delete(&employees[2].id);
    h.uow.complete().await.unwrap();

    let expanded = h
        .companies
        .get_by_id(&companies[0].id, &Expand::All)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(expanded.employees.len(), 2);

    let listed = h
        .companies
        .get_all(None, None, &Expand::only(["employees"]))
        .await
        .unwrap();
    assert_eq!(listed.items[0].employees.len(), 2);
}

#[tokio::test]
async fn test_expand_employee_company() {
    let h = harness().await;
    let companies = insert_companies(&h, &["Acme"]).await;
    let employee = sample_employee(&companies[0].id, "Sam Smith");
    h.employees.add(&employee);
    h.uow.complete().await.unwrap();

    let expanded = h
        .employees
        .get_by_id(&employee.id, &Expand::only(["company"]))
        .await
        .unwrap()
        .unwrap();
    let company = expanded.company.expect("company relation loaded");
    assert_eq!(company.name, "Acme");
}

#[tokio::test]
async fn test_unknown_relation_is_rejected() {
    let h = harness().await;
    let companies = insert_companies(&h, &["Acme"]).await;

    let err = h
        .companies
        .get_by_id(&companies[0].id, &Expand::only(["payroll"]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_session_is_shared_between_repositories() {
    let h = harness().await;
    let company = sample_company("Acme");
    let employee = sample_employee(&company.id, "Sam Smith");

    h.companies.add(&company);
    h.employees.add(&employee);
    assert_eq!(h.session.pending_count(), 2);

    h.uow.complete().await.unwrap();
    assert_eq!(h.session.pending_count(), 0);
}
