// Property tests for paging and ordering arithmetic.

use proptest::prelude::*;

use orgdesk::core::QuerySpec;

const COLUMNS: &[&str] = &["id", "name", "age"];

proptest! {
    #[test]
    fn test_normalized_spec_is_always_within_bounds(
        page in any::<u32>(),
        page_size in any::<u32>(),
        max_page_size in 1u32..10_000
    ) {
        let spec = QuerySpec {
            page,
            page_size,
            sort_by: None,
            sort_desc: false,
        }
        .normalized(max_page_size);

        prop_assert!(spec.page >= 1);
        prop_assert!(spec.page_size >= 1);
        prop_assert!(spec.page_size <= max_page_size);
    }

    #[test]
    fn test_offset_is_pages_skipped_times_page_size(
        page in 1u32..100_000,
        page_size in 1u32..10_000
    ) {
        let spec = QuerySpec {
            page,
            page_size,
            sort_by: None,
            sort_desc: false,
        };

        prop_assert_eq!(spec.offset(), i64::from(page - 1) * i64::from(page_size));
        prop_assert_eq!(spec.limit(), i64::from(page_size));
        prop_assert!(spec.offset() >= 0);
    }

    #[test]
    fn test_order_clause_accepts_every_declared_column(
        index in 0usize..3,
        descending in any::<bool>()
    ) {
        let spec = QuerySpec {
            page: 1,
            page_size: 10,
            sort_by: Some(COLUMNS[index].to_string()),
            sort_desc: descending,
        };

        let clause = spec.order_clause(COLUMNS, "name").unwrap();
        let direction = if descending { "DESC" } else { "ASC" };
        prop_assert_eq!(clause, format!("{} {}, id ASC", COLUMNS[index], direction));
    }
}

#[test]
fn test_default_spec_starts_at_first_page() {
    let spec = QuerySpec::default();
    assert_eq!(spec.page, 1);
    assert_eq!(spec.offset(), 0);
    assert!(!spec.sort_desc);
}

#[test]
fn test_unpaged_spec_covers_everything() {
    let spec = QuerySpec::unpaged();
    assert_eq!(spec.page, 1);
    assert_eq!(spec.limit(), i64::from(u32::MAX));
}

#[test]
fn test_order_clause_rejects_undeclared_column() {
    let spec = QuerySpec {
        page: 1,
        page_size: 10,
        sort_by: Some("password".to_string()),
        sort_desc: false,
    };
    assert!(spec.order_clause(COLUMNS, "name").is_err());
}

#[test]
fn test_zero_page_normalizes_to_first_page() {
    let spec = QuerySpec {
        page: 0,
        page_size: 0,
        sort_by: None,
        sort_desc: false,
    }
    .normalized(100);

    assert_eq!(spec.page, 1);
    assert_eq!(spec.page_size, 1);
}
