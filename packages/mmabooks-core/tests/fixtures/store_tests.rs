//! Store-wide properties: reset determinism and commit atomicity.

use std::sync::Arc;

use ntest::timeout;
use tempfile::tempdir;

use mmabooks_core::config::DbConfig;
use mmabooks_core::entity::{Account, Customer, State};
use mmabooks_core::seed::{write_seed_file, SeedData};
use mmabooks_core::{DataContext, Database, DbError};

use super::helpers::setup;

#[timeout(5000)]
#[test]
fn test_reset_restores_seeded_counts() {
    let mut ctx = setup();
    let db = Arc::clone(ctx.database());
    let seeded = db.snapshot().row_counts();

    ctx.accounts().add(Account {
        name: "Extra".to_string(),
        ..Default::default()
    });
    ctx.customers().find(&6).unwrap();
    ctx.customers().remove(&6).unwrap();
    ctx.save_changes().unwrap();
    assert_ne!(db.snapshot().row_counts(), seeded);

    for _ in 0..3 {
        db.reset().unwrap();
        assert_eq!(db.snapshot().row_counts(), seeded);
    }
    assert_eq!(db.snapshot().customers.current_next_id(), 697);
}

#[timeout(5000)]
#[test]
fn test_failed_commit_is_atomic() {
    let mut ctx = setup();
    let before = ctx.database().snapshot();

    ctx.accounts().add(Account {
        name: "Valid".to_string(),
        ..Default::default()
    });
    ctx.states().find(&"OR".to_string()).unwrap();
    ctx.states().remove(&"OR".to_string()).unwrap();

    assert!(ctx.save_changes().is_err());
    let after = ctx.database().snapshot();
    assert!(Arc::ptr_eq(&before, &after));
    assert!(ctx.has_changes());
}

#[timeout(5000)]
#[test]
fn test_filter_is_a_subset_of_query() {
    let ctx = setup();
    let all = ctx.query::<Customer>().to_list();
    let filtered = ctx
        .query::<Customer>()
        .filter(|c| c.city.starts_with('P'))
        .to_list();

    let expected: Vec<Customer> = all.into_iter().filter(|c| c.city.starts_with('P')).collect();
    assert_eq!(filtered, expected);
}

#[timeout(5000)]
#[test]
fn test_open_with_seed_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("seed.json");
    let seed = SeedData {
        states: vec![State {
            state_code: "OR".to_string(),
            state_name: "Oregon".to_string(),
        }],
        ..Default::default()
    };
    write_seed_file(&path, &seed, &DbConfig::default()).unwrap();

    let config = DbConfig {
        seed_path: Some(path),
        ..Default::default()
    };
    let db = Database::open_seeded(config).unwrap();
    assert_eq!(db.record_count("states").unwrap(), 1);
    assert_eq!(db.record_count("customers").unwrap(), 0);

    let ctx = DataContext::new(Arc::new(db));
    assert_eq!(ctx.query::<State>().count(), 1);
}

#[timeout(5000)]
#[test]
fn test_custom_reset_procedure_name() {
    let config = DbConfig {
        reset_procedure: "usp_reset".to_string(),
        ..Default::default()
    };
    let db = Database::open(config).unwrap();
    assert_eq!(
        db.call_procedure("usp_testingResetData"),
        Err(DbError::ProcedureNotFound("usp_testingResetData".to_string()))
    );
    db.call_procedure("usp_reset").unwrap();
    assert_eq!(db.record_count("customers").unwrap(), 696);
}
