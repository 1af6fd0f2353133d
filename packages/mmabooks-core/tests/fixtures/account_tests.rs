use ntest::timeout;
use rust_decimal::Decimal;

use mmabooks_core::entity::Account;

use super::helpers::{reopen, setup};

#[timeout(5000)]
#[test]
fn test_get_all_ordered_by_name() {
    let ctx = setup();
    let accounts = ctx.query::<Account>().order_by(|a| a.name.clone()).to_list();

    assert!(!accounts.is_empty(), "Expected at least one account to be retrieved");
    assert!(accounts.windows(2).all(|pair| pair[0].name <= pair[1].name));
}

#[timeout(5000)]
#[test]
fn test_get_by_primary_key() {
    let mut ctx = setup();
    let account = ctx
        .accounts()
        .find(&1)
        .expect("Expected to retrieve an account with ID 1");
    assert_eq!(account.account_id, 1);
}

#[timeout(5000)]
#[test]
fn test_get_using_where() {
    let ctx = setup();
    let threshold = Decimal::new(1000, 0);
    let all = ctx.query::<Account>().to_list();
    let rich = ctx
        .query::<Account>()
        .filter(|a| a.balance > threshold)
        .order_by(|a| a.name.clone())
        .to_list();

    assert!(!rich.is_empty(), "Expected accounts with a balance greater than 1000");
    assert!(rich.iter().all(|a| a.balance > threshold));
    assert_eq!(
        rich.len(),
        all.iter().filter(|a| a.balance > threshold).count()
    );
}

#[timeout(5000)]
#[test]
fn test_create() {
    let mut ctx = setup();
    let id = ctx.accounts().add(Account {
        name: "New Account".to_string(),
        balance: Decimal::new(50_000, 2),
        notes: Some("This is a test account.".to_string()),
        ..Default::default()
    });
    let summary = ctx.save_changes().unwrap();
    assert_eq!(summary.inserted(), 1);

    let key = ctx.accounts().key_of(id).expect("key assigned on commit");
    let saved = reopen(&ctx)
        .accounts()
        .find(&key)
        .expect("Expected the new account to be saved");
    assert_eq!(saved.name, "New Account");
    assert_eq!(saved.balance, Decimal::new(50_000, 2));
    assert_eq!(saved.notes.as_deref(), Some("This is a test account."));
}

#[timeout(5000)]
#[test]
fn test_update() {
    let mut ctx = setup();
    let id = {
        let account = ctx
            .accounts()
            .first_mut()
            .expect("Expected at least one account in the database");
        account.name = "Updated Account Name".to_string();
        account.balance = Decimal::new(75_000, 2);
        account.account_id
    };
    ctx.save_changes().unwrap();

    let updated = reopen(&ctx).accounts().find(&id).unwrap();
    assert_eq!(updated.name, "Updated Account Name");
    assert_eq!(updated.balance, Decimal::new(750, 0));
}

#[timeout(5000)]
#[test]
fn test_update_same_values_twice_is_stable() {
    let mut ctx = setup();
    let original = ctx.accounts().find(&1).unwrap();

    ctx.accounts().update(original.clone()).unwrap();
    let first = ctx.save_changes().unwrap();
    ctx.accounts().update(original.clone()).unwrap();
    let second = ctx.save_changes().unwrap();

    assert_eq!(first.updated(), 0);
    assert_eq!(second.updated(), 0);
    assert_eq!(reopen(&ctx).accounts().find(&1), Some(original));
}

#[timeout(5000)]
#[test]
fn test_delete() {
    let mut ctx = setup();
    ctx.accounts()
        .find(&1)
        .expect("Expected to find the account to delete");
    ctx.accounts().remove(&1).unwrap();
    let summary = ctx.save_changes().unwrap();
    assert_eq!(summary.deleted(), 1);

    assert!(ctx.accounts().find(&1).is_none(), "Expected the account to be deleted");
    assert!(reopen(&ctx).accounts().find(&1).is_none());
}

#[timeout(5000)]
#[test]
fn test_create_without_name_is_rejected() {
    let mut ctx = setup();
    let before = ctx.query::<Account>().count();
    ctx.accounts().add(Account::default());

    assert!(ctx.save_changes().is_err());
    assert_eq!(reopen(&ctx).query::<Account>().count(), before);
}
