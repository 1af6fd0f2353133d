use ntest::timeout;

use mmabooks_core::entity::{Customer, Invoice, State};
use mmabooks_core::DbError;

use super::helpers::{reopen, setup};

#[derive(Debug)]
struct CustomerWithState {
    customer_id: i32,
    state_code: String,
    state_name: String,
}

#[timeout(5000)]
#[test]
fn test_get_all() {
    let ctx = setup();
    assert!(
        ctx.query::<Customer>().count() > 0,
        "Expected to retrieve at least one customer"
    );
}

#[timeout(5000)]
#[test]
fn test_get_by_primary_key() {
    let mut ctx = setup();
    let customer = ctx
        .customers()
        .find(&1)
        .expect("Expected to retrieve customer with primary key 1");
    assert_eq!(customer.customer_id, 1, "CustomerId mismatch");
}

#[timeout(5000)]
#[test]
fn test_get_using_where() {
    let ctx = setup();
    let oregon = ctx
        .query::<Customer>()
        .filter(|c| c.state_code == "OR")
        .to_list();

    assert!(!oregon.is_empty(), "Expected at least one customer in Oregon");
    assert!(oregon.iter().all(|c| c.state_code == "OR"));
}

#[timeout(5000)]
#[test]
fn test_get_with_invoices() {
    let mut ctx = setup();
    let loaded = ctx
        .customers()
        .include::<Invoice>(&20)
        .expect("Expected to retrieve customer with ID 20");

    assert_eq!(loaded.parent.customer_id, 20);
    assert!(!loaded.children.is_empty(), "Expected customer to have invoices");
    assert!(loaded.children.iter().all(|i| i.customer_id == 20));
}

#[timeout(5000)]
#[test]
fn test_get_with_join() {
    let ctx = setup();
    let rows = ctx
        .query::<Customer>()
        .join(
            ctx.query::<State>(),
            |c| c.state_code.clone(),
            |s| s.state_code.clone(),
            |c, s| CustomerWithState {
                customer_id: c.customer_id,
                state_code: c.state_code.clone(),
                state_name: s.state_name.clone(),
            },
        )
        .order_by(|r| r.state_name.clone())
        .to_list();

    assert_eq!(rows.len(), 696, "Expected 696 customers in the list");
    assert!(rows.windows(2).all(|pair| pair[0].state_name <= pair[1].state_name));
    assert!(rows.iter().any(|r| r.customer_id == 1));
    assert!(rows
        .iter()
        .filter(|r| r.state_code == "OR")
        .all(|r| r.state_name == "Oregon"));
}

#[timeout(5000)]
#[test]
fn test_create() {
    let mut ctx = setup();
    let new_customer = Customer {
        name: "New Customer".to_string(),
        address: "1 Sunset Blvd".to_string(),
        state_code: "CA".to_string(),
        city: "Los Angeles".to_string(),
        zip_code: "90001".to_string(),
        ..Default::default()
    };
    let id = ctx.customers().add(new_customer.clone());
    ctx.save_changes().unwrap();

    let key = ctx.customers().key_of(id).unwrap();
    assert_eq!(key, 697);
    let saved = reopen(&ctx)
        .customers()
        .find(&key)
        .expect("Expected new customer to be saved");
    assert_eq!(
        saved,
        Customer {
            customer_id: key,
            ..new_customer
        }
    );
}

#[timeout(5000)]
#[test]
fn test_create_with_unknown_state_is_rejected() {
    let mut ctx = setup();
    ctx.customers().add(Customer {
        name: "Lost Customer".to_string(),
        state_code: "XX".to_string(),
        ..Default::default()
    });

    let result = ctx.save_changes();
    assert!(matches!(result, Err(DbError::ForeignKeyViolation { .. })));
    assert!(ctx.has_changes(), "Failed commit should keep staged changes");
    assert_eq!(ctx.database().record_count("customers").unwrap(), 696);
}

#[timeout(5000)]
#[test]
fn test_update() {
    let mut ctx = setup();
    let id = {
        let customer = ctx
            .customers()
            .first_mut()
            .expect("Expected at least one customer in the database");
        customer.name = "Updated Name".to_string();
        customer.city = "Updated City".to_string();
        customer.customer_id
    };
    ctx.save_changes().unwrap();

    let updated = reopen(&ctx).customers().find(&id).unwrap();
    assert_eq!(updated.name, "Updated Name");
    assert_eq!(updated.city, "Updated City");
}

#[timeout(5000)]
#[test]
fn test_delete() {
    let mut ctx = setup();
    let id = ctx.customers().add(Customer {
        name: "Test Customer".to_string(),
        state_code: "OR".to_string(),
        city: "Portland".to_string(),
        ..Default::default()
    });
    ctx.save_changes().unwrap();
    let key = ctx.customers().key_of(id).unwrap();

    ctx.customers().remove(&key).unwrap();
    ctx.save_changes().unwrap();

    assert!(ctx.customers().find(&key).is_none(), "Expected customer to be deleted");
}

#[timeout(5000)]
#[test]
fn test_delete_customer_with_invoices_is_restricted() {
    let mut ctx = setup();
    ctx.customers().find(&20).unwrap();
    ctx.customers().remove(&20).unwrap();

    assert!(matches!(
        ctx.save_changes(),
        Err(DbError::ForeignKeyViolation { .. })
    ));
    assert!(reopen(&ctx).customers().find(&20).is_some());
}
