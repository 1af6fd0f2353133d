use ntest::timeout;

use mmabooks_core::entity::Supplier;

use super::helpers::{reopen, setup};

fn some(value: &str) -> Option<String> {
    Some(value.to_string())
}

#[timeout(5000)]
#[test]
fn test_get_all() {
    let ctx = setup();
    assert!(
        ctx.query::<Supplier>().count() > 0,
        "Expected to retrieve at least one supplier"
    );
}

#[timeout(5000)]
#[test]
fn test_get_by_primary_key() {
    let mut ctx = setup();
    let supplier = ctx
        .suppliers()
        .find(&1)
        .expect("Expected to retrieve supplier with primary key 1");
    assert_eq!(supplier.supplier_id, 1, "SupplierId mismatch");
}

#[timeout(5000)]
#[test]
fn test_get_using_where() {
    let ctx = setup();
    let portland = ctx
        .query::<Supplier>()
        .filter(|s| s.city.as_deref() == Some("Portland"))
        .to_list();

    assert!(!portland.is_empty(), "Expected at least one supplier in Portland");
}

#[timeout(5000)]
#[test]
fn test_create() {
    let mut ctx = setup();
    let new_supplier = Supplier {
        supplier_id: 0,
        name: "New Supplier".to_string(),
        contact_name: some("John Doe"),
        phone: some("123-456-7890"),
        email: some("new.supplier@example.com"),
        address: some("123 Main St"),
        city: some("Los Angeles"),
        state: some("CA"),
        zip: some("90001"),
        country: some("USA"),
        notes: some("Test supplier notes"),
    };
    let id = ctx.suppliers().add(new_supplier.clone());
    ctx.save_changes().unwrap();

    let key = ctx.suppliers().key_of(id).unwrap();
    let saved = reopen(&ctx)
        .suppliers()
        .find(&key)
        .expect("Expected new supplier to be saved");
    assert_eq!(
        saved,
        Supplier {
            supplier_id: key,
            ..new_supplier
        }
    );
}

#[timeout(5000)]
#[test]
fn test_update() {
    let mut ctx = setup();
    let id = {
        let supplier = ctx
            .suppliers()
            .first_mut()
            .expect("Expected at least one supplier in the database");
        supplier.name = "Updated Supplier".to_string();
        supplier.city = some("Updated City");
        supplier.supplier_id
    };
    ctx.save_changes().unwrap();

    let updated = reopen(&ctx).suppliers().find(&id).unwrap();
    assert_eq!(updated.name, "Updated Supplier");
    assert_eq!(updated.city, some("Updated City"));
}

#[timeout(5000)]
#[test]
fn test_delete() {
    let mut ctx = setup();
    let id = ctx.suppliers().add(Supplier {
        supplier_id: 0,
        name: "Test Supplier".to_string(),
        contact_name: None,
        phone: None,
        email: None,
        address: None,
        city: some("Test City"),
        state: some("CA"),
        zip: None,
        country: some("USA"),
        notes: None,
    });
    ctx.save_changes().unwrap();
    let key = ctx.suppliers().key_of(id).unwrap();

    ctx.suppliers().remove(&key).unwrap();
    ctx.save_changes().unwrap();

    assert!(ctx.suppliers().find(&key).is_none(), "Expected supplier to be deleted");
}
