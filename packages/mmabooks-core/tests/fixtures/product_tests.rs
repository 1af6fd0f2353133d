use ntest::timeout;
use rust_decimal::Decimal;

use mmabooks_core::entity::Product;

use super::helpers::{reopen, setup};

#[derive(Debug)]
struct ProductValue {
    product_code: String,
    value: Decimal,
}

fn product(code: &str, description: &str, cents: i64, on_hand: i32) -> Product {
    Product {
        product_code: code.to_string(),
        description: description.to_string(),
        unit_price: Decimal::new(cents, 2),
        on_hand_quantity: on_hand,
    }
}

#[timeout(5000)]
#[test]
fn test_get_all() {
    let ctx = setup();
    assert!(
        !ctx.query::<Product>().is_empty(),
        "Expected to retrieve at least one product"
    );
}

#[timeout(5000)]
#[test]
fn test_get_by_primary_key() {
    let mut ctx = setup();
    let product = ctx
        .products()
        .find(&"A4CS".to_string())
        .expect("Expected to retrieve product A4CS");
    assert_eq!(product.product_code, "A4CS", "ProductCode mismatch");
}

#[timeout(5000)]
#[test]
fn test_get_using_where() {
    let ctx = setup();
    let price = Decimal::new(5650, 2);
    let products = ctx
        .query::<Product>()
        .filter(|p| p.unit_price == price)
        .to_list();

    assert!(!products.is_empty(), "Expected products with UnitPrice 56.50");
    assert!(products.iter().all(|p| p.unit_price == price));
}

#[timeout(5000)]
#[test]
fn test_get_with_calculated_field() {
    let ctx = setup();
    let values = ctx
        .query::<Product>()
        .select(|p| ProductValue {
            value: p.inventory_value(),
            product_code: p.product_code,
        })
        .order_by(|p| p.product_code.clone())
        .to_list();

    assert_eq!(values.len(), 16, "Expected 16 products in the list");
    for row in &values {
        let source = ctx
            .query::<Product>()
            .filter(|p| p.product_code == row.product_code)
            .single()
            .unwrap()
            .unwrap();
        assert_eq!(
            row.value,
            source.unit_price * Decimal::from(source.on_hand_quantity)
        );
    }
}

#[timeout(5000)]
#[test]
fn test_create() {
    let mut ctx = setup();
    ctx.products().add(product("NEW1", "New Product", 2000, 10));
    ctx.save_changes().unwrap();

    let saved = reopen(&ctx)
        .products()
        .find(&"NEW1".to_string())
        .expect("Expected new product to be saved");
    assert_eq!(saved.description, "New Product");
    assert_eq!(saved.on_hand_quantity, 10);
}

#[timeout(5000)]
#[test]
fn test_create_duplicate_code_is_rejected() {
    let mut ctx = setup();
    ctx.products().add(product("A4CS", "Duplicate", 100, 1));
    assert!(ctx.save_changes().is_err());
    assert_eq!(ctx.query::<Product>().filter(|p| p.product_code == "A4CS").count(), 2);

    ctx.discard();
    assert_eq!(ctx.query::<Product>().count(), 16);
}

#[timeout(5000)]
#[test]
fn test_update() {
    let mut ctx = setup();
    let code = {
        let product = ctx
            .products()
            .first_mut()
            .expect("Expected at least one product in the database");
        product.description = "Updated Description".to_string();
        product.unit_price = Decimal::new(9999, 2);
        product.product_code.clone()
    };
    ctx.save_changes().unwrap();

    let updated = reopen(&ctx).products().find(&code).unwrap();
    assert_eq!(updated.description, "Updated Description");
    assert_eq!(updated.unit_price, Decimal::new(9999, 2));
}

#[timeout(5000)]
#[test]
fn test_delete() {
    let mut ctx = setup();
    ctx.products().add(product("TEST", "Test Product", 1000, 5));
    ctx.save_changes().unwrap();

    let code = "TEST".to_string();
    ctx.products().remove(&code).unwrap();
    ctx.save_changes().unwrap();

    assert!(ctx.products().find(&code).is_none(), "Expected product to be deleted");
}
