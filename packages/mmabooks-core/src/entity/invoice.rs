use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Entity;

/// Invoice billed to a [`super::Customer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Generated primary key (0 until committed)
    pub invoice_id: i32,
    pub customer_id: i32,
    pub invoice_date: NaiveDate,
    pub product_total: Decimal,
    pub sales_tax: Decimal,
    pub shipping: Decimal,
    pub invoice_total: Decimal,
}

impl Entity for Invoice {
    type Key = i32;
    const TABLE: &'static str = "invoices";
    const KEY_FIELD: &'static str = "invoice_id";

    fn key(&self) -> i32 {
        self.invoice_id
    }

    fn set_key(&mut self, key: i32) {
        self.invoice_id = key;
    }
}
