use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{check, require, Entity};
use crate::error::DbError;

/// Book in the catalog, keyed by its product code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub product_code: String,
    pub description: String,
    pub unit_price: Decimal,
    pub on_hand_quantity: i32,
}

impl Product {
    /// Value of the stock on hand. Computed on read, never stored.
    pub fn inventory_value(&self) -> Decimal {
        self.unit_price * Decimal::from(self.on_hand_quantity)
    }
}

impl Entity for Product {
    type Key = String;
    const TABLE: &'static str = "products";
    const KEY_FIELD: &'static str = "product_code";

    fn key(&self) -> String {
        self.product_code.clone()
    }

    fn set_key(&mut self, key: String) {
        self.product_code = key;
    }

    fn validate(&self) -> Result<(), DbError> {
        require(Self::TABLE, "product_code", &self.product_code)?;
        require(Self::TABLE, "description", &self.description)?;
        check(
            Self::TABLE,
            "unit_price",
            !self.unit_price.is_sign_negative(),
            "must not be negative",
        )
    }
}
