use serde::{Deserialize, Serialize};

use super::{require, Entity};
use crate::error::DbError;

/// Supplier contact record. Only `name` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    /// Generated primary key (0 until committed)
    pub supplier_id: i32,
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
}

impl Entity for Supplier {
    type Key = i32;
    const TABLE: &'static str = "suppliers";
    const KEY_FIELD: &'static str = "supplier_id";

    fn key(&self) -> i32 {
        self.supplier_id
    }

    fn set_key(&mut self, key: i32) {
        self.supplier_id = key;
    }

    fn validate(&self) -> Result<(), DbError> {
        require(Self::TABLE, "name", &self.name)
    }
}
