use serde::{Deserialize, Serialize};

use super::{require, Entity};
use crate::error::DbError;

/// Customer of the bookstore. `state_code` references [`super::State`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Generated primary key (0 until committed)
    pub customer_id: i32,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state_code: String,
    pub zip_code: String,
}

impl Entity for Customer {
    type Key = i32;
    const TABLE: &'static str = "customers";
    const KEY_FIELD: &'static str = "customer_id";

    fn key(&self) -> i32 {
        self.customer_id
    }

    fn set_key(&mut self, key: i32) {
        self.customer_id = key;
    }

    fn validate(&self) -> Result<(), DbError> {
        require(Self::TABLE, "name", &self.name)?;
        require(Self::TABLE, "state_code", &self.state_code)
    }
}
