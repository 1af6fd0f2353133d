use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{require, Entity};
use crate::error::DbError;

/// General ledger account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Generated primary key (0 until committed)
    pub account_id: i32,
    pub name: String,
    pub balance: Decimal,
    pub notes: Option<String>,
}

impl Entity for Account {
    type Key = i32;
    const TABLE: &'static str = "accounts";
    const KEY_FIELD: &'static str = "account_id";

    fn key(&self) -> i32 {
        self.account_id
    }

    fn set_key(&mut self, key: i32) {
        self.account_id = key;
    }

    fn validate(&self) -> Result<(), DbError> {
        require(Self::TABLE, "name", &self.name)
    }
}
