use serde::{Deserialize, Serialize};

use super::{require, Entity};
use crate::error::DbError;

/// US state or territory referenced by customers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub state_code: String,
    pub state_name: String,
}

impl Entity for State {
    type Key = String;
    const TABLE: &'static str = "states";
    const KEY_FIELD: &'static str = "state_code";

    fn key(&self) -> String {
        self.state_code.clone()
    }

    fn set_key(&mut self, key: String) {
        self.state_code = key;
    }

    fn validate(&self) -> Result<(), DbError> {
        require(Self::TABLE, "state_code", &self.state_code)?;
        require(Self::TABLE, "state_name", &self.state_name)
    }
}
