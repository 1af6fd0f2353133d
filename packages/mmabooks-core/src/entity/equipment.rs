use serde::{Deserialize, Serialize};

use super::{check, require, Entity};
use crate::error::DbError;

/// Brewing equipment profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    /// Generated primary key (0 until committed)
    pub equipment_id: i32,
    pub name: String,
    pub version: Option<i32>,
    /// Kettle volume in liters
    pub boil_size: Option<f32>,
    /// Fermenter volume in liters
    pub batch_size: Option<f32>,
    /// Percentage of the boil lost to trub and chiller
    pub trub_chiller_loss: Option<f32>,
    pub notes: Option<String>,
}

impl Equipment {
    /// Usable boil volume: `boil_size * (1 - trub_chiller_loss / 100)`.
    ///
    /// Computed on read, never stored. `None` when either input is missing.
    pub fn boil_capacity(&self) -> Option<f32> {
        Some(self.boil_size? * (1.0 - self.trub_chiller_loss? / 100.0))
    }
}

impl Entity for Equipment {
    type Key = i32;
    const TABLE: &'static str = "equipment";
    const KEY_FIELD: &'static str = "equipment_id";

    fn key(&self) -> i32 {
        self.equipment_id
    }

    fn set_key(&mut self, key: i32) {
        self.equipment_id = key;
    }

    fn validate(&self) -> Result<(), DbError> {
        require(Self::TABLE, "name", &self.name)?;
        for (field, value) in [
            ("boil_size", self.boil_size),
            ("batch_size", self.batch_size),
            ("trub_chiller_loss", self.trub_chiller_loss),
        ] {
            if let Some(value) = value {
                check(Self::TABLE, field, value.is_finite(), "must be a finite number")?;
            }
        }
        if let Some(loss) = self.trub_chiller_loss {
            check(
                Self::TABLE,
                "trub_chiller_loss",
                (0.0..=100.0).contains(&loss),
                "must be a percentage between 0 and 100",
            )?;
        }
        Ok(())
    }
}
