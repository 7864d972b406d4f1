//! Applications of banked surplus against a deficit year.
//!
//! One immutable row per `apply` call, regardless of how many bank entries
//! the amount was drawn from. The adjusted CB of a year is the raw CB plus
//! the sum of these rows for that ship-year.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppliedBankEntry {
    pub id: Uuid,
    pub ship_id: String,
    /// The deficit year the surplus was applied to.
    pub year: i32,
    pub amount_gco2eq: f64,
    pub created_at: DateTime<Utc>,
}

impl AppliedBankEntry {
    pub fn new(ship_id: String, year: i32, amount_gco2eq: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            ship_id,
            year,
            amount_gco2eq,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "applied_bank_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub ship_id: String,
    pub year: i32,
    #[sea_orm(column_type = "Double")]
    pub amount_gco2eq: f64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&AppliedBankEntry> for ActiveModel {
    fn from(entry: &AppliedBankEntry) -> Self {
        Self {
            id: ActiveValue::Set(entry.id.to_string()),
            ship_id: ActiveValue::Set(entry.ship_id.clone()),
            year: ActiveValue::Set(entry.year),
            amount_gco2eq: ActiveValue::Set(entry.amount_gco2eq),
            created_at: ActiveValue::Set(entry.created_at),
        }
    }
}

impl TryFrom<Model> for AppliedBankEntry {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("applied entry not exists".to_string()))?,
            ship_id: model.ship_id,
            year: model.year,
            amount_gco2eq: model.amount_gco2eq,
            created_at: model.created_at,
        })
    }
}
