//! Banked surplus ledger rows.
//!
//! A `BankEntry` is surplus CB banked in `year`, with `amount_gco2eq` the
//! amount still available for future deduction. Draws only ever reduce the
//! amount; a fully drained row stays in storage at 0 for audit continuity.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BankEntry {
    pub id: Uuid,
    pub ship_id: String,
    /// Year the surplus was earned; draws run oldest year first.
    pub year: i32,
    /// Amount remaining, in gCO2e. Never negative, never increases.
    pub amount_gco2eq: f64,
    pub created_at: DateTime<Utc>,
}

impl BankEntry {
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
#[sea_orm(table_name = "bank_entries")]
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

impl From<&BankEntry> for ActiveModel {
    fn from(entry: &BankEntry) -> Self {
        Self {
            id: ActiveValue::Set(entry.id.to_string()),
            ship_id: ActiveValue::Set(entry.ship_id.clone()),
            year: ActiveValue::Set(entry.year),
            amount_gco2eq: ActiveValue::Set(entry.amount_gco2eq),
            created_at: ActiveValue::Set(entry.created_at),
        }
    }
}

impl TryFrom<Model> for BankEntry {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("bank entry not exists".to_string()))?,
            ship_id: model.ship_id,
            year: model.year,
            amount_gco2eq: model.amount_gco2eq,
            created_at: model.created_at,
        })
    }
}
