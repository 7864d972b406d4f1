//! Per-ship-year Compliance Balance snapshots.
//!
//! A snapshot caches the last computed raw CB for a (ship, year) pair; it is
//! upserted on every computation, one row per pair.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShipCompliance {
    pub id: Uuid,
    pub ship_id: String,
    pub year: i32,
    /// Raw Compliance Balance in gCO2e; positive = surplus.
    pub cb_gco2eq: f64,
}

impl ShipCompliance {
    pub fn new(ship_id: String, year: i32, cb_gco2eq: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            ship_id,
            year,
            cb_gco2eq,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ship_compliance")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub ship_id: String,
    pub year: i32,
    #[sea_orm(column_type = "Double")]
    pub cb_gco2eq: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&ShipCompliance> for ActiveModel {
    fn from(snapshot: &ShipCompliance) -> Self {
        Self {
            id: ActiveValue::Set(snapshot.id.to_string()),
            ship_id: ActiveValue::Set(snapshot.ship_id.clone()),
            year: ActiveValue::Set(snapshot.year),
            cb_gco2eq: ActiveValue::Set(snapshot.cb_gco2eq),
        }
    }
}

impl TryFrom<Model> for ShipCompliance {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("snapshot not exists".to_string()))?,
            ship_id: model.ship_id,
            year: model.year,
            cb_gco2eq: model.cb_gco2eq,
        })
    }
}
