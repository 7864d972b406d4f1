//! Compliance pool headers.
//!
//! A pool row exists only for a completed allocation; it is written together
//! with its members in one transaction and never mutated afterwards.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub id: Uuid,
    pub year: i32,
    pub created_at: DateTime<Utc>,
}

impl Pool {
    pub fn new(year: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            year,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pools")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub year: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::pool_members::Entity")]
    PoolMembers,
}

impl Related<super::pool_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PoolMembers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Pool> for ActiveModel {
    fn from(pool: &Pool) -> Self {
        Self {
            id: ActiveValue::Set(pool.id.to_string()),
            year: ActiveValue::Set(pool.year),
            created_at: ActiveValue::Set(pool.created_at),
        }
    }
}

impl TryFrom<Model> for Pool {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("pool not exists".to_string()))?,
            year: model.year,
            created_at: model.created_at,
        })
    }
}
