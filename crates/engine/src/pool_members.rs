//! Pool membership rows: one ship's before/after balance in one pool.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoolMember {
    pub id: Uuid,
    pub pool_id: Uuid,
    pub ship_id: String,
    /// Externally supplied CB the ship entered the pool with.
    pub cb_before: f64,
    /// CB after the allocation sweep.
    pub cb_after: f64,
}

impl PoolMember {
    pub fn new(pool_id: Uuid, ship_id: String, cb_before: f64, cb_after: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            pool_id,
            ship_id,
            cb_before,
            cb_after,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pool_members")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub pool_id: String,
    pub ship_id: String,
    #[sea_orm(column_type = "Double")]
    pub cb_before: f64,
    #[sea_orm(column_type = "Double")]
    pub cb_after: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pools::Entity",
        from = "Column::PoolId",
        to = "super::pools::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Pools,
}

impl Related<super::pools::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pools.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&PoolMember> for ActiveModel {
    fn from(member: &PoolMember) -> Self {
        Self {
            id: ActiveValue::Set(member.id.to_string()),
            pool_id: ActiveValue::Set(member.pool_id.to_string()),
            ship_id: ActiveValue::Set(member.ship_id.clone()),
            cb_before: ActiveValue::Set(member.cb_before),
            cb_after: ActiveValue::Set(member.cb_after),
        }
    }
}

impl TryFrom<Model> for PoolMember {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("pool member not exists".to_string()))?,
            pool_id: Uuid::parse_str(&model.pool_id)
                .map_err(|_| EngineError::KeyNotFound("pool not exists".to_string()))?,
            ship_id: model.ship_id,
            cb_before: model.cb_before,
            cb_after: model.cb_after,
        })
    }
}
