//! The module contains the `Route` struct and its implementation.
//!
//! A route is a reported voyage for a ship; route rows are the raw material
//! the Compliance Balance aggregation works on.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, formulas};

/// A reported voyage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Stable identifier, a UUID generated once and persisted.
    pub id: Uuid,
    /// Operator-facing route code (e.g. "R-ROT-SIN-01").
    pub route_code: String,
    pub ship_id: String,
    pub vessel_type: String,
    pub fuel_type: String,
    /// Reporting year of the voyage.
    pub year: i32,
    /// Achieved GHG intensity in gCO2e/MJ.
    pub ghg_intensity: f64,
    pub fuel_consumption_t: f64,
    pub distance_km: f64,
    pub total_emissions_t: f64,
    /// At most one baseline per year, maintained by the set-baseline operation.
    pub is_baseline: bool,
}

impl Route {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        route_code: String,
        ship_id: String,
        vessel_type: String,
        fuel_type: String,
        year: i32,
        ghg_intensity: f64,
        fuel_consumption_t: f64,
        distance_km: f64,
        total_emissions_t: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            route_code,
            ship_id,
            vessel_type,
            fuel_type,
            year,
            ghg_intensity,
            fuel_consumption_t,
            distance_km,
            total_emissions_t,
            is_baseline: false,
        }
    }

    /// Energy in scope for this route, in MJ.
    pub fn energy_in_scope(&self) -> f64 {
        formulas::energy_in_scope(self.fuel_consumption_t)
    }
}

/// A non-baseline route annotated against the year's baseline.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparedRoute {
    pub route: Route,
    /// Intensity delta vs the baseline, in percent.
    pub percent_diff: f64,
    /// Whether the route meets the regulatory target intensity.
    pub compliant: bool,
}

/// Result of the baseline comparison view for one year.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteComparison {
    pub baseline: Route,
    pub comparisons: Vec<ComparedRoute>,
    /// Target intensity the `compliant` flags were computed against.
    pub target: f64,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "routes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub route_code: String,
    pub ship_id: String,
    pub vessel_type: String,
    pub fuel_type: String,
    pub year: i32,
    #[sea_orm(column_type = "Double")]
    pub ghg_intensity: f64,
    #[sea_orm(column_type = "Double")]
    pub fuel_consumption_t: f64,
    #[sea_orm(column_type = "Double")]
    pub distance_km: f64,
    #[sea_orm(column_type = "Double")]
    pub total_emissions_t: f64,
    pub is_baseline: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Route> for ActiveModel {
    fn from(route: &Route) -> Self {
        Self {
            id: ActiveValue::Set(route.id.to_string()),
            route_code: ActiveValue::Set(route.route_code.clone()),
            ship_id: ActiveValue::Set(route.ship_id.clone()),
            vessel_type: ActiveValue::Set(route.vessel_type.clone()),
            fuel_type: ActiveValue::Set(route.fuel_type.clone()),
            year: ActiveValue::Set(route.year),
            ghg_intensity: ActiveValue::Set(route.ghg_intensity),
            fuel_consumption_t: ActiveValue::Set(route.fuel_consumption_t),
            distance_km: ActiveValue::Set(route.distance_km),
            total_emissions_t: ActiveValue::Set(route.total_emissions_t),
            is_baseline: ActiveValue::Set(route.is_baseline),
        }
    }
}

impl TryFrom<Model> for Route {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("route not exists".to_string()))?,
            route_code: model.route_code,
            ship_id: model.ship_id,
            vessel_type: model.vessel_type,
            fuel_type: model.fuel_type,
            year: model.year,
            ghg_intensity: model.ghg_intensity,
            fuel_consumption_t: model.fuel_consumption_t,
            distance_km: model.distance_km,
            total_emissions_t: model.total_emissions_t,
            is_baseline: model.is_baseline,
        })
    }
}
