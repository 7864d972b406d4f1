//! Route API endpoints

use api_types::route::{ComparedRouteView, ComparisonQuery, ComparisonResponse, RouteView};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn map_route(route: engine::Route) -> RouteView {
    RouteView {
        id: route.id,
        route_code: route.route_code,
        ship_id: route.ship_id,
        vessel_type: route.vessel_type,
        fuel_type: route.fuel_type,
        year: route.year,
        ghg_intensity: route.ghg_intensity,
        fuel_consumption_t: route.fuel_consumption_t,
        distance_km: route.distance_km,
        total_emissions_t: route.total_emissions_t,
        is_baseline: route.is_baseline,
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<RouteView>>, ServerError> {
    let routes = state.engine.list_routes().await?;

    Ok(Json(routes.into_iter().map(map_route).collect()))
}

pub async fn set_baseline(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.set_baseline(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn comparison(
    State(state): State<ServerState>,
    Query(query): Query<ComparisonQuery>,
) -> Result<Json<ComparisonResponse>, ServerError> {
    let comparison = state.engine.route_comparison(query.year).await?;

    Ok(Json(ComparisonResponse {
        baseline: map_route(comparison.baseline),
        comparisons: comparison
            .comparisons
            .into_iter()
            .map(|c| ComparedRouteView {
                route: map_route(c.route),
                percent_diff: c.percent_diff,
                compliant: c.compliant,
            })
            .collect(),
        target: comparison.target,
    }))
}
