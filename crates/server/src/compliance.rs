//! Compliance Balance API endpoints

use api_types::compliance::{AdjustedCbResponse, CbQuery, CbResponse};
use axum::{
    Json,
    extract::{Query, State},
};

use crate::{ServerError, server::ServerState};

pub async fn cb(
    State(state): State<ServerState>,
    Query(query): Query<CbQuery>,
) -> Result<Json<CbResponse>, ServerError> {
    let cb = state.engine.compute_cb(&query.ship_id, query.year).await?;

    Ok(Json(CbResponse {
        ship_id: query.ship_id,
        year: query.year,
        compliance_balance: cb,
    }))
}

pub async fn adjusted_cb(
    State(state): State<ServerState>,
    Query(query): Query<CbQuery>,
) -> Result<Json<AdjustedCbResponse>, ServerError> {
    let adjusted = state.engine.adjusted_cb(&query.ship_id, query.year).await?;

    Ok(Json(AdjustedCbResponse {
        ship_id: query.ship_id,
        year: query.year,
        adjusted_compliance_balance: adjusted,
    }))
}
