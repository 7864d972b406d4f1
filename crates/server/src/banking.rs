//! Banking API endpoints

use api_types::banking::{ApplyBankedSurplus, BankEntryView, BankSurplus, Message, RecordsQuery};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

pub async fn records(
    State(state): State<ServerState>,
    Query(query): Query<RecordsQuery>,
) -> Result<Json<Vec<BankEntryView>>, ServerError> {
    let entries = state.engine.bank_records(&query.ship_id).await?;

    Ok(Json(
        entries
            .into_iter()
            .map(|entry| BankEntryView {
                id: entry.id,
                ship_id: entry.ship_id,
                year: entry.year,
                amount_gco2eq: entry.amount_gco2eq,
            })
            .collect(),
    ))
}

pub async fn bank(
    State(state): State<ServerState>,
    Json(payload): Json<BankSurplus>,
) -> Result<(StatusCode, Json<Message>), ServerError> {
    state
        .engine
        .bank_surplus(&payload.ship_id, payload.year)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Message {
            message: "Surplus banked successfully.".to_string(),
        }),
    ))
}

pub async fn apply(
    State(state): State<ServerState>,
    Json(payload): Json<ApplyBankedSurplus>,
) -> Result<Json<Message>, ServerError> {
    state
        .engine
        .apply_banked_surplus(&payload.ship_id, payload.deficit_year, payload.amount)
        .await?;

    Ok(Json(Message {
        message: "Banked surplus applied successfully.".to_string(),
    }))
}
