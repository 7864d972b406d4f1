//! Pool API endpoints

use api_types::pool::{PoolMemberView, PoolNew};
use axum::{Json, extract::State, http::StatusCode};
use engine::PoolMemberInput;

use crate::{ServerError, server::ServerState};

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PoolNew>,
) -> Result<(StatusCode, Json<Vec<PoolMemberView>>), ServerError> {
    let members = payload
        .members
        .into_iter()
        .map(|m| PoolMemberInput {
            ship_id: m.ship_id,
            cb_before: m.cb_before,
        })
        .collect();

    let allocated = state.engine.create_pool(payload.year, members).await?;

    Ok((
        StatusCode::CREATED,
        Json(
            allocated
                .into_iter()
                .map(|member| PoolMemberView {
                    ship_id: member.ship_id,
                    cb_before: member.cb_before,
                    cb_after: member.cb_after,
                })
                .collect(),
        ),
    ))
}
