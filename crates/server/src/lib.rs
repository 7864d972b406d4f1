use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{run, run_with_listener, spawn_with_listener};

mod banking;
mod compliance;
mod pools;
mod routes;
mod server;

pub mod types {
    pub mod route {
        pub use api_types::route::{ComparedRouteView, ComparisonResponse, RouteView};
    }

    pub mod compliance {
        pub use api_types::compliance::{AdjustedCbResponse, CbResponse};
    }

    pub mod banking {
        pub use api_types::banking::{ApplyBankedSurplus, BankEntryView, BankSurplus, Message};
    }

    pub mod pool {
        pub use api_types::pool::{PoolMemberNew, PoolMemberView, PoolNew};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

//TODO: Find a better solution
#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::PoolInfeasible
        | EngineError::ValidationFailed(_)
        | EngineError::DuplicateShip(_)
        | EngineError::NoSurplus
        | EngineError::InvalidAmount(_)
        | EngineError::NotADeficit
        | EngineError::InsufficientFunds { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_infeasible_pool_maps_to_422() {
        let res = ServerError::from(EngineError::PoolInfeasible).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn engine_insufficient_funds_maps_to_422() {
        let res = ServerError::from(EngineError::InsufficientFunds {
            available: 80.0,
            requested: 100.0,
        })
        .into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
