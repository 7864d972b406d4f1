use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use crate::{banking, compliance, pools, routes};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/routes", get(routes::list))
        .route("/routes/{id}/baseline", post(routes::set_baseline))
        .route("/routes/comparison", get(routes::comparison))
        .route("/compliance/cb", get(compliance::cb))
        .route("/compliance/adjusted-cb", get(compliance::adjusted_cb))
        .route("/banking/records", get(banking::records))
        .route("/banking/bank", post(banking::bank))
        .route("/banking/apply", post(banking::apply))
        .route("/pools", post(pools::create))
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3001").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use migration::MigratorTrait;
    use sea_orm::Database;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn test_router() -> Router {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        let engine = Engine::builder().database(db).build();
        router(ServerState {
            engine: Arc::new(engine),
        })
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_pool_returns_allocated_members() {
        let app = test_router().await;

        let response = app
            .oneshot(json_request(
                "/pools",
                json!({
                    "year": 2025,
                    "members": [
                        { "shipId": "Surplus", "cbBefore": 100.0 },
                        { "shipId": "Deficit", "cbBefore": -50.0 },
                    ],
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        let members = body.as_array().unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0]["shipId"], "Deficit");
        assert_eq!(members[0]["cbAfter"], 0.0);
        assert_eq!(members[1]["shipId"], "Surplus");
        assert_eq!(members[1]["cbAfter"], 50.0);
    }

    #[tokio::test]
    async fn infeasible_pool_is_unprocessable() {
        let app = test_router().await;

        let response = app
            .oneshot(json_request(
                "/pools",
                json!({
                    "year": 2025,
                    "members": [
                        { "shipId": "A", "cbBefore": -100.0 },
                        { "shipId": "B", "cbBefore": -50.0 },
                    ],
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .contains("Total Compliance Balance is negative")
        );
    }

    #[tokio::test]
    async fn banking_without_routes_is_not_found() {
        let app = test_router().await;

        let response = app
            .oneshot(json_request(
                "/banking/bank",
                json!({ "shipId": "GHOST", "year": 2025 }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn bank_records_for_unknown_ship_are_empty() {
        let app = test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/banking/records?shipId=GHOST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body, json!([]));
    }
}
