use engine::{Engine, EngineError, Route, TARGET_INTENSITY_2025};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db.clone()).build();
    (engine, db)
}

async fn seed_route(engine: &Engine, route_code: &str, year: i32, ghg_intensity: f64) -> Uuid {
    engine
        .add_route(Route::new(
            route_code.to_string(),
            "SHIP-1".to_string(),
            "Container".to_string(),
            "LNG".to_string(),
            year,
            ghg_intensity,
            1.5,
            8_000.0,
            4.6,
        ))
        .await
        .unwrap()
}

#[tokio::test]
async fn set_baseline_swaps_the_flag_within_the_year() {
    let (engine, _db) = engine_with_db().await;
    let first = seed_route(&engine, "R-1", 2025, 90.0).await;
    let second = seed_route(&engine, "R-2", 2025, 85.0).await;
    let other_year = seed_route(&engine, "R-3", 2024, 88.0).await;

    engine.set_baseline(first).await.unwrap();
    engine.set_baseline(other_year).await.unwrap();
    engine.set_baseline(second).await.unwrap();

    let routes = engine.list_routes().await.unwrap();
    let baseline = |id: Uuid| routes.iter().find(|r| r.id == id).unwrap().is_baseline;
    assert!(!baseline(first));
    assert!(baseline(second));
    // A different year keeps its own baseline.
    assert!(baseline(other_year));
}

#[tokio::test]
async fn set_baseline_on_unknown_route_is_not_found() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.set_baseline(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn comparison_annotates_routes_against_the_baseline() {
    let (engine, _db) = engine_with_db().await;
    let baseline = seed_route(&engine, "R-1", 2025, 90.0).await;
    seed_route(&engine, "R-2", 2025, 85.0).await;
    seed_route(&engine, "R-3", 2025, 91.0).await;
    engine.set_baseline(baseline).await.unwrap();

    let comparison = engine.route_comparison(2025).await.unwrap();

    assert_eq!(comparison.baseline.id, baseline);
    assert_eq!(comparison.target, TARGET_INTENSITY_2025);
    assert_eq!(comparison.comparisons.len(), 2);

    let by_code = |code: &str| {
        comparison
            .comparisons
            .iter()
            .find(|c| c.route.route_code == code)
            .unwrap()
    };
    assert_eq!(by_code("R-2").percent_diff, (85.0 / 90.0 - 1.0) * 100.0);
    assert!(by_code("R-2").compliant);
    assert!(!by_code("R-3").compliant);
}

#[tokio::test]
async fn comparison_without_a_baseline_is_not_found() {
    let (engine, _db) = engine_with_db().await;
    seed_route(&engine, "R-1", 2025, 90.0).await;

    let err = engine.route_comparison(2025).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}
