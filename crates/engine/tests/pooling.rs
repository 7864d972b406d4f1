use engine::{Engine, EngineError, PoolMemberInput};
use migration::MigratorTrait;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db.clone()).build();
    (engine, db)
}

fn member(ship_id: &str, cb_before: f64) -> PoolMemberInput {
    PoolMemberInput {
        ship_id: ship_id.to_string(),
        cb_before,
    }
}

async fn count(db: &DatabaseConnection, table: &str) -> i64 {
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_string(
            backend,
            format!("SELECT COUNT(*) AS cnt FROM {table}"),
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get("", "cnt").unwrap()
}

#[tokio::test]
async fn negative_total_is_rejected_before_any_persistence() {
    let (engine, db) = engine_with_db().await;

    let err = engine
        .create_pool(2025, vec![member("A", -100.0), member("B", -50.0)])
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::PoolInfeasible);
    assert_eq!(count(&db, "pools").await, 0);
    assert_eq!(count(&db, "pool_members").await, 0);
}

#[tokio::test]
async fn surplus_covers_single_deficit_and_pool_is_committed() {
    let (engine, db) = engine_with_db().await;

    let members = engine
        .create_pool(2025, vec![member("Surplus", 100.0), member("Deficit", -50.0)])
        .await
        .unwrap();

    let deficit = members.iter().find(|m| m.ship_id == "Deficit").unwrap();
    assert_eq!(deficit.cb_before, -50.0);
    assert_eq!(deficit.cb_after, 0.0);

    let surplus = members.iter().find(|m| m.ship_id == "Surplus").unwrap();
    assert_eq!(surplus.cb_before, 100.0);
    assert_eq!(surplus.cb_after, 50.0);

    assert_eq!(count(&db, "pools").await, 1);
    assert_eq!(count(&db, "pool_members").await, 2);
}

#[tokio::test]
async fn multiple_deficits_draw_in_greedy_order() {
    let (engine, _db) = engine_with_db().await;

    let members = engine
        .create_pool(
            2025,
            vec![
                member("S1", 100.0),
                member("D1", -50.0),
                member("S2", 20.0),
                member("D2", -80.0),
            ],
        )
        .await
        .unwrap();

    let by_id = |id: &str| members.iter().find(|m| m.ship_id == id).unwrap();
    // D2 is most negative and takes S1's 100 first; D1 then gets S2's 20.
    assert_eq!(by_id("D2").cb_after, 20.0);
    assert_eq!(by_id("D1").cb_after, -30.0);
    assert_eq!(by_id("S1").cb_after, 0.0);
    assert_eq!(by_id("S2").cb_after, 0.0);
}

#[tokio::test]
async fn allocation_conserves_the_pool_total() {
    let (engine, _db) = engine_with_db().await;

    let input = vec![
        member("A", 312.5),
        member("B", -41.25),
        member("C", 0.0),
        member("D", -250.0),
    ];
    let before: f64 = input.iter().map(|m| m.cb_before).sum();

    let members = engine.create_pool(2025, input).await.unwrap();
    let after: f64 = members.iter().map(|m| m.cb_after).sum();

    assert_eq!(before, after);
}

#[tokio::test]
async fn duplicate_ship_is_rejected() {
    let (engine, db) = engine_with_db().await;

    let err = engine
        .create_pool(2025, vec![member("A", 100.0), member("A", -50.0)])
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::DuplicateShip("A".to_string()));
    assert_eq!(count(&db, "pools").await, 0);
    assert_eq!(count(&db, "pool_members").await, 0);
}

#[tokio::test]
async fn members_share_the_committed_pool_row() {
    let (engine, db) = engine_with_db().await;

    let members = engine
        .create_pool(2026, vec![member("S", 10.0), member("D", -10.0)])
        .await
        .unwrap();

    let pool_id = members[0].pool_id;
    assert!(members.iter().all(|m| m.pool_id == pool_id));

    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_sql_and_values(
            backend,
            "SELECT year FROM pools WHERE id = ?",
            vec![pool_id.to_string().into()],
        ))
        .await
        .unwrap()
        .unwrap();
    let year: i32 = row.try_get("", "year").unwrap();
    assert_eq!(year, 2026);
}
