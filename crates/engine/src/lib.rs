use std::collections::HashSet;

pub use allocation::{AllocatedMember, PoolMemberInput, allocate_surplus};
pub use applied_bank_entries::AppliedBankEntry;
pub use bank_entries::BankEntry;
pub use compliance::ShipCompliance;
pub use error::EngineError;
pub use formulas::TARGET_INTENSITY_2025;
pub use pool_members::PoolMember;
pub use pools::Pool;
pub use routes::{ComparedRoute, Route, RouteComparison};
use sea_orm::{
    ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*, sea_query::Expr,
};
use uuid::Uuid;

mod allocation;
mod applied_bank_entries;
mod bank_entries;
mod compliance;
mod error;
mod formulas;
mod pool_members;
mod pools;
mod routes;

type ResultEngine<T> = Result<T, EngineError>;

/// Compliance Balance engine.
///
/// Owns the database connection; every operation that touches more than one
/// row runs inside a single transaction, so callers either observe the whole
/// effect or none of it.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Computes and stores the raw Compliance Balance for a ship-year.
    ///
    /// Aggregates the ship's routes for the year (sum of energy in scope,
    /// mean GHG intensity) and upserts the `ship_compliance` snapshot.
    pub async fn compute_cb(&self, ship_id: &str, year: i32) -> ResultEngine<f64> {
        let route_models = routes::Entity::find()
            .filter(routes::Column::ShipId.eq(ship_id))
            .filter(routes::Column::Year.eq(year))
            .all(&self.database)
            .await?;

        if route_models.is_empty() {
            return Err(EngineError::KeyNotFound(format!(
                "no routes for ship {ship_id} in {year}"
            )));
        }

        let ship_routes = route_models
            .into_iter()
            .map(Route::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;

        let total_energy: f64 = ship_routes.iter().map(Route::energy_in_scope).sum();
        let avg_intensity: f64 =
            ship_routes.iter().map(|r| r.ghg_intensity).sum::<f64>() / ship_routes.len() as f64;

        let cb = formulas::compliance_balance(
            formulas::TARGET_INTENSITY_2025,
            avg_intensity,
            total_energy,
        );

        let existing = compliance::Entity::find()
            .filter(compliance::Column::ShipId.eq(ship_id))
            .filter(compliance::Column::Year.eq(year))
            .one(&self.database)
            .await?;

        match existing {
            Some(model) => {
                let snapshot = compliance::ActiveModel {
                    id: ActiveValue::Set(model.id),
                    cb_gco2eq: ActiveValue::Set(cb),
                    ..Default::default()
                };
                snapshot.update(&self.database).await?;
            }
            None => {
                let snapshot = ShipCompliance::new(ship_id.to_string(), year, cb);
                compliance::ActiveModel::from(&snapshot)
                    .insert(&self.database)
                    .await?;
            }
        }

        Ok(cb)
    }

    /// Compliance Balance after banked funds applied to the year.
    ///
    /// `adjusted = raw + sum(applied entries for the ship-year)`.
    pub async fn adjusted_cb(&self, ship_id: &str, year: i32) -> ResultEngine<f64> {
        let raw = self.compute_cb(ship_id, year).await?;

        let applied = applied_bank_entries::Entity::find()
            .filter(applied_bank_entries::Column::ShipId.eq(ship_id))
            .filter(applied_bank_entries::Column::Year.eq(year))
            .all(&self.database)
            .await?;
        let total_applied: f64 = applied.iter().map(|e| e.amount_gco2eq).sum();

        Ok(raw + total_applied)
    }

    /// Lists a ship's bank entries that still have funds, oldest year first.
    pub async fn bank_records(&self, ship_id: &str) -> ResultEngine<Vec<BankEntry>> {
        let models = bank_entries::Entity::find()
            .filter(bank_entries::Column::ShipId.eq(ship_id))
            .filter(bank_entries::Column::AmountGco2eq.gt(0.0))
            .order_by_asc(bank_entries::Column::Year)
            .order_by_asc(bank_entries::Column::CreatedAt)
            .all(&self.database)
            .await?;

        models.into_iter().map(BankEntry::try_from).collect()
    }

    /// Banks the surplus of a ship-year as a new ledger entry.
    ///
    /// The year's CB must be positive; the whole surplus is banked.
    pub async fn bank_surplus(&self, ship_id: &str, year: i32) -> ResultEngine<BankEntry> {
        let cb = self.compute_cb(ship_id, year).await?;

        if cb <= 0.0 {
            return Err(EngineError::NoSurplus);
        }

        let entry = BankEntry::new(ship_id.to_string(), year, cb);
        bank_entries::ActiveModel::from(&entry)
            .insert(&self.database)
            .await?;

        Ok(entry)
    }

    /// Applies banked surplus against a deficit year.
    ///
    /// Draws FIFO across ALL of the ship's entries (every bank year, oldest
    /// first), reducing each row by `min(remaining, still_needed)`. Rows are
    /// never deleted, only reduced, including to exactly 0. The row updates
    /// and the one applied-entry record commit atomically.
    ///
    /// Precondition order is part of the contract: amount positive, year in
    /// deficit, funds sufficient.
    pub async fn apply_banked_surplus(
        &self,
        ship_id: &str,
        deficit_year: i32,
        amount: f64,
    ) -> ResultEngine<AppliedBankEntry> {
        if amount <= 0.0 {
            return Err(EngineError::InvalidAmount(
                "amount to apply must be > 0".to_string(),
            ));
        }

        let cb = self.compute_cb(ship_id, deficit_year).await?;
        if cb >= 0.0 {
            return Err(EngineError::NotADeficit);
        }

        let entries = bank_entries::Entity::find()
            .filter(bank_entries::Column::ShipId.eq(ship_id))
            .filter(bank_entries::Column::AmountGco2eq.gt(0.0))
            .order_by_asc(bank_entries::Column::Year)
            .order_by_asc(bank_entries::Column::CreatedAt)
            .all(&self.database)
            .await?;

        let available: f64 = entries.iter().map(|e| e.amount_gco2eq).sum();
        if available < amount {
            return Err(EngineError::InsufficientFunds {
                available,
                requested: amount,
            });
        }

        let db_tx = self.database.begin().await?;

        let mut still_needed = amount;
        for entry in &entries {
            if still_needed <= 0.0 {
                break;
            }

            let draw = entry.amount_gco2eq.min(still_needed);
            let updated = bank_entries::ActiveModel {
                id: ActiveValue::Set(entry.id.clone()),
                amount_gco2eq: ActiveValue::Set(entry.amount_gco2eq - draw),
                ..Default::default()
            };
            updated.update(&db_tx).await?;
            still_needed -= draw;
        }

        let record = AppliedBankEntry::new(ship_id.to_string(), deficit_year, amount);
        applied_bank_entries::ActiveModel::from(&record)
            .insert(&db_tx)
            .await?;

        db_tx.commit().await?;

        Ok(record)
    }

    /// Creates a compliance pool for a year and allocates CB across members.
    ///
    /// Validates (duplicates, feasibility), runs the greedy sweep, checks the
    /// no-worse-off rules over the full result and commits pool + members as
    /// one transaction. Nothing is persisted on any failure.
    pub async fn create_pool(
        &self,
        year: i32,
        members: Vec<PoolMemberInput>,
    ) -> ResultEngine<Vec<PoolMember>> {
        let mut seen = HashSet::new();
        for member in &members {
            if !seen.insert(member.ship_id.as_str()) {
                return Err(EngineError::DuplicateShip(member.ship_id.clone()));
            }
        }

        let total: f64 = members.iter().map(|m| m.cb_before).sum();
        if total < 0.0 {
            return Err(EngineError::PoolInfeasible);
        }

        let allocated = allocation::allocate_surplus(&members);

        for member in &allocated {
            if member.cb_before < 0.0 && member.cb_after < member.cb_before {
                return Err(EngineError::ValidationFailed(format!(
                    "Deficit ship {} exited worse off.",
                    member.ship_id
                )));
            }
            if member.cb_before >= 0.0 && member.cb_after < 0.0 {
                return Err(EngineError::ValidationFailed(format!(
                    "Surplus ship {} exited with a deficit.",
                    member.ship_id
                )));
            }
        }

        let pool = Pool::new(year);

        let db_tx = self.database.begin().await?;
        pools::ActiveModel::from(&pool).insert(&db_tx).await?;

        let mut result = Vec::with_capacity(allocated.len());
        for member in allocated {
            let row = PoolMember::new(pool.id, member.ship_id, member.cb_before, member.cb_after);
            pool_members::ActiveModel::from(&row).insert(&db_tx).await?;
            result.push(row);
        }

        db_tx.commit().await?;

        Ok(result)
    }

    /// Inserts a new route row.
    pub async fn add_route(&self, route: Route) -> ResultEngine<Uuid> {
        routes::ActiveModel::from(&route)
            .insert(&self.database)
            .await?;
        Ok(route.id)
    }

    /// Returns all routes.
    pub async fn list_routes(&self) -> ResultEngine<Vec<Route>> {
        let models = routes::Entity::find().all(&self.database).await?;
        models.into_iter().map(Route::try_from).collect()
    }

    /// Marks a route as the baseline for its year.
    ///
    /// Clears the flag on every other route of the same year and sets it on
    /// this one, in one transaction.
    pub async fn set_baseline(&self, route_id: Uuid) -> ResultEngine<()> {
        let model = routes::Entity::find_by_id(route_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("route not exists".to_string()))?;

        let db_tx = self.database.begin().await?;

        routes::Entity::update_many()
            .col_expr(routes::Column::IsBaseline, Expr::value(false))
            .filter(routes::Column::Year.eq(model.year))
            .exec(&db_tx)
            .await?;

        let updated = routes::ActiveModel {
            id: ActiveValue::Set(model.id),
            is_baseline: ActiveValue::Set(true),
            ..Default::default()
        };
        updated.update(&db_tx).await?;

        db_tx.commit().await?;
        Ok(())
    }

    /// Compares a year's routes against its baseline route.
    pub async fn route_comparison(&self, year: i32) -> ResultEngine<RouteComparison> {
        let baseline = routes::Entity::find()
            .filter(routes::Column::Year.eq(year))
            .filter(routes::Column::IsBaseline.eq(true))
            .one(&self.database)
            .await?
            .ok_or_else(|| {
                EngineError::KeyNotFound(format!("no baseline route set for year {year}"))
            })?;
        let baseline = Route::try_from(baseline)?;

        let others = routes::Entity::find()
            .filter(routes::Column::Year.eq(year))
            .filter(routes::Column::IsBaseline.eq(false))
            .all(&self.database)
            .await?;

        let comparisons = others
            .into_iter()
            .map(|model| {
                let route = Route::try_from(model)?;
                let percent_diff = (route.ghg_intensity / baseline.ghg_intensity - 1.0) * 100.0;
                let compliant = route.ghg_intensity <= formulas::TARGET_INTENSITY_2025;
                Ok(ComparedRoute {
                    route,
                    percent_diff,
                    compliant,
                })
            })
            .collect::<ResultEngine<Vec<_>>>()?;

        Ok(RouteComparison {
            baseline,
            comparisons,
            target: formulas::TARGET_INTENSITY_2025,
        })
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            database: self.database,
        }
    }
}
