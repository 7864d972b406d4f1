//! Initial schema migration - creates all tables from scratch.
//!
//! - `routes`: reported voyages per ship, input for CB aggregation
//! - `ship_compliance`: cached raw CB per (ship, year)
//! - `bank_entries`: banked surplus still available for deduction
//! - `applied_bank_entries`: immutable records of surplus applied to a year
//! - `pools`: completed compliance pools
//! - `pool_members`: per-ship before/after balances of a pool

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Routes {
    Table,
    Id,
    RouteCode,
    ShipId,
    VesselType,
    FuelType,
    Year,
    GhgIntensity,
    FuelConsumptionT,
    DistanceKm,
    TotalEmissionsT,
    IsBaseline,
}

#[derive(Iden)]
enum ShipCompliance {
    Table,
    Id,
    ShipId,
    Year,
    CbGco2eq,
}

#[derive(Iden)]
enum BankEntries {
    Table,
    Id,
    ShipId,
    Year,
    AmountGco2eq,
    CreatedAt,
}

#[derive(Iden)]
enum AppliedBankEntries {
    Table,
    Id,
    ShipId,
    Year,
    AmountGco2eq,
    CreatedAt,
}

#[derive(Iden)]
enum Pools {
    Table,
    Id,
    Year,
    CreatedAt,
}

#[derive(Iden)]
enum PoolMembers {
    Table,
    Id,
    PoolId,
    ShipId,
    CbBefore,
    CbAfter,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Routes
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Routes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Routes::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Routes::RouteCode).string().not_null())
                    .col(ColumnDef::new(Routes::ShipId).string().not_null())
                    .col(ColumnDef::new(Routes::VesselType).string().not_null())
                    .col(ColumnDef::new(Routes::FuelType).string().not_null())
                    .col(ColumnDef::new(Routes::Year).integer().not_null())
                    .col(ColumnDef::new(Routes::GhgIntensity).double().not_null())
                    .col(
                        ColumnDef::new(Routes::FuelConsumptionT)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Routes::DistanceKm).double().not_null())
                    .col(ColumnDef::new(Routes::TotalEmissionsT).double().not_null())
                    .col(
                        ColumnDef::new(Routes::IsBaseline)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-routes-ship_id-year")
                    .table(Routes::Table)
                    .col(Routes::ShipId)
                    .col(Routes::Year)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-routes-year-is_baseline")
                    .table(Routes::Table)
                    .col(Routes::Year)
                    .col(Routes::IsBaseline)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Ship compliance snapshots
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(ShipCompliance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShipCompliance::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ShipCompliance::ShipId).string().not_null())
                    .col(ColumnDef::new(ShipCompliance::Year).integer().not_null())
                    .col(
                        ColumnDef::new(ShipCompliance::CbGco2eq)
                            .double()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-ship_compliance-ship_id-year-unique")
                    .table(ShipCompliance::Table)
                    .col(ShipCompliance::ShipId)
                    .col(ShipCompliance::Year)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Bank entries
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(BankEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BankEntries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BankEntries::ShipId).string().not_null())
                    .col(ColumnDef::new(BankEntries::Year).integer().not_null())
                    .col(
                        ColumnDef::new(BankEntries::AmountGco2eq)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BankEntries::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-bank_entries-ship_id-year")
                    .table(BankEntries::Table)
                    .col(BankEntries::ShipId)
                    .col(BankEntries::Year)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Applied bank entries
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(AppliedBankEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AppliedBankEntries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AppliedBankEntries::ShipId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AppliedBankEntries::Year)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AppliedBankEntries::AmountGco2eq)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AppliedBankEntries::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-applied_bank_entries-ship_id-year")
                    .table(AppliedBankEntries::Table)
                    .col(AppliedBankEntries::ShipId)
                    .col(AppliedBankEntries::Year)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Pools
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Pools::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Pools::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Pools::Year).integer().not_null())
                    .col(ColumnDef::new(Pools::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Pool members
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(PoolMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PoolMembers::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PoolMembers::PoolId).string().not_null())
                    .col(ColumnDef::new(PoolMembers::ShipId).string().not_null())
                    .col(ColumnDef::new(PoolMembers::CbBefore).double().not_null())
                    .col(ColumnDef::new(PoolMembers::CbAfter).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-pool_members-pool_id")
                            .from(PoolMembers::Table, PoolMembers::PoolId)
                            .to(Pools::Table, Pools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-pool_members-pool_id")
                    .table(PoolMembers::Table)
                    .col(PoolMembers::PoolId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(PoolMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pools::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AppliedBankEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BankEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ShipCompliance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Routes::Table).to_owned())
            .await?;
        Ok(())
    }
}
