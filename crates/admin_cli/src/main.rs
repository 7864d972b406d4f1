use std::error::Error;

use clap::{Args, Parser, Subcommand};
use engine::{Engine, Route};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(name = "fairway_admin")]
#[command(about = "Admin utilities for Fairway (import and inspect route data)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./fairway.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Route(RouteCmd),
}

#[derive(Args, Debug)]
struct RouteCmd {
    #[command(subcommand)]
    command: RouteCommand,
}

#[derive(Subcommand, Debug)]
enum RouteCommand {
    /// Import routes from a CSV file.
    Import(RouteImportArgs),
    /// List the routes currently in the database.
    List,
}

#[derive(Args, Debug)]
struct RouteImportArgs {
    /// CSV with a header row: route_code,ship_id,vessel_type,fuel_type,year,
    /// ghg_intensity,fuel_consumption_t,distance_km,total_emissions_t
    #[arg(long)]
    file: std::path::PathBuf,
}

#[derive(Debug, Deserialize)]
struct RouteRecord {
    route_code: String,
    ship_id: String,
    vessel_type: String,
    fuel_type: String,
    year: i32,
    ghg_intensity: f64,
    fuel_consumption_t: f64,
    distance_km: f64,
    total_emissions_t: f64,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build();

    match cli.command {
        Command::Route(RouteCmd {
            command: RouteCommand::Import(args),
        }) => {
            let mut reader = csv::Reader::from_path(&args.file)?;

            let mut imported = 0usize;
            for record in reader.deserialize() {
                let record: RouteRecord = record?;
                engine
                    .add_route(Route::new(
                        record.route_code,
                        record.ship_id,
                        record.vessel_type,
                        record.fuel_type,
                        record.year,
                        record.ghg_intensity,
                        record.fuel_consumption_t,
                        record.distance_km,
                        record.total_emissions_t,
                    ))
                    .await?;
                imported += 1;
            }

            println!("imported {imported} routes from {}", args.file.display());
        }
        Command::Route(RouteCmd {
            command: RouteCommand::List,
        }) => {
            let routes = engine.list_routes().await?;
            for route in routes {
                println!(
                    "{}\t{}\t{}\t{}\t{:.4} gCO2e/MJ\t{}{}",
                    route.route_code,
                    route.ship_id,
                    route.year,
                    route.fuel_type,
                    route.ghg_intensity,
                    route.id,
                    if route.is_baseline { "\t[baseline]" } else { "" },
                );
            }
        }
    }

    Ok(())
}
