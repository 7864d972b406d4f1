//! The module contains the errors the engine can return.
//!
//! Every variant except [`Database`] is an expected business outcome that a
//! caller can map to a client error; [`Database`] is a fault.
//!
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Pool creation failed: Total Compliance Balance is negative.")]
    PoolInfeasible,
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
    #[error("Duplicate ship in pool: {0}")]
    DuplicateShip(String),
    #[error("No surplus to bank. Compliance Balance is not positive.")]
    NoSurplus,
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Cannot apply surplus to a non-deficit year.")]
    NotADeficit,
    #[error("Not enough banked surplus. Available: {available}, Tried to apply: {requested}")]
    InsufficientFunds { available: f64, requested: f64 },
    #[error("\"{0}\" not found!")]
    KeyNotFound(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::PoolInfeasible, Self::PoolInfeasible) => true,
            (Self::ValidationFailed(a), Self::ValidationFailed(b)) => a == b,
            (Self::DuplicateShip(a), Self::DuplicateShip(b)) => a == b,
            (Self::NoSurplus, Self::NoSurplus) => true,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::NotADeficit, Self::NotADeficit) => true,
            (
                Self::InsufficientFunds {
                    available: a,
                    requested: r,
                },
                Self::InsufficientFunds {
                    available: b,
                    requested: s,
                },
            ) => a == b && r == s,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
