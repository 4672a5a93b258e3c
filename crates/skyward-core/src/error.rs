//! Error types for the configuration and world-feed boundaries.
//!
//! The tick itself never fails; these only surface from API calls whose
//! preconditions the caller controls.

use thiserror::Error;

use crate::types::ObjectId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid parameter '{name}' with value {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("no world object with id {0:?}")]
    UnknownObject(ObjectId),
    #[error("world object {0:?} is static; its bounds cannot be updated")]
    NotDynamic(ObjectId),
}
