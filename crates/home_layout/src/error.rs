//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias.
//! Errors are only raised at the boundary: building rooms, validating configuration,
//! parsing floor plans. The placement, topology and routing passes never fail; they
//! degrade to empty or partial output and report through [`crate::events`].
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid room '{id}': {reason}")]
    InvalidRoom { id: String, reason: String },

    #[error("unknown room category '{0}'")]
    UnknownCategory(String),

    #[error("invalid floor plan input: {0}")]
    InvalidFloorPlanInput(String),

    #[cfg(feature = "json")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_room(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidRoom {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
