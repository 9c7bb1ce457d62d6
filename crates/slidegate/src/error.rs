//! Error types for the access gate

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum AccessError {
    #[error("No access digest configured")]
    DigestMissing,

    #[error("Access digest must be 64 hex characters (SHA-256), got {0:?}")]
    DigestMalformed(String),
}
