//! Custom error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Structural violation in a [crate::vehicle::VehicleSpecification], detected
    /// before any curve is computed.
    #[error("invalid vehicle specification:\n{0}")]
    InvalidSpecification(String),
    #[error("invalid calculation config:\n{0}")]
    InvalidConfig(String),
}

pub type VehDynResult<T> = Result<T, Error>;
