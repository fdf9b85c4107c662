//! Longitudinal vehicle dynamics core.
//!
//! Every computation is a pure function of a [vehicle::VehicleSpecification]:
//!
//! - [resistance] -- rolling, aerodynamic and grade resistance
//! - [engine] -- Leiderman-Khlystov external engine characteristic
//! - [traction] -- per-gear traction curves and transmission ratio bounds
//! - [performance] -- acceleration envelope, launch integration and key metrics
//! - [braking] -- static weight transfer and stopping performance
//!
//! [calc] binds them together into the entry points consumed by front ends.
//!
//! # Feature Flags
#![doc = document_features::document_features!()]

#[macro_use]
pub mod utils;

pub mod braking;
pub mod calc;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod imports;
pub mod params;
pub mod performance;
pub mod prelude;
pub mod resistance;
pub mod si;
pub mod traction;
pub mod traits;
pub mod uc;
pub mod validate;
pub mod vehicle;

#[cfg(test)]
pub(crate) mod testing;
#[cfg(test)]
mod tests;
