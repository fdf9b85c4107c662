pub mod aerodynamic;
pub mod rolling;
