mod vehicle_params;
mod vehicle_spec;

pub use vehicle_params::*;
pub use vehicle_spec::*;
