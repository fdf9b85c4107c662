//! Import uom si system and add unit constants
//! Zero values should be created using standard uom syntax ($Quantity::ZERO) after adding "use crate::imports::*"
//! Non-zero values should be created using standard uom syntax ($Quantity::new::<$unit>($value)) or multiplication syntax ($value * $UNIT_CONSTANT)

use uom::si;

pub use si::acceleration::meter_per_second_squared;
pub use si::angle::{degree, radian};
pub use si::angular_velocity::{radian_per_second, revolution_per_minute};
pub use si::area::square_meter;
pub use si::energy::{joule, kilojoule};
pub use si::f64::{
    Acceleration, Angle, AngularVelocity, Area, Energy, Force, Length, Mass, MassDensity, Power,
    Ratio, Time, Torque, Velocity,
};
pub use si::force::newton;
pub use si::length::{meter, millimeter};
pub use si::mass::kilogram;
pub use si::mass_density::kilogram_per_cubic_meter;
pub use si::power::{kilowatt, watt};
pub use si::ratio::{percent, ratio};
pub use si::time::second;
pub use si::torque::newton_meter;
pub use si::velocity::{kilometer_per_hour, meter_per_second};
