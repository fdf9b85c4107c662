//! Unit constants and physical constants built on [crate::si].
//!
//! Multiply an `f64` by one of these to get a quantity, e.g. `2.7 * uc::M`.
//! Every value is stored in SI base units.

use crate::si;
use std::f64::consts::PI;
use std::marker::PhantomData;

macro_rules! unit_const {
    ($($(#[$meta:meta])* $name:ident: si::$T:ident = $value:expr;)+) => {
        $(
            $(#[$meta])*
            pub const $name: si::$T = si::$T {
                dimension: PhantomData,
                units: PhantomData,
                value: $value,
            };
        )+
    };
}

unit_const!(
    R: si::Ratio = 1.0;
    PERCENT: si::Ratio = 1.0e-2;

    M: si::Length = 1.0;
    MM: si::Length = 1.0e-3;
    M2: si::Area = 1.0;

    KG: si::Mass = 1.0;
    N: si::Force = 1.0;
    NM: si::Torque = 1.0;

    KW: si::Power = 1.0e3;

    MPS: si::Velocity = 1.0;
    KPH: si::Velocity = 1.0 / 3.6;
    MPS2: si::Acceleration = 1.0;

    RAD: si::Angle = 1.0;
    DEG: si::Angle = PI / 180.0;
    RPM: si::AngularVelocity = 2.0 * PI / 60.0;

    KGPM3: si::MassDensity = 1.0;
);

unit_const!(
    /// Standard gravitational acceleration, rounded the way the vehicle-dynamics
    /// literature (Untaru, Stoicescu, Frățilă) rounds it.
    ACC_GRAV: si::Acceleration = 9.81;
    /// Sea-level air density.  No altitude or temperature correction is applied.
    RHO_AIR: si::MassDensity = 1.225;
);
