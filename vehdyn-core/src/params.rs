//! Empirical parameters of the textbook methods implemented by this crate.
//!
//! Sources:
//! - Untaru et al., *Dinamica autovehiculelor pe roți* (1981) -- resistances
//! - Frățilă, Untaru, Poțîncu, *Calculul și construcția automobilelor* (1982) -- traction
//! - Stoicescu, *Proiectarea performanțelor de tracțiune* -- dynamic performance
//! - Frățilă, Mărculeșcu, *Sistemele de frânare ale autovehiculelor* (1986) -- braking

use crate::engine::LeidermanCoeffs;

/// Leiderman-Khlystov coefficients for spark-ignition engines.
pub const LEIDERMAN_GASOLINE: LeidermanCoeffs = LeidermanCoeffs {
    a: 0.87,
    b: 1.13,
    c: 1.00,
};

/// Leiderman-Khlystov coefficients for compression-ignition engines.
pub const LEIDERMAN_DIESEL: LeidermanCoeffs = LeidermanCoeffs {
    a: 0.53,
    b: 1.56,
    c: 1.09,
};

/// Peak tire-road adhesion assumed for the adhesion-limited grade (dry asphalt).
pub const ADHESION_PEAK: f64 = 0.8;

/// Worst-case total road resistance coefficient (grade plus rolling) the first
/// gear must overcome at peak torque.
pub const PSI_MAX: f64 = 0.35;

/// Design top speed, in km/h, used to size the smallest total transmission ratio.
pub const TOP_SPEED_TARGET_KPH: f64 = 180.0;

/// Wheel contribution to the rotating-mass inertia factor.
pub const DELTA_WHEELS: f64 = 0.04;

/// Driveline contribution to the rotating-mass inertia factor, scaled by the
/// square of the gearbox ratio.
pub const DELTA_BASE: f64 = 0.05;

/// Adhesion on dry asphalt.
pub const ADHESION_DRY: f64 = 0.8;
/// Adhesion on wet asphalt.
pub const ADHESION_WET: f64 = 0.5;
/// Adhesion on snow or ice.
pub const ADHESION_SNOW: f64 = 0.2;
