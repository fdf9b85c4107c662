//! External engine characteristic after Leiderman-Khlystov:
//!
//! P(n) = P_max · (a·x + b·x² − c·x³), x = n / n_P
//!
//! M(n) = P(n) · 60 000 / (2π · n)   [N·m, with P in kW and n in rpm]

use crate::imports::*;
use crate::vehicle::EngineParams;
use std::f64::consts::PI;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Selects the polynomial coefficients of the engine characteristic
pub enum FuelType {
    #[default]
    Gasoline,
    Diesel,
}

impl FuelType {
    pub fn leiderman_coeffs(&self) -> LeidermanCoeffs {
        match self {
            Self::Gasoline => params::LEIDERMAN_GASOLINE,
            Self::Diesel => params::LEIDERMAN_DIESEL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeidermanCoeffs {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl LeidermanCoeffs {
    /// Power as a fraction of rated power at normalized speed `x`, floored at zero
    pub fn power_fraction(&self, x: f64) -> f64 {
        (self.a * x + self.b * x.powi(2) - self.c * x.powi(3)).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Engine power and torque as functions of engine speed (rpm)
pub struct EngineCurve {
    power_max: si::Power,
    speed_at_power_max_rpm: f64,
    coeffs: LeidermanCoeffs,
}

impl EngineCurve {
    pub fn new(power_max: si::Power, speed_at_power_max_rpm: f64, fuel_type: FuelType) -> Self {
        Self {
            power_max,
            speed_at_power_max_rpm,
            coeffs: fuel_type.leiderman_coeffs(),
        }
    }

    pub fn from_params(engine: &EngineParams) -> Self {
        Self::new(
            engine.power_max,
            engine.speed_at_power_max_rpm(),
            engine.fuel_type,
        )
    }

    pub fn coeffs(&self) -> LeidermanCoeffs {
        self.coeffs
    }

    /// Effective power at engine speed `n_rpm`; never negative
    pub fn power_at(&self, n_rpm: f64) -> si::Power {
        self.power_max * self.coeffs.power_fraction(n_rpm / self.speed_at_power_max_rpm)
    }

    /// Effective torque, in N·m, at engine speed `n_rpm`; zero at standstill
    pub fn torque_at(&self, n_rpm: f64) -> f64 {
        if n_rpm > 0.0 {
            self.power_at(n_rpm).get::<si::watt>() * 60.0 / (2.0 * PI * n_rpm)
        } else {
            0.0
        }
    }

    /// Samples the curve at every engine speed in `speeds_rpm`
    pub fn sample(&self, speeds_rpm: &[f64]) -> EngineSweep {
        EngineSweep {
            speeds_rpm: speeds_rpm.to_vec(),
            powers_kw: speeds_rpm
                .iter()
                .map(|n| self.power_at(*n).get::<si::kilowatt>())
                .collect(),
            torques_nm: speeds_rpm.iter().map(|n| self.torque_at(*n)).collect(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
/// Engine characteristic sampled over a speed sweep
pub struct EngineSweep {
    pub speeds_rpm: Vec<f64>,
    pub powers_kw: Vec<f64>,
    pub torques_nm: Vec<f64>,
}

impl EngineSweep {
    /// Highest sampled torque, in N·m
    pub fn torque_peak(&self) -> f64 {
        self.torques_nm.iter().cloned().fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gasoline() -> EngineCurve {
        EngineCurve::new(92.0 * uc::KW, 5500.0, FuelType::Gasoline)
    }

    #[test]
    fn test_rated_point() {
        // a + b - c = 1 for both coefficient sets
        for fuel in [FuelType::Gasoline, FuelType::Diesel] {
            let engine = EngineCurve::new(92.0 * uc::KW, 5500.0, fuel);
            assert!(almost_eq_uom(&engine.power_at(5500.0), &(92.0 * uc::KW), None));
        }
    }

    #[test]
    fn test_zero_speed() {
        let engine = gasoline();
        assert_eq!(engine.power_at(0.0), si::Power::ZERO);
        assert_eq!(engine.torque_at(0.0), 0.0);
        assert!(!engine.torque_at(0.0).is_nan());
    }

    #[test]
    fn test_power_clamped_non_negative() {
        let engine = gasoline();
        // the cubic term dominates well past rated speed
        assert_eq!(engine.power_at(2.5 * 5500.0), si::Power::ZERO);
        assert_eq!(engine.torque_at(2.5 * 5500.0), 0.0);
        let speeds = Vec::<f64>::linspace(850.0, 6500.0, 100);
        assert!(speeds.iter().all(|n| engine.power_at(*n) >= si::Power::ZERO));
    }

    #[test]
    fn test_torque_from_power() {
        let engine = gasoline();
        let n = 4000.0;
        let expected = engine.power_at(n).get::<si::kilowatt>() * 1000.0 * 60.0 / (2.0 * PI * n);
        assert!(almost_eq(engine.torque_at(n), expected, None));
    }

    #[test]
    fn test_fuel_type_changes_curve() {
        let gas = gasoline();
        let diesel = EngineCurve::new(92.0 * uc::KW, 5500.0, FuelType::Diesel);
        let speeds = Vec::<f64>::linspace(850.0, 6500.0, 50);
        let gas_sweep = gas.sample(&speeds);
        let diesel_sweep = diesel.sample(&speeds);
        assert_ne!(gas_sweep.torques_nm, diesel_sweep.torques_nm);
        // diesel characteristic is more elastic: less torque low in the range
        assert!(diesel_sweep.torques_nm[0] < gas_sweep.torques_nm[0]);
    }

    #[test]
    fn test_sample_shape() {
        let sweep = gasoline().sample(&Vec::<f64>::linspace(850.0, 6500.0, 100));
        assert_eq!(sweep.speeds_rpm.len(), 100);
        assert_eq!(sweep.powers_kw.len(), 100);
        assert_eq!(sweep.torques_nm.len(), 100);
        assert_eq!(sweep.speeds_rpm[0], 850.0);
        assert!(almost_eq(*sweep.speeds_rpm.last().unwrap(), 6500.0, None));
        // peak torque of the gasoline characteristic sits near x = 0.5
        let peak = sweep.torque_peak();
        assert!(peak > 185.0 && peak < 195.0, "{peak}");
    }
}
