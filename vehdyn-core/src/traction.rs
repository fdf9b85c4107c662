//! Per-gear traction curves and transmission ratio design bounds.

use crate::config::CalcConfig;
use crate::engine::{EngineCurve, EngineSweep, FuelType};
use crate::imports::*;
use crate::resistance::VehicleRes;
use crate::vehicle::VehicleSpecification;
use std::f64::consts::PI;

/// Relative slack on the engine speed bounds so that sweep end points computed
/// through a speed round trip still count as in range
const SPEED_RANGE_TOL: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
/// Engine, gearbox, final drive and driven wheels, mapping engine speed and
/// torque to vehicle speed and tractive force
pub struct Drivetrain {
    engine: EngineCurve,
    speed_idle_rpm: f64,
    speed_max_rpm: f64,
    gear_ratios: Vec<f64>,
    final_drive: f64,
    efficiency: f64,
    radius: si::Length,
}

impl Drivetrain {
    pub fn from_spec(spec: &VehicleSpecification) -> Self {
        Self {
            engine: EngineCurve::from_params(&spec.engine),
            speed_idle_rpm: spec.engine.speed_idle_rpm(),
            speed_max_rpm: spec.engine.speed_max_rpm(),
            gear_ratios: spec.transmission.gear_ratios.clone(),
            final_drive: spec.transmission.final_drive,
            efficiency: spec.transmission.efficiency.get::<si::ratio>(),
            radius: spec.tire.radius_dynamic,
        }
    }

    pub fn engine(&self) -> &EngineCurve {
        &self.engine
    }

    pub fn gear_count(&self) -> usize {
        self.gear_ratios.len()
    }

    pub fn gear_ratios(&self) -> &[f64] {
        &self.gear_ratios
    }

    pub fn gear_ratio(&self, gear_idx: usize) -> f64 {
        self.gear_ratios[gear_idx]
    }

    pub fn total_ratio(&self, gear_idx: usize) -> f64 {
        self.gear_ratios[gear_idx] * self.final_drive
    }

    /// `n_points` engine speeds from idle to max, both included
    pub fn engine_speeds(&self, n_points: usize) -> Vec<f64> {
        Vec::<f64>::linspace(self.speed_idle_rpm, self.speed_max_rpm, n_points)
    }

    /// Whether `n_rpm` lies within [idle, max]
    pub fn in_speed_range(&self, n_rpm: f64) -> bool {
        n_rpm >= self.speed_idle_rpm * (1.0 - SPEED_RANGE_TOL)
            && n_rpm <= self.speed_max_rpm * (1.0 + SPEED_RANGE_TOL)
    }

    /// Vehicle speed at engine speed `n_rpm`, v = π·r·n / (30·i)
    pub fn speed_at(&self, gear_idx: usize, n_rpm: f64) -> si::Velocity {
        PI * self.radius.get::<si::meter>() * n_rpm / (30.0 * self.total_ratio(gear_idx)) * uc::MPS
    }

    /// Engine speed, in rpm, implied by vehicle `speed`
    pub fn engine_speed_at(&self, gear_idx: usize, speed: si::Velocity) -> f64 {
        30.0 * speed.get::<si::meter_per_second>() * self.total_ratio(gear_idx)
            / (PI * self.radius.get::<si::meter>())
    }

    /// Tractive force at the wheels, F = M·i·η / r
    pub fn force_at(&self, gear_idx: usize, n_rpm: f64) -> si::Force {
        self.engine.torque_at(n_rpm) * self.total_ratio(gear_idx) * self.efficiency
            / self.radius.get::<si::meter>()
            * uc::N
    }

    /// Speed of the last gear at max engine speed, v = π·r·n_max / (30·i_min)
    pub fn theoretical_top_speed(&self) -> si::Velocity {
        self.speed_at(self.gear_count() - 1, self.speed_max_rpm)
    }

    /// Geometric progression ratio q = (i_n / i_1)^(1 / (n - 1)), undefined
    /// for a single gear
    pub fn geometric_progression(&self) -> Derived<f64> {
        match self.gear_ratios.as_slice() {
            [first, .., last] => {
                Derived::Valid((last / first).powf(1.0 / (self.gear_count() - 1) as f64))
            }
            _ => Derived::Degenerate(format!(
                "geometric progression needs at least 2 gears, got {}",
                self.gear_count()
            )),
        }
    }

    /// Gear ratios i_1·q^k of an ideal geometric gearbox spanning the same range
    pub fn ideal_ratios(&self) -> Derived<Vec<f64>> {
        let first = self.gear_ratios.first().copied().unwrap_or_default();
        self.geometric_progression().map(|q| {
            (0..self.gear_count())
                .map(|k| first * q.powi(k as i32))
                .collect()
        })
    }

    /// Traction curve of gear `gear_idx` sampled at `speeds_rpm`
    pub fn gear_curve(&self, gear_idx: usize, speeds_rpm: &[f64]) -> GearTraction {
        let speeds_kph: Vec<f64> = speeds_rpm
            .iter()
            .map(|n| self.speed_at(gear_idx, *n).get::<si::kilometer_per_hour>())
            .collect();
        GearTraction {
            gear: gear_idx + 1,
            gear_ratio: self.gear_ratio(gear_idx),
            total_ratio: self.total_ratio(gear_idx),
            speed_min_kph: speeds_kph.iter().cloned().fold(f64::INFINITY, f64::min),
            speed_max_kph: speeds_kph.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            forces_n: speeds_rpm
                .iter()
                .map(|n| self.force_at(gear_idx, *n).get::<si::newton>())
                .collect(),
            speeds_kph,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GearTraction {
    /// 1-based gear number
    pub gear: usize,
    pub gear_ratio: f64,
    pub total_ratio: f64,
    pub speeds_kph: Vec<f64>,
    pub forces_n: Vec<f64>,
    pub speed_min_kph: f64,
    pub speed_max_kph: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineSummary {
    pub fuel_type: FuelType,
    pub power_max_kw: f64,
    pub speed_at_power_max_rpm: f64,
    /// Rated torque as specified
    pub torque_max_nm: f64,
    /// Peak torque of the sampled characteristic
    pub torque_peak_curve_nm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmissionSummary {
    pub gear_ratios: Vec<f64>,
    pub final_drive: f64,
    pub efficiency: f64,
    /// Total ratio of the first gear
    pub total_ratio_max: f64,
    /// Total ratio of the last gear
    pub total_ratio_min: f64,
    /// Total ratio needed to overcome [params::PSI_MAX] at peak torque
    pub ratio_max_theoretical: f64,
    /// Total ratio needed to hold [params::TOP_SPEED_TARGET_KPH] at peak torque
    pub ratio_min_theoretical: f64,
    pub progression_ratio: Derived<f64>,
    pub ideal_ratios: Derived<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TractionReport {
    pub engine: EngineSummary,
    pub engine_curve: EngineSweep,
    pub transmission: TransmissionSummary,
    pub gears: Vec<GearTraction>,
    pub top_speed_theoretical_kph: f64,
}

#[derive(Debug, Clone, PartialEq)]
/// Combines the engine characteristic with the transmission to build traction
/// curves and size the transmission
pub struct TractionModel {
    drivetrain: Drivetrain,
    res: VehicleRes,
}

impl TractionModel {
    pub fn from_spec(spec: &VehicleSpecification) -> Self {
        Self {
            drivetrain: Drivetrain::from_spec(spec),
            res: VehicleRes::from_spec(spec),
        }
    }

    pub fn drivetrain(&self) -> &Drivetrain {
        &self.drivetrain
    }

    /// Total ratio at which peak torque overcomes a total road resistance
    /// coefficient `psi`, i = G·ψ·r / (M·η)
    fn ratio_for_psi(&self, psi: f64, torque_peak_nm: f64) -> f64 {
        self.res.weight().get::<si::newton>() * psi * self.drivetrain.radius.get::<si::meter>()
            / (torque_peak_nm * self.drivetrain.efficiency)
    }

    pub fn ratio_max_theoretical(&self, torque_peak_nm: f64) -> f64 {
        self.ratio_for_psi(params::PSI_MAX, torque_peak_nm)
    }

    pub fn ratio_min_theoretical(&self, torque_peak_nm: f64) -> f64 {
        let psi_min = self
            .res
            .psi(params::TOP_SPEED_TARGET_KPH * uc::KPH)
            .get::<si::ratio>();
        self.ratio_for_psi(psi_min, torque_peak_nm)
    }

    pub fn report(&self, spec: &VehicleSpecification, config: &CalcConfig) -> TractionReport {
        let dt = &self.drivetrain;
        let speeds_rpm = dt.engine_speeds(config.traction_engine_points);
        let engine_curve = dt.engine().sample(&speeds_rpm);
        let torque_peak = engine_curve.torque_peak();

        let progression_ratio = dt.geometric_progression();
        if let Derived::Degenerate(_reason) = &progression_ratio {
            #[cfg(feature = "logging")]
            log::warn!("{}: {}", spec.name, _reason);
        }

        TractionReport {
            engine: EngineSummary {
                fuel_type: spec.engine.fuel_type,
                power_max_kw: spec.engine.power_max.get::<si::kilowatt>(),
                speed_at_power_max_rpm: spec.engine.speed_at_power_max_rpm(),
                torque_max_nm: spec.engine.torque_max.get::<si::newton_meter>(),
                torque_peak_curve_nm: torque_peak,
            },
            transmission: TransmissionSummary {
                gear_ratios: dt.gear_ratios().to_vec(),
                final_drive: dt.final_drive,
                efficiency: dt.efficiency,
                total_ratio_max: dt.total_ratio(0),
                total_ratio_min: dt.total_ratio(dt.gear_count() - 1),
                ratio_max_theoretical: self.ratio_max_theoretical(torque_peak),
                ratio_min_theoretical: self.ratio_min_theoretical(torque_peak),
                progression_ratio,
                ideal_ratios: dt.ideal_ratios(),
            },
            gears: (0..dt.gear_count())
                .map(|idx| dt.gear_curve(idx, &speeds_rpm))
                .collect(),
            top_speed_theoretical_kph: dt.theoretical_top_speed().get::<si::kilometer_per_hour>(),
            engine_curve,
        }
    }
}
