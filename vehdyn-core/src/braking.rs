//! Static braking analysis: weight transfer, ideal front/rear brake force
//! split and stopping performance on roads of different adhesion.
//!
//! Both axles are assumed to use the same adhesion coefficient at the same
//! time, i.e. no load-sensing proportioning.

use crate::config::CalcConfig;
use crate::imports::*;
use crate::vehicle::VehicleSpecification;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadSurface {
    Dry,
    Wet,
    Snow,
}

impl RoadSurface {
    pub const ALL: [Self; 3] = [Self::Dry, Self::Wet, Self::Snow];

    pub fn adhesion(&self) -> f64 {
        match self {
            Self::Dry => params::ADHESION_DRY,
            Self::Wet => params::ADHESION_WET,
            Self::Snow => params::ADHESION_SNOW,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Axle loads and brake forces at the adhesion-limited deceleration
pub struct BrakeDistribution {
    pub adhesion: f64,
    /// F_front / F_rear = (L2 + h·φ) / (L1 - h·φ)
    pub ideal_ratio: f64,
    pub front_force_n: f64,
    pub rear_force_n: f64,
    pub front_pct: f64,
    pub rear_pct: f64,
    pub front_normal_n: f64,
    pub rear_normal_n: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrakingGeometry {
    pub mass_kg: f64,
    pub wheelbase_m: f64,
    pub cg_height_m: f64,
    /// L1
    pub cg_to_front_axle_m: f64,
    /// L2
    pub cg_to_rear_axle_m: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaxDeceleration {
    pub adhesion: f64,
    pub decel_mps2: f64,
    pub decel_g: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Full stop from a benchmark speed
pub struct ReferenceStop {
    pub speed_kph: f64,
    pub distance_m: f64,
    pub time_s: f64,
    pub kinetic_energy_kj: f64,
    /// Kinetic energy over stopping time
    pub mean_power_kw: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceBraking {
    pub surface: RoadSurface,
    pub adhesion: f64,
    pub decel_mps2: f64,
    pub distances_m: Vec<f64>,
    pub times_s: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrakingReport {
    pub geometry: BrakingGeometry,
    pub decel_max: MaxDeceleration,
    pub distribution: Derived<BrakeDistribution>,
    pub reference_stop: ReferenceStop,
    /// Initial speeds shared by every surface table
    pub speeds_kph: Vec<f64>,
    pub surfaces: Vec<SurfaceBraking>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BrakingModel {
    mass: si::Mass,
    wheelbase: si::Length,
    cg_height: si::Length,
    /// L1, from the center of mass to the front axle
    cg_to_front_axle: si::Length,
    /// L2, from the center of mass to the rear axle
    cg_to_rear_axle: si::Length,
}

impl Init for BrakingModel {}
impl SerdeAPI for BrakingModel {}

impl BrakingModel {
    pub fn from_spec(spec: &VehicleSpecification) -> Self {
        Self {
            mass: spec.mass.mass_total,
            wheelbase: spec.dimensions.wheelbase,
            cg_height: spec.mass.cg_height,
            cg_to_front_axle: spec.cg_to_front_axle(),
            cg_to_rear_axle: spec.cg_to_rear_axle(),
        }
    }

    pub fn weight(&self) -> si::Force {
        self.mass * uc::ACC_GRAV
    }

    /// Adhesion-limited deceleration, a = φ·g
    pub fn decel_max(&self, adhesion: f64) -> si::Acceleration {
        adhesion * uc::ACC_GRAV
    }

    /// Front and rear normal loads while braking at `adhesion`,
    /// N_f = G·(L2 + h·φ) / L and N_s = G·(L1 - h·φ) / L
    pub fn normal_loads(&self, adhesion: f64) -> (si::Force, si::Force) {
        let transfer = self.cg_height * adhesion;
        let front = self.weight() * ((self.cg_to_rear_axle + transfer) / self.wheelbase);
        let rear = self.weight() * ((self.cg_to_front_axle - transfer) / self.wheelbase);
        (front, rear)
    }

    /// Ideal brake force split at `adhesion`; degenerate when weight
    /// transfer unloads the rear axle completely (L1 ≤ h·φ)
    pub fn distribution(&self, adhesion: f64) -> Derived<BrakeDistribution> {
        let denominator = self.cg_to_front_axle - self.cg_height * adhesion;
        if denominator <= si::Length::ZERO {
            return Derived::Degenerate(format!(
                "rear axle unloaded at adhesion {adhesion}: L1 - h·φ = {:.3} m",
                denominator.get::<si::meter>()
            ));
        }
        let (front_normal, rear_normal) = self.normal_loads(adhesion);
        let front_pct = (front_normal / self.weight()).get::<si::percent>();
        Derived::Valid(BrakeDistribution {
            adhesion,
            ideal_ratio: ((self.cg_to_rear_axle + self.cg_height * adhesion) / denominator)
                .get::<si::ratio>(),
            front_force_n: adhesion * front_normal.get::<si::newton>(),
            rear_force_n: adhesion * rear_normal.get::<si::newton>(),
            front_pct,
            rear_pct: 100.0 - front_pct,
            front_normal_n: front_normal.get::<si::newton>(),
            rear_normal_n: rear_normal.get::<si::newton>(),
        })
    }

    /// s = v² / (2·a)
    pub fn stopping_distance(&self, speed: si::Velocity, adhesion: f64) -> si::Length {
        speed * speed / (2.0 * self.decel_max(adhesion))
    }

    /// t = v / a
    pub fn stopping_time(&self, speed: si::Velocity, adhesion: f64) -> si::Time {
        speed / self.decel_max(adhesion)
    }

    pub fn kinetic_energy(&self, speed: si::Velocity) -> si::Energy {
        0.5 * self.mass * speed * speed
    }

    pub fn reference_stop(&self, speed: si::Velocity, adhesion: f64) -> ReferenceStop {
        let time = self.stopping_time(speed, adhesion);
        let energy = self.kinetic_energy(speed);
        let power: si::Power = energy / time;
        ReferenceStop {
            speed_kph: speed.get::<si::kilometer_per_hour>(),
            distance_m: self.stopping_distance(speed, adhesion).get::<si::meter>(),
            time_s: time.get::<si::second>(),
            kinetic_energy_kj: energy.get::<si::kilojoule>(),
            mean_power_kw: power.get::<si::kilowatt>(),
        }
    }

    pub fn surface_table(&self, surface: RoadSurface, speeds_kph: &[f64]) -> SurfaceBraking {
        let adhesion = surface.adhesion();
        SurfaceBraking {
            surface,
            adhesion,
            decel_mps2: self
                .decel_max(adhesion)
                .get::<si::meter_per_second_squared>(),
            distances_m: speeds_kph
                .iter()
                .map(|v| self.stopping_distance(*v * uc::KPH, adhesion).get::<si::meter>())
                .collect(),
            times_s: speeds_kph
                .iter()
                .map(|v| self.stopping_time(*v * uc::KPH, adhesion).get::<si::second>())
                .collect(),
        }
    }

    #[cfg_attr(not(feature = "logging"), allow(unused_variables))]
    pub fn report(&self, spec: &VehicleSpecification, config: &CalcConfig) -> BrakingReport {
        let adhesion = params::ADHESION_DRY;
        let decel = self.decel_max(adhesion);
        let distribution = self.distribution(adhesion);
        if let Derived::Degenerate(reason) = &distribution {
            #[cfg(feature = "logging")]
            log::warn!("{}: {}", spec.name, reason);
        }
        let speeds_kph = config.braking_speeds_kph();

        BrakingReport {
            geometry: BrakingGeometry {
                mass_kg: self.mass.get::<si::kilogram>(),
                wheelbase_m: self.wheelbase.get::<si::meter>(),
                cg_height_m: self.cg_height.get::<si::meter>(),
                cg_to_front_axle_m: self.cg_to_front_axle.get::<si::meter>(),
                cg_to_rear_axle_m: self.cg_to_rear_axle.get::<si::meter>(),
            },
            decel_max: MaxDeceleration {
                adhesion,
                decel_mps2: decel.get::<si::meter_per_second_squared>(),
                decel_g: (decel / uc::ACC_GRAV).get::<si::ratio>(),
            },
            distribution,
            reference_stop: self
                .reference_stop(config.braking_reference_speed_kph * uc::KPH, adhesion),
            surfaces: RoadSurface::ALL
                .iter()
                .map(|surface| self.surface_table(*surface, &speeds_kph))
                .collect(),
            speeds_kph,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_3() -> VehicleSpecification {
        let mut spec = VehicleSpecification::valid();
        spec.mass.front_share = 55.0 * uc::PERCENT;
        spec.mass.rear_share = 45.0 * uc::PERCENT;
        spec.dimensions.wheelbase = 2.6 * uc::M;
        spec.mass.cg_height = 0.55 * uc::M;
        spec
    }

    #[test]
    fn test_scenario_3_distribution() {
        let spec = scenario_3();
        assert!(spec.check().is_ok());
        let model = BrakingModel::from_spec(&spec);
        assert!(almost_eq_uom(&spec.cg_to_front_axle(), &(1.17 * uc::M), None));
        let dist = model.distribution(0.8);
        let dist = dist.value().unwrap();
        // (1.43 + 0.44) / (1.17 - 0.44)
        assert!(almost_eq(dist.ideal_ratio, 1.87 / 0.73, Some(1e-9)));
        assert!(almost_eq(
            dist.front_force_n / dist.rear_force_n,
            dist.ideal_ratio,
            Some(1e-9)
        ));
    }

    #[test]
    fn test_scenario_4_stopping_distance() {
        let model = BrakingModel::from_spec(&VehicleSpecification::valid());
        let s = model.stopping_distance(100.0 * uc::KPH, 0.8).get::<si::meter>();
        let v: f64 = 100.0 / 3.6;
        assert!(almost_eq(s, v * v / (2.0 * 7.848), None));
        assert!((s - 49.2).abs() < 0.05, "{s}");
        let t = model.stopping_time(100.0 * uc::KPH, 0.8).get::<si::second>();
        assert!(almost_eq(t, v / 7.848, None));
    }

    #[test]
    fn test_force_and_load_sums() {
        let model = BrakingModel::from_spec(&VehicleSpecification::valid());
        let weight = model.weight().get::<si::newton>();
        for i in 0..100 {
            let adhesion = i as f64 / 100.0;
            let dist = model.distribution(adhesion);
            let dist = dist.value().unwrap();
            assert!(almost_eq(
                dist.front_normal_n + dist.rear_normal_n,
                weight,
                Some(1e-9)
            ));
            let total = adhesion * weight;
            assert!(almost_eq(
                dist.front_force_n + dist.rear_force_n,
                total,
                Some(1e-9)
            ));
            assert!(almost_eq(dist.front_pct + dist.rear_pct, 100.0, None));
            assert!(dist.front_pct.is_finite());
        }
    }

    #[test]
    fn test_degenerate_geometry() {
        let mut spec = VehicleSpecification::valid();
        // center of mass high and close to the front axle
        spec.mass.front_share = 80.0 * uc::PERCENT;
        spec.mass.rear_share = 20.0 * uc::PERCENT;
        spec.mass.cg_height = 1.0 * uc::M;
        let model = BrakingModel::from_spec(&spec);
        assert!(model.distribution(0.8).is_degenerate());
        assert!(!model.distribution(0.2).is_degenerate());

        let report = model.report(&spec, &CalcConfig::default());
        assert!(report.distribution.is_degenerate());
        // everything else stays meaningful
        assert_eq!(report.surfaces.len(), 3);
        assert!(report.reference_stop.distance_m > 0.0);
    }

    #[test]
    fn test_report() {
        let spec = VehicleSpecification::valid();
        let report = BrakingModel::from_spec(&spec).report(&spec, &CalcConfig::default());
        assert_eq!(report.speeds_kph.len(), 15);
        assert!(almost_eq(report.decel_max.decel_mps2, 7.848, None));
        assert!(almost_eq(report.decel_max.decel_g, 0.8, None));
        let dist = report.distribution.value().unwrap();
        assert!(almost_eq(dist.ideal_ratio, 2.8905, Some(1e-4)));
        assert!(dist.front_pct > 70.0 && dist.front_pct < 76.0);

        let stop = &report.reference_stop;
        let energy_kj = 0.5 * 1850.0 * (100.0f64 / 3.6).powi(2) / 1e3;
        assert!(almost_eq(stop.kinetic_energy_kj, energy_kj, None));
        assert!(almost_eq(stop.mean_power_kw, stop.kinetic_energy_kj / stop.time_s, None));

        let dry = &report.surfaces[0];
        let snow = &report.surfaces[2];
        assert_eq!(dry.surface, RoadSurface::Dry);
        assert_eq!(snow.surface, RoadSurface::Snow);
        // distance scales with 1 / φ
        assert!(almost_eq(snow.distances_m[9], dry.distances_m[9] * 4.0, None));
        assert!(dry.distances_m.windows(2).all(|w| w[1] > w[0]));
        assert!(almost_eq(dry.distances_m[9], stop.distance_m, None));
    }
}
