//! Driving resistances: rolling, aerodynamic and grade.

pub mod kind;

use crate::config::CalcConfig;
use crate::imports::*;
use crate::vehicle::VehicleSpecification;
use kind::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
/// Resistance forces at a single operating point
pub struct ResBreakdown {
    pub rolling: si::Force,
    pub aerodynamic: si::Force,
    pub grade: si::Force,
    pub total: si::Force,
    /// Power needed to overcome `total` at the operating speed
    pub power: si::Power,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
/// Road resistances of a vehicle, built from the mass, tire and aero groups
/// of a [VehicleSpecification].
pub struct VehicleRes {
    weight: si::Force,
    rolling: rolling::Basic,
    aerodynamic: aerodynamic::Basic,
}

impl Init for VehicleRes {}
impl SerdeAPI for VehicleRes {}

impl VehicleRes {
    pub fn new(weight: si::Force, rolling_coeff: si::Ratio, cd_area: si::Area) -> Self {
        Self {
            weight,
            rolling: rolling::Basic::new(rolling_coeff),
            aerodynamic: aerodynamic::Basic::new(cd_area),
        }
    }

    pub fn from_spec(spec: &VehicleSpecification) -> Self {
        Self::new(
            spec.weight(),
            spec.tire.rolling_coeff,
            spec.aero.drag_area(),
        )
    }

    pub fn weight(&self) -> si::Force {
        self.weight
    }

    pub fn rolling_coeff(&self) -> si::Ratio {
        self.rolling.ratio()
    }

    pub fn res_rolling(&self, grade: si::Angle) -> si::Force {
        self.rolling.calc_res(self.weight, grade)
    }

    pub fn res_aero(&self, speed: si::Velocity) -> si::Force {
        self.aerodynamic.calc_res(speed)
    }

    pub fn res_grade(&self, grade: si::Angle) -> si::Force {
        self.weight * grade.sin()
    }

    /// All resistances at `speed` on a road inclined by `grade`
    pub fn calc(&self, speed: si::Velocity, grade: si::Angle) -> ResBreakdown {
        let rolling = self.res_rolling(grade);
        let aerodynamic = self.res_aero(speed);
        let grade = self.res_grade(grade);
        let total = rolling + aerodynamic + grade;
        ResBreakdown {
            rolling,
            aerodynamic,
            grade,
            total,
            power: total * speed,
        }
    }

    /// Total resistance coefficient on level road, ψ = f + ρ·Cd·A·v² / (2·G)
    pub fn psi(&self, speed: si::Velocity) -> si::Ratio {
        self.rolling_coeff() + self.res_aero(speed) / self.weight
    }

    /// Steepest grade the tires can hold against sliding at `adhesion`,
    /// regardless of available engine torque
    pub fn max_grade_adhesion(&self, adhesion: f64) -> si::Angle {
        (adhesion - self.rolling_coeff().get::<si::ratio>()).atan() * uc::RAD
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResistanceInputs {
    pub mass_kg: f64,
    pub weight_n: f64,
    pub rolling_coeff: f64,
    pub drag_coeff: f64,
    pub frontal_area_m2: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Any force-vs-speed curve on level road
pub struct ForceCurve {
    pub speeds_kph: Vec<f64>,
    pub forces_n: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradeTable {
    pub angles_deg: Vec<f64>,
    pub forces_n: Vec<f64>,
    /// Adhesion-limited bound at [params::ADHESION_PEAK]
    pub max_grade_deg: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalResistance {
    pub speeds_kph: Vec<f64>,
    pub forces_n: Vec<f64>,
    pub power_required_kw: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PsiCurve {
    pub speeds_kph: Vec<f64>,
    pub psi: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Resistances over the configured speed sweep on level road, plus the grade table
pub struct ResistanceReport {
    pub inputs: ResistanceInputs,
    /// Constant on level road
    pub rolling_force_n: f64,
    pub aerodynamic: ForceCurve,
    pub grade: GradeTable,
    pub total: TotalResistance,
    pub psi: PsiCurve,
}

impl ResistanceReport {
    pub fn build(spec: &VehicleSpecification, config: &CalcConfig) -> Self {
        let res = VehicleRes::from_spec(spec);
        let speeds_kph = config.resistance_speeds_kph();
        let level: Vec<ResBreakdown> = speeds_kph
            .iter()
            .map(|v| res.calc(*v * uc::KPH, si::Angle::ZERO))
            .collect();
        let rolling_force_n = res.res_rolling(si::Angle::ZERO).get::<si::newton>();

        let grade = GradeTable {
            angles_deg: config.grade_angles_deg.clone(),
            forces_n: config
                .grade_angles_deg
                .iter()
                .map(|deg| res.res_grade(*deg * uc::DEG).get::<si::newton>())
                .collect(),
            max_grade_deg: res
                .max_grade_adhesion(params::ADHESION_PEAK)
                .get::<si::degree>(),
        };

        Self {
            inputs: ResistanceInputs {
                mass_kg: spec.mass.mass_total.get::<si::kilogram>(),
                weight_n: res.weight().get::<si::newton>(),
                rolling_coeff: res.rolling_coeff().get::<si::ratio>(),
                drag_coeff: spec.aero.drag_coeff.get::<si::ratio>(),
                frontal_area_m2: spec.aero.frontal_area.get::<si::square_meter>(),
            },
            rolling_force_n,
            aerodynamic: ForceCurve {
                speeds_kph: speeds_kph.clone(),
                forces_n: level
                    .iter()
                    .map(|r| r.aerodynamic.get::<si::newton>())
                    .collect(),
            },
            grade,
            total: TotalResistance {
                speeds_kph: speeds_kph.clone(),
                forces_n: level.iter().map(|r| r.total.get::<si::newton>()).collect(),
                power_required_kw: level
                    .iter()
                    .map(|r| r.power.get::<si::kilowatt>())
                    .collect(),
            },
            psi: PsiCurve {
                psi: speeds_kph
                    .iter()
                    .map(|v| res.psi(*v * uc::KPH).get::<si::ratio>())
                    .collect(),
                speeds_kph,
            },
        }
    }
}
