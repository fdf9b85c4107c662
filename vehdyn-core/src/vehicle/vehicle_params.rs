use crate::engine::FuelType;
use crate::imports::*;

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Body and chassis dimensions
pub struct Dimensions {
    /// Distance between front and rear axle
    pub wheelbase: si::Length,
    pub track_front: si::Length,
    pub track_rear: si::Length,
    pub overhang_front: si::Length,
    pub overhang_rear: si::Length,
    pub ground_clearance: si::Length,
}

impl ObjState for Dimensions {
    fn validate(&self) -> ValidationResults {
        let mut errors = ValidationErrors::new();
        si_chk_num_gtz_fin(&mut errors, &self.wheelbase, "Wheelbase");
        si_chk_num_gtz_fin(&mut errors, &self.track_front, "Track front");
        si_chk_num_gtz_fin(&mut errors, &self.track_rear, "Track rear");
        si_chk_num_gez_fin(&mut errors, &self.overhang_front, "Overhang front");
        si_chk_num_gez_fin(&mut errors, &self.overhang_rear, "Overhang rear");
        si_chk_num_gez_fin(&mut errors, &self.ground_clearance, "Ground clearance");
        errors.make_err()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Mass and its static distribution over the axles
pub struct MassParams {
    /// Gross vehicle mass used by every computation
    pub mass_total: si::Mass,
    /// Share of the static weight on the front axle
    pub front_share: si::Ratio,
    /// Share of the static weight on the rear axle
    pub rear_share: si::Ratio,
    /// Height of the center of mass above the ground
    pub cg_height: si::Length,
}

impl MassParams {
    /// Gravitational force of the gross vehicle mass
    pub fn weight(&self) -> si::Force {
        self.mass_total * uc::ACC_GRAV
    }
}

impl ObjState for MassParams {
    fn validate(&self) -> ValidationResults {
        let mut errors = ValidationErrors::new();
        si_chk_num_gtz_fin(&mut errors, &self.mass_total, "Mass total");
        si_chk_num_gez_fin(&mut errors, &self.front_share, "Front share");
        si_chk_num_gez_fin(&mut errors, &self.rear_share, "Rear share");
        si_chk_num_gtz_fin(&mut errors, &self.cg_height, "CG height");
        let share_sum = (self.front_share + self.rear_share).get::<si::percent>();
        if !almost_eq(share_sum, 100.0, Some(1e-6)) {
            errors.push(anyhow!(
                "Front and rear shares must sum to 100 %, got {} %",
                share_sum.format_eng(Some(5))
            ));
        }
        errors.make_err()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TireParams {
    /// Dynamic rolling radius of the driven wheels
    pub radius_dynamic: si::Length,
    /// Rolling resistance coefficient, f
    pub rolling_coeff: si::Ratio,
}

impl ObjState for TireParams {
    fn validate(&self) -> ValidationResults {
        let mut errors = ValidationErrors::new();
        si_chk_num_gtz_fin(&mut errors, &self.radius_dynamic, "Dynamic radius");
        si_chk_num_gez_fin(&mut errors, &self.rolling_coeff, "Rolling coefficient");
        errors.make_err()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Engine rating points and speed limits
pub struct EngineParams {
    pub fuel_type: FuelType,
    /// Rated (maximum) power
    pub power_max: si::Power,
    /// Engine speed at rated power
    pub speed_at_power_max: si::AngularVelocity,
    /// Rated (maximum) torque
    pub torque_max: si::Torque,
    /// Engine speed at rated torque
    pub speed_at_torque_max: si::AngularVelocity,
    /// Maximum permissible engine speed
    pub speed_max: si::AngularVelocity,
    pub speed_idle: si::AngularVelocity,
}

impl EngineParams {
    pub fn speed_at_power_max_rpm(&self) -> f64 {
        self.speed_at_power_max.get::<si::revolution_per_minute>()
    }

    pub fn speed_max_rpm(&self) -> f64 {
        self.speed_max.get::<si::revolution_per_minute>()
    }

    pub fn speed_idle_rpm(&self) -> f64 {
        self.speed_idle.get::<si::revolution_per_minute>()
    }

    /// Whether idle < speed at max torque < speed at max power <= max speed.
    /// A violation is not rejected, but curves built from such an engine are
    /// not physically meaningful.
    pub fn speeds_ordered(&self) -> bool {
        self.speed_idle < self.speed_at_torque_max
            && self.speed_at_torque_max < self.speed_at_power_max
            && self.speed_at_power_max <= self.speed_max
    }
}

impl ObjState for EngineParams {
    fn validate(&self) -> ValidationResults {
        let mut errors = ValidationErrors::new();
        si_chk_num_gtz_fin(&mut errors, &self.power_max, "Power max");
        si_chk_num_gtz_fin(&mut errors, &self.speed_at_power_max, "Speed at power max");
        si_chk_num_gtz_fin(&mut errors, &self.torque_max, "Torque max");
        si_chk_num_gtz_fin(&mut errors, &self.speed_at_torque_max, "Speed at torque max");
        si_chk_num_gtz_fin(&mut errors, &self.speed_max, "Speed max");
        si_chk_num_gez_fin(&mut errors, &self.speed_idle, "Speed idle");
        if self.speed_idle >= self.speed_max {
            errors.push(anyhow!("Idle speed must be below max engine speed!"));
        }
        errors.make_err()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmissionParams {
    /// Gearbox ratios, first (lowest) gear first
    pub gear_ratios: Vec<f64>,
    /// Final drive (differential) ratio
    pub final_drive: f64,
    /// Driveline efficiency from crankshaft to wheels
    pub efficiency: si::Ratio,
}

impl ObjState for TransmissionParams {
    fn validate(&self) -> ValidationResults {
        let mut errors = ValidationErrors::new();
        if self.gear_ratios.is_empty() {
            errors.push(anyhow!("Transmission must have at least one gear!"));
        }
        for (idx, ratio) in self.gear_ratios.iter().enumerate() {
            chk_num_gtz_fin(&mut errors, *ratio, &format!("Gear {} ratio", idx + 1));
        }
        if !self.gear_ratios.windows(2).all(|w| w[0] > w[1]) {
            errors.push(anyhow!(
                "Gear ratios must be strictly decreasing, got {:?}",
                self.gear_ratios
            ));
        }
        chk_num_gtz_fin(&mut errors, self.final_drive, "Final drive");
        let eff = self.efficiency.get::<si::ratio>();
        if !(eff.is_finite() && eff > 0.0 && eff <= 1.0) {
            errors.push(anyhow!("Efficiency = {eff:?} must be within (0, 1]!"));
        }
        errors.make_err()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AeroParams {
    /// Drag coefficient, Cd
    pub drag_coeff: si::Ratio,
    pub frontal_area: si::Area,
}

impl AeroParams {
    /// Drag area, Cd * A
    pub fn drag_area(&self) -> si::Area {
        self.drag_coeff * self.frontal_area
    }
}

impl ObjState for AeroParams {
    fn validate(&self) -> ValidationResults {
        let mut errors = ValidationErrors::new();
        si_chk_num_gtz_fin(&mut errors, &self.drag_coeff, "Drag coefficient");
        si_chk_num_gtz_fin(&mut errors, &self.frontal_area, "Frontal area");
        errors.make_err()
    }
}
