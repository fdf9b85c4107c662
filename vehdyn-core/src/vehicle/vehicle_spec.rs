use super::*;
use crate::engine::FuelType;
use crate::imports::*;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
/// Complete parametrization of a road vehicle.  Every field group is consumed
/// by the model that needs it, e.g. [crate::resistance::VehicleRes] reads only
/// mass, tire and aero parameters.
///
/// Serialized quantities are in SI base units (m, kg, W, rad/s, N·m, and
/// ratios as fractions).
pub struct VehicleSpecification {
    /// User-defined identifier
    #[serde(default)]
    pub name: String,
    pub dimensions: Dimensions,
    pub mass: MassParams,
    pub tire: TireParams,
    pub engine: EngineParams,
    pub transmission: TransmissionParams,
    pub aero: AeroParams,
}

impl VehicleSpecification {
    pub fn weight(&self) -> si::Force {
        self.mass.weight()
    }

    /// Longitudinal distance from the center of mass to the front axle
    pub fn cg_to_front_axle(&self) -> si::Length {
        self.dimensions.wheelbase * self.mass.rear_share
    }

    /// Longitudinal distance from the center of mass to the rear axle
    pub fn cg_to_rear_axle(&self) -> si::Length {
        self.dimensions.wheelbase * self.mass.front_share
    }

    /// Rejects structurally invalid specifications with
    /// [Error::InvalidSpecification] listing every violation.
    pub fn check(&self) -> Result<(), Error> {
        self.validate()
            .map_err(|errors| Error::InvalidSpecification(errors.to_string()))?;
        if !self.engine.speeds_ordered() {
            #[cfg(feature = "logging")]
            log::warn!(
                "{}: engine speeds should satisfy idle < torque peak < power peak <= max; \
                 curves will not be physically meaningful",
                self.name
            );
        }
        Ok(())
    }
}

impl ObjState for VehicleSpecification {
    fn validate(&self) -> ValidationResults {
        let mut errors = ValidationErrors::new();
        if let Err(errs) = self.dimensions.validate() {
            errors.extend_from(errs, "Dimensions");
        }
        if let Err(errs) = self.mass.validate() {
            errors.extend_from(errs, "Mass");
        }
        if let Err(errs) = self.tire.validate() {
            errors.extend_from(errs, "Tire");
        }
        if let Err(errs) = self.engine.validate() {
            errors.extend_from(errs, "Engine");
        }
        if let Err(errs) = self.transmission.validate() {
            errors.extend_from(errs, "Transmission");
        }
        if let Err(errs) = self.aero.validate() {
            errors.extend_from(errs, "Aero");
        }
        errors.make_err()
    }
}

impl Init for VehicleSpecification {
    fn init(&mut self) -> Result<(), Error> {
        self.check()
    }
}
impl SerdeAPI for VehicleSpecification {}

impl Valid for VehicleSpecification {
    /// Typical C-segment passenger car with a 92 kW gasoline engine and a
    /// five-speed manual gearbox.
    fn valid() -> Self {
        Self {
            name: "C-segment sedan".into(),
            dimensions: Dimensions {
                wheelbase: 2700.0 * uc::MM,
                track_front: 1550.0 * uc::MM,
                track_rear: 1540.0 * uc::MM,
                overhang_front: 900.0 * uc::MM,
                overhang_rear: 900.0 * uc::MM,
                ground_clearance: 150.0 * uc::MM,
            },
            mass: MassParams {
                mass_total: 1850.0 * uc::KG,
                front_share: 58.0 * uc::PERCENT,
                rear_share: 42.0 * uc::PERCENT,
                cg_height: 550.0 * uc::MM,
            },
            tire: TireParams {
                radius_dynamic: 0.308 * uc::M,
                rolling_coeff: 0.012 * uc::R,
            },
            engine: EngineParams {
                fuel_type: FuelType::Gasoline,
                power_max: 92.0 * uc::KW,
                speed_at_power_max: 5500.0 * uc::RPM,
                torque_max: 160.0 * uc::NM,
                speed_at_torque_max: 4000.0 * uc::RPM,
                speed_max: 6500.0 * uc::RPM,
                speed_idle: 850.0 * uc::RPM,
            },
            transmission: TransmissionParams {
                gear_ratios: vec![3.727, 2.048, 1.393, 1.029, 0.820],
                final_drive: 4.058,
                efficiency: 0.92 * uc::R,
            },
            aero: AeroParams {
                drag_coeff: 0.30 * uc::R,
                frontal_area: 2.2 * uc::M2,
            },
        }
    }
}
