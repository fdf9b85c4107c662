//! Sampling choices shared by every model.

use crate::imports::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Sweep resolutions and ranges, in display units.  `Default` reproduces the
/// reference sampling of the textbook methods.
pub struct CalcConfig {
    /// Ceiling of the resistance speed sweep, which starts at standstill
    pub resistance_speed_max_kph: f64,
    pub resistance_speed_step_kph: f64,
    /// Road inclinations tabulated by the resistance report
    pub grade_angles_deg: Vec<f64>,
    /// Engine speed points, idle to max, of the traction curves
    pub traction_engine_points: usize,
    /// Engine speed points, idle to max, of the per-gear performance characteristics
    pub performance_engine_points: usize,
    /// Launch is integrated from standstill up to this speed
    pub launch_speed_target_kph: f64,
    pub launch_speed_step_kph: f64,
    /// Resolution of the top speed search
    pub top_speed_step_kph: f64,
    pub braking_speed_min_kph: f64,
    pub braking_speed_max_kph: f64,
    pub braking_speed_step_kph: f64,
    /// Speed of the benchmark stop reporting energy and mean braking power
    pub braking_reference_speed_kph: f64,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            resistance_speed_max_kph: 200.0,
            resistance_speed_step_kph: 5.0,
            grade_angles_deg: vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0],
            traction_engine_points: 100,
            performance_engine_points: 50,
            launch_speed_target_kph: 100.0,
            launch_speed_step_kph: 1.0,
            top_speed_step_kph: 1.0,
            braking_speed_min_kph: 10.0,
            braking_speed_max_kph: 150.0,
            braking_speed_step_kph: 10.0,
            braking_reference_speed_kph: 100.0,
        }
    }
}

impl CalcConfig {
    pub fn resistance_speeds_kph(&self) -> Vec<f64> {
        utils::arange(
            0.0,
            self.resistance_speed_max_kph,
            self.resistance_speed_step_kph,
        )
    }

    pub fn launch_speeds_kph(&self) -> Vec<f64> {
        utils::arange(0.0, self.launch_speed_target_kph, self.launch_speed_step_kph)
    }

    pub fn braking_speeds_kph(&self) -> Vec<f64> {
        utils::arange(
            self.braking_speed_min_kph,
            self.braking_speed_max_kph,
            self.braking_speed_step_kph,
        )
    }

    /// Rejects unusable sampling with [Error::InvalidConfig] listing every violation.
    pub fn check(&self) -> Result<(), Error> {
        self.validate()
            .map_err(|errors| Error::InvalidConfig(errors.to_string()))
    }
}

impl ObjState for CalcConfig {
    fn validate(&self) -> ValidationResults {
        let mut errors = ValidationErrors::new();
        chk_num_gtz_fin(
            &mut errors,
            self.resistance_speed_max_kph,
            "Resistance speed max",
        );
        chk_num_gtz_fin(
            &mut errors,
            self.resistance_speed_step_kph,
            "Resistance speed step",
        );
        for angle in &self.grade_angles_deg {
            chk_num_in_range(&mut errors, *angle, 0.0, 89.0, "Grade angle");
        }
        if self.traction_engine_points < 2 {
            errors.push(anyhow!(
                "Traction engine points = {} must be at least 2!",
                self.traction_engine_points
            ));
        }
        if self.performance_engine_points < 2 {
            errors.push(anyhow!(
                "Performance engine points = {} must be at least 2!",
                self.performance_engine_points
            ));
        }
        chk_num_gtz_fin(&mut errors, self.launch_speed_target_kph, "Launch target");
        chk_num_gtz_fin(&mut errors, self.launch_speed_step_kph, "Launch speed step");
        chk_num_gtz_fin(&mut errors, self.top_speed_step_kph, "Top speed step");
        chk_num_gtz_fin(&mut errors, self.braking_speed_min_kph, "Braking speed min");
        chk_num_gtz_fin(&mut errors, self.braking_speed_step_kph, "Braking speed step");
        if !(self.braking_speed_max_kph >= self.braking_speed_min_kph) {
            errors.push(anyhow!(
                "Braking speed max = {:?} must not be below braking speed min = {:?}!",
                self.braking_speed_max_kph,
                self.braking_speed_min_kph
            ));
        }
        chk_num_gtz_fin(
            &mut errors,
            self.braking_reference_speed_kph,
            "Braking reference speed",
        );
        errors.make_err()
    }
}

impl Init for CalcConfig {
    fn init(&mut self) -> Result<(), Error> {
        self.check()
    }
}
impl SerdeAPI for CalcConfig {}

impl Valid for CalcConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    impl Cases for CalcConfig {
        fn invalid_cases() -> Vec<Self> {
            vec![
                Self {
                    resistance_speed_step_kph: 0.0,
                    ..Self::default()
                },
                Self {
                    traction_engine_points: 1,
                    ..Self::default()
                },
                Self {
                    braking_speed_max_kph: 5.0,
                    ..Self::default()
                },
                Self {
                    grade_angles_deg: vec![0.0, 90.0],
                    ..Self::default()
                },
                Self {
                    launch_speed_target_kph: f64::NAN,
                    ..Self::default()
                },
            ]
        }
    }

    #[test]
    fn test_config_cases() {
        check_cases::<CalcConfig>();
    }

    #[test]
    fn test_default_sweeps() {
        let config = CalcConfig::default();
        let res = config.resistance_speeds_kph();
        assert_eq!(res.len(), 41);
        assert_eq!(res[1], 5.0);
        let launch = config.launch_speeds_kph();
        assert_eq!(launch.len(), 101);
        assert_eq!(*launch.last().unwrap(), 100.0);
        let braking = config.braking_speeds_kph();
        assert_eq!(braking.first(), Some(&10.0));
        assert_eq!(braking.last(), Some(&150.0));
        assert_eq!(braking.len(), 15);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = CalcConfig::from_yaml("launch_speed_target_kph: 80.0\n", false).unwrap();
        assert_eq!(config.launch_speed_target_kph, 80.0);
        assert_eq!(config.traction_engine_points, 100);
    }

    #[test]
    fn test_invalid_config_rejected_on_load() {
        let err = CalcConfig::from_yaml("top_speed_step_kph: -1.0\n", false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::InvalidConfig(_))
        ));
    }
}
