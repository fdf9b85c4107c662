//! Acceleration envelope, launch integration and headline dynamic performance.
//!
//! The envelope at a vehicle speed is the best acceleration over every gear
//! whose implied engine speed lies within [idle, max].  Up to the first speed
//! with a positive acceleration the launch is not simulated and that first
//! achieved acceleration is held.  Between the ranges of two gears the last
//! achieved acceleration is held as well.  Once a gear in range can no longer
//! accelerate the vehicle, or every gear would overspeed the engine, the
//! vehicle is beyond its top speed: the envelope is zero, and elapsed time and
//! distance are undefined from there on.

use crate::config::CalcConfig;
use crate::imports::*;
use crate::resistance::VehicleRes;
use crate::traction::Drivetrain;
use crate::vehicle::VehicleSpecification;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// How an envelope point was obtained
pub enum EnvelopeState {
    /// Before the first achieved acceleration, clutch slip region
    Launch,
    /// Best acceleration of the gears in their engine speed range
    Achieved,
    /// No gear in range, but a higher gear still reaches this speed
    Gap,
    /// At or past the first speed where no gear accelerates the vehicle
    BeyondTopSpeed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// What bounds the top speed
pub enum TopSpeedLimit {
    /// Traction surplus over road resistance is exhausted
    Resistance,
    /// No gear can reach the next speed without exceeding max engine speed
    EngineSpeed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Envelope at a single speed, before launch handling
struct EnvelopePoint {
    /// Best acceleration over the gears in range, zero if none accelerates
    accel: si::Acceleration,
    /// Whether any gear runs within its engine speed range
    in_range: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PointClass {
    Achieved(si::Acceleration),
    Gap,
    Collapse(TopSpeedLimit),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Per-gear dynamic characteristic over the engine speed sweep
pub struct GearPerformance {
    /// 1-based gear number
    pub gear: usize,
    /// Rotating mass inertia factor, δ
    pub inertia_factor: f64,
    pub speeds_kph: Vec<f64>,
    pub traction_forces_n: Vec<f64>,
    /// Rolling plus aerodynamic resistance on level road
    pub resistance_forces_n: Vec<f64>,
    pub traction_power_kw: Vec<f64>,
    pub resistance_power_kw: Vec<f64>,
    pub dynamic_factors: Vec<f64>,
    pub accelerations_mps2: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Standing start acceleration, integrated over the launch sweep
pub struct LaunchSeries {
    pub speeds_kph: Vec<f64>,
    pub accelerations_mps2: Vec<f64>,
    pub states: Vec<EnvelopeState>,
    /// Elapsed time, `None` beyond top speed
    pub times_s: Vec<Option<f64>>,
    /// Distance covered, `None` beyond top speed
    pub distances_m: Vec<Option<f64>>,
}

impl LaunchSeries {
    /// Time to reach the last speed of the sweep, if the vehicle gets there
    pub fn target_time_s(&self) -> Option<f64> {
        self.times_s.last().copied().flatten()
    }

    pub fn target_distance_m(&self) -> Option<f64> {
        self.distances_m.last().copied().flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    pub top_speed_kph: f64,
    pub top_speed_limit: TopSpeedLimit,
    pub accel_max_mps2: f64,
    pub target_speed_kph: f64,
    /// Launch time to `target_speed_kph`, `None` when it is beyond top speed
    pub target_time_s: Option<f64>,
    pub target_distance_m: Option<f64>,
    /// Steepest grade climbable at steady speed, from the peak dynamic factor
    pub max_grade_deg: f64,
    pub max_grade_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub gears: Vec<GearPerformance>,
    pub launch: LaunchSeries,
    pub key_metrics: KeyMetrics,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceModel {
    drivetrain: Drivetrain,
    res: VehicleRes,
}

impl PerformanceModel {
    pub fn from_spec(spec: &VehicleSpecification) -> Self {
        Self {
            drivetrain: Drivetrain::from_spec(spec),
            res: VehicleRes::from_spec(spec),
        }
    }

    pub fn drivetrain(&self) -> &Drivetrain {
        &self.drivetrain
    }

    /// δ = 1 + δ_wheels + δ_base·i_k², with i_k the gearbox ratio alone
    pub fn inertia_factor(&self, gear_idx: usize) -> f64 {
        1.0 + params::DELTA_WHEELS
            + params::DELTA_BASE * self.drivetrain.gear_ratio(gear_idx).powi(2)
    }

    /// Dynamic factor D = (F_t - F_a) / G for a tractive force at `speed`
    pub fn dynamic_factor(&self, traction: si::Force, speed: si::Velocity) -> f64 {
        ((traction - self.res.res_aero(speed)) / self.res.weight()).get::<si::ratio>()
    }

    /// a = (D - f)·g / δ when D exceeds the rolling coefficient, zero otherwise
    pub fn accel_from_dynamic_factor(
        &self,
        dynamic_factor: f64,
        inertia_factor: f64,
    ) -> si::Acceleration {
        let surplus = dynamic_factor - self.res.rolling_coeff().get::<si::ratio>();
        if surplus > 0.0 {
            surplus * uc::ACC_GRAV / inertia_factor
        } else {
            si::Acceleration::ZERO
        }
    }

    /// Acceleration in gear `gear_idx` at vehicle `speed`, `None` if the
    /// implied engine speed is out of range
    pub fn accel_in_gear(&self, gear_idx: usize, speed: si::Velocity) -> Option<si::Acceleration> {
        let n_rpm = self.drivetrain.engine_speed_at(gear_idx, speed);
        if !self.drivetrain.in_speed_range(n_rpm) {
            return None;
        }
        let d = self.dynamic_factor(self.drivetrain.force_at(gear_idx, n_rpm), speed);
        Some(self.accel_from_dynamic_factor(d, self.inertia_factor(gear_idx)))
    }

    fn envelope_at(&self, speed: si::Velocity) -> EnvelopePoint {
        (0..self.drivetrain.gear_count())
            .filter_map(|idx| self.accel_in_gear(idx, speed))
            .fold(
                EnvelopePoint {
                    accel: si::Acceleration::ZERO,
                    in_range: false,
                },
                |best, accel| EnvelopePoint {
                    accel: if accel > best.accel { accel } else { best.accel },
                    in_range: true,
                },
            )
    }

    /// Best acceleration over all gears at `speed`, zero if none accelerates
    pub fn envelope_accel(&self, speed: si::Velocity) -> si::Acceleration {
        self.envelope_at(speed).accel
    }

    fn classify(&self, speed: si::Velocity) -> PointClass {
        let point = self.envelope_at(speed);
        if point.accel > si::Acceleration::ZERO {
            PointClass::Achieved(point.accel)
        } else if point.in_range {
            PointClass::Collapse(TopSpeedLimit::Resistance)
        } else if speed < self.drivetrain.theoretical_top_speed() {
            PointClass::Gap
        } else {
            PointClass::Collapse(TopSpeedLimit::EngineSpeed)
        }
    }

    pub fn gear_characteristics(&self, config: &CalcConfig) -> Vec<GearPerformance> {
        let dt = &self.drivetrain;
        let speeds_rpm = dt.engine_speeds(config.performance_engine_points);
        (0..dt.gear_count())
            .map(|idx| {
                let inertia_factor = self.inertia_factor(idx);
                let mut gear = GearPerformance {
                    gear: idx + 1,
                    inertia_factor,
                    ..Default::default()
                };
                for n_rpm in &speeds_rpm {
                    let speed = dt.speed_at(idx, *n_rpm);
                    let traction = dt.force_at(idx, *n_rpm);
                    let resistance =
                        self.res.res_rolling(si::Angle::ZERO) + self.res.res_aero(speed);
                    let d = self.dynamic_factor(traction, speed);
                    gear.speeds_kph.push(speed.get::<si::kilometer_per_hour>());
                    gear.traction_forces_n.push(traction.get::<si::newton>());
                    gear.resistance_forces_n.push(resistance.get::<si::newton>());
                    gear.traction_power_kw
                        .push((traction * speed).get::<si::kilowatt>());
                    gear.resistance_power_kw
                        .push((resistance * speed).get::<si::kilowatt>());
                    gear.dynamic_factors.push(d);
                    gear.accelerations_mps2.push(
                        self.accel_from_dynamic_factor(d, inertia_factor)
                            .get::<si::meter_per_second_squared>(),
                    );
                }
                gear
            })
            .collect()
    }

    /// Classifies and integrates the envelope over `speeds_kph`, which must
    /// start at standstill and increase
    pub fn launch_over(&self, speeds_kph: &[f64]) -> LaunchSeries {
        let mut accels: Vec<Option<si::Acceleration>> = Vec::with_capacity(speeds_kph.len());
        let mut states = Vec::with_capacity(speeds_kph.len());
        let mut held: Option<si::Acceleration> = None;
        let mut collapsed = false;
        for v in speeds_kph {
            let class = if collapsed {
                None
            } else {
                Some(self.classify(*v * uc::KPH))
            };
            match class {
                Some(PointClass::Achieved(accel)) => {
                    held = Some(accel);
                    states.push(EnvelopeState::Achieved);
                    accels.push(Some(accel));
                }
                _ if held.is_none() => {
                    states.push(EnvelopeState::Launch);
                    accels.push(None);
                }
                Some(PointClass::Gap) => {
                    states.push(EnvelopeState::Gap);
                    accels.push(held);
                }
                Some(PointClass::Collapse(_)) | None => {
                    collapsed = true;
                    states.push(EnvelopeState::BeyondTopSpeed);
                    accels.push(Some(si::Acceleration::ZERO));
                }
            }
        }

        let launch_accel = states
            .iter()
            .zip(&accels)
            .find(|(state, _)| **state == EnvelopeState::Achieved)
            .and_then(|(_, accel)| *accel);
        // a vehicle that cannot move off is beyond its top speed everywhere
        if launch_accel.is_none() {
            for state in states.iter_mut() {
                *state = EnvelopeState::BeyondTopSpeed;
            }
        }
        let accels: Vec<si::Acceleration> = accels
            .into_iter()
            .map(|a| a.or(launch_accel).unwrap_or(si::Acceleration::ZERO))
            .collect();

        let mut times_s = Vec::with_capacity(speeds_kph.len());
        let mut distances_m = Vec::with_capacity(speeds_kph.len());
        if !speeds_kph.is_empty() {
            times_s.push(Some(0.0));
            distances_m.push(Some(0.0));
        }
        for i in 1..speeds_kph.len() {
            let prev = times_s[i - 1].zip(distances_m[i - 1]);
            match (states[i], prev) {
                (EnvelopeState::BeyondTopSpeed, _) | (_, None) => {
                    times_s.push(None);
                    distances_m.push(None);
                }
                (_, Some((t, s))) => {
                    let dv = (speeds_kph[i] - speeds_kph[i - 1]) * uc::KPH;
                    let accel_mean = (accels[i] + accels[i - 1]) / 2.0;
                    let speed_mean = (speeds_kph[i] + speeds_kph[i - 1]) / 2.0 * uc::KPH;
                    let dt: si::Time = dv / accel_mean;
                    let ds: si::Length = speed_mean * dt;
                    times_s.push(Some(t + dt.get::<si::second>()));
                    distances_m.push(Some(s + ds.get::<si::meter>()));
                }
            }
        }

        LaunchSeries {
            speeds_kph: speeds_kph.to_vec(),
            accelerations_mps2: accels
                .iter()
                .map(|a| a.get::<si::meter_per_second_squared>())
                .collect(),
            states,
            times_s,
            distances_m,
        }
    }

    pub fn launch(&self, config: &CalcConfig) -> LaunchSeries {
        self.launch_over(&config.launch_speeds_kph())
    }

    /// Highest speed, on a `step_kph` grid, up to which the envelope stays
    /// positive, searched up to the theoretical top speed of the last gear.
    /// Gaps between gear ranges are passed through.
    pub fn top_speed(&self, step_kph: f64) -> (si::Velocity, TopSpeedLimit) {
        let ceiling_kph = self
            .drivetrain
            .theoretical_top_speed()
            .get::<si::kilometer_per_hour>();
        let mut speeds_kph = utils::arange(0.0, ceiling_kph, step_kph);
        if speeds_kph.last().map_or(true, |v| *v < ceiling_kph) {
            speeds_kph.push(ceiling_kph);
        }

        let mut top: Option<si::Velocity> = None;
        for v in speeds_kph {
            let speed = v * uc::KPH;
            match (self.classify(speed), top) {
                (PointClass::Achieved(_), _) => top = Some(speed),
                (PointClass::Collapse(limit), Some(top)) => return (top, limit),
                _ => {}
            }
        }
        match top {
            Some(top) => (top, TopSpeedLimit::EngineSpeed),
            // never moves off
            None => (si::Velocity::ZERO, TopSpeedLimit::Resistance),
        }
    }

    #[cfg_attr(not(feature = "logging"), allow(unused_variables))]
    pub fn report(&self, spec: &VehicleSpecification, config: &CalcConfig) -> PerformanceReport {
        let gears = self.gear_characteristics(config);
        let launch = self.launch(config);
        let (top_speed, top_speed_limit) = self.top_speed(config.top_speed_step_kph);

        let target_time_s = launch.target_time_s();
        if target_time_s.is_none() {
            #[cfg(feature = "logging")]
            log::warn!(
                "{}: target speed of {} km/h is beyond top speed of {} km/h",
                spec.name,
                config.launch_speed_target_kph,
                top_speed.get::<si::kilometer_per_hour>().format_eng(Some(5)),
            );
        }

        let dynamic_factor_max = gears
            .iter()
            .flat_map(|g| g.dynamic_factors.iter().cloned())
            .fold(f64::NEG_INFINITY, f64::max);
        let grade_tan = (dynamic_factor_max - self.res.rolling_coeff().get::<si::ratio>()).max(0.0);

        let key_metrics = KeyMetrics {
            top_speed_kph: top_speed.get::<si::kilometer_per_hour>(),
            top_speed_limit,
            accel_max_mps2: launch
                .accelerations_mps2
                .iter()
                .cloned()
                .fold(0.0, f64::max),
            target_speed_kph: config.launch_speed_target_kph,
            target_time_s,
            target_distance_m: launch.target_distance_m(),
            max_grade_deg: grade_tan.atan().to_degrees(),
            max_grade_pct: grade_tan * 100.0,
        };

        #[cfg(feature = "logging")]
        log::debug!(
            "{}: top speed {} km/h ({:?}), max acceleration {} m/s²",
            spec.name,
            key_metrics.top_speed_kph.format_eng(Some(5)),
            key_metrics.top_speed_limit,
            key_metrics.accel_max_mps2.format_eng(Some(4)),
        );

        PerformanceReport {
            gears,
            launch,
            key_metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> PerformanceModel {
        PerformanceModel::from_spec(&VehicleSpecification::valid())
    }

    #[test]
    fn test_inertia_factor() {
        let m = model();
        assert!(almost_eq(m.inertia_factor(0), 1.04 + 0.05 * 3.727 * 3.727, None));
        assert!(m.inertia_factor(0) > m.inertia_factor(4));
    }

    #[test]
    fn test_launch_series_non_decreasing() {
        let launch = model().launch(&CalcConfig::default());
        assert_eq!(launch.speeds_kph.len(), 101);
        assert_eq!(launch.times_s[0], Some(0.0));
        assert_eq!(launch.distances_m[0], Some(0.0));
        let times: Vec<f64> = launch.times_s.iter().map(|t| t.unwrap()).collect();
        let distances: Vec<f64> = launch.distances_m.iter().map(|s| s.unwrap()).collect();
        assert!(times.windows(2).all(|w| w[1] >= w[0]));
        assert!(distances.windows(2).all(|w| w[1] >= w[0]));
        assert!(launch.accelerations_mps2.iter().all(|a| *a > 0.0));
    }

    #[test]
    fn test_launch_region_holds_first_achieved() {
        let launch = model().launch(&CalcConfig::default());
        // first gear reaches about 6.5 km/h at idle
        assert!(launch.states[..7].iter().all(|s| *s == EnvelopeState::Launch));
        assert_eq!(launch.states[7], EnvelopeState::Achieved);
        assert!(launch.states[7..]
            .iter()
            .all(|s| *s == EnvelopeState::Achieved));
        assert_eq!(launch.accelerations_mps2[0], launch.accelerations_mps2[7]);
        let json = serde_json::to_string(&launch).unwrap();
        assert!(json.contains(r#""launch""#));
    }

    #[test]
    fn test_reference_vehicle_key_metrics() {
        let spec = VehicleSpecification::valid();
        let report = model().report(&spec, &CalcConfig::default());
        let km = &report.key_metrics;
        assert_eq!(km.top_speed_limit, TopSpeedLimit::Resistance);
        assert!(km.top_speed_kph > 195.0 && km.top_speed_kph < 210.0, "{}", km.top_speed_kph);
        let t = km.target_time_s.unwrap();
        assert!(t > 13.0 && t < 17.0, "{t}");
        let s = km.target_distance_m.unwrap();
        assert!(s > 200.0 && s < 280.0, "{s}");
        assert!(km.accel_max_mps2 > 2.4 && km.accel_max_mps2 < 2.8);
        assert!(km.max_grade_deg > 23.0 && km.max_grade_deg < 26.0);
        assert!(almost_eq(
            km.max_grade_pct,
            km.max_grade_deg.to_radians().tan() * 100.0,
            Some(1e-9)
        ));
        assert_eq!(report.gears.len(), 5);
        assert_eq!(report.gears[0].speeds_kph.len(), 50);
    }

    #[test]
    fn test_beyond_top_speed_marked() {
        let config = CalcConfig {
            launch_speed_target_kph: 250.0,
            ..Default::default()
        };
        let report = model().report(&VehicleSpecification::valid(), &config);
        let launch = &report.launch;
        let first_beyond = launch
            .states
            .iter()
            .position(|s| *s == EnvelopeState::BeyondTopSpeed)
            .unwrap();
        assert!(launch.speeds_kph[first_beyond] > report.key_metrics.top_speed_kph);
        assert!(launch.states[first_beyond..]
            .iter()
            .all(|s| *s == EnvelopeState::BeyondTopSpeed));
        assert!(launch.times_s[first_beyond..].iter().all(Option::is_none));
        assert!(launch.distances_m[first_beyond..].iter().all(Option::is_none));
        assert!(launch.times_s[first_beyond - 1].is_some());
        assert!(launch.accelerations_mps2[first_beyond..].iter().all(|a| *a == 0.0));
        assert_eq!(report.key_metrics.target_time_s, None);
        assert_eq!(report.key_metrics.target_distance_m, None);
        assert!(report.to_json().unwrap().contains("null"));
    }

    #[test]
    fn test_accel_in_gear_out_of_range() {
        let m = model();
        // 5th gear at walking pace would stall the engine
        assert!(m.accel_in_gear(4, 5.0 * uc::KPH).is_none());
        // 1st gear at highway speed would overspeed it
        assert!(m.accel_in_gear(0, 120.0 * uc::KPH).is_none());
        assert!(m.accel_in_gear(0, 20.0 * uc::KPH).unwrap() > si::Acceleration::ZERO);
    }

    #[test]
    fn test_engine_speed_limited_top_speed() {
        let mut spec = VehicleSpecification::valid();
        // short top gear: runs out of engine speed long before drag wins
        spec.transmission.gear_ratios = vec![3.727, 2.048, 1.393];
        let (top, limit) = PerformanceModel::from_spec(&spec).top_speed(1.0);
        assert_eq!(limit, TopSpeedLimit::EngineSpeed);
        let ceiling = Drivetrain::from_spec(&spec).theoretical_top_speed();
        assert!(top <= ceiling);
        assert!((ceiling - top).get::<si::kilometer_per_hour>() < 1.0);
    }

    #[test]
    fn test_immobile_vehicle() {
        let mut spec = VehicleSpecification::valid();
        spec.mass.mass_total = 200_000.0 * uc::KG;
        let launch = PerformanceModel::from_spec(&spec).launch(&CalcConfig::default());
        assert!(launch
            .states
            .iter()
            .all(|s| *s == EnvelopeState::BeyondTopSpeed));
        assert_eq!(launch.times_s[0], Some(0.0));
        assert!(launch.times_s[1..].iter().all(Option::is_none));
        assert_eq!(launch.target_time_s(), None);
    }

    #[test]
    fn test_zero_idle_speed_launches_from_standstill() {
        let mut spec = VehicleSpecification::valid();
        spec.engine.speed_idle = 0.0 * uc::RPM;
        assert!(spec.check().is_ok());
        let m = PerformanceModel::from_spec(&spec);
        let launch = m.launch(&CalcConfig::default());
        // no torque at standstill, first gear pulls from the next point on
        assert_eq!(launch.states[0], EnvelopeState::Launch);
        assert!(launch.states[1..]
            .iter()
            .all(|s| *s == EnvelopeState::Achieved));
        assert_eq!(launch.accelerations_mps2[0], launch.accelerations_mps2[1]);
        assert!(launch.target_time_s().is_some());
        let (top, limit) = m.top_speed(1.0);
        assert_eq!(limit, TopSpeedLimit::Resistance);
        let top_kph = top.get::<si::kilometer_per_hour>();
        assert!(top_kph > 195.0 && top_kph < 210.0, "{top_kph}");
    }

    #[test]
    fn test_gap_between_gear_ranges() {
        let mut spec = VehicleSpecification::valid();
        // 1st gear tops out near 49.9 km/h, 2nd only pulls from about 54 km/h
        spec.transmission.gear_ratios = vec![3.727, 0.45];
        let m = PerformanceModel::from_spec(&spec);
        assert!(m.accel_in_gear(0, 52.0 * uc::KPH).is_none());
        assert!(m.accel_in_gear(1, 52.0 * uc::KPH).is_none());
        assert!(m.accel_in_gear(1, 80.0 * uc::KPH).unwrap() > si::Acceleration::ZERO);

        let launch = m.launch(&CalcConfig::default());
        let gaps: Vec<usize> = launch
            .states
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == EnvelopeState::Gap)
            .map(|(idx, _)| idx)
            .collect();
        assert_eq!(gaps, vec![50, 51, 52, 53, 54]);
        assert_eq!(launch.states[49], EnvelopeState::Achieved);
        assert_eq!(launch.states[55], EnvelopeState::Achieved);
        assert!(!launch.states.contains(&EnvelopeState::BeyondTopSpeed));
        for idx in gaps {
            assert_eq!(launch.accelerations_mps2[idx], launch.accelerations_mps2[49]);
        }
        let times: Vec<f64> = launch.times_s.iter().map(|t| t.unwrap()).collect();
        assert!(times.windows(2).all(|w| w[1] > w[0]));
        assert!(launch.target_time_s().is_some());

        let (top, limit) = m.top_speed(1.0);
        assert_eq!(limit, TopSpeedLimit::Resistance);
        assert!(top.get::<si::kilometer_per_hour>() > 100.0);
    }
}
