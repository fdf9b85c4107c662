//! Computation entry points.  Each validates its inputs, then runs one model
//! as a pure function of the [VehicleSpecification].

use crate::braking::{BrakingModel, BrakingReport};
use crate::config::CalcConfig;
use crate::imports::*;
use crate::performance::{PerformanceModel, PerformanceReport};
use crate::resistance::ResistanceReport;
use crate::traction::{TractionModel, TractionReport};
use crate::vehicle::VehicleSpecification;
use rayon::prelude::*;

/// Results of every model for one vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleReport {
    pub name: String,
    pub resistances: ResistanceReport,
    pub traction: TractionReport,
    pub performance: PerformanceReport,
    pub braking: BrakingReport,
}

#[duplicate_item(
    report_type;
    [ResistanceReport];
    [TractionReport];
    [PerformanceReport];
    [BrakingReport];
    [VehicleReport];
)]
impl Init for report_type {}

#[duplicate_item(
    report_type;
    [ResistanceReport];
    [TractionReport];
    [PerformanceReport];
    [BrakingReport];
    [VehicleReport];
)]
impl SerdeAPI for report_type {}

fn check_inputs(spec: &VehicleSpecification, config: &CalcConfig) -> anyhow::Result<()> {
    config.check()?;
    spec.check()?;
    Ok(())
}

fn run_resistances(spec: &VehicleSpecification, config: &CalcConfig) -> ResistanceReport {
    let report = ResistanceReport::build(spec, config);
    #[cfg(feature = "logging")]
    log::debug!(
        "{}: rolling resistance {} N, adhesion-limited grade {} deg",
        spec.name,
        report.rolling_force_n.format_eng(Some(5)),
        report.grade.max_grade_deg.format_eng(Some(4)),
    );
    report
}

fn run_traction(spec: &VehicleSpecification, config: &CalcConfig) -> TractionReport {
    let report = TractionModel::from_spec(spec).report(spec, config);
    #[cfg(feature = "logging")]
    log::debug!(
        "{}: peak torque {} N·m, theoretical top speed {} km/h",
        spec.name,
        report.engine.torque_peak_curve_nm.format_eng(Some(5)),
        report.top_speed_theoretical_kph.format_eng(Some(5)),
    );
    report
}

fn run_performance(spec: &VehicleSpecification, config: &CalcConfig) -> PerformanceReport {
    PerformanceModel::from_spec(spec).report(spec, config)
}

fn run_braking(spec: &VehicleSpecification, config: &CalcConfig) -> BrakingReport {
    let report = BrakingModel::from_spec(spec).report(spec, config);
    #[cfg(feature = "logging")]
    log::debug!(
        "{}: stopping distance from {} km/h on dry road {} m",
        spec.name,
        report.reference_stop.speed_kph,
        report.reference_stop.distance_m.format_eng(Some(4)),
    );
    report
}

pub fn compute_resistances(spec: &VehicleSpecification) -> anyhow::Result<ResistanceReport> {
    compute_resistances_with(spec, &CalcConfig::default())
}

pub fn compute_resistances_with(
    spec: &VehicleSpecification,
    config: &CalcConfig,
) -> anyhow::Result<ResistanceReport> {
    check_inputs(spec, config)?;
    Ok(run_resistances(spec, config))
}

pub fn compute_traction(spec: &VehicleSpecification) -> anyhow::Result<TractionReport> {
    compute_traction_with(spec, &CalcConfig::default())
}

pub fn compute_traction_with(
    spec: &VehicleSpecification,
    config: &CalcConfig,
) -> anyhow::Result<TractionReport> {
    check_inputs(spec, config)?;
    Ok(run_traction(spec, config))
}

pub fn compute_performance(spec: &VehicleSpecification) -> anyhow::Result<PerformanceReport> {
    compute_performance_with(spec, &CalcConfig::default())
}

pub fn compute_performance_with(
    spec: &VehicleSpecification,
    config: &CalcConfig,
) -> anyhow::Result<PerformanceReport> {
    check_inputs(spec, config)?;
    Ok(run_performance(spec, config))
}

pub fn compute_braking(spec: &VehicleSpecification) -> anyhow::Result<BrakingReport> {
    compute_braking_with(spec, &CalcConfig::default())
}

pub fn compute_braking_with(
    spec: &VehicleSpecification,
    config: &CalcConfig,
) -> anyhow::Result<BrakingReport> {
    check_inputs(spec, config)?;
    Ok(run_braking(spec, config))
}

pub fn compute_all(spec: &VehicleSpecification) -> anyhow::Result<VehicleReport> {
    compute_all_with(spec, &CalcConfig::default())
}

/// Runs every model, validating the inputs once
pub fn compute_all_with(
    spec: &VehicleSpecification,
    config: &CalcConfig,
) -> anyhow::Result<VehicleReport> {
    check_inputs(spec, config).with_context(|| format!("Could not evaluate {:?}", spec.name))?;
    Ok(VehicleReport {
        name: spec.name.clone(),
        resistances: run_resistances(spec, config),
        traction: run_traction(spec, config),
        performance: run_performance(spec, config),
        braking: run_braking(spec, config),
    })
}

/// [compute_all_with] for many vehicles in parallel.  Results keep the order
/// of `specs`; one invalid specification does not affect the others.
pub fn compute_all_batch(
    specs: &[VehicleSpecification],
    config: &CalcConfig,
) -> Vec<anyhow::Result<VehicleReport>> {
    specs
        .par_iter()
        .map(|spec| compute_all_with(spec, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_spec_rejected_by_every_entry_point() {
        let mut spec = VehicleSpecification::valid();
        spec.transmission.gear_ratios = vec![];
        let is_invalid = |err: anyhow::Error| {
            matches!(
                err.downcast_ref::<Error>(),
                Some(Error::InvalidSpecification(_))
            )
        };
        assert!(is_invalid(compute_resistances(&spec).unwrap_err()));
        assert!(is_invalid(compute_traction(&spec).unwrap_err()));
        assert!(is_invalid(compute_performance(&spec).unwrap_err()));
        assert!(is_invalid(compute_braking(&spec).unwrap_err()));
        assert!(is_invalid(compute_all(&spec).unwrap_err()));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = CalcConfig {
            performance_engine_points: 0,
            ..Default::default()
        };
        let err = compute_performance_with(&VehicleSpecification::valid(), &config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_compute_all_matches_individual() {
        let spec = VehicleSpecification::valid();
        let all = compute_all(&spec).unwrap();
        assert_eq!(all.name, spec.name);
        assert_eq!(all.resistances, compute_resistances(&spec).unwrap());
        assert_eq!(all.traction, compute_traction(&spec).unwrap());
        assert_eq!(all.performance, compute_performance(&spec).unwrap());
        assert_eq!(all.braking, compute_braking(&spec).unwrap());
    }

    #[test]
    fn test_batch_isolates_failures() {
        let good = VehicleSpecification::valid();
        let mut bad = good.clone();
        bad.tire.radius_dynamic = -0.3 * uc::M;
        let mut diesel = good.clone();
        diesel.engine.fuel_type = crate::engine::FuelType::Diesel;
        let results = compute_all_batch(&[good.clone(), bad, diesel], &CalcConfig::default());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap(), &compute_all(&good).unwrap());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_report_serde_roundtrip() {
        let report = compute_all(&VehicleSpecification::valid()).unwrap();
        let json = report.to_json().unwrap();
        let report_de = VehicleReport::from_json(&json, false).unwrap();
        assert_eq!(report.name, report_de.name);
        assert_eq!(
            report.performance.launch.states,
            report_de.performance.launch.states
        );
        assert_eq!(
            report.performance.key_metrics.target_time_s.is_some(),
            report_de.performance.key_metrics.target_time_s.is_some()
        );
        assert!(almost_eq(
            report.braking.reference_stop.distance_m,
            report_de.braking.reference_stop.distance_m,
            None
        ));
        let yaml = report.to_yaml().unwrap();
        assert!(yaml.contains("resistances"));
    }
}
