use crate::imports::*;
use crate::prelude::*;

/// Re-derives the acceleration of every gear from the traction curves alone
/// and compares it with the performance model at the same sample points.
#[test]
fn test_traction_curves_reproduce_envelope() {
    let spec = VehicleSpecification::valid();
    let traction = compute_traction(&spec).unwrap();
    let model = PerformanceModel::from_spec(&spec);

    let weight = spec.weight().get::<si::newton>();
    let f = spec.tire.rolling_coeff.get::<si::ratio>();
    let cd_area = spec.aero.drag_area().get::<si::square_meter>();
    let g = uc::ACC_GRAV.get::<si::meter_per_second_squared>();

    for (idx, gear) in traction.gears.iter().enumerate() {
        let delta = 1.0 + 0.04 + 0.05 * gear.gear_ratio.powi(2);
        for (v_kph, force) in gear.speeds_kph.iter().zip(&gear.forces_n) {
            let v = v_kph / 3.6;
            let d = (force - 0.5 * 1.225 * cd_area * v * v) / weight;
            let expected = if d > f { (d - f) * g / delta } else { 0.0 };
            let accel = model
                .accel_in_gear(idx, *v_kph * uc::KPH)
                .expect("traction sample points lie within the engine speed range")
                .get::<si::meter_per_second_squared>();
            assert!(
                almost_eq(accel, expected, Some(1e-6)),
                "gear {} at {v_kph} km/h: {accel} != {expected}",
                gear.gear
            );
            let envelope = model
                .envelope_accel(*v_kph * uc::KPH)
                .get::<si::meter_per_second_squared>();
            assert!(envelope >= accel - 1e-12);
        }
    }
}

#[test]
fn test_models_are_independent_of_call_order() {
    let spec = VehicleSpecification::valid();
    let braking_first = compute_braking(&spec).unwrap();
    let _ = compute_performance(&spec).unwrap();
    let _ = compute_traction(&spec).unwrap();
    assert_eq!(braking_first, compute_braking(&spec).unwrap());
}

#[test]
fn test_reference_vehicle_file_evaluates() {
    let spec = VehicleSpecification::from_file(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("resources/vehicles/segment_c.yaml"),
        false,
    )
    .unwrap();
    let report = compute_all(&spec).unwrap();
    assert_eq!(report.traction.gears.len(), 5);
    assert!(report.performance.key_metrics.target_time_s.is_some());
    assert!(!report.braking.distribution.is_degenerate());
}

#[test]
fn test_spec_file_roundtrip() {
    let spec = VehicleSpecification::valid();
    let tmp_dir = tempfile::tempdir().unwrap();
    for ext in ["yaml", "json", "bin"] {
        let path = tmp_dir.path().join(format!("vehicle.{ext}"));
        spec.to_file(&path).unwrap();
        let spec_de = VehicleSpecification::from_file(&path, false).unwrap();
        assert_eq!(spec_de.name, spec.name);
        assert_eq!(spec_de.transmission, spec.transmission);
        assert!(almost_eq_uom(
            &spec_de.mass.mass_total,
            &spec.mass.mass_total,
            None
        ));
    }
    assert!(spec.to_file(tmp_dir.path().join("vehicle.txt")).is_err());
}

#[test]
fn test_config_file_drives_sampling() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("config.yaml");
    let config = CalcConfig {
        braking_speed_max_kph: 200.0,
        performance_engine_points: 20,
        ..Default::default()
    };
    config.to_file(&path).unwrap();
    let config = CalcConfig::from_file(&path, false).unwrap();
    let report = compute_all_with(&VehicleSpecification::valid(), &config).unwrap();
    assert_eq!(report.braking.speeds_kph.len(), 20);
    assert_eq!(report.performance.gears[0].speeds_kph.len(), 20);
}
