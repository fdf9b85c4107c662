//! CSV tables of the tabular results, one row per sample point.

use crate::braking::{BrakingReport, RoadSurface};
use crate::calc::VehicleReport;
use crate::imports::*;
use crate::performance::{EnvelopeState, LaunchSeries};
use crate::traction::TractionReport;

/// Writes a result as a CSV table with a header row
pub trait CsvExport {
    type Row: Serialize;

    fn csv_rows(&self) -> Vec<Self::Row>;

    fn to_csv_writer<W: std::io::Write>(&self, wtr: W) -> anyhow::Result<()> {
        let mut wrtr = csv::WriterBuilder::new().has_headers(true).from_writer(wtr);
        for row in self.csv_rows() {
            wrtr.serialize(row)?;
        }
        wrtr.flush()?;
        Ok(())
    }

    /// Creates the file if it does not exist, otherwise truncates it
    fn to_csv_file<P: AsRef<Path>>(&self, filepath: P) -> anyhow::Result<()> {
        let filepath = filepath.as_ref();
        let file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(filepath)
            .with_context(|| format!("Could not create file: {filepath:?}"))?;
        self.to_csv_writer(file)
            .with_context(|| format_dbg!(filepath))
    }

    fn to_csv_string(&self) -> anyhow::Result<String> {
        let mut buf = Vec::new();
        self.to_csv_writer(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRow {
    pub speed_kph: f64,
    pub acceleration_mps2: f64,
    pub state: EnvelopeState,
    pub time_s: Option<f64>,
    pub distance_m: Option<f64>,
}

impl CsvExport for LaunchSeries {
    type Row = LaunchRow;

    fn csv_rows(&self) -> Vec<LaunchRow> {
        self.speeds_kph
            .iter()
            .zip(&self.accelerations_mps2)
            .zip(&self.states)
            .zip(self.times_s.iter().zip(&self.distances_m))
            .map(|(((speed_kph, accel), state), (time_s, distance_m))| LaunchRow {
                speed_kph: *speed_kph,
                acceleration_mps2: *accel,
                state: *state,
                time_s: *time_s,
                distance_m: *distance_m,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrakingRow {
    pub surface: RoadSurface,
    pub adhesion: f64,
    pub speed_kph: f64,
    pub distance_m: f64,
    pub time_s: f64,
}

impl CsvExport for BrakingReport {
    type Row = BrakingRow;

    fn csv_rows(&self) -> Vec<BrakingRow> {
        self.surfaces
            .iter()
            .flat_map(|surface| {
                self.speeds_kph
                    .iter()
                    .zip(surface.distances_m.iter().zip(&surface.times_s))
                    .map(move |(speed_kph, (distance_m, time_s))| BrakingRow {
                        surface: surface.surface,
                        adhesion: surface.adhesion,
                        speed_kph: *speed_kph,
                        distance_m: *distance_m,
                        time_s: *time_s,
                    })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TractionRow {
    pub gear: usize,
    pub engine_speed_rpm: f64,
    pub speed_kph: f64,
    pub force_n: f64,
}

impl CsvExport for TractionReport {
    type Row = TractionRow;

    fn csv_rows(&self) -> Vec<TractionRow> {
        self.gears
            .iter()
            .flat_map(|gear| {
                self.engine_curve
                    .speeds_rpm
                    .iter()
                    .zip(gear.speeds_kph.iter().zip(&gear.forces_n))
                    .map(move |(n_rpm, (speed_kph, force_n))| TractionRow {
                        gear: gear.gear,
                        engine_speed_rpm: *n_rpm,
                        speed_kph: *speed_kph,
                        force_n: *force_n,
                    })
            })
            .collect()
    }
}

/// Writes `launch.csv`, `braking.csv` and `traction.csv` into `dir`, which
/// must exist, and returns the written paths
pub fn export_tables<P: AsRef<Path>>(
    report: &VehicleReport,
    dir: P,
) -> anyhow::Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    ensure!(dir.is_dir(), "Not a directory: {dir:?}");
    let launch = dir.join("launch.csv");
    report.performance.launch.to_csv_file(&launch)?;
    let braking = dir.join("braking.csv");
    report.braking.to_csv_file(&braking)?;
    let traction = dir.join("traction.csv");
    report.traction.to_csv_file(&traction)?;
    Ok(vec![launch, braking, traction])
}
