pub use crate::braking::{BrakeDistribution, BrakingModel, BrakingReport, RoadSurface};
pub use crate::calc::{
    compute_all, compute_all_batch, compute_all_with, compute_braking, compute_braking_with,
    compute_performance, compute_performance_with, compute_resistances,
    compute_resistances_with, compute_traction, compute_traction_with, VehicleReport,
};
pub use crate::config::CalcConfig;
pub use crate::engine::{EngineCurve, FuelType, LeidermanCoeffs};
pub use crate::error::{Error, VehDynResult};
pub use crate::performance::{
    EnvelopeState, LaunchSeries, PerformanceModel, PerformanceReport, TopSpeedLimit,
};
pub use crate::resistance::{ResBreakdown, ResistanceReport, VehicleRes};
pub use crate::traction::{Drivetrain, TractionModel, TractionReport};
pub use crate::traits::{Init, SerdeAPI};
pub use crate::utils::Derived;
pub use crate::validate::{ObjState, Valid};
pub use crate::vehicle::{
    AeroParams, Dimensions, EngineParams, MassParams, TireParams, TransmissionParams,
    VehicleSpecification,
};
