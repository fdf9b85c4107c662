use crate::imports::*;

/// Generates a formatted `String` with file and line number of the call site,
/// optionally followed by an expression and its `Debug` value.
/// Intended for use with `anyhow::Context::with_context`.
#[macro_export]
macro_rules! format_dbg {
    ($dbg_expr:expr) => {
        format!(
            "[{}:{}] {}: {:?}",
            file!(),
            line!(),
            stringify!($dbg_expr),
            $dbg_expr
        )
    };
    () => {
        format!("[{}:{}]", file!(), line!())
    };
}

/// Returns true if `val1` and `val2` are within a relative/absolute `epsilon` of each other,
/// depending on magnitude.
pub fn almost_eq(val1: f64, val2: f64, epsilon: Option<f64>) -> bool {
    let epsilon = epsilon.unwrap_or(1e-8);
    ((val2 - val1) / (val1 + val2)).abs() < epsilon || (val2 - val1).abs() < epsilon
}

/// [almost_eq] for any `uom` quantity, compared in SI base units.
pub fn almost_eq_uom<D, U>(
    val1: &uom::si::Quantity<D, U, f64>,
    val2: &uom::si::Quantity<D, U, f64>,
    epsilon: Option<f64>,
) -> bool
where
    D: uom::si::Dimension + ?Sized,
    U: uom::si::Units<f64> + ?Sized,
{
    almost_eq(val1.value, val2.value, epsilon)
}

/// Values from `start` to `stop` inclusive in increments of `step`.  The last
/// value is `stop` when `stop - start` is an integer multiple of `step`.
///
/// Values are computed as `start + i * step` rather than accumulated so that
/// sweeps such as 0..=100 in steps of 1 land exactly on their grid points.
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || stop < start {
        return vec![start];
    }
    let n_steps = ((stop - start) / step + 1e-9).floor() as usize;
    (0..=n_steps).map(|i| start + i as f64 * step).collect()
}

/// Outcome of a derived quantity that can be geometrically or mathematically
/// undefined for some otherwise valid inputs, e.g. the geometric progression
/// ratio of a single-speed transmission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Derived<T> {
    Valid(T),
    /// Not computable; holds a description of why.
    Degenerate(String),
}

impl<T> Derived<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Valid(v) => Some(v),
            Self::Degenerate(_) => None,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate(_))
    }

    pub fn map<V, F: FnOnce(T) -> V>(self, f: F) -> Derived<V> {
        match self {
            Self::Valid(v) => Derived::Valid(f(v)),
            Self::Degenerate(reason) => Derived::Degenerate(reason),
        }
    }
}
