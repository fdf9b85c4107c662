//! Collect-all-violations validation used by inputs and configs.

use crate::imports::*;

pub type ValidationError = anyhow::Error;
pub type ValidationResults = Result<(), ValidationErrors>;

/// Every violation found while validating an object.
#[derive(Debug, Default)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: ValidationError) {
        self.0.push(err);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Appends `other`, prefixing each message with `name`.
    pub fn extend_from(&mut self, other: ValidationErrors, name: &str) {
        for err in other.0 {
            self.0.push(anyhow!("{name}: {err}"));
        }
    }

    /// `Ok(())` when no violation was pushed.
    pub fn make_err(self) -> ValidationResults {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self.0.iter().map(|err| format!("- {err}")).collect();
        write!(f, "{}", msgs.join("\n"))
    }
}

/// Validation state of an object.
pub trait ObjState {
    fn validate(&self) -> ValidationResults {
        Ok(())
    }

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Provides a realistic, valid instance for tests and documentation.
pub trait Valid: Sized + Default {
    fn valid() -> Self {
        Self::default()
    }
}

fn fmt_val(val: f64) -> String {
    if val.is_finite() && val != 0.0 {
        val.format_eng(Some(5))
    } else {
        format!("{val:?}")
    }
}

/// Pushes an error if `val` is not finite.
pub fn chk_num_fin(errors: &mut ValidationErrors, val: f64, name: &str) {
    if !val.is_finite() {
        errors.push(anyhow!("{name} = {val:?} must be finite!"));
    }
}

/// Pushes an error if `val` is not finite and strictly positive.
pub fn chk_num_gtz_fin(errors: &mut ValidationErrors, val: f64, name: &str) {
    if !(val.is_finite() && val > 0.0) {
        errors.push(anyhow!(
            "{name} = {} must be a finite number greater than zero!",
            fmt_val(val)
        ));
    }
}

/// Pushes an error if `val` is not finite and non-negative.
pub fn chk_num_gez_fin(errors: &mut ValidationErrors, val: f64, name: &str) {
    if !(val.is_finite() && val >= 0.0) {
        errors.push(anyhow!(
            "{name} = {} must be a finite number greater than or equal to zero!",
            fmt_val(val)
        ));
    }
}

/// Pushes an error if `val` is outside of `[lo, hi]`.
pub fn chk_num_in_range(errors: &mut ValidationErrors, val: f64, lo: f64, hi: f64, name: &str) {
    if !(val.is_finite() && (lo..=hi).contains(&val)) {
        errors.push(anyhow!(
            "{name} = {} must be within [{}, {}]!",
            fmt_val(val),
            lo,
            hi
        ));
    }
}

/// [chk_num_gtz_fin] for quantities, checked in SI base units.
pub fn si_chk_num_gtz_fin<D, U>(
    errors: &mut ValidationErrors,
    val: &uom::si::Quantity<D, U, f64>,
    name: &str,
) where
    D: uom::si::Dimension + ?Sized,
    U: uom::si::Units<f64> + ?Sized,
{
    chk_num_gtz_fin(errors, val.value, name)
}

/// [chk_num_gez_fin] for quantities, checked in SI base units.
pub fn si_chk_num_gez_fin<D, U>(
    errors: &mut ValidationErrors,
    val: &uom::si::Quantity<D, U, f64>,
    name: &str,
) where
    D: uom::si::Dimension + ?Sized,
    U: uom::si::Units<f64> + ?Sized,
{
    chk_num_gez_fin(errors, val.value, name)
}
