//! Shared test scaffolding.

use crate::imports::*;

/// Cases that should pass and fail validation for a type.
pub trait Cases: ObjState + Valid + fmt::Debug {
    fn real_cases() -> Vec<Self> {
        vec![Self::valid()]
    }
    fn invalid_cases() -> Vec<Self> {
        vec![]
    }
}

/// Asserts that all real cases validate and all invalid cases are rejected.
pub fn check_cases<T: Cases>() {
    for case in T::real_cases() {
        if let Err(errors) = case.validate() {
            panic!("real case failed validation:\n{errors}\n{case:?}");
        }
    }
    for (idx, case) in T::invalid_cases().iter().enumerate() {
        assert!(
            case.validate().is_err(),
            "invalid case {idx} passed validation:\n{case:?}"
        );
    }
}
