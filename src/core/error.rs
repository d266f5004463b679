use std::ops::RangeBounds;
use thiserror::Error;

/// Errors arising from structural parameters and wage state.
///
/// These are configuration errors: they are raised at construction or
/// calibration time and must stop a simulation before it starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("parameter {name} = {value} is out of range: {expected}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
    #[error("equity condition failed: wbar = {wbar} must be below 1")]
    EquityCondition { wbar: f64 },
    #[error("countries differ in {parameter} ({x} vs {y}); only productivity z may differ")]
    Mismatch {
        parameter: &'static str,
        x: f64,
        y: f64,
    },
    #[error("invalid wage {wage} for {country}: wages must be finite and non-negative")]
    InvalidWage { country: String, wage: f64 },
    #[error("autarky rate is undefined at wage {wage} for {country}")]
    ZeroWage { country: String, wage: f64 },
}

/// Check that `value` lies in the open interval `(low, high)`.
pub(crate) fn open_interval(
    name: &'static str,
    value: f64,
    low: f64,
    high: f64,
    expected: &'static str,
) -> Result<(), ParameterError> {
    if value.is_finite() && value > low && value < high {
        Ok(())
    } else {
        Err(ParameterError::OutOfRange {
            name,
            value,
            expected,
        })
    }
}

/// Check that `value` is finite and inside `range`, whatever its end bounds.
pub(crate) fn in_range<R: RangeBounds<f64>>(
    name: &'static str,
    value: f64,
    range: R,
    expected: &'static str,
) -> Result<(), ParameterError> {
    if value.is_finite() && range.contains(&value) {
        Ok(())
    } else {
        Err(ParameterError::OutOfRange {
            name,
            value,
            expected,
        })
    }
}

/// Check that `value` is finite and strictly positive.
pub(crate) fn positive(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::OutOfRange {
            name,
            value,
            expected: "finite and > 0",
        })
    }
}

/// Check that a wage is usable as model state.
pub(crate) fn check_wage(country: &str, wage: f64) -> Result<f64, ParameterError> {
    if wage.is_finite() && wage >= 0.0 {
        Ok(wage)
    } else {
        Err(ParameterError::InvalidWage {
            country: country.to_string(),
            wage,
        })
    }
}

/// Compare one structural parameter across two economies.
pub(crate) fn same(parameter: &'static str, x: f64, y: f64) -> Result<(), ParameterError> {
    if x == y {
        Ok(())
    } else {
        Err(ParameterError::Mismatch { parameter, x, y })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_interval_bounds_are_exclusive() {
        assert!(open_interval("alpha", 0.5, 0.0, 1.0, "in (0, 1)").is_ok());
        assert!(open_interval("alpha", 0.0, 0.0, 1.0, "in (0, 1)").is_err());
        assert!(open_interval("alpha", 1.0, 0.0, 1.0, "in (0, 1)").is_err());
        assert!(open_interval("alpha", f64::NAN, 0.0, 1.0, "in (0, 1)").is_err());
    }

    #[test]
    fn test_in_range_honours_each_bound() {
        use std::ops::Bound::{Excluded, Included};

        assert!(in_range("q0", 0.0, 0.0..0.8, "in [0, q1)").is_ok());
        assert!(in_range("q0", -1e-17, 0.0..0.8, "in [0, q1)").is_err());
        assert!(in_range("q0", 0.8, 0.0..0.8, "in [0, q1)").is_err());

        let unit = (Excluded(0.0), Included(1.0));
        assert!(in_range("q1", 1.0, unit, "in (0, 1]").is_ok());
        assert!(in_range("q1", 1.0 + 1e-15, unit, "in (0, 1]").is_err());
        assert!(in_range("q1", 0.0, unit, "in (0, 1]").is_err());
        assert!(in_range("q1", f64::NAN, unit, "in (0, 1]").is_err());
    }

    #[test]
    fn test_check_wage() {
        assert_eq!(check_wage("X", 0.0), Ok(0.0));
        assert!(matches!(
            check_wage("X", -0.1),
            Err(ParameterError::InvalidWage { .. })
        ));
        assert!(check_wage("X", f64::INFINITY).is_err());
    }

    #[test]
    fn test_mismatch_message_names_parameter() {
        let err = same("alpha", 0.5, 0.6).unwrap_err();
        assert!(err.to_string().contains("alpha"));
    }
}
