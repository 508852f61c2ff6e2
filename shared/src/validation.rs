//! Input validation functions
//!
//! Applied once, after unit conversion, before any table lookup or LMS math.

use crate::errors::{GrowthError, GrowthResult, MeasurementField};

fn validate_finite(field: MeasurementField, value: f64) -> GrowthResult<()> {
    if value.is_nan() || value.is_infinite() {
        return Err(GrowthError::invalid(field, "must be a valid number"));
    }
    Ok(())
}

/// Validate age in years: finite and not negative
pub fn validate_age_years(age_years: f64) -> GrowthResult<()> {
    validate_finite(MeasurementField::Age, age_years)?;
    if age_years < 0.0 {
        return Err(GrowthError::invalid(MeasurementField::Age, "cannot be negative"));
    }
    Ok(())
}

/// Validate height in cm: finite and positive
pub fn validate_height_cm(height_cm: f64) -> GrowthResult<()> {
    validate_finite(MeasurementField::Height, height_cm)?;
    if height_cm <= 0.0 {
        return Err(GrowthError::invalid(
            MeasurementField::Height,
            "must be greater than 0",
        ));
    }
    Ok(())
}

/// Validate weight in kg: finite and positive
pub fn validate_weight_kg(weight_kg: f64) -> GrowthResult<()> {
    validate_finite(MeasurementField::Weight, weight_kg)?;
    if weight_kg <= 0.0 {
        return Err(GrowthError::invalid(
            MeasurementField::Weight,
            "must be greater than 0",
        ));
    }
    Ok(())
}

/// Parse a numeric form field, rejecting blanks and non-numbers
pub fn parse_number(field: MeasurementField, raw: &str) -> GrowthResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GrowthError::invalid(field, "is required"));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| GrowthError::invalid(field, "must be a number"))?;
    validate_finite(field, value)?;
    Ok(value)
}

/// Parse a numeric form field the way the legacy form did: anything that is
/// not a number becomes 0
pub fn coerce_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_validate_age_years() {
        assert!(validate_age_years(0.0).is_ok());
        assert!(validate_age_years(5.5).is_ok());
        assert!(validate_age_years(40.0).is_ok());
        assert!(validate_age_years(-0.1).is_err());
        assert!(validate_age_years(f64::NAN).is_err());
        assert!(validate_age_years(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_height_cm() {
        assert!(validate_height_cm(85.0).is_ok());
        assert!(validate_height_cm(0.1).is_ok());
        assert!(validate_height_cm(0.0).is_err());
        assert!(validate_height_cm(-10.0).is_err());
        assert!(validate_height_cm(f64::NAN).is_err());
        assert!(validate_height_cm(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_validate_weight_kg() {
        assert!(validate_weight_kg(12.0).is_ok());
        assert!(validate_weight_kg(0.0).is_err());
        assert!(validate_weight_kg(-3.0).is_err());
        assert!(validate_weight_kg(f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_carries_field() {
        let err = validate_weight_kg(0.0).unwrap_err();
        assert_eq!(err.field(), Some(MeasurementField::Weight));
        assert_eq!(err.user_message(), "Weight: must be greater than 0");
    }

    #[rstest]
    #[case("12", 12.0)]
    #[case(" 33.7 ", 33.7)]
    #[case("-2", -2.0)]
    #[case("1e1", 10.0)]
    fn test_parse_number_valid(#[case] raw: &str, #[case] expected: f64) {
        assert_eq!(parse_number(MeasurementField::Height, raw).unwrap(), expected);
    }

    #[rstest]
    #[case("", "is required")]
    #[case("   ", "is required")]
    #[case("abc", "must be a number")]
    #[case("12cm", "must be a number")]
    #[case("NaN", "must be a valid number")]
    #[case("inf", "must be a valid number")]
    fn test_parse_number_invalid(#[case] raw: &str, #[case] reason: &str) {
        let err = parse_number(MeasurementField::Age, raw).unwrap_err();
        assert_eq!(err, GrowthError::invalid(MeasurementField::Age, reason));
    }

    #[rstest]
    #[case("", 0.0)]
    #[case("abc", 0.0)]
    #[case("NaN", 0.0)]
    #[case(" 4 ", 4.0)]
    fn test_coerce_number(#[case] raw: &str, #[case] expected: f64) {
        assert_eq!(coerce_number(raw), expected);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_positive_sizes_valid(h in 0.001f64..300.0, w in 0.001f64..200.0) {
            prop_assert!(validate_height_cm(h).is_ok());
            prop_assert!(validate_weight_kg(w).is_ok());
        }

        #[test]
        fn prop_negative_age_invalid(age in -100.0f64..-0.0001) {
            prop_assert!(validate_age_years(age).is_err());
        }
    }
}
