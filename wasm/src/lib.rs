//! Growth Calculator WASM Module
//!
//! WebAssembly bindings for the growth percentile calculator widget. The page
//! passes form values in and renders the JSON that comes back; errors are
//! thrown as a JSON string `{ "code", "message", "field"? }`.

use growth_calc_shared::{
    calculate_percentiles, chart_percentile_z, reference_curve_points, BiologicalSex, CurvePoint,
    GrowthError, GrowthMetric, Measurement, ParseMode, PercentileBand, PercentileResult,
    RawMeasurement,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Calculator output rendered by the widget
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetResult {
    #[serde(flatten)]
    pub result: PercentileResult,
    pub height_label: &'static str,
    pub weight_label: &'static str,
}

impl From<PercentileResult> for WidgetResult {
    fn from(result: PercentileResult) -> Self {
        Self {
            height_label: result.height_band().description(),
            weight_label: result.weight_band().description(),
            result,
        }
    }
}

/// Error payload thrown back to JavaScript
#[derive(Debug, Serialize, PartialEq)]
pub struct WidgetError {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl From<GrowthError> for WidgetError {
    fn from(err: GrowthError) -> Self {
        let code = match err {
            GrowthError::InvalidMeasurement { .. } => "INVALID_MEASUREMENT",
            GrowthError::UnknownValue { .. } => "UNKNOWN_VALUE",
        };
        Self {
            code,
            message: err.user_message(),
            field: err.field().map(|f| f.name()),
        }
    }
}

impl WidgetError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST",
            message: message.into(),
            field: None,
        }
    }

    fn into_js(self) -> JsValue {
        let json = serde_json::to_string(&self)
            .unwrap_or_else(|_| format!("{{\"code\":\"{}\"}}", self.code));
        JsValue::from_str(&json)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, WidgetError> {
    serde_json::to_string(value).map_err(|e| WidgetError::bad_request(e.to_string()))
}

/// Calculate percentiles from a JSON-encoded `Measurement`
pub fn percentiles_from_json(measurement_json: &str) -> Result<String, WidgetError> {
    let measurement: Measurement = serde_json::from_str(measurement_json)
        .map_err(|e| WidgetError::bad_request(format!("Malformed measurement: {}", e)))?;
    let result = calculate_percentiles(&measurement)?;
    to_json(&WidgetResult::from(result))
}

/// Calculate percentiles from raw form field strings
pub fn percentiles_from_form(form: &RawMeasurement, lenient: bool) -> Result<String, WidgetError> {
    let mode = if lenient {
        ParseMode::Lenient
    } else {
        ParseMode::Strict
    };
    let measurement = form.parse(mode)?;
    let result = calculate_percentiles(&measurement)?;
    to_json(&WidgetResult::from(result))
}

/// Reference curve for one of the standard chart percentiles
pub fn curve_json(metric: &str, sex: &str, percentile: u8) -> Result<String, WidgetError> {
    let metric: GrowthMetric = metric.parse()?;
    let sex: BiologicalSex = sex.parse()?;
    let z = chart_percentile_z(percentile).ok_or_else(|| {
        WidgetError::bad_request(format!("No chart line for percentile {}", percentile))
    })?;
    let points: Vec<CurvePoint> = reference_curve_points(metric, sex, z);
    to_json(&points)
}

#[wasm_bindgen]
pub fn calculate_growth_percentiles(measurement_json: &str) -> Result<String, JsValue> {
    percentiles_from_json(measurement_json).map_err(WidgetError::into_js)
}

#[wasm_bindgen]
pub fn calculate_growth_percentiles_from_form(
    age_value: &str,
    age_unit: &str,
    sex: &str,
    height: &str,
    weight: &str,
    units: &str,
    lenient: bool,
) -> Result<String, JsValue> {
    let form = RawMeasurement {
        age_value: age_value.to_string(),
        age_unit: age_unit.to_string(),
        sex: sex.to_string(),
        height: height.to_string(),
        weight: weight.to_string(),
        units: units.to_string(),
    };
    percentiles_from_form(&form, lenient).map_err(WidgetError::into_js)
}

/// Interpretive label for a percentile, e.g. "Below average"
#[wasm_bindgen]
pub fn percentile_label(percentile: u8) -> String {
    PercentileBand::classify(percentile).description().to_string()
}

#[wasm_bindgen]
pub fn reference_curve(metric: &str, sex: &str, percentile: u8) -> Result<String, JsValue> {
    curve_json(metric, sex, percentile).map_err(WidgetError::into_js)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn form(age: &str, unit: &str, sex: &str, height: &str, weight: &str, units: &str) -> RawMeasurement {
        RawMeasurement {
            age_value: age.to_string(),
            age_unit: unit.to_string(),
            sex: sex.to_string(),
            height: height.to_string(),
            weight: weight.to_string(),
            units: units.to_string(),
        }
    }

    #[test]
    fn test_json_measurement() {
        let json = r#"{"ageValue":5,"ageUnit":"years","sex":"male","height":109.9,"weight":18.4,"units":"metric"}"#;
        let out: Value = serde_json::from_str(&percentiles_from_json(json).unwrap()).unwrap();
        assert_eq!(out["heightPercentile"], 50);
        assert_eq!(out["weightPercentile"], 50);
        assert_eq!(out["referenceAge"], 5.0);
        assert_eq!(out["heightLabel"], "Average");
    }

    #[test]
    fn test_malformed_json() {
        let err = percentiles_from_json("{not json").unwrap_err();
        assert_eq!(err.code, "BAD_REQUEST");
    }

    #[test]
    fn test_form_imperial_months() {
        let raw = form("24", "months", "female", "33.7", "25", "imperial");
        let out: Value = serde_json::from_str(&percentiles_from_form(&raw, false).unwrap()).unwrap();
        assert_eq!(out["referenceAge"], 2.0);
        assert_eq!(out["heightPercentile"], 49);
    }

    #[test]
    fn test_form_strict_rejects_blank_age() {
        let raw = form("", "years", "male", "100", "15", "metric");
        let err = percentiles_from_form(&raw, false).unwrap_err();
        assert_eq!(err.code, "INVALID_MEASUREMENT");
        assert_eq!(err.field, Some("age"));
        assert_eq!(err.message, "Child's Age: is required");
    }

    #[test]
    fn test_form_lenient_blank_age_uses_youngest_band() {
        let raw = form("", "years", "male", "60", "6", "metric");
        let out: Value = serde_json::from_str(&percentiles_from_form(&raw, true).unwrap()).unwrap();
        assert_eq!(out["referenceAge"], 0.25);
    }

    #[test]
    fn test_form_lenient_still_rejects_zero_height() {
        let raw = form("3", "years", "male", "", "14", "metric");
        let err = percentiles_from_form(&raw, true).unwrap_err();
        assert_eq!(err.field, Some("height"));
    }

    #[test]
    fn test_unknown_sex() {
        let raw = form("3", "years", "other", "95", "14", "metric");
        let err = percentiles_from_form(&raw, false).unwrap_err();
        assert_eq!(err.code, "UNKNOWN_VALUE");
        assert_eq!(err.field, None);
    }

    #[test]
    fn test_percentile_label() {
        assert_eq!(percentile_label(10), "Below average");
        assert_eq!(percentile_label(50), "Average");
        assert_eq!(percentile_label(95), "Above average");
    }

    #[test]
    fn test_curve_json() {
        let out: Value = serde_json::from_str(&curve_json("height", "female", 50).unwrap()).unwrap();
        let points = out.as_array().unwrap();
        assert_eq!(points.len(), 14);
        assert_eq!(points[0]["ageYears"], 0.25);

        assert!(curve_json("height", "female", 42).is_err());
        assert!(curve_json("bmi", "female", 50).is_err());
    }
}
