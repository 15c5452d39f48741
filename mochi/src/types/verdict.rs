use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{Display, EnumString, IntoStaticStr};

use crate::types::constant::FALLBACK_EXPLANATION;

/// The contract's classification of a claim.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(from = "String", into = "&'static str")]
pub enum Verdict {
    True,
    False,
    Partial,
    #[default]
    Unknown,
}

impl From<String> for Verdict {
    fn from(value: String) -> Self {
        Verdict::from_str(value.trim()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictResult {
    pub verdict: Verdict,
    /// Percentage, always within `0..=100`.
    pub confidence: u8,
    pub explanation: String,
}

impl VerdictResult {
    pub fn new(verdict: Verdict, confidence: u8, explanation: impl Into<String>) -> Self {
        Self { verdict, confidence: confidence.min(100), explanation: explanation.into() }
    }

    /// Shown when the contract answered with something that is valid JSON but not a verdict.
    pub fn fallback() -> Self {
        Self::new(Verdict::Unknown, 0, FALLBACK_EXPLANATION)
    }

    /// Builds a verdict out of the contract's JSON object, defaulting whatever is missing.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let verdict = match object.get("verdict") {
            Some(Value::String(s)) => Verdict::from(s.clone()),
            Some(Value::Bool(true)) => Verdict::True,
            Some(Value::Bool(false)) => Verdict::False,
            _ => Verdict::Unknown,
        };
        let confidence = object.get("confidence").map(confidence_from_value).unwrap_or(0);
        let explanation = match object.get("explanation") {
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        };
        Self { verdict, confidence, explanation }
    }
}

fn confidence_from_value(value: &Value) -> u8 {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').parse::<f64>().ok(),
        _ => None,
    };
    raw.map(|c| c.round().clamp(0.0, 100.0) as u8).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[rstest]
    #[case("true", Verdict::True)]
    #[case("FALSE", Verdict::False)]
    #[case("partial", Verdict::Partial)]
    #[case("unknown", Verdict::Unknown)]
    #[case("maybe", Verdict::Unknown)]
    #[case("", Verdict::Unknown)]
    fn verdict_strings(#[case] raw: &str, #[case] expected: Verdict) {
        assert_eq!(Verdict::from(raw.to_string()), expected);
    }

    #[rstest]
    #[case(json!(92), 92)]
    #[case(json!(92.6), 93)]
    #[case(json!(150), 100)]
    #[case(json!(-5), 0)]
    #[case(json!("80"), 80)]
    #[case(json!("75%"), 75)]
    #[case(json!(null), 0)]
    fn confidence_is_clamped(#[case] raw: Value, #[case] expected: u8) {
        let result = VerdictResult::from_object(&object(json!({ "confidence": raw })));
        assert_eq!(result.confidence, expected);
    }

    #[test]
    fn missing_fields_default() {
        let result = VerdictResult::from_object(&Map::new());
        assert_eq!(result, VerdictResult::new(Verdict::Unknown, 0, ""));
    }

    #[test]
    fn serialises_with_lowercase_verdict() {
        let result = VerdictResult::new(Verdict::Partial, 40, "Mostly");
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "verdict": "partial", "confidence": 40, "explanation": "Mostly" })
        );
    }

    #[test]
    fn unknown_verdicts_deserialise_to_unknown() {
        let result: VerdictResult =
            serde_json::from_value(json!({ "verdict": "sure", "confidence": 1, "explanation": "" })).unwrap();
        assert_eq!(result.verdict, Verdict::Unknown);
    }
}
