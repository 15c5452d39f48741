use serde_json::Value;
use tracing::warn;

use crate::types::VerdictResult;
use crate::{FactCheckError, FactCheckResult};

/// Decodes the readable payload of a leader receipt into a verdict.
///
/// The contract returns a JSON document which the node serialises once more as a JSON string,
/// so the payload is unwrapped by stripping one pair of surrounding quotes, turning every `\"`
/// back into `"` and parsing the result. Text that is not JSON after that is
/// [`FactCheckError::MalformedPayload`]. Valid JSON that is not a verdict object degrades to
/// [`VerdictResult::fallback`] so there is always something to show.
pub fn decode_verdict_payload(raw: &str) -> FactCheckResult<VerdictResult> {
    let unescaped = strip_surrounding_quotes(raw).replace("\\\"", "\"");
    let document: Value =
        serde_json::from_str(&unescaped).map_err(|e| FactCheckError::MalformedPayload(e.to_string()))?;

    Ok(match document {
        Value::Object(object) => VerdictResult::from_object(&object),
        // Some contract versions return the verdict document as a plain JSON string
        Value::String(inner) => match serde_json::from_str::<Value>(&inner) {
            Ok(Value::Object(object)) => VerdictResult::from_object(&object),
            _ => fallback(&unescaped),
        },
        _ => fallback(&unescaped),
    })
}

fn strip_surrounding_quotes(raw: &str) -> &str {
    raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')).unwrap_or(raw)
}

fn fallback(document: &str) -> VerdictResult {
    warn!(category = "decode_payload", document = %document, "Contract result is not a verdict, using fallback.");
    VerdictResult::fallback()
}
