use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The structured answer of a verification service.
///
/// Fields are carried over from the service verbatim, whatever JSON they
/// hold. A field the service left out (or sent as `null`) stays `None`,
/// nothing is substituted for it, and fields this type doesn't know about
/// are ignored.
///
/// Use the `display_*` accessors to render a field as text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// The label, e.g. `"Likely False"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Value>,
    /// How sure the service is, e.g. `"82%"` or `0.82`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Value>,
    /// The reasoning behind the label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Value>,
}

impl Verdict {
    /// Creates a verdict with all three fields present.
    pub fn new<V, C, E>(verdict: V, confidence: C, explanation: E) -> Self
    where
        V: Into<Value>,
        C: Into<Value>,
        E: Into<Value>,
    {
        Self {
            verdict: Some(verdict.into()),
            confidence: Some(confidence.into()),
            explanation: Some(explanation.into()),
        }
    }

    /// Returns the label as text.
    #[inline]
    pub fn display_verdict(&self) -> Option<Cow<'_, str>> {
        self.verdict.as_ref().map(display_value)
    }

    /// Returns the confidence as text.
    #[inline]
    pub fn display_confidence(&self) -> Option<Cow<'_, str>> {
        self.confidence.as_ref().map(display_value)
    }

    /// Returns the explanation as text.
    #[inline]
    pub fn display_explanation(&self) -> Option<Cow<'_, str>> {
        self.explanation.as_ref().map(display_value)
    }
}

/// Strings are shown without quotes, anything else as compact JSON. Numbers
/// keep the representation they arrived in, so `82` and `0.82` are never
/// converted into each other.
fn display_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(text) => Cow::Borrowed(text.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_extra_fields_are_ignored() {
        let verdict: Verdict = serde_json::from_value(json!({
            "verdict": "False",
            "confidence": 0.91,
            "explanation": "The event never happened.",
            "input_text": "The moon landing was in 1972",
            "timestamp": "2025-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(verdict.display_verdict().as_deref(), Some("False"));
        assert_eq!(
            verdict.display_explanation().as_deref(),
            Some("The event never happened.")
        );
        assert_eq!(verdict.display_confidence().as_deref(), Some("0.91"));
    }

    #[test]
    fn test_missing_fields_stay_missing() {
        let verdict: Verdict =
            serde_json::from_value(json!({ "verdict": "True" })).unwrap();
        assert_eq!(verdict.verdict, Some(json!("True")));
        assert_eq!(verdict.confidence, None);
        assert_eq!(verdict.explanation, None);

        // And they are not invented on the way back out either.
        let value = serde_json::to_value(&verdict).unwrap();
        assert_eq!(value, json!({ "verdict": "True" }));
    }

    #[test]
    fn test_any_field_type_passes_through() {
        let raw = json!({
            "verdict": 5,
            "confidence": true,
            "explanation": ["a", { "b": 1 }],
        });
        let verdict: Verdict = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(verdict.verdict, Some(json!(5)));
        assert_eq!(verdict.confidence, Some(json!(true)));
        assert_eq!(serde_json::to_value(&verdict).unwrap(), raw);

        assert_eq!(verdict.display_verdict().as_deref(), Some("5"));
        assert_eq!(verdict.display_confidence().as_deref(), Some("true"));
        assert_eq!(
            verdict.display_explanation().as_deref(),
            Some(r#"["a",{"b":1}]"#)
        );
    }

    #[test]
    fn test_number_representation_is_kept() {
        let verdict: Verdict =
            serde_json::from_value(json!({ "confidence": 82 })).unwrap();
        assert_eq!(verdict.display_confidence().as_deref(), Some("82"));
    }
}
