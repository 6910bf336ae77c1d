// src/types/response.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ===== Service Response Types =====

/// Envelope returned by `POST /enhance-resume`.
///
/// Only `enhanced_content` is expected in practice; every key is optional and
/// unknown keys are ignored so a drifting backend never breaks decoding.
/// The extras are decoded leniently: a list keeps its text and scalar items,
/// and a value of the wrong type counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnhancementResult {
    #[serde(default)]
    pub enhanced_content: Option<Value>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub matching_keywords: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub recommendations: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub latex_code: Option<String>,
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(items.into_iter().filter_map(scalar_text).collect()),
        _ => None,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        _ => None,
    })
}

impl EnhancementResult {
    /// Keywords worth showing (present and non-empty)
    pub fn keywords(&self) -> Option<&[String]> {
        self.matching_keywords
            .as_deref()
            .filter(|keywords| !keywords.is_empty())
    }

    pub fn recommendations(&self) -> Option<&[String]> {
        self.recommendations
            .as_deref()
            .filter(|recs| !recs.is_empty())
    }

    /// LaTeX source, if the service produced any
    pub fn latex(&self) -> Option<&str> {
        self.latex_code.as_deref().filter(|code| !code.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_envelope() {
        let body = r#"{
            "enhanced_content": {"Skills": {"Languages": "Go, Rust"}},
            "matching_keywords": ["rust", "tokio"],
            "recommendations": ["Quantify impact"],
            "latex_code": "\\documentclass{article}",
            "model": "ignored"
        }"#;

        let result: EnhancementResult = serde_json::from_str(body).unwrap();
        assert!(result.enhanced_content.is_some());
        assert_eq!(result.keywords().unwrap(), ["rust", "tokio"]);
        assert_eq!(result.recommendations().unwrap().len(), 1);
        assert_eq!(result.latex(), Some("\\documentclass{article}"));
    }

    #[test]
    fn test_decode_minimal_envelope() {
        let result: EnhancementResult = serde_json::from_str("{}").unwrap();
        assert_eq!(result, EnhancementResult::default());
        assert!(result.keywords().is_none());
        assert!(result.latex().is_none());
    }

    #[test]
    fn test_empty_collections_are_hidden() {
        let result: EnhancementResult = serde_json::from_str(
            r#"{"enhanced_content": "text", "matching_keywords": [], "recommendations": [], "latex_code": ""}"#,
        )
        .unwrap();
        assert!(result.keywords().is_none());
        assert!(result.recommendations().is_none());
        assert!(result.latex().is_none());
    }

    #[test]
    fn test_loosely_typed_extras_do_not_break_decoding() {
        let body = r#"{
            "enhanced_content": {"Skills": {"Languages": "Go"}},
            "matching_keywords": "rust, tokio",
            "recommendations": [{"area": "Summary", "tip": "Quantify impact"}, "Add metrics", 3],
            "latex_code": {"body": "\\section{}"}
        }"#;

        let result: EnhancementResult = serde_json::from_str(body).unwrap();
        assert!(result.enhanced_content.is_some());
        assert!(result.keywords().is_none());
        assert_eq!(result.recommendations().unwrap(), ["Add metrics", "3"]);
        assert!(result.latex().is_none());
    }

    #[test]
    fn test_null_extras_are_absent() {
        let result: EnhancementResult = serde_json::from_str(
            r#"{"matching_keywords": null, "recommendations": null, "latex_code": null}"#,
        )
        .unwrap();
        assert_eq!(result, EnhancementResult::default());
    }
}
