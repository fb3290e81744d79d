//! Generation request and result models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Style;

/// A drafted blog post. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub title: String,
    /// Markdown body.
    pub content: String,
    pub hashtags: Vec<String>,
    pub meta_description: String,
}

/// Raw body of `POST /api/generate` before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequestBody {
    #[serde(default)]
    pub topic: Option<Value>,
    #[serde(default)]
    pub keywords: Option<Value>,
    #[serde(default)]
    pub style: Option<Value>,
}

/// Validated generation input.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GenerateParams {
    pub topic: String,
    pub keywords: Vec<String>,
    pub style: Style,
}

/// Message returned for any malformed generation request.
pub const INVALID_GENERATE_REQUEST: &str =
    "Invalid request. Check topic, keywords and style (tutorial|til|troubleshooting).";

impl GenerateRequestBody {
    /// Validate the body. The topic is trimmed and must be non-empty, the style
    /// must be a known value and non-string keywords are dropped.
    pub fn validate(self) -> Option<GenerateParams> {
        let topic = match self.topic {
            Some(Value::String(t)) => t.trim().to_string(),
            _ => String::new(),
        };
        if topic.is_empty() {
            return None;
        }

        let style = match self.style {
            Some(Value::String(s)) => s.parse::<Style>().ok()?,
            _ => return None,
        };

        let keywords = match self.keywords {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|k| match k {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };

        Some(GenerateParams {
            topic,
            keywords,
            style,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> GenerateRequestBody {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_validate_trims_topic() {
        let params = body(json!({ "topic": "  Rust lifetimes ", "style": "til" }))
            .validate()
            .unwrap();
        assert_eq!(params.topic, "Rust lifetimes");
        assert_eq!(params.style, Style::Til);
        assert!(params.keywords.is_empty());
    }

    #[test]
    fn test_validate_rejects_blank_topic() {
        assert!(body(json!({ "topic": "   ", "style": "til" }))
            .validate()
            .is_none());
        assert!(body(json!({ "topic": 42, "style": "til" })).validate().is_none());
    }

    #[test]
    fn test_validate_rejects_unknown_style() {
        assert!(body(json!({ "topic": "x", "style": "essay" }))
            .validate()
            .is_none());
        assert!(body(json!({ "topic": "x" })).validate().is_none());
    }

    #[test]
    fn test_validate_keeps_string_keywords_in_order() {
        let params = body(json!({
            "topic": "x",
            "style": "tutorial",
            "keywords": ["b", 1, "a", null, "b"]
        }))
        .validate()
        .unwrap();
        assert_eq!(params.keywords, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_generation_result_wire_shape() {
        let result = GenerationResult {
            title: "T".to_string(),
            content: "C".to_string(),
            hashtags: vec!["rust".to_string()],
            meta_description: "M".to_string(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["metaDescription"], "M");
        assert_eq!(value["hashtags"][0], "rust");
    }
}
