//! Extraction of the structured result from raw model text.

use serde_json::{Map, Value};

use super::GenerationError;
use crate::models::GenerationResult;

/// Return the first balanced top-level `{...}` object in `text`.
///
/// Braces inside JSON string literals are ignored, as are escaped quotes.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse raw model output into a [`GenerationResult`].
///
/// Missing string fields become empty strings and missing or malformed
/// `hashtags` become an empty list.
pub fn parse_generation_output(raw: &str) -> Result<GenerationResult, GenerationError> {
    let json = extract_json_object(raw).ok_or_else(|| {
        GenerationError::Parse("no JSON object found in model output".to_string())
    })?;

    let value: Value = serde_json::from_str(json).map_err(|e| {
        tracing::warn!(
            json_error = %e,
            preview = %json.chars().take(200).collect::<String>(),
            "Model output is not valid JSON"
        );
        GenerationError::Parse(e.to_string())
    })?;

    let Value::Object(fields) = value else {
        return Err(GenerationError::Parse("model output is not an object".to_string()));
    };

    Ok(GenerationResult {
        title: string_field(&fields, "title"),
        content: string_field(&fields, "content"),
        hashtags: match fields.get("hashtags") {
            Some(Value::Array(tags)) => tags
                .iter()
                .filter_map(|t| t.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        },
        meta_description: string_field(&fields, "metaDescription"),
    })
}

fn string_field(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_payload_with_noise() {
        let raw = r#"noise {"title":"T","content":"C","hashtags":[],"metaDescription":""} trailing"#;
        let result = parse_generation_output(raw).unwrap();
        assert_eq!(
            result,
            GenerationResult {
                title: "T".to_string(),
                content: "C".to_string(),
                hashtags: vec![],
                meta_description: String::new(),
            }
        );
    }

    #[test]
    fn test_parse_without_object_is_parse_error() {
        let err = parse_generation_output("I could not write that post.").unwrap_err();
        assert!(matches!(err, GenerationError::Parse(_)));
    }

    #[test]
    fn test_parse_invalid_json_is_parse_error() {
        let err = parse_generation_output("{title: T}").unwrap_err();
        assert!(matches!(err, GenerationError::Parse(_)));
    }

    #[test]
    fn test_missing_fields_default() {
        let result = parse_generation_output(r#"{"title":"Only title","hashtags":null}"#).unwrap();
        assert_eq!(result.title, "Only title");
        assert_eq!(result.content, "");
        assert!(result.hashtags.is_empty());
        assert_eq!(result.meta_description, "");
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let raw = "```json\n{\"title\":\"a } b\",\"content\":\"fn main() { println!(\\\"{}\\\", 1); }\",\"hashtags\":[\"rust\",3],\"metaDescription\":\"m\"}\n``` {\"title\":\"second\"}";
        let result = parse_generation_output(raw).unwrap();
        assert_eq!(result.title, "a } b");
        assert_eq!(result.content, "fn main() { println!(\"{}\", 1); }");
        assert_eq!(result.hashtags, vec!["rust"]);
    }

    #[test]
    fn test_extract_unbalanced_object() {
        assert_eq!(extract_json_object("{\"title\": \"cut off"), None);
        assert_eq!(extract_json_object("x {} y"), Some("{}"));
    }
}
