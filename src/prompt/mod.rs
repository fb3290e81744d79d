//! Prompt composition for blog generation.
//!
//! Maps `(topic, keywords, style)` to a fixed system/user prompt pair. Pure: the
//! same input always yields the same strings.

use crate::models::Style;

/// Per-style template: ordered section headings plus a one-line description.
struct StyleTemplate {
    structure: &'static [&'static str],
    description: &'static str,
}

const TUTORIAL: StyleTemplate = StyleTemplate {
    structure: &[
        "1. Concept overview",
        "2. Why use it",
        "3. Prerequisites",
        "4. Step-by-step guide",
        "5. Code sample",
        "6. Wrap-up",
    ],
    description: "Write it as a tutorial and follow the structure above in order.",
};

const TIL: StyleTemplate = StyleTemplate {
    structure: &[
        "1. What I studied",
        "2. What I learned",
        "3. Example snippet",
        "4. Takeaways",
        "5. Next steps for study",
    ],
    description: "Write it as a TIL (Today I Learned) note and follow the structure above in order.",
};

const TROUBLESHOOTING: StyleTemplate = StyleTemplate {
    structure: &[
        "1. Problem description",
        "2. Root cause analysis",
        "3. Resolution process",
        "4. Conclusion",
    ],
    description: "Write it as a troubleshooting report and follow the structure above in order.",
};

const ROLE_FRAMING: &str = "You are an expert technical blog writer.";
const CODE_BLOCK_HINT: &str = "Include fenced code blocks where appropriate.";

const JSON_OUTPUT_INSTRUCTION: &str = r#"
Respond only with JSON in exactly the following shape. Do not include any other text.
{
  "title": "Post title",
  "content": "The full body in Markdown",
  "hashtags": ["hashtag1", "hashtag2", "hashtag3"],
  "metaDescription": "SEO meta description (150 characters or fewer)"
}"#;

const CLOSING_INSTRUCTION: &str =
    "Write a blog post that meets the conditions above and respond in the JSON format.";

fn template(style: Style) -> &'static StyleTemplate {
    match style {
        Style::Tutorial => &TUTORIAL,
        Style::Til => &TIL,
        Style::Troubleshooting => &TROUBLESHOOTING,
    }
}

/// Ordered section headings required for a style.
pub fn section_headings(style: Style) -> &'static [&'static str] {
    template(style).structure
}

/// System and user messages sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Build the prompt pair for a generation request.
pub fn compose(topic: &str, keywords: &[String], style: Style) -> PromptPair {
    let template = template(style);

    let mut system_lines: Vec<String> = vec![
        ROLE_FRAMING.to_string(),
        String::new(),
        format!("## {} format", style.label()),
        "Structure:".to_string(),
    ];
    system_lines.extend(template.structure.iter().map(|s| s.to_string()));
    system_lines.push(String::new());
    system_lines.push(template.description.to_string());
    system_lines.push(CODE_BLOCK_HINT.to_string());
    system_lines.push(JSON_OUTPUT_INSTRUCTION.to_string());

    let mut user_lines = vec![format!("Topic: {}", topic)];
    if !keywords.is_empty() {
        user_lines.push(format!(
            "Include the following keywords: {}.",
            keywords.join(", ")
        ));
    }
    user_lines.push(CLOSING_INSTRUCTION.to_string());

    PromptPair {
        system: system_lines.join("\n"),
        user: user_lines.join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_number(heading: &str) -> &str {
        heading.split_once(". ").map(|(_, rest)| rest).unwrap_or(heading)
    }

    #[test]
    fn test_system_prompt_lists_headings_in_order() {
        for style in Style::ALL {
            let prompt = compose("Ownership", &[], style);
            let expected = section_headings(style).join("\n");
            assert!(
                prompt.system.contains(&expected),
                "{style} headings missing or out of order"
            );
        }
    }

    #[test]
    fn test_system_prompt_excludes_other_styles() {
        for style in Style::ALL {
            let prompt = compose("Ownership", &[], style);
            for other in Style::ALL.into_iter().filter(|o| *o != style) {
                for heading in section_headings(other) {
                    assert!(
                        !prompt.system.contains(strip_number(heading)),
                        "{style} prompt leaked '{heading}' from {other}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_system_prompt_layout() {
        let prompt = compose("Ownership", &[], Style::Troubleshooting);
        let expected_head = "You are an expert technical blog writer.\n\n## Troubleshooting format\nStructure:\n1. Problem description";
        assert!(prompt.system.starts_with(expected_head));
        assert!(prompt.system.contains("\"metaDescription\""));
        assert!(prompt.system.contains("Do not include any other text."));
    }

    #[test]
    fn test_user_prompt_without_keywords() {
        let prompt = compose("Async Rust", &[], Style::Til);
        assert_eq!(
            prompt.user,
            "Topic: Async Rust\nWrite a blog post that meets the conditions above and respond in the JSON format."
        );
        assert!(!prompt.user.contains("Include the following keywords"));
    }

    #[test]
    fn test_user_prompt_lists_keywords_in_order() {
        let keywords = vec![
            "tokio".to_string(),
            "select".to_string(),
            "tokio".to_string(),
        ];
        let prompt = compose("Async Rust", &keywords, Style::Tutorial);
        let lines: Vec<&str> = prompt.user.lines().collect();
        assert_eq!(lines[0], "Topic: Async Rust");
        assert_eq!(
            lines[1],
            "Include the following keywords: tokio, select, tokio."
        );
        assert_eq!(lines.len(), 3);
    }
}
