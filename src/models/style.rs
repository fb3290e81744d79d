//! Writing style of a generated post.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Post style. Unknown values are rejected, never defaulted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Tutorial,
    Til,
    Troubleshooting,
}

impl Style {
    pub const ALL: [Style; 3] = [Style::Tutorial, Style::Til, Style::Troubleshooting];

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Tutorial => "tutorial",
            Style::Til => "til",
            Style::Troubleshooting => "troubleshooting",
        }
    }

    /// Human-readable label used in prompts and listings.
    pub fn label(&self) -> &'static str {
        match self {
            Style::Tutorial => "Tutorial",
            Style::Til => "TIL",
            Style::Troubleshooting => "Troubleshooting",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the known styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStyle(pub String);

impl fmt::Display for UnknownStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown style '{}' (expected tutorial, til or troubleshooting)",
            self.0
        )
    }
}

impl std::error::Error for UnknownStyle {}

impl FromStr for Style {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tutorial" => Ok(Style::Tutorial),
            "til" => Ok(Style::Til),
            "troubleshooting" => Ok(Style::Troubleshooting),
            other => Err(UnknownStyle(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_parse_known_values() {
        for style in Style::ALL {
            assert_eq!(style.as_str().parse::<Style>().unwrap(), style);
        }
    }

    #[test]
    fn test_style_parse_is_case_sensitive() {
        assert!("Tutorial".parse::<Style>().is_err());
        assert!("".parse::<Style>().is_err());
        assert!("blog".parse::<Style>().is_err());
    }

    #[test]
    fn test_style_serde_uses_lowercase() {
        let json = serde_json::to_string(&Style::Troubleshooting).unwrap();
        assert_eq!(json, "\"troubleshooting\"");
        assert!(serde_json::from_str::<Style>("\"TIL\"").is_err());
    }
}
