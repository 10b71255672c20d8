//! Documentation comment annotation.
//!
//! A documentation comment is read as a title paragraph followed by `@key value`
//! lines:
//!
//! ```text
//! /**
//!  * Engine RPM
//!  *
//!  * Longer description that is not part of the title.
//!  *
//!  * @change_mode VehiclePropertyChangeMode.CONTINUOUS
//!  * @unit VehicleUnit.RPM
//!  */
//! ```
//!
//! yields the title `Engine RPM` and the annotations
//! `change_mode = VehiclePropertyChangeMode:CONTINUOUS`, `unit = VehicleUnit:RPM`.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::base::constants::DATA_ENUM_ANNOTATION;

static ANNOTATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@(\w+)\s+([\w:.]+)").expect("valid annotation pattern"));

/// Title and annotations parsed from one documentation comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentAnnotations {
    /// First paragraph of free text, lines joined by single spaces.
    pub title: Option<String>,
    /// `@key value` pairs in source order; dots in values become colons.
    pub annotations: IndexMap<String, String>,
    /// Every `@data_enum` value, including repeats.
    pub data_enums: Vec<String>,
}

impl CommentAnnotations {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.annotations.is_empty()
    }
}

/// Parse a documentation comment. Never fails; a comment with neither a title
/// nor annotations gives an empty result.
pub fn annotate(comment_text: &str) -> CommentAnnotations {
    let lines: Vec<&str> = strip_delimiters(comment_text)
        .lines()
        .map(strip_margin)
        .collect();

    let mut result = CommentAnnotations {
        title: title(&lines),
        ..Default::default()
    };

    for line in &lines {
        let Some(captures) = ANNOTATION_RE.captures(line) else {
            continue;
        };
        let key = captures[1].to_string();
        let value = captures[2].replace('.', ":");
        if key == DATA_ENUM_ANNOTATION {
            result.data_enums.push(value.clone());
        }
        result.annotations.insert(key, value);
    }

    result
}

/// Remove the `/**` opener and `*/` closer, if present.
fn strip_delimiters(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("/**")
        .or_else(|| text.strip_prefix("/*"))
        .unwrap_or(text);
    text.strip_suffix("*/").unwrap_or(text)
}

/// Remove the asterisk left margin and surrounding whitespace of one line.
fn strip_margin(line: &str) -> &str {
    line.trim_start().trim_start_matches('*').trim()
}

/// Leading run of non-blank, non-annotation lines, after any blank lines.
fn title(lines: &[&str]) -> Option<String> {
    let paragraph: Vec<&str> = lines
        .iter()
        .skip_while(|line| line.is_empty())
        .take_while(|line| !line.is_empty() && !line.starts_with('@'))
        .copied()
        .collect();

    if paragraph.is_empty() {
        None
    } else {
        Some(paragraph.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_unit() {
        let result = annotate("Engine RPM\n@unit RPM\n");
        assert_eq!(result.title.as_deref(), Some("Engine RPM"));
        assert_eq!(result.annotations.get("unit").map(String::as_str), Some("RPM"));
        assert_eq!(result.annotations.len(), 1);
    }

    #[test]
    fn test_decorated_block_comment() {
        let result = annotate(
            "/**\n     * Engine RPM\n     *\n     * Current engine speed.\n     *\n     \
             * @change_mode VehiclePropertyChangeMode.CONTINUOUS\n     \
             * @access VehiclePropertyAccess.READ\n     * @unit VehicleUnit.RPM\n     */",
        );

        assert_eq!(result.title.as_deref(), Some("Engine RPM"));
        let pairs: Vec<(&str, &str)> = result
            .annotations
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("change_mode", "VehiclePropertyChangeMode:CONTINUOUS"),
                ("access", "VehiclePropertyAccess:READ"),
                ("unit", "VehicleUnit:RPM"),
            ]
        );
    }

    #[test]
    fn test_single_line_comment() {
        let result = annotate("/** Undefined property. */");
        assert_eq!(result.title.as_deref(), Some("Undefined property."));
        assert!(result.annotations.is_empty());
    }

    #[test]
    fn test_multi_line_title_is_joined() {
        let result = annotate(
            "/**\n * Fuel level\n * in milliliters\n *\n * @unit VehicleUnit.MILLILITER\n */",
        );
        assert_eq!(result.title.as_deref(), Some("Fuel level in milliliters"));
    }

    #[test]
    fn test_annotations_only() {
        let result = annotate("/**\n * @access VehiclePropertyAccess.READ\n */");
        assert_eq!(result.title, None);
        assert_eq!(result.annotations.len(), 1);
    }

    #[test]
    fn test_data_enums_collected_in_order() {
        let result = annotate(
            "/**\n * Gear selection\n *\n \
             * @data_enum VehicleGear\n * @data_enum VehicleGearAlt\n */",
        );
        assert_eq!(result.data_enums, vec!["VehicleGear", "VehicleGearAlt"]);
        assert_eq!(
            result.annotations.get("data_enum").map(String::as_str),
            Some("VehicleGearAlt")
        );
    }

    #[test]
    fn test_empty_comment() {
        assert!(annotate("/** */").is_empty());
        assert!(annotate("/**\n *\n */").is_empty());
        assert!(annotate("").is_empty());
    }

    #[test]
    fn test_annotation_without_value_is_ignored() {
        let result = annotate("/**\n * Hidden\n * @hide\n */");
        assert_eq!(result.title.as_deref(), Some("Hidden"));
        assert!(result.annotations.is_empty());
    }
}
