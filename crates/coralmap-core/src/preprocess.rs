use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use crate::model::{MindmapDocument, normalize};
use crate::{Error, Result};

fn trailing_comma_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",\s*([}\]])").expect("trailing-comma regex is valid"))
}

/// Strips commas that appear directly before a closing `}` or `]`.
///
/// This is a purely textual pass and is only applied after a parse already
/// failed, so a comma inside a string literal can only be touched on input
/// that was unparseable to begin with.
pub fn repair_trailing_commas(text: &str) -> Cow<'_, str> {
    trailing_comma_re().replace_all(text, "$1")
}

/// Parses raw text into a validated [`MindmapDocument`].
///
/// On a JSON syntax error, one trailing-comma repair pass is attempted and
/// the text re-parsed once; a second failure is surfaced as the original
/// [`Error::Json`]. Schema validation always runs on the parsed value.
pub fn parse_document(text: &str) -> Result<MindmapDocument> {
    let value = match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => value,
        Err(first_err) => {
            let repaired = repair_trailing_commas(text);
            if matches!(repaired, Cow::Borrowed(_)) {
                return Err(Error::Json(first_err));
            }
            tracing::debug!(
                error = %first_err,
                "retrying mindmap JSON parse after trailing-comma repair"
            );
            serde_json::from_str::<serde_json::Value>(&repaired).map_err(|_| first_err)?
        }
    };
    normalize(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clean_document() {
        let doc = parse_document(r#"{"Mindmap": {"text": "A"}}"#).unwrap();
        assert_eq!(doc.root.text.as_deref(), Some("A"));
    }

    #[test]
    fn repairs_trailing_comma_before_brace() {
        let repaired = parse_document(r#"{"Mindmap": {"text": "A",}}"#).unwrap();
        let clean = parse_document(r#"{"Mindmap": {"text": "A"}}"#).unwrap();
        assert_eq!(repaired, clean);
    }

    #[test]
    fn repairs_trailing_comma_before_bracket() {
        let repaired = parse_document(
            r#"{"Mindmap": {"text": "A", "children": [{"text": "B"},]}}"#,
        )
        .unwrap();
        assert_eq!(repaired.root.children.len(), 1);
    }

    #[test]
    fn unrepairable_text_is_a_hard_json_error() {
        let err = parse_document(r#"{"Mindmap": {"text": "#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn still_broken_after_repair_reports_original_error() {
        // The trailing comma is repairable but the unclosed brace is not.
        let err = parse_document(r#"{"Mindmap": {"text": "A",}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn schema_errors_pass_through_repair() {
        let err = parse_document(r#"{"NotMindmap": {},}"#).unwrap_err();
        assert!(matches!(err, Error::Schema { .. }));
    }
}
