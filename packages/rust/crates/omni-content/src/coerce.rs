//! Scalar coercion for raw metadata values.

use std::fmt;

/// Typed view of a raw metadata value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Literal `true` or `false`.
    Bool(bool),
    /// Literal `null`.
    Empty,
    /// Anything else, passed through unchanged.
    Text(&'a str),
}

impl FieldValue<'_> {
    /// Boolean reading of the value: only `Bool(true)` is truthy.
    #[must_use]
    pub fn as_bool(&self) -> bool {
        matches!(self, Self::Bool(true))
    }

    /// Textual reading of the value; `Empty` reads as `""`.
    #[must_use]
    pub fn as_text(&self) -> &str {
        match self {
            Self::Bool(true) => "true",
            Self::Bool(false) => "false",
            Self::Empty => "",
            Self::Text(raw) => raw,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

/// Coerce a raw value: `true`/`false` to booleans, `null` to empty,
/// everything else unchanged.
#[must_use]
pub fn coerce(raw: &str) -> FieldValue<'_> {
    match raw {
        "true" => FieldValue::Bool(true),
        "false" => FieldValue::Bool(false),
        "null" => FieldValue::Empty,
        other => FieldValue::Text(other),
    }
}

/// Read a boolean-typed field. An absent value yields `default`; a present
/// value is `true` only for the literal `true`.
#[must_use]
pub fn coerce_bool(raw: Option<&str>, default: bool) -> bool {
    raw.map_or(default, |value| coerce(value).as_bool())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_tokens() {
        assert_eq!(coerce("true"), FieldValue::Bool(true));
        assert_eq!(coerce("false"), FieldValue::Bool(false));
        assert_eq!(coerce("null"), FieldValue::Empty);
        assert_eq!(coerce("maybe"), FieldValue::Text("maybe"));
    }

    #[test]
    fn test_tokens_are_case_sensitive() {
        assert_eq!(coerce("True"), FieldValue::Text("True"));
        assert_eq!(coerce("NULL"), FieldValue::Text("NULL"));
    }

    #[test]
    fn test_bool_field_is_falsy_unless_true() {
        assert!(coerce_bool(Some("true"), false));
        assert!(!coerce_bool(Some("maybe"), true));
        assert!(!coerce_bool(Some("null"), true));
        assert!(!coerce_bool(Some(""), true));
        assert!(coerce_bool(None, true));
        assert!(!coerce_bool(None, false));
    }

    #[test]
    fn test_text_view() {
        assert_eq!(coerce("null").to_string(), "");
        assert_eq!(coerce("2024-01-01").as_text(), "2024-01-01");
    }
}
