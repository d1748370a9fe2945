//! Host content entity model used by the presave hook.

use serde::{Deserialize, Serialize};

/// Field storage kinds. Only the rich-text kinds are rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Text,
    TextLong,
    TextWithSummary,
    Other(String),
}

impl FieldKind {
    /// Kinds whose values contain HTML eligible for link replacement.
    pub const SUPPORTED: [FieldKind; 3] = [
        FieldKind::Text,
        FieldKind::TextLong,
        FieldKind::TextWithSummary,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Text => "text",
            FieldKind::TextLong => "text_long",
            FieldKind::TextWithSummary => "text_with_summary",
            FieldKind::Other(kind) => kind,
        }
    }

    pub fn is_supported(&self) -> bool {
        Self::SUPPORTED.contains(self)
    }
}

impl From<String> for FieldKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "text" => FieldKind::Text,
            "text_long" => FieldKind::TextLong,
            "text_with_summary" => FieldKind::TextWithSummary,
            _ => FieldKind::Other(kind),
        }
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.as_str().to_string()
    }
}

/// One value of a field. `summary` is only present on `text_with_summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldItem {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// A named field with its kind and ordered values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub items: Vec<FieldItem>,
}

/// A content entity about to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldableEntity {
    pub entity_type: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_kind_membership() {
        assert!(FieldKind::Text.is_supported());
        assert!(FieldKind::TextLong.is_supported());
        assert!(FieldKind::TextWithSummary.is_supported());
        assert!(!FieldKind::Other("string".to_string()).is_supported());
    }

    #[test]
    fn test_field_kind_round_trips_through_json() {
        let field: Field = serde_json::from_str(
            r#"{"name": "body", "kind": "text_with_summary", "items": [{"value": "<p>x</p>"}]}"#,
        )
        .unwrap();
        assert_eq!(field.kind, FieldKind::TextWithSummary);
        assert!(field.items[0].summary.is_none());

        let other: Field = serde_json::from_str(r#"{"name": "n", "kind": "integer"}"#).unwrap();
        assert_eq!(other.kind, FieldKind::Other("integer".to_string()));
        assert_eq!(serde_json::to_value(&other).unwrap()["kind"], "integer");
    }
}
