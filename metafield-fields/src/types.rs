//! Core field types: the kind of a field, its per-kind configuration, and the
//! typed value a field holds for one item.
//!
//! `FieldConfig` is internally tagged by `kind`, so the configuration shape is
//! always tied to the field type:
//!
//! ```json
//! {"kind": "scale", "max": 5}
//! {"kind": "choice", "options": ["Yes", "No"]}
//! {"kind": "text", "max_length": 280}
//! {"kind": "boolean"}
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The type of a field. Determines the configuration shape and the value slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Enumerated choice among configured options
    Choice,
    /// Integer rating from 1 to a configured maximum
    Scale,
    /// Free text, optionally length-limited
    Text,
    /// True / false
    Boolean,
}

impl FieldKind {
    /// Every kind, in dispatch-table order.
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Choice,
        FieldKind::Scale,
        FieldKind::Text,
        FieldKind::Boolean,
    ];

    /// Stable lowercase identifier, also the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Choice => "choice",
            FieldKind::Scale => "scale",
            FieldKind::Text => "text",
            FieldKind::Boolean => "boolean",
        }
    }

    /// Position of this kind in [`FieldKind::ALL`].
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown field kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldKind(pub String);

impl fmt::Display for UnknownFieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown field kind '{}' (expected choice, scale, text or boolean)",
            self.0
        )
    }
}

impl std::error::Error for UnknownFieldKind {}

impl FromStr for FieldKind {
    type Err = UnknownFieldKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownFieldKind(s.to_string()))
    }
}

/// Per-kind configuration of a field definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldConfig {
    Choice {
        options: Vec<String>,
    },
    Scale {
        max: i64,
    },
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<u32>,
    },
    Boolean,
}

impl FieldConfig {
    pub fn choice<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldConfig::Choice {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn scale(max: i64) -> Self {
        FieldConfig::Scale { max }
    }

    pub fn text() -> Self {
        FieldConfig::Text { max_length: None }
    }

    pub fn text_with_max_length(max_length: u32) -> Self {
        FieldConfig::Text {
            max_length: Some(max_length),
        }
    }

    pub fn boolean() -> Self {
        FieldConfig::Boolean
    }

    /// Copy with surrounding whitespace stripped from choice options.
    pub fn trimmed(&self) -> Self {
        match self {
            FieldConfig::Choice { options } => FieldConfig::Choice {
                options: options.iter().map(|o| o.trim().to_string()).collect(),
            },
            other => other.clone(),
        }
    }

    /// The field kind this configuration belongs to.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldConfig::Choice { .. } => FieldKind::Choice,
            FieldConfig::Scale { .. } => FieldKind::Scale,
            FieldConfig::Text { .. } => FieldKind::Text,
            FieldConfig::Boolean => FieldKind::Boolean,
        }
    }

    /// Configured choice options; empty for every other kind.
    pub fn options(&self) -> &[String] {
        match self {
            FieldConfig::Choice { options } => options,
            _ => &[],
        }
    }

    /// Configured scale maximum.
    pub fn scale_max(&self) -> Option<i64> {
        match self {
            FieldConfig::Scale { max } => Some(*max),
            _ => None,
        }
    }

    /// Configured text length limit.
    pub fn text_max_length(&self) -> Option<u32> {
        match self {
            FieldConfig::Text { max_length } => *max_length,
            _ => None,
        }
    }
}

/// A validated value for one (item, field) pair.
///
/// Serializes as the bare JSON value (`"Yes"`, `4`, `"some text"`, `true`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Choice(String),
    Scale(i64),
    Text(String),
    Boolean(bool),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Choice(_) => FieldKind::Choice,
            FieldValue::Scale(_) => FieldKind::Scale,
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Boolean(_) => FieldKind::Boolean,
        }
    }

    /// Split the value into storage slots. Exactly one slot is populated.
    pub fn into_slots(self) -> ValueSlots {
        match self {
            FieldValue::Choice(s) | FieldValue::Text(s) => ValueSlots {
                text: Some(s),
                ..ValueSlots::default()
            },
            FieldValue::Scale(n) => ValueSlots {
                number: Some(n),
                ..ValueSlots::default()
            },
            FieldValue::Boolean(b) => ValueSlots {
                boolean: Some(b),
                ..ValueSlots::default()
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Choice(s) | FieldValue::Text(s) => serde_json::Value::String(s.clone()),
            FieldValue::Scale(n) => serde_json::Value::from(*n),
            FieldValue::Boolean(b) => serde_json::Value::Bool(*b),
        }
    }
}

/// Raw storage columns of a field value. Which slot is meaningful is decided by
/// the field kind at read time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueSlots {
    pub text: Option<String>,
    pub number: Option<i64>,
    pub boolean: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_config_serializes_with_kind_tag() {
        let json = serde_json::to_value(FieldConfig::scale(5)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "scale", "max": 5}));

        let json = serde_json::to_value(FieldConfig::boolean()).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "boolean"}));
    }

    #[test]
    fn text_config_omits_missing_max_length() {
        let json = serde_json::to_string(&FieldConfig::text()).unwrap();
        assert!(!json.contains("max_length"));

        let parsed: FieldConfig = serde_json::from_str(r#"{"kind":"text"}"#).unwrap();
        assert_eq!(parsed, FieldConfig::text());
    }

    #[test]
    fn choice_config_from_json() {
        let parsed: FieldConfig =
            serde_json::from_str(r#"{"kind":"choice","options":["Keep","Archive"]}"#).unwrap();
        assert_eq!(parsed.kind(), FieldKind::Choice);
        assert_eq!(parsed.options(), ["Keep", "Archive"]);
    }

    #[test]
    fn trimmed_strips_choice_options_only() {
        let config = FieldConfig::choice([" Yes", "No  "]).trimmed();
        assert_eq!(config.options(), ["Yes", "No"]);
        assert_eq!(FieldConfig::scale(5).trimmed(), FieldConfig::scale(5));
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Scale".parse::<FieldKind>().unwrap(), FieldKind::Scale);
        assert_eq!(" boolean ".parse::<FieldKind>().unwrap(), FieldKind::Boolean);
        assert!("rating".parse::<FieldKind>().is_err());
    }

    #[test]
    fn kind_order_matches_index() {
        for (i, kind) in FieldKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn value_fills_exactly_one_slot() {
        let slots = FieldValue::Scale(4).into_slots();
        assert_eq!(slots.number, Some(4));
        assert!(slots.text.is_none());
        assert!(slots.boolean.is_none());

        let slots = FieldValue::Boolean(false).into_slots();
        assert_eq!(slots.boolean, Some(false));
        assert!(slots.number.is_none());
    }

    #[test]
    fn value_serializes_bare() {
        assert_eq!(
            serde_json::to_value(FieldValue::Choice("Yes".into())).unwrap(),
            serde_json::json!("Yes")
        );
        assert_eq!(FieldValue::Scale(3).to_json(), serde_json::json!(3));
    }
}
