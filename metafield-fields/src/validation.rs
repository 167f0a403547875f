//! Type-indexed validation table.
//!
//! Each field kind has one [`KindRules`] entry that knows how to check a
//! configuration, coerce a raw JSON value into a [`FieldValue`], and read a
//! value back out of storage slots. Adding a field kind means adding a
//! variant and one table entry.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use serde_json::Value;

use crate::error::{FieldsError, Result};
use crate::types::{FieldConfig, FieldKind, FieldValue, ValueSlots};

/// Allowed range for a scale field's maximum.
pub const SCALE_MAX_RANGE: RangeInclusive<i64> = 2..=10;

/// Upper bound for a text field's configured `max_length`.
pub const TEXT_MAX_LENGTH_LIMIT: u32 = 65_535;

trait KindRules: Sync {
    fn check_config(&self, config: &FieldConfig) -> Result<()>;
    fn coerce(&self, config: &FieldConfig, raw: &Value) -> Result<FieldValue>;
    fn from_slots(&self, slots: &ValueSlots) -> Option<FieldValue>;
}

struct ChoiceRules;
struct ScaleRules;
struct TextRules;
struct BooleanRules;

/// Indexed by [`FieldKind::index`], same order as [`FieldKind::ALL`].
static RULES: [&dyn KindRules; 4] = [&ChoiceRules, &ScaleRules, &TextRules, &BooleanRules];

fn rules(kind: FieldKind) -> &'static dyn KindRules {
    RULES[kind.index()]
}

/// Validate a field configuration against the rules of its kind.
pub fn validate_config(config: &FieldConfig) -> Result<()> {
    rules(config.kind()).check_config(config)
}

/// Validate a raw value against a field configuration and convert it into a
/// typed [`FieldValue`].
pub fn coerce_value(config: &FieldConfig, raw: &Value) -> Result<FieldValue> {
    rules(config.kind()).coerce(config, raw)
}

/// Read the slot that is meaningful for the field's kind. `None` means unset.
///
/// The stored value is checked against the current configuration, so a
/// value written before the configuration changed (a lower scale maximum,
/// a new option list, a shorter length limit) reads as unset once it no
/// longer fits.
pub fn value_from_slots(config: &FieldConfig, slots: &ValueSlots) -> Option<FieldValue> {
    let rules = rules(config.kind());
    let stored = rules.from_slots(slots)?;
    rules.coerce(config, &stored.to_json()).ok()
}

fn json_type_name(raw: &Value) -> &'static str {
    match raw {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "non-integer number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(expected: FieldKind, raw: &Value) -> FieldsError {
    FieldsError::TypeMismatch {
        expected,
        found: json_type_name(raw),
    }
}

impl KindRules for ChoiceRules {
    fn check_config(&self, config: &FieldConfig) -> Result<()> {
        let options = config.options();
        if options.is_empty() {
            return Err(FieldsError::NoOptions);
        }
        let mut seen = HashSet::with_capacity(options.len());
        for (index, option) in options.iter().enumerate() {
            let trimmed = option.trim();
            if trimmed.is_empty() {
                return Err(FieldsError::BlankOption { index });
            }
            if !seen.insert(trimmed) {
                return Err(FieldsError::DuplicateOption {
                    option: trimmed.to_string(),
                });
            }
        }
        Ok(())
    }

    fn coerce(&self, config: &FieldConfig, raw: &Value) -> Result<FieldValue> {
        let Value::String(value) = raw else {
            return Err(mismatch(FieldKind::Choice, raw));
        };
        if config.options().iter().any(|o| o == value) {
            Ok(FieldValue::Choice(value.clone()))
        } else {
            Err(FieldsError::NotAnOption {
                value: value.clone(),
            })
        }
    }

    fn from_slots(&self, slots: &ValueSlots) -> Option<FieldValue> {
        slots.text.clone().map(FieldValue::Choice)
    }
}

impl KindRules for ScaleRules {
    fn check_config(&self, config: &FieldConfig) -> Result<()> {
        let max = config.scale_max().unwrap_or_default();
        if SCALE_MAX_RANGE.contains(&max) {
            Ok(())
        } else {
            Err(FieldsError::ScaleMaxOutOfRange {
                max,
                min_allowed: *SCALE_MAX_RANGE.start(),
                max_allowed: *SCALE_MAX_RANGE.end(),
            })
        }
    }

    fn coerce(&self, config: &FieldConfig, raw: &Value) -> Result<FieldValue> {
        let value = raw
            .as_i64()
            .ok_or_else(|| mismatch(FieldKind::Scale, raw))?;
        let max = config.scale_max().unwrap_or_default();
        if (1..=max).contains(&value) {
            Ok(FieldValue::Scale(value))
        } else {
            Err(FieldsError::ScaleOutOfRange { value, max })
        }
    }

    fn from_slots(&self, slots: &ValueSlots) -> Option<FieldValue> {
        slots.number.map(FieldValue::Scale)
    }
}

impl KindRules for TextRules {
    fn check_config(&self, config: &FieldConfig) -> Result<()> {
        match config.text_max_length() {
            Some(max_length) if max_length == 0 || max_length > TEXT_MAX_LENGTH_LIMIT => {
                Err(FieldsError::TextMaxLengthOutOfRange {
                    max_length,
                    max_allowed: TEXT_MAX_LENGTH_LIMIT,
                })
            }
            _ => Ok(()),
        }
    }

    fn coerce(&self, config: &FieldConfig, raw: &Value) -> Result<FieldValue> {
        let Value::String(text) = raw else {
            return Err(mismatch(FieldKind::Text, raw));
        };
        if let Some(max) = config.text_max_length() {
            let len = text.chars().count();
            if len > max as usize {
                return Err(FieldsError::TextTooLong { len, max });
            }
        }
        Ok(FieldValue::Text(text.clone()))
    }

    fn from_slots(&self, slots: &ValueSlots) -> Option<FieldValue> {
        slots.text.clone().map(FieldValue::Text)
    }
}

impl KindRules for BooleanRules {
    fn check_config(&self, _config: &FieldConfig) -> Result<()> {
        Ok(())
    }

    fn coerce(&self, _config: &FieldConfig, raw: &Value) -> Result<FieldValue> {
        raw.as_bool()
            .map(FieldValue::Boolean)
            .ok_or_else(|| mismatch(FieldKind::Boolean, raw))
    }

    fn from_slots(&self, slots: &ValueSlots) -> Option<FieldValue> {
        slots.boolean.map(FieldValue::Boolean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::choice(FieldConfig::choice(["Keep", "Archive"]))]
    #[case::scale_low(FieldConfig::scale(2))]
    #[case::scale_high(FieldConfig::scale(10))]
    #[case::text_unbounded(FieldConfig::text())]
    #[case::text_bounded(FieldConfig::text_with_max_length(280))]
    #[case::boolean(FieldConfig::boolean())]
    fn accepts_valid_configs(#[case] config: FieldConfig) {
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[rstest]
    #[case::no_options(FieldConfig::choice(Vec::<String>::new()), FieldsError::NoOptions)]
    #[case::blank_option(
        FieldConfig::choice(["Yes", "  "]),
        FieldsError::BlankOption { index: 1 }
    )]
    #[case::duplicate_option(
        FieldConfig::choice(["Yes", "No", "Yes "]),
        FieldsError::DuplicateOption { option: "Yes".into() }
    )]
    #[case::scale_too_small(
        FieldConfig::scale(1),
        FieldsError::ScaleMaxOutOfRange { max: 1, min_allowed: 2, max_allowed: 10 }
    )]
    #[case::scale_too_large(
        FieldConfig::scale(11),
        FieldsError::ScaleMaxOutOfRange { max: 11, min_allowed: 2, max_allowed: 10 }
    )]
    #[case::text_zero(
        FieldConfig::text_with_max_length(0),
        FieldsError::TextMaxLengthOutOfRange { max_length: 0, max_allowed: TEXT_MAX_LENGTH_LIMIT }
    )]
    fn rejects_invalid_configs(#[case] config: FieldConfig, #[case] expected: FieldsError) {
        assert_eq!(validate_config(&config), Err(expected));
    }

    #[rstest]
    #[case::choice(FieldConfig::choice(["Yes", "No"]), json!("No"), FieldValue::Choice("No".into()))]
    #[case::scale_min(FieldConfig::scale(5), json!(1), FieldValue::Scale(1))]
    #[case::scale_max(FieldConfig::scale(5), json!(5), FieldValue::Scale(5))]
    #[case::text(FieldConfig::text_with_max_length(5), json!("héllo"), FieldValue::Text("héllo".into()))]
    #[case::empty_text(FieldConfig::text(), json!(""), FieldValue::Text(String::new()))]
    #[case::boolean_false(FieldConfig::boolean(), json!(false), FieldValue::Boolean(false))]
    fn coerces_valid_values(
        #[case] config: FieldConfig,
        #[case] raw: Value,
        #[case] expected: FieldValue,
    ) {
        assert_eq!(coerce_value(&config, &raw), Ok(expected));
    }

    #[test]
    fn choice_value_must_match_an_option_exactly() {
        let config = FieldConfig::choice(["Yes", "No"]);
        assert_eq!(
            coerce_value(&config, &json!("yes")),
            Err(FieldsError::NotAnOption {
                value: "yes".into()
            })
        );
    }

    #[test]
    fn scale_value_bounds() {
        let config = FieldConfig::scale(5);
        assert_eq!(
            coerce_value(&config, &json!(0)),
            Err(FieldsError::ScaleOutOfRange { value: 0, max: 5 })
        );
        assert_eq!(
            coerce_value(&config, &json!(6)),
            Err(FieldsError::ScaleOutOfRange { value: 6, max: 5 })
        );
    }

    #[test]
    fn scale_rejects_fractions_and_strings() {
        let config = FieldConfig::scale(5);
        assert_eq!(
            coerce_value(&config, &json!(2.5)),
            Err(FieldsError::TypeMismatch {
                expected: FieldKind::Scale,
                found: "non-integer number"
            })
        );
        assert!(coerce_value(&config, &json!("3")).is_err());
    }

    #[test]
    fn text_length_counts_characters() {
        let config = FieldConfig::text_with_max_length(3);
        assert!(coerce_value(&config, &json!("日本語")).is_ok());
        assert_eq!(
            coerce_value(&config, &json!("日本語!")),
            Err(FieldsError::TextTooLong { len: 4, max: 3 })
        );
    }

    #[rstest]
    #[case(json!("true"))]
    #[case(json!(1))]
    #[case(json!(null))]
    fn boolean_accepts_only_json_booleans(#[case] raw: Value) {
        assert!(matches!(
            coerce_value(&FieldConfig::boolean(), &raw),
            Err(FieldsError::TypeMismatch {
                expected: FieldKind::Boolean,
                ..
            })
        ));
    }

    #[test]
    fn slots_are_read_by_kind() {
        let slots = ValueSlots {
            text: Some("Keep".into()),
            number: Some(3),
            boolean: None,
        };
        assert_eq!(
            value_from_slots(&FieldConfig::scale(5), &slots),
            Some(FieldValue::Scale(3))
        );
        assert_eq!(
            value_from_slots(&FieldConfig::choice(["Keep", "Archive"]), &slots),
            Some(FieldValue::Choice("Keep".into()))
        );
        assert_eq!(value_from_slots(&FieldConfig::boolean(), &slots), None);
    }

    #[rstest]
    #[case::scale_max_lowered(FieldConfig::scale(2))]
    #[case::option_removed(FieldConfig::choice(["Archive"]))]
    #[case::length_limit_shortened(FieldConfig::text_with_max_length(3))]
    fn stored_values_outside_current_config_read_as_unset(#[case] config: FieldConfig) {
        let slots = ValueSlots {
            text: Some("Keep it".into()),
            number: Some(3),
            boolean: None,
        };
        assert_eq!(value_from_slots(&config, &slots), None);
    }
}
