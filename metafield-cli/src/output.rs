//! Rendering command results as tables, JSON or YAML

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use metafield::{Field, FieldConfig, FieldValue, ResolvedField, Schema, Tag};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliResult;

/// Something that can be shown as a table.
pub trait Tabular {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

/// Print one record or a list of records in the requested format.
pub fn print<T>(items: &[T], format: OutputFormat) -> CliResult<()>
where
    T: Serialize + Tabular,
{
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No items to display");
            } else {
                println!("{}", table(items));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(items)?),
        OutputFormat::Yaml => print!("{}", serde_yaml_ng::to_string(items)?),
    }
    Ok(())
}

/// Print a single record. JSON and YAML show the bare object.
pub fn print_one<T>(item: &T, format: OutputFormat) -> CliResult<()>
where
    T: Serialize + Tabular,
{
    match format {
        OutputFormat::Table => println!("{}", table(std::slice::from_ref(item))),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(item)?),
        OutputFormat::Yaml => print!("{}", serde_yaml_ng::to_string(item)?),
    }
    Ok(())
}

/// Print a short confirmation, or a JSON/YAML object carrying `value`.
pub fn print_status<V: Serialize>(message: &str, key: &str, value: V, format: OutputFormat) -> CliResult<()> {
    let object = serde_json::json!({ key: value });
    match format {
        OutputFormat::Table => println!("{message}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&object)?),
        OutputFormat::Yaml => print!("{}", serde_yaml_ng::to_string(&object)?),
    }
    Ok(())
}

fn table<T: Tabular>(items: &[T]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(T::headers());
    for item in items {
        table.add_row(item.row());
    }
    table
}

fn describe_config(config: &FieldConfig) -> String {
    match config {
        FieldConfig::Choice { options } => options.join(", "),
        FieldConfig::Scale { max } => format!("1-{max}"),
        FieldConfig::Text {
            max_length: Some(max),
        } => format!("max {max} chars"),
        FieldConfig::Text { max_length: None } => String::new(),
        FieldConfig::Boolean => String::new(),
    }
}

fn describe_value(value: &Option<FieldValue>) -> String {
    match value {
        None => "-".to_string(),
        Some(FieldValue::Choice(s)) | Some(FieldValue::Text(s)) => s.clone(),
        Some(FieldValue::Scale(n)) => n.to_string(),
        Some(FieldValue::Boolean(b)) => b.to_string(),
    }
}

impl Tabular for Field {
    fn headers() -> Vec<&'static str> {
        vec!["Id", "Scope", "Name", "Kind", "Config"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.scope.to_string(),
            self.name.clone(),
            self.kind().to_string(),
            describe_config(&self.config),
        ]
    }
}

impl Tabular for Schema {
    fn headers() -> Vec<&'static str> {
        vec!["Id", "Scope", "Name", "Fields", "Summary"]
    }

    fn row(&self) -> Vec<String> {
        let names = |shown_only: bool| {
            self.bindings
                .iter()
                .filter(|b| !shown_only || b.show_on_summary)
                .map(|b| b.field.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        vec![
            self.id.to_string(),
            self.scope.to_string(),
            self.name.clone(),
            names(false),
            names(true),
        ]
    }
}

impl Tabular for Tag {
    fn headers() -> Vec<&'static str> {
        vec!["Id", "Name", "Schema"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.schema_id.map(|s| s.to_string()).unwrap_or_default(),
        ]
    }
}

impl Tabular for metafield::Item {
    fn headers() -> Vec<&'static str> {
        vec!["Id", "Label"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.id.to_string(), self.label.clone()]
    }
}

impl Tabular for ResolvedField {
    fn headers() -> Vec<&'static str> {
        vec!["Field", "Kind", "Value", "Schema", "Summary", "Field Id"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.display_name.clone(),
            self.field.kind().to_string(),
            describe_value(&self.value),
            self.schema_name.clone(),
            if self.show_on_summary { "yes" } else { "" }.to_string(),
            self.field.id.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_config() {
        assert_eq!(describe_config(&FieldConfig::scale(5)), "1-5");
        assert_eq!(describe_config(&FieldConfig::choice(["A", "B"])), "A, B");
        assert_eq!(describe_config(&FieldConfig::text_with_max_length(80)), "max 80 chars");
        assert_eq!(describe_config(&FieldConfig::boolean()), "");
    }

    #[test]
    fn test_describe_unset_value() {
        assert_eq!(describe_value(&None), "-");
        assert_eq!(describe_value(&Some(FieldValue::Boolean(false))), "false");
    }
}
