use metafield::{
    field::GetField,
    value::{ClearValue, GetValues, SetValue, SetValues},
    FieldId, FieldKind, MetafieldContext, ValueWrite,
};
use serde_json::Value;

use crate::cli::{OutputFormat, ValueCommand};
use crate::error::{CliError, CliResult};
use crate::output;

pub fn run(ctx: &MetafieldContext, cmd: ValueCommand, format: OutputFormat) -> CliResult<()> {
    match cmd {
        ValueCommand::Set { item, field, value } => {
            let kind = ctx.run(GetField::new(field))?.kind();
            let stored = ctx.run(SetValue::new(item, field, parse_value(kind, &value)))?;
            output::print_status(&format!("Set {field} = {}", stored.to_json()), "value", stored, format)
        }
        ValueCommand::SetMany { item, values } => {
            let mut writes = Vec::with_capacity(values.len());
            for pair in &values {
                let (field_id, raw) = split_pair(pair)?;
                let kind = ctx.run(GetField::new(field_id))?.kind();
                writes.push(ValueWrite::new(field_id, parse_value(kind, raw)));
            }
            let written = ctx.run(SetValues::new(item, writes))?;
            output::print_status(&format!("Set {written} values"), "written", written, format)
        }
        ValueCommand::Clear { item, field } => {
            let cleared = ctx.run(ClearValue::new(item, field))?;
            let message = if cleared {
                format!("Cleared {field}")
            } else {
                format!("{field} had no value")
            };
            output::print_status(&message, "cleared", cleared, format)
        }
        ValueCommand::Get { item } => output::print(&ctx.run(GetValues::new(item))?, format),
    }
}

/// Interpret a command-line value for a field of `kind`.
///
/// Text and choice fields take the argument as-is, so `123` or `true` stay
/// strings; a JSON-quoted argument (`'"Keep"'`) is unquoted. Other kinds
/// parse the argument as JSON and fall back to a string, which the field
/// then rejects with a type error.
pub fn parse_value(kind: FieldKind, raw: &str) -> Value {
    match (kind, serde_json::from_str::<Value>(raw)) {
        (_, Ok(Value::String(s))) => Value::String(s),
        (FieldKind::Text | FieldKind::Choice, _) => Value::String(raw.to_string()),
        (_, Ok(value)) => value,
        (_, Err(_)) => Value::String(raw.to_string()),
    }
}

/// Split `FIELD_ID=VALUE`.
pub fn split_pair(pair: &str) -> CliResult<(FieldId, &str)> {
    let (field, value) = pair
        .split_once('=')
        .ok_or_else(|| CliError::usage(format!("expected FIELD_ID=VALUE, got '{pair}'")))?;
    let field_id: FieldId = field
        .parse()
        .map_err(|e| CliError::usage(format!("invalid field id '{field}': {e}")))?;
    Ok((field_id, value))
}
