use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use metafield::{FieldId, FieldKind, ItemId, SchemaId, TagId};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

#[derive(Parser, Debug)]
#[command(name = "metafield")]
#[command(version)]
#[command(about = "Typed custom fields for tagged items")]
#[command(long_about = "
metafield attaches typed custom fields (choice, scale, text, boolean) to
items. Fields are grouped into schemas, schemas are attached to tags, and an
item's fields are the union of the schemas reachable through its tags.

Configuration is read from ~/.metafield/ and ./.metafield/
(metafield.toml, .yaml, .yml or .json) and METAFIELD_* environment variables.
")]
pub struct Cli {
    /// Database file, overrides store.path from configuration
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage field definitions
    #[command(subcommand)]
    Field(FieldCommand),
    /// Manage schemas and their bindings
    #[command(subcommand)]
    Schema(SchemaCommand),
    /// Manage tags
    #[command(subcommand)]
    Tag(TagCommand),
    /// Manage items and the tags applied to them
    #[command(subcommand)]
    Item(ItemCommand),
    /// Read and write item values
    #[command(subcommand)]
    Value(ValueCommand),
    /// Show the effective fields of an item
    Resolve {
        item: ItemId,
    },
}

/// Kind-specific settings of a field
#[derive(Args, Debug, Clone, Default)]
pub struct FieldConfigArgs {
    /// Choice option, repeat for each option
    #[arg(long = "option", value_name = "OPTION")]
    pub options: Vec<String>,
    /// Scale maximum (2-10)
    #[arg(long)]
    pub max: Option<i64>,
    /// Text length limit in characters
    #[arg(long)]
    pub max_length: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum FieldCommand {
    /// Create a field
    Create {
        #[arg(long)]
        scope: String,
        #[arg(long)]
        name: String,
        #[arg(long, value_parser = parse_kind)]
        kind: FieldKind,
        #[command(flatten)]
        config: FieldConfigArgs,
    },
    /// Rename a field or replace its configuration
    Update {
        id: FieldId,
        #[arg(long)]
        name: Option<String>,
        /// New kind; requires the matching settings
        #[arg(long, value_parser = parse_kind)]
        kind: Option<FieldKind>,
        #[command(flatten)]
        config: FieldConfigArgs,
    },
    /// Delete a field no schema uses
    Delete { id: FieldId },
    /// Show one field
    Show { id: FieldId },
    /// List the fields of a scope
    List {
        #[arg(long)]
        scope: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SchemaCommand {
    /// Create a schema
    Create {
        #[arg(long)]
        scope: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Field to bind, in display order
        #[arg(long = "field", value_name = "FIELD_ID")]
        fields: Vec<FieldId>,
        /// Bound field to show on summaries (at most 3)
        #[arg(long = "show", value_name = "FIELD_ID")]
        shown: Vec<FieldId>,
    },
    /// Rename a schema or change its description
    Update {
        id: SchemaId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a schema and its bindings
    Delete { id: SchemaId },
    /// Show one schema with its bindings
    Show { id: SchemaId },
    /// List the schemas of a scope
    List {
        #[arg(long)]
        scope: String,
    },
    /// Bind a field at the end of a schema
    Bind {
        schema: SchemaId,
        field: FieldId,
        #[arg(long)]
        show: bool,
    },
    /// Remove a field from a schema
    Unbind { schema: SchemaId, field: FieldId },
    /// Set the display order of the listed fields
    Reorder {
        schema: SchemaId,
        /// Fields in their new order, starting at position 0
        #[arg(required = true)]
        fields: Vec<FieldId>,
    },
    /// Show or hide a bound field on summaries
    Summary {
        schema: SchemaId,
        field: FieldId,
        /// Hide instead of show
        #[arg(long)]
        off: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagCommand {
    /// Create a tag
    Create {
        name: String,
        #[arg(long)]
        schema: Option<SchemaId>,
    },
    /// Attach a schema to a tag, or detach it
    Attach {
        tag: TagId,
        #[arg(long, conflicts_with = "detach", required_unless_present = "detach")]
        schema: Option<SchemaId>,
        #[arg(long)]
        detach: bool,
    },
    /// Delete a tag
    Delete { id: TagId },
    /// List all tags
    List,
}

#[derive(Subcommand, Debug)]
pub enum ItemCommand {
    /// Register an item
    Create {
        #[arg(default_value = "")]
        label: String,
    },
    /// Delete an item with its tags and values
    Delete { id: ItemId },
    /// Apply a tag
    Tag { item: ItemId, tag: TagId },
    /// Remove a tag
    Untag { item: ItemId, tag: TagId },
}

#[derive(Subcommand, Debug)]
pub enum ValueCommand {
    /// Set one value. Text and choice values are taken literally; other
    /// kinds parse VALUE as JSON (`4`, `true`).
    Set {
        item: ItemId,
        field: FieldId,
        value: String,
    },
    /// Set several values at once, all or nothing
    SetMany {
        item: ItemId,
        /// FIELD_ID=VALUE, repeatable
        #[arg(long = "value", value_name = "FIELD_ID=VALUE", required = true)]
        values: Vec<String>,
    },
    /// Remove one value
    Clear { item: ItemId, field: FieldId },
    /// Show the item's fields with their values
    Get { item: ItemId },
}

fn parse_kind(s: &str) -> Result<FieldKind, String> {
    s.parse::<FieldKind>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_field_create() {
        let cli = Cli::try_parse_from([
            "metafield", "field", "create", "--scope", "photos", "--name", "Verdict", "--kind",
            "Choice", "--option", "Keep", "--option", "Archive",
        ])
        .unwrap();
        match cli.command {
            Commands::Field(FieldCommand::Create { kind, config, .. }) => {
                assert_eq!(kind, FieldKind::Choice);
                assert_eq!(config.options, ["Keep", "Archive"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_bad_id_rejected_by_parser() {
        assert!(Cli::try_parse_from(["metafield", "resolve", "not-an-id"]).is_err());
    }

    #[test]
    fn test_attach_requires_schema_or_detach() {
        let tag = TagId::new().to_string();
        assert!(Cli::try_parse_from(["metafield", "tag", "attach", &tag]).is_err());
        assert!(Cli::try_parse_from(["metafield", "tag", "attach", &tag, "--detach"]).is_ok());
    }
}
