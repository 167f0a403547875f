use metafield::{
    field::{CreateField, DeleteField, GetField, ListFields, UpdateField},
    FieldConfig, FieldKind, MetafieldContext,
};

use crate::cli::{FieldCommand, FieldConfigArgs, OutputFormat};
use crate::error::{CliError, CliResult};
use crate::output;

pub fn run(ctx: &MetafieldContext, cmd: FieldCommand, format: OutputFormat) -> CliResult<()> {
    match cmd {
        FieldCommand::Create {
            scope,
            name,
            kind,
            config,
        } => {
            let config = build_config(kind, config)?;
            let field = ctx.run(CreateField::new(scope, name, config))?;
            output::print_one(&field, format)
        }
        FieldCommand::Update {
            id,
            name,
            kind,
            config,
        } => {
            let mut update = UpdateField::new(id);
            if let Some(name) = name {
                update = update.with_name(name);
            }
            match kind {
                Some(kind) => update = update.with_config(build_config(kind, config)?),
                None if has_settings(&config) => {
                    let current = ctx.run(GetField::new(id))?;
                    update = update.with_config(build_config(current.kind(), config)?);
                }
                None => {}
            }
            let field = ctx.run(update)?;
            output::print_one(&field, format)
        }
        FieldCommand::Delete { id } => {
            ctx.run(DeleteField::new(id))?;
            output::print_status(&format!("Deleted field {id}"), "deleted", id, format)
        }
        FieldCommand::Show { id } => output::print_one(&ctx.run(GetField::new(id))?, format),
        FieldCommand::List { scope } => output::print(&ctx.run(ListFields::new(scope))?, format),
    }
}

fn has_settings(args: &FieldConfigArgs) -> bool {
    !args.options.is_empty() || args.max.is_some() || args.max_length.is_some()
}

/// Combine a kind with its settings, refusing settings of another kind.
pub fn build_config(kind: FieldKind, args: FieldConfigArgs) -> CliResult<FieldConfig> {
    let stray = |flag: &str| CliError::usage(format!("--{flag} does not apply to {kind} fields"));
    match kind {
        FieldKind::Choice => {
            if args.max.is_some() {
                return Err(stray("max"));
            }
            if args.max_length.is_some() {
                return Err(stray("max-length"));
            }
            Ok(FieldConfig::choice(args.options))
        }
        FieldKind::Scale => {
            if !args.options.is_empty() {
                return Err(stray("option"));
            }
            if args.max_length.is_some() {
                return Err(stray("max-length"));
            }
            let max = args
                .max
                .ok_or_else(|| CliError::usage("scale fields need --max"))?;
            Ok(FieldConfig::scale(max))
        }
        FieldKind::Text => {
            if !args.options.is_empty() {
                return Err(stray("option"));
            }
            if args.max.is_some() {
                return Err(stray("max"));
            }
            Ok(match args.max_length {
                Some(max_length) => FieldConfig::text_with_max_length(max_length),
                None => FieldConfig::text(),
            })
        }
        FieldKind::Boolean => {
            if has_settings(&args) {
                return Err(CliError::usage("boolean fields take no settings"));
            }
            Ok(FieldConfig::boolean())
        }
    }
}
