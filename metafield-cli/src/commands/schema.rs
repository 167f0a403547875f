use metafield::{
    schema::{
        AddFieldToSchema, CreateSchema, DeleteSchema, GetSchema, ListSchemas,
        RemoveFieldFromSchema, SetShowOnSummary, UpdateSchema, UpdateSchemaBindings,
    },
    BindingSpec, MetafieldContext,
};

use crate::cli::{OutputFormat, SchemaCommand};
use crate::error::{CliError, CliResult};
use crate::output;

pub fn run(ctx: &MetafieldContext, cmd: SchemaCommand, format: OutputFormat) -> CliResult<()> {
    match cmd {
        SchemaCommand::Create {
            scope,
            name,
            description,
            fields,
            shown,
        } => {
            if let Some(stray) = shown.iter().find(|id| !fields.contains(id)) {
                return Err(CliError::usage(format!(
                    "--show {stray} is not among the --field values"
                )));
            }
            let bindings = fields.iter().zip(0i64..).map(|(id, order)| {
                let spec = BindingSpec::new(*id, order);
                if shown.contains(id) {
                    spec.shown()
                } else {
                    spec
                }
            });
            let schema = ctx.run(
                CreateSchema::new(scope, name)
                    .with_description(description)
                    .with_bindings(bindings),
            )?;
            output::print_one(&schema, format)
        }
        SchemaCommand::Update {
            id,
            name,
            description,
        } => {
            let mut update = UpdateSchema::new(id);
            if let Some(name) = name {
                update = update.with_name(name);
            }
            if let Some(description) = description {
                update = update.with_description(description);
            }
            output::print_one(&ctx.run(update)?, format)
        }
        SchemaCommand::Delete { id } => {
            ctx.run(DeleteSchema::new(id))?;
            output::print_status(&format!("Deleted schema {id}"), "deleted", id, format)
        }
        SchemaCommand::Show { id } => output::print_one(&ctx.run(GetSchema::new(id))?, format),
        SchemaCommand::List { scope } => {
            output::print(&ctx.run(ListSchemas::new(scope))?, format)
        }
        SchemaCommand::Bind {
            schema,
            field,
            show,
        } => {
            let mut add = AddFieldToSchema::new(schema, field);
            if show {
                add = add.shown();
            }
            output::print_one(&ctx.run(add)?, format)
        }
        SchemaCommand::Unbind { schema, field } => output::print_one(
            &ctx.run(RemoveFieldFromSchema::new(schema, field))?,
            format,
        ),
        SchemaCommand::Reorder { schema, fields } => {
            let current = ctx.run(GetSchema::new(schema))?;
            let mut updates = Vec::with_capacity(fields.len());
            for (id, order) in fields.iter().zip(0i64..) {
                let show = current
                    .binding(id)
                    .map(|b| b.show_on_summary)
                    .unwrap_or_default();
                let spec = BindingSpec::new(*id, order);
                updates.push(if show { spec.shown() } else { spec });
            }
            output::print_one(&ctx.run(UpdateSchemaBindings::new(schema, updates))?, format)
        }
        SchemaCommand::Summary { schema, field, off } => output::print_one(
            &ctx.run(SetShowOnSummary::new(schema, field, !off))?,
            format,
        ),
    }
}
