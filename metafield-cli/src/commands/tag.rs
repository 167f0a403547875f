use metafield::{
    tag::{CreateTag, DeleteTag, ListTags, SetTagSchema},
    MetafieldContext,
};

use crate::cli::{OutputFormat, TagCommand};
use crate::error::CliResult;
use crate::output;

pub fn run(ctx: &MetafieldContext, cmd: TagCommand, format: OutputFormat) -> CliResult<()> {
    match cmd {
        TagCommand::Create { name, schema } => {
            let mut create = CreateTag::new(name);
            if let Some(schema) = schema {
                create = create.with_schema(schema);
            }
            output::print_one(&ctx.run(create)?, format)
        }
        TagCommand::Attach { tag, schema, .. } => {
            output::print_one(&ctx.run(SetTagSchema::new(tag, schema))?, format)
        }
        TagCommand::Delete { id } => {
            ctx.run(DeleteTag::new(id))?;
            output::print_status(&format!("Deleted tag {id}"), "deleted", id, format)
        }
        TagCommand::List => output::print(&ctx.run(ListTags)?, format),
    }
}
