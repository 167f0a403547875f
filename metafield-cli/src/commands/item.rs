use metafield::{
    item::{CreateItem, DeleteItem, TagItem, UntagItem},
    MetafieldContext,
};

use crate::cli::{ItemCommand, OutputFormat};
use crate::error::CliResult;
use crate::output;

pub fn run(ctx: &MetafieldContext, cmd: ItemCommand, format: OutputFormat) -> CliResult<()> {
    match cmd {
        ItemCommand::Create { label } => output::print_one(&ctx.run(CreateItem::new(label))?, format),
        ItemCommand::Delete { id } => {
            ctx.run(DeleteItem::new(id))?;
            output::print_status(&format!("Deleted item {id}"), "deleted", id, format)
        }
        ItemCommand::Tag { item, tag } => {
            let added = ctx.run(TagItem::new(item, tag))?;
            let message = if added {
                format!("Tagged {item} with {tag}")
            } else {
                format!("{item} already has tag {tag}")
            };
            output::print_status(&message, "added", added, format)
        }
        ItemCommand::Untag { item, tag } => {
            let removed = ctx.run(UntagItem::new(item, tag))?;
            let message = if removed {
                format!("Removed tag {tag} from {item}")
            } else {
                format!("{item} did not have tag {tag}")
            };
            output::print_status(&message, "removed", removed, format)
        }
    }
}
