//! Command handlers: translate parsed arguments into metafield operations

pub mod field;
pub mod item;
pub mod schema;
pub mod tag;
pub mod value;

use metafield::{resolve::ResolveFieldsForItem, MetafieldContext};

use crate::cli::{Commands, OutputFormat};
use crate::error::CliResult;
use crate::output;

/// Dispatch a parsed command.
pub fn run(ctx: &MetafieldContext, command: Commands, format: OutputFormat) -> CliResult<()> {
    match command {
        Commands::Field(cmd) => field::run(ctx, cmd, format),
        Commands::Schema(cmd) => schema::run(ctx, cmd, format),
        Commands::Tag(cmd) => tag::run(ctx, cmd, format),
        Commands::Item(cmd) => item::run(ctx, cmd, format),
        Commands::Value(cmd) => value::run(ctx, cmd, format),
        Commands::Resolve { item } => {
            let resolved = ctx.run(ResolveFieldsForItem::new(item))?;
            output::print(&resolved, format)
        }
    }
}
