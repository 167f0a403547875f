use std::process;

use clap::Parser;
use metafield::MetafieldContext;
use metafield_cli::{
    cli::Cli,
    commands,
    error::{handle_cli_result, CliError, CliResult},
    exit_codes::EXIT_ERROR,
};
use metafield_config::{ConfigProvider, MetafieldConfig};

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e.full_chain());
            process::exit(e.exit_code);
        }
    };

    configure_logging(&cli, &config);

    let exit_code = handle_cli_result(run(cli, config));
    process::exit(exit_code);
}

fn load_config(cli: &Cli) -> CliResult<MetafieldConfig> {
    let mut provider = ConfigProvider::new();
    if let Some(db) = &cli.db {
        provider = provider.with_override("store.path", db);
    }
    Ok(provider.load()?)
}

fn run(cli: Cli, config: MetafieldConfig) -> CliResult<()> {
    let ctx = MetafieldContext::open(config.store)
        .build()
        .map_err(|e| CliError::new(format!("Failed to open store: {e}"), EXIT_ERROR))?;
    commands::run(&ctx, cli.command, cli.format)
}

fn configure_logging(cli: &Cli, config: &MetafieldConfig) {
    use tracing::Level;
    use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

    let directive = if cli.quiet {
        Level::ERROR.to_string()
    } else if cli.debug {
        Level::DEBUG.to_string()
    } else if cli.verbose {
        Level::TRACE.to_string()
    } else {
        config.log.filter.clone()
    };

    registry()
        .with(EnvFilter::new(directive))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
