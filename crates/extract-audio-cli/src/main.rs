mod args;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use args::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let filter = match cli.verbose {
        0 => "extract_audio_core=warn",
        1 => "extract_audio_core=debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    // Handle commands
    match cli.command {
        Some(Commands::Extract {
            input,
            output,
            options,
        }) => {
            commands::extract::run(
                &input,
                output.as_deref(),
                &options,
                cli.config.as_deref(),
                cli.verbose > 0,
            )
            .await
        }
        Some(Commands::Doctor) => commands::doctor::run(cli.config.as_deref()).await,
        Some(Commands::Config) => commands::config::run(cli.config.as_deref()).await,
        None => {
            // If an input file is given directly, treat it as the extract command
            if let Some(input) = cli.input {
                let options = args::ExtractOptions {
                    output_dir: cli.output_dir,
                    codec: cli.codec,
                    log: cli.log,
                };
                commands::extract::run(
                    &input,
                    cli.output.as_deref(),
                    &options,
                    cli.config.as_deref(),
                    cli.verbose > 0,
                )
                .await
            } else {
                // No input, print help
                use clap::CommandFactory;
                Cli::command().print_help()?;
                println!();
                Ok(())
            }
        }
    }
}
