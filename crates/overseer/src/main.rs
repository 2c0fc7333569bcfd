mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use overseer_core::Monitor;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::output::ConsoleSink;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(mut cli: Cli) -> Result<(), CliError> {
    config::apply_display_defaults(&mut cli.global, &config::load_config_or_default().defaults)?;

    match cli.command {
        // Config commands don't need the service
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "overseer", &mut std::io::stdout());
            Ok(())
        }

        // Long-running poll loops
        Command::Watch(args) => {
            let monitor_config = config::resolve_monitor_config(&cli.global)?;
            commands::watch::handle(monitor_config, args, &cli.global).await
        }

        // One-shot reads and operator commands
        cmd => {
            let monitor_config = config::resolve_monitor_config(&cli.global)?;
            let sink = Arc::new(ConsoleSink::new(
                output::should_color(&cli.global.color),
                cli.global.quiet,
            ));
            let monitor = Monitor::new(monitor_config, sink)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &monitor, &cli.global).await
        }
    }
}
