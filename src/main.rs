//! tsdocgen CLI entry point

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use tsdocgen::cli::{Cli, Commands};
use tsdocgen::commands::{run_config, run_generate, CommandContext};
use tsdocgen::config::DocgenConfig;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    let ctx = CommandContext::from_cli(cli.format, cli.verbose, cli.config.clone());

    init_logging(&ctx);

    match run(&cli, &ctx) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run(cli: &Cli, ctx: &CommandContext) -> tsdocgen::Result<String> {
    match &cli.command {
        Commands::Generate(args) => run_generate(args, ctx),
        Commands::Config(args) => run_config(args, ctx),
    }
}

/// Logs go to stderr so stdout stays pure JSON.
///
/// `RUST_LOG` wins; otherwise `--verbose` means debug and the configured
/// level applies. A broken config file is reported by the command itself.
fn init_logging(ctx: &CommandContext) {
    let level = if ctx.verbose {
        "debug".to_string()
    } else {
        DocgenConfig::load(ctx.config_path.as_deref())
            .map(|config| config.logging.level)
            .unwrap_or_else(|_| "warn".to_string())
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
