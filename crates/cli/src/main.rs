/// Entry point for the Shroud CLI, a source-to-source obfuscator for Java programs.
///
/// This module parses command-line arguments, initializes logging on stderr, and
/// dispatches to the `obfuscate` (default) or `decrypt` subcommand.
use clap::{ArgAction, Parser};
use shroud_cli::commands::{obfuscate::ObfuscateArgs, Cmd, Command};
use tracing_subscriber::EnvFilter;

/// Command-line interface for Shroud.
///
/// Without a subcommand the arguments are read as `obfuscate` arguments, so
/// `shroud Main.java` and `shroud obfuscate Main.java` are equivalent.
#[derive(Parser)]
#[command(name = "shroud")]
#[command(about = "Shroud: Java source obfuscator")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); `RUST_LOG` takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Cmd>,

    #[command(flatten)]
    obfuscate: ObfuscateArgs,
}

/// Runs the Shroud CLI with the provided arguments.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let command = cli.command.unwrap_or(Cmd::Obfuscate(cli.obfuscate));
    command.execute().await
}
