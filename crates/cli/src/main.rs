//! The CLI binary. Parses arguments and hands them to [`rbac_admin_cli::run`].

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rbac_admin_cli::{run, Command, Context};

/// Inspect how filters become SQL and how database failures are reported.
#[derive(Debug, Parser)]
#[command(name = "rbac-admin", version, about, long_about = None)]
struct CliArgs {
    /// The directory holding configuration.json.
    #[arg(
        long = "context",
        env = "RBAC_ADMIN_CONFIGURATION",
        value_name = "DIRECTORY",
        default_value = "."
    )]
    context_path: std::path::PathBuf,

    #[command(subcommand)]
    subcommand: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let context = Context {
        context_path: args.context_path,
    };
    let output = run(args.subcommand, &context).await?;
    println!("{output}");
    Ok(())
}
