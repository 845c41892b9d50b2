//! graphpub CLI binary entry point.

use clap::Parser;
use graphpub::cli::{AuthCommands, Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("graphpub=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.graph_config()?;
    match cli.command {
        Commands::Auth(auth_args) => match auth_args.command {
            AuthCommands::Login => graphpub::cli::auth::handle_login(&config).await,
            AuthCommands::Status => graphpub::cli::auth::handle_status(&config).await,
            AuthCommands::Logout => graphpub::cli::auth::handle_logout(&config).await,
        },
        Commands::Publish(args) => graphpub::cli::publish::handle_publish(&config, args).await,
    }
}
