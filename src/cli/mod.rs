//! CLI entry point for graphpub.

pub mod auth;
pub mod publish;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::auth::{AuthFlow, ConsoleSurfaceProvider, FileTokenStore};
use crate::config::GraphConfig;
use crate::publish::Publisher;

/// graphpub CLI
#[derive(Parser, Debug)]
#[command(name = "graphpub", version, about = "Publish to a social graph feed from the terminal")]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Token file (overrides configuration and environment)
    #[arg(long, global = true)]
    pub token_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Token management
    Auth(AuthArgs),
    /// Publish a post to the feed
    Publish(PublishArgs),
}

/// Arguments for the `auth` subcommand group.
#[derive(Parser, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommands,
}

/// Auth subcommands for login, status, and logout.
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Authorize in the browser and save the token
    Login,
    /// Show whether a token is saved
    Status,
    /// Delete the saved token
    Logout,
}

/// Arguments for `graphpub publish`.
#[derive(Parser, Debug)]
pub struct PublishArgs {
    /// Text of the post
    #[arg(short, long)]
    pub message: Option<String>,

    /// Link attached to the post
    #[arg(short, long)]
    pub link: Option<String>,

    /// Picture URL attached to the post
    #[arg(short, long)]
    pub picture: Option<String>,
}

impl Cli {
    /// Resolve configuration: file, then environment, then `--token-file`.
    pub fn graph_config(&self) -> crate::error::Result<GraphConfig> {
        let mut config = GraphConfig::load(self.config.as_deref())?;
        if let Some(path) = &self.token_file {
            config = config.with_token_file(path.clone());
        }
        Ok(config)
    }
}

/// Wire the file store, console login and publisher for a configuration.
pub fn build_publisher(
    config: &GraphConfig,
) -> crate::error::Result<(Arc<FileTokenStore>, Publisher)> {
    let store = Arc::new(FileTokenStore::new(config.token_file.clone()));
    let flow = AuthFlow::new(
        config.auth_request()?,
        store.clone(),
        Arc::new(ConsoleSurfaceProvider),
    );
    let publisher = Publisher::new(config, store.clone(), Arc::new(flow));
    Ok((store, publisher))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_auth_login() {
        let cli = Cli::try_parse_from(["graphpub", "auth", "login"]).unwrap();
        match cli.command {
            Commands::Auth(auth) => assert!(matches!(auth.command, AuthCommands::Login)),
            other => panic!("expected Auth, got {other:?}"),
        }
    }

    #[test]
    fn parse_auth_status_with_token_file() {
        let cli =
            Cli::try_parse_from(["graphpub", "auth", "status", "--token-file", "/tmp/t"]).unwrap();
        assert_eq!(cli.token_file, Some(PathBuf::from("/tmp/t")));
        match cli.command {
            Commands::Auth(auth) => assert!(matches!(auth.command, AuthCommands::Status)),
            other => panic!("expected Auth, got {other:?}"),
        }
    }

    #[test]
    fn parse_publish_with_all_fields() {
        let cli = Cli::try_parse_from([
            "graphpub",
            "--config",
            "graphpub.toml",
            "publish",
            "-m",
            "Testing something, ignore",
            "--link",
            "http://google.com",
            "--picture",
            "http://img.test/p.png",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("graphpub.toml")));
        match cli.command {
            Commands::Publish(args) => {
                assert_eq!(args.message.as_deref(), Some("Testing something, ignore"));
                assert_eq!(args.link.as_deref(), Some("http://google.com"));
                assert_eq!(args.picture.as_deref(), Some("http://img.test/p.png"));
            }
            other => panic!("expected Publish, got {other:?}"),
        }
    }

    #[test]
    fn parse_publish_without_fields() {
        let cli = Cli::try_parse_from(["graphpub", "publish"]).unwrap();
        match cli.command {
            Commands::Publish(args) => {
                assert!(args.message.is_none());
                assert!(args.link.is_none());
                assert!(args.picture.is_none());
            }
            other => panic!("expected Publish, got {other:?}"),
        }
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["graphpub", "delete"]).is_err());
    }

    #[test]
    fn token_file_flag_overrides_config() {
        let cli =
            Cli::try_parse_from(["graphpub", "--token-file", "/tmp/flag-token", "auth", "logout"])
                .unwrap();
        let config = cli.graph_config().unwrap();
        assert_eq!(config.token_file, PathBuf::from("/tmp/flag-token"));
    }
}
