//! `tokenctl` — issue and inspect access tokens with the configured maker.
//!
//! ```text
//! tokenctl issue <username> [duration]
//! tokenctl verify <token>
//! ```
//!
//! Settings come from `TOKEN_SCHEME`, `TOKEN_SYMMETRIC_KEY` and
//! `ACCESS_TOKEN_DURATION`.

use anyhow::{Context, Result, anyhow};
use chrono::Duration;
use clap::{Parser, Subcommand};

use simplebank_token::TokenConfig;
use simplebank_token::config::parse_duration;

#[derive(Debug, Parser)]
#[command(name = "tokenctl")]
#[command(about = "Issue and verify access tokens")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
enum Command {
    /// Issue a token for `username`
    Issue {
        username: String,

        /// Token lifetime such as `30m` or `1h`; defaults to ACCESS_TOKEN_DURATION
        #[arg(value_parser = parse_duration)]
        duration: Option<Duration>,
    },
    /// Verify a token and print its payload as JSON
    Verify { token: String },
}

fn main() -> Result<()> {
    simplebank_observability::init_with_default("warn");

    let cli = Cli::parse();

    let config = TokenConfig::from_env().context("cannot load token config")?;
    let maker = config.build_maker().context("cannot create token maker")?;

    match cli.command {
        Command::Issue { username, duration } => {
            let duration = duration.unwrap_or(config.access_token_duration);
            let token = maker
                .create_token(&username, duration)
                .context("cannot create token")?;
            println!("{token}");
        }
        Command::Verify { token } => {
            let payload = maker
                .verify_token(&token)
                .map_err(|e| anyhow!("token rejected ({}): {e}", e.kind()))?;
            tracing::info!(token_id = %payload.id, "token verified");
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        Cli::try_parse_from(std::iter::once("tokenctl").chain(args.iter().copied()))
            .map(|cli| cli.command)
    }

    #[test]
    fn parses_issue_with_and_without_duration() {
        assert_eq!(
            parse(&["issue", "alice"]).unwrap(),
            Command::Issue {
                username: "alice".to_string(),
                duration: None
            }
        );
        assert_eq!(
            parse(&["issue", "alice", "30m"]).unwrap(),
            Command::Issue {
                username: "alice".to_string(),
                duration: Some(Duration::minutes(30))
            }
        );
    }

    #[test]
    fn parses_verify() {
        assert_eq!(
            parse(&["verify", "v2.local.abc"]).unwrap(),
            Command::Verify {
                token: "v2.local.abc".to_string()
            }
        );
    }

    #[test]
    fn rejects_unknown_or_incomplete_commands() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["issue"]).is_err());
        assert!(parse(&["revoke", "token"]).is_err());
        assert!(parse(&["issue", "alice", "soon"]).is_err());
        assert!(parse(&["verify", "a", "b"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
