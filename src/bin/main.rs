use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use topicd::application::config::loader::ConfigLoader;
use topicd::application::config::models::Config;
use topicd::application::handler::{sign_session_token, RequestHandler, TopicHandler};
use topicd::application::server::ServerManager;
use topicd::application::service::{self, UserId};
use topicd::common::logger;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "topicd", version, about = "Topic CRUD endpoint for the comment service")]
struct Cli {
    /// Path to a TOML config file; built-in defaults are used when omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Tracing filter, e.g. `debug` or `topicd=trace`
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a signed session token for local testing
    IssueToken {
        #[arg(long)]
        user: String,

        #[arg(long, default_value_t = 24)]
        ttl_hours: i64,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    logger::init(&level);

    let result = match cli.command {
        Some(Command::IssueToken { user, ttl_hours }) => issue_token(&config, &user, ttl_hours),
        None => serve(config).await,
    };

    if let Err(e) = result {
        error!(error = %e, "topicd exited with an error");
        std::process::exit(1);
    }
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let service = service::connect(&config.database, &config.auth).await?;
    let handler: Arc<dyn RequestHandler> = Arc::new(TopicHandler::from_config(service, &config));

    let server = ServerManager::bind(&config, handler).await?;
    server.print_server_info();

    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "failed to listen for shutdown signal");
            }
        })
        .await?;

    info!("topicd stopped");
    Ok(())
}

/// Expiry `ttl_hours` after `now`, or an error when it is out of chrono's range
fn token_expiry(now: DateTime<Utc>, ttl_hours: i64) -> Result<DateTime<Utc>, String> {
    Duration::try_hours(ttl_hours)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| format!("--ttl-hours {} is out of range", ttl_hours))
}

fn issue_token(config: &Config, user: &str, ttl_hours: i64) -> Result<(), Box<dyn std::error::Error>> {
    let expires_at = token_expiry(Utc::now(), ttl_hours)?;
    let token = sign_session_token(&config.auth.jwt_secret, &UserId::new(user), expires_at)?;
    println!("{}", token);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_expiry() {
        let now = Utc::now();
        assert_eq!(token_expiry(now, 24).unwrap(), now + Duration::hours(24));
    }

    #[test]
    fn test_token_expiry_out_of_range() {
        let now = Utc::now();
        assert!(token_expiry(now, i64::MAX).is_err());
        assert!(token_expiry(now, 1_000_000_000_000).is_err());
    }
}
