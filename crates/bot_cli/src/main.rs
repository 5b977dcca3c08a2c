//! Local REPL harness: drives the dialogue engine from a terminal, printing
//! every outbound response with its button payloads.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bot_core::{BotConfig, ButtonAction, GeoPoint, InboundCallback, InboundMessage, Response};
use bot_engine::{FlowEngine, MemoryUserDirectory, ResponseSink, SinkError, UserRecord};
use bot_state::{spawn_expiry_sweeper, FileStateStore, MemoryStateStore, StateStore};

#[derive(Parser)]
#[command(name = "lostfound-bot")]
#[command(about = "Local harness for the lost & found dialogue engine")]
#[command(version)]
struct Cli {
    /// Platform user id to impersonate
    #[arg(long, default_value = "local")]
    user: String,

    /// Persist dialogue state as JSON files under this directory
    #[arg(long)]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive dialogue session
    Chat,
}

/// Prints responses to the terminal instead of a chat platform.
struct ConsoleSink;

#[async_trait]
impl ResponseSink for ConsoleSink {
    async fn send(&self, _user: &UserRecord, response: Response) -> Result<(), SinkError> {
        println!("{}", response.text.bold());
        if let Some(keyboard) = &response.keyboard {
            for row in keyboard {
                for button in row {
                    match &button.action {
                        ButtonAction::Callback(payload) => println!(
                            "  [{}] {}",
                            button.label.cyan(),
                            format!("/cb {payload}").dimmed()
                        ),
                        ButtonAction::Url(url) => {
                            println!("  [{}] {}", button.label.cyan(), url.dimmed())
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_target(true))
        .init();

    let cli = Cli::parse();
    let mut config = BotConfig::new();
    if cli.state_dir.is_some() {
        config.state_dir = cli.state_dir.clone();
    }

    match cli.command {
        Commands::Chat => match config.state_dir.clone() {
            Some(dir) => {
                tracing::info!(state_dir = %dir.display(), "using file state store");
                run_chat(Arc::new(FileStateStore::new(dir)), config, cli.user).await
            }
            None => run_chat(Arc::new(MemoryStateStore::new()), config, cli.user).await,
        },
    }
}

async fn run_chat<S: StateStore + 'static>(
    store: Arc<S>,
    config: BotConfig,
    platform_user: String,
) -> anyhow::Result<()> {
    let sweeper = spawn_expiry_sweeper(store.clone(), config.state_ttl(), config.sweep_interval());
    let engine = FlowEngine::new(
        store,
        Arc::new(MemoryUserDirectory::new()),
        Arc::new(ConsoleSink),
        config,
    );

    println!(
        "{}",
        "Интерактивная сессия. /cb <payload> — нажать кнопку, /loc <широта> <долгота> — геопозиция, /quit — выход."
            .dimmed()
    );

    loop {
        print!("{} ", ">".green());
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end().to_string();
        if line == "/quit" {
            break;
        }

        let result = if let Some(payload) = line.strip_prefix("/cb ") {
            engine
                .handle_callback(InboundCallback {
                    platform_user_id: platform_user.clone(),
                    payload: payload.trim().to_string(),
                })
                .await
        } else if let Some(rest) = line.strip_prefix("/loc ") {
            match parse_location(rest) {
                Some(location) => {
                    engine
                        .handle_message(InboundMessage {
                            platform_user_id: platform_user.clone(),
                            text: String::new(),
                            location: Some(location),
                        })
                        .await
                }
                None => {
                    eprintln!("{}", "Использование: /loc <широта> <долгота>".red());
                    continue;
                }
            }
        } else {
            engine
                .handle_message(InboundMessage {
                    platform_user_id: platform_user.clone(),
                    text: line,
                    location: None,
                })
                .await
        };

        if let Err(error) = result {
            tracing::error!(%error, "event handling failed");
        }
    }

    sweeper.abort();
    Ok(())
}

fn parse_location(rest: &str) -> Option<GeoPoint> {
    let mut parts = rest.split_whitespace();
    let latitude = parts.next()?.parse().ok()?;
    let longitude = parts.next()?.parse().ok()?;
    Some(GeoPoint::new(latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location() {
        let point = parse_location("55.751 37.618").unwrap();
        assert_eq!(point.latitude, 55.751);
        assert_eq!(point.longitude, 37.618);

        assert!(parse_location("55.751").is_none());
        assert!(parse_location("abc def").is_none());
    }
}
