mod chat;
mod hangman;
mod portfolio;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use parlor_agents::{load_catalog, ChatAgent};
use parlor_core::config::{DEFAULT_NAME_PROMPT_CHANCE, DEFAULT_PERSONALIZE_AFTER};
use parlor_core::{ChatConfig, RandomPicker};
use parlor_observability::{init_tracing, ChatMetrics, LogFormat};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "parlor")]
#[command(about = "Console chat companion, hangman and portfolio tracker")]
struct Cli {
    #[arg(long, global = true, env = "PARLOR_LOG_FORMAT", default_value = "json")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Chat {
        /// Assistant name; asked for interactively when absent.
        #[arg(long, env = "PARLOR_ASSISTANT_NAME")]
        name: Option<String>,
        /// JSON intent catalog replacing the built-in one.
        #[arg(long, env = "PARLOR_CATALOG")]
        catalog: Option<PathBuf>,
        #[arg(long, env = "PARLOR_SEED")]
        seed: Option<u64>,
        #[arg(
            long,
            env = "PARLOR_PERSONALIZE_AFTER",
            default_value_t = DEFAULT_PERSONALIZE_AFTER
        )]
        personalize_after: u32,
        #[arg(
            long,
            env = "PARLOR_NAME_PROMPT_CHANCE",
            default_value_t = DEFAULT_NAME_PROMPT_CHANCE,
            value_parser = parse_probability
        )]
        name_prompt_chance: f64,
    },
    Hangman {
        #[arg(long, env = "PARLOR_SEED")]
        seed: Option<u64>,
    },
    Portfolio,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing("parlor_cli", cli.log_format);

    match cli.command {
        Command::Chat {
            name,
            catalog,
            seed,
            personalize_after,
            name_prompt_chance,
        } => {
            let catalog = Arc::new(load_catalog(catalog.as_deref())?);
            let mut lines = chat::spawn_line_reader();

            let name = match name {
                Some(name) => Some(name),
                None => chat::ask_assistant_name(&mut lines).await?,
            };

            let config = ChatConfig {
                personalize_after,
                name_prompt_chance,
                ..ChatConfig::default()
            }
            .with_assistant_name(name.as_deref());

            let agent = ChatAgent::new(
                catalog,
                config,
                Box::new(RandomPicker::from_seed_option(seed)),
                ChatMetrics::shared(),
            );

            let session = chat::run_chat(agent, lines).await?;
            info!(
                session_id = %session.session_id(),
                turns = session.turns(),
                "chat finished"
            );
        }
        Command::Hangman { seed } => {
            hangman::run_hangman(&mut RandomPicker::from_seed_option(seed))?;
        }
        Command::Portfolio => portfolio::run_portfolio()?,
    }

    Ok(())
}

fn parse_probability(value: &str) -> Result<f64, String> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if (0.0..=1.0).contains(&parsed) {
        Ok(parsed)
    } else {
        Err(format!("`{value}` must be between 0 and 1"))
    }
}
