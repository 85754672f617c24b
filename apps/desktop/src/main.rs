use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use clap::Parser;
use client_core::StatusClient;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod settings;
mod view;

use commands::{Command, HELP};
use settings::load_client_settings;

#[derive(Parser, Debug)]
struct Args {
    /// Backend base URL; overrides the settings file and environment.
    #[arg(long)]
    api_base_url: Option<String>,
    #[arg(long, default_value = "client.toml")]
    config: PathBuf,
    #[arg(long)]
    greeting_delay_ms: Option<u64>,
    /// Print the state once the startup greeting has been fetched, then exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_client_settings(&args.config, args.api_base_url, args.greeting_delay_ms)?;
    let client = StatusClient::new(&settings)?;
    info!(api_base_url = %client.api_base_url(), "starting status client");

    println!("{}\n", view::header());
    client.activate().await;

    if args.once {
        while client.deferred_fetch_pending() {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        println!("{}", view::render(&client.snapshot()));
        client.deactivate();
        return Ok(());
    }

    println!("{}\n{HELP}", view::render(&client.snapshot()));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(commands::CommandParseError::Empty) => continue,
            Err(err) => {
                warn!(input = %line, "unrecognized command");
                println!("{err}");
                continue;
            }
        };

        match command {
            Command::NextMessage => println!("{}", client.advance_message()),
            Command::Increment => println!("counter: {}", client.increment()),
            Command::Decrement => println!("counter: {}", client.decrement()),
            Command::Reset => {
                client.reset();
                println!("counter: {}", client.counter());
            }
            Command::SetName(name) => client.set_user_name(name),
            Command::Fetch => {
                client.fetch_greeting_for_user().await;
                println!("{}", view::render(&client.snapshot()));
            }
            Command::Health => {
                client.check_health().await;
                println!("backend: {}", client.status());
            }
            Command::Show => println!("{}", view::render(&client.snapshot())),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    client.deactivate();
    Ok(())
}
