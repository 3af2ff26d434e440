mod client;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client::DaemonClient;
use shared::ipc::{Command, Response};

#[derive(Parser)]
#[command(name = "lipika")]
#[command(about = "CLI front-end for the lipikad transliteration daemon")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Push the full editor text after an edit
    Text {
        /// The complete text of the editing surface
        text: Vec<String>,
    },
    /// Select the active transliteration model
    Model {
        /// Model to activate: 1/a or 2/b
        model: String,
    },
    /// Print the current buffer
    Buffer,
    /// Show daemon status
    Status,
    /// Clear the buffer and cancel pending work
    Reset,
}

fn parse_model(input: &str) -> Result<u32> {
    match input.to_ascii_lowercase().as_str() {
        "a" => Ok(1),
        "b" => Ok(2),
        other => other
            .parse::<u32>()
            .map_err(|_| anyhow::anyhow!("Unknown model '{}', expected 1/a or 2/b", input)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = DaemonClient::new();

    let command = match cli.command {
        Commands::Text { text } => Command::TextChanged(text.join(" ")),
        Commands::Model { model } => Command::SelectModel(parse_model(&model)?),
        Commands::Buffer => Command::Buffer,
        Commands::Status => Command::Status,
        Commands::Reset => Command::Reset,
    };

    match client.send_command(command).await {
        Ok(Response::Ok) => {
            println!("Success");
        }
        Ok(Response::Buffer(text)) => {
            println!("{}", text);
        }
        Ok(Response::Status(info)) => {
            println!("Status:");
            println!("  Running: {}", info.is_running);
            println!("  Active model: {}", info.active_model);
            if let Some(notice) = info.notice {
                println!("  Notice: {}", notice);
            }
            println!("  Debounce armed: {}", info.debounce_armed);
            if let Some(word) = info.last_accepted {
                println!("  Last accepted: {}", word);
            }
        }
        Ok(Response::Error(msg)) => {
            eprintln!("Error: {}", msg);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to connect to lipikad: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
