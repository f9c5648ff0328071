use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "toadctl")]
#[command(about = "Operator CLI for a running toad instance", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the health verdict
    Health,
    /// Show status, host, and release
    Status,
    /// Advance the generation counter
    Change,
    /// Reset the generation counter to 1
    Reset,
    /// Mark the instance's host as up
    HostUp,
    /// Mark the instance's host as down
    HostDown,
    /// Mark every host as up
    AllUp,
    /// Mark every host as down
    AllDown,
}

impl Commands {
    fn path(&self) -> &'static str {
        match self {
            Commands::Health => "/_health",
            Commands::Status => "/",
            Commands::Change => "/do/change",
            Commands::Reset => "/do/reset",
            Commands::HostUp => "/do/host_up",
            Commands::HostDown => "/do/host_down",
            Commands::AllUp => "/do/all_up",
            Commands::AllDown => "/do/all_down",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let url = format!("{}{}", cli.url.trim_end_matches('/'), cli.command.path());
    let res = client.get(url).send().await?;

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    let body = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if !status.is_success() {
        eprintln!("Error: toad returned status {}", status);
        eprintln!("Response: {}", body);
        return Err(format!("request failed with status {}", status).into());
    }

    println!("{}", body);
    Ok(())
}
