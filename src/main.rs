//! Toad service binary.
//!
//! ```text
//! toad                      serve HTTP on --port (default 8080)
//! toad --get health         one-shot health check, non-zero exit when not ok
//! toad --get release        print version, commit, and build date
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tokio::net::TcpListener;

use toad::config::load_config;
use toad::http::HttpServer;
use toad::lifecycle::{signals, startup, Shutdown};
use toad::observability::{logging, metrics};
use toad::release::Release;
use toad::state::{check_health, HealthOutcome};

#[derive(Parser)]
#[command(name = "toad")]
#[command(about = "Fleet health and maintenance-mode coordinator", long_about = None)]
struct Cli {
    /// HTTP listen port [default: 8080, or listener.port from --config].
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    port: Option<u16>,

    /// Run a one-shot command instead of serving.
    #[arg(long, value_enum)]
    get: Option<Get>,

    /// Optional TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Get {
    /// Check health once and exit.
    Health,
    /// Print release information and exit.
    Release,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(Get::Release) = cli.get {
        println!("{}", Release::current());
        return Ok(());
    }

    let mut config = load_config(cli.config.as_deref(), |key| std::env::var(key).ok())?;
    if let Some(port) = cli.port {
        config.listener.port = port;
    }

    logging::init_logging(&config.observability);

    let state = startup::build_state(&config)?;

    if let Some(Get::Health) = cli.get {
        return match check_health(&state.mode, &state.coordinator).await {
            HealthOutcome::Ok => {
                println!("i am ok");
                Ok(())
            }
            HealthOutcome::Down => Err("I am not ok".into()),
            HealthOutcome::Unavailable(reason) => Err(reason.into()),
        };
    }

    tracing::info!(release = %state.release, "toad starting");
    tracing::info!(
        bind_address = %config.bind_address(),
        store_host = %config.store.host,
        store_port = config.store.port,
        mode_env_var = %config.mode.env_var,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(config.bind_address()).await?;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config, state);
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        result = &mut server_task => result??,
        _ = signals::wait_for_signal() => {
            shutdown.trigger();
            server_task.await??;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
