//! httpwatch - watch a command from the browser.
//!
//! Usage:
//!   httpwatch [-n SECONDS] [-t] [-c] [--address ADDR] [--] command ...

use clap::Parser;
use httpwatch::config::{DEFAULT_ADDRESS, SHUTDOWN_GRACE_PERIOD, parse_interval};
use httpwatch::{ApiState, Executor, Renderer, WatchConfig, WatchState, start_server};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// httpwatch - execute a program periodically, showing output in the browser
#[derive(Parser)]
#[command(name = "httpwatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Update interval. Values below 0.1s are raised to 0.1s.
    #[arg(
        short = 'n',
        long,
        env = "WATCH_INTERVAL",
        default_value = "2",
        value_parser = parse_interval
    )]
    interval: Duration,

    /// Turn off the header showing the interval, command, and current time.
    #[arg(short = 't', long)]
    no_title: bool,

    /// Interpret ANSI color and style sequences.
    #[arg(short = 'c', long)]
    color: bool,

    /// Address to serve the output of the command to.
    #[arg(long, default_value = DEFAULT_ADDRESS)]
    address: String,

    /// Command to run, optionally after `--`.
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    command: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let config = WatchConfig::builder(cli.command)
        .interval(cli.interval)
        .no_title(cli.no_title)
        .color(cli.color)
        .address(cli.address)
        .build()
        .inspect_err(|e| error!("{}", e))?;

    let renderer = Renderer::new().inspect_err(|e| error!("Failed to load templates: {}", e))?;

    run(config, renderer).await
}

/// Run the executor and the HTTP server until Ctrl+C.
async fn run(config: WatchConfig, renderer: Renderer) -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(config);
    let state = Arc::new(WatchState::new(Arc::clone(&config)));
    let shutdown = CancellationToken::new();

    let (executor, executor_task) = Executor::new(Arc::clone(&state))
        .with_cancellation(shutdown.child_token())
        .start();

    let api_state = ApiState::new(Arc::clone(&state), Arc::new(renderer));
    let server = match start_server(config.address(), api_state, shutdown.child_token()).await {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to listen on {}: {}", config.address(), e);
            executor.shutdown();
            return Err(e.into());
        }
    };

    info!("Watching '{}' every {:?}", config.command(), config.interval());
    info!("Press Ctrl+C to stop");

    tokio::signal::ctrl_c().await?;
    info!("Shutting down...");
    shutdown.cancel();

    match tokio::time::timeout(SHUTDOWN_GRACE_PERIOD, server.task).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("HTTP server task failed: {}", e),
        Err(_) => {
            error!(
                "HTTP server did not shut down within {:?}",
                SHUTDOWN_GRACE_PERIOD
            );
            return Err("graceful shutdown timed out".into());
        }
    }

    if let Err(e) = executor_task.await {
        error!("Executor task failed: {}", e);
    }

    info!("Goodbye!");
    Ok(())
}
