//! Elevator simulation server.
//!
//! Starts the elevator, serves the HTTP API until Ctrl-C, then stops the
//! elevator (joining the mover and discarding anyone still riding).
//!
//! # Environment
//!
//! - `RUST_LOG`: log filter (default `rs_elevator=info`)
//! - `ELEVATOR_PORT`: HTTP port (default 8080)
//! - `ELEVATOR_STEP_MS`: loading and per-floor travel time (default 2000)
//!
//! # Run
//!
//! ```bash
//! cargo run --features web --bin elevator_server
//! curl -X POST localhost:8080/api/request \
//!     -d '{"start_floor": 1, "dest_floor": 4, "category": 0}'
//! curl localhost:8080/api/status/text
//! ```

use std::sync::Arc;

use anyhow::Context;
use rs_elevator::services::{run_server_with_state, WebServerConfig};
use rs_elevator::{Config, Elevator, ElevatorConfig, WebConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn env_number<T: std::str::FromStr>(name: &str) -> anyhow::Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .with_context(|| format!("{name} must be a number, got {value:?}")),
        Err(_) => Ok(None),
    }
}

fn load_config() -> anyhow::Result<Config> {
    let mut elevator = ElevatorConfig::default();
    if let Some(ms) = env_number::<u64>("ELEVATOR_STEP_MS")? {
        elevator = elevator.with_uniform_delay_ms(ms);
    }

    let mut web = WebConfig::default();
    if let Some(port) = env_number::<u16>("ELEVATOR_PORT")? {
        web = web.with_port(port);
    }

    Ok(Config::default().with_elevator(elevator).with_web(web))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rs_elevator=info")),
        )
        .init();

    let config = load_config()?;
    let elevator = Arc::new(Elevator::new(config.elevator.clone()));
    elevator
        .start()
        .context("failed to start the elevator")?;

    if config.web.enabled {
        run_server_with_state(
            Arc::clone(&elevator),
            WebServerConfig::from_config(&config.web),
            shutdown_signal(),
        )
        .await
        .context("web server failed")?;
    } else {
        info!("web server disabled; running until Ctrl-C");
        shutdown_signal().await;
    }

    let task = Arc::clone(&elevator);
    let stats = tokio::task::spawn_blocking(move || task.stop()).await?;
    info!(?stats, "shut down");
    print!("{}", elevator.status());
    Ok(())
}
