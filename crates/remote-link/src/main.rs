//! Remote-link: console host for the remote control bridge.
//!
//! Lines starting with `:` control the host (`:link on|off`, `:load <id>`,
//! `:resume`, `:status`, `:quit`). Any other line is a JSON command from the
//! remote peer, e.g. `{"type":"seek","position_ms":42000}`. Reports to the
//! remote peer are written to stdout; logs go to stderr.

mod app;
mod config;
mod console_channel;
mod console_command;
mod console_messages;
mod console_player;
mod error;

pub(crate) use {
    app::App,
    console_channel::ConsoleChannel,
    console_command::ConsoleCommand,
    console_messages::ConsoleMessages,
    console_player::ConsolePlayer,
    error::{AppError, Result as AppResult},
};

use crate::config::Config;

use std::{sync::Arc, time::Duration};

use remote_link_core::{LinkState, SessionBridge};
use tokio::sync::{broadcast, mpsc};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "remote_link=debug,remote_link_core=debug";

/// Payloads buffered per remote subscription before it lags.
const REMOTE_BUFFER: usize = 64;

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = match Config::config_path() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to locate config: {:?}", e);
            std::process::exit(1);
        }
    };

    let config = match Config::load_from(&config_path) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    rt.block_on(async {
        let link = LinkState::new(config.device_link.enabled);
        let (lifecycle_tx, lifecycle_rx) = mpsc::channel(32);
        let (remote_tx, _) = broadcast::channel(REMOTE_BUFFER);

        let channel = Arc::new(ConsoleChannel::new(remote_tx.clone()));
        let player = Arc::new(ConsolePlayer::new(
            config.player.default_duration_ms,
            lifecycle_tx.clone(),
        ));
        let messages = Arc::new(ConsoleMessages);

        let bridge = SessionBridge::new(
            &link,
            channel,
            player.clone(),
            player.clone(),
            messages.clone(),
        );

        let app = App {
            config,
            config_path,
            link,
            player,
            messages,
            lifecycle_tx,
            remote_tx,
        };

        tokio::join!(bridge.run(lifecycle_rx), async {
            if let Err(e) = app.run().await {
                error!(error = ?e, "App error");
            }
        });
    });

    // The stdin reader may still be parked in a blocking read.
    rt.shutdown_timeout(Duration::from_secs(1));
}
