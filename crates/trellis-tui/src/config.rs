//! Command-line configuration.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use trellis_app::SyncConfig;
use trellis_client::transport::Credentials;

/// Trellis terminal Matrix client
#[derive(Parser, Debug, Clone)]
#[command(name = "trellis")]
#[command(about = "Terminal client for Matrix chat rooms")]
#[command(version)]
pub struct Args {
    /// Homeserver base URL (e.g. https://matrix.org)
    #[arg(long, env = "TRELLIS_HOMESERVER")]
    pub homeserver: String,

    /// Matrix user name (localpart or full user id)
    #[arg(short, long, env = "TRELLIS_USERNAME")]
    pub username: String,

    /// Account password
    #[arg(short, long, env = "TRELLIS_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// File to write logs to; the terminal is owned by the UI
    #[arg(long, default_value = "trellis.log")]
    pub log_file: PathBuf,

    /// Log level (trace, debug, info, warn, error), overridden by `RUST_LOG`
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Server-side long-poll timeout for each sync request, in milliseconds
    #[arg(long, default_value = "30000")]
    pub sync_timeout_ms: u64,

    /// Delay before the first sync retry, in milliseconds
    #[arg(long, default_value = "1000")]
    pub initial_backoff_ms: u64,

    /// Upper bound on the sync retry delay, in milliseconds
    #[arg(long, default_value = "30000")]
    pub max_backoff_ms: u64,
}

impl Args {
    /// Login credentials.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            homeserver: self.homeserver.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    /// Sync retry policy.
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
        }
    }

    /// Long-poll timeout.
    pub fn sync_timeout(&self) -> Duration {
        Duration::from_millis(self.sync_timeout_ms)
    }
}
