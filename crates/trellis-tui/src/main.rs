//! Trellis entry point.
//!
//! # Usage
//!
//! ```bash
//! trellis --homeserver https://matrix.org -u alice -p hunter2
//!
//! # Credentials from the environment
//! TRELLIS_HOMESERVER=https://matrix.org TRELLIS_USERNAME=alice \
//!     TRELLIS_PASSWORD=hunter2 trellis
//! ```

use clap::Parser;
use trellis_tui::{Args, logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init(&args.log_file, &args.log_level)?;

    tracing::info!(homeserver = %args.homeserver, "Trellis starting");

    Ok(trellis_tui::run(&args).await?)
}
