//! Web server command.

use console::style;

use crate::config::Settings;
use crate::server::{self, AppState};

/// Start the web server.
pub async fn cmd_serve(settings: &Settings) -> anyhow::Result<()> {
    println!(
        "{} Starting enrich-snippet server at http://{}",
        style("→").cyan(),
        settings.bind_address()
    );
    println!("  Press Ctrl+C to stop");

    server::serve(settings, AppState::default()).await
}
