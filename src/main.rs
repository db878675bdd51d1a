// Maître d' - Admin console for the restaurant reservation platform
//
// The console talks to the platform's admin REST API and renders the result
// in a terminal interface.
//
// Architecture:
// - API client (reqwest): Typed wrappers over the admin endpoints
// - Worker (tokio): Runs API calls off the render loop, one task per command
// - TUI (ratatui): Screens for the dashboard, members, restaurants,
//   reservations, reviews and reports
// - Session: JWT handed over from the browser login page, validated lazily
//   by the first authenticated response
// - Event system: mpsc channels connect the render loop and the worker

mod api;
mod cli;
mod config;
mod logging;
mod session;
mod state;
mod tui;
mod util;
mod worker;

use anyhow::{Context, Result};
use api::ApiClient;
use config::Config;
use logging::LogRing;
use session::Session;

#[tokio::main]
async fn main() -> Result<()> {
    // Subcommands (config --show and friends) handle themselves and exit
    let Some(cli) = cli::handle_cli() else {
        return Ok(());
    };

    // Drop a commented config template on first run, then load the real
    // thing; enable_tui decides between console and headless below
    Config::ensure_config_exists();
    let config = Config::from_env();

    // Log events land here in TUI mode; the logs panel reads them each frame.
    // The guard keeps the optional file layer flushing until exit.
    let log_buffer = LogRing::new();
    let _file_guard = logging::init_tracing(&config, &log_buffer);

    // Resolve the admin session: --token flag first, then the session file.
    // Without a token there is nothing the console can show.
    let Some(session) = session::establish(cli.token) else {
        eprintln!("No admin session.");
        eprintln!();
        eprintln!("Log in at {} and relaunch with the command", config.login_url);
        eprintln!("shown after login:");
        eprintln!();
        eprintln!("    maitred --token <jwt>");
        std::process::exit(1);
    };

    let client =
        ApiClient::new(&config.api_url, session.token()).context("Failed to create API client")?;

    if config.enable_tui {
        // Commands go in, outcomes come back; the console blocks the main
        // task until the operator quits
        let (command_tx, outcome_rx) = worker::spawn(client);

        tracing::info!("Starting the console");
        if let Err(e) = tui::run_tui(outcome_rx, command_tx, log_buffer, config, session).await {
            tracing::error!("Console error: {:?}", e);
        }
    } else {
        tracing::info!("TUI disabled, running headless session check");
        run_headless(&client, session).await?;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// One authenticated round trip: verifies the token and prints the platform
/// counters. Used by cron checks and MAITRED_NO_TUI=1 runs.
async fn run_headless(client: &ApiClient, mut session: Session) -> Result<()> {
    match client.dashboard_counts().await {
        Ok(counts) => {
            session.observe_status(200);
            println!("session: {}", session.status().as_str());
            println!("restaurants:  {}", counts.restaurants);
            println!("reservations: {}", counts.reservations);
            println!("reviews:      {}", counts.reviews);
            println!("members:      {}", counts.users);
            Ok(())
        }
        Err(e) => {
            if e.is_auth_failure() {
                eprintln!("session: invalid (token rejected, log in again)");
                std::process::exit(1);
            }
            Err(e).context("Dashboard request failed")
        }
    }
}
