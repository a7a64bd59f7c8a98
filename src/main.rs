//! CMS Console - a terminal administration client for a CMS REST API.
//!
//! Provides a small command surface over the admin endpoints: session
//! management (login/logout/whoami/status), content listings, and docs
//! route resolution. The session credential is persisted locally and
//! attached to requests as a bearer token.

mod api;
mod app;
mod auth;
mod config;
mod models;
mod nav;
mod notify;
mod utils;

use std::io;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn print_usage() {
    eprintln!("Usage: cms-console <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  login [username]   Authenticate and store a session token");
    eprintln!("  logout             Clear the stored session");
    eprintln!("  whoami             Show the claims in the stored token");
    eprintln!("  profile            Fetch the logged-in profile from the server");
    eprintln!("  status             Show endpoint and session state");
    eprintln!("  posts              List posts");
    eprintln!("  pages              List pages");
    eprintln!("  publish <id>       Publish a draft post");
    eprintln!("  docs [path]        Resolve the docs redirect for a path");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    info!("CMS console starting");

    let args: Vec<String> = std::env::args().collect();
    let mut app = App::new()?;

    let result = match args.get(1).map(String::as_str) {
        Some("login") => app.login(args.get(2).cloned()).await,
        Some("logout") => app.logout(),
        Some("whoami") => app.whoami(),
        Some("profile") => app.profile().await,
        Some("status") => app.status(),
        Some("posts") => app.posts().await,
        Some("pages") => app.pages().await,
        Some("publish") => app.publish(args.get(2).cloned()).await,
        Some("docs") => app.docs(args.get(2).cloned()),
        _ => {
            print_usage();
            Ok(())
        }
    };

    app.flush_notifications();
    result
}
