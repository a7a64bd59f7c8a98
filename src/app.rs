//! Command layer for the console.
//!
//! This module contains the `App` struct that wires the configuration,
//! token store, API client, and notification queue together, and
//! implements each console command. Network and decode failures are
//! surfaced here as severity-tagged notifications; hard I/O errors
//! propagate out as `anyhow` errors.

use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::{ApiClient, ApiError};
use crate::auth::{self, TokenStore};
use crate::config::Config;
use crate::nav::RedirectRule;
use crate::notify::{Notifier, Severity};
use crate::utils::{format_unix_timestamp, truncate_string};

/// Column width for post/page titles in listings
const TITLE_COLUMN_WIDTH: usize = 48;

pub struct App {
    pub config: Config,
    store: TokenStore,
    client: ApiClient,
    notifier: Notifier,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        let store = TokenStore::new(config.cache_dir()?, config.secure_transport());
        let client = ApiClient::new(config.base_url.clone(), store.clone())?;

        Ok(Self {
            config,
            store,
            client,
            notifier: Notifier::new(),
        })
    }

    /// Authenticate and persist the issued credential.
    pub async fn login(&mut self, username: Option<String>) -> Result<()> {
        let username = match username {
            Some(u) => u,
            None => self.prompt_username()?,
        };
        let password = rpassword::prompt_password("Password: ")?;

        match self.client.login(&username, &password).await {
            Ok(token) => {
                self.store.write(&token)?;
                self.config.last_username = Some(username.clone());
                self.config.save()?;
                info!(username = %username, "Login succeeded");
                self.notifier
                    .notify(format!("Logged in as {}", username), Severity::Success);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Login failed");
                self.notifier
                    .notify("Login failed - check username and password", Severity::Error);
                Err(e)
            }
        }
    }

    /// Destroy the persisted session.
    pub fn logout(&mut self) -> Result<()> {
        self.store.clear()?;
        self.notifier.notify("Session cleared", Severity::Info);
        Ok(())
    }

    /// Show the claims embedded in the current credential.
    /// Claims are decoded, not verified; this is display material only.
    pub fn whoami(&mut self) -> Result<()> {
        let token = match self.store.read() {
            Some(token) => token,
            None => {
                self.notifier
                    .notify("No active session - run `cms-console login`", Severity::Warning);
                return Ok(());
            }
        };

        match auth::decode(&token) {
            Ok(identity) => {
                if let Some(sub) = auth::claims::subject(&identity) {
                    println!("Subject: {}", sub);
                }
                for (name, value) in &identity {
                    if name == "sub" {
                        continue;
                    }
                    match (name.as_str(), value.as_i64()) {
                        ("exp", Some(secs)) | ("iat", Some(secs)) | ("nbf", Some(secs)) => {
                            println!("{:>8}: {}", name, format_unix_timestamp(secs));
                        }
                        _ => println!("{:>8}: {}", name, value),
                    }
                }
                Ok(())
            }
            Err(e) => {
                // Treat identity as absent; the stored credential is unusable
                self.notifier
                    .notify(format!("Stored credential is unreadable: {}", e), Severity::Error);
                Ok(())
            }
        }
    }

    /// Show the endpoint and session state.
    pub fn status(&mut self) -> Result<()> {
        println!("Endpoint: {}", self.config.base_url);
        println!(
            "Transport: {}",
            if self.config.secure_transport() { "secure" } else { "plain http" }
        );
        match self.store.read() {
            Some(_) => println!("Session: active"),
            None => println!("Session: none"),
        }
        Ok(())
    }

    /// List posts via the admin API.
    pub async fn posts(&mut self) -> Result<()> {
        match self.client.list_posts().await {
            Ok(posts) => {
                if posts.is_empty() {
                    println!("No posts.");
                    return Ok(());
                }
                for post in &posts {
                    println!(
                        "{:>6}  {:<width$}  {}",
                        post.id,
                        truncate_string(&post.title, TITLE_COLUMN_WIDTH),
                        if post.is_published() { "published" } else { "draft" },
                        width = TITLE_COLUMN_WIDTH,
                    );
                }
                Ok(())
            }
            Err(e) => self.report_api_error(e),
        }
    }

    /// List pages via the admin API.
    pub async fn pages(&mut self) -> Result<()> {
        match self.client.list_pages().await {
            Ok(pages) => {
                for page in &pages {
                    println!(
                        "{:>6}  {:<width$}  /{}",
                        page.id,
                        truncate_string(&page.title, TITLE_COLUMN_WIDTH),
                        page.slug,
                        width = TITLE_COLUMN_WIDTH,
                    );
                }
                Ok(())
            }
            Err(e) => self.report_api_error(e),
        }
    }

    /// Show who the server says we are (round-trip, unlike `whoami`).
    pub async fn profile(&mut self) -> Result<()> {
        match self.client.fetch_profile().await {
            Ok(profile) => {
                println!("{} ({})", profile.shown_name(), profile.username);
                if let Some(ref email) = profile.email {
                    println!("Email: {}", email);
                }
                if let Some(ref role) = profile.role {
                    println!("Role: {}", role);
                }
                Ok(())
            }
            Err(e) => self.report_api_error(e),
        }
    }

    /// Publish a draft post by id.
    pub async fn publish(&mut self, id_arg: Option<String>) -> Result<()> {
        let id: i64 = id_arg
            .context("Usage: cms-console publish <id>")?
            .parse()
            .context("Post id must be a number")?;

        match self.client.publish_post(id).await {
            Ok(post) => {
                self.notifier
                    .notify(format!("Published \"{}\"", post.title), Severity::Success);
                Ok(())
            }
            Err(e) => self.report_api_error(e),
        }
    }

    /// Resolve the docs redirect for a requested path and print the URL.
    pub fn docs(&mut self, path: Option<String>) -> Result<()> {
        let current = path.unwrap_or_else(|| "/".to_string());

        match resolve_docs_route(&self.config, &current) {
            Some(resolved) => {
                println!("{}{}", self.config.base_url, resolved);
                Ok(())
            }
            None => {
                self.notifier
                    .notify(format!("No docs route for {}", current), Severity::Warning);
                Ok(())
            }
        }
    }

    /// Surface an API failure as a notification. A 401 does not clear the
    /// session; re-authentication stays an explicit user action.
    fn report_api_error(&mut self, e: anyhow::Error) -> Result<()> {
        match e.downcast_ref::<ApiError>() {
            Some(ApiError::Unauthorized) => {
                self.notifier.notify(
                    "Session rejected by server - run `cms-console login`",
                    Severity::Error,
                );
                Ok(())
            }
            Some(ApiError::RateLimited) => {
                self.notifier
                    .notify("Rate limited - try again shortly", Severity::Warning);
                Ok(())
            }
            _ => Err(e),
        }
    }

    /// Flush pending notifications to stderr with their severity tag.
    pub fn flush_notifications(&mut self) {
        for n in self.notifier.drain() {
            eprintln!("[{}] {}", n.severity.tag(), n.message);
        }
    }

    fn prompt_username(&self) -> Result<String> {
        match self.config.last_username {
            Some(ref last) => print!("Username [{}]: ", last),
            None => print!("Username: "),
        }
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            self.config
                .last_username
                .clone()
                .ok_or_else(|| anyhow::anyhow!("Username is required"))
        } else {
            Ok(input.to_string())
        }
    }
}

/// Build the redirect rule from config and evaluate it against the
/// requested path. A configured `docs_source` restricts the redirect to
/// that path; the target falls back to the fixed docs index.
fn resolve_docs_route(config: &Config, current_path: &str) -> Option<String> {
    let target = config
        .docs_target
        .clone()
        .unwrap_or_else(|| "/guides/index.html".to_string());

    let mut rule = RedirectRule::new(config.docs_source.clone(), target);
    rule.evaluate(current_path, &config.site_base)
}
