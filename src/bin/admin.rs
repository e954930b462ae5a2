//! CLI administration tool for linkgate.
//!
//! Checks the apps file, generates API keys, and inspects the link store
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Validate the apps file and list configured apps
//! cargo run --bin admin -- apps check
//!
//! # Generate an API key and a ready-to-paste [[apps]] entry
//! cargo run --bin admin -- apps keygen --name marketing --domain go.example.com
//!
//! # Show where a short link points and how long it lives
//! cargo run --bin admin -- link inspect go.example.com promo
//!
//! # Check store connectivity
//! cargo run --bin admin -- store ping
//! ```
//!
//! # Environment Variables
//!
//! - `APPS_CONFIG`: apps file path (default: `apps.toml`)
//! - `REDIS_URL` or `REDIS_HOST`/`REDIS_PORT`/`REDIS_PASSWORD`/`REDIS_DB`:
//!   required by `link` and `store` commands

use linkgate::config::{self, Config, mask_api_key, mask_connection_string};
use linkgate::domain::entities::{AppConfig, LinkKey};
use linkgate::domain::repositories::{KeyTtl, LinkRepository};
use linkgate::server::connect_store;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use std::sync::Arc;

/// CLI tool for managing linkgate.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Apps file operations
    Apps {
        #[command(subcommand)]
        action: AppsAction,
    },

    /// Inspect stored links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Store operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

/// Apps file subcommands.
#[derive(Subcommand)]
enum AppsAction {
    /// Load and validate the apps file
    Check {
        /// Apps file path (defaults to APPS_CONFIG or apps.toml)
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Generate a new API key and print an [[apps]] entry
    Keygen {
        /// App name
        #[arg(short, long)]
        name: Option<String>,

        /// Allowed domain, repeatable; the first one is the default
        #[arg(short, long = "domain")]
        domains: Vec<String>,

        /// Skip interactive prompts
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Show the stored URL and remaining lifetime of a link
    Inspect {
        /// Domain the link was created under
        domain: String,
        /// Slug of the link
        slug: String,
    },
}

/// Store subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// Check store connection
    Ping,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Apps { action } => handle_apps_action(action)?,
        Commands::Link { action } => handle_link_action(action).await?,
        Commands::Store { action } => handle_store_action(action).await?,
    }

    Ok(())
}

/// Dispatches apps file commands.
fn handle_apps_action(action: AppsAction) -> Result<()> {
    match action {
        AppsAction::Check { file } => {
            let path = file
                .or_else(|| std::env::var("APPS_CONFIG").ok())
                .unwrap_or_else(|| "apps.toml".to_string());
            check_apps(&path)
        }
        AppsAction::Keygen { name, domains, yes } => keygen(name, domains, yes),
    }
}

/// Validates the apps file and prints a table of apps.
///
/// # Output Format
///
/// ```text
/// 📋 Apps (apps.toml)
///
///   Name                 Key          Status     Domains
///   ───────────────────────────────────────────────────────────────────
///   public               -            ENABLED    localhost
///   marketing            aB3x***      ENABLED    go.example.com, s.example.com
/// ```
fn check_apps(path: &str) -> Result<()> {
    println!("{}", format!("📋 Apps ({path})").bright_blue().bold());
    println!();

    let apps = config::load_apps(path)?;

    println!(
        "  {:<20} {:<12} {:<10} {}",
        "Name".bright_white().bold(),
        "Key".bright_white().bold(),
        "Status".bright_white().bold(),
        "Domains".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    if let Some(ref public) = apps.public {
        print_app_row(public);
    }
    for app in &apps.apps {
        print_app_row(app);
    }

    println!();
    if apps.public.is_none() {
        println!(
            "{}",
            "  ⚠️  No [public] app: requests without X-API-Key are rejected".yellow()
        );
    }
    println!(
        "  Keyed apps: {}",
        apps.apps.len().to_string().bright_white().bold()
    );
    println!();
    println!("{}", "✅ Apps config OK".green().bold());

    Ok(())
}

fn print_app_row(app: &AppConfig) {
    let key = if app.api_key.is_empty() {
        "-".to_string()
    } else {
        mask_api_key(&app.api_key)
    };

    let status = if app.enabled {
        "ENABLED".green()
    } else {
        "DISABLED".red()
    };

    let domains = if app.allowed_domains.is_empty() {
        "(none)".to_string()
    } else {
        app.allowed_domains.join(", ")
    };

    println!(
        "  {:<20} {:<12} {:<10} {}",
        app.display_name().cyan(),
        key.bright_black(),
        status,
        domains
    );
}

/// Generates an API key and prints an `[[apps]]` TOML entry.
///
/// # Flow
///
/// 1. Prompt for app name and domains (or use provided)
/// 2. Generate a random key
/// 3. Print the entry to paste into the apps file
///
/// The key is printed once; linkgate itself never stores it anywhere else.
fn keygen(name: Option<String>, domains: Vec<String>, skip_prompts: bool) -> Result<()> {
    println!("{}", "🔑 Generate API Key".bright_blue().bold());
    println!();

    let app_name = match name {
        Some(n) => n,
        None if skip_prompts => String::new(),
        None => Input::new()
            .with_prompt("App name")
            .with_initial_text("marketing")
            .interact_text()?,
    };

    let allowed_domains = if !domains.is_empty() || skip_prompts {
        domains
    } else {
        let raw: String = Input::new()
            .with_prompt("Allowed domains (comma separated, first is default)")
            .interact_text()?;
        parse_domain_list(&raw)
    };

    let enabled = skip_prompts
        || Confirm::new()
            .with_prompt("Enable this app?")
            .default(true)
            .interact()?;

    let api_key = generate_api_key();

    println!();
    println!("{}", "Add this to your apps file:".bright_white().bold());
    println!();
    println!(
        "{}",
        apps_entry(&app_name, &api_key, enabled, &allowed_domains).bright_yellow()
    );
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this key now! It is not stored anywhere else."
            .red()
            .bold()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"X-API-Key: {}\" -d '{{\"original_url\":\"https://example.com\",\"ttl\":0}}' http://localhost:3000/api/v1/links",
        api_key.bright_yellow()
    );
    println!();

    Ok(())
}

fn parse_domain_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}

fn apps_entry(name: &str, api_key: &str, enabled: bool, domains: &[String]) -> String {
    let quote = |s: &str| toml::Value::String(s.to_string()).to_string();

    let domains = domains
        .iter()
        .map(|d| quote(d.as_str()))
        .collect::<Vec<_>>()
        .join(", ");

    let mut entry = String::from("[[apps]]\n");
    if !name.is_empty() {
        entry.push_str(&format!("name = {}\n", quote(name)));
    }
    entry.push_str(&format!("api_key = {}\n", quote(api_key)));
    entry.push_str(&format!("enabled = {enabled}\n"));
    entry.push_str(&format!("allowed_domains = [{domains}]\n"));
    entry
}

/// Generates a cryptographically random API key.
///
/// # Format
///
/// - Length: 48 characters
/// - Character set: A-Z, a-z, 0-9
/// - Entropy: ~286 bits
fn generate_api_key() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const KEY_LEN: usize = 48;

    let mut rng = rand::rng();

    (0..KEY_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Connects to the configured Redis store.
///
/// The in-memory store is never used here: it would always be empty.
async fn redis_store() -> Result<(Config, Arc<dyn LinkRepository>)> {
    let config = config::load_from_env()?;

    if !config.is_redis_enabled() {
        anyhow::bail!("REDIS_URL or REDIS_HOST must be set");
    }

    let store = connect_store(&config).await?;
    Ok((config, store))
}

/// Handles link inspection commands.
async fn handle_link_action(action: LinkAction) -> Result<()> {
    match action {
        LinkAction::Inspect { domain, slug } => {
            let (_, store) = redis_store().await?;
            let key = LinkKey::new(&domain, &slug);

            println!("{}", format!("🔍 {key}").bright_blue().bold());
            println!();

            let url = store
                .get(&key)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to read link: {}", e))?;

            let Some(url) = url else {
                println!("{}", "  Link not found (never created or expired)".yellow());
                return Ok(());
            };

            let ttl = store
                .ttl(&key)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to read TTL: {}", e))?;

            println!("  Short URL: {}", format!("https://{domain}/{slug}").cyan());
            println!("  Target:    {}", url.bright_white());
            println!("  Expires:   {}", describe_ttl(&ttl));
            println!();
        }
    }

    Ok(())
}

fn describe_ttl(ttl: &KeyTtl) -> ColoredString {
    match ttl {
        KeyTtl::Persistent => "never".green(),
        KeyTtl::Expires(remaining) => format!("in {}s", remaining.as_secs()).yellow(),
        KeyTtl::Missing => "already expired".red(),
    }
}

/// Handles store diagnostic commands.
async fn handle_store_action(action: StoreAction) -> Result<()> {
    match action {
        StoreAction::Ping => {
            println!("{}", "🔍 Checking store connection...".bright_blue());

            let (config, store) = redis_store().await?;
            store.ping().await.context("Store did not answer PING")?;

            let url = config.redis_url.as_deref().unwrap_or_default();
            println!(
                "{}",
                format!("✅ Redis connection OK ({})", mask_connection_string(url))
                    .green()
                    .bold()
            );
        }
    }

    Ok(())
}
