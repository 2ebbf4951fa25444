//! CLI administration tool for linkpeek.
//!
//! Manages links and shows statistics directly against the Redis link store,
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a link (prompts for missing values)
//! cargo run --bin linkpeek-admin -- links create --url https://example.com/landing --code promo1
//!
//! # List links, optionally by code prefix
//! cargo run --bin linkpeek-admin -- links list --prefix promo
//!
//! # Delete a link
//! cargo run --bin linkpeek-admin -- links delete promo1
//!
//! # View statistics
//! cargo run --bin linkpeek-admin -- stats
//!
//! # Check the store connection
//! cargo run --bin linkpeek-admin -- store check
//! ```
//!
//! # Environment Variables
//!
//! - `REDIS_URL` or `REDIS_HOST`/`REDIS_PORT`/`REDIS_PASSWORD`/`REDIS_DB` (required)
//! - `DOMAINS`: serving domains used for short URLs (default: `localhost`)

use linkpeek::config::{Config, domains_from_env, mask_connection_string};
use linkpeek::prelude::*;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use std::sync::Arc;

/// CLI tool for managing linkpeek.
#[derive(Parser)]
#[command(name = "linkpeek-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Link store operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List links, newest first
    List {
        /// Only codes starting with this prefix
        #[arg(short, long, default_value = "")]
        prefix: String,
    },

    /// Create a new short link
    Create {
        /// Target URL browsers are sent to
        #[arg(short, long)]
        url: Option<String>,

        /// Custom short code (generated if not provided)
        #[arg(short, long)]
        code: Option<String>,

        /// Preview title
        #[arg(short, long)]
        title: Option<String>,

        /// Preview description
        #[arg(short, long)]
        description: Option<String>,

        /// Preview image URL
        #[arg(short, long)]
        image: Option<String>,

        /// Serving domain (default: first of DOMAINS)
        #[arg(long)]
        domain: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Delete a link
    Delete {
        /// Short code to delete
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Link store subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// Check the Redis connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let redis_url = Config::load_redis_url().context("REDIS_URL or REDIS_HOST must be set")?;

    let store: Arc<dyn LinkStore> = Arc::new(
        RedisLinkStore::connect(&redis_url)
            .await
            .with_context(|| {
                format!("Failed to connect to {}", mask_connection_string(&redis_url))
            })?,
    );

    match cli.command {
        Commands::Links { action } => handle_link_action(action, store).await?,
        Commands::Stats => handle_stats(store).await?,
        Commands::Store { action } => match action {
            StoreAction::Check => check_store(store, &redis_url).await?,
        },
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, store: Arc<dyn LinkStore>) -> Result<()> {
    let service = LinkService::new(store, domains_from_env());

    match action {
        LinkAction::List { prefix } => list_links(&service, &prefix).await?,
        LinkAction::Create {
            url,
            code,
            title,
            description,
            image,
            domain,
            yes,
        } => {
            let input = CreateLink {
                target_url: String::new(),
                title,
                description,
                image_url: image,
                custom_code: code,
                domain,
            };
            create_link(&service, url, input, yes).await?
        }
        LinkAction::Delete { code, yes } => delete_link(&service, &code, yes).await?,
    }

    Ok(())
}

/// Creates a link with interactive prompts for anything not given as a flag.
async fn create_link(
    service: &LinkService<dyn LinkStore>,
    url: Option<String>,
    mut input: CreateLink,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    input.target_url = match url {
        Some(u) => u,
        None => Input::new().with_prompt("Target URL").interact_text()?,
    };

    if input.title.is_none() && !skip_confirm {
        let title: String = Input::new()
            .with_prompt("Preview title (optional)")
            .allow_empty(true)
            .interact_text()?;
        input.title = Some(title).filter(|t| !t.trim().is_empty());
    }

    println!();
    println!("{}", "Link details:".bright_white().bold());
    println!("  Target: {}", input.target_url.cyan());
    println!(
        "  Code:   {}",
        input
            .custom_code
            .as_deref()
            .unwrap_or("(generated)")
            .bright_yellow()
    );
    if let Some(title) = &input.title {
        println!("  Title:  {}", title.cyan());
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this link?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let record = service
        .create_link(input)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!();
    println!("{}", "✅ Link created successfully!".green().bold());
    println!();
    println!("  Short URL: {}", service.short_url(&record).bright_yellow().bold());
    println!(
        "  Path URL:  https://{}/{}",
        record.domain.as_deref().unwrap_or("localhost"),
        record.code
    );
    println!();

    Ok(())
}

/// Lists links with their visit counts.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   Code                 Visits   Created            Target
///   ─────────────────────────────────────────────────────────────────────────
///   promo1               42       2025-03-01 12:00   https://example.com/landing
/// ```
async fn list_links(service: &LinkService<dyn LinkStore>, prefix: &str) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = service
        .list_links(prefix)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} linkpeek-admin links create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<20} {:<8} {:<18} {}",
        "Code".bright_white().bold(),
        "Visits".bright_white().bold(),
        "Created".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<20} {:<8} {:<18} {}",
            link.code.cyan(),
            link.visit_count.to_string().bright_white(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.target_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(
    service: &LinkService<dyn LinkStore>,
    code: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🗑  Delete Short Link".bright_blue().bold());
    println!();

    let link = service
        .get_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Code:   {}", link.code.cyan());
    println!("  Target: {}", link.target_url);
    println!("  Visits: {}", link.visit_count.to_string().bright_white());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!();
    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

/// Displays link and visit totals.
async fn handle_stats(store: Arc<dyn LinkStore>) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let totals = StatsService::new(store)
        .totals()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!(
        "  Links:  {}",
        totals.total_links.to_string().bright_white().bold()
    );
    println!(
        "  Visits: {} {}",
        totals.total_visits.to_string().bright_white().bold(),
        "(lower bound)".bright_black()
    );
    println!();

    Ok(())
}

/// Pings the store and reports the masked connection string.
async fn check_store(store: Arc<dyn LinkStore>, redis_url: &str) -> Result<()> {
    println!("{}", "🔍 Checking link store".bright_blue().bold());
    println!();
    println!("  Redis: {}", mask_connection_string(redis_url).bright_black());

    if store.health_check().await {
        println!("  {}", "✅ Connected".green().bold());
        println!();
        Ok(())
    } else {
        println!("  {}", "❌ PING failed".red().bold());
        println!();
        anyhow::bail!("Link store is unreachable")
    }
}
