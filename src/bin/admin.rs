//! CLI administration tool for linky-replacer.
//!
//! Manages the internal domain patterns, browses link records and runs the
//! HTML transform without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show the stored internal patterns
//! cargo run --bin admin -- patterns show
//!
//! # Check a pattern list for conflicts without saving it
//! cargo run --bin admin -- patterns check patterns.txt
//!
//! # Replace the internal patterns (reads stdin with "-")
//! printf '*.example.com\nexample.org\n' | cargo run --bin admin -- patterns set -
//!
//! # Browse link records
//! cargo run --bin admin -- links list --page 2
//! cargo run --bin admin -- links show 42
//!
//! # Rewrite an HTML file and print the result
//! cargo run --bin admin -- transform body.html
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; `DATABASE_URL` (or `DB_*` components) is required.

use linky_replacer::config::{self, Config};
use linky_replacer::domain::patterns::parse_pattern_list;
use linky_replacer::infrastructure::cache::NullCache;
use linky_replacer::server::{build_state, connect_database};
use linky_replacer::state::AppState;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

/// CLI tool for managing linky-replacer.
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
    /// Manage internal domain patterns
    Patterns {
        #[command(subcommand)]
        action: PatternsAction,
    },

    /// Browse link records
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Rewrite external links in an HTML file and print the result
    Transform {
        /// HTML file, or "-" for stdin
        input: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum PatternsAction {
    /// Show the stored patterns
    Show,

    /// Report conflicting patterns without saving
    Check {
        /// Pattern file (one per line), or "-" for stdin
        input: String,
    },

    /// Replace the stored patterns
    Set {
        /// Pattern file (one per line), or "-" for stdin
        input: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum LinksAction {
    /// List link records, newest first
    List {
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        #[arg(short = 's', long, default_value_t = 25)]
        page_size: u32,
    },

    /// Show one link record
    Show { id: i64 },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = connect_database(&config).await?;

    match cli.command {
        Commands::Db { action } => handle_db_action(action, &pool).await?,
        Commands::Patterns { action } => {
            handle_patterns_action(action, &app_state(&config, pool)?).await?
        }
        Commands::Links { action } => {
            handle_links_action(action, &app_state(&config, pool)?).await?
        }
        Commands::Transform { input } => transform(&app_state(&config, pool)?, &input).await?,
    }

    Ok(())
}

/// Services over PostgreSQL. The CLI never caches.
fn app_state(config: &Config, pool: PgPool) -> Result<AppState> {
    build_state(config, pool, Arc::new(NullCache::new()))
}

/// Reads a whole file, or stdin when `input` is `-`.
async fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buffer)
            .await
            .context("Failed to read stdin")?;
        return Ok(buffer);
    }

    tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read {}", input))
}

async fn handle_patterns_action(action: PatternsAction, state: &AppState) -> Result<()> {
    let settings = &state.settings_service;

    match action {
        PatternsAction::Show => {
            let current = settings.current().await?;
            let patterns = parse_pattern_list(&current.internal_patterns);

            println!("{}", "🌐 Internal Patterns".bright_blue().bold());
            println!("  Version: {}", current.version.to_string().bright_black());
            println!();

            if patterns.is_empty() {
                println!("{}", "  No internal patterns: every host is external".yellow());
            }
            for pattern in &patterns {
                println!("  {}", pattern.cyan());
            }
            println!();
        }
        PatternsAction::Check { input } => {
            let raw = read_input(&input).await?;
            let conflicts = settings.conflicts(&raw)?;

            if conflicts.is_empty() {
                println!("{}", "✅ No conflicts".green().bold());
            } else {
                for conflict in &conflicts {
                    println!("{} {}", "✗".red(), conflict);
                }
                anyhow::bail!("{} conflicting pattern(s)", conflicts.len());
            }
        }
        PatternsAction::Set { input, yes } => {
            let raw = read_input(&input).await?;
            let patterns = settings.validate(&raw).map_err(|e| {
                anyhow::anyhow!("{}: {}", e, e.to_error_info().details["errors"])
            })?;

            println!("{}", "🌐 New Internal Patterns".bright_blue().bold());
            for pattern in &patterns {
                println!("  {}", pattern.cyan());
            }
            println!();

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Save these patterns?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            let saved = settings.save(&raw).await?;
            println!(
                "{} (version {})",
                "✅ Patterns saved".green().bold(),
                saved.version
            );
        }
    }

    Ok(())
}

async fn handle_links_action(action: LinksAction, state: &AppState) -> Result<()> {
    let records = &state.link_record_service;
    let canonical = state.link_replacer.canonical();

    match action {
        LinksAction::List { page, page_size } => {
            anyhow::ensure!(page > 0, "Page must be greater than 0");
            anyhow::ensure!(page_size > 0, "Page size must be greater than 0");

            let offset = (page as i64 - 1) * page_size as i64;
            let (items, total) = tokio::try_join!(
                records.list(offset, page_size as i64),
                records.count()
            )?;

            println!("{}", "🔗 Link Records".bright_blue().bold());
            println!();

            if items.is_empty() {
                println!("{}", "  No link records found".yellow());
                return Ok(());
            }

            println!(
                "  {:<8} {:<40} {:<20}",
                "ID".bright_white().bold(),
                "Title".bright_white().bold(),
                "Created".bright_white().bold()
            );
            println!("  {}", "─".repeat(75).bright_black());

            for record in &items {
                let title: String = record.title.chars().take(40).collect();
                println!(
                    "  {:<8} {:<40} {}",
                    record.id.to_string().bright_black(),
                    title.cyan(),
                    record
                        .created_at
                        .format("%Y-%m-%d %H:%M")
                        .to_string()
                        .bright_black()
                );
            }

            println!();
            println!(
                "  Page {} · Total: {}",
                page,
                total.to_string().bright_white().bold()
            );
        }
        LinksAction::Show { id } => {
            let record = records.get(id).await?;

            println!("{}", record.label().bright_white().bold());
            println!("  ID:      {}", record.id);
            println!("  URI:     {}", record.uri.cyan());
            println!("  Title:   {}", record.title);
            println!("  Path:    {}", canonical.href_for(record.id).bright_green());
            println!(
                "  Created: {}",
                record.created_at.format("%Y-%m-%d %H:%M:%S")
            );
        }
    }

    Ok(())
}

/// Transforms the input and writes the result to stdout.
///
/// Link records are created for every eligible href, exactly as on save.
async fn transform(state: &AppState, input: &str) -> Result<()> {
    let html = read_input(input).await?;
    let output = state.link_replacer.transform(&html).await?;

    if output == html {
        eprintln!("{}", "No links replaced".yellow());
    }
    print!("{}", output);

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Migrate => {
            println!("{}", "📦 Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations").run(pool).await?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
