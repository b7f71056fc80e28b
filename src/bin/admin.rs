//! CLI administration tool for users-service.
//!
//! Inspects storage and the user list cache without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # List users straight from PostgreSQL
//! cargo run --bin admin -- users list
//!
//! # Inspect or drop the cached user list
//! cargo run --bin admin -- cache show
//! cargo run --bin admin -- cache clear --yes
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` / `DB_*` and `REDIS_URL` / `REDIS_*`,
//! with the same defaults.

use users_service::application::services::USERS_CACHE_KEY;
use users_service::config::{self, Config, mask_connection_string};
use users_service::domain::entities::User;
use users_service::domain::repositories::UserRepository;
use users_service::infrastructure::cache::{CacheService, RedisCache};
use users_service::infrastructure::persistence::PgUserRepository;
use users_service::server::connect_database;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for managing users-service.
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
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Inspect stored users
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },

    /// Inspect or clear the cached user list
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[derive(Subcommand)]
enum UsersAction {
    /// List all users from the database
    List,
}

#[derive(Subcommand)]
enum CacheAction {
    /// Show the state of the cached user list
    Show,

    /// Delete the cached user list
    Clear {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Db { action } => handle_db_action(action, &config).await?,
        Commands::Users { action } => handle_users_action(action, &config).await?,
        Commands::Cache { action } => handle_cache_action(action, &config).await?,
    }

    Ok(())
}

async fn repository(config: &Config) -> Result<PgUserRepository> {
    let pool = connect_database(config).await?;
    Ok(PgUserRepository::new(Arc::new(pool)))
}

async fn cache(config: &Config) -> Result<RedisCache> {
    RedisCache::connect(&config.redis_url)
        .await
        .with_context(|| format!("Failed to connect to {}", mask_connection_string(&config.redis_url)))
}

async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔌 Database check".bright_blue().bold());
            println!();
            println!("  URL: {}", mask_connection_string(&config.database_url).cyan());

            let repo = repository(config).await?;
            repo.ping()
                .await
                .map_err(|e| anyhow::anyhow!("Ping failed: {}", e))?;
            let count = repo
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count users: {}", e))?;

            println!("  {}", "✅ Connected".green().bold());
            println!("  Users: {}", count.to_string().bright_white().bold());
            println!();
        }
    }

    Ok(())
}

async fn handle_users_action(action: UsersAction, config: &Config) -> Result<()> {
    match action {
        UsersAction::List => {
            let repo = repository(config).await?;
            let users = repo
                .list()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

            print_users(&users);
        }
    }

    Ok(())
}

/// Prints users as a table.
///
/// ```text
/// 👥 Users
///
///   ID    Name                      Email
///   ─────────────────────────────────────────────────────────────
///   1     Ann                       ann@x.com
/// ```
fn print_users(users: &[User]) {
    println!("{}", "👥 Users".bright_blue().bold());
    println!();

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        return;
    }

    println!(
        "  {:<5} {:<25} {}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Email".bright_white().bold()
    );
    println!("  {}", "─".repeat(61).bright_black());

    for user in users {
        println!(
            "  {:<5} {:<25} {}",
            user.id.to_string().bright_black(),
            user.name.cyan(),
            user.email
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();
}

async fn handle_cache_action(action: CacheAction, config: &Config) -> Result<()> {
    let cache = cache(config).await?;

    match action {
        CacheAction::Show => {
            println!("{}", "🗄  Cached user list".bright_blue().bold());
            println!();
            println!("  Key: {}", USERS_CACHE_KEY.cyan());

            let blob = cache
                .get(USERS_CACHE_KEY)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            match blob {
                None => println!("  {}", "Not cached".yellow()),
                Some(blob) => {
                    let ttl = cache
                        .ttl(USERS_CACHE_KEY)
                        .await
                        .map_err(|e| anyhow::anyhow!("{}", e))?;
                    let entries = serde_json::from_str::<Vec<User>>(&blob)
                        .map(|users| users.len().to_string())
                        .unwrap_or_else(|_| "unreadable".to_string());

                    println!("  Size:    {} bytes", blob.len());
                    println!("  Entries: {}", entries.bright_white().bold());
                    match ttl {
                        Some(secs) => println!("  Expires: in {}s", secs),
                        None => println!("  Expires: {}", "never".red()),
                    }
                }
            }
            println!();
        }
        CacheAction::Clear { yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete cache key {}?", USERS_CACHE_KEY))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            cache
                .delete(USERS_CACHE_KEY)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            println!("{}", "✅ Cached user list cleared".green().bold());
        }
    }

    Ok(())
}
