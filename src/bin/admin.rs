//! CLI administration tool for calculator-service.
//!
//! Provides commands for managing user accounts, viewing statistics,
//! and performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # List users
//! cargo run --bin admin -- user list
//!
//! # Disable or re-enable an account
//! cargo run --bin admin -- user deactivate alice
//! cargo run --bin admin -- user activate alice
//!
//! # Set a new random password
//! cargo run --bin admin -- user reset-password alice
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST` / `DB_PORT` / `DB_USER` / `DB_PASSWORD` / `DB_NAME`

use calculator_service::config::Config;
use calculator_service::domain::entities::User;
use calculator_service::domain::repositories::{CalculationRepository, UserRepository};
use calculator_service::infrastructure::persistence::{
    PgCalculationRepository, PgUserRepository,
};
use calculator_service::utils::password::{generate_password, hash_password};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing calculator-service.
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
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// List users
    List {
        /// Maximum number of users to show
        #[arg(short, long, default_value_t = 50)]
        limit: i64,

        /// Number of users to skip
        #[arg(short, long, default_value_t = 0)]
        offset: i64,
    },

    /// Allow a user to log in again
    Activate {
        /// Username or e-mail
        login: String,
    },

    /// Block a user from logging in
    Deactivate {
        /// Username or e-mail
        login: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Replace a user's password with a random one
    ResetPassword {
        /// Username or e-mail
        login: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    match action {
        UserAction::List { limit, offset } => list_users(&repo, limit, offset).await?,
        UserAction::Activate { login } => set_active(&repo, &login, true, true).await?,
        UserAction::Deactivate { login, yes } => set_active(&repo, &login, false, yes).await?,
        UserAction::ResetPassword { login, yes } => reset_password(&repo, &login, yes).await?,
    }

    Ok(())
}

async fn find_user(repo: &PgUserRepository, login: &str) -> Result<User> {
    repo.find_by_username_or_email(login)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("User '{login}' not found"))
}

/// Lists users with status indicators.
///
/// # Output Format
///
/// ```text
/// 👥 Users
///
///   Username             Email                          Last login         Status
///   ───────────────────────────────────────────────────────────────────────────────
///   alice                alice@example.com              2025-01-15 10:30   ACTIVE
///   bob                  bob@example.com                never              INACTIVE
/// ```
async fn list_users(repo: &PgUserRepository, limit: i64, offset: i64) -> Result<()> {
    println!("{}", "👥 Users".bright_blue().bold());
    println!();

    let users = repo
        .list(offset, limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        return Ok(());
    }

    println!(
        "  {:<20} {:<30} {:<18} {:<10}",
        "Username".bright_white().bold(),
        "Email".bright_white().bold(),
        "Last login".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(80).bright_black());

    for user in &users {
        let status = if user.is_active {
            "ACTIVE".green()
        } else {
            "INACTIVE".red()
        };
        let last_login = user
            .last_login
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<20} {:<30} {:<18} {}",
            user.username.cyan(),
            user.email,
            last_login.bright_black(),
            status
        );
    }

    let total = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count users: {}", e))?;

    println!();
    println!(
        "  Showing {} of {}",
        users.len().to_string().bright_white().bold(),
        total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Activates or deactivates an account.
///
/// Deactivated users fail login and every token they still hold is
/// rejected with "Inactive user".
async fn set_active(
    repo: &PgUserRepository,
    login: &str,
    active: bool,
    skip_confirm: bool,
) -> Result<()> {
    let user = find_user(repo, login).await?;

    if user.is_active == active {
        let state = if active { "active" } else { "inactive" };
        println!("{}", format!("⚠️  {} is already {state}", user.username).yellow());
        return Ok(());
    }

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Deactivate {}?", user.username))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    repo.set_active(user.id, active)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update user: {}", e))?;

    let verb = if active { "activated" } else { "deactivated" };
    println!("{}", format!("✅ {} {verb}", user.username).green().bold());

    Ok(())
}

/// Generates a random password, stores its hash and prints it once.
async fn reset_password(repo: &PgUserRepository, login: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🔑 Reset Password".bright_blue().bold());
    println!();

    let user = find_user(repo, login).await?;

    println!("  User:  {}", user.username.cyan());
    println!("  Email: {}", user.email.bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Replace this user's password?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let password = generate_password();
    let password_hash =
        hash_password(&password).map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

    repo.update_password(user.id, &password_hash)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update password: {}", e))?;

    println!();
    println!("{}", "✅ Password updated".green().bold());
    println!("  New password: {}", password.bright_yellow().bold());
    println!(
        "{}",
        "⚠️  Share it securely. It is not stored and cannot be shown again."
            .red()
            .bold()
    );
    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total and active users
/// - Calculations per operation
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users = PgUserRepository::new(Arc::new(pool.clone()));
    let calculations = PgCalculationRepository::new(Arc::new(pool.clone()));

    let users_count = users
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count users: {}", e))?;

    let active_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE is_active")
        .fetch_one(pool)
        .await?;

    let by_type = calculations
        .count_by_type()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count calculations: {}", e))?;
    let total: i64 = by_type.iter().map(|(_, n)| n).sum();

    println!(
        "  Users:          {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Active users:   {}",
        active_count.to_string().bright_green().bold()
    );
    println!(
        "  Calculations:   {}",
        total.to_string().bright_green().bold()
    );
    for (calculation_type, count) in by_type {
        println!(
            "    {:<16} {}",
            calculation_type.as_str().cyan(),
            count.to_string().bright_white()
        );
    }
    println!();

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
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
                    .fetch_one(pool)
                    .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Applied migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
