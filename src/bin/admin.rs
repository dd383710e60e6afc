//! CLI administration tool for bitlie.
//!
//! Provides commands for seeding, managing API tokens, viewing statistics,
//! and performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Seed the token from SEED_SECRET_TOKEN and the demo links
//! cargo run --bin bitlie-admin -- seed
//!
//! # Create a new API token
//! cargo run --bin bitlie-admin -- token create --note "CI"
//!
//! # List all tokens
//! cargo run --bin bitlie-admin -- token list
//!
//! # Delete a token
//! cargo run --bin bitlie-admin -- token delete <id>
//!
//! # View statistics
//! cargo run --bin bitlie-admin -- stats
//!
//! # Check database connection
//! cargo run --bin bitlie-admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or the `DB_*` parts): PostgreSQL connection string
//! - `SEED_SECRET_TOKEN` (optional): token inserted by `seed`

use bitlie::application::services::{AuthService, LinkService};
use bitlie::config::{self, Config};
use bitlie::domain::repositories::{ClickRepository, LinkRepository, TokenRepository};
use bitlie::error::AppError;
use bitlie::infrastructure::persistence::{PgClickRepository, PgLinkRepository, PgTokenRepository};
use bitlie::server;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing bitlie.
#[derive(Parser)]
#[command(name = "bitlie-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Seed the API token from the environment and the demo links
    Seed,

    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Create a new API token
    Create {
        /// Free-form note stored with the token (e.g. "CI", "Mobile App")
        #[arg(short, long)]
        note: Option<String>,

        /// Custom token value (optional, auto-generated if not provided)
        #[arg(short, long)]
        token: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens with masked values
    List,

    /// Delete a token
    Delete {
        /// Token ID
        id: String,

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

/// Links inserted by `seed`.
const DEMO_LINKS: &[(&str, &str, &str)] = &[
    ("GitHub", "github", "https://github.com/"),
    ("Instagram", "instagram", "https://instagram.com/"),
    ("Stackoverflow", "stackoverflow", "https://stackoverflow.com/"),
    ("Linkedin", "linkedin", "https://linkedin.com/"),
    ("DevTo", "devto", "https://dev.to/"),
    ("Uiverse", "uiverse", "https://uiverse.io/"),
    ("Dribbble", "dribbble", "https://dribbble.com/"),
    ("Buymeacoffee", "buymeacoffee", "https://www.buymeacoffee.com/"),
    ("Ko-fi", "ko-fi", "https://ko-fi.com/"),
    ("Rust", "rust", "https://www.rust-lang.org/"),
    ("v0 by Vercel", "v0", "https://v0.dev/"),
];

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    if config.uses_memory_store() {
        bail!(
            "bitlie-admin needs PostgreSQL, DATABASE_URL is set to '{}'",
            config::MEMORY_DATABASE_URL
        );
    }

    let pool = Arc::new(server::connect_database(&config).await?);

    match cli.command {
        Commands::Seed => handle_seed(&config, pool).await?,
        Commands::Token { action } => handle_token_action(action, pool).await?,
        Commands::Stats => handle_stats(pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Inserts the seed token and the demo links.
///
/// The links are skipped as a whole when any demo alias is already taken.
async fn handle_seed(config: &Config, pool: Arc<PgPool>) -> Result<()> {
    println!("{}", "Seeding database".bright_blue().bold());
    println!();

    let tokens = Arc::new(PgTokenRepository::new(pool.clone()));
    let auth = AuthService::new(tokens);

    match &config.seed_secret_token {
        Some(token) => {
            let created = auth.ensure_token(token).await.context("Failed to seed token")?;
            if created {
                println!("  {}", "Seed token created".green());
            } else {
                println!("  {}", "Seed token already present".bright_black());
            }
        }
        None => {
            println!(
                "  {}",
                "SEED_SECRET_TOKEN is not set, skipping token seeding".yellow()
            );
        }
    }

    let links = Arc::new(PgLinkRepository::new(pool));

    let mut existing = Vec::new();
    for (_, alias, _) in DEMO_LINKS {
        if links.find_by_alias(alias).await?.is_some() {
            existing.push(*alias);
        }
    }

    if !existing.is_empty() {
        println!(
            "  {} {}",
            "Data already exists for aliases:".yellow(),
            existing.join(", ")
        );
        return Ok(());
    }

    let service = LinkService::new(links);
    for (name, alias, url) in DEMO_LINKS {
        service
            .create(name.to_string(), alias.to_string(), url.to_string())
            .await
            .with_context(|| format!("Failed to create demo link '{alias}'"))?;
    }

    println!(
        "  {}",
        format!("{} demo links created", DEMO_LINKS.len()).green()
    );
    println!();

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, pool: Arc<PgPool>) -> Result<()> {
    let repo = PgTokenRepository::new(pool);

    match action {
        TokenAction::Create { note, token, yes } => create_token(&repo, note, token, yes).await,
        TokenAction::List => list_tokens(&repo).await,
        TokenAction::Delete { id, yes } => delete_token(&repo, &id, yes).await,
    }
}

/// Creates a new API token with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for a note (or use provided)
/// 2. Generate random token or use provided value
/// 3. Display token details
/// 4. Confirm creation (unless `--yes` flag)
/// 5. Store in database
/// 6. Display usage instructions
async fn create_token(
    repo: &PgTokenRepository,
    note: Option<String>,
    token: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Create API Token".bright_blue().bold());
    println!();

    let note = match note {
        Some(n) => n,
        None if skip_confirm => String::new(),
        None => Input::new()
            .with_prompt("Note")
            .allow_empty(true)
            .interact_text()?,
    };
    let note = Some(note).filter(|n| !n.is_empty());

    let token_value = match token {
        Some(t) if t.is_empty() => bail!("Token value must not be empty"),
        Some(t) => {
            println!("{}", "Using provided token value".yellow());
            t
        }
        None => {
            let generated = generate_token();
            println!("{}", "Generated new token".green());
            generated
        }
    };

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  Note:  {}", note.as_deref().unwrap_or("-").cyan());
    println!("  Token: {}", token_value.bright_yellow().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let created = match repo.create(&token_value, note).await {
        Ok(created) => created,
        Err(AppError::Conflict { .. }) => bail!("A token with this value already exists"),
        Err(e) => return Err(anyhow::Error::new(e).context("Failed to create token")),
    };

    println!();
    println!("{}", "Token created successfully!".green().bold());
    println!("  ID: {}", created.id.bright_black());
    println!();
    println!("{}", "Add this to your requests:".bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        token_value.bright_yellow()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/stats",
        token_value.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all API tokens.
///
/// # Output Format
///
/// ```text
/// API Tokens
///
///   ID            Token          Created            Note
///   ---------------------------------------------------------------------------
///   dGhpcyBpcyBh  abcd********   2024-01-15 10:30   Main token for the ...
/// ```
async fn list_tokens(repo: &PgTokenRepository) -> Result<()> {
    println!("{}", "API Tokens".bright_blue().bold());
    println!();

    let tokens = repo.list().await.context("Failed to list tokens")?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} bitlie-admin token create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<13} {:<14} {:<18} {}",
        "ID".bright_white().bold(),
        "Token".bright_white().bold(),
        "Created".bright_white().bold(),
        "Note".bright_white().bold()
    );
    println!("  {}", "-".repeat(75).bright_black());

    for token in &tokens {
        println!(
            "  {:<13} {:<14} {:<18} {}",
            token.id.bright_black(),
            mask_token(&token.token).yellow(),
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            token.note.as_deref().unwrap_or("-").cyan()
        );
    }

    println!();
    println!(
        "  Total: {}",
        tokens.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Deletes a token by ID after confirmation.
async fn delete_token(repo: &PgTokenRepository, id: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "Delete API Token".bright_blue().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete token {id}?"))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    if !repo.delete(id).await.context("Failed to delete token")? {
        bail!("Token not found: {id}");
    }

    println!("{}", "Token deleted successfully!".green().bold());
    println!();

    Ok(())
}

/// Displays link, click and token counts.
async fn handle_stats(pool: Arc<PgPool>) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let links_count = PgLinkRepository::new(pool.clone()).count().await?;
    let clicks_count = PgClickRepository::new(pool.clone()).count().await?;
    let tokens_count = PgTokenRepository::new(pool).list().await?.len();

    println!(
        "  Links:  {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!(
        "  Tokens: {}",
        tokens_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

/// Generates a random token.
///
/// # Format
///
/// - Length: 48 characters
/// - Character set: A-Z, a-z, 0-9
fn generate_token() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const TOKEN_LEN: usize = 48;

    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Keeps the first four characters of a token and stars the rest.
fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    let hidden = token.chars().count().saturating_sub(4).min(8);
    format!("{visible}{}", "*".repeat(hidden))
}
