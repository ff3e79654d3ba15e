//! # Shopline CLI (`shop`)
//!
//! The `shop` binary is the primary interface for Shopline. It provides
//! commands for database initialization, the trending listing, similar-items
//! recommendations, account management, and starting the JSON HTTP server.
//!
//! ## Usage
//!
//! ```bash
//! shop --config ./config/shop.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `shop init` | Create the SQLite database and apply the schema |
//! | `shop trending` | Print the trending product listing |
//! | `shop recommend "<product>"` | Print items similar to a catalog product |
//! | `shop user add <username> <email> <password>` | Create an account |
//! | `shop user auth <username> <password>` | Check credentials |
//! | `shop serve http` | Start the JSON storefront server |

mod accounts;
mod catalog;
mod config;
mod db;
mod display;
mod migrate;
mod recommend;
mod server;
mod trending;
mod user_cmd;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

/// Shopline CLI: a small e-commerce demo with trending products, tag-based
/// recommendations, and user accounts.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/shop.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "shop",
    about = "Shopline, a small e-commerce demo service",
    version,
    long_about = "Shopline loads two CSV catalog datasets into an immutable in-memory snapshot \
    at startup, answers similar-items queries with TF-IDF cosine similarity over product tag \
    text, and keeps user accounts in SQLite behind storage-level uniqueness constraints."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/shop.toml`. Database, catalog, recommendation,
    /// and server settings are read from this file.
    #[arg(long, global = true, default_value = "./config/shop.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and the users table with its
    /// uniqueness constraints. Idempotent; running it twice is safe.
    Init,

    /// Print the trending product listing.
    Trending,

    /// Print items similar to a catalog product.
    ///
    /// Runs the TF-IDF similarity engine over the product catalog's tag
    /// text. An unknown product name prints a notice rather than failing.
    Recommend {
        /// Exact catalog product name to query.
        product: String,

        /// Number of results to return (defaults to `[recommend].default_top_n`).
        #[arg(long)]
        count: Option<usize>,
    },

    /// Manage user accounts.
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Start the storefront HTTP server.
    ///
    /// Loads the catalog snapshot and serves the JSON API on `[server].bind`.
    Serve {
        #[command(subcommand)]
        service: ServeService,
    },
}

/// Account management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create an account. Fails with a notice if the username or email is taken.
    Add {
        username: String,
        email: String,
        password: String,
    },
    /// Check a username/password pair.
    Auth { username: String, password: String },
}

/// Server subcommands.
#[derive(Subcommand)]
enum ServeService {
    /// Start the JSON HTTP storefront.
    Http,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Trending => {
            let cat = catalog::Catalog::load(&cfg)?;
            trending::run_trending(&cfg, &cat)?;
        }
        Commands::Recommend { product, count } => {
            let cat = catalog::Catalog::load(&cfg)?;
            recommend::run_recommend(&cfg, &cat, &product, count)?;
        }
        Commands::User { action } => match action {
            UserAction::Add {
                username,
                email,
                password,
            } => {
                user_cmd::run_user_add(&cfg, &username, &email, &password).await?;
            }
            UserAction::Auth { username, password } => {
                user_cmd::run_user_auth(&cfg, &username, &password).await?;
            }
        },
        Commands::Serve { service } => match service {
            ServeService::Http => {
                let cat = Arc::new(catalog::Catalog::load(&cfg)?);
                println!("Loaded catalog: {} products.", cat.product_count());
                server::run_server(&cfg, cat).await?;
            }
        },
    }

    Ok(())
}
