//! Account management CLI commands.
//!
//! `shop user add` and `shop user auth` run the same account-store calls the
//! HTTP handlers use. Domain misses (duplicate signup, bad credentials)
//! print a notice and exit nonzero.

use anyhow::Result;

use crate::accounts::{self, SignupOutcome};
use crate::config::Config;
use crate::db;

/// Create an account from the command line.
pub async fn run_user_add(
    config: &Config,
    username: &str,
    email: &str,
    password: &str,
) -> Result<()> {
    let pool = db::connect(config).await?;

    let outcome = accounts::create_user(&pool, username, email, password).await?;
    pool.close().await;

    match outcome {
        SignupOutcome::Created(user) => {
            println!("Created user {} (id {}).", user.username, user.id);
            Ok(())
        }
        SignupOutcome::Conflict => {
            eprintln!("Username or Email already exists. Please try another.");
            std::process::exit(1);
        }
    }
}

/// Check credentials from the command line.
pub async fn run_user_auth(config: &Config, username: &str, password: &str) -> Result<()> {
    let pool = db::connect(config).await?;

    let user = accounts::authenticate(&pool, username, password).await?;
    pool.close().await;

    match user {
        Some(user) => {
            println!("Welcome back, {}!", user.username);
            Ok(())
        }
        None => {
            eprintln!("Invalid username or password. Please try again.");
            std::process::exit(1);
        }
    }
}
