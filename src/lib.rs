//! # Shopline
//!
//! A small e-commerce demo service: a CSV-backed product catalog, a
//! tag-based similar-items recommendation engine, and SQLite-backed user
//! accounts, exposed through a CLI and a JSON HTTP server.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌───────────────┐   ┌──────────┐
//! │ CSV datasets │──▶│   Catalog      │   │  SQLite   │
//! │ products /   │   │ snapshot +    │   │  users    │
//! │ trending     │   │ TF-IDF engine │   └────┬─────┘
//! └──────────────┘   └──────┬────────┘        │
//!                           │                 │
//!                  ┌────────┴───────┬─────────┤
//!                  ▼                ▼         ▼
//!             ┌──────────┐    ┌──────────────────┐
//!             │   CLI    │    │   HTTP (JSON)    │
//!             │  (shop)  │    │  axum storefront │
//!             └──────────┘    └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! shop init                          # create the user database
//! shop trending                      # print the trending listing
//! shop recommend "Red Shirt" --count 5
//! shop user add alice a@x.com pw
//! shop serve http                    # start the JSON storefront
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`catalog`] | CSV loading and the immutable catalog snapshot |
//! | [`accounts`] | User signup/signin against SQLite |
//! | [`server`] | JSON HTTP storefront |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema setup |
//! | [`display`] | Cosmetic card image/price assignment |

pub mod accounts;
pub mod catalog;
pub mod config;
pub mod db;
pub mod display;
pub mod migrate;
pub mod recommend;
pub mod server;
pub mod trending;
pub mod user_cmd;
