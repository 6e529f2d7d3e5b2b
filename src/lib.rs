//! msqadm - MSQ Admin back-office client library
//!
//! This library implements the data-access layer for the MSQ admin REST
//! backend: a configured HTTP client with bearer-token injection, typed
//! per-entity resource clients, a process-wide query cache with declarative
//! mutation invalidation, and the operator preference services (session,
//! locale, timezone, grid column state).
//!
//! # Architecture
//!
//! - `http`: the single configured HTTP client and error mapping
//! - `auth`: token persistence and the login/logout/OTP session service
//! - `cache`: keyed request/response cache with staleness, coalescing, GC
//! - `invalidation`: central mutation-to-cache-key invalidation table
//! - `query`: shared list parameters and the pagination envelope
//! - `resources`: one client per backend entity (news, deposits, ...)
//! - `locale` / `timezone` / `grid` / `prefs`: operator preferences
//! - `version`: deployed-version check and poller
//! - `app` / `cli` / `commands`: CLI wiring over the library
//!
//! # Example
//!
//! ```no_run
//! use msqadm::app::App;
//! use msqadm::config::Config;
//! use msqadm::query::ListParams;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/msqadm.yaml")?;
//!     config.validate()?;
//!
//!     let app = App::new(config)?;
//!     let page = app.resources.news.list(&ListParams::new().limit(10)).await?;
//!     println!("{} articles", page.data.len());
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod auth;
pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod grid;
pub mod http;
pub mod invalidation;
pub mod locale;
pub mod prefs;
pub mod query;
pub mod resources;
pub mod timezone;
pub mod version;

// Re-export commonly used types
pub use app::App;
pub use cache::{QueryCache, QueryKey};
pub use config::Config;
pub use error::{MsqAdminError, Result};
pub use invalidation::InvalidationMap;
pub use query::{Ack, ListParams, Page};

#[cfg(test)]
pub mod test_utils;
