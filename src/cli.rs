//! Command-line interface definition for msqadm
//!
//! This module defines the CLI structure using clap's derive API, providing
//! commands for authentication, entity listing, deposit review, preference
//! management, and the deployed-version check.

use clap::{Parser, Subcommand};

/// msqadm - MSQ Admin back-office CLI
///
/// Operate on platform entities (news, communities, deposits, ...) through
/// the admin REST backend.
#[derive(Parser, Debug, Clone)]
#[command(name = "msqadm")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/msqadm.yaml")]
    pub config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for msqadm
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Log in to the admin backend and store the session token
    Login {
        /// Operator email
        #[arg(short, long)]
        email: String,

        /// Password; prompted interactively when omitted
        /// (or taken from MSQADM_PASSWORD)
        #[arg(short, long, env = "MSQADM_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// One-time code, when the account has OTP enabled
        #[arg(long)]
        otp: Option<String>,
    },

    /// Log out, clearing the stored session token
    Logout,

    /// Show the logged-in operator profile and permissions
    Whoami,

    /// List records of an entity
    List {
        /// Entity name (news, communities, inquiries, notifications,
        /// popups, reserves, txid-history, user-education, bulk-transfers,
        /// deposits)
        entity: String,

        /// Maximum records per page
        #[arg(short, long)]
        limit: Option<u32>,

        /// Page number
        #[arg(short, long)]
        page: Option<u32>,

        /// Cursor: id of the last record of the previous page
        #[arg(long)]
        last_id: Option<String>,

        /// Free-text search key
        #[arg(short, long)]
        search: Option<String>,

        /// Status filter
        #[arg(long)]
        status: Option<String>,

        /// Date range start (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Date range end (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Print the raw JSON page instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Review deposit requests
    Deposits {
        /// Review action
        #[command(subcommand)]
        action: DepositsCommand,
    },

    /// Check whether a newer version is deployed
    Version,

    /// Get or set the display locale
    Locale {
        /// New locale; prints the current one when omitted
        value: Option<String>,
    },

    /// Get or set the display timezone
    Timezone {
        /// New IANA timezone; prints the current one when omitted
        value: Option<String>,
    },
}

/// Deposit review actions
#[derive(Subcommand, Debug, Clone)]
pub enum DepositsCommand {
    /// Approve the given deposit requests
    Approve {
        /// Request ids, comma-separated or repeated
        #[arg(short, long, required = true, value_delimiter = ',')]
        ids: Vec<String>,
    },

    /// Reject the given deposit requests
    Reject {
        /// Request ids, comma-separated or repeated
        #[arg(short, long, required = true, value_delimiter = ',')]
        ids: Vec<String>,
    },
}
