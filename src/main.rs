//! msqadm - MSQ Admin back-office CLI
//!
//! Main entry point: initializes tracing, loads configuration, wires the
//! application service graph, and dispatches the parsed command.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use msqadm::app::App;
use msqadm::cli::{Cli, Commands, DepositsCommand};
use msqadm::commands;
use msqadm::commands::list::ListFlags;
use msqadm::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = Config::load(&cli.config)?;
    config.validate()?;

    let app = App::new(config)?;

    match cli.command {
        Commands::Login {
            email,
            password,
            otp,
        } => commands::auth::run_login(&app, email, password, otp).await,
        Commands::Logout => commands::auth::run_logout(&app).await,
        Commands::Whoami => commands::auth::run_whoami(&app).await,
        Commands::List {
            entity,
            limit,
            page,
            last_id,
            search,
            status,
            from,
            to,
            json,
        } => {
            let flags = ListFlags {
                limit,
                page,
                last_id,
                search,
                status,
                from,
                to,
                json,
            };
            commands::list::run_list(&app, &entity, &flags).await
        }
        Commands::Deposits { action } => match action {
            DepositsCommand::Approve { ids } => commands::deposits::run_approve(&app, ids).await,
            DepositsCommand::Reject { ids } => commands::deposits::run_reject(&app, ids).await,
        },
        Commands::Version => commands::version::run_version(&app).await,
        Commands::Locale { value } => commands::prefs::run_locale(&app, value),
        Commands::Timezone { value } => commands::prefs::run_timezone(&app, value),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "msqadm=debug" } else { "msqadm=info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
