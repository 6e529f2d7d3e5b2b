//! Deposit review commands

use crate::app::App;
use crate::error::Result;
use colored::Colorize;

/// Approve the given deposit requests
pub async fn run_approve(app: &App, ids: Vec<String>) -> Result<()> {
    tracing::info!("Approving {} deposit request(s)", ids.len());
    match app.resources.deposits.approve(ids).await {
        Ok(ack) => {
            println!(
                "{} ({})",
                app.locale.text("deposit.approve.success").green(),
                ack.result
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            Err(e)
        }
    }
}

/// Reject the given deposit requests
pub async fn run_reject(app: &App, ids: Vec<String>) -> Result<()> {
    tracing::info!("Rejecting {} deposit request(s)", ids.len());
    match app.resources.deposits.reject(ids).await {
        Ok(ack) => {
            println!(
                "{} ({})",
                app.locale.text("deposit.reject.success").green(),
                ack.result
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            Err(e)
        }
    }
}
