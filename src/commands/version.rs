//! Deployed-version check command

use crate::app::App;
use crate::error::Result;
use crate::version::VersionStatus;
use colored::Colorize;

/// Compare the running version against the deployed one
pub async fn run_version(app: &App) -> Result<()> {
    match app.version.check().await? {
        VersionStatus::UpToDate => {
            println!(
                "{} ({})",
                app.locale.text("version.current").green(),
                env!("CARGO_PKG_VERSION")
            );
        }
        VersionStatus::Outdated { latest } => {
            println!(
                "{}: {} -> {}",
                app.locale.text("version.outdated").yellow(),
                env!("CARGO_PKG_VERSION"),
                latest
            );
        }
    }
    Ok(())
}
