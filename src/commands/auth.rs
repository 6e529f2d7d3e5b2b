//! Authentication commands: login, logout, whoami

use crate::app::App;
use crate::auth::LoginRequest;
use crate::error::Result;
use colored::Colorize;
use prettytable::{row, Table};

/// Log in and store the session token
///
/// The password comes from the `--password` flag / `MSQADM_PASSWORD` when
/// provided, otherwise from an interactive hidden prompt.
pub async fn run_login(
    app: &App,
    email: String,
    password: Option<String>,
    otp: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()?,
    };

    let request = LoginRequest {
        email,
        password,
        otp_code: otp,
    };

    match app.session.login(&request).await {
        Ok(profile) => {
            println!(
                "{} {}",
                app.locale.text("login.success").green(),
                profile.email
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("{}: {}", app.locale.text("login.failure").red(), e);
            Err(e)
        }
    }
}

/// Log out and clear the stored token
pub async fn run_logout(app: &App) -> Result<()> {
    app.session.logout().await?;
    println!("{}", app.locale.text("logout.success").green());
    Ok(())
}

/// Show the logged-in operator profile
pub async fn run_whoami(app: &App) -> Result<()> {
    if !app.session.is_authenticated() {
        println!("{}", "Not logged in".yellow());
        return Ok(());
    }

    match app.session.profile() {
        None => {
            // Token stored but no profile cached in this process.
            println!("Logged in (profile not cached; re-run `msqadm login` for details)");
        }
        Some(profile) => {
            let mut table = Table::new();
            table.add_row(row!["email", profile.email]);
            table.add_row(row!["name", profile.name]);
            table.add_row(row!["role", profile.role]);
            table.add_row(row!["permissions", profile.permissions.join(", ")]);
            table.add_row(row!["super", profile.is_super]);
            table.printstd();
        }
    }
    Ok(())
}
