//! Locale and timezone preference commands

use crate::app::App;
use crate::error::Result;

/// Get or set the display locale
pub fn run_locale(app: &App, value: Option<String>) -> Result<()> {
    match value {
        None => println!("{}", app.locale.locale()),
        Some(locale) => {
            app.locale.set_locale(&locale)?;
            println!("locale = {}", locale);
        }
    }
    Ok(())
}

/// Get or set the display timezone
pub fn run_timezone(app: &App, value: Option<String>) -> Result<()> {
    match value {
        None => println!("{}", app.timezone.timezone()),
        Some(timezone) => {
            app.timezone.set_timezone(&timezone)?;
            println!("timezone = {}", timezone);
        }
    }
    Ok(())
}
