use colored::Colorize;

use crate::error::Result;
use crate::fmt::Locale;
use crate::settings::{load_settings, save_settings, settings_path};

pub fn run(api: Option<String>, locale: Option<Locale>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(api) = api {
        settings.api_base = api.trim_end_matches('/').to_string();
    }
    if let Some(locale) = locale {
        settings.locale = locale;
    }
    save_settings(&settings)?;
    println!(
        "{} {}",
        "Settings written to".green(),
        settings_path().display()
    );
    println!("  API:    {}", settings.api_base);
    println!("  Locale: {}", settings.locale);
    Ok(())
}
