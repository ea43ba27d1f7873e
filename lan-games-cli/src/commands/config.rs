use std::io::Write;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use lan_games_igdb::credentials::{self, CredentialSource, Credentials, DEFAULT_API_URL};
use lan_games_sync::SyncSettings;
use lan_games_sync::settings::save_sync_table;

use crate::CliError;

fn mask_value(s: &str) -> String {
    match s.char_indices().nth(2) {
        Some((end, _)) => format!("{}****", &s[..end]),
        None => "****".to_string(),
    }
}

fn log_field(name: &str, value: Option<String>, source: &CredentialSource) {
    let source_str = format!("({})", source);
    let label = format!("{}:", name);
    match value {
        Some(v) => log::info!(
            "  {} {} {}",
            label.if_supports_color(Stdout, |t| t.cyan()),
            v,
            source_str.if_supports_color(Stdout, |t| t.dimmed()),
        ),
        None => log::info!(
            "  {} {} {}",
            label.if_supports_color(Stdout, |t| t.cyan()),
            "not set".if_supports_color(Stdout, |t| t.yellow()),
            source_str.if_supports_color(Stdout, |t| t.dimmed()),
        ),
    }
}

/// Show current credentials and settings with their sources.
pub(crate) fn run_config_show(settings: &SyncSettings) {
    let path = credentials::config_path();
    let sources = credentials::credential_sources();

    log::info!(
        "{}",
        "lan-games Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    match &path {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    crate::log_blank();

    // Resolve per field, since Credentials::load() fails when a required one is missing.
    let env_or_file = |source: &CredentialSource, from_file: Option<String>| match source {
        CredentialSource::Missing => None,
        CredentialSource::Default => Some(DEFAULT_API_URL.to_string()),
        CredentialSource::EnvVar(var) => std::env::var(var).ok(),
        CredentialSource::ConfigFile => from_file,
    };
    let file = path
        .as_deref()
        .and_then(credentials::load_config_file)
        .unwrap_or_default();

    log::info!("  {}", "IGDB".if_supports_color(Stdout, |t| t.bold()));
    log_field(
        "client_id",
        env_or_file(&sources.client_id, file.client_id.clone()),
        &sources.client_id,
    );
    log_field(
        "client_secret",
        env_or_file(&sources.client_secret, file.client_secret.clone()).map(|v| mask_value(&v)),
        &sources.client_secret,
    );
    log_field(
        "api_url",
        env_or_file(&sources.api_url, file.api_url.clone()),
        &sources.api_url,
    );
    crate::log_blank();

    // Sync settings are already resolved, including command-line overrides.
    let sync_sources = lan_games_sync::setting_sources();
    log::info!("  {}", "Sync".if_supports_color(Stdout, |t| t.bold()));
    log_field("list_url", Some(settings.list_url.clone()), &sync_sources.list_url);
    log_field(
        "database",
        Some(settings.database.display().to_string()),
        &sync_sources.database,
    );
}

fn prompt(label: &str, default: Option<&str>, required: bool) -> Result<Option<String>, CliError> {
    loop {
        match default {
            Some(def) => print!("  {} [{}]: ", label, def),
            None => print!("  {}: ", label),
        }
        std::io::stdout().flush()?;

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input)? == 0 {
            // EOF
            return Ok(default.map(str::to_string));
        }
        let trimmed = input.trim();

        if trimmed.is_empty() {
            if let Some(def) = default {
                return Ok(Some(def.to_string()));
            }
            if required {
                println!(
                    "    {}",
                    "This field is required.".if_supports_color(Stdout, |t| t.yellow()),
                );
                continue;
            }
            return Ok(None);
        }
        return Ok(Some(trimmed.to_string()));
    }
}

/// Interactively set up IGDB credentials and sync settings.
pub(crate) fn run_config_setup() -> Result<(), CliError> {
    println!("{}", "lan-games Setup".if_supports_color(Stdout, |t| t.bold()));
    println!();

    let path = credentials::config_path()
        .ok_or_else(|| CliError::config("Could not determine config directory"))?;
    let existing = credentials::load_config_file(&path).unwrap_or_default();
    let current = SyncSettings::load();

    println!(
        "  {}",
        "Twitch application credentials for IGDB (required):"
            .if_supports_color(Stdout, |t| t.dimmed()),
    );
    let client_id = prompt("client_id", existing.client_id.as_deref(), true)?
        .ok_or_else(|| CliError::config("client_id is required"))?;
    let client_secret = prompt("client_secret", existing.client_secret.as_deref(), true)?
        .ok_or_else(|| CliError::config("client_secret is required"))?;

    println!();
    println!(
        "  {}",
        "Sync settings (press Enter to keep):".if_supports_color(Stdout, |t| t.dimmed()),
    );
    let list_url = prompt("list_url", Some(current.list_url.as_str()), false)?
        .unwrap_or(current.list_url.clone());
    let current_db = current.database.display().to_string();
    let database = prompt("database", Some(current_db.as_str()), false)?
        .map(PathBuf::from)
        .unwrap_or(current.database.clone());

    let creds = Credentials {
        client_id,
        client_secret,
        api_url: existing
            .api_url
            .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
    };
    credentials::save_to_path(&creds, &path)
        .map_err(|e| CliError::config(format!("Failed to save credentials: {}", e)))?;
    save_sync_table(&path, &SyncSettings { list_url, database })
        .map_err(|e| CliError::config(format!("Failed to save sync settings: {}", e)))?;

    println!();
    println!(
        "{} Configuration saved to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path() {
    match credentials::config_path() {
        Some(path) => log::info!("{}", path.display()),
        None => {
            log::warn!("Could not determine config directory");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_keeps_two_characters() {
        assert_eq!(mask_value("abcdef"), "ab****");
        assert_eq!(mask_value("ab"), "****");
        assert_eq!(mask_value(""), "****");
    }
}
