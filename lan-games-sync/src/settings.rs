//! Sync settings: where the list lives and where the catalog is stored.
//!
//! Settings share the config file with the IGDB credentials and live in its
//! `[sync]` table. Resolution order is env var > config file > default.

use std::path::{Path, PathBuf};

use lan_games_igdb::credentials::{CredentialSource, config_path};

pub const LIST_URL_VAR: &str = "LAN_GAMES_LIST_URL";
pub const DATABASE_VAR: &str = "LAN_GAMES_DATABASE";

pub const DEFAULT_LIST_URL: &str =
    "https://raw.githubusercontent.com/herrherrmann/awesome-lan-party-games/master/readme.md";

/// Resolved sync settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    /// URL or local path of the markdown games list.
    pub list_url: String,
    /// Path of the SQLite catalog.
    pub database: PathBuf,
}

/// Provenance of each setting, for `config show`.
#[derive(Debug)]
pub struct SettingSources {
    pub list_url: CredentialSource,
    pub database: CredentialSource,
}

/// The `[sync]` table as written in the config file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncTable {
    pub list_url: Option<String>,
    pub database: Option<String>,
}

/// Default catalog location: `<data_dir>/lan-games/games.db`.
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lan-games")
        .join("games.db")
}

impl SyncSettings {
    /// Load settings from the environment and the shared config file.
    pub fn load() -> Self {
        let table = config_path()
            .and_then(|p| load_sync_table(&p))
            .unwrap_or_default();
        Self::resolve(|var| std::env::var(var).ok(), &table)
    }

    pub fn resolve(env: impl Fn(&str) -> Option<String>, table: &SyncTable) -> Self {
        let list_url = env(LIST_URL_VAR)
            .or_else(|| table.list_url.clone())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_LIST_URL.to_string());

        let database = env(DATABASE_VAR)
            .or_else(|| table.database.clone())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path);

        Self { list_url, database }
    }

    /// Replace fields with explicit values (e.g., from CLI args).
    pub fn with_overrides(mut self, list_url: Option<String>, database: Option<PathBuf>) -> Self {
        if let Some(url) = list_url {
            self.list_url = url;
        }
        if let Some(path) = database {
            self.database = path;
        }
        self
    }
}

/// Determine where each setting is coming from.
pub fn setting_sources() -> SettingSources {
    let table = config_path()
        .and_then(|p| load_sync_table(&p))
        .unwrap_or_default();
    sources_from(|var| std::env::var(var).is_ok(), &table)
}

fn sources_from(env_set: impl Fn(&str) -> bool, table: &SyncTable) -> SettingSources {
    let pick = |var: &'static str, in_config: bool| {
        if env_set(var) {
            CredentialSource::EnvVar(var)
        } else if in_config {
            CredentialSource::ConfigFile
        } else {
            CredentialSource::Default
        }
    };

    SettingSources {
        list_url: pick(LIST_URL_VAR, table.list_url.is_some()),
        database: pick(DATABASE_VAR, table.database.is_some()),
    }
}

/// Read the `[sync]` table. Missing or malformed files yield `None`.
pub fn load_sync_table(path: &Path) -> Option<SyncTable> {
    let contents = std::fs::read_to_string(path).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    let sync = doc.get("sync");
    let field = |key: &str| {
        sync.and_then(|t| t.get(key))
            .and_then(|v| v.as_str())
            .map(str::to_string)
    };
    Some(SyncTable {
        list_url: field("list_url"),
        database: field("database"),
    })
}

/// Write the `[sync]` table into the config file at `path`.
///
/// Uses `toml::Value` for a surgical update so the credential tables are
/// preserved. Values equal to their defaults are left out.
pub fn save_sync_table(path: &Path, settings: &SyncSettings) -> std::io::Result<()> {
    let mut doc: toml::Value = std::fs::read_to_string(path)
        .ok()
        .and_then(|contents| contents.parse().ok())
        .unwrap_or_else(|| toml::Value::Table(Default::default()));

    let table = doc
        .as_table_mut()
        .ok_or_else(|| std::io::Error::other("config root is not a table"))?;

    let mut sync = toml::map::Map::new();
    if settings.list_url != DEFAULT_LIST_URL {
        sync.insert(
            "list_url".to_string(),
            toml::Value::String(settings.list_url.clone()),
        );
    }
    if settings.database != default_database_path() {
        sync.insert(
            "database".to_string(),
            toml::Value::String(settings.database.to_string_lossy().into_owned()),
        );
    }

    if sync.is_empty() {
        table.remove("sync");
    } else {
        table.insert("sync".to_string(), toml::Value::Table(sync));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(std::io::Error::other)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
