use std::path::{Path, PathBuf};

use crate::error::IgdbError;

pub const CLIENT_ID_VAR: &str = "TWITCH_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "TWITCH_CLIENT_SECRET";
pub const API_URL_VAR: &str = "IGDB_API_URL";

pub const DEFAULT_API_URL: &str = "https://api.igdb.com/v4";

/// Credentials and endpoint for the IGDB API.
///
/// IGDB authenticates through Twitch: the client id/secret pair is exchanged
/// for a bearer token by [`TwitchAuth`](crate::auth::TwitchAuth).
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub api_url: String,
}

/// Where a credential field's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Hard-coded default value.
    Default,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each credential field.
#[derive(Debug)]
pub struct CredentialSources {
    pub client_id: CredentialSource,
    pub client_secret: CredentialSource,
    pub api_url: CredentialSource,
}

/// The `[twitch]` and `[igdb]` tables of the config file.
#[derive(Debug, Default, Clone, serde::Deserialize, serde::Serialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct ConfigFile {
    twitch: Option<TwitchTable>,
    igdb: Option<IgdbTable>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct TwitchTable {
    client_id: Option<String>,
    client_secret: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct IgdbTable {
    api_url: Option<String>,
}

impl Credentials {
    /// Load credentials from environment variables or the config file.
    ///
    /// Priority: env vars > config file > default.
    /// Required: client_id, client_secret.
    pub fn load() -> Result<Self, IgdbError> {
        let config = config_path()
            .and_then(|p| load_config_file(&p))
            .unwrap_or_default();
        Self::resolve(|var| std::env::var(var).ok(), &config)
    }

    /// Resolve credentials from an environment lookup and parsed config.
    pub fn resolve(
        env: impl Fn(&str) -> Option<String>,
        config: &CredentialsConfig,
    ) -> Result<Self, IgdbError> {
        let client_id = env(CLIENT_ID_VAR)
            .or_else(|| config.client_id.clone())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                IgdbError::Config(format!(
                    "Missing client_id. Set {CLIENT_ID_VAR} or add it to the config file"
                ))
            })?;

        let client_secret = env(CLIENT_SECRET_VAR)
            .or_else(|| config.client_secret.clone())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                IgdbError::Config(format!(
                    "Missing client_secret. Set {CLIENT_SECRET_VAR} or add it to the config file"
                ))
            })?;

        let api_url = env(API_URL_VAR)
            .or_else(|| config.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            client_id,
            client_secret,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Replace fields with explicit values (e.g., from CLI args).
    pub fn with_overrides(
        mut self,
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Self {
        if let Some(id) = client_id {
            self.client_id = id;
        }
        if let Some(secret) = client_secret {
            self.client_secret = secret;
        }
        self
    }
}

/// Return the path to the shared config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lan-games").join("config.toml"))
}

/// Save credentials to the config file, creating parent directories as needed.
///
/// Only the `[twitch]` and `[igdb]` tables are touched; other tables in the
/// file are preserved. The API URL is omitted when it is the default.
/// Returns the path the file was written to.
pub fn save_to_file(creds: &Credentials) -> Result<PathBuf, IgdbError> {
    let path = config_path()
        .ok_or_else(|| IgdbError::Config("Could not determine config directory".to_string()))?;
    save_to_path(creds, &path)?;
    Ok(path)
}

/// Write credentials into the config file at `path`.
pub fn save_to_path(creds: &Credentials, path: &Path) -> Result<(), IgdbError> {
    let mut doc: toml::Value = std::fs::read_to_string(path)
        .ok()
        .and_then(|contents| contents.parse().ok())
        .unwrap_or_else(|| toml::Value::Table(Default::default()));

    let table = doc
        .as_table_mut()
        .ok_or_else(|| IgdbError::Config("config root is not a table".to_string()))?;

    let mut twitch = toml::map::Map::new();
    twitch.insert(
        "client_id".to_string(),
        toml::Value::String(creds.client_id.clone()),
    );
    twitch.insert(
        "client_secret".to_string(),
        toml::Value::String(creds.client_secret.clone()),
    );
    table.insert("twitch".to_string(), toml::Value::Table(twitch));

    if creds.api_url == DEFAULT_API_URL {
        table.remove("igdb");
    } else {
        let mut igdb = toml::map::Map::new();
        igdb.insert(
            "api_url".to_string(),
            toml::Value::String(creds.api_url.clone()),
        );
        table.insert("igdb".to_string(), toml::Value::Table(igdb));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(&doc)
        .map_err(|e| IgdbError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Determine where each credential field is coming from.
pub fn credential_sources() -> CredentialSources {
    let config = config_path()
        .and_then(|p| load_config_file(&p))
        .unwrap_or_default();
    sources_from(|var| std::env::var(var).is_ok(), &config)
}

fn sources_from(env_set: impl Fn(&str) -> bool, config: &CredentialsConfig) -> CredentialSources {
    let pick = |var: &'static str, in_config: bool, fallback: CredentialSource| {
        if env_set(var) {
            CredentialSource::EnvVar(var)
        } else if in_config {
            CredentialSource::ConfigFile
        } else {
            fallback
        }
    };

    CredentialSources {
        client_id: pick(
            CLIENT_ID_VAR,
            config.client_id.is_some(),
            CredentialSource::Missing,
        ),
        client_secret: pick(
            CLIENT_SECRET_VAR,
            config.client_secret.is_some(),
            CredentialSource::Missing,
        ),
        api_url: pick(
            API_URL_VAR,
            config.api_url.is_some(),
            CredentialSource::Default,
        ),
    }
}

/// Read the credential tables from a config file. Missing or malformed files
/// yield `None`.
pub fn load_config_file(path: &Path) -> Option<CredentialsConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    let config: ConfigFile = toml::from_str(&content).ok()?;
    let twitch = config.twitch.unwrap_or_default();
    Some(CredentialsConfig {
        client_id: twitch.client_id,
        client_secret: twitch.client_secret,
        api_url: config.igdb.and_then(|i| i.api_url),
    })
}
