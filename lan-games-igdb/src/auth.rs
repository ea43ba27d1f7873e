//! Twitch client-credentials authentication for IGDB.
//!
//! IGDB requests need a `Client-ID` header and a bearer token obtained from
//! Twitch. The token is cached in memory and persisted to disk together with
//! its expiry, so short-lived processes reuse it instead of requesting a new
//! one every run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use crate::credentials::Credentials;
use crate::error::IgdbError;
use crate::types::TwitchTokenResponse;

const TWITCH_TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";

/// A stored token is treated as expired this many seconds before its real expiry.
const EXPIRY_MARGIN_SECS: i64 = 30;

/// Header map attached to every IGDB request.
pub type AuthHeaders = HashMap<String, String>;

/// Source of currently valid IGDB request headers.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Headers to attach to the next request. Implementations refresh
    /// expired tokens before returning.
    async fn auth_headers(&self) -> Result<AuthHeaders, IgdbError>;

    /// Forget any cached token; called when IGDB rejects the current one.
    async fn invalidate(&self) {}
}

/// Fixed headers, for tokens managed outside this process.
pub struct StaticAuth {
    headers: AuthHeaders,
}

impl StaticAuth {
    pub fn new(client_id: &str, access_token: &str) -> Self {
        Self {
            headers: bearer_headers(client_id, access_token),
        }
    }
}

#[async_trait]
impl AuthProvider for StaticAuth {
    async fn auth_headers(&self) -> Result<AuthHeaders, IgdbError> {
        Ok(self.headers.clone())
    }
}

/// A bearer token and the instant it stops being valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredToken {
    /// Build a token from a Twitch response received at `requested_at`.
    pub fn from_response(response: TwitchTokenResponse, requested_at: DateTime<Utc>) -> Self {
        Self {
            access_token: response.access_token,
            expires_at: requested_at + Duration::seconds(response.expires_in),
        }
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
struct TokenFile {
    access_token: String,
    /// RFC 3339 timestamp.
    expires_at: String,
}

/// Default location of the persisted token.
pub fn token_cache_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("lan-games").join("igdb-token.toml"))
}

/// Read a persisted token. Missing or unreadable files yield `None`.
pub fn load_token(path: &Path) -> Option<StoredToken> {
    let contents = std::fs::read_to_string(path).ok()?;
    let file: TokenFile = toml::from_str(&contents).ok()?;
    let expires_at = DateTime::parse_from_rfc3339(&file.expires_at)
        .ok()?
        .with_timezone(&Utc);
    Some(StoredToken {
        access_token: file.access_token,
        expires_at,
    })
}

/// Persist a token, replacing any previous one.
pub fn save_token(path: &Path, token: &StoredToken) -> Result<(), IgdbError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = TokenFile {
        access_token: token.access_token.clone(),
        expires_at: token.expires_at.to_rfc3339(),
    };
    let contents = toml::to_string(&file)
        .map_err(|e| IgdbError::Config(format!("Failed to serialize token: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}

fn bearer_headers(client_id: &str, access_token: &str) -> AuthHeaders {
    let mut headers = HashMap::new();
    headers.insert("Client-ID".to_string(), client_id.to_string());
    headers.insert(
        "Authorization".to_string(),
        format!("Bearer {}", access_token),
    );
    headers
}

/// Twitch client-credentials flow with in-memory and on-disk token caching.
pub struct TwitchAuth {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    token: Mutex<Option<StoredToken>>,
    token_path: Option<PathBuf>,
}

impl TwitchAuth {
    pub fn new(http: reqwest::Client, creds: &Credentials) -> Self {
        Self {
            http,
            client_id: creds.client_id.clone(),
            client_secret: creds.client_secret.clone(),
            token: Mutex::new(None),
            token_path: token_cache_path(),
        }
    }

    /// Persist the token at `path` instead of the default cache location,
    /// or keep it in memory only with `None`.
    pub fn with_token_path(mut self, path: Option<PathBuf>) -> Self {
        self.token_path = path;
        self
    }

    async fn request_new_token(&self) -> Result<StoredToken, IgdbError> {
        log::info!("Requesting a new IGDB access token from Twitch");
        let requested_at = Utc::now();

        let resp = self
            .http
            .post(TWITCH_TOKEN_URL)
            .query(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(IgdbError::Auth(format!(
                "token request failed (HTTP {}): {}",
                status.as_u16(),
                text.chars().take(200).collect::<String>()
            )));
        }

        let response: TwitchTokenResponse = serde_json::from_str(&text)?;
        Ok(StoredToken::from_response(response, requested_at))
    }
}

#[async_trait]
impl AuthProvider for TwitchAuth {
    async fn auth_headers(&self) -> Result<AuthHeaders, IgdbError> {
        // Held across the refresh so concurrent callers share one token request.
        let mut guard = self.token.lock().await;
        let now = Utc::now();

        if let Some(token) = guard.as_ref().filter(|t| t.is_valid_at(now)) {
            return Ok(bearer_headers(&self.client_id, &token.access_token));
        }

        if let Some(stored) = self
            .token_path
            .as_deref()
            .and_then(load_token)
            .filter(|t| t.is_valid_at(now))
        {
            let headers = bearer_headers(&self.client_id, &stored.access_token);
            *guard = Some(stored);
            return Ok(headers);
        }

        let token = self.request_new_token().await?;
        if let Some(path) = &self.token_path {
            if let Err(e) = save_token(path, &token) {
                log::warn!("Failed to persist IGDB token to {}: {}", path.display(), e);
            }
        }
        let headers = bearer_headers(&self.client_id, &token.access_token);
        *guard = Some(token);
        Ok(headers)
    }

    async fn invalidate(&self) {
        *self.token.lock().await = None;
        if let Some(path) = &self.token_path {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn expiry_is_request_time_plus_lifetime() {
        let response = TwitchTokenResponse {
            access_token: "tok".to_string(),
            expires_in: 3600,
            token_type: "bearer".to_string(),
        };
        let token = StoredToken::from_response(response, at(1_000_000));
        assert_eq!(token.expires_at, at(1_003_600));
    }

    #[test]
    fn token_invalid_inside_margin() {
        let token = StoredToken {
            access_token: "tok".to_string(),
            expires_at: at(1_000),
        };
        assert!(token.is_valid_at(at(900)));
        assert!(!token.is_valid_at(at(975)));
        assert!(!token.is_valid_at(at(2_000)));
    }

    #[test]
    fn token_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("token.toml");
        let token = StoredToken {
            access_token: "abc123".to_string(),
            expires_at: at(1_700_000_000),
        };
        save_token(&path, &token).unwrap();
        assert_eq!(load_token(&path), Some(token));
    }

    #[test]
    fn unreadable_token_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.toml");
        std::fs::write(&path, "not = [valid").unwrap();
        assert_eq!(load_token(&path), None);
        assert_eq!(load_token(&dir.path().join("missing.toml")), None);
    }

    #[tokio::test]
    async fn persisted_token_is_reused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.toml");
        save_token(
            &path,
            &StoredToken {
                access_token: "persisted".to_string(),
                expires_at: Utc::now() + Duration::hours(1),
            },
        )
        .unwrap();

        let creds = Credentials {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            api_url: crate::credentials::DEFAULT_API_URL.to_string(),
        };
        let auth = TwitchAuth::new(reqwest::Client::new(), &creds).with_token_path(Some(path));
        let headers = auth.auth_headers().await.unwrap();
        assert_eq!(headers["Client-ID"], "client");
        assert_eq!(headers["Authorization"], "Bearer persisted");
    }

    #[tokio::test]
    async fn static_auth_headers() {
        let auth = StaticAuth::new("client", "tok");
        let headers = auth.auth_headers().await.unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["Authorization"], "Bearer tok");
    }
}
