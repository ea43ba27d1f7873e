/// Errors that can occur while talking to IGDB or Twitch.
#[derive(Debug, thiserror::Error)]
pub enum IgdbError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Twitch authentication failed: {0}")]
    Auth(String),

    #[error("Rate limited by IGDB API")]
    RateLimit,

    #[error("IGDB error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
