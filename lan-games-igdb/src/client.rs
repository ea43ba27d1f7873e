use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::auth::{AuthProvider, TwitchAuth};
use crate::credentials::Credentials;
use crate::error::IgdbError;
use crate::types::{IgdbCover, IgdbGame, IgdbGenre};

/// Fields requested for every game record.
pub const GAME_FIELDS: &str = "name,summary,genres,first_release_date,total_rating,url,cover";

/// IGDB category of a primary game, as opposed to DLC, bundles or mods.
pub const MAIN_GAME_CATEGORY: u32 = 0;

pub const SEARCH_LIMIT: usize = 50;
pub const GENRE_PAGE_SIZE: usize = 50;

/// IGDB caps `limit` at 500 per request.
const MAX_LIMIT: usize = 500;

/// HTTP client for the IGDB v4 API.
///
/// Queries are Apicalypse text bodies POSTed to one endpoint per resource.
/// Auth headers are requested from the [`AuthProvider`] before every call.
pub struct IgdbClient {
    http: reqwest::Client,
    base_url: String,
    auth: Arc<dyn AuthProvider>,
}

impl IgdbClient {
    pub fn new(http: reqwest::Client, base_url: &str, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        }
    }

    /// Client authenticated through the Twitch client-credentials flow.
    pub fn from_credentials(creds: &Credentials) -> Result<Self, IgdbError> {
        let http = reqwest::Client::builder().build()?;
        let auth = Arc::new(TwitchAuth::new(http.clone(), creds));
        Ok(Self::new(http, &creds.api_url, auth))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search primary games by name, or list them when `term` is `None`.
    pub async fn fetch_games(&self, term: Option<&str>) -> Result<Vec<IgdbGame>, IgdbError> {
        self.post("games", search_query(term)).await
    }

    /// First page of the genre vocabulary.
    pub async fn fetch_genres(&self) -> Result<Vec<IgdbGenre>, IgdbError> {
        self.post("genres", genres_query()).await
    }

    /// Covers owned by any of the given game ids.
    pub async fn fetch_covers(&self, game_ids: &[i64]) -> Result<Vec<IgdbCover>, IgdbError> {
        if game_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.post("covers", covers_query(game_ids)).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: String,
    ) -> Result<T, IgdbError> {
        let headers = self.auth.auth_headers().await?;
        log::debug!("IGDB /{}: {}", endpoint, body);

        let mut req = self
            .http
            .post(format!("{}/{}", self.base_url, endpoint))
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .header(reqwest::header::ACCEPT, "application/json")
            .body(body);
        for (name, value) in &headers {
            req = req.header(name.as_str(), value.as_str());
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.auth.invalidate().await;
            return Err(IgdbError::Auth(format!(
                "IGDB rejected the access token: {}",
                truncate(&text)
            )));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(IgdbError::RateLimit);
        }
        if !status.is_success() {
            return Err(IgdbError::Api {
                status: status.as_u16(),
                message: truncate(&text).to_string(),
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

fn truncate(text: &str) -> &str {
    match text.char_indices().nth(200) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Build the `/games` query. `None` lists primary games without a name filter.
pub fn search_query(term: Option<&str>) -> String {
    let mut query = String::new();
    if let Some(term) = term {
        let escaped = term.replace('\\', "\\\\").replace('"', "\\\"");
        query.push_str(&format!("search \"{}\"; ", escaped));
    }
    query.push_str(&format!(
        "fields {}; where category = {}; limit {};",
        GAME_FIELDS, MAIN_GAME_CATEGORY, SEARCH_LIMIT
    ));
    query
}

pub fn genres_query() -> String {
    format!("fields id,name; limit {};", GENRE_PAGE_SIZE)
}

pub fn covers_query(game_ids: &[i64]) -> String {
    let ids: Vec<String> = game_ids.iter().map(|id| id.to_string()).collect();
    format!(
        "fields id,game,url; where game = ({}); limit {};",
        ids.join(","),
        game_ids.len().clamp(1, MAX_LIMIT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_query_with_term() {
        assert_eq!(
            search_query(Some("Overcooked")),
            "search \"Overcooked\"; fields name,summary,genres,first_release_date,total_rating,url,cover; where category = 0; limit 50;"
        );
    }

    #[test]
    fn browse_query_has_no_search_clause() {
        let query = search_query(None);
        assert!(!query.contains("search"));
        assert!(query.starts_with("fields "));
        assert!(query.contains("where category = 0;"));
    }

    #[test]
    fn search_term_quotes_are_escaped() {
        let query = search_query(Some(r#"The "Best" Game"#));
        assert!(query.starts_with(r#"search "The \"Best\" Game";"#));
    }

    #[test]
    fn covers_query_lists_ids() {
        assert_eq!(
            covers_query(&[7346, 1020]),
            "fields id,game,url; where game = (7346,1020); limit 2;"
        );
    }

    #[test]
    fn genres_query_page_size() {
        assert_eq!(genres_query(), "fields id,name; limit 50;");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let long = "é".repeat(300);
        assert_eq!(truncate(&long).chars().count(), 200);
        assert_eq!(truncate("short"), "short");
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let auth = Arc::new(crate::auth::StaticAuth::new("id", "tok"));
        let client = IgdbClient::new(reqwest::Client::new(), "http://localhost:1/v4/", auth);
        assert_eq!(client.base_url(), "http://localhost:1/v4");
    }
}
