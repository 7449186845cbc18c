use std::future::Future;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::configuration::SearchSettings;

use super::RecognizerError;

const SEARCH_PATH: &str = "/search.json";
const NO_RESULTS_MARKER: &str = "hasn't returned any results";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no search api key configured")]
    MissingApiKey,
    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("search api responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("malformed search response: {0}")]
    MalformedResponse(String),
    #[error(transparent)]
    Recognizer(#[from] RecognizerError),
}

/// Web search backend returning the snippets of organic results, in rank order.
pub trait SearchEngine {
    fn organic_snippets(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<String>, SearchError>>;
}

impl<T: SearchEngine + ?Sized> SearchEngine for &T {
    fn organic_snippets(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<String>, SearchError>> {
        (**self).organic_snippets(query)
    }
}

pub struct SerpApiClient {
    client: Client,
    settings: SearchSettings,
}

#[derive(Serialize)]
struct SerpQuery<'a> {
    api_key: &'a str,
    engine: &'a str,
    q: &'a str,
    location: &'a str,
    google_domain: &'a str,
    gl: &'a str,
    hl: &'a str,
    nfpr: &'a str,
}

#[derive(Deserialize)]
struct SerpResponse {
    organic_results: Option<Vec<OrganicResult>>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct OrganicResult {
    snippet: Option<String>,
}

impl SerpApiClient {
    pub fn new(client: Client, settings: SearchSettings) -> Self {
        SerpApiClient { client, settings }
    }
}

impl SearchEngine for SerpApiClient {
    async fn organic_snippets(&self, query: &str) -> Result<Vec<String>, SearchError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(SearchError::MissingApiKey)?;

        let url = format!(
            "{}{}",
            self.settings.base_url.trim_end_matches('/'),
            SEARCH_PATH
        );

        let res = self
            .client
            .get(url)
            .query(&SerpQuery {
                api_key,
                engine: &self.settings.engine,
                q: query,
                location: &self.settings.location,
                google_domain: &self.settings.google_domain,
                gl: &self.settings.gl,
                hl: &self.settings.hl,
                nfpr: &self.settings.nfpr,
            })
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(SearchError::Status { status, body });
        }

        let body = res.text().await?;
        parse_organic_snippets(&body)
    }
}

/// Splits a search response into snippets, telling an empty result page apart from a broken one.
pub fn parse_organic_snippets(body: &str) -> Result<Vec<String>, SearchError> {
    let response: SerpResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

    match (response.organic_results, response.error) {
        (Some(results), _) => {
            let total = results.len();
            let snippets: Vec<String> = results.into_iter().filter_map(|r| r.snippet).collect();
            if snippets.len() < total {
                log::debug!(
                    "Skipped {} organic results without a snippet",
                    total - snippets.len()
                );
            }
            Ok(snippets)
        }
        (None, Some(error)) if error.contains(NO_RESULTS_MARKER) => Ok(vec![]),
        (None, Some(error)) => Err(SearchError::MalformedResponse(error)),
        (None, None) => Err(SearchError::MalformedResponse(
            "missing organic_results".to_string(),
        )),
    }
}
