use color_eyre::{eyre::eyre, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use tracing::debug;
use url::Url;

use crate::config::Config;

use super::api_types::ApiPage;
use super::types::{MediaItem, MediaType};

/// Maximum items taken from one provider page.
pub const PAGE_SIZE: usize = 20;

/// TMDB API client wrapper
#[derive(Clone)]
pub struct TmdbClient {
  http: reqwest::Client,
  base_url: Url,
  language: String,
}

impl TmdbClient {
  pub fn new(config: &Config) -> Result<Self> {
    let token = Config::get_api_token()?;

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
      .map_err(|e| eyre!("Invalid API token: {}", e))?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);

    let http = reqwest::Client::builder()
      .default_headers(headers)
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    // Url::join treats a base without a trailing slash as a file, which would
    // drop the /3 path segment.
    let mut base = config.tmdb.base_url.clone();
    if !base.ends_with('/') {
      base.push('/');
    }
    let base_url =
      Url::parse(&base).map_err(|e| eyre!("Invalid TMDB base URL {}: {}", base, e))?;

    Ok(Self {
      http,
      base_url,
      language: config.tmdb.language.clone(),
    })
  }

  /// GET a list endpoint and return its results, capped at one page's worth.
  ///
  /// `fallback` is the media type implied by the endpoint, for payloads that
  /// carry no `media_type` tag of their own.
  async fn get_page(
    &self,
    path: &str,
    query: &[(&str, &str)],
    fallback: Option<MediaType>,
  ) -> Result<Vec<MediaItem>> {
    let mut url = self
      .base_url
      .join(path.trim_start_matches('/'))
      .map_err(|e| eyre!("Invalid endpoint path {}: {}", path, e))?;
    url
      .query_pairs_mut()
      .append_pair("language", &self.language)
      .extend_pairs(query);

    debug!(%url, "GET");

    let response = self
      .http
      .get(url.clone())
      .send()
      .await
      .map_err(|e| eyre!("Failed to fetch {}: {}", path, e))?;

    if !response.status().is_success() {
      return Err(eyre!("Failed to fetch {}: HTTP {}", path, response.status()));
    }

    let page: ApiPage = response
      .json()
      .await
      .map_err(|e| eyre!("Failed to parse response for {}: {}", path, e))?;

    Ok(
      page
        .results
        .into_iter()
        .take(PAGE_SIZE)
        .map(|item| item.into_item(fallback))
        .collect(),
    )
  }

  /// Trending movies and TV shows for today.
  pub async fn trending(&self, page: u32) -> Result<Vec<MediaItem>> {
    self
      .get_page("trending/all/day", &[("page", &page.to_string())], None)
      .await
  }

  /// Popular movies or TV shows.
  pub async fn popular(&self, media_type: MediaType, page: u32) -> Result<Vec<MediaItem>> {
    let path = format!("{}/popular", media_type.as_str());
    self
      .get_page(&path, &[("page", &page.to_string())], Some(media_type))
      .await
  }

  /// Upcoming movie releases.
  pub async fn upcoming(&self, page: u32) -> Result<Vec<MediaItem>> {
    self
      .get_page(
        "movie/upcoming",
        &[("page", &page.to_string())],
        Some(MediaType::Movie),
      )
      .await
  }

  /// Top rated movies.
  pub async fn top_rated(&self, page: u32) -> Result<Vec<MediaItem>> {
    self
      .get_page(
        "movie/top_rated",
        &[("page", &page.to_string())],
        Some(MediaType::Movie),
      )
      .await
  }

  /// Search one media type by query string. The query must already be
  /// validated and normalized (see `crate::search`).
  pub async fn search(&self, media_type: MediaType, query: &str) -> Result<Vec<MediaItem>> {
    let path = format!("search/{}", media_type.as_str());
    self
      .get_page(&path, &[("query", query)], Some(media_type))
      .await
  }
}
