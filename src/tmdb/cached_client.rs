//! Cached TMDB client that wraps TmdbClient with the response cache.

use color_eyre::Result;
use tracing::warn;

use crate::cache::{CacheLayer, CacheResult};
use crate::config::Config;

use super::cache::TmdbQueryKey;
use super::client::TmdbClient;
use super::types::{HomepageContent, MediaItem, MediaType, Section};

/// TMDB client with transparent response caching.
///
/// Wraps the underlying TmdbClient with the same API surface; every list
/// request goes through the 24-hour cache. Also hosts the fan-out operations
/// (homepage sections, dual-type search) where each branch degrades to an
/// empty list on failure instead of taking down the others.
#[derive(Clone)]
pub struct CachedTmdbClient {
  inner: TmdbClient,
  cache: CacheLayer,
}

impl CachedTmdbClient {
  /// Create a new cached TMDB client.
  pub fn new(config: &Config, cache: CacheLayer) -> Result<Self> {
    let inner = TmdbClient::new(config)?;
    Ok(Self { inner, cache })
  }

  /// Trending movies and TV for today, cached per page.
  pub async fn trending(&self, page: u32) -> Result<Vec<MediaItem>> {
    let key = TmdbQueryKey::Trending { page };
    let result: CacheResult<Vec<MediaItem>> = self
      .cache
      .fetch(&key.cache_key(), || {
        let inner = self.inner.clone();
        async move { inner.trending(page).await }
      })
      .await?;
    Ok(result.data)
  }

  /// Popular movies or TV shows, cached per type and page.
  pub async fn popular(&self, media_type: MediaType, page: u32) -> Result<Vec<MediaItem>> {
    let key = TmdbQueryKey::Popular { media_type, page };
    let result = self
      .cache
      .fetch(&key.cache_key(), || {
        let inner = self.inner.clone();
        async move { inner.popular(media_type, page).await }
      })
      .await?;
    Ok(result.data)
  }

  /// Upcoming movie releases, cached per page.
  pub async fn upcoming(&self, page: u32) -> Result<Vec<MediaItem>> {
    let key = TmdbQueryKey::Upcoming { page };
    let result = self
      .cache
      .fetch(&key.cache_key(), || {
        let inner = self.inner.clone();
        async move { inner.upcoming(page).await }
      })
      .await?;
    Ok(result.data)
  }

  /// Top rated movies, cached per page.
  pub async fn top_rated(&self, page: u32) -> Result<Vec<MediaItem>> {
    let key = TmdbQueryKey::TopRated { page };
    let result = self
      .cache
      .fetch(&key.cache_key(), || {
        let inner = self.inner.clone();
        async move { inner.top_rated(page).await }
      })
      .await?;
    Ok(result.data)
  }

  /// Fetch one page for a homepage section.
  pub async fn section_page(&self, section: Section, page: u32) -> Result<Vec<MediaItem>> {
    match section {
      Section::Trending => self.trending(page).await,
      Section::Upcoming => self.upcoming(page).await,
      Section::TopRated => self.top_rated(page).await,
    }
  }

  /// Search one media type, cached per type and normalized query.
  pub async fn search(&self, media_type: MediaType, query: &str) -> Result<Vec<MediaItem>> {
    let key = TmdbQueryKey::Search {
      media_type,
      query: query.to_string(),
    };
    let result = self
      .cache
      .fetch(&key.cache_key(), || {
        let inner = self.inner.clone();
        let query = query.to_string();
        async move { inner.search(media_type, &query).await }
      })
      .await?;
    Ok(result.data)
  }

  /// Search movies and TV shows concurrently, combining the results.
  ///
  /// Each branch independently degrades to an empty list on failure; an empty
  /// combined result is the caller's concern, not an error here.
  pub async fn search_all(&self, query: &str) -> Vec<MediaItem> {
    let (movies, shows) = tokio::join!(
      self.search(MediaType::Movie, query),
      self.search(MediaType::Tv, query),
    );

    combine_search(movies, shows)
  }

  /// Fetch the first page of every homepage section concurrently.
  ///
  /// Partial failure of one section must not prevent the others from
  /// rendering, so each branch degrades to empty independently.
  pub async fn homepage(&self) -> HomepageContent {
    let (trending, upcoming, top_rated) =
      tokio::join!(self.trending(1), self.upcoming(1), self.top_rated(1));

    assemble_homepage(trending, upcoming, top_rated)
  }
}

/// Combine the two search branches, movies first. A failed branch contributes
/// nothing; the surviving branch's items still come through.
fn combine_search(
  movies: Result<Vec<MediaItem>>,
  shows: Result<Vec<MediaItem>>,
) -> Vec<MediaItem> {
  let mut combined = unwrap_or_empty(movies, "movie search");
  combined.extend(unwrap_or_empty(shows, "tv search"));
  combined
}

/// Assemble the homepage from the three section fetches. Sections fail
/// independently; a failed one renders empty while the rest keep their data.
fn assemble_homepage(
  trending: Result<Vec<MediaItem>>,
  upcoming: Result<Vec<MediaItem>>,
  top_rated: Result<Vec<MediaItem>>,
) -> HomepageContent {
  HomepageContent {
    trending: unwrap_or_empty(trending, "trending"),
    upcoming: unwrap_or_empty(upcoming, "upcoming"),
    top_rated: unwrap_or_empty(top_rated, "top rated"),
  }
}

/// Degrade a failed branch of a fan-out to an empty result.
fn unwrap_or_empty(result: Result<Vec<MediaItem>>, what: &str) -> Vec<MediaItem> {
  match result {
    Ok(items) => items,
    Err(e) => {
      warn!(error = %e, "{} fetch failed, continuing with empty results", what);
      Vec::new()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use color_eyre::eyre::eyre;

  fn item(id: u64, title: &str, media_type: MediaType) -> MediaItem {
    MediaItem {
      id,
      title: title.to_string(),
      media_type,
      genres: Vec::new(),
      release_date: "2024-01-01".to_string(),
      poster_path: None,
      overview: String::new(),
    }
  }

  #[test]
  fn test_search_combines_movies_before_tv() {
    let combined = combine_search(
      Ok(vec![item(1, "Dune", MediaType::Movie)]),
      Ok(vec![item(2, "Severance", MediaType::Tv)]),
    );
    assert_eq!(combined.len(), 2);
    assert_eq!(combined[0].media_type, MediaType::Movie);
    assert_eq!(combined[1].media_type, MediaType::Tv);
  }

  #[test]
  fn test_search_survives_one_failed_branch() {
    let combined = combine_search(
      Err(eyre!("timed out")),
      Ok(vec![item(2, "Severance", MediaType::Tv)]),
    );
    assert_eq!(combined.len(), 1);
    assert_eq!(combined[0].title, "Severance");

    let combined = combine_search(Ok(vec![item(1, "Dune", MediaType::Movie)]), Err(eyre!("500")));
    assert_eq!(combined.len(), 1);
    assert_eq!(combined[0].title, "Dune");
  }

  #[test]
  fn test_homepage_sections_fail_independently() {
    let content = assemble_homepage(
      Ok(vec![item(1, "Dune", MediaType::Movie)]),
      Err(eyre!("timed out")),
      Ok(vec![item(3, "Heat", MediaType::Movie)]),
    );
    assert_eq!(content.trending.len(), 1);
    assert!(content.upcoming.is_empty());
    assert_eq!(content.top_rated.len(), 1);
  }

  #[test]
  fn test_homepage_all_failed_is_empty_not_error() {
    let content = assemble_homepage(
      Err(eyre!("down")),
      Err(eyre!("down")),
      Err(eyre!("down")),
    );
    assert!(content.trending.is_empty());
    assert!(content.upcoming.is_empty());
    assert!(content.top_rated.is_empty());
  }
}
