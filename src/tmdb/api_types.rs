//! Wire types for TMDB API responses.
//!
//! The provider uses different field names per media type (`title` vs `name`,
//! `release_date` vs `first_air_date`) and only tags items with `media_type`
//! on mixed endpoints like trending and the multi-search. Conversion into the
//! domain `MediaItem` flattens all of that.

use serde::Deserialize;

use super::genres::resolve_genres;
use super::types::{MediaItem, MediaType};

/// A single page of results, the one response shape all list endpoints share.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPage {
  #[serde(default)]
  pub page: u32,
  #[serde(default)]
  pub results: Vec<ApiMediaItem>,
}

/// A raw movie or TV item as the provider returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMediaItem {
  pub id: u64,
  /// Movie display name
  pub title: Option<String>,
  /// TV show display name
  pub name: Option<String>,
  /// Present on mixed endpoints (trending), absent on per-type ones
  pub media_type: Option<String>,
  #[serde(default)]
  pub genre_ids: Vec<u64>,
  pub release_date: Option<String>,
  pub first_air_date: Option<String>,
  pub poster_path: Option<String>,
  #[serde(default)]
  pub overview: String,
}

impl ApiMediaItem {
  /// Convert into a domain item.
  ///
  /// `fallback` is the media type implied by the endpoint (e.g. a search
  /// against `/search/movie`). When neither the payload nor the endpoint pins
  /// the type, having a `title` field means movie, otherwise tv.
  pub fn into_item(self, fallback: Option<MediaType>) -> MediaItem {
    let media_type = self
      .media_type
      .as_deref()
      .and_then(MediaType::parse)
      .or(fallback)
      .unwrap_or(if self.title.is_some() {
        MediaType::Movie
      } else {
        MediaType::Tv
      });

    let title = self
      .title
      .or(self.name)
      .unwrap_or_else(|| "(untitled)".to_string());

    let release_date = self
      .release_date
      .or(self.first_air_date)
      .unwrap_or_default();

    MediaItem {
      id: self.id,
      title,
      media_type,
      genres: resolve_genres(&self.genre_ids),
      release_date,
      poster_path: self.poster_path,
      overview: self.overview,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_movie_item_conversion() {
    let json = r#"{
      "id": 550,
      "title": "Fight Club",
      "genre_ids": [18, 53],
      "release_date": "1999-10-15",
      "poster_path": "/abc.jpg",
      "overview": "An insomniac office worker..."
    }"#;

    let api: ApiMediaItem = serde_json::from_str(json).unwrap();
    let item = api.into_item(Some(MediaType::Movie));

    assert_eq!(item.id, 550);
    assert_eq!(item.title, "Fight Club");
    assert_eq!(item.media_type, MediaType::Movie);
    assert_eq!(item.genres, vec!["Drama", "Thriller"]);
    assert_eq!(item.release_date, "1999-10-15");
  }

  #[test]
  fn test_tv_item_uses_name_and_first_air_date() {
    let json = r#"{
      "id": 1399,
      "name": "Game of Thrones",
      "genre_ids": [10765, 18],
      "first_air_date": "2011-04-17",
      "overview": "Seven noble families..."
    }"#;

    let api: ApiMediaItem = serde_json::from_str(json).unwrap();
    let item = api.into_item(Some(MediaType::Tv));

    assert_eq!(item.title, "Game of Thrones");
    assert_eq!(item.media_type, MediaType::Tv);
    assert_eq!(item.release_date, "2011-04-17");
    assert_eq!(item.genres, vec!["Sci-Fi & Fantasy", "Drama"]);
  }

  #[test]
  fn test_media_type_tag_wins_over_fallback() {
    let json = r#"{"id": 1, "name": "Some Show", "media_type": "tv"}"#;
    let api: ApiMediaItem = serde_json::from_str(json).unwrap();
    let item = api.into_item(Some(MediaType::Movie));
    assert_eq!(item.media_type, MediaType::Tv);
  }

  #[test]
  fn test_untyped_item_infers_from_title_field() {
    let movie: ApiMediaItem = serde_json::from_str(r#"{"id": 1, "title": "M"}"#).unwrap();
    assert_eq!(movie.into_item(None).media_type, MediaType::Movie);

    let tv: ApiMediaItem = serde_json::from_str(r#"{"id": 2, "name": "S"}"#).unwrap();
    assert_eq!(tv.into_item(None).media_type, MediaType::Tv);
  }

  #[test]
  fn test_page_deserializes_with_missing_fields() {
    let json = r#"{"page": 2, "results": [{"id": 9}], "total_pages": 100}"#;
    let page: ApiPage = serde_json::from_str(json).unwrap();
    assert_eq!(page.page, 2);
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].overview, "");
  }
}
