use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an item is a movie or a TV show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
  Movie,
  Tv,
}

impl MediaType {
  /// API path segment for this media type ("movie" or "tv").
  pub fn as_str(&self) -> &'static str {
    match self {
      MediaType::Movie => "movie",
      MediaType::Tv => "tv",
    }
  }

  /// Human-readable plural label for headings.
  pub fn label(&self) -> &'static str {
    match self {
      MediaType::Movie => "Movies",
      MediaType::Tv => "TV Shows",
    }
  }

  /// Parse a media type string, case-insensitively.
  pub fn parse(s: &str) -> Option<Self> {
    match s.trim().to_lowercase().as_str() {
      "movie" => Some(MediaType::Movie),
      "tv" => Some(MediaType::Tv),
      _ => None,
    }
  }
}

impl fmt::Display for MediaType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A movie or TV show, normalized from the provider's per-type field split.
///
/// Genre codes are already resolved to display names; codes the lookup table
/// doesn't know are dropped during conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
  pub id: u64,
  pub title: String,
  pub media_type: MediaType,
  pub genres: Vec<String>,
  pub release_date: String,
  pub poster_path: Option<String>,
  pub overview: String,
}

/// One of the homepage sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
  Trending,
  Upcoming,
  TopRated,
}

impl Section {
  pub const ALL: [Section; 3] = [Section::Trending, Section::Upcoming, Section::TopRated];

  /// Section heading shown in the UI.
  pub fn title(&self) -> &'static str {
    match self {
      Section::Trending => "Trending Now",
      Section::Upcoming => "Coming Soon",
      Section::TopRated => "Top Rated",
    }
  }
}

/// Results of the homepage fan-out, one list per section.
#[derive(Debug, Clone, Default)]
pub struct HomepageContent {
  pub trending: Vec<MediaItem>,
  pub upcoming: Vec<MediaItem>,
  pub top_rated: Vec<MediaItem>,
}
