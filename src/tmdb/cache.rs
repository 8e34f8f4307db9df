//! Cache key construction for TMDB requests.

use super::types::MediaType;

/// Identity of a cacheable TMDB request.
///
/// Every parameter that affects the response body is part of the key, so
/// distinct logical requests never collide and identical requests always hit
/// the same entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TmdbQueryKey {
  /// Trending movies and TV, one page
  Trending { page: u32 },
  /// Popular items of one media type, one page
  Popular { media_type: MediaType, page: u32 },
  /// Upcoming movie releases, one page
  Upcoming { page: u32 },
  /// Top rated movies, one page
  TopRated { page: u32 },
  /// Search within one media type
  Search { media_type: MediaType, query: String },
}

impl TmdbQueryKey {
  /// Deterministic storage key for this request.
  pub fn cache_key(&self) -> String {
    match self {
      Self::Trending { page } => format!("tmdb_trending_all_day_page_{}", page),
      Self::Popular { media_type, page } => {
        format!("tmdb_{}_popular_page_{}", media_type, page)
      }
      Self::Upcoming { page } => format!("tmdb_movie_upcoming_page_{}", page),
      Self::TopRated { page } => format!("tmdb_movie_top_rated_page_{}", page),
      Self::Search { media_type, query } => {
        format!("tmdb_search_{}_{}", media_type, normalize_query(query))
      }
    }
  }
}

/// Normalize a search query for consistent keying.
/// Trims whitespace and lowercases for case-insensitive matching.
pub fn normalize_query(query: &str) -> String {
  query.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_identical_requests_share_a_key() {
    let a = TmdbQueryKey::Popular {
      media_type: MediaType::Movie,
      page: 2,
    };
    let b = TmdbQueryKey::Popular {
      media_type: MediaType::Movie,
      page: 2,
    };
    assert_eq!(a.cache_key(), b.cache_key());
  }

  #[test]
  fn test_distinct_requests_never_collide() {
    let keys = [
      TmdbQueryKey::Trending { page: 1 },
      TmdbQueryKey::Trending { page: 2 },
      TmdbQueryKey::Popular {
        media_type: MediaType::Movie,
        page: 1,
      },
      TmdbQueryKey::Popular {
        media_type: MediaType::Tv,
        page: 1,
      },
      TmdbQueryKey::Upcoming { page: 1 },
      TmdbQueryKey::TopRated { page: 1 },
      TmdbQueryKey::Search {
        media_type: MediaType::Movie,
        query: "dune".to_string(),
      },
      TmdbQueryKey::Search {
        media_type: MediaType::Tv,
        query: "dune".to_string(),
      },
      TmdbQueryKey::Search {
        media_type: MediaType::Movie,
        query: "dune 2".to_string(),
      },
    ];

    let mut seen = std::collections::HashSet::new();
    for key in &keys {
      assert!(seen.insert(key.cache_key()), "collision: {:?}", key);
    }
  }

  #[test]
  fn test_search_keys_are_case_insensitive() {
    let a = TmdbQueryKey::Search {
      media_type: MediaType::Movie,
      query: " Dune ".to_string(),
    };
    let b = TmdbQueryKey::Search {
      media_type: MediaType::Movie,
      query: "dune".to_string(),
    };
    assert_eq!(a.cache_key(), b.cache_key());
  }

  #[test]
  fn test_key_format() {
    assert_eq!(
      TmdbQueryKey::Trending { page: 3 }.cache_key(),
      "tmdb_trending_all_day_page_3"
    );
    assert_eq!(
      TmdbQueryKey::Search {
        media_type: MediaType::Tv,
        query: "the wire".to_string()
      }
      .cache_key(),
      "tmdb_search_tv_the wire"
    );
  }
}
