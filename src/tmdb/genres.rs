//! Static genre code lookup.
//!
//! TMDB list endpoints return numeric `genre_ids` rather than names. These are
//! the provider's published movie and TV genre tables; they change rarely
//! enough that a static copy beats an extra request per session.

/// Movie genre codes.
const MOVIE_GENRES: &[(u64, &str)] = &[
  (28, "Action"),
  (12, "Adventure"),
  (16, "Animation"),
  (35, "Comedy"),
  (80, "Crime"),
  (99, "Documentary"),
  (18, "Drama"),
  (10751, "Family"),
  (14, "Fantasy"),
  (36, "History"),
  (27, "Horror"),
  (10402, "Music"),
  (9648, "Mystery"),
  (10749, "Romance"),
  (878, "Science Fiction"),
  (10770, "TV Movie"),
  (53, "Thriller"),
  (10752, "War"),
  (37, "Western"),
];

/// TV genre codes. Overlapping ids (Comedy, Drama, ...) carry the same name.
const TV_GENRES: &[(u64, &str)] = &[
  (10759, "Action & Adventure"),
  (10762, "Kids"),
  (10763, "News"),
  (10764, "Reality"),
  (10765, "Sci-Fi & Fantasy"),
  (10766, "Soap"),
  (10767, "Talk"),
  (10768, "War & Politics"),
];

/// Resolve a numeric genre code to its display name.
pub fn genre_name(id: u64) -> Option<&'static str> {
  MOVIE_GENRES
    .iter()
    .chain(TV_GENRES.iter())
    .find(|(code, _)| *code == id)
    .map(|(_, name)| *name)
}

/// Resolve a list of genre codes to display names, dropping unknown codes.
pub fn resolve_genres(ids: &[u64]) -> Vec<String> {
  ids
    .iter()
    .filter_map(|id| genre_name(*id))
    .map(String::from)
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_movie_genre_lookup() {
    assert_eq!(genre_name(28), Some("Action"));
    assert_eq!(genre_name(878), Some("Science Fiction"));
  }

  #[test]
  fn test_tv_genre_lookup() {
    assert_eq!(genre_name(10765), Some("Sci-Fi & Fantasy"));
  }

  #[test]
  fn test_unknown_code() {
    assert_eq!(genre_name(424242), None);
  }

  #[test]
  fn test_resolve_drops_unknown_codes() {
    // Unknown codes are silently dropped, order is preserved
    assert_eq!(
      resolve_genres(&[28, 424242, 18]),
      vec!["Action".to_string(), "Drama".to_string()]
    );
  }

  #[test]
  fn test_resolve_empty() {
    assert!(resolve_genres(&[]).is_empty());
  }
}
