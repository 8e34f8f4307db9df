//! Genre and media-type filtering over an already-loaded item collection.
//!
//! Filtering is a presentation toggle: hidden items stay in the underlying
//! collection so a later filter change can bring them back. The genre options
//! offered to the user are recomputed from the currently visible subset, so
//! picking a media type narrows the genre list to genres actually present.

use crate::tmdb::{MediaItem, MediaType};

/// Active filter selections. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
  genre: Option<String>,
  media_type: Option<MediaType>,
}

impl FilterState {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn genre(&self) -> Option<&str> {
    self.genre.as_deref()
  }

  pub fn media_type(&self) -> Option<MediaType> {
    self.media_type
  }

  /// Select a genre, or None for "all genres".
  pub fn set_genre(&mut self, genre: Option<String>) {
    self.genre = genre;
  }

  /// Select a media type, or None for "movies & tv".
  ///
  /// Changing the media type discards the genre selection: a genre picked
  /// under a different type may not exist in the new subset.
  pub fn set_media_type(&mut self, media_type: Option<MediaType>) {
    self.media_type = media_type;
    self.genre = None;
  }

  /// Clear both selections back to "match all".
  pub fn reset(&mut self) {
    self.genre = None;
    self.media_type = None;
  }

  /// Whether an item passes both filters. Genre matching is case-insensitive.
  pub fn matches(&self, item: &MediaItem) -> bool {
    let matches_genre = match &self.genre {
      None => true,
      Some(genre) => item
        .genres
        .iter()
        .any(|g| g.eq_ignore_ascii_case(genre)),
    };

    let matches_type = match self.media_type {
      None => true,
      Some(media_type) => item.media_type == media_type,
    };

    matches_genre && matches_type
  }
}

/// Result of applying filters: which items are shown, and which genre options
/// remain meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
  /// Positions of items that pass both filters, in collection order.
  /// Positions, not ids: the provider's movie and TV id spaces overlap, and
  /// a mixed collection can hold both types under the same id.
  pub visible_indices: Vec<usize>,
  /// De-duplicated genres of visible items, ordered by first occurrence.
  /// Drives the genre selector, so an empty visible set offers no genres.
  pub available_genres: Vec<String>,
}

/// Compute visibility and the surviving genre options for a collection.
pub fn apply_filters(items: &[MediaItem], state: &FilterState) -> FilterOutcome {
  let mut visible_indices = Vec::new();
  let mut available_genres: Vec<String> = Vec::new();

  for (index, item) in items.iter().enumerate() {
    if !state.matches(item) {
      continue;
    }
    visible_indices.push(index);
    for genre in &item.genres {
      if !available_genres.iter().any(|g| g.eq_ignore_ascii_case(genre)) {
        available_genres.push(genre.clone());
      }
    }
  }

  FilterOutcome {
    visible_indices,
    available_genres,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn item(id: u64, genres: &[&str], media_type: MediaType) -> MediaItem {
    MediaItem {
      id,
      title: format!("Item {}", id),
      media_type,
      genres: genres.iter().map(|g| g.to_string()).collect(),
      release_date: "2024-01-01".to_string(),
      poster_path: None,
      overview: String::new(),
    }
  }

  fn test_items() -> Vec<MediaItem> {
    vec![
      item(1, &["Action", "Drama"], MediaType::Movie),
      item(2, &["Drama"], MediaType::Tv),
      item(3, &["Comedy", "Action"], MediaType::Movie),
      item(4, &[], MediaType::Tv),
    ]
  }

  #[test]
  fn test_empty_filter_shows_everything() {
    let items = test_items();
    let outcome = apply_filters(&items, &FilterState::new());

    assert_eq!(outcome.visible_indices, vec![0, 1, 2, 3]);
    // Full genre union, first-occurrence order, no duplicates
    assert_eq!(outcome.available_genres, vec!["Action", "Drama", "Comedy"]);
  }

  #[test]
  fn test_media_type_narrowing() {
    let items = vec![
      item(1, &["Action"], MediaType::Movie),
      item(2, &["Drama"], MediaType::Tv),
    ];
    let mut state = FilterState::new();
    state.set_media_type(Some(MediaType::Movie));

    let outcome = apply_filters(&items, &state);
    assert_eq!(outcome.visible_indices, vec![0]);
    assert_eq!(outcome.available_genres, vec!["Action"]);
  }

  #[test]
  fn test_overlapping_ids_across_types_stay_distinct() {
    // The provider's movie and TV id spaces overlap, so a mixed collection
    // can hold both types under one id. Filtering one type must not drag the
    // other along.
    let items = vec![
      item(7, &["Action"], MediaType::Movie),
      item(7, &["Drama"], MediaType::Tv),
    ];
    let mut state = FilterState::new();
    state.set_media_type(Some(MediaType::Movie));

    let outcome = apply_filters(&items, &state);
    assert_eq!(outcome.visible_indices, vec![0]);
    assert_eq!(outcome.available_genres, vec!["Action"]);

    let visible: Vec<&MediaItem> = items.iter().filter(|i| state.matches(i)).collect();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].media_type, MediaType::Movie);
  }

  #[test]
  fn test_genre_filter_is_case_insensitive() {
    let items = test_items();
    let mut state = FilterState::new();
    state.set_genre(Some("drama".to_string()));

    let outcome = apply_filters(&items, &state);
    assert_eq!(outcome.visible_indices, vec![0, 1]);
  }

  #[test]
  fn test_both_filters_combine() {
    let items = test_items();
    let mut state = FilterState::new();
    state.set_media_type(Some(MediaType::Movie));
    state.set_genre(Some("Action".to_string()));

    let outcome = apply_filters(&items, &state);
    assert_eq!(outcome.visible_indices, vec![0, 2]);
  }

  #[test]
  fn test_changing_media_type_resets_genre() {
    let mut state = FilterState::new();
    state.set_genre(Some("Drama".to_string()));
    state.set_media_type(Some(MediaType::Tv));

    assert_eq!(state.genre(), None);
    assert_eq!(state.media_type(), Some(MediaType::Tv));
  }

  #[test]
  fn test_filtering_is_idempotent() {
    let items = test_items();
    let mut state = FilterState::new();
    state.set_media_type(Some(MediaType::Tv));

    let first = apply_filters(&items, &state);
    let second = apply_filters(&items, &state);
    assert_eq!(first, second);
  }

  #[test]
  fn test_reset_restores_full_visibility() {
    let items = test_items();
    let mut state = FilterState::new();
    state.set_media_type(Some(MediaType::Movie));
    state.set_genre(Some("Action".to_string()));
    state.reset();

    let outcome = apply_filters(&items, &state);
    assert_eq!(outcome.visible_indices, vec![0, 1, 2, 3]);
    assert_eq!(
      outcome.available_genres,
      apply_filters(&items, &FilterState::new()).available_genres
    );
  }

  #[test]
  fn test_no_visible_items_means_no_genres() {
    let items = vec![item(1, &["Action"], MediaType::Movie)];
    let mut state = FilterState::new();
    state.set_media_type(Some(MediaType::Tv));

    let outcome = apply_filters(&items, &state);
    assert!(outcome.visible_indices.is_empty());
    assert!(outcome.available_genres.is_empty());
  }

  #[test]
  fn test_hidden_items_stay_in_collection() {
    let items = test_items();
    let mut state = FilterState::new();
    state.set_media_type(Some(MediaType::Movie));
    apply_filters(&items, &state);

    // The collection itself is untouched; flipping the filter brings
    // everything back.
    state.set_media_type(None);
    let outcome = apply_filters(&items, &state);
    assert_eq!(outcome.visible_indices.len(), items.len());
  }
}
