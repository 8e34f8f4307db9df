use crate::tmdb::{MediaItem, MediaType};
use ratatui::prelude::Color;

/// Truncate a string to a maximum number of characters, adding "..." if
/// truncated. Counts chars, not bytes; provider titles are not ASCII-only.
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// Get the display color for a media type
pub fn type_color(media_type: MediaType) -> Color {
  match media_type {
    MediaType::Movie => Color::Cyan,
    MediaType::Tv => Color::Magenta,
  }
}

/// How many rows one "show more" step reveals, derived from terminal width.
///
/// Captured once when a view is built; resizing mid-session does not reflow
/// already-revealed rows.
pub fn items_per_view(width: u16) -> usize {
  match width {
    0..=79 => 2,
    80..=119 => 3,
    120..=159 => 4,
    _ => 5,
  }
}

/// Release year from a provider date string, or a dash when absent.
pub fn release_year(item: &MediaItem) -> &str {
  // get() rejects short strings and non-char-boundary cuts alike
  item.release_date.get(..4).unwrap_or("----")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
  }

  #[test]
  fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
  }

  #[test]
  fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 8), "hello...");
  }

  #[test]
  fn test_truncate_counts_chars_not_bytes() {
    // 25 chars but 50 bytes; must come through whole, not panic mid-char
    let accented = "é".repeat(25);
    assert_eq!(truncate(&accented, 40), accented);

    let long = "é".repeat(50);
    assert_eq!(truncate(&long, 40), format!("{}...", "é".repeat(37)));
  }

  #[test]
  fn test_items_per_view_breakpoints() {
    assert_eq!(items_per_view(60), 2);
    assert_eq!(items_per_view(79), 2);
    assert_eq!(items_per_view(80), 3);
    assert_eq!(items_per_view(119), 3);
    assert_eq!(items_per_view(120), 4);
    assert_eq!(items_per_view(200), 5);
  }

  #[test]
  fn test_release_year() {
    let mut item = MediaItem {
      id: 1,
      title: "Dune".to_string(),
      media_type: MediaType::Movie,
      genres: Vec::new(),
      release_date: "2021-10-22".to_string(),
      poster_path: None,
      overview: String::new(),
    };
    assert_eq!(release_year(&item), "2021");

    item.release_date = String::new();
    assert_eq!(release_year(&item), "----");

    item.release_date = "20".to_string();
    assert_eq!(release_year(&item), "----");

    // Byte 4 lands inside a multibyte char; must fall back, not panic
    item.release_date = "２０２１-10-22".to_string();
    assert_eq!(release_year(&item), "----");
  }
}
