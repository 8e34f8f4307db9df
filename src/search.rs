//! Search input validation.
//!
//! Validation happens before any network call: an invalid term produces an
//! inline message and no request at all.

use std::fmt;

pub use crate::tmdb::cache::normalize_query;

/// Longest accepted search term, measured after trimming.
pub const MAX_QUERY_LEN: usize = 100;

/// Why a search term was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchInputError {
  Empty,
  TooLong,
}

impl fmt::Display for SearchInputError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SearchInputError::Empty => write!(f, "Please enter a search term."),
      SearchInputError::TooLong => {
        write!(f, "Search term too long (max {} characters).", MAX_QUERY_LEN)
      }
    }
  }
}

/// Normalize and validate a raw search term.
///
/// Returns the normalized (trimmed, lowercased) query, accepted when its
/// length is between 1 and 100 characters inclusive.
pub fn validate_query(raw: &str) -> Result<String, SearchInputError> {
  let normalized = normalize_query(raw);
  if normalized.is_empty() {
    return Err(SearchInputError::Empty);
  }
  if normalized.chars().count() > MAX_QUERY_LEN {
    return Err(SearchInputError::TooLong);
  }
  Ok(normalized)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_normalizes_case_and_whitespace() {
    assert_eq!(validate_query("  The Matrix  "), Ok("the matrix".to_string()));
  }

  #[test]
  fn test_empty_rejected() {
    assert_eq!(validate_query(""), Err(SearchInputError::Empty));
    assert_eq!(validate_query("   "), Err(SearchInputError::Empty));
  }

  #[test]
  fn test_hundred_chars_accepted() {
    let query = "a".repeat(100);
    assert_eq!(validate_query(&query), Ok(query));
  }

  #[test]
  fn test_hundred_and_one_chars_rejected() {
    let query = "a".repeat(101);
    assert_eq!(validate_query(&query), Err(SearchInputError::TooLong));
  }

  #[test]
  fn test_length_checked_after_trimming() {
    // 100 meaningful chars padded with whitespace still passes
    let query = format!("  {}  ", "a".repeat(100));
    assert_eq!(validate_query(&query), Ok("a".repeat(100)));
  }
}
