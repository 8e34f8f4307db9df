//! Per-section pagination state for "show more" accumulation.

use crate::tmdb::MediaItem;

/// Accumulated items and page position for one listing or homepage section.
///
/// Items are append-only for the lifetime of the view that owns the pager;
/// navigating away drops the pager and a fresh view starts back at page 1.
/// The visible slice grows by `items_per_view` with each page, so earlier
/// rows keep their position as more arrive.
#[derive(Debug, Clone)]
pub struct SectionPager {
  items: Vec<MediaItem>,
  current_page: u32,
  /// How many items one "page view" shows. Fixed when the view is built
  /// (derived from the terminal size at that moment), not re-derived on
  /// resize.
  items_per_view: usize,
}

impl SectionPager {
  pub fn new(items_per_view: usize) -> Self {
    Self {
      items: Vec::new(),
      current_page: 1,
      items_per_view: items_per_view.max(1),
    }
  }

  pub fn current_page(&self) -> u32 {
    self.current_page
  }

  pub fn items(&self) -> &[MediaItem] {
    &self.items
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// Append a fetched page of items.
  pub fn append(&mut self, items: Vec<MediaItem>) {
    self.items.extend(items);
  }

  /// Advance to the next page and return its number, for the caller to fetch.
  /// The in-flight guard lives with the caller's query, not here.
  pub fn advance(&mut self) -> u32 {
    self.current_page += 1;
    self.current_page
  }

  /// Length of the visible slice: one page-view's worth per page seen so
  /// far, capped at what has actually been accumulated.
  pub fn visible_len(&self) -> usize {
    (self.items_per_view * self.current_page as usize).min(self.items.len())
  }

  /// The visible items under the current page position.
  pub fn visible(&self) -> &[MediaItem] {
    &self.items[..self.visible_len()]
  }

  /// Whether "show more" makes sense: something is loaded, so the provider
  /// may well have another page.
  pub fn has_more(&self) -> bool {
    !self.items.is_empty()
  }
}
