pub mod components;
pub mod renderfns;
pub mod view;
pub mod views;

use crate::app::{App, Mode};
use ratatui::prelude::*;
use ratatui::widgets::ListState;

/// Clamp a list selection to the current item count.
///
/// Called before rendering so a selection left over from a longer list (or no
/// selection at all) never points past the end.
pub fn ensure_valid_selection(state: &mut ListState, len: usize) {
  if len == 0 {
    state.select(None);
    return;
  }
  match state.selected() {
    None => state.select(Some(0)),
    Some(i) if i >= len => state.select(Some(len - 1)),
    _ => {}
  }
}

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // Header
      Constraint::Min(1),    // Main content
      Constraint::Length(1), // Footer / breadcrumb
    ])
    .split(frame.area());

  renderfns::draw_header(frame, chunks[0], app.header_title());

  let content_area = chunks[1];
  if let Some(view) = app.current_view_mut() {
    view.render(frame, content_area);
  }

  renderfns::draw_footer(frame, chunks[2], &app.breadcrumb());

  // Overlays draw over the content area
  if app.mode() == &Mode::Command {
    components::draw_command_overlay(
      frame,
      content_area,
      app.command_input(),
      &app.autocomplete_suggestions(),
      app.selected_suggestion(),
    );
  }
  app.search_input().render_overlay(frame, content_area);
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_selection_clamped_to_shorter_list() {
    let mut state = ListState::default();
    state.select(Some(10));
    ensure_valid_selection(&mut state, 3);
    assert_eq!(state.selected(), Some(2));
  }

  #[test]
  fn test_selection_cleared_when_empty() {
    let mut state = ListState::default();
    state.select(Some(0));
    ensure_valid_selection(&mut state, 0);
    assert_eq!(state.selected(), None);
  }

  #[test]
  fn test_selection_defaults_to_first() {
    let mut state = ListState::default();
    ensure_valid_selection(&mut state, 5);
    assert_eq!(state.selected(), Some(0));
  }
}
