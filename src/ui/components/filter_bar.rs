use crate::filter::FilterState;
use crate::tmdb::MediaType;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Cycle the media-type filter: all -> movies -> tv -> all.
/// Changing the type resets the genre selection (see FilterState).
pub fn cycle_media_type(state: &mut FilterState) {
  let next = match state.media_type() {
    None => Some(MediaType::Movie),
    Some(MediaType::Movie) => Some(MediaType::Tv),
    Some(MediaType::Tv) => None,
  };
  state.set_media_type(next);
}

/// Cycle the genre filter through the currently available genres:
/// all -> genres[0] -> ... -> genres[n-1] -> all.
pub fn cycle_genre(state: &mut FilterState, available: &[String]) {
  if available.is_empty() {
    // No genres among visible items; the only option is "all"
    state.set_genre(None);
    return;
  }

  let next = match state.genre() {
    None => Some(available[0].clone()),
    Some(current) => available
      .iter()
      .position(|g| g.eq_ignore_ascii_case(current))
      .and_then(|idx| available.get(idx + 1))
      .cloned(),
  };
  state.set_genre(next);
}

/// Render the filter bar: media-type tabs plus the genre selector.
pub fn draw_filter_bar(frame: &mut Frame, area: Rect, state: &FilterState, available: &[String]) {
  let mut spans = vec![Span::styled(
    "[t] Type ",
    Style::default().fg(Color::Yellow),
  )];

  let type_tabs: [(Option<MediaType>, &str); 3] = [
    (None, " All "),
    (Some(MediaType::Movie), " Movies "),
    (Some(MediaType::Tv), " TV Shows "),
  ];
  for (i, (value, label)) in type_tabs.iter().enumerate() {
    if i > 0 {
      spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
    }
    let style = if state.media_type() == *value {
      Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
      Style::default().fg(Color::Gray)
    };
    spans.push(Span::styled(*label, style));
  }

  spans.push(Span::raw("  "));
  spans.push(Span::styled(
    "[g] Genre ",
    Style::default().fg(Color::Yellow),
  ));
  match state.genre() {
    Some(genre) => spans.push(Span::styled(
      format!(" {} ", genre),
      Style::default().fg(Color::Black).bg(Color::Cyan),
    )),
    None => spans.push(Span::styled(
      " All Genres ",
      Style::default().fg(Color::Gray),
    )),
  }
  spans.push(Span::styled(
    format!(" ({} available) ", available.len()),
    Style::default().fg(Color::DarkGray),
  ));

  spans.push(Span::styled(
    "  [r] reset",
    Style::default().fg(Color::DarkGray),
  ));

  frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_cycle_media_type_wraps() {
    let mut state = FilterState::new();
    cycle_media_type(&mut state);
    assert_eq!(state.media_type(), Some(MediaType::Movie));
    cycle_media_type(&mut state);
    assert_eq!(state.media_type(), Some(MediaType::Tv));
    cycle_media_type(&mut state);
    assert_eq!(state.media_type(), None);
  }

  #[test]
  fn test_cycle_media_type_resets_genre() {
    let mut state = FilterState::new();
    state.set_genre(Some("Drama".to_string()));
    cycle_media_type(&mut state);
    assert_eq!(state.genre(), None);
  }

  #[test]
  fn test_cycle_genre_walks_available_and_wraps() {
    let available = vec!["Action".to_string(), "Drama".to_string()];
    let mut state = FilterState::new();

    cycle_genre(&mut state, &available);
    assert_eq!(state.genre(), Some("Action"));
    cycle_genre(&mut state, &available);
    assert_eq!(state.genre(), Some("Drama"));
    cycle_genre(&mut state, &available);
    assert_eq!(state.genre(), None);
  }

  #[test]
  fn test_cycle_genre_with_nothing_available() {
    let mut state = FilterState::new();
    state.set_genre(Some("Drama".to_string()));
    cycle_genre(&mut state, &[]);
    assert_eq!(state.genre(), None);
  }

  #[test]
  fn test_cycle_genre_recovers_from_stale_selection() {
    // Selected genre no longer among available (e.g. after narrowing)
    let available = vec!["Comedy".to_string()];
    let mut state = FilterState::new();
    state.set_genre(Some("Drama".to_string()));
    cycle_genre(&mut state, &available);
    assert_eq!(state.genre(), None);
  }
}
