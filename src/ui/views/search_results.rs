use crate::filter::{apply_filters, FilterState};
use crate::query::Query;
use crate::tmdb::{CachedTmdbClient, MediaItem};
use crate::ui::components::{cycle_genre, cycle_media_type, draw_filter_bar};
use crate::ui::ensure_valid_selection;
use crate::ui::renderfns::{release_year, truncate, type_color};
use crate::ui::view::{View, ViewAction};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

/// Search results across movies and TV, with the genre/type filter bar.
///
/// The combined search itself never fails (each branch degrades to empty), so
/// the only empty-state here is "no results". Filters narrow what is shown
/// without discarding anything: flipping a filter back restores hidden rows.
pub struct SearchResultsView {
  query_text: String,
  results: Query<Vec<MediaItem>>,
  filter: FilterState,
  list_state: ListState,
}

impl SearchResultsView {
  pub fn new(query_text: String, tmdb: CachedTmdbClient) -> Self {
    let query_for_fetch = query_text.clone();
    let mut results = Query::new(move || {
      let tmdb = tmdb.clone();
      let query = query_for_fetch.clone();
      async move { Ok(tmdb.search_all(&query).await) }
    });

    // Start fetching immediately
    results.fetch();

    Self::with_results(query_text, results)
  }

  fn with_results(query_text: String, results: Query<Vec<MediaItem>>) -> Self {
    Self {
      query_text,
      results,
      filter: FilterState::new(),
      list_state: ListState::default(),
    }
  }

  fn items(&self) -> &[MediaItem] {
    self.results.data().map(|v| v.as_slice()).unwrap_or(&[])
  }
}

impl View for SearchResultsView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match key.code {
      KeyCode::Char('j') | KeyCode::Down => self.list_state.select_next(),
      KeyCode::Char('k') | KeyCode::Up => self.list_state.select_previous(),
      KeyCode::Char('t') => {
        cycle_media_type(&mut self.filter);
        self.list_state.select(Some(0));
      }
      KeyCode::Char('g') => {
        let outcome = apply_filters(self.items(), &self.filter);
        cycle_genre(&mut self.filter, &outcome.available_genres);
        self.list_state.select(Some(0));
      }
      KeyCode::Char('r') => {
        self.filter.reset();
        self.list_state.select(Some(0));
      }
      KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Pop,
      _ => {}
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Length(1), Constraint::Min(0)])
      .split(area);

    let outcome = apply_filters(self.items(), &self.filter);
    draw_filter_bar(frame, chunks[0], &self.filter, &outcome.available_genres);

    // Owned rows: the list state below needs self mutably. Matching per item
    // (not by id) keeps a movie and a TV show that share a provider id apart.
    let visible: Vec<MediaItem> = self
      .items()
      .iter()
      .filter(|item| self.filter.matches(item))
      .cloned()
      .collect();
    let total = self.items().len();

    ensure_valid_selection(&mut self.list_state, visible.len());

    let title = if self.results.is_loading() {
      format!(" Search \"{}\" (loading...) ", self.query_text)
    } else {
      format!(
        " Search \"{}\" ({} of {}) ",
        self.query_text,
        visible.len(),
        total
      )
    };

    let block = Block::default()
      .title(title)
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    if visible.is_empty() && !self.results.is_loading() {
      let content = if total == 0 {
        "No results found. Please try a different search term."
      } else {
        "No results match the active filters. Press 'r' to reset them."
      };
      let paragraph = Paragraph::new(content)
        .block(block)
        .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, chunks[1]);
      return;
    }

    let items: Vec<ListItem> = visible
      .iter()
      .map(|item| {
        let line = Line::from(vec![
          Span::raw(format!("{:<45}", truncate(&item.title, 45))),
          Span::raw(" "),
          Span::styled(
            release_year(item).to_string(),
            Style::default().fg(Color::DarkGray),
          ),
          Span::raw(" "),
          Span::styled(
            format!("{:<9}", item.media_type.label()),
            Style::default().fg(type_color(item.media_type)),
          ),
          Span::raw(" "),
          Span::styled(
            truncate(&item.genres.join(", "), 30),
            Style::default().fg(Color::Gray),
          ),
        ]);
        ListItem::new(line)
      })
      .collect();

    let list = List::new(items)
      .block(block)
      .highlight_style(
        Style::default()
          .bg(Color::DarkGray)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("> ");

    frame.render_stateful_widget(list, chunks[1], &mut self.list_state);
  }

  fn breadcrumb_label(&self) -> String {
    format!("Search \"{}\"", self.query_text)
  }

  fn tick(&mut self) {
    self.results.poll();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::tmdb::MediaType;
  use ratatui::backend::TestBackend;
  use ratatui::Terminal;
  use std::time::Duration;

  fn item(id: u64, title: &str, media_type: MediaType) -> MediaItem {
    MediaItem {
      id,
      title: title.to_string(),
      media_type,
      genres: Vec::new(),
      release_date: "2024-01-01".to_string(),
      poster_path: None,
      overview: String::new(),
    }
  }

  async fn view_with_items(items: Vec<MediaItem>) -> SearchResultsView {
    let mut results = Query::new(move || {
      let items = items.clone();
      async move { Ok::<_, String>(items) }
    });
    results.fetch();
    tokio::time::sleep(Duration::from_millis(10)).await;
    results.poll();
    SearchResultsView::with_results("dune".to_string(), results)
  }

  fn render_to_text(view: &mut SearchResultsView) -> String {
    let backend = TestBackend::new(120, 20);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
      .draw(|frame| {
        let area = frame.area();
        view.render(frame, area);
      })
      .unwrap();
    terminal
      .backend()
      .buffer()
      .content
      .iter()
      .map(|cell| cell.symbol())
      .collect()
  }

  #[tokio::test]
  async fn test_type_filter_hides_rows_sharing_a_provider_id() {
    // The provider reuses ids across movies and TV; the movie filter must
    // keep only the movie row even when both rows carry id 7.
    let mut view = view_with_items(vec![
      item(7, "Dune", MediaType::Movie),
      item(7, "The Sisterhood", MediaType::Tv),
    ])
    .await;

    view.handle_key(crossterm::event::KeyEvent::from(KeyCode::Char('t')));

    let text = render_to_text(&mut view);
    assert!(text.contains("Dune"));
    assert!(!text.contains("Sisterhood"));
    assert!(text.contains("(1 of 2)"));
  }

  #[tokio::test]
  async fn test_filtered_out_everything_keeps_reset_hint() {
    let mut view = view_with_items(vec![item(1, "Dune", MediaType::Movie)]).await;

    // All -> Movies -> TV Shows: no TV rows exist
    view.handle_key(crossterm::event::KeyEvent::from(KeyCode::Char('t')));
    view.handle_key(crossterm::event::KeyEvent::from(KeyCode::Char('t')));

    let text = render_to_text(&mut view);
    assert!(text.contains("No results match the active filters"));
  }
}
