use crate::query::{Query, QueryState};
use crate::section::SectionPager;
use crate::tmdb::{CachedTmdbClient, MediaItem, MediaType};
use crate::ui::ensure_valid_selection;
use crate::ui::renderfns::{release_year, truncate, type_color};
use crate::ui::view::{View, ViewAction};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

/// Popular-movies or popular-TV listing with "show more" pagination.
pub struct ListingView {
  media_type: MediaType,
  tmdb: CachedTmdbClient,
  initial: Query<Vec<MediaItem>>,
  pager: SectionPager,
  populated: bool,
  more: Option<Query<Vec<MediaItem>>>,
  more_error: Option<String>,
  list_state: ListState,
  items_per_view: usize,
}

impl ListingView {
  pub fn new(media_type: MediaType, tmdb: CachedTmdbClient, items_per_view: usize) -> Self {
    let tmdb_for_query = tmdb.clone();
    let mut initial = Query::new(move || {
      let tmdb = tmdb_for_query.clone();
      async move { tmdb.popular(media_type, 1).await.map_err(|e| e.to_string()) }
    });

    // Start fetching immediately
    initial.fetch();

    Self {
      media_type,
      tmdb,
      initial,
      pager: SectionPager::new(items_per_view),
      populated: false,
      more: None,
      more_error: None,
      list_state: ListState::default(),
      items_per_view,
    }
  }

  /// Fetch the next popular page. No-op while a fetch is already pending.
  fn show_more(&mut self) {
    if self.more.is_some() || !self.pager.has_more() {
      return;
    }

    let media_type = self.media_type;
    let next_page = self.pager.current_page() + 1;
    let tmdb = self.tmdb.clone();
    let mut query = Query::new(move || {
      let tmdb = tmdb.clone();
      async move {
        tmdb
          .popular(media_type, next_page)
          .await
          .map_err(|e| e.to_string())
      }
    });
    query.fetch();

    self.more = Some(query);
    self.more_error = None;
  }

  /// Throw away accumulated pages and reload from page 1.
  fn refresh(&mut self) {
    self.pager = SectionPager::new(self.items_per_view);
    self.populated = false;
    self.more = None;
    self.more_error = None;
    self.list_state = ListState::default();
    self.initial.refetch();
  }

  fn title(&self) -> String {
    let heading = format!("Popular {}", self.media_type.label());
    if self.more.is_some() {
      return format!(" {} (loading more...) ", heading);
    }
    if let Some(e) = &self.more_error {
      return format!(" {} (error: {}) ", heading, e);
    }
    match self.initial.state() {
      QueryState::Loading if !self.populated => format!(" {} (loading...) ", heading),
      QueryState::Error(e) => format!(" {} (error: {}) ", heading, e),
      _ => format!(
        " {} ({} of {}) ",
        heading,
        self.pager.visible_len(),
        self.pager.items().len()
      ),
    }
  }
}

impl View for ListingView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match key.code {
      KeyCode::Char('j') | KeyCode::Down => self.list_state.select_next(),
      KeyCode::Char('k') | KeyCode::Up => self.list_state.select_previous(),
      KeyCode::Char('m') => self.show_more(),
      KeyCode::Char('r') => self.refresh(),
      KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Pop,
      _ => {}
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    ensure_valid_selection(&mut self.list_state, self.pager.visible_len());

    let block = Block::default()
      .title(self.title())
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    if self.pager.is_empty() {
      let content = if self.initial.is_error() {
        "Failed to load. Press 'r' to retry."
      } else if self.initial.is_loading() {
        "Loading..."
      } else {
        "Nothing to show here right now."
      };
      let paragraph = Paragraph::new(content)
        .block(block)
        .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, area);
      return;
    }

    let items: Vec<ListItem> = self
      .pager
      .visible()
      .iter()
      .map(|item| {
        let line = Line::from(vec![
          Span::raw(format!("{:<50}", truncate(&item.title, 50))),
          Span::raw(" "),
          Span::styled(
            release_year(item).to_string(),
            Style::default().fg(Color::DarkGray),
          ),
          Span::raw(" "),
          Span::styled(
            truncate(&item.genres.join(", "), 40),
            Style::default().fg(type_color(item.media_type)),
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

    frame.render_stateful_widget(list, area, &mut self.list_state);
  }

  fn breadcrumb_label(&self) -> String {
    self.media_type.label().to_string()
  }

  fn tick(&mut self) {
    if self.initial.poll() && !self.populated {
      if let Some(items) = self.initial.data() {
        let items = items.clone();
        self.pager.append(items);
        self.populated = true;
      }
    }

    let mut finished = None;
    if let Some(query) = &mut self.more {
      if query.poll() {
        finished = Some(query.state().clone());
      }
    }

    if let Some(state) = finished {
      match state {
        QueryState::Success(items) => {
          self.pager.append(items);
          self.pager.advance();
        }
        QueryState::Error(e) => self.more_error = Some(e),
        _ => {}
      }
      self.more = None;
    }
  }
}
