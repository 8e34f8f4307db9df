use crate::query::{Query, QueryState};
use crate::section::SectionPager;
use crate::tmdb::{CachedTmdbClient, HomepageContent, MediaItem, Section};
use crate::ui::renderfns::{release_year, truncate, type_color};
use crate::ui::view::{View, ViewAction};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

/// Homepage view with the trending, upcoming, and top rated sections.
///
/// The first page of every section arrives through one fan-out query; each
/// section then grows independently via its own pager and "show more" fetches.
pub struct HomeView {
  tmdb: CachedTmdbClient,
  content: Query<HomepageContent>,
  pagers: Vec<(Section, SectionPager)>,
  populated: bool,
  focused: usize,
  /// In-flight "show more" fetch, tagged with the section it belongs to.
  /// At most one runs at a time.
  more: Option<(usize, Query<Vec<MediaItem>>)>,
  more_error: Option<String>,
  items_per_view: usize,
}

impl HomeView {
  pub fn new(tmdb: CachedTmdbClient, items_per_view: usize) -> Self {
    let tmdb_for_query = tmdb.clone();
    let mut content = Query::new(move || {
      let tmdb = tmdb_for_query.clone();
      async move { Ok(tmdb.homepage().await) }
    });

    // Start fetching immediately
    content.fetch();

    Self {
      tmdb,
      content,
      pagers: Section::ALL
        .iter()
        .map(|&s| (s, SectionPager::new(items_per_view)))
        .collect(),
      populated: false,
      focused: 0,
      more: None,
      more_error: None,
      items_per_view,
    }
  }

  /// Seed the pagers once the fan-out query completes.
  fn populate(&mut self) {
    let Some(content) = self.content.data() else {
      return;
    };
    let content = content.clone();

    for (section, pager) in &mut self.pagers {
      let items = match section {
        Section::Trending => content.trending.clone(),
        Section::Upcoming => content.upcoming.clone(),
        Section::TopRated => content.top_rated.clone(),
      };
      pager.append(items);
    }
    self.populated = true;
  }

  /// Fetch the next page for the focused section.
  ///
  /// No-op while another "show more" is pending, so holding the key issues
  /// one request rather than one per press.
  fn show_more(&mut self) {
    if self.more.is_some() {
      return;
    }

    let (section, pager) = &self.pagers[self.focused];
    if !pager.has_more() {
      return;
    }

    let section = *section;
    let next_page = pager.current_page() + 1;
    let tmdb = self.tmdb.clone();
    let mut query = Query::new(move || {
      let tmdb = tmdb.clone();
      async move {
        tmdb
          .section_page(section, next_page)
          .await
          .map_err(|e| e.to_string())
      }
    });
    query.fetch();

    self.more = Some((self.focused, query));
    self.more_error = None;
  }

  /// Throw away accumulated pages and reload every section from page 1.
  fn refresh(&mut self) {
    self.pagers = Section::ALL
      .iter()
      .map(|&s| (s, SectionPager::new(self.items_per_view)))
      .collect();
    self.populated = false;
    self.more = None;
    self.more_error = None;
    self.content.refetch();
  }

  fn render_section(&self, frame: &mut Frame, area: Rect, index: usize) {
    let (section, pager) = &self.pagers[index];
    let is_focused = index == self.focused;
    let more_pending = matches!(&self.more, Some((i, _)) if *i == index);

    let mut title = match self.content.state() {
      QueryState::Loading if !self.populated => format!(" {} (loading...) ", section.title()),
      QueryState::Error(e) => format!(" {} (error: {}) ", section.title(), e),
      _ => format!(
        " {} ({} of {}) ",
        section.title(),
        pager.visible_len(),
        pager.items().len()
      ),
    };
    if more_pending {
      title = format!(" {} (loading more...) ", section.title());
    }
    if is_focused {
      if let Some(e) = &self.more_error {
        title = format!(" {} (error: {}) ", section.title(), e);
      }
    }

    let border_color = if is_focused { Color::Yellow } else { Color::Blue };
    let block = Block::default()
      .title(title)
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(border_color));

    if pager.is_empty() {
      let content = if self.content.is_loading() && !self.populated {
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

    let items: Vec<ListItem> = pager
      .visible()
      .iter()
      .map(|item| media_row(item))
      .collect();

    frame.render_widget(List::new(items).block(block), area);
  }
}

/// One list row for a media item: title, year, type, genres.
fn media_row(item: &MediaItem) -> ListItem<'static> {
  let line = Line::from(vec![
    Span::raw(format!("{:<40}", truncate(&item.title, 40))),
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
}

impl View for HomeView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match key.code {
      KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
        self.focused = (self.focused + 1) % self.pagers.len();
      }
      KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
        self.focused = self
          .focused
          .checked_sub(1)
          .unwrap_or(self.pagers.len() - 1);
      }
      KeyCode::Char('m') => self.show_more(),
      KeyCode::Char('r') => self.refresh(),
      KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Pop,
      _ => {}
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let constraints: Vec<Constraint> = self
      .pagers
      .iter()
      .map(|_| Constraint::Ratio(1, self.pagers.len() as u32))
      .collect();
    let section_areas = Layout::vertical(constraints).split(area);

    for index in 0..self.pagers.len() {
      self.render_section(frame, section_areas[index], index);
    }
  }

  fn breadcrumb_label(&self) -> String {
    "Home".to_string()
  }

  fn tick(&mut self) {
    if self.content.poll() && !self.populated {
      self.populate();
    }

    let mut finished = None;
    if let Some((index, query)) = &mut self.more {
      if query.poll() {
        finished = Some((*index, query.state().clone()));
      }
    }

    if let Some((index, state)) = finished {
      match state {
        QueryState::Success(items) => {
          let pager = &mut self.pagers[index].1;
          pager.append(items);
          pager.advance();
        }
        QueryState::Error(e) => self.more_error = Some(e),
        _ => {}
      }
      self.more = None;
    }
  }
}
