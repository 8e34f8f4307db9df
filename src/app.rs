use crate::commands::{self, Command};
use crate::config::Config;
use crate::event::{Event, EventHandler};
use crate::search::validate_query;
use crate::tmdb::{CachedTmdbClient, MediaType};
use crate::ui;
use crate::ui::components::{KeyResult, SearchEvent, SearchInput};
use crate::ui::renderfns::items_per_view;
use crate::ui::view::{View, ViewAction};
use crate::ui::views::{HomeView, ListingView, NotFoundView, SearchResultsView};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tracing::debug;

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
  Normal,
  Command,
}

/// Main application state
pub struct App {
  /// Navigation stack - root is always at index 0
  view_stack: Vec<Box<dyn View>>,

  /// Current input mode
  mode: Mode,

  /// Command input buffer (after pressing :)
  command_input: String,

  /// Selected autocomplete suggestion index
  selected_suggestion: usize,

  /// Search overlay component
  search_input: SearchInput,

  /// Application configuration
  config: Config,

  /// TMDB client with response caching
  tmdb: CachedTmdbClient,

  /// Route to open at startup
  initial_route: String,

  /// Terminal width at the last draw; views capture their page size from it
  last_width: u16,

  /// Whether to quit
  should_quit: bool,
}

impl App {
  pub fn new(config: Config, tmdb: CachedTmdbClient, initial_route: String) -> Self {
    Self {
      view_stack: Vec::new(),
      mode: Mode::Normal,
      command_input: String::new(),
      selected_suggestion: 0,
      search_input: SearchInput::new(),
      config,
      tmdb,
      initial_route,
      last_width: 80,
      should_quit: false,
    }
  }

  pub async fn run(&mut self) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Create event handler
    let mut events = EventHandler::new(Duration::from_millis(250));

    // Open the initial route
    self.last_width = terminal.size()?.width;
    let route = self.initial_route.clone();
    let root = self.view_for_route(&route);
    self.view_stack.push(root);

    // Main loop
    while !self.should_quit {
      self.last_width = terminal.size()?.width;

      // Draw UI
      terminal.draw(|frame| ui::draw(frame, self))?;

      // Handle events
      if let Some(event) = events.next().await {
        self.handle_event(event);
      }
    }

    // Cleanup terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
  }

  /// Build the view for a route name or alias. Unknown routes get the
  /// not-found view instead of an error.
  fn view_for_route(&self, route: &str) -> Box<dyn View> {
    let per_view = items_per_view(self.last_width);
    match commands::find_command(route).map(|c| c.name) {
      Some("home") => Box::new(HomeView::new(self.tmdb.clone(), per_view)),
      Some("movies") => Box::new(ListingView::new(
        MediaType::Movie,
        self.tmdb.clone(),
        per_view,
      )),
      Some("tv") => Box::new(ListingView::new(MediaType::Tv, self.tmdb.clone(), per_view)),
      _ => Box::new(NotFoundView::new(route.to_string())),
    }
  }

  fn handle_event(&mut self, event: Event) {
    match event {
      Event::Key(key) => self.handle_key(key),
      Event::Tick => {
        if let Some(view) = self.view_stack.last_mut() {
          view.tick();
        }
      }
    }
  }

  fn handle_key(&mut self, key: crossterm::event::KeyEvent) {
    if self.mode == Mode::Command {
      self.handle_command_mode_key(key);
      return;
    }

    // The search overlay gets first refusal, including its activation key
    match self.search_input.handle_key(key) {
      KeyResult::Handled => return,
      KeyResult::Event(SearchEvent::Submitted(raw)) => {
        self.submit_search(&raw);
        return;
      }
      KeyResult::Event(SearchEvent::Cancelled) => return,
      KeyResult::NotHandled => {}
    }

    match key.code {
      KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
        self.should_quit = true;
      }
      KeyCode::Char(':') => {
        self.mode = Mode::Command;
        self.command_input.clear();
        self.selected_suggestion = 0;
      }
      _ => {
        // Delegate to the current view
        if let Some(view) = self.view_stack.last_mut() {
          match view.handle_key(key) {
            ViewAction::Push(new_view) => self.view_stack.push(new_view),
            ViewAction::Pop => {
              if self.view_stack.len() > 1 {
                self.view_stack.pop();
              } else {
                self.should_quit = true;
              }
            }
            ViewAction::None => {}
          }
        }
      }
    }
  }

  /// Validate a submitted search term. Valid terms open the results view;
  /// invalid ones put a message in the still-open overlay and fetch nothing.
  fn submit_search(&mut self, raw: &str) {
    match validate_query(raw) {
      Ok(query) => {
        debug!(query = %query, "search submitted");
        self.search_input.deactivate();
        self
          .view_stack
          .push(Box::new(SearchResultsView::new(query, self.tmdb.clone())));
      }
      Err(e) => self.search_input.set_error(e.to_string()),
    }
  }

  fn handle_command_mode_key(&mut self, key: crossterm::event::KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.mode = Mode::Normal;
        self.command_input.clear();
        self.selected_suggestion = 0;
      }
      KeyCode::Enter => {
        self.execute_command();
        self.mode = Mode::Normal;
        self.selected_suggestion = 0;
      }
      KeyCode::Tab | KeyCode::Down => {
        // Navigate autocomplete suggestions
        let suggestions = commands::get_suggestions(&self.command_input);
        if !suggestions.is_empty() {
          self.selected_suggestion = (self.selected_suggestion + 1) % suggestions.len();
        }
      }
      KeyCode::BackTab | KeyCode::Up => {
        // Navigate autocomplete suggestions backwards
        let suggestions = commands::get_suggestions(&self.command_input);
        if !suggestions.is_empty() {
          self.selected_suggestion = if self.selected_suggestion == 0 {
            suggestions.len() - 1
          } else {
            self.selected_suggestion - 1
          };
        }
      }
      KeyCode::Backspace => {
        self.command_input.pop();
        self.selected_suggestion = 0; // Reset selection on input change
      }
      KeyCode::Char(c) => {
        self.command_input.push(c);
        self.selected_suggestion = 0; // Reset selection on input change
      }
      _ => {}
    }
  }

  fn execute_command(&mut self) {
    // Get the command to execute - either from selected suggestion or direct input
    let suggestions = commands::get_suggestions(&self.command_input);
    let cmd = if !suggestions.is_empty() && self.selected_suggestion < suggestions.len() {
      suggestions[self.selected_suggestion].name.to_string()
    } else {
      self.command_input.trim().to_lowercase()
    };

    if cmd.is_empty() {
      self.command_input.clear();
      return;
    }

    match commands::find_command(&cmd).map(|c| c.name) {
      Some("quit") => {
        self.should_quit = true;
      }
      Some(name @ ("home" | "movies" | "tv")) => {
        // Route commands replace the whole stack; pagination and filters do
        // not survive navigation.
        let root = self.view_for_route(name);
        self.view_stack.clear();
        self.view_stack.push(root);
      }
      _ => {
        debug!(command = %cmd, "unknown command");
        self.view_stack.push(Box::new(NotFoundView::new(cmd)));
      }
    }
    self.command_input.clear();
  }

  // Accessors for UI rendering

  pub fn current_view_mut(&mut self) -> Option<&mut Box<dyn View>> {
    self.view_stack.last_mut()
  }

  pub fn mode(&self) -> &Mode {
    &self.mode
  }

  pub fn command_input(&self) -> &str {
    &self.command_input
  }

  pub fn header_title(&self) -> &str {
    self.config.header_title()
  }

  pub fn search_input(&self) -> &SearchInput {
    &self.search_input
  }

  pub fn breadcrumb(&self) -> Vec<String> {
    self
      .view_stack
      .iter()
      .map(|v| v.breadcrumb_label())
      .collect()
  }

  pub fn autocomplete_suggestions(&self) -> Vec<&'static Command> {
    commands::get_suggestions(&self.command_input)
  }

  pub fn selected_suggestion(&self) -> usize {
    self.selected_suggestion
  }
}
