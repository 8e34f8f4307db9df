use crate::ui::view::{View, ViewAction};
use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Shown when a command names a route that doesn't exist.
pub struct NotFoundView {
  route: String,
}

impl NotFoundView {
  pub fn new(route: String) -> Self {
    Self { route }
  }
}

impl View for NotFoundView {
  fn handle_key(&mut self, _key: KeyEvent) -> ViewAction {
    // Any key goes back
    ViewAction::Pop
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Red));

    let lines = vec![
      Line::from(""),
      Line::from(Span::styled(
        "404",
        Style::default().fg(Color::Red).bold(),
      )),
      Line::from(""),
      Line::from(format!("There is no \"{}\" here.", self.route)),
      Line::from(""),
      Line::from(Span::styled(
        "Press any key to go back.",
        Style::default().fg(Color::DarkGray),
      )),
    ];

    let paragraph = Paragraph::new(lines)
      .block(block)
      .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
  }

  fn breadcrumb_label(&self) -> String {
    "Not Found".to_string()
  }
}
