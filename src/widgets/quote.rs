use crossterm::event::{KeyCode, KeyEvent};
use rand::Rng;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use super::frame::WidgetFrame;
use super::{KeyResult, Widget, WidgetConfig, WidgetKind};

/// The fixed quote list bundled with the widget.
pub const QUOTES: [&str; 6] = [
    "The only way to do great work is to love what you do. \u{2014} Steve Jobs",
    "Success is the ability to go from one failure to another with no loss of enthusiasm. \u{2014} Winston Churchill",
    "Your time is limited, so don't waste it living someone else's life. \u{2014} Steve Jobs",
    "It always seems impossible until it's done. \u{2014} Nelson Mandela",
    "Simplicity is the ultimate sophistication. \u{2014} Leonardo da Vinci",
    "Whether you think you can, or you think you can't, you're right. \u{2014} Henry Ford",
];

/// Shows one quote at a time; `refresh` re-draws uniformly at random and
/// may repeat the current quote. No failure modes.
pub struct QuoteWidget {
    frame: WidgetFrame,
    index: usize,
}

impl QuoteWidget {
    pub fn new(config: WidgetConfig) -> Self {
        let mut widget = QuoteWidget {
            frame: WidgetFrame::new(WidgetKind::Quote, &config),
            index: rand::thread_rng().gen_range(0..QUOTES.len()),
        };
        widget.refresh_view();
        widget
    }

    pub fn current(&self) -> &'static str {
        QUOTES[self.index]
    }

    /// Pick a new random quote. Not guaranteed distinct from the current one.
    pub fn refresh(&mut self) {
        self.index = rand::thread_rng().gen_range(0..QUOTES.len());
        self.refresh_view();
    }

    fn refresh_view(&mut self) {
        let (text, author) = match self.current().rsplit_once(" \u{2014} ") {
            Some((text, author)) => (text.to_string(), Some(author.to_string())),
            None => (self.current().to_string(), None),
        };

        let mut lines = vec![
            Line::from(Span::styled(
                format!("\u{201c}{}\u{201d}", text),
                Style::new().add_modifier(Modifier::ITALIC),
            )),
        ];
        if let Some(author) = author {
            lines.push(Line::from(Span::styled(
                format!("    \u{2014} {}", author),
                Style::new().fg(Color::DarkGray),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press r for a new quote.",
            Style::new().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        )));

        self.frame.replace_content(lines);
    }
}

impl Widget for QuoteWidget {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Quote
    }

    fn frame(&self) -> &WidgetFrame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut WidgetFrame {
        &mut self.frame
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        match key.code {
            KeyCode::Char('r') => {
                self.refresh();
                KeyResult::Handled
            }
            _ => KeyResult::NotHandled,
        }
    }
}
