use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph, Wrap},
    Frame,
};

use super::{WidgetConfig, WidgetId, WidgetKind};
use crate::config::ThemeConfig;

/// The mounted element every widget owns: header with title and
/// minimize/close control hints, plus a content region.
///
/// Created once at construction and never rebuilt; state changes go
/// through [`WidgetFrame::replace_content`] only, which leaves the header
/// untouched.
pub struct WidgetFrame {
    id: WidgetId,
    title: String,
    minimized: bool,
    closed: bool,
    content: Vec<Line<'static>>,
}

impl WidgetFrame {
    pub fn new(kind: WidgetKind, config: &WidgetConfig) -> Self {
        WidgetFrame {
            id: config.id.unwrap_or_else(WidgetId::next),
            title: config
                .title
                .clone()
                .unwrap_or_else(|| kind.label().to_string()),
            minimized: false,
            closed: false,
            content: Vec::new(),
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Hide or show the content region. Pure presentation.
    pub fn toggle_minimize(&mut self) {
        self.minimized = !self.minimized;
    }

    /// Detach the frame. Idempotent: closing twice is a no-op.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Replace everything inside the content region. The sole mutation
    /// primitive; the header and controls are never disturbed.
    pub fn replace_content(&mut self, lines: Vec<Line<'static>>) {
        self.content = lines;
    }

    /// Current content region, for assertions in tests.
    pub fn content(&self) -> &[Line<'static>] {
        &self.content
    }

    /// Plain-text rendering of the content region.
    pub fn content_text(&self) -> String {
        self.content
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render(&self, f: &mut Frame, area: Rect, focused: bool, theme: &ThemeConfig) {
        if self.closed {
            return;
        }

        let border_style = if focused {
            Style::new()
                .fg(theme.selection_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(theme.unfocused_selection_fg())
        };

        let minimize_hint = if self.minimized { "[+]" } else { "[-]" };
        let block = Block::bordered()
            .border_style(border_style)
            .title(Line::from(format!(" {} ", self.title)))
            .title_top(Line::from(format!(" {minimize_hint} [x] ")).right_aligned());

        let inner = block.inner(area);
        f.render_widget(block, area);

        if self.minimized {
            let hint = Paragraph::new(Line::from("(minimized)"))
                .style(Style::new().fg(Color::DarkGray).add_modifier(Modifier::DIM));
            f.render_widget(hint, inner);
            return;
        }

        let body = Paragraph::new(self.content.clone()).wrap(Wrap { trim: false });
        f.render_widget(body, inner);
    }
}
