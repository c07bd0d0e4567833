use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::warn;

use super::frame::WidgetFrame;
use super::{KeyResult, Widget, WidgetConfig, WidgetContext, WidgetEvent, WidgetKind};
use crate::cache;
use crate::data_provider::NewsSource;
use crate::fixtures;
use crate::formatting::truncate_to_width;
use crate::types::{NewsCategory, NewsItem};

/// Per-source budget. An attempt that has not resolved by then is
/// abandoned (its future is dropped) and the next source is tried.
pub const NEWS_SOURCE_TIMEOUT: Duration = Duration::from_secs(3);

const TITLE_WIDTH: usize = 46;

/// How the currently displayed list was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsStatus {
    Loading,
    /// Fresh result from the named live source.
    Live(&'static str),
    FromCache,
    /// Every live source failed or timed out; built-in content.
    Fallback,
}

impl NewsStatus {
    pub fn label(&self) -> String {
        match self {
            NewsStatus::Loading => "loading…".to_string(),
            NewsStatus::Live(source) => format!("live · {}", source),
            NewsStatus::FromCache => "from cache".to_string(),
            NewsStatus::Fallback => "offline · built-in headlines".to_string(),
        }
    }
}

/// Headlines for the current category, obtained from the first live
/// source to answer in time, the short-lived cache, or built-in fallback
/// content.
pub struct NewsWidget {
    frame: WidgetFrame,
    ctx: WidgetContext,
    category: NewsCategory,
    items: Vec<NewsItem>,
    status: NewsStatus,
    cursor: usize,
}

impl NewsWidget {
    /// Construction issues an initial cache-preferring load.
    pub fn new(config: WidgetConfig, ctx: WidgetContext) -> Self {
        let mut widget = NewsWidget {
            frame: WidgetFrame::new(WidgetKind::News, &config),
            ctx,
            category: NewsCategory::Technology,
            items: Vec::new(),
            status: NewsStatus::Loading,
            cursor: 0,
        };
        widget.load_news(true);
        widget
    }

    pub fn category(&self) -> NewsCategory {
        self.category
    }

    pub fn items(&self) -> &[NewsItem] {
        &self.items
    }

    pub fn status(&self) -> NewsStatus {
        self.status
    }

    /// Spawn a load for the current category.
    pub fn load_news(&mut self, prefer_cache: bool) {
        self.status = NewsStatus::Loading;
        self.refresh_view();

        let ctx = self.ctx.clone();
        let id = self.frame.id();
        let category = self.category;
        tokio::spawn(async move {
            let (items, status) = load_for_category(&ctx.news_sources, category, prefer_cache).await;
            let _ = ctx.events.send(WidgetEvent::NewsLoaded {
                widget: id,
                category,
                items,
                status,
            });
        });
    }

    /// Change category and reload (cache-preferring). Same category is a no-op.
    pub fn switch_category(&mut self, category: NewsCategory) {
        if category == self.category {
            return;
        }
        self.category = category;
        self.cursor = 0;
        self.load_news(true);
    }

    fn open_selected(&self) {
        if let Some(item) = self.items.get(self.cursor) {
            if !item.has_real_url() {
                return;
            }
            if let Err(err) = open::that(&item.url) {
                warn!(url = %item.url, error = %err, "failed to open news item");
            }
        }
    }

    fn refresh_view(&mut self) {
        let mut lines = Vec::new();

        // Category tabs.
        let mut tab_spans = Vec::new();
        for (i, cat) in NewsCategory::ALL.iter().enumerate() {
            if i > 0 {
                tab_spans.push(Span::raw(" | "));
            }
            let style = if *cat == self.category {
                Style::new()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::new().fg(Color::DarkGray)
            };
            tab_spans.push(Span::styled(cat.label(), style));
        }
        lines.push(Line::from(tab_spans));
        lines.push(Line::from(Span::styled(
            self.status.label(),
            Style::new().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));

        if self.items.is_empty() && self.status != NewsStatus::Loading {
            lines.push(Line::from(Span::styled(
                "No headlines.",
                Style::new().fg(Color::DarkGray),
            )));
        }

        for (i, item) in self.items.iter().enumerate() {
            let selected = i == self.cursor;
            let marker = if selected { "▶ " } else { "  " };
            let title_style = if selected {
                Style::new().add_modifier(Modifier::BOLD)
            } else {
                Style::new()
            };
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(truncate_to_width(&item.title, TITLE_WIDTH), title_style),
            ]));
            lines.push(Line::from(Span::styled(
                format!("    {} · {}", item.source_name, item.published_label),
                Style::new().fg(Color::DarkGray),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "←/→: category   r: reload   Enter: open",
            Style::new().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        )));

        self.frame.replace_content(lines);
    }
}

/// Resolve headlines for a category.
///
/// With `prefer_cache`, an unexpired cache entry short-circuits the live
/// sources entirely. Otherwise each source is tried in priority order,
/// raced against [`NEWS_SOURCE_TIMEOUT`]; failures, timeouts and empty
/// results are logged and skipped. The first live winner is written back
/// to the cache. When everything fails, built-in fallback content is
/// returned and the cache is left untouched.
pub async fn load_for_category(
    sources: &[Arc<dyn NewsSource>],
    category: NewsCategory,
    prefer_cache: bool,
) -> (Vec<NewsItem>, NewsStatus) {
    if prefer_cache {
        if let Some(items) = cache::lookup(category).await {
            return (items, NewsStatus::FromCache);
        }
    }

    for source in sources {
        match timeout(NEWS_SOURCE_TIMEOUT, source.fetch(category)).await {
            Ok(Ok(items)) if !items.is_empty() => {
                cache::store(category, items.clone()).await;
                return (items, NewsStatus::Live(source.name()));
            }
            Ok(Ok(_)) => {
                warn!(source = source.name(), %category, "news source returned no items");
            }
            Ok(Err(err)) => {
                warn!(source = source.name(), %category, error = %err, "news source failed");
            }
            Err(_) => {
                warn!(source = source.name(), %category, "news source timed out");
            }
        }
    }

    (fixtures::fallback_news(category), NewsStatus::Fallback)
}

impl Widget for NewsWidget {
    fn kind(&self) -> WidgetKind {
        WidgetKind::News
    }

    fn frame(&self) -> &WidgetFrame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut WidgetFrame {
        &mut self.frame
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        match key.code {
            KeyCode::Left => {
                self.switch_category(self.category.prev());
                KeyResult::Handled
            }
            KeyCode::Right => {
                self.switch_category(self.category.next());
                KeyResult::Handled
            }
            KeyCode::Char('r') => {
                self.load_news(false);
                KeyResult::Handled
            }
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                self.refresh_view();
                KeyResult::Handled
            }
            KeyCode::Down => {
                if self.cursor + 1 < self.items.len() {
                    self.cursor += 1;
                    self.refresh_view();
                }
                KeyResult::Handled
            }
            KeyCode::Enter => {
                self.open_selected();
                KeyResult::Handled
            }
            _ => KeyResult::NotHandled,
        }
    }

    fn on_event(&mut self, event: WidgetEvent) {
        if let WidgetEvent::NewsLoaded {
            widget,
            category,
            items,
            status,
        } = event
        {
            if widget != self.frame.id() {
                return;
            }
            // A load finishing after the user already switched away must
            // not clobber the newer category's state.
            if category != self.category {
                return;
            }
            self.items = items;
            self.status = status;
            if self.cursor >= self.items.len() {
                self.cursor = self.items.len().saturating_sub(1);
            }
            self.refresh_view();
        }
    }
}
