/// The widget composition model.
///
/// Every panel on the dashboard is a [`Widget`]: a capability set over a
/// shared [`frame::WidgetFrame`] (the mounted element with the header and
/// minimize/close controls). Variants specialize by rebuilding their
/// content region through `replace_content` after every state change.
///
/// Async completions never touch widget state directly: tasks report back
/// as [`WidgetEvent`]s over the app channel and the host delivers them to
/// the owning instance. There is no global widget registry.
pub mod frame;
pub mod news;
pub mod quote;
pub mod todo;
pub mod weather;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::config::ThemeConfig;
use crate::data_provider::{GeocodeProvider, NewsSource, ProviderError, WeatherProvider};
use crate::types::{NewsCategory, NewsItem, WeatherSnapshot};
use frame::WidgetFrame;
pub use news::NewsStatus;

/// Opaque widget identity, unique for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(u64);

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

impl WidgetId {
    /// Synthesize a fresh id.
    pub fn next() -> Self {
        WidgetId(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "widget-{}", self.0)
    }
}

/// The known widget variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Todo,
    Quote,
    Weather,
    News,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 4] = [
        WidgetKind::Todo,
        WidgetKind::Quote,
        WidgetKind::Weather,
        WidgetKind::News,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WidgetKind::Todo => "To-Do List",
            WidgetKind::Quote => "Quote of the Day",
            WidgetKind::Weather => "Weather",
            WidgetKind::News => "Latest News",
        }
    }

    /// Parse a type tag as accepted by `Dashboard::add_widget`.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "todo" => Some(WidgetKind::Todo),
            "quote" => Some(WidgetKind::Quote),
            "weather" => Some(WidgetKind::Weather),
            "news" => Some(WidgetKind::News),
            _ => None,
        }
    }
}

/// Construction-time configuration. All fields optional; variants ignore
/// the ones that do not apply to them.
#[derive(Debug, Clone, Default)]
pub struct WidgetConfig {
    pub id: Option<WidgetId>,
    pub title: Option<String>,
    /// Initial city for a weather widget.
    pub city: Option<String>,
    /// Seed tasks for a to-do widget.
    pub tasks: Vec<String>,
}

/// Completion messages from spawned fetch tasks, addressed by widget id.
#[derive(Debug)]
pub enum WidgetEvent {
    WeatherResolved {
        widget: WidgetId,
        result: Result<WeatherSnapshot, ProviderError>,
    },
    NewsLoaded {
        widget: WidgetId,
        category: NewsCategory,
        items: Vec<NewsItem>,
        status: NewsStatus,
    },
}

impl WidgetEvent {
    pub fn widget(&self) -> WidgetId {
        match self {
            WidgetEvent::WeatherResolved { widget, .. } => *widget,
            WidgetEvent::NewsLoaded { widget, .. } => *widget,
        }
    }
}

/// Shared handles a widget needs to do its work: the event channel back
/// into the app loop and the data providers.
#[derive(Clone)]
pub struct WidgetContext {
    pub events: mpsc::UnboundedSender<WidgetEvent>,
    pub geocode: Arc<dyn GeocodeProvider>,
    pub weather: Arc<dyn WeatherProvider>,
    pub news_sources: Arc<Vec<Arc<dyn NewsSource>>>,
    pub default_city: String,
}

/// Result of key handling by a widget.
pub enum KeyResult {
    /// The widget consumed the key event
    Handled,
    /// The widget didn't handle this key, pass to the app
    NotHandled,
}

/// The minimal operations every widget variant provides. The host depends
/// only on this trait, never on concrete variant types.
pub trait Widget: Send {
    fn kind(&self) -> WidgetKind;

    fn frame(&self) -> &WidgetFrame;

    fn frame_mut(&mut self) -> &mut WidgetFrame;

    /// Handle a key event while this widget is focused.
    fn handle_key(&mut self, key: KeyEvent) -> KeyResult;

    /// Deliver an async completion. Default: not interested.
    fn on_event(&mut self, _event: WidgetEvent) {}

    fn id(&self) -> WidgetId {
        self.frame().id()
    }

    fn title(&self) -> &str {
        self.frame().title()
    }

    /// Draw the widget. Calling this never rebuilds the mounted frame,
    /// it only paints the existing one.
    fn render(&self, f: &mut Frame, area: Rect, focused: bool, theme: &ThemeConfig) {
        self.frame().render(f, area, focused, theme);
    }
}

/// A one-line text input buffer shared by the to-do and weather widgets.
#[derive(Debug, Clone, Default)]
pub struct InputField {
    buffer: String,
}

impl InputField {
    /// Returns true when the key mutated the buffer.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                self.buffer.push(c);
                true
            }
            KeyCode::Backspace => {
                self.buffer.pop();
                true
            }
            _ => false,
        }
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.trim().is_empty()
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.buffer = value.into();
    }

    /// Drain the buffer, returning its trimmed contents.
    pub fn take(&mut self) -> String {
        let value = self.buffer.trim().to_string();
        self.buffer.clear();
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_widget_ids_are_unique() {
        let a = WidgetId::next();
        let b = WidgetId::next();
        assert_ne!(a, b);
        assert!(b.raw() > a.raw());
    }

    #[test]
    fn test_widget_id_display() {
        let id = WidgetId::next();
        assert_eq!(format!("{}", id), format!("widget-{}", id.raw()));
    }

    #[test]
    fn test_kind_parse_known_tags() {
        assert_eq!(WidgetKind::parse("todo"), Some(WidgetKind::Todo));
        assert_eq!(WidgetKind::parse("QUOTE"), Some(WidgetKind::Quote));
        assert_eq!(WidgetKind::parse("weather"), Some(WidgetKind::Weather));
        assert_eq!(WidgetKind::parse("news"), Some(WidgetKind::News));
    }

    #[test]
    fn test_kind_parse_unknown_tag() {
        assert_eq!(WidgetKind::parse("clock"), None);
        assert_eq!(WidgetKind::parse(""), None);
    }

    #[test]
    fn test_input_field_editing() {
        let mut input = InputField::default();
        assert!(input.handle_key(&key(KeyCode::Char('h'))));
        assert!(input.handle_key(&key(KeyCode::Char('i'))));
        assert_eq!(input.value(), "hi");
        assert!(input.handle_key(&key(KeyCode::Backspace)));
        assert_eq!(input.value(), "h");
        assert!(!input.handle_key(&key(KeyCode::Enter)));
    }

    #[test]
    fn test_input_field_take_trims() {
        let mut input = InputField::default();
        input.set("  London  ");
        assert_eq!(input.take(), "London");
        assert!(input.is_empty());
    }
}
