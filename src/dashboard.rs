/// The dashboard host.
///
/// Owns the mount area and the set of live widget instances. Widgets are
/// created by type tag plus configuration, tracked in insertion order and
/// removed by identity. The host never inspects widget internals; it
/// depends only on the [`Widget`] trait.
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use tracing::{error, info};

use crate::config::ThemeConfig;
use crate::widgets::news::NewsWidget;
use crate::widgets::quote::QuoteWidget;
use crate::widgets::todo::TodoWidget;
use crate::widgets::weather::WeatherWidget;
use crate::widgets::{
    Widget, WidgetConfig, WidgetContext, WidgetEvent, WidgetId, WidgetKind,
};

pub struct Dashboard {
    ctx: WidgetContext,
    widgets: Vec<Box<dyn Widget>>,
}

impl Dashboard {
    pub fn new(ctx: WidgetContext) -> Self {
        Dashboard {
            ctx,
            widgets: Vec::new(),
        }
    }

    /// Create a widget by type tag. Unknown tags are reported as a failed
    /// construction: logged, `None`, host state untouched.
    pub fn add_widget(&mut self, type_tag: &str, config: WidgetConfig) -> Option<WidgetId> {
        match WidgetKind::parse(type_tag) {
            Some(kind) => Some(self.add_widget_kind(kind, config)),
            None => {
                error!(type_tag, "unknown widget type");
                None
            }
        }
    }

    /// Create a widget of a known kind and attach it to the registry.
    pub fn add_widget_kind(&mut self, kind: WidgetKind, config: WidgetConfig) -> WidgetId {
        let widget: Box<dyn Widget> = match kind {
            WidgetKind::Todo => Box::new(TodoWidget::new(config)),
            WidgetKind::Quote => Box::new(QuoteWidget::new(config)),
            WidgetKind::Weather => Box::new(WeatherWidget::new(config, self.ctx.clone())),
            WidgetKind::News => Box::new(NewsWidget::new(config, self.ctx.clone())),
        };
        let id = widget.id();
        info!(%id, kind = kind.label(), "widget added");
        self.widgets.push(widget);
        id
    }

    /// Close and drop a widget by identity. Absent ids report failure and
    /// leave the registry unchanged.
    pub fn remove_widget(&mut self, id: WidgetId) -> bool {
        match self.widgets.iter_mut().find(|w| w.id() == id) {
            Some(widget) => {
                widget.frame_mut().close();
                self.widgets.retain(|w| w.id() != id);
                info!(%id, "widget removed");
                true
            }
            None => false,
        }
    }

    /// The live registry, insertion order.
    pub fn widgets(&self) -> &[Box<dyn Widget>] {
        &self.widgets
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn widget(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.widgets.iter().find(|w| w.id() == id).map(|w| &**w)
    }

    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut Box<dyn Widget>> {
        self.widgets.iter_mut().find(|w| w.id() == id)
    }

    /// Route an async completion to the owning instance. A completion for
    /// a widget that has since been closed is dropped silently.
    pub fn deliver(&mut self, event: WidgetEvent) {
        let id = event.widget();
        if let Some(widget) = self.widget_mut(id) {
            widget.on_event(event);
        }
    }

    /// Paint all live widgets into the mount area, two columns wide.
    pub fn render(&self, f: &mut Frame, area: Rect, focused: Option<WidgetId>, theme: &ThemeConfig) {
        if self.widgets.is_empty() {
            return;
        }
        let rows = self.widgets.len().div_ceil(2);
        let row_constraints = vec![Constraint::Ratio(1, rows as u32); rows];
        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(row_constraints)
            .split(area);

        for (i, widget) in self.widgets.iter().enumerate() {
            let row = &row_areas[i / 2];
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(*row);
            let cell = cols[i % 2];
            widget.render(f, cell, focused == Some(widget.id()), theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_provider::NewsSource;
    use crate::dev::mock_client::{MockClient, MockNewsSource};
    use crate::widgets::KeyResult;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn test_dashboard() -> (Dashboard, mpsc::UnboundedReceiver<WidgetEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mock = Arc::new(MockClient::new());
        let ctx = WidgetContext {
            events: tx,
            geocode: mock.clone(),
            weather: mock,
            news_sources: Arc::new(vec![
                Arc::new(MockNewsSource::new("wire")) as Arc<dyn NewsSource>
            ]),
            default_city: "London".to_string(),
        };
        (Dashboard::new(ctx), rx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_add_widget_known_tags() {
        let _guard = crate::cache::TEST_MUTEX.lock().await;
        let (mut dash, _rx) = test_dashboard();
        for tag in ["todo", "quote", "weather", "news"] {
            let id = dash.add_widget(tag, WidgetConfig::default());
            assert!(id.is_some(), "tag {tag} should construct");
        }
        assert_eq!(dash.len(), 4);
    }

    #[tokio::test]
    async fn test_add_widget_unknown_tag_leaves_registry_unchanged() {
        let (mut dash, _rx) = test_dashboard();
        dash.add_widget("todo", WidgetConfig::default());
        assert_eq!(dash.add_widget("clock", WidgetConfig::default()), None);
        assert_eq!(dash.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_widget_present_id() {
        let (mut dash, _rx) = test_dashboard();
        let id = dash.add_widget("todo", WidgetConfig::default()).unwrap();
        assert!(dash.remove_widget(id));
        assert_eq!(dash.len(), 0);
        assert!(dash.widget(id).is_none());
    }

    #[tokio::test]
    async fn test_remove_widget_absent_id() {
        let (mut dash, _rx) = test_dashboard();
        dash.add_widget("quote", WidgetConfig::default());
        assert!(!dash.remove_widget(WidgetId::next()));
        assert_eq!(dash.len(), 1);
    }

    #[tokio::test]
    async fn test_registry_keeps_insertion_order() {
        let (mut dash, _rx) = test_dashboard();
        dash.add_widget("quote", WidgetConfig::default());
        dash.add_widget("todo", WidgetConfig::default());
        let kinds: Vec<_> = dash.widgets().iter().map(|w| w.kind()).collect();
        assert_eq!(kinds, vec![WidgetKind::Quote, WidgetKind::Todo]);
    }

    #[tokio::test]
    async fn test_deliver_to_closed_widget_is_dropped() {
        let _guard = crate::cache::TEST_MUTEX.lock().await;
        let (mut dash, mut rx) = test_dashboard();
        let id = dash.add_widget("weather", WidgetConfig::default()).unwrap();
        let event = rx.recv().await.unwrap();
        dash.remove_widget(id);
        // Must not panic, must not resurrect the widget.
        dash.deliver(event);
        assert!(dash.is_empty());
    }

    #[tokio::test]
    async fn test_end_to_end_todo_scenario() {
        // Mount a dashboard, add a todo widget, add a task, complete it.
        let (mut dash, _rx) = test_dashboard();
        let id = dash.add_widget("todo", WidgetConfig::default()).unwrap();

        let widget = dash.widget_mut(id).unwrap();
        for c in "Write spec".chars() {
            widget.handle_key(key(KeyCode::Char(c)));
        }
        widget.handle_key(key(KeyCode::Enter));
        widget.handle_key(key(KeyCode::Down));
        widget.handle_key(key(KeyCode::Char(' ')));

        let text = dash.widget(id).unwrap().frame().content_text();
        assert!(text.contains("Total: 1"));
        assert!(text.contains("Completed: 1"));
        assert!(text.contains("Write spec"));
    }

    #[tokio::test]
    async fn test_minimize_is_per_widget_presentation_only() {
        let (mut dash, _rx) = test_dashboard();
        let a = dash.add_widget("todo", WidgetConfig::default()).unwrap();
        let b = dash.add_widget("quote", WidgetConfig::default()).unwrap();

        dash.widget_mut(a).unwrap().frame_mut().toggle_minimize();
        assert!(dash.widget(a).unwrap().frame().is_minimized());
        assert!(!dash.widget(b).unwrap().frame().is_minimized());
    }

    #[tokio::test]
    async fn test_unfocused_widget_key_result() {
        let (mut dash, _rx) = test_dashboard();
        let id = dash.add_widget("quote", WidgetConfig::default()).unwrap();
        let result = dash.widget_mut(id).unwrap().handle_key(key(KeyCode::F(12)));
        assert!(matches!(result, KeyResult::NotHandled));
    }
}
