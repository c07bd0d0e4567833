use crate::dashboard::Dashboard;
use crate::widgets::WidgetId;

/// Focus bookkeeping for the event loop. The dashboard owns the widgets;
/// this only remembers which one currently receives keys.
#[derive(Default)]
pub struct AppState {
    pub focused: Option<WidgetId>,
}

impl AppState {
    pub fn new() -> Self {
        AppState { focused: None }
    }

    /// Repair focus after widgets were added or removed: a stale id falls
    /// back to the first widget, an empty dashboard to none.
    pub fn ensure_valid(&mut self, dashboard: &Dashboard) {
        let valid = self
            .focused
            .map(|id| dashboard.widget(id).is_some())
            .unwrap_or(false);
        if !valid {
            self.focused = dashboard.widgets().first().map(|w| w.id());
        }
    }

    fn focused_index(&self, dashboard: &Dashboard) -> Option<usize> {
        let focused = self.focused?;
        dashboard.widgets().iter().position(|w| w.id() == focused)
    }

    pub fn focus_next(&mut self, dashboard: &Dashboard) {
        if dashboard.is_empty() {
            self.focused = None;
            return;
        }
        let next = match self.focused_index(dashboard) {
            Some(i) => (i + 1) % dashboard.len(),
            None => 0,
        };
        self.focused = Some(dashboard.widgets()[next].id());
    }

    pub fn focus_prev(&mut self, dashboard: &Dashboard) {
        if dashboard.is_empty() {
            self.focused = None;
            return;
        }
        let prev = match self.focused_index(dashboard) {
            Some(i) => (i + dashboard.len() - 1) % dashboard.len(),
            None => 0,
        };
        self.focused = Some(dashboard.widgets()[prev].id());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_provider::NewsSource;
    use crate::dev::mock_client::MockClient;
    use crate::widgets::{WidgetConfig, WidgetContext};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn dashboard() -> Dashboard {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mock = Arc::new(MockClient::new());
        let ctx = WidgetContext {
            events: tx,
            geocode: mock.clone(),
            weather: mock,
            news_sources: Arc::new(Vec::<Arc<dyn NewsSource>>::new()),
            default_city: "London".to_string(),
        };
        Dashboard::new(ctx)
    }

    #[tokio::test]
    async fn test_focus_cycles_in_insertion_order() {
        let mut dash = dashboard();
        let a = dash.add_widget("todo", WidgetConfig::default()).unwrap();
        let b = dash.add_widget("quote", WidgetConfig::default()).unwrap();

        let mut state = AppState::new();
        state.ensure_valid(&dash);
        assert_eq!(state.focused, Some(a));
        state.focus_next(&dash);
        assert_eq!(state.focused, Some(b));
        state.focus_next(&dash);
        assert_eq!(state.focused, Some(a));
        state.focus_prev(&dash);
        assert_eq!(state.focused, Some(b));
    }

    #[tokio::test]
    async fn test_focus_repaired_after_removal() {
        let mut dash = dashboard();
        let a = dash.add_widget("todo", WidgetConfig::default()).unwrap();
        let b = dash.add_widget("quote", WidgetConfig::default()).unwrap();

        let mut state = AppState::new();
        state.focused = Some(b);
        dash.remove_widget(b);
        state.ensure_valid(&dash);
        assert_eq!(state.focused, Some(a));

        dash.remove_widget(a);
        state.ensure_valid(&dash);
        assert_eq!(state.focused, None);
    }
}
