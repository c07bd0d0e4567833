use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use super::frame::WidgetFrame;
use super::{InputField, KeyResult, Widget, WidgetConfig, WidgetKind};
use crate::types::TodoItem;

/// Which part of the widget the next key goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TodoFocus {
    Input,
    List,
}

/// A self-contained task list. All mutations are synchronous and fully
/// re-render the content region.
pub struct TodoWidget {
    frame: WidgetFrame,
    tasks: Vec<TodoItem>,
    input: InputField,
    focus: TodoFocus,
    cursor: usize,
}

impl TodoWidget {
    pub fn new(config: WidgetConfig) -> Self {
        let mut widget = TodoWidget {
            frame: WidgetFrame::new(WidgetKind::Todo, &config),
            tasks: Vec::new(),
            input: InputField::default(),
            focus: TodoFocus::Input,
            cursor: 0,
        };
        for text in &config.tasks {
            widget.add_task(text);
        }
        widget.refresh_view();
        widget
    }

    /// Ids are creation timestamps; bump past the previous id so two
    /// tasks added within the same millisecond stay distinct.
    fn next_task_id(&self) -> i64 {
        let now = Local::now().timestamp_millis();
        match self.tasks.last() {
            Some(last) if last.id >= now => last.id + 1,
            _ => now,
        }
    }

    /// Append a task. Trimmed-empty text is silently ignored.
    pub fn add_task(&mut self, text: &str) -> Option<i64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = self.next_task_id();
        self.tasks.push(TodoItem {
            id,
            text: text.to_string(),
            completed: false,
        });
        self.refresh_view();
        Some(id)
    }

    /// Set the completed flag of one task. Unknown ids are a silent no-op.
    pub fn toggle_task(&mut self, id: i64, completed: bool) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.completed = completed;
            self.refresh_view();
        }
    }

    /// Remove a task by id, if present.
    pub fn delete_task(&mut self, id: i64) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            if self.cursor >= self.tasks.len() {
                self.cursor = self.tasks.len().saturating_sub(1);
            }
            self.refresh_view();
        }
    }

    pub fn tasks(&self) -> &[TodoItem] {
        &self.tasks
    }

    /// (total, completed) counters shown under the list.
    pub fn stats(&self) -> (usize, usize) {
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        (self.tasks.len(), completed)
    }

    fn refresh_view(&mut self) {
        let mut lines = Vec::new();

        let input_style = if self.focus == TodoFocus::Input {
            Style::new().add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(Color::DarkGray)
        };
        lines.push(Line::from(vec![
            Span::styled("New task: ", input_style),
            Span::raw(self.input.value().to_string()),
            Span::styled("▏", Style::new().fg(Color::DarkGray)),
        ]));
        lines.push(Line::from(""));

        if self.tasks.is_empty() {
            lines.push(Line::from(Span::styled(
                "No tasks yet. Type one and press Enter.",
                Style::new().fg(Color::DarkGray),
            )));
        }

        for (i, task) in self.tasks.iter().enumerate() {
            let selected = self.focus == TodoFocus::List && i == self.cursor;
            let marker = if selected { "▶ " } else { "  " };
            let checkbox = if task.completed { "[x] " } else { "[ ] " };
            let text_style = if task.completed {
                Style::new()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::new()
            };
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::raw(checkbox),
                Span::styled(task.text.clone(), text_style),
            ]));
        }

        let (total, completed) = self.stats();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Total: {}   Completed: {}", total, completed),
            Style::new().fg(Color::DarkGray),
        )));

        self.frame.replace_content(lines);
    }
}

impl Widget for TodoWidget {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Todo
    }

    fn frame(&self) -> &WidgetFrame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut WidgetFrame {
        &mut self.frame
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        match (self.focus, key.code) {
            (TodoFocus::Input, KeyCode::Enter) => {
                let text = self.input.take();
                self.add_task(&text);
                self.refresh_view();
                KeyResult::Handled
            }
            (TodoFocus::Input, KeyCode::Down) if !self.tasks.is_empty() => {
                self.focus = TodoFocus::List;
                self.cursor = 0;
                self.refresh_view();
                KeyResult::Handled
            }
            (TodoFocus::List, KeyCode::Up) => {
                if self.cursor == 0 {
                    self.focus = TodoFocus::Input;
                } else {
                    self.cursor -= 1;
                }
                self.refresh_view();
                KeyResult::Handled
            }
            (TodoFocus::List, KeyCode::Down) => {
                if self.cursor + 1 < self.tasks.len() {
                    self.cursor += 1;
                    self.refresh_view();
                }
                KeyResult::Handled
            }
            (TodoFocus::List, KeyCode::Char(' ')) => {
                if let Some(task) = self.tasks.get(self.cursor) {
                    let (id, done) = (task.id, task.completed);
                    self.toggle_task(id, !done);
                }
                KeyResult::Handled
            }
            (TodoFocus::List, KeyCode::Delete) | (TodoFocus::List, KeyCode::Char('d')) => {
                if let Some(task) = self.tasks.get(self.cursor) {
                    let id = task.id;
                    self.delete_task(id);
                    if self.tasks.is_empty() {
                        self.focus = TodoFocus::Input;
                    }
                    self.refresh_view();
                }
                KeyResult::Handled
            }
            (TodoFocus::Input, _) => {
                if self.input.handle_key(&key) {
                    self.refresh_view();
                    KeyResult::Handled
                } else {
                    KeyResult::NotHandled
                }
            }
            _ => KeyResult::NotHandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn widget() -> TodoWidget {
        TodoWidget::new(WidgetConfig::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_add_task_empty_text_is_noop() {
        let mut w = widget();
        assert_eq!(w.add_task(""), None);
        assert_eq!(w.add_task("   "), None);
        assert!(w.tasks().is_empty());
    }

    #[test]
    fn test_add_task_appends_uncompleted() {
        let mut w = widget();
        let id = w.add_task("Buy milk").expect("task should be added");
        assert_eq!(w.tasks().len(), 1);
        let task = &w.tasks()[0];
        assert_eq!(task.id, id);
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
    }

    #[test]
    fn test_task_ids_are_unique_within_instance() {
        let mut w = widget();
        let a = w.add_task("one").unwrap();
        let b = w.add_task("two").unwrap();
        let c = w.add_task("three").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut w = widget();
        w.add_task("first");
        w.add_task("second");
        w.add_task("third");
        let texts: Vec<_> = w.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_toggle_task_sets_only_that_item() {
        let mut w = widget();
        let a = w.add_task("one").unwrap();
        let b = w.add_task("two").unwrap();
        w.toggle_task(a, true);
        assert!(w.tasks()[0].completed);
        assert!(!w.tasks()[1].completed);
        w.toggle_task(b, true);
        w.toggle_task(a, false);
        assert!(!w.tasks()[0].completed);
        assert!(w.tasks()[1].completed);
    }

    #[test]
    fn test_toggle_unknown_id_is_silent_noop() {
        let mut w = widget();
        w.add_task("one");
        w.toggle_task(-1, true);
        assert!(!w.tasks()[0].completed);
    }

    #[test]
    fn test_delete_task_removes_by_id() {
        let mut w = widget();
        let a = w.add_task("one").unwrap();
        w.add_task("two");
        w.delete_task(a);
        assert_eq!(w.tasks().len(), 1);
        assert!(w.tasks().iter().all(|t| t.id != a));
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut w = widget();
        w.add_task("one");
        w.delete_task(-1);
        assert_eq!(w.tasks().len(), 1);
    }

    #[test]
    fn test_stats_counters() {
        let mut w = widget();
        let a = w.add_task("one").unwrap();
        w.add_task("two");
        w.toggle_task(a, true);
        assert_eq!(w.stats(), (2, 1));
    }

    #[test]
    fn test_config_seeds_initial_tasks() {
        let config = WidgetConfig {
            tasks: vec!["seeded".to_string(), "".to_string()],
            ..Default::default()
        };
        let w = TodoWidget::new(config);
        assert_eq!(w.tasks().len(), 1);
        assert_eq!(w.tasks()[0].text, "seeded");
    }

    #[test]
    fn test_enter_adds_typed_task_and_clears_input() {
        let mut w = widget();
        for c in "Write spec".chars() {
            w.handle_key(key(KeyCode::Char(c)));
        }
        w.handle_key(key(KeyCode::Enter));
        assert_eq!(w.tasks().len(), 1);
        assert_eq!(w.tasks()[0].text, "Write spec");
        assert!(w.input.is_empty());
    }

    #[test]
    fn test_space_toggles_selected_task_in_list_mode() {
        let mut w = widget();
        w.add_task("one");
        w.handle_key(key(KeyCode::Down)); // enter list mode
        w.handle_key(key(KeyCode::Char(' ')));
        assert!(w.tasks()[0].completed);
    }

    #[test]
    fn test_view_shows_counters() {
        let mut w = widget();
        w.add_task("one");
        let text = w.frame().content_text();
        assert!(text.contains("Total: 1"));
        assert!(text.contains("Completed: 0"));
    }
}
