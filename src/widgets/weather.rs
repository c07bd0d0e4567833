use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use tracing::debug;

use super::frame::WidgetFrame;
use super::{InputField, KeyResult, Widget, WidgetConfig, WidgetContext, WidgetEvent, WidgetKind};
use crate::data_provider::{GeocodeProvider, ProviderError, WeatherProvider};
use crate::formatting::{round_temperature, weather_description, weather_icon};
use crate::types::WeatherSnapshot;

/// Preset cities reachable with PageUp/PageDown.
pub const QUICK_CITIES: [&str; 5] = ["London", "Paris", "New York", "Tokyo", "Berlin"];

/// Where the widget is in its lookup cycle.
#[derive(Debug, Clone, PartialEq)]
enum WeatherPhase {
    Idle,
    Loading,
    Displayed,
    Error(String),
}

/// City search plus current conditions.
///
/// A new search while one is in flight is not cancelled: the last
/// response to arrive wins and overwrites the display.
pub struct WeatherWidget {
    frame: WidgetFrame,
    ctx: WidgetContext,
    input: InputField,
    last_city: String,
    phase: WeatherPhase,
    snapshot: Option<WeatherSnapshot>,
    quick_index: usize,
}

impl WeatherWidget {
    /// Construction issues an initial search for the configured city.
    pub fn new(config: WidgetConfig, ctx: WidgetContext) -> Self {
        let city = config
            .city
            .clone()
            .unwrap_or_else(|| ctx.default_city.clone());
        let mut widget = WeatherWidget {
            frame: WidgetFrame::new(WidgetKind::Weather, &config),
            ctx,
            input: InputField::default(),
            last_city: String::new(),
            phase: WeatherPhase::Idle,
            snapshot: None,
            quick_index: 0,
        };
        widget.input.set(city.clone());
        widget.search(&city);
        widget
    }

    /// Kick off the geocode-then-conditions chain. Empty input is a no-op.
    pub fn search(&mut self, city: &str) {
        let city = city.trim().to_string();
        if city.is_empty() {
            return;
        }
        self.last_city = city.clone();
        self.phase = WeatherPhase::Loading;
        self.refresh_view();

        let ctx = self.ctx.clone();
        let id = self.frame.id();
        tokio::spawn(async move {
            let result = fetch_weather(ctx.geocode.as_ref(), ctx.weather.as_ref(), &city).await;
            // Receiver gone means the app is shutting down.
            let _ = ctx.events.send(WidgetEvent::WeatherResolved { widget: id, result });
        });
    }

    /// Re-run the last search, falling back to the default city when the
    /// user never entered one.
    fn retry(&mut self) {
        let city = if self.last_city.is_empty() {
            self.ctx.default_city.clone()
        } else {
            self.last_city.clone()
        };
        self.search(&city);
    }

    fn quick_city(&mut self, forward: bool) {
        self.quick_index = if forward {
            (self.quick_index + 1) % QUICK_CITIES.len()
        } else {
            (self.quick_index + QUICK_CITIES.len() - 1) % QUICK_CITIES.len()
        };
        let city = QUICK_CITIES[self.quick_index];
        self.input.set(city);
        self.search(city);
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn is_error(&self) -> bool {
        matches!(self.phase, WeatherPhase::Error(_))
    }

    pub fn is_displayed(&self) -> bool {
        self.phase == WeatherPhase::Displayed
    }

    fn refresh_view(&mut self) {
        let mut lines = vec![
            Line::from(vec![
                Span::styled("City: ", Style::new().add_modifier(Modifier::BOLD)),
                Span::raw(self.input.value().to_string()),
                Span::styled("▏", Style::new().fg(Color::DarkGray)),
            ]),
            Line::from(""),
        ];

        match &self.phase {
            WeatherPhase::Idle => {
                lines.push(Line::from(Span::styled(
                    "Type a city and press Enter.",
                    Style::new().fg(Color::DarkGray),
                )));
            }
            WeatherPhase::Loading => {
                lines.push(Line::from(Span::styled(
                    format!("Looking up {}…", self.last_city),
                    Style::new().fg(Color::DarkGray),
                )));
            }
            WeatherPhase::Displayed => {
                if let Some(snapshot) = &self.snapshot {
                    lines.push(Line::from(Span::styled(
                        format!("📍 {}", snapshot.city),
                        Style::new().add_modifier(Modifier::BOLD),
                    )));
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("{}°C ", round_temperature(snapshot.temperature_c)),
                            Style::new().add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(format!(
                            "{} {}",
                            weather_icon(snapshot.weather_code),
                            weather_description(snapshot.weather_code)
                        )),
                    ]));
                    lines.push(Line::from(format!(
                        "Humidity: {:.0}%   Wind: {:.1} m/s",
                        snapshot.humidity_percent, snapshot.wind_speed
                    )));
                    lines.push(Line::from(Span::styled(
                        format!("Updated: {}", snapshot.fetched_at.format("%H:%M")),
                        Style::new().fg(Color::DarkGray),
                    )));
                }
            }
            WeatherPhase::Error(message) => {
                lines.push(Line::from(Span::styled(
                    format!("⚠ {}", message),
                    Style::new().fg(Color::Red),
                )));
                lines.push(Line::from(Span::styled(
                    "Press F5 to retry.",
                    Style::new().fg(Color::DarkGray),
                )));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "PgUp/PgDn: quick cities   F5: refresh",
            Style::new().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        )));

        self.frame.replace_content(lines);
    }
}

/// The two sequential lookups behind a search: geocode the city, then
/// fetch current conditions at the resolved coordinates.
pub async fn fetch_weather(
    geocode: &dyn GeocodeProvider,
    weather: &dyn WeatherProvider,
    city: &str,
) -> Result<WeatherSnapshot, ProviderError> {
    let location = geocode.geocode(city).await?;
    debug!(city, resolved = %location.name, "geocoded");
    let conditions = weather
        .current_conditions(location.latitude, location.longitude)
        .await?;
    Ok(WeatherSnapshot::from_conditions(&location, &conditions))
}

impl Widget for WeatherWidget {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Weather
    }

    fn frame(&self) -> &WidgetFrame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut WidgetFrame {
        &mut self.frame
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        match key.code {
            KeyCode::Enter => {
                let city = self.input.value().to_string();
                self.search(&city);
                KeyResult::Handled
            }
            KeyCode::F(5) => {
                self.retry();
                KeyResult::Handled
            }
            KeyCode::PageDown => {
                self.quick_city(true);
                KeyResult::Handled
            }
            KeyCode::PageUp => {
                self.quick_city(false);
                KeyResult::Handled
            }
            _ => {
                if self.input.handle_key(&key) {
                    self.refresh_view();
                    KeyResult::Handled
                } else {
                    KeyResult::NotHandled
                }
            }
        }
    }

    fn on_event(&mut self, event: WidgetEvent) {
        if let WidgetEvent::WeatherResolved { widget, result } = event {
            if widget != self.frame.id() {
                return;
            }
            match result {
                Ok(snapshot) => {
                    self.snapshot = Some(snapshot);
                    self.phase = WeatherPhase::Displayed;
                }
                Err(err) => {
                    self.phase = WeatherPhase::Error(err.to_string());
                }
            }
            self.refresh_view();
        }
    }
}
