/// Shared types used across the application
///
/// This module contains the data model that is shared between
/// the widgets, the data providers and the one-shot commands.
use chrono::{DateTime, Local};

/// A single entry in a to-do widget's task list.
///
/// Ids are millisecond timestamps, kept unique within one widget
/// instance by bumping past the previously issued id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: i64,
    pub text: String,
    pub completed: bool,
}

/// Result of a geocoding lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions at a coordinate, as returned by a weather provider.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub weather_code: u8,
    pub humidity_percent: f64,
    pub wind_speed: f64,
}

/// A fully resolved weather lookup. Replaces the previous snapshot
/// wholesale; never partially merged.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature_c: f64,
    pub weather_code: u8,
    pub humidity_percent: f64,
    pub wind_speed: f64,
    pub fetched_at: DateTime<Local>,
}

impl WeatherSnapshot {
    pub fn from_conditions(location: &GeoLocation, conditions: &CurrentConditions) -> Self {
        WeatherSnapshot {
            city: location.name.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
            temperature_c: conditions.temperature_c,
            weather_code: conditions.weather_code,
            humidity_percent: conditions.humidity_percent,
            wind_speed: conditions.wind_speed,
            fetched_at: Local::now(),
        }
    }
}

/// News categories the news widget can display. Fixed small set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NewsCategory {
    Technology,
    Science,
    Business,
    Sports,
}

impl NewsCategory {
    pub const ALL: [NewsCategory; 4] = [
        NewsCategory::Technology,
        NewsCategory::Science,
        NewsCategory::Business,
        NewsCategory::Sports,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NewsCategory::Technology => "Technology",
            NewsCategory::Science => "Science",
            NewsCategory::Business => "Business",
            NewsCategory::Sports => "Sports",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            NewsCategory::Technology => NewsCategory::Science,
            NewsCategory::Science => NewsCategory::Business,
            NewsCategory::Business => NewsCategory::Sports,
            NewsCategory::Sports => NewsCategory::Technology,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            NewsCategory::Technology => NewsCategory::Sports,
            NewsCategory::Science => NewsCategory::Technology,
            NewsCategory::Business => NewsCategory::Science,
            NewsCategory::Sports => NewsCategory::Business,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "technology" | "tech" => Some(NewsCategory::Technology),
            "science" => Some(NewsCategory::Science),
            "business" => Some(NewsCategory::Business),
            "sports" | "sport" => Some(NewsCategory::Sports),
            _ => None,
        }
    }
}

impl std::fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single displayed news entry. Items with a placeholder (non-http)
/// url are inert: they cannot be opened in a browser.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsItem {
    pub title: String,
    pub description: String,
    pub source_name: String,
    pub url: String,
    pub image_url: Option<String>,
    pub published_label: String,
}

impl NewsItem {
    /// Whether this item points at a real, openable location.
    pub fn has_real_url(&self) -> bool {
        self.url.starts_with("http://") || self.url.starts_with("https://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_cycle_is_closed() {
        for cat in NewsCategory::ALL {
            assert_eq!(cat.next().prev(), cat);
            assert_eq!(cat.prev().next(), cat);
        }
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(NewsCategory::parse("tech"), Some(NewsCategory::Technology));
        assert_eq!(NewsCategory::parse("Science"), Some(NewsCategory::Science));
        assert_eq!(NewsCategory::parse("SPORTS"), Some(NewsCategory::Sports));
        assert_eq!(NewsCategory::parse("weather"), None);
    }

    #[test]
    fn test_placeholder_urls_are_inert() {
        let mut item = NewsItem {
            title: "t".to_string(),
            description: String::new(),
            source_name: "s".to_string(),
            url: "#".to_string(),
            image_url: None,
            published_label: String::new(),
        };
        assert!(!item.has_real_url());
        item.url = "https://example.com/a".to_string();
        assert!(item.has_real_url());
    }
}
