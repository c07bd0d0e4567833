/// Static fixture data.
///
/// This module serves two purposes:
/// 1. The built-in fallback headlines the news widget displays when every
///    live source has failed or timed out (production behavior).
/// 2. Deterministic mock data for tests and development mock mode.
use crate::types::{CurrentConditions, GeoLocation, NewsCategory, NewsItem};

/// Placeholder url used by fallback items. Items carrying it are inert.
pub const PLACEHOLDER_URL: &str = "#";

fn fallback_item(title: &str, description: &str) -> NewsItem {
    NewsItem {
        title: title.to_string(),
        description: description.to_string(),
        source_name: "dashtop".to_string(),
        url: PLACEHOLDER_URL.to_string(),
        image_url: None,
        published_label: "offline".to_string(),
    }
}

/// Category-specific static fallback content. Always non-empty.
pub fn fallback_news(category: NewsCategory) -> Vec<NewsItem> {
    match category {
        NewsCategory::Technology => vec![
            fallback_item(
                "Terminal dashboards are having a moment",
                "Text UIs keep finding new fans among people who live in the shell.",
            ),
            fallback_item(
                "Rust adoption keeps climbing in systems tooling",
                "Another year, another survey with Rust at the top of the loved list.",
            ),
            fallback_item(
                "Offline mode: you are reading the built-in headlines",
                "Live news sources were unreachable. Press r to retry.",
            ),
        ],
        NewsCategory::Science => vec![
            fallback_item(
                "James Webb keeps rewriting the textbooks",
                "Early-universe galaxies continue to show up earlier than models predicted.",
            ),
            fallback_item(
                "Fusion milestones arrive in smaller steps than headlines suggest",
                "Net energy gain remains a laboratory result, not a power plant.",
            ),
        ],
        NewsCategory::Business => vec![
            fallback_item(
                "Markets do something; analysts explain it afterwards",
                "The one headline that is always accurate.",
            ),
            fallback_item(
                "Remote work settles into hybrid equilibrium",
                "Five years on, the office is neither dead nor fully back.",
            ),
        ],
        NewsCategory::Sports => vec![
            fallback_item(
                "Local team wins; other local team loses",
                "Fans of both report the referee was the real problem.",
            ),
            fallback_item(
                "Transfer window rumors exceed actual transfers 100 to 1",
                "As every year.",
            ),
        ],
    }
}

/// Cities the mock geocoder knows about.
pub fn mock_locations() -> Vec<GeoLocation> {
    vec![
        GeoLocation {
            name: "London".to_string(),
            latitude: 51.5074,
            longitude: -0.1278,
        },
        GeoLocation {
            name: "Paris".to_string(),
            latitude: 48.8566,
            longitude: 2.3522,
        },
        GeoLocation {
            name: "New York".to_string(),
            latitude: 40.7128,
            longitude: -74.0060,
        },
        GeoLocation {
            name: "Tokyo".to_string(),
            latitude: 35.6762,
            longitude: 139.6503,
        },
        GeoLocation {
            name: "Berlin".to_string(),
            latitude: 52.52,
            longitude: 13.405,
        },
    ]
}

/// Deterministic conditions for mock mode.
pub fn mock_conditions() -> CurrentConditions {
    CurrentConditions {
        temperature_c: 18.6,
        weather_code: 2,
        humidity_percent: 64.0,
        wind_speed: 4.2,
    }
}

/// A small live-looking headline list for mock news sources.
pub fn mock_news(category: NewsCategory) -> Vec<NewsItem> {
    (1..=3)
        .map(|n| NewsItem {
            title: format!("{} headline {}", category.label(), n),
            description: format!("Mock description for {} story {}.", category.label(), n),
            source_name: "MockWire".to_string(),
            url: format!("https://example.com/{}/{}", category.label().to_lowercase(), n),
            image_url: None,
            published_label: "2026-08-30".to_string(),
        })
        .collect()
}
