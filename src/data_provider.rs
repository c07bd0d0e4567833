/// Traits for the external data collaborators, abstracting over real HTTP
/// clients and mock implementations.
use async_trait::async_trait;
use thiserror::Error;

use crate::types::{CurrentConditions, GeoLocation, NewsCategory, NewsItem};

/// Errors a data provider can surface to a widget.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("city not found")]
    NotFound,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

/// Resolve a city name to coordinates, implemented by both the real
/// client and MockClient.
#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    /// Look up a city by name. Returns `ProviderError::NotFound` when the
    /// service has no match.
    async fn geocode(&self, city: &str) -> Result<GeoLocation, ProviderError>;
}

/// Fetch current conditions at a coordinate.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_conditions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, ProviderError>;
}

/// One of several alternative news feeds. Sources are tried in a fixed
/// priority order; a source that fails, times out or returns an empty
/// list is skipped and the next one is consulted.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Short display name, shown in the status label on a live result.
    fn name(&self) -> &'static str;

    async fn fetch(&self, category: NewsCategory) -> Result<Vec<NewsItem>, ProviderError>;
}
