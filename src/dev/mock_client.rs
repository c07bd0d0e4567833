/// Mock data providers for development and testing
use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

use crate::data_provider::{
    GeocodeProvider, NewsSource, ProviderError, WeatherProvider,
};
use crate::fixtures;
use crate::types::{CurrentConditions, GeoLocation, NewsCategory, NewsItem};

/// Mock client that returns fixture data instead of making real requests.
/// Knows the quick-city list; anything else is "not found".
pub struct MockClient;

impl MockClient {
    pub fn new() -> Self {
        info!("Creating MockClient for development mode");
        Self
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GeocodeProvider for MockClient {
    async fn geocode(&self, city: &str) -> Result<GeoLocation, ProviderError> {
        let city = city.trim().to_lowercase();
        fixtures::mock_locations()
            .into_iter()
            .find(|loc| loc.name.to_lowercase() == city)
            .ok_or(ProviderError::NotFound)
    }
}

#[async_trait]
impl WeatherProvider for MockClient {
    async fn current_conditions(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<CurrentConditions, ProviderError> {
        Ok(fixtures::mock_conditions())
    }
}

/// A news source yielding deterministic fixture headlines.
pub struct MockNewsSource {
    name: &'static str,
}

impl MockNewsSource {
    pub fn new(name: &'static str) -> Self {
        MockNewsSource { name }
    }
}

#[async_trait]
impl NewsSource for MockNewsSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self, category: NewsCategory) -> Result<Vec<NewsItem>, ProviderError> {
        Ok(fixtures::mock_news(category))
    }
}

/// A weather provider whose lookups always fail.
pub struct FailingWeather;

#[async_trait]
impl WeatherProvider for FailingWeather {
    async fn current_conditions(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<CurrentConditions, ProviderError> {
        Err(ProviderError::InvalidResponse(
            "mock conditions failure".to_string(),
        ))
    }
}

/// A news source that always errors.
pub struct FailingSource;

#[async_trait]
impl NewsSource for FailingSource {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn fetch(&self, _category: NewsCategory) -> Result<Vec<NewsItem>, ProviderError> {
        Err(ProviderError::InvalidResponse("mock failure".to_string()))
    }
}

/// A news source that resolves successfully but with nothing in it.
pub struct EmptySource;

#[async_trait]
impl NewsSource for EmptySource {
    fn name(&self) -> &'static str {
        "empty"
    }

    async fn fetch(&self, _category: NewsCategory) -> Result<Vec<NewsItem>, ProviderError> {
        Ok(Vec::new())
    }
}

/// A news source that takes longer than any caller is willing to wait.
pub struct SlowSource {
    delay: Duration,
}

impl SlowSource {
    pub fn new(delay: Duration) -> Self {
        SlowSource { delay }
    }
}

#[async_trait]
impl NewsSource for SlowSource {
    fn name(&self) -> &'static str {
        "slow"
    }

    async fn fetch(&self, category: NewsCategory) -> Result<Vec<NewsItem>, ProviderError> {
        tokio::time::sleep(self.delay).await;
        Ok(fixtures::mock_news(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_geocode_known_city() {
        let client = MockClient::new();
        let loc = client.geocode("london").await.unwrap();
        assert_eq!(loc.name, "London");
    }

    #[tokio::test]
    async fn test_mock_geocode_unknown_city_is_not_found() {
        let client = MockClient::new();
        assert!(matches!(
            client.geocode("Atlantis").await,
            Err(ProviderError::NotFound)
        ));
    }
}
