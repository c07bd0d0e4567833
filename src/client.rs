/// Live HTTP implementations of the data provider traits.
///
/// The remote services are treated as opaque collaborators: each function
/// issues one request and maps the response into the shared data model.
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::data_provider::{
    GeocodeProvider, NewsSource, ProviderError, WeatherProvider,
};
use crate::formatting::published_label;
use crate::types::{CurrentConditions, GeoLocation, NewsCategory, NewsItem};

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const HACKER_NEWS_URL: &str = "https://hn.algolia.com/api/v1/search";
const DEVTO_URL: &str = "https://dev.to/api/articles";
const LOBSTERS_URL: &str = "https://lobste.rs/t";

/// Maximum items requested from a news source per fetch.
const NEWS_PAGE_SIZE: usize = 6;

#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
}

impl Client {
    pub fn new() -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("dashtop/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Client { http })
    }
}

#[derive(Deserialize)]
struct GeocodeResponse {
    results: Option<Vec<GeocodeResult>>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[async_trait]
impl GeocodeProvider for Client {
    async fn geocode(&self, city: &str) -> Result<GeoLocation, ProviderError> {
        let response: GeocodeResponse = self
            .http
            .get(GEOCODING_URL)
            .query(&[("name", city), ("count", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let first = response
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or(ProviderError::NotFound)?;

        Ok(GeoLocation {
            name: first.name,
            latitude: first.latitude,
            longitude: first.longitude,
        })
    }
}

#[derive(Deserialize)]
struct ForecastResponse {
    current: Option<ForecastCurrent>,
}

#[derive(Deserialize)]
struct ForecastCurrent {
    temperature_2m: f64,
    weather_code: u8,
    wind_speed_10m: f64,
    relative_humidity_2m: f64,
}

#[async_trait]
impl WeatherProvider for Client {
    async fn current_conditions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, ProviderError> {
        let response: ForecastResponse = self
            .http
            .get(FORECAST_URL)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                (
                    "current",
                    "temperature_2m,weather_code,wind_speed_10m,relative_humidity_2m".to_string(),
                ),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let current = response.current.ok_or_else(|| {
            ProviderError::InvalidResponse("forecast response missing current block".to_string())
        })?;

        Ok(CurrentConditions {
            temperature_c: current.temperature_2m,
            weather_code: current.weather_code,
            humidity_percent: current.relative_humidity_2m,
            wind_speed: current.wind_speed_10m,
        })
    }
}

/// The fixed, priority-ordered set of live news sources.
pub fn default_news_sources(client: &Client) -> Vec<Arc<dyn NewsSource>> {
    vec![
        Arc::new(HackerNewsSource::new(client)),
        Arc::new(DevToSource::new(client)),
        Arc::new(LobstersSource::new(client)),
    ]
}

pub struct HackerNewsSource {
    http: reqwest::Client,
}

impl HackerNewsSource {
    pub fn new(client: &Client) -> Self {
        HackerNewsSource {
            http: client.http.clone(),
        }
    }

    fn query(category: NewsCategory) -> &'static str {
        match category {
            NewsCategory::Technology => "technology",
            NewsCategory::Science => "science",
            NewsCategory::Business => "business",
            NewsCategory::Sports => "sports",
        }
    }
}

#[derive(Deserialize)]
struct AlgoliaResponse {
    hits: Vec<AlgoliaHit>,
}

#[derive(Deserialize)]
struct AlgoliaHit {
    title: Option<String>,
    url: Option<String>,
    author: Option<String>,
    created_at: Option<String>,
}

#[async_trait]
impl NewsSource for HackerNewsSource {
    fn name(&self) -> &'static str {
        "Hacker News"
    }

    async fn fetch(&self, category: NewsCategory) -> Result<Vec<NewsItem>, ProviderError> {
        let response: AlgoliaResponse = self
            .http
            .get(HACKER_NEWS_URL)
            .query(&[
                ("query", Self::query(category)),
                ("tags", "story"),
                ("hitsPerPage", "6"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let items = response
            .hits
            .into_iter()
            .filter_map(|hit| {
                let title = hit.title.filter(|t| !t.trim().is_empty())?;
                Some(NewsItem {
                    title,
                    description: String::new(),
                    source_name: hit.author.unwrap_or_else(|| "Hacker News".to_string()),
                    url: hit.url.unwrap_or_else(|| "#".to_string()),
                    image_url: None,
                    published_label: hit
                        .created_at
                        .as_deref()
                        .map(published_label)
                        .unwrap_or_default(),
                })
            })
            .take(NEWS_PAGE_SIZE)
            .collect();

        Ok(items)
    }
}

pub struct DevToSource {
    http: reqwest::Client,
}

impl DevToSource {
    pub fn new(client: &Client) -> Self {
        DevToSource {
            http: client.http.clone(),
        }
    }

    fn tag(category: NewsCategory) -> &'static str {
        match category {
            NewsCategory::Technology => "technology",
            NewsCategory::Science => "science",
            NewsCategory::Business => "business",
            NewsCategory::Sports => "sports",
        }
    }
}

#[derive(Deserialize)]
struct DevToArticle {
    title: String,
    #[serde(default)]
    description: String,
    url: String,
    cover_image: Option<String>,
    published_at: Option<String>,
    user: Option<DevToUser>,
}

#[derive(Deserialize)]
struct DevToUser {
    name: String,
}

#[async_trait]
impl NewsSource for DevToSource {
    fn name(&self) -> &'static str {
        "DEV Community"
    }

    async fn fetch(&self, category: NewsCategory) -> Result<Vec<NewsItem>, ProviderError> {
        let articles: Vec<DevToArticle> = self
            .http
            .get(DEVTO_URL)
            .query(&[("tag", Self::tag(category)), ("per_page", "6")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let items = articles
            .into_iter()
            .map(|article| NewsItem {
                title: article.title,
                description: article.description,
                source_name: article
                    .user
                    .map(|u| u.name)
                    .unwrap_or_else(|| "DEV Community".to_string()),
                url: article.url,
                image_url: article.cover_image,
                published_label: article
                    .published_at
                    .as_deref()
                    .map(published_label)
                    .unwrap_or_default(),
            })
            .take(NEWS_PAGE_SIZE)
            .collect();

        Ok(items)
    }
}

pub struct LobstersSource {
    http: reqwest::Client,
}

impl LobstersSource {
    pub fn new(client: &Client) -> Self {
        LobstersSource {
            http: client.http.clone(),
        }
    }

    fn tag(category: NewsCategory) -> &'static str {
        match category {
            NewsCategory::Technology => "programming",
            NewsCategory::Science => "science",
            NewsCategory::Business => "finance",
            NewsCategory::Sports => "culture",
        }
    }
}

#[derive(Deserialize)]
struct LobstersStory {
    title: String,
    #[serde(default)]
    url: String,
    comments_url: String,
    created_at: Option<String>,
}

#[async_trait]
impl NewsSource for LobstersSource {
    fn name(&self) -> &'static str {
        "Lobsters"
    }

    async fn fetch(&self, category: NewsCategory) -> Result<Vec<NewsItem>, ProviderError> {
        let url = format!("{}/{}.json", LOBSTERS_URL, Self::tag(category));
        let stories: Vec<LobstersStory> = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let items = stories
            .into_iter()
            .map(|story| {
                // Text-only submissions carry an empty url; link to the
                // discussion instead.
                let url = if story.url.is_empty() {
                    story.comments_url
                } else {
                    story.url
                };
                NewsItem {
                    title: story.title,
                    description: String::new(),
                    source_name: "Lobsters".to_string(),
                    url,
                    image_url: None,
                    published_label: story
                        .created_at
                        .as_deref()
                        .map(published_label)
                        .unwrap_or_default(),
                }
            })
            .take(NEWS_PAGE_SIZE)
            .collect();

        Ok(items)
    }
}
