use anyhow::Result;

use crate::data_provider::{GeocodeProvider, WeatherProvider};
use crate::formatting::{round_temperature, weather_description, weather_icon};
use crate::widgets::weather::fetch_weather;

pub async fn execute(
    geocode: &dyn GeocodeProvider,
    weather: &dyn WeatherProvider,
    city: &str,
) -> Result<()> {
    let snapshot = fetch_weather(geocode, weather, city).await?;
    println!(
        "{} {} in {}: {}\u{b0}C",
        weather_icon(snapshot.weather_code),
        weather_description(snapshot.weather_code),
        snapshot.city,
        round_temperature(snapshot.temperature_c),
    );
    println!(
        "Humidity {:.0}%  Wind {:.1} km/h",
        snapshot.humidity_percent, snapshot.wind_speed,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dev::mock_client::MockClient;

    #[tokio::test]
    async fn test_execute_with_known_city() {
        let mock = MockClient::new();
        assert!(execute(&mock, &mock, "London").await.is_ok());
    }

    #[tokio::test]
    async fn test_execute_with_unknown_city_fails() {
        let mock = MockClient::new();
        let result = execute(&mock, &mock, "Atlantis").await;
        assert!(result.is_err());
    }
}
