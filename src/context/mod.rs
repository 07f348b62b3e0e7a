//! Context gatherer: today's date label, solar term and weather.
//!
//! Nothing here retries. A weather failure of any kind degrades to
//! [`WeatherReport::fallback`] so the run always has something to say.

pub mod calendar;
pub mod mock;
pub mod weather;

pub use mock::MockWeatherClient;
pub use weather::OpenWeatherClient;

use crate::models::{DailyContext, WeatherReport};
use crate::Result;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

#[async_trait]
pub trait WeatherService: Send + Sync {
    async fn current_weather(&self) -> Result<WeatherReport>;
}

pub struct ContextGatherer {
    weather: Box<dyn WeatherService>,
    offset: FixedOffset,
}

impl ContextGatherer {
    /// `offset` is the broadcast audience's local UTC offset.
    pub fn new(weather: Box<dyn WeatherService>, offset: FixedOffset) -> Self {
        Self { weather, offset }
    }

    /// Build the offset from whole hours, falling back to UTC when out of range.
    pub fn offset_from_hours(hours: i32) -> FixedOffset {
        hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                tracing::warn!("UTC offset {}h is out of range; using UTC", hours);
                Utc.fix()
            })
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    pub async fn gather(&self, date: NaiveDate) -> DailyContext {
        let weather = match self.weather.current_weather().await {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!("Weather unavailable, using fallback: {}", e);
                WeatherReport::fallback()
            }
        };

        DailyContext {
            date_label: calendar::date_label(date),
            solar_term: calendar::solar_term(date).to_string(),
            weather,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 23).unwrap()
    }

    #[tokio::test]
    async fn test_gather_uses_weather_report() {
        let report = WeatherReport {
            description: "晴".to_string(),
            temperature: "26.0°C".to_string(),
            reaction: "好天氣".to_string(),
        };
        let gatherer = ContextGatherer::new(
            Box::new(MockWeatherClient::new().with_report(report.clone())),
            ContextGatherer::offset_from_hours(8),
        );

        let context = gatherer.gather(date()).await;
        assert_eq!(context.weather, report);
        assert_eq!(context.date_label, "2024年10月23日 星期三");
        assert!(context.solar_term.starts_with("霜降"));
    }

    #[tokio::test]
    async fn test_gather_falls_back_on_weather_failure() {
        let gatherer = ContextGatherer::new(
            Box::new(MockWeatherClient::new().with_failure("status 500")),
            ContextGatherer::offset_from_hours(8),
        );

        let context = gatherer.gather(date()).await;
        assert_eq!(context.weather, WeatherReport::fallback());
    }

    #[test]
    fn test_offset_from_hours() {
        assert_eq!(ContextGatherer::offset_from_hours(8).local_minus_utc(), 8 * 3600);
        assert_eq!(ContextGatherer::offset_from_hours(99).local_minus_utc(), 0);
    }
}
