use super::WeatherService;
use crate::models::WeatherReport;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockWeatherClient {
    report: Option<WeatherReport>,
    failure: Option<String>,
    call_count: Arc<Mutex<usize>>,
}

impl MockWeatherClient {
    pub fn new() -> Self {
        Self {
            report: None,
            failure: None,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_report(mut self, report: WeatherReport) -> Self {
        self.report = Some(report);
        self
    }

    pub fn with_failure(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockWeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherService for MockWeatherClient {
    async fn current_weather(&self) -> Result<WeatherReport> {
        *self.call_count.lock().unwrap() += 1;

        if let Some(message) = &self.failure {
            return Err(Error::Weather(message.clone()));
        }

        Ok(self.report.clone().unwrap_or_else(|| WeatherReport {
            description: "晴時多雲".to_string(),
            temperature: "24.0°C".to_string(),
            reaction: "今天好像很適合曬太陽喵～".to_string(),
        }))
    }
}
