use super::WeatherService;
use crate::models::WeatherReport;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    cod: Option<Value>,
    message: Option<Value>,
    #[serde(default)]
    weather: Vec<Condition>,
    main: Option<Readings>,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Readings {
    temp: Option<f64>,
}

/// Current conditions for one fixed location from OpenWeatherMap.
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    lat: f64,
    lon: f64,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, lat: f64, lon: f64) -> Self {
        Self::new_with_client(api_key, lat, lon, Client::new())
    }

    pub fn new_with_client(api_key: String, lat: f64, lon: f64, client: Client) -> Self {
        Self {
            client,
            api_key,
            lat,
            lon,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

/// OpenWeatherMap reports `cod` as a number on success and a string on errors.
fn cod_is_ok(cod: Option<&Value>) -> bool {
    match cod {
        Some(Value::Number(n)) => n.as_u64() == Some(200),
        Some(Value::String(s)) => s == "200",
        _ => false,
    }
}

#[async_trait]
impl WeatherService for OpenWeatherClient {
    async fn current_weather(&self) -> Result<WeatherReport> {
        tracing::info!("Requesting weather for ({}, {})", self.lat, self.lon);

        let response = self
            .client
            .get(format!("{}/data/2.5/weather", self.base_url))
            .timeout(Duration::from_secs(15))
            .query(&[
                ("lat", self.lat.to_string()),
                ("lon", self.lon.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
                ("lang", "zh_tw".to_string()),
            ])
            .send()
            .await
            .map_err(|e| Error::from_request(e, "OpenWeatherMap"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Weather(format!("status {}", status)));
        }

        let data: CurrentWeather = response.json().await?;
        tracing::debug!("OpenWeatherMap response: {:?}", data);

        if !cod_is_ok(data.cod.as_ref()) {
            return Err(Error::Weather(format!(
                "cod {:?}: {:?}",
                data.cod, data.message
            )));
        }

        let (Some(condition), Some(readings)) = (data.weather.first(), data.main.as_ref()) else {
            return Err(Error::Weather("response lacks weather or main".to_string()));
        };

        let description = condition
            .description
            .clone()
            .unwrap_or_else(|| "美好的天氣".to_string());
        let temperature = readings
            .temp
            .map(|t| format!("{:.1}°C", t))
            .unwrap_or_else(|| "舒適的溫度".to_string());
        let reaction = reaction_for(&description, readings.temp, &temperature);

        tracing::info!("Weather: {}, {}", description, temperature);
        Ok(WeatherReport {
            description,
            temperature,
            reaction,
        })
    }
}

/// The cat's one-line reaction to today's weather.
pub fn reaction_for(description: &str, temp: Option<f64>, temperature: &str) -> String {
    let lower = description.to_lowercase();
    let default = format!(
        "天氣是「{}」，感覺很棒耶！最適合...在窗邊偷偷看著外面發生什麼事了喵！👀",
        description
    );

    let Some(t) = temp else {
        return default;
    };

    if description.contains('雨') || lower.contains("rain") || lower.contains("drizzle") {
        format!(
            "好像下著「{}」耶...滴滴答答...跟小雲一起躲在毯子裡聽雨聲好不好嘛...☔️",
            description
        )
    } else if description.contains('雲') || (lower.contains("cloud") && !description.contains('晴')) {
        format!(
            "今天「{}」，天上的雲好像軟綿綿的枕頭～☁️ 小雲想跳上去睡個午覺...",
            description
        )
    } else if t > 32.0 {
        format!(
            "嗚哇～{}！好熱好熱！小雲的肉球都要黏在地板上了啦！🥵 你也要多喝水水喔！",
            temperature
        )
    } else if t > 28.0
        && (description.contains('晴') || lower.contains("sun") || lower.contains("clear"))
    {
        format!(
            "是個大晴天（{}）！小雲想找個有陰影的窗邊偷偷享受陽光...☀️",
            temperature
        )
    } else if t < 18.0 {
        format!(
            "天氣涼颼颼的（{}），小雲的毛都豎起來了！你要多穿一件衣服喔！🥶",
            temperature
        )
    } else if t < 22.0 {
        format!(
            "涼涼的（{}），很舒服的天氣！小雲好像可以鼓起勇氣在家裡小跑步一下下！🐾",
            temperature
        )
    } else {
        default
    }
}
