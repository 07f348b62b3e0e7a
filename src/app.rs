//! Application orchestration for one daily broadcast run.

use crate::ai::{ContentService, GeminiContentClient, GeminiRelevanceClient, RelevanceService};
use crate::broadcast::{BroadcastService, ConsoleBroadcaster, LineBroadcastClient};
use crate::config::Config;
use crate::content::{ContentOutcome, ContentRequester};
use crate::context::{ContextGatherer, OpenWeatherClient, WeatherService};
use crate::delivery;
use crate::fortunes::Fortunes;
use crate::hosting::{ImageHost, ImgbbClient};
use crate::media::{
    HttpImageFetcher, ImageFetcher, MediaLimits, MediaResolver, PexelsClient, PhotoSearchService,
    UnsplashClient,
};
use crate::models::{GenerationRequest, OutboundMessage};
use crate::prompts;
use crate::render::{CalendarRenderer, CardRenderer};
use crate::retry::{Delay, RetryPolicy, TokioDelay};
use crate::Result;
use chrono::{FixedOffset, NaiveDate};
use std::time::Duration;
use tokio_retry::{strategy::FixedInterval, Retry};
use tracing::{error, info, warn, Instrument};
use uuid::Uuid;

/// Runs the pipeline: context, content, media, calendar card, delivery, broadcast.
pub struct App {
    gatherer: ContextGatherer,
    fortunes: Fortunes,
    requester: ContentRequester,
    media: MediaResolver,
    renderer: Box<dyn CardRenderer>,
    image_host: Option<Box<dyn ImageHost>>,
    broadcaster: Box<dyn BroadcastService>,
    upload_retry_interval: Duration,
    upload_retries: usize,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub weather: Box<dyn WeatherService>,
    pub content: Box<dyn ContentService>,
    /// Searched in order; empty disables themed images.
    pub photo_providers: Vec<Box<dyn PhotoSearchService>>,
    pub fetcher: Box<dyn ImageFetcher>,
    pub relevance: Box<dyn RelevanceService>,
    pub renderer: Box<dyn CardRenderer>,
    /// `None` skips the calendar card.
    pub image_host: Option<Box<dyn ImageHost>>,
    pub broadcaster: Box<dyn BroadcastService>,
    pub delay: Box<dyn Delay>,
    pub fortunes: Fortunes,
}

/// Tunables that shape a run.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub utc_offset: FixedOffset,
    pub retry: RetryPolicy,
    pub media: MediaLimits,
    pub upload_retry_interval: Duration,
    pub upload_retries: usize,
}

impl AppSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            utc_offset: ContextGatherer::offset_from_hours(config.utc_offset_hours),
            retry: RetryPolicy::new(config.content_max_retries, config.content_initial_backoff),
            media: MediaLimits {
                max_candidates: config.media_max_candidates,
                per_page: config.media_per_page,
            },
            ..Self::default()
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            utc_offset: ContextGatherer::offset_from_hours(8),
            retry: RetryPolicy::new(3, Duration::from_secs(10)),
            media: MediaLimits::default(),
            upload_retry_interval: Duration::from_millis(2000),
            upload_retries: 3,
        }
    }
}

/// What a run sent.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub date: NaiveDate,
    pub messages: Vec<OutboundMessage>,
    /// True when the primary text is a placeholder.
    pub degraded: bool,
}

impl App {
    /// Build an app from concrete service dependencies.
    ///
    /// This is primarily useful for integration tests and local harnesses that
    /// need to inject mocks.
    pub fn with_services(services: AppServices, settings: AppSettings) -> Self {
        Self {
            gatherer: ContextGatherer::new(services.weather, settings.utc_offset),
            fortunes: services.fortunes,
            requester: ContentRequester::new(services.content, settings.retry, services.delay),
            media: MediaResolver::new(
                services.photo_providers,
                services.fetcher,
                services.relevance,
                settings.media,
            ),
            renderer: services.renderer,
            image_host: services.image_host,
            broadcaster: services.broadcaster,
            upload_retry_interval: settings.upload_retry_interval,
            upload_retries: settings.upload_retries,
        }
    }

    /// Construct the real HTTP-backed services from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        // Reuse one HTTP connection pool across clients.
        let http_client = reqwest::Client::new();

        info!(
            "Gemini models: text {}, vision {}",
            config.text_model, config.vision_model
        );

        let mut photo_providers: Vec<Box<dyn PhotoSearchService>> = Vec::new();
        if let Some(key) = &config.unsplash_access_key {
            photo_providers.push(Box::new(UnsplashClient::new_with_client(
                key.clone(),
                http_client.clone(),
            )));
        }
        if let Some(key) = &config.pexels_api_key {
            photo_providers.push(Box::new(PexelsClient::new_with_client(
                key.clone(),
                http_client.clone(),
            )));
        }

        let image_host: Option<Box<dyn ImageHost>> = config.imgbb_api_key.as_ref().map(|key| {
            Box::new(ImgbbClient::new_with_client(key.clone(), http_client.clone()))
                as Box<dyn ImageHost>
        });

        let broadcaster: Box<dyn BroadcastService> = if config.dry_run {
            info!("DRY_RUN enabled, messages will be printed instead of broadcast");
            Box::new(ConsoleBroadcaster::new())
        } else {
            Box::new(LineBroadcastClient::new_with_client(
                config.line_channel_access_token.clone(),
                http_client.clone(),
            ))
        };

        let services = AppServices {
            weather: Box::new(OpenWeatherClient::new_with_client(
                config.openweathermap_api_key.clone(),
                config.weather_lat,
                config.weather_lon,
                http_client.clone(),
            )),
            content: Box::new(GeminiContentClient::new_with_client(
                config.gemini_api_key.clone(),
                config.text_model.clone(),
                http_client.clone(),
            )),
            photo_providers,
            fetcher: Box::new(HttpImageFetcher::new_with_client(http_client.clone())),
            relevance: Box::new(GeminiRelevanceClient::new_with_client(
                config.gemini_api_key.clone(),
                config.vision_model.clone(),
                http_client,
            )),
            renderer: Box::new(CalendarRenderer::new()),
            image_host,
            broadcaster,
            delay: Box::new(TokioDelay),
            fortunes: Fortunes::embedded()?,
        };

        Ok(Self::with_services(services, AppSettings::from_config(config)))
    }

    /// Run for today in the configured UTC offset.
    pub async fn run(&self) -> Result<RunSummary> {
        let today = self.gatherer.today();
        self.run_on(today).await
    }

    /// Run for `date`. Only a broadcast failure is returned as an error.
    pub async fn run_on(&self, date: NaiveDate) -> Result<RunSummary> {
        let span = tracing::info_span!("run", run_id = %Uuid::new_v4());
        self.execute(date).instrument(span).await
    }

    async fn execute(&self, date: NaiveDate) -> Result<RunSummary> {
        info!("Starting daily broadcast for {}", date);

        let context = self.gatherer.gather(date).await;
        info!(
            "Context: {} / {} / {} {}",
            context.date_label,
            context.solar_term,
            context.weather.description,
            context.weather.temperature
        );

        let picks = self.fortunes.pick(&mut rand::thread_rng());
        let request = GenerationRequest::daily(prompts::daily_instruction(&context, &picks));
        let content = self.requester.request(&request).await;
        if content.is_degraded() {
            warn!("Content generation exhausted its retries; sending placeholder text");
        }

        let image_url = self.themed_image(&content).await;
        let calendar_url = self.calendar_card(date).await;

        let messages = delivery::assemble(&content, calendar_url.as_deref(), image_url.as_deref());
        info!("Prepared {} messages", messages.len());

        if let Err(e) = self.broadcaster.broadcast(&messages).await {
            error!("Broadcast failed: {}", e);
            return Err(e);
        }

        info!("Daily broadcast complete for {}", date);
        Ok(RunSummary {
            date,
            degraded: content.is_degraded(),
            messages,
        })
    }

    async fn themed_image(&self, content: &ContentOutcome) -> Option<String> {
        let keyword = match content.keyword() {
            Some(keyword) => keyword,
            None => {
                info!("No image keyword available; skipping themed image");
                return None;
            }
        };

        if !self.media.is_enabled() {
            info!("No photo provider configured; skipping themed image");
            return None;
        }

        self.media.resolve(keyword).await
    }

    async fn calendar_card(&self, date: NaiveDate) -> Option<String> {
        let host = match &self.image_host {
            Some(host) => host.as_ref(),
            None => {
                info!("No image host configured; skipping calendar card");
                return None;
            }
        };

        let card = match self.renderer.render(date).await {
            Ok(card) => card,
            Err(e) => {
                warn!("Failed to render calendar card: {}", e);
                return None;
            }
        };

        let data = match card.read().await {
            Ok(data) => data,
            Err(e) => {
                warn!("Failed to read staged calendar card: {}", e);
                return None;
            }
        };

        let name = card.file_name();
        let data = data.as_slice();
        let name = name.as_str();
        let retry_strategy = FixedInterval::new(self.upload_retry_interval).take(self.upload_retries);

        let uploaded = Retry::spawn(retry_strategy, move || async move {
            host.upload(data, name).await.map_err(|e| {
                warn!("Calendar card upload attempt failed: {}. Will retry...", e);
                e
            })
        })
        .await;

        match uploaded {
            Ok(url) => {
                info!("Uploaded calendar card to {}", url);
                Some(url)
            }
            Err(e) => {
                warn!("Giving up on the calendar card: {}", e);
                None
            }
        }
    }
}
