use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, COOKIE};
use reqwest::{Client, RequestBuilder, StatusCode};

use super::tracks::PlayerResponse;
use super::{json3, CaptionEntry, RetrievalError, TranscriptRetriever};
use crate::config::YoutubeConfig;
use crate::utils;

/// Transcript retriever backed by YouTube's watch page and innertube API
pub struct YoutubeTranscriptClient {
    client: Client,
    settings: YoutubeConfig,
}

/// A fetched watch page and the consent cookie it required, if any
struct WatchPage {
    html: String,
    cookie: Option<String>,
}

impl YoutubeTranscriptClient {
    pub fn new(settings: &YoutubeConfig) -> Result<Self, RetrievalError> {
        let mut headers = HeaderMap::new();
        let accept_language = HeaderValue::from_str(&settings.accept_language).map_err(|e| {
            RetrievalError::Other(format!("Invalid Accept-Language header: {}", e))
        })?;
        headers.insert(ACCEPT_LANGUAGE, accept_language);

        let mut builder = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .default_headers(headers);
        if !settings.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            settings: settings.clone(),
        })
    }

    /// Send a request, turning HTTP 429 and other failure statuses into errors
    async fn send(
        &self,
        request: RequestBuilder,
        cookie: Option<&str>,
        video_url: &str,
    ) -> Result<reqwest::Response, RetrievalError> {
        let request = match cookie {
            Some(cookie) => request.header(COOKIE, cookie),
            None => request,
        };

        let response = request.send().await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(RetrievalError::TooManyRequests {
                url: video_url.to_string(),
            });
        }

        Ok(response.error_for_status()?)
    }

    /// Fetch the watch page, accepting the cookie consent form once if YouTube shows it
    async fn fetch_watch_page(&self, video_url: &str) -> Result<WatchPage, RetrievalError> {
        tracing::debug!("Fetching watch page: {}", video_url);

        let html = self
            .send(self.client.get(video_url), None, video_url)
            .await?
            .text()
            .await?;

        if !html.contains(utils::CONSENT_FORM_MARKER) {
            return Ok(WatchPage { html, cookie: None });
        }

        tracing::debug!("Watch page asked for cookie consent");
        let consent = utils::extract_consent_value(&html).ok_or_else(|| {
            RetrievalError::ConsentCookieFailed {
                url: video_url.to_string(),
            }
        })?;
        let cookie = format!("CONSENT=YES+{}", consent);

        let html = self
            .send(self.client.get(video_url), Some(&cookie), video_url)
            .await?
            .text()
            .await?;

        if html.contains(utils::CONSENT_FORM_MARKER) {
            return Err(RetrievalError::ConsentCookieFailed {
                url: video_url.to_string(),
            });
        }

        Ok(WatchPage {
            html,
            cookie: Some(cookie),
        })
    }

    fn extract_api_key(&self, page: &WatchPage, video_url: &str) -> Result<String, RetrievalError> {
        if let Some(key) = utils::extract_json_string(&page.html, "INNERTUBE_API_KEY") {
            return Ok(key);
        }

        if page.html.contains(utils::RECAPTCHA_MARKER) {
            return Err(RetrievalError::IpBlocked {
                url: video_url.to_string(),
            });
        }

        Err(RetrievalError::DataUnparsable {
            url: video_url.to_string(),
            detail: "INNERTUBE_API_KEY missing from the watch page".to_string(),
        })
    }

    /// Ask the innertube player endpoint for the video's caption metadata
    async fn fetch_player(
        &self,
        video_id: &str,
        api_key: &str,
        cookie: Option<&str>,
        video_url: &str,
    ) -> Result<PlayerResponse, RetrievalError> {
        let endpoint = utils::innertube_player_url(&self.settings.innertube_url, api_key)
            .map_err(|e| RetrievalError::DataUnparsable {
                url: video_url.to_string(),
                detail: e.to_string(),
            })?;

        let body = serde_json::json!({
            "context": {
                "client": {
                    "clientName": self.settings.client_name,
                    "clientVersion": self.settings.client_version,
                }
            },
            "videoId": video_id,
        });

        tracing::debug!("Requesting innertube player data for: {}", video_id);

        let text = self
            .send(self.client.post(endpoint).json(&body), cookie, video_url)
            .await?
            .text()
            .await?;

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl TranscriptRetriever for YoutubeTranscriptClient {
    async fn retrieve(
        &self,
        video_id: &str,
        languages: &[String],
    ) -> Result<Vec<CaptionEntry>, RetrievalError> {
        let video_url = utils::watch_url(&self.settings.watch_url, video_id);

        if utils::looks_like_url(video_id) {
            return Err(RetrievalError::InvalidVideoId { url: video_url });
        }

        let page = self.fetch_watch_page(&video_url).await?;
        let api_key = self.extract_api_key(&page, &video_url)?;

        let player = self
            .fetch_player(video_id, &api_key, page.cookie.as_deref(), &video_url)
            .await?;
        player.check_playability(video_id, &video_url)?;

        let list = player.into_transcript_list(&video_url)?;
        let track = list.find_transcript(languages)?;
        tracing::debug!(
            "Selected {} track '{}' ({})",
            if track.is_generated { "generated" } else { "manual" },
            track.language,
            track.language_code
        );

        if track.base_url.contains("&exp=xpe") {
            return Err(RetrievalError::PoTokenRequired { url: video_url });
        }

        let body = self
            .send(
                self.client.get(utils::json3_track_url(&track.base_url)),
                page.cookie.as_deref(),
                &video_url,
            )
            .await?
            .text()
            .await?;

        let entries = json3::parse(&body)?;
        tracing::debug!("Retrieved {} caption entries", entries.len());

        Ok(entries)
    }
}
