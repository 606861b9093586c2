use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod json3;
pub mod tracks;
pub mod youtube;

pub use tracks::{CaptionTrack, TranscriptList};
pub use youtube::YoutubeTranscriptClient;

/// Substring that identifies a "no transcript in the requested languages" failure
pub const NO_TRANSCRIPTS_MARKER: &str = "No transcripts were found";

/// One timed unit of caption text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionEntry {
    /// Caption text
    pub text: String,

    /// Start time in seconds
    pub start: f64,

    /// Duration in seconds
    pub duration: f64,
}

impl CaptionEntry {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// Errors raised while retrieving a transcript
#[derive(thiserror::Error, Debug)]
pub enum RetrievalError {
    #[error("Could not retrieve a transcript for the video {url}! This is most likely caused by:\n\nYou provided a YouTube URL instead of the video ID. Pass the ID only, for example \"dQw4w9WgXcQ\".")]
    InvalidVideoId { url: String },

    #[error("Could not retrieve a transcript for the video {url}! This is most likely caused by:\n\nThe video is no longer available")]
    VideoUnavailable { url: String },

    #[error("Could not retrieve a transcript for the video {url}! This is most likely caused by:\n\nSubtitles are disabled for this video")]
    TranscriptsDisabled { url: String },

    #[error("Could not retrieve a transcript for the video {url}! This is most likely caused by:\n\nNo transcripts were found for any of the requested language codes: {requested:?}\n\n{available}")]
    NoTranscriptFound {
        url: String,
        requested: Vec<String>,
        available: String,
    },

    #[error("Could not retrieve a transcript for the video {url}! This is most likely caused by:\n\nThis video is age-restricted. Transcripts cannot be retrieved without authenticating.")]
    AgeRestricted { url: String },

    #[error("Could not retrieve a transcript for the video {url}! This is most likely caused by:\n\nThe video is unplayable for the following reason: {reason}")]
    VideoUnplayable { url: String, reason: String },

    #[error("Could not retrieve a transcript for the video {url}! This is most likely caused by:\n\nYouTube is blocking requests from your IP. This usually happens on cloud provider IPs.")]
    RequestBlocked { url: String },

    #[error("Could not retrieve a transcript for the video {url}! This is most likely caused by:\n\nYouTube is showing a reCAPTCHA to requests from your IP.")]
    IpBlocked { url: String },

    #[error("Could not retrieve a transcript for the video {url}! This is most likely caused by:\n\nYouTube is receiving too many requests from this IP and now requires solving a captcha to continue")]
    TooManyRequests { url: String },

    #[error("Could not retrieve a transcript for the video {url}! This is most likely caused by:\n\nThe requested video cannot be retrieved without a PO Token.")]
    PoTokenRequired { url: String },

    #[error("Could not retrieve a transcript for the video {url}! This is most likely caused by:\n\nFailed to automatically give consent to saving cookies")]
    ConsentCookieFailed { url: String },

    #[error("Could not retrieve a transcript for the video {url}! This is most likely caused by:\n\nThe data required to fetch the transcript is not parsable: {detail}")]
    DataUnparsable { url: String, detail: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl RetrievalError {
    /// Whether the provider reported that none of the requested languages exist
    pub fn is_no_transcript_found(&self) -> bool {
        matches!(self, RetrievalError::NoTranscriptFound { .. })
    }
}

/// A source of caption entries for a video
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptRetriever: Send + Sync {
    /// Fetch the caption entries of `video_id` in the first available language of `languages`
    async fn retrieve(
        &self,
        video_id: &str,
        languages: &[String],
    ) -> Result<Vec<CaptionEntry>, RetrievalError>;
}
