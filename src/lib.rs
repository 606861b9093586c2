//! Caption Fetch - print a YouTube video's captions as a single JSON line
//!
//! This library fetches the caption track of a video in the first available
//! preferred language, joins the caption text, and reduces every outcome to a
//! [`ResultEnvelope`] that a calling process can parse from stdout.

pub mod captions;
pub mod cli;
pub mod config;
pub mod fetcher;
pub mod output;
pub mod utils;

pub use captions::{CaptionEntry, RetrievalError, TranscriptRetriever, YoutubeTranscriptClient};
pub use cli::Cli;
pub use config::Config;
pub use fetcher::TranscriptFetcher;
pub use output::ResultEnvelope;

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Outcomes of a fetch that end up in a failure envelope
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("No Video ID provided")]
    InputMissing,

    #[error("No English or Hindi captions found.")]
    NoCaptionsFound,

    #[error("{0}")]
    RetrievalFailed(String),
}
