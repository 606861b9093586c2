use crate::captions::{
    CaptionEntry, RetrievalError, TranscriptRetriever, YoutubeTranscriptClient,
    NO_TRANSCRIPTS_MARKER,
};
use crate::config::Config;
use crate::output::ResultEnvelope;
use crate::FetchError;

/// Fetches a transcript through a retriever and reduces the outcome to an envelope
pub struct TranscriptFetcher<R> {
    retriever: R,
    languages: Vec<String>,
}

impl<R: TranscriptRetriever> TranscriptFetcher<R> {
    pub fn new(retriever: R, languages: Vec<String>) -> Self {
        Self { retriever, languages }
    }

    /// Fetch the transcript of `video_id`; every failure becomes a failure envelope
    pub async fn fetch(&self, video_id: Option<&str>) -> ResultEnvelope {
        match self.try_fetch(video_id).await {
            Ok(transcript) => ResultEnvelope::success(transcript),
            Err(err) => {
                tracing::debug!("Transcript fetch failed: {:?}", err);
                err.into()
            }
        }
    }

    /// Fetch and join the transcript, keeping the typed error
    pub async fn try_fetch(&self, video_id: Option<&str>) -> Result<String, FetchError> {
        let video_id = video_id.ok_or(FetchError::InputMissing)?;

        tracing::info!("Fetching transcript for video: {}", video_id);

        let entries = self
            .retriever
            .retrieve(video_id, &self.languages)
            .await
            .map_err(classify)?;

        Ok(join_entries(&entries))
    }
}

/// Join caption texts in order with single spaces, untouched otherwise
pub fn join_entries(entries: &[CaptionEntry]) -> String {
    entries
        .iter()
        .map(|entry| entry.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Map a retrieval error onto the failures callers can tell apart
pub fn classify(err: RetrievalError) -> FetchError {
    if err.is_no_transcript_found() {
        return FetchError::NoCaptionsFound;
    }

    let message = err.to_string();
    if message.contains(NO_TRANSCRIPTS_MARKER) {
        FetchError::NoCaptionsFound
    } else {
        FetchError::RetrievalFailed(message)
    }
}

/// Fetch `video_id` from YouTube using `config`
pub async fn run(video_id: Option<&str>, config: &Config) -> ResultEnvelope {
    let Some(video_id) = video_id else {
        return FetchError::InputMissing.into();
    };

    match YoutubeTranscriptClient::new(&config.youtube) {
        Ok(client) => {
            TranscriptFetcher::new(client, config.languages.clone())
                .fetch(Some(video_id))
                .await
        }
        Err(err) => classify(err).into(),
    }
}
