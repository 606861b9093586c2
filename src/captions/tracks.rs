//! Caption track discovery from an innertube player response.

use serde::Deserialize;

use super::RetrievalError;
use crate::utils;

const BOT_CHECK_REASON: &str = "Sign in to confirm you’re not a bot";
const AGE_RESTRICTED_REASON: &str = "This video may be inappropriate for some users.";
const UNAVAILABLE_REASON: &str = "This video is unavailable";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub playability_status: Option<PlayabilityStatus>,
    pub captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
pub struct PlayabilityStatus {
    pub status: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Captions {
    pub player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracklistRenderer {
    #[serde(default)]
    pub caption_tracks: Vec<RawCaptionTrack>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCaptionTrack {
    pub base_url: String,
    pub language_code: String,
    pub kind: Option<String>,
    pub name: Option<TrackName>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackName {
    pub simple_text: Option<String>,
    pub runs: Option<Vec<TextRun>>,
}

#[derive(Debug, Deserialize)]
pub struct TextRun {
    pub text: String,
}

impl TrackName {
    fn display(&self) -> Option<String> {
        if let Some(text) = &self.simple_text {
            return Some(text.clone());
        }

        self.runs
            .as_ref()
            .map(|runs| runs.iter().map(|run| run.text.as_str()).collect())
    }
}

/// A caption track that can be downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionTrack {
    pub language_code: String,
    pub language: String,
    pub base_url: String,
    pub is_generated: bool,
}

/// Caption tracks of one video, split by origin
#[derive(Debug, Clone, Default)]
pub struct TranscriptList {
    pub video_url: String,
    pub manually_created: Vec<CaptionTrack>,
    pub generated: Vec<CaptionTrack>,
}

impl PlayerResponse {
    /// Fail unless the video is playable
    pub fn check_playability(&self, video_id: &str, video_url: &str) -> Result<(), RetrievalError> {
        let Some(playability) = &self.playability_status else {
            return Ok(());
        };

        let status = playability.status.as_deref().unwrap_or("OK");
        if status == "OK" {
            return Ok(());
        }

        let reason = playability.reason.clone().unwrap_or_default();
        let url = video_url.to_string();

        match status {
            "LOGIN_REQUIRED" if reason == BOT_CHECK_REASON => {
                Err(RetrievalError::RequestBlocked { url })
            }
            "LOGIN_REQUIRED" if reason == AGE_RESTRICTED_REASON => {
                Err(RetrievalError::AgeRestricted { url })
            }
            "ERROR" if reason == UNAVAILABLE_REASON => {
                if utils::looks_like_url(video_id) {
                    Err(RetrievalError::InvalidVideoId { url })
                } else {
                    Err(RetrievalError::VideoUnavailable { url })
                }
            }
            _ => Err(RetrievalError::VideoUnplayable { url, reason }),
        }
    }

    /// Collect the caption tracks, failing when captions are disabled
    pub fn into_transcript_list(self, video_url: &str) -> Result<TranscriptList, RetrievalError> {
        let raw_tracks = self
            .captions
            .and_then(|captions| captions.player_captions_tracklist_renderer)
            .map(|renderer| renderer.caption_tracks)
            .unwrap_or_default();

        if raw_tracks.is_empty() {
            return Err(RetrievalError::TranscriptsDisabled {
                url: video_url.to_string(),
            });
        }

        let mut list = TranscriptList {
            video_url: video_url.to_string(),
            ..Default::default()
        };

        for raw in raw_tracks {
            let is_generated = raw.kind.as_deref() == Some("asr");
            let language = raw
                .name
                .as_ref()
                .and_then(TrackName::display)
                .unwrap_or_else(|| raw.language_code.clone());

            let track = CaptionTrack {
                language_code: raw.language_code,
                language,
                base_url: raw.base_url,
                is_generated,
            };

            if is_generated {
                list.generated.push(track);
            } else {
                list.manually_created.push(track);
            }
        }

        Ok(list)
    }
}

impl TranscriptList {
    /// Pick the first requested language that has a track
    ///
    /// Within a language, manually created tracks win over generated ones.
    pub fn find_transcript(&self, languages: &[String]) -> Result<&CaptionTrack, RetrievalError> {
        for code in languages {
            let found = self
                .manually_created
                .iter()
                .chain(self.generated.iter())
                .find(|track| &track.language_code == code);

            if let Some(track) = found {
                return Ok(track);
            }
        }

        Err(RetrievalError::NoTranscriptFound {
            url: self.video_url.clone(),
            requested: languages.to_vec(),
            available: self.describe(),
        })
    }

    /// Human readable listing of the available tracks
    pub fn describe(&self) -> String {
        format!(
            "For this video ({}) transcripts are available in the following languages:\n\n(MANUALLY CREATED)\n{}\n\n(GENERATED)\n{}",
            self.video_url,
            describe_tracks(&self.manually_created),
            describe_tracks(&self.generated),
        )
    }
}

fn describe_tracks(tracks: &[CaptionTrack]) -> String {
    if tracks.is_empty() {
        return "None".to_string();
    }

    tracks
        .iter()
        .map(|track| format!(" - {} (\"{}\")", track.language_code, track.language))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const URL: &str = "https://www.youtube.com/watch?v=abc";

    fn player(value: serde_json::Value) -> PlayerResponse {
        serde_json::from_value(value).unwrap()
    }

    fn langs(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|code| code.to_string()).collect()
    }

    fn sample() -> PlayerResponse {
        player(json!({
            "playabilityStatus": { "status": "OK" },
            "captions": {
                "playerCaptionsTracklistRenderer": {
                    "captionTracks": [
                        { "baseUrl": "https://t/hi-asr", "languageCode": "hi", "kind": "asr",
                          "name": { "runs": [{ "text": "Hindi (auto-generated)" }] } },
                        { "baseUrl": "https://t/en-asr", "languageCode": "en", "kind": "asr",
                          "name": { "simpleText": "English (auto-generated)" } },
                        { "baseUrl": "https://t/en", "languageCode": "en",
                          "name": { "simpleText": "English" } }
                    ]
                }
            }
        }))
    }

    #[test]
    fn test_manual_track_preferred() {
        let list = sample().into_transcript_list(URL).unwrap();
        let track = list.find_transcript(&langs(&["en", "hi"])).unwrap();
        assert_eq!(track.base_url, "https://t/en");
        assert!(!track.is_generated);
    }

    #[test]
    fn test_language_order_wins_over_origin() {
        let list = sample().into_transcript_list(URL).unwrap();
        let track = list.find_transcript(&langs(&["hi", "en"])).unwrap();
        assert_eq!(track.base_url, "https://t/hi-asr");
        assert_eq!(track.language, "Hindi (auto-generated)");
    }

    #[test]
    fn test_no_requested_language() {
        let list = sample().into_transcript_list(URL).unwrap();
        let err = list.find_transcript(&langs(&["fr"])).unwrap_err();

        assert!(err.is_no_transcript_found());
        let message = err.to_string();
        assert!(message.contains(r#" - en ("English")"#));
        assert!(message.contains(r#" - hi ("Hindi (auto-generated)")"#));
    }

    #[test]
    fn test_missing_captions_means_disabled() {
        let response = player(json!({ "playabilityStatus": { "status": "OK" } }));
        let err = response.into_transcript_list(URL).unwrap_err();
        assert!(matches!(err, RetrievalError::TranscriptsDisabled { .. }));

        let response = player(json!({
            "captions": { "playerCaptionsTracklistRenderer": { "captionTracks": [] } }
        }));
        assert!(matches!(
            response.into_transcript_list(URL).unwrap_err(),
            RetrievalError::TranscriptsDisabled { .. }
        ));
    }

    #[test]
    fn test_playability_statuses() {
        let check = |status: &str, reason: &str, id: &str| {
            player(json!({ "playabilityStatus": { "status": status, "reason": reason } }))
                .check_playability(id, URL)
        };

        assert!(check("OK", "", "abc").is_ok());
        assert!(matches!(
            check("ERROR", UNAVAILABLE_REASON, "abc"),
            Err(RetrievalError::VideoUnavailable { .. })
        ));
        assert!(matches!(
            check("ERROR", UNAVAILABLE_REASON, "https://youtu.be/abc"),
            Err(RetrievalError::InvalidVideoId { .. })
        ));
        assert!(matches!(
            check("LOGIN_REQUIRED", BOT_CHECK_REASON, "abc"),
            Err(RetrievalError::RequestBlocked { .. })
        ));
        assert!(matches!(
            check("LOGIN_REQUIRED", AGE_RESTRICTED_REASON, "abc"),
            Err(RetrievalError::AgeRestricted { .. })
        ));

        match check("UNPLAYABLE", "Private video", "abc") {
            Err(RetrievalError::VideoUnplayable { reason, .. }) => {
                assert_eq!(reason, "Private video")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_playability_is_ok() {
        assert!(player(json!({})).check_playability("abc", URL).is_ok());
    }
}
