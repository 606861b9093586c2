//! Parser for YouTube's `fmt=json3` timed text.

use serde::Deserialize;

use super::CaptionEntry;

#[derive(Debug, Deserialize)]
struct TimedText {
    #[serde(default)]
    events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Event {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    #[serde(default)]
    a_append: u8,
    segs: Option<Vec<Segment>>,
}

#[derive(Debug, Deserialize)]
struct Segment {
    #[serde(default)]
    utf8: String,
}

/// Parse a json3 document into caption entries, in document order
///
/// Events without segments, line-append events and events with no text are skipped.
pub fn parse(body: &str) -> Result<Vec<CaptionEntry>, serde_json::Error> {
    let timed_text: TimedText = serde_json::from_str(body)?;

    let entries = timed_text
        .events
        .into_iter()
        .filter(|event| event.a_append == 0)
        .filter_map(|event| {
            let text: String = event.segs?.into_iter().map(|seg| seg.utf8).collect();
            if text.is_empty() {
                return None;
            }

            Some(CaptionEntry::new(
                text,
                event.t_start_ms as f64 / 1000.0,
                event.d_duration_ms as f64 / 1000.0,
            ))
        })
        .collect();

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_events() {
        let body = r#"{
            "wireMagic": "pb3",
            "events": [
                { "tStartMs": 0, "dDurationMs": 2500, "id": 1, "wpWinPosId": 1 },
                { "tStartMs": 120, "dDurationMs": 2340, "segs": [ { "utf8": "hello" }, { "utf8": " world", "tOffsetMs": 400 } ] },
                { "tStartMs": 2460, "dDurationMs": 40, "aAppend": 1, "segs": [ { "utf8": "\n" } ] },
                { "tStartMs": 2500, "dDurationMs": 1500, "segs": [ { "utf8": "नमस्ते " } ] },
                { "tStartMs": 4000, "dDurationMs": 10, "segs": [ { "utf8": "" } ] }
            ]
        }"#;

        let entries = parse(body).unwrap();
        assert_eq!(
            entries,
            vec![
                CaptionEntry::new("hello world", 0.12, 2.34),
                CaptionEntry::new("नमस्ते ", 2.5, 1.5),
            ]
        );
    }

    #[test]
    fn test_parse_empty_document() {
        assert!(parse("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("<transcript/>").is_err());
    }
}
