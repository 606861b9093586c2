use anyhow::Result;
use url::Url;

/// Marker of YouTube's cookie consent interstitial
pub const CONSENT_FORM_MARKER: &str = "action=\"https://consent.youtube.com/s\"";

/// Marker of a reCAPTCHA challenge page
pub const RECAPTCHA_MARKER: &str = "class=\"g-recaptcha\"";

/// Build the watch page URL for a video
pub fn watch_url(base: &str, video_id: &str) -> String {
    format!("{}{}", base, urlencoding::encode(video_id))
}

/// Build the innertube player URL carrying the API key
pub fn innertube_player_url(base: &str, api_key: &str) -> Result<Url> {
    Url::parse_with_params(base, &[("key", api_key)])
        .map_err(|_| anyhow::anyhow!("Invalid innertube URL: {}", base))
}

/// Whether the input looks like a URL rather than a bare identifier
pub fn looks_like_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Read the string value of `"key":"value"` embedded in a page
pub fn extract_json_string(html: &str, key: &str) -> Option<String> {
    let needle = format!("\"{}\":\"", key);
    let start = html.find(&needle)? + needle.len();
    let len = html[start..].find('"')?;
    let value = &html[start..start + len];

    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Read the hidden `v` field of the consent form
pub fn extract_consent_value(html: &str) -> Option<String> {
    let needle = "name=\"v\" value=\"";
    let start = html.find(needle)? + needle.len();
    let len = html[start..].find('"')?;

    Some(html[start..start + len].to_string())
}

/// Ask a caption track URL for the json3 format
pub fn json3_track_url(base_url: &str) -> String {
    let base = base_url.replace("\\u0026", "&").replace("&fmt=srv3", "");
    format!("{}&fmt=json3", base)
}
