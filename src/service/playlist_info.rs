//! Playlist metadata lookup: fetches a public playlist page and reads
//! its Open Graph tags.
//!
//! The fetch runs to completion or fails outright; there is no retry
//! and no timeout beyond the HTTP client default.

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;

/// Metadata scraped from a playlist page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistInfo {
    /// Playlist title from `og:title`.
    pub name: String,
    /// Follower/save count parsed from the description, when present.
    pub followers: Option<i64>,
    /// Track count parsed from the description, when present.
    pub songs_count: Option<i64>,
    /// Cover image URL from `og:image`.
    pub cover_image: String,
    /// Raw `og:description` text.
    pub description: String,
}

/// Fetches a playlist page and extracts its Open Graph metadata.
///
/// # Errors
///
/// Returns [`ApiError::Upstream`] when the page cannot be fetched or
/// returns a non-2xx status.
pub async fn fetch_playlist_info(
    http: &reqwest::Client,
    url: &str,
) -> Result<PlaylistInfo, ApiError> {
    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| ApiError::Upstream(format!("playlist fetch failed: {e}")))?;

    if !response.status().is_success() {
        return Err(ApiError::Upstream(format!(
            "playlist page returned {}",
            response.status()
        )));
    }

    let html = response
        .text()
        .await
        .map_err(|e| ApiError::Upstream(format!("playlist body read failed: {e}")))?;

    Ok(parse_open_graph(&html))
}

/// Extracts playlist metadata from raw HTML Open Graph tags.
#[must_use]
pub fn parse_open_graph(html: &str) -> PlaylistInfo {
    let name = meta_content(html, "og:title").unwrap_or_default();
    let cover_image = meta_content(html, "og:image").unwrap_or_default();
    let description = meta_content(html, "og:description").unwrap_or_default();

    let followers = extract_count(&description, &["followers", "saves", "likes"]);
    let songs_count = extract_count(&description, &["songs", "items", "tracks"]);

    PlaylistInfo {
        name,
        followers,
        songs_count,
        cover_image,
        description,
    }
}

/// Returns the `content` attribute of the first `<meta>` tag whose
/// `property` or `name` attribute equals `key`.
fn meta_content(html: &str, key: &str) -> Option<String> {
    for chunk in html.split("<meta").skip(1) {
        let tag = chunk.split('>').next().unwrap_or("");
        let matches_key = attr_value(tag, "property").is_some_and(|v| v == key)
            || attr_value(tag, "name").is_some_and(|v| v == key);
        if matches_key {
            return attr_value(tag, "content").map(str::to_string);
        }
    }
    None
}

/// Reads a quoted attribute value from a tag fragment.
fn attr_value<'a>(tag: &'a str, attr: &str) -> Option<&'a str> {
    let needle = format!("{attr}=\"");
    let start = tag.find(&needle)? + needle.len();
    let rest = tag.get(start..)?;
    let end = rest.find('"')?;
    rest.get(..end)
}

/// Finds a number immediately preceding any of `keywords` in free-form
/// description text (e.g. `"Playlist · 1.2K saves · 50 items"`).
fn extract_count(text: &str, keywords: &[&str]) -> Option<i64> {
    let tokens: Vec<&str> = text
        .split(|c: char| c.is_whitespace() || c == '·')
        .filter(|t| !t.is_empty())
        .collect();

    for window in tokens.windows(2) {
        let (Some(value), Some(word)) = (window.first().copied(), window.get(1).copied()) else {
            continue;
        };
        let word = word.trim_end_matches(|c: char| !c.is_ascii_alphanumeric());
        if keywords
            .iter()
            .any(|k| word.eq_ignore_ascii_case(k) || word.eq_ignore_ascii_case(k.trim_end_matches('s')))
        {
            if let Some(n) = parse_compact_number(value) {
                return Some(n);
            }
        }
    }
    None
}

/// Parses `"1234"`, `"1,234"`, `"1.2K"`, `"3M"` style counts.
fn parse_compact_number(raw: &str) -> Option<i64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }

    let (digits, multiplier) = match cleaned.chars().last() {
        Some('k' | 'K') => (cleaned.get(..cleaned.len() - 1)?, 1_000.0),
        Some('m' | 'M') => (cleaned.get(..cleaned.len() - 1)?, 1_000_000.0),
        _ => (cleaned.as_str(), 1.0),
    };

    let value: f64 = digits.parse().ok()?;
    if value < 0.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    Some((value * multiplier) as i64)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<html><head>
        <meta property="og:title" content="Fresh Finds"/>
        <meta property="og:image" content="https://img.example.com/cover.jpg"/>
        <meta property="og:description" content="Playlist · Curator · 50 items · 1.2K saves"/>
        </head><body></body></html>"#;

    #[test]
    fn parses_title_image_and_description() {
        let info = parse_open_graph(SAMPLE);
        assert_eq!(info.name, "Fresh Finds");
        assert_eq!(info.cover_image, "https://img.example.com/cover.jpg");
        assert!(info.description.contains("50 items"));
    }

    #[test]
    fn parses_counts_from_description() {
        let info = parse_open_graph(SAMPLE);
        assert_eq!(info.songs_count, Some(50));
        assert_eq!(info.followers, Some(1200));
    }

    #[test]
    fn name_attribute_is_accepted_for_meta_tags() {
        let html = r#"<meta name="og:title" content="Indie Mix">"#;
        let info = parse_open_graph(html);
        assert_eq!(info.name, "Indie Mix");
    }

    #[test]
    fn missing_tags_yield_empty_defaults() {
        let info = parse_open_graph("<html><head></head></html>");
        assert_eq!(info, PlaylistInfo::default());
    }

    #[test]
    fn compact_numbers_parse() {
        assert_eq!(parse_compact_number("1,234"), Some(1234));
        assert_eq!(parse_compact_number("1.2K"), Some(1200));
        assert_eq!(parse_compact_number("3M"), Some(3_000_000));
        assert_eq!(parse_compact_number("abc"), None);
    }

    #[test]
    fn plain_follower_counts_parse() {
        assert_eq!(
            extract_count("12,345 Followers · 40 songs", &["followers"]),
            Some(12345)
        );
        assert_eq!(
            extract_count("12,345 Followers · 40 songs", &["songs"]),
            Some(40)
        );
    }
}
