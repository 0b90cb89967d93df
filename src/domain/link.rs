//! Tracking slugs and redirect URL normalization.

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Length of generated tracking slugs.
const SLUG_LEN: usize = 8;

/// Generates a new opaque tracking slug (8 alphanumeric characters,
/// lowercased). Uniqueness is enforced by the database constraint, not
/// here.
#[must_use]
pub fn new_slug() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SLUG_LEN)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect()
}

/// Normalizes a redirect target: trims whitespace and prefixes
/// `https://` when no scheme is present. Scheme matching is
/// case-insensitive.
#[must_use]
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}
