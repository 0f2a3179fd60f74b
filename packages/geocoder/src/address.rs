//! Address cleanup before geocoding.
//!
//! Temple lists are often assembled from templated exports, so addresses
//! can contain unrendered placeholders (`"{{street}} 12 Main St"`) and
//! irregular whitespace. Both confuse free-text geocoders.

use regex::Regex;
use std::sync::LazyLock;

/// Regex for unrendered `{{...}}` template markers.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{.*?\}\}").expect("valid regex"));

/// Regex for runs of whitespace, including newlines and tabs.
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Strips template placeholders and collapses whitespace.
///
/// Returns `None` if nothing is left.
#[must_use]
pub fn sanitize_address(raw: &str) -> Option<String> {
    let without_placeholders = PLACEHOLDER_RE.replace_all(raw, "");
    let collapsed = WHITESPACE_RE.replace_all(&without_placeholders, " ");
    let cleaned = collapsed.trim();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
