//! Hit post-processing: raw `_source` to `{title, snippet}`

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::request::{CONTENT_FIELD, TITLE_FIELD};
use crate::engine::RawHit;
use crate::utils::{SNIPPET_CHARS, safe_truncate_chars};

/// One search result as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub score: Option<f64>,
    pub title: String,
    pub snippet: String,
}

/// First `SNIPPET_CHARS` characters of `content`
///
/// Counts characters rather than bytes, so multi-byte text is never cut
/// inside a code point. No ellipsis is appended.
#[must_use]
pub fn snippet_of(content: &str) -> String {
    safe_truncate_chars(content, SNIPPET_CHARS).to_string()
}

fn text_field<'a>(source: &'a Value, field: &str) -> &'a str {
    source.get(field).and_then(Value::as_str).unwrap_or("")
}

impl From<RawHit> for SearchHit {
    /// Missing or null `title`/`content` become empty strings
    fn from(hit: RawHit) -> Self {
        let title = text_field(&hit.source, TITLE_FIELD).to_string();
        let snippet = snippet_of(text_field(&hit.source, CONTENT_FIELD));

        SearchHit {
            id: hit.id,
            score: hit.score,
            title,
            snippet,
        }
    }
}
