//! Query DSL rendering

use serde_json::{Value, json};

use super::builder::SearchQuery;

pub const TITLE_FIELD: &str = "title";
pub const CONTENT_FIELD: &str = "content";
pub const CONTENT_TYPE_FIELD: &str = "content_type";

/// Title matches weigh twice as much as content matches
pub const TITLE_BOOST: f64 = 2.0;

impl SearchQuery {
    /// Body for `POST /{index}/_search`
    ///
    /// `best_fields` scores a hit by its single best-matching field instead of
    /// summing across fields. The content type goes in `filter` so it narrows
    /// the hit set without touching the score.
    #[must_use]
    pub fn to_request_body(&self) -> Value {
        let mut bool_query = json!({
            "must": [{
                "multi_match": {
                    "query": self.keyword(),
                    "fields": [format!("{TITLE_FIELD}^{TITLE_BOOST}"), CONTENT_FIELD],
                    "type": "best_fields"
                }
            }]
        });

        if let Some(content_type) = self.content_type() {
            bool_query["filter"] = json!([
                { "term": { CONTENT_TYPE_FIELD: content_type.as_str() } }
            ]);
        }

        json!({
            "query": { "bool": bool_query },
            "_source": [TITLE_FIELD, CONTENT_FIELD],
            "size": self.size()
        })
    }
}
