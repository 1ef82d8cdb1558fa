//! Search response envelope as returned by `_search`

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: HitsEnvelope,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HitsEnvelope {
    #[serde(default)]
    pub hits: Vec<RawHit>,
}

/// One ranked hit, `_source` left untyped
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawHit {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source", default)]
    pub source: Value,
}

impl SearchResponse {
    #[must_use]
    pub fn from_hits(hits: Vec<RawHit>) -> Self {
        Self {
            hits: HitsEnvelope { hits },
        }
    }

    #[must_use]
    pub fn into_hits(self) -> Vec<RawHit> {
        self.hits.hits
    }
}
