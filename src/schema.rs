//! Index schema (settings + field mappings) and its create-index body

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::utils::KEYWORD_IGNORE_ABOVE;

/// Per-field indexing behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldMapping {
    /// Analyzed full-text field, optionally with an exact-match
    /// `<field>.keyword` sub-field
    Text {
        keyword_subfield: Option<KeywordSubfield>,
    },
    /// Exact-match only, not tokenized
    Keyword,
}

/// The `<field>.keyword` sub-field of a text field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeywordSubfield {
    /// Values longer than this many characters are not indexed in the
    /// sub-field; the document itself is still accepted
    pub ignore_above: Option<u32>,
}

impl KeywordSubfield {
    #[must_use]
    pub fn ignore_above(limit: u32) -> Self {
        Self {
            ignore_above: Some(limit),
        }
    }

    fn to_mapping(self) -> Value {
        let mut mapping = json!({ "type": "keyword" });
        if let Some(limit) = self.ignore_above {
            mapping["ignore_above"] = json!(limit);
        }
        mapping
    }
}

impl FieldMapping {
    /// Plain analyzed text without sub-fields
    #[must_use]
    pub fn text() -> Self {
        FieldMapping::Text {
            keyword_subfield: None,
        }
    }

    fn to_mapping(&self) -> Value {
        match self {
            FieldMapping::Text {
                keyword_subfield: Some(keyword),
            } => json!({
                "type": "text",
                "fields": { "keyword": keyword.to_mapping() }
            }),
            FieldMapping::Text {
                keyword_subfield: None,
            } => json!({ "type": "text" }),
            FieldMapping::Keyword => json!({ "type": "keyword" }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSettings {
    pub number_of_shards: u32,
    pub number_of_replicas: u32,
}

impl Default for IndexSettings {
    /// Single shard, no replicas: a one-node development cluster stays green
    fn default() -> Self {
        Self {
            number_of_shards: 1,
            number_of_replicas: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSchema {
    settings: IndexSettings,
    fields: Vec<(String, FieldMapping)>,
}

impl IndexSchema {
    #[must_use]
    pub fn new(settings: IndexSettings) -> Self {
        Self {
            settings,
            fields: Vec::new(),
        }
    }

    /// Add or replace a field mapping
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, mapping: FieldMapping) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = mapping,
            None => self.fields.push((name, mapping)),
        }
        self
    }

    /// Schema for `model::Document`
    #[must_use]
    pub fn documents() -> Self {
        Self::new(IndexSettings::default())
            .field(
                "title",
                FieldMapping::Text {
                    keyword_subfield: Some(KeywordSubfield::ignore_above(KEYWORD_IGNORE_ABOVE)),
                },
            )
            .field("content", FieldMapping::text())
            .field("content_type", FieldMapping::Keyword)
    }

    #[must_use]
    pub fn settings(&self) -> IndexSettings {
        self.settings
    }

    #[must_use]
    pub fn mapping(&self, name: &str) -> Option<&FieldMapping> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, m)| m)
    }

    /// Body for `PUT /{index}`
    #[must_use]
    pub fn to_request_body(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, mapping)| (name.clone(), mapping.to_mapping()))
            .collect();

        json!({
            "settings": {
                "number_of_shards": self.settings.number_of_shards,
                "number_of_replicas": self.settings.number_of_replicas,
            },
            "mappings": { "properties": properties }
        })
    }
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self::documents()
    }
}
