//! Documents stored in the target index

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;

use crate::engine::{EngineError, EngineResult};

/// Category label, stored as an exact-match keyword
///
/// The set is open: the well-known labels have constructors, anything else
/// goes through `ContentType::new`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentType(String);

impl ContentType {
    pub const ARTICLE: &'static str = "article";
    pub const NEWS: &'static str = "news";
    pub const BLOG: &'static str = "blog";

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    #[must_use]
    pub fn article() -> Self {
        Self::new(Self::ARTICLE)
    }

    #[must_use]
    pub fn news() -> Self {
        Self::new(Self::NEWS)
    }

    #[must_use]
    pub fn blog() -> Self {
        Self::new(Self::BLOG)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A document with a caller-assigned id
///
/// The id is fixed at construction and is not part of the stored source.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    id: String,
    pub title: String,
    pub content: String,
    pub content_type: ContentType,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        content_type: ContentType,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            content_type,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// JSON body written to the index
    #[must_use]
    pub fn source(&self) -> Value {
        json!({
            "title": self.title,
            "content": self.content,
            "content_type": self.content_type,
        })
    }

    /// Reject documents the cluster would refuse or misfile
    ///
    /// # Errors
    ///
    /// `EngineError::Validation` for a blank id, an id of `.` or `..` (a URL
    /// path cannot address those), or a blank content type.
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(EngineError::Validation(format!(
                "Document '{}' has an empty id",
                self.title
            )));
        }
        if matches!(self.id.as_str(), "." | "..") {
            return Err(EngineError::Validation(format!(
                "Document id '{}' is not addressable over REST",
                self.id
            )));
        }
        if self.content_type.as_str().trim().is_empty() {
            return Err(EngineError::Validation(format!(
                "Document '{}' has an empty content_type",
                self.id
            )));
        }
        Ok(())
    }
}

/// The canonical document set loaded on every run
///
/// Ids are positional (`"1"`..`"4"`), so re-running against a populated
/// index finds every document already present.
#[must_use]
pub fn sample_documents() -> Vec<Document> {
    let docs = [
        (
            "OpenSearch overview",
            "OpenSearch is an open source search and analytics engine.",
            ContentType::article(),
        ),
        (
            "Python and OpenSearch",
            "Python has a client library for OpenSearch called opensearch-py.",
            ContentType::article(),
        ),
        (
            "Project news",
            "A new OpenSearch release is out.",
            ContentType::news(),
        ),
        (
            "Blog post",
            "How to set up an index in OpenSearch.",
            ContentType::blog(),
        ),
    ];

    docs.into_iter()
        .enumerate()
        .map(|(i, (title, content, content_type))| {
            Document::new((i + 1).to_string(), title, content, content_type)
        })
        .collect()
}
