//! REST implementation of `SearchBackend` for OpenSearch / Elasticsearch
//!
//! Each method is a single request/response; the client holds no session
//! state beyond the pooled `reqwest::Client`, so clones are cheap and share
//! connections.

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use url::Url;

use super::backend::{Refresh, SearchBackend, WriteOp};
use super::errors::{EngineError, EngineResult};
use super::response::SearchResponse;
use crate::config::ClusterConfig;
use crate::model::Document;
use crate::schema::IndexSchema;
use crate::utils::safe_truncate_chars;

/// Error type reported by the cluster when the index is already there
const ALREADY_EXISTS_TYPES: &[&str] = &[
    "resource_already_exists_exception",
    "index_already_exists_exception",
];

/// Longest raw body echoed into an error message
const MAX_REASON_CHARS: usize = 300;

#[derive(Clone)]
pub struct OpenSearchClient {
    http: Client,
    base_url: Url,
    credentials: Option<(String, String)>,
}

impl OpenSearchClient {
    /// Build a client from resolved connection parameters
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Validation` when host/port do not form a URL and
    /// `EngineError::Connectivity` when the TLS backend cannot be initialized.
    pub fn new(config: &ClusterConfig) -> EngineResult<Self> {
        let base_url = config
            .base_url()
            .map_err(|e| EngineError::Validation(format!("Invalid cluster address: {e}")))?;

        let http = Client::builder()
            .timeout(config.request_timeout())
            .danger_accept_invalid_certs(!config.verify_certs())
            .build()
            .map_err(|e| EngineError::connectivity("client_init", e))?;

        if !config.verify_certs() {
            tracing::warn!(url = %base_url, "TLS certificate verification is disabled");
        }
        tracing::info!(url = %base_url, "Cluster client created");

        Ok(Self {
            http,
            base_url,
            credentials: config
                .credentials()
                .map(|(user, pass)| (user.to_string(), pass.to_string())),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> EngineResult<Url> {
        // `url` drops dot segments silently, which would retarget the request
        if let Some(dot) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(EngineError::Validation(format!(
                "Path segment '{dot}' cannot be addressed in a URL"
            )));
        }
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                EngineError::Validation(format!("Cluster URL cannot be a base: {}", self.base_url))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.credentials {
            Some((user, pass)) => builder.basic_auth(user, Some(pass)),
            None => builder,
        }
    }

    async fn ping_inner(&self) -> EngineResult<bool> {
        let response = self
            .request(Method::HEAD, self.base_url.clone())
            .send()
            .await
            .map_err(|e| EngineError::connectivity("ping", e))?;
        Ok(response.status().is_success())
    }

    async fn create_index_inner(&self, index: &str, schema: &IndexSchema) -> EngineResult<()> {
        let url = self.endpoint(&[index])?;
        let response = self
            .request(Method::PUT, url)
            .json(&schema.to_request_body())
            .send()
            .await
            .map_err(|e| EngineError::connectivity("create_index", e))?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let failure = ErrorBody::read(response).await;
        if status == StatusCode::BAD_REQUEST
            && failure
                .error_type
                .as_deref()
                .is_some_and(|t| ALREADY_EXISTS_TYPES.contains(&t))
        {
            return Err(EngineError::AlreadyExists {
                index: index.to_string(),
            });
        }

        Err(EngineError::Rejected {
            operation: "create_index",
            target: index.to_string(),
            status: status.as_u16(),
            reason: failure.reason,
        })
    }

    async fn exists_inner(&self, index: &str, id: &str) -> EngineResult<bool> {
        let url = self.endpoint(&[index, "_doc", id])?;
        let response = self
            .request(Method::HEAD, url)
            .send()
            .await
            .map_err(|e| EngineError::connectivity("exists", e))?;

        match response.status() {
            s if s.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(EngineError::Rejected {
                operation: "exists",
                target: format!("{index}/{id}"),
                status: status.as_u16(),
                // HEAD responses carry no body
                reason: status.canonical_reason().unwrap_or("unexpected status").to_string(),
            }),
        }
    }

    async fn insert_inner(
        &self,
        index: &str,
        document: &Document,
        refresh: Refresh,
        op: WriteOp,
    ) -> EngineResult<()> {
        let endpoint = match op {
            WriteOp::Index => "_doc",
            WriteOp::Create => "_create",
        };
        let mut url = self.endpoint(&[index, endpoint, document.id()])?;
        url.query_pairs_mut().append_pair("refresh", refresh.as_param());

        let response = self
            .request(Method::PUT, url)
            .json(&document.source())
            .send()
            .await
            .map_err(|e| EngineError::connectivity("insert", e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        if status == StatusCode::CONFLICT {
            return Err(EngineError::Conflict {
                index: index.to_string(),
                id: document.id().to_string(),
            });
        }

        let failure = ErrorBody::read(response).await;
        Err(EngineError::Rejected {
            operation: "insert",
            target: format!("{index}/{}", document.id()),
            status: status.as_u16(),
            reason: failure.reason,
        })
    }

    async fn search_inner(&self, index: &str, request: &Value) -> EngineResult<SearchResponse> {
        let url = self.endpoint(&[index, "_search"])?;
        let response = self
            .request(Method::POST, url)
            .json(request)
            .send()
            .await
            .map_err(|e| EngineError::connectivity("search", e))?;

        let status = response.status();
        if !status.is_success() {
            let failure = ErrorBody::read(response).await;
            return Err(EngineError::Rejected {
                operation: "search",
                target: index.to_string(),
                status: status.as_u16(),
                reason: failure.reason,
            });
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| EngineError::Decode {
                operation: "search",
                message: e.to_string(),
            })
    }
}

impl SearchBackend for OpenSearchClient {
    fn ping(&self) -> BoxFuture<'_, EngineResult<bool>> {
        self.ping_inner().boxed()
    }

    fn create_index<'a>(
        &'a self,
        index: &'a str,
        schema: &'a IndexSchema,
    ) -> BoxFuture<'a, EngineResult<()>> {
        self.create_index_inner(index, schema).boxed()
    }

    fn exists<'a>(&'a self, index: &'a str, id: &'a str) -> BoxFuture<'a, EngineResult<bool>> {
        self.exists_inner(index, id).boxed()
    }

    fn insert<'a>(
        &'a self,
        index: &'a str,
        document: &'a Document,
        refresh: Refresh,
        op: WriteOp,
    ) -> BoxFuture<'a, EngineResult<()>> {
        self.insert_inner(index, document, refresh, op).boxed()
    }

    fn search<'a>(
        &'a self,
        index: &'a str,
        request: &'a Value,
    ) -> BoxFuture<'a, EngineResult<SearchResponse>> {
        self.search_inner(index, request).boxed()
    }
}

/// `error.type` / `error.reason` pulled out of a failed response
struct ErrorBody {
    error_type: Option<String>,
    reason: String,
}

impl ErrorBody {
    async fn read(response: Response) -> Self {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        Self::parse(&text, status)
    }

    fn parse(text: &str, status: StatusCode) -> Self {
        let parsed: Option<Value> = serde_json::from_str(text).ok();
        let error = parsed.as_ref().and_then(|v| v.get("error"));

        let error_type = error
            .and_then(|e| e.get("type"))
            .and_then(Value::as_str)
            .map(str::to_string);

        let reason = error
            .and_then(|e| e.get("reason").and_then(Value::as_str).or_else(|| e.as_str()))
            .map(str::to_string)
            .or_else(|| {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| safe_truncate_chars(trimmed, MAX_REASON_CHARS).to_string())
            })
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());

        Self { error_type, reason }
    }
}
