//! Test utilities: an in-memory `SearchBackend` with scripted failures

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::{Value, json};

use kodegen_tools_docsearch::engine::{RawHit, SearchResponse};
use kodegen_tools_docsearch::{
    Document, EngineError, EngineResult, IndexSchema, Refresh, SearchBackend, WriteOp,
};

/// How `ping` behaves
#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub enum PingBehavior {
    Healthy,
    /// Connectivity error for the first N pings, healthy afterwards
    FailTimes(u32),
    /// Connectivity error on every ping
    AlwaysFails,
    /// Answers with a non-2xx status on every ping
    AlwaysUnhealthy,
    /// The ping future never completes
    NeverResponds,
}

/// Every call the core made, in order
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Ping,
    CreateIndex(String),
    Exists(String),
    Insert {
        id: String,
        refresh: Refresh,
        op: WriteOp,
    },
    Search(Value),
}

#[derive(Default)]
struct StoredIndex {
    schema: Option<IndexSchema>,
    docs: BTreeMap<String, Value>,
}

struct State {
    ping: PingBehavior,
    pings_seen: u32,
    indices: HashMap<String, StoredIndex>,
    rejected_ids: HashSet<String>,
    create_failure: Option<(u16, String)>,
    calls: Vec<Call>,
}

pub struct InMemoryBackend {
    state: Mutex<State>,
}

#[allow(dead_code)]
impl InMemoryBackend {
    pub fn new() -> Self {
        Self::with_ping(PingBehavior::Healthy)
    }

    pub fn with_ping(ping: PingBehavior) -> Self {
        Self {
            state: Mutex::new(State {
                ping,
                pings_seen: 0,
                indices: HashMap::new(),
                rejected_ids: HashSet::new(),
                create_failure: None,
                calls: Vec::new(),
            }),
        }
    }

    /// Inserts of this id fail with a 400 mapping error
    pub fn reject_insert_of(&self, id: &str) {
        self.lock().rejected_ids.insert(id.to_string());
    }

    /// Index creation fails with this status instead of succeeding
    pub fn fail_create_index(&self, status: u16, reason: &str) {
        self.lock().create_failure = Some((status, reason.to_string()));
    }

    /// Store a document directly, bypassing the call log
    pub fn seed(&self, index: &str, document: &Document) {
        self.lock()
            .indices
            .entry(index.to_string())
            .or_default()
            .docs
            .insert(document.id().to_string(), document.source());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn ping_count(&self) -> u32 {
        self.lock().pings_seen
    }

    pub fn write_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::CreateIndex(_) | Call::Insert { .. }))
            .count()
    }

    pub fn schema_of(&self, index: &str) -> Option<IndexSchema> {
        self.lock().indices.get(index).and_then(|i| i.schema.clone())
    }

    pub fn stored(&self, index: &str) -> BTreeMap<String, Value> {
        self.lock()
            .indices
            .get(index)
            .map(|i| i.docs.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("backend state poisoned")
    }
}

fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// `"title^2"` -> `("title", 2.0)`
fn parse_field(spec: &str) -> (String, f64) {
    match spec.split_once('^') {
        Some((name, boost)) => (name.to_string(), boost.parse().unwrap_or(1.0)),
        None => (spec.to_string(), 1.0),
    }
}

/// Best-field scoring: the score of the single best field, boost applied
fn best_field_score(source: &Value, keyword: &str, fields: &[(String, f64)]) -> f64 {
    let wanted = tokens(keyword);
    fields
        .iter()
        .map(|(name, boost)| {
            let text = source.get(name).and_then(Value::as_str).unwrap_or("");
            let have = tokens(text);
            let matched = wanted.iter().filter(|w| have.contains(w)).count();
            matched as f64 * boost
        })
        .fold(0.0, f64::max)
}

fn run_search(docs: &BTreeMap<String, Value>, request: &Value) -> EngineResult<SearchResponse> {
    let bool_query = &request["query"]["bool"];
    let multi_match = &bool_query["must"][0]["multi_match"];
    let keyword = multi_match["query"].as_str().ok_or_else(|| EngineError::Rejected {
        operation: "search",
        target: "query".to_string(),
        status: 400,
        reason: "parsing_exception: missing multi_match.query".to_string(),
    })?;
    let fields: Vec<(String, f64)> = multi_match["fields"]
        .as_array()
        .map(|a| a.iter().filter_map(Value::as_str).map(parse_field).collect())
        .unwrap_or_default();

    let filters: Vec<(String, Value)> = bool_query["filter"]
        .as_array()
        .map(|a| {
            a.iter()
                .filter_map(|f| f["term"].as_object())
                .flat_map(|term| term.iter().map(|(k, v)| (k.clone(), v.clone())))
                .collect()
        })
        .unwrap_or_default();

    let selected: Option<Vec<String>> = request["_source"].as_array().map(|a| {
        a.iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    });
    let size = request["size"].as_u64().unwrap_or(10) as usize;

    let mut hits: Vec<RawHit> = docs
        .iter()
        .filter(|(_, source)| filters.iter().all(|(field, value)| &source[field] == value))
        .filter_map(|(id, source)| {
            let score = best_field_score(source, keyword, &fields);
            (score > 0.0).then(|| {
                let projected = match &selected {
                    Some(names) => {
                        let mut out = serde_json::Map::new();
                        for name in names {
                            if let Some(v) = source.get(name) {
                                out.insert(name.clone(), v.clone());
                            }
                        }
                        Value::Object(out)
                    }
                    None => source.clone(),
                };
                RawHit {
                    id: id.clone(),
                    score: Some(score),
                    source: projected,
                }
            })
        })
        .collect();

    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    hits.truncate(size);

    Ok(SearchResponse::from_hits(hits))
}

impl SearchBackend for InMemoryBackend {
    fn ping(&self) -> BoxFuture<'_, EngineResult<bool>> {
        let behavior = {
            let mut state = self.lock();
            state.calls.push(Call::Ping);
            state.pings_seen += 1;
            (state.ping, state.pings_seen)
        };

        match behavior {
            (PingBehavior::NeverResponds, _) => futures::future::pending().boxed(),
            (PingBehavior::Healthy, _) => futures::future::ready(Ok(true)).boxed(),
            (PingBehavior::AlwaysUnhealthy, _) => futures::future::ready(Ok(false)).boxed(),
            (PingBehavior::FailTimes(n), seen) if seen > n => {
                futures::future::ready(Ok(true)).boxed()
            }
            (PingBehavior::FailTimes(_) | PingBehavior::AlwaysFails, _) => {
                futures::future::ready(Err(EngineError::Connectivity {
                    operation: "ping",
                    message: "connection refused".to_string(),
                }))
                .boxed()
            }
        }
    }

    fn create_index<'a>(
        &'a self,
        index: &'a str,
        schema: &'a IndexSchema,
    ) -> BoxFuture<'a, EngineResult<()>> {
        let result = {
            let mut state = self.lock();
            state.calls.push(Call::CreateIndex(index.to_string()));

            if let Some((status, reason)) = state.create_failure.clone() {
                Err(EngineError::Rejected {
                    operation: "create_index",
                    target: index.to_string(),
                    status,
                    reason,
                })
            } else {
                let entry = state.indices.entry(index.to_string()).or_default();
                if entry.schema.is_some() {
                    Err(EngineError::AlreadyExists {
                        index: index.to_string(),
                    })
                } else {
                    entry.schema = Some(schema.clone());
                    Ok(())
                }
            }
        };
        futures::future::ready(result).boxed()
    }

    fn exists<'a>(&'a self, index: &'a str, id: &'a str) -> BoxFuture<'a, EngineResult<bool>> {
        let found = {
            let mut state = self.lock();
            state.calls.push(Call::Exists(id.to_string()));
            state
                .indices
                .get(index)
                .is_some_and(|i| i.docs.contains_key(id))
        };
        futures::future::ready(Ok(found)).boxed()
    }

    fn insert<'a>(
        &'a self,
        index: &'a str,
        document: &'a Document,
        refresh: Refresh,
        op: WriteOp,
    ) -> BoxFuture<'a, EngineResult<()>> {
        let result = {
            let mut state = self.lock();
            state.calls.push(Call::Insert {
                id: document.id().to_string(),
                refresh,
                op,
            });

            if state.rejected_ids.contains(document.id()) {
                Err(EngineError::Rejected {
                    operation: "insert",
                    target: format!("{index}/{}", document.id()),
                    status: 400,
                    reason: "mapper_parsing_exception".to_string(),
                })
            } else {
                let docs = &mut state.indices.entry(index.to_string()).or_default().docs;
                if op == WriteOp::Create && docs.contains_key(document.id()) {
                    Err(EngineError::Conflict {
                        index: index.to_string(),
                        id: document.id().to_string(),
                    })
                } else {
                    docs.insert(document.id().to_string(), document.source());
                    Ok(())
                }
            }
        };
        futures::future::ready(result).boxed()
    }

    fn search<'a>(
        &'a self,
        index: &'a str,
        request: &'a Value,
    ) -> BoxFuture<'a, EngineResult<SearchResponse>> {
        let result = {
            let mut state = self.lock();
            state.calls.push(Call::Search(request.clone()));
            match state.indices.get(index) {
                Some(stored) => run_search(&stored.docs, request),
                None => Err(EngineError::Rejected {
                    operation: "search",
                    target: index.to_string(),
                    status: 404,
                    reason: format!("index_not_found_exception: no such index [{index}]"),
                }),
            }
        };
        futures::future::ready(result).boxed()
    }
}

/// Documents spanning all three well-known content types
#[allow(dead_code)]
pub fn mixed_documents() -> Vec<Document> {
    use kodegen_tools_docsearch::ContentType;

    vec![
        Document::new(
            "a1",
            "Rust search guide",
            "Building a search client in Rust.",
            ContentType::article(),
        ),
        Document::new(
            "n1",
            "Rust release notes",
            "The search team shipped a new release.",
            ContentType::news(),
        ),
        Document::new(
            "b1",
            "Weekend blog",
            "Notes on search relevance and Rust.",
            ContentType::blog(),
        ),
        Document::new(
            "a2",
            "Cooking basics",
            "Nothing about the topic at all.",
            ContentType::article(),
        ),
    ]
}

/// Shortcut for asserting on JSON request bodies
#[allow(dead_code)]
pub fn term_filter(content_type: &str) -> Value {
    json!([{ "term": { "content_type": content_type } }])
}
