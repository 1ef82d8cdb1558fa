//! Keyword search over the synchronized index
//!
//! A query is a required best-field match over `title` (boosted) and
//! `content`, optionally narrowed by an exact `content_type` filter. Hits
//! come back as `{title, snippet}` pairs in cluster rank order.

// Internal modules
mod builder;
mod execution;
mod request;
mod results;

// Public exports
pub use builder::{SearchQuery, SearchQueryBuilder};
pub use execution::QueryEngine;
pub use request::{CONTENT_FIELD, CONTENT_TYPE_FIELD, TITLE_BOOST, TITLE_FIELD};
pub use results::{SearchHit, snippet_of};
