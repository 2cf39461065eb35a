//! SQLite persistence for numerology profiles, cached analyses, and cached
//! compatibility results. The store never re-derives a number; it persists
//! exactly what numera-core computed.

pub mod error;
pub mod json;
pub mod schema;
pub mod store;

pub use error::{Result, StoreError};
pub use json::ProfileExport;
pub use store::{AnalysisRecord, Profile, Store};
