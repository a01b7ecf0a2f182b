//! # apollo-core
//!
//! Core types for the Apollo taxonomy gateway.
//!
//! This crate provides the identifier codec, backend record models, cursor
//! pagination, and node classification that the datasource and graph crates
//! build on. It performs no I/O of its own.

pub mod connection;
pub mod defaults;
pub mod error;
pub mod global_id;
pub mod language;
pub mod models;
pub mod node;

// Re-export commonly used types at crate root
pub use connection::{paginate, ConnectionArgs, Edge, Page, PageInfo};
pub use defaults::*;
pub use error::{Error, Result};
pub use global_id::GlobalId;
pub use language::{ConceptKind, Language, SortOrder, DEFAULT_LANGUAGE};
pub use models::{
    ApolloDocumentRecord, BibliographicReferenceRecord, ConceptRecord, ConceptSchemeRecord,
    ContentRecord,
};
pub use node::NodeKind;
