//! # apollo-datasource
//!
//! Backend clients for the Apollo taxonomy gateway.
//!
//! This crate provides:
//! - A typed REST client for the JSON store (concepts, schemes, documents)
//! - A SPARQL client for label search over the triple store
//! - Query-string construction for json-server filter operators
//! - Narrower-term expansion for classification search
//!
//! ## Example
//!
//! ```rust,ignore
//! use apollo_datasource::{BackendConfig, Datasources};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sources = Datasources::new(&BackendConfig::from_env())?;
//!
//!     let concept = sources.concepts.get_by_id("123").await?;
//!     println!("{:?}", concept.map(|c| c.pref_label_en));
//!     Ok(())
//! }
//! ```

pub mod closure;
pub mod concepts;
pub mod config;
pub mod documents;
pub mod query;
pub mod schemes;
pub mod sparql;
pub mod transport;

// Re-export core types
pub use apollo_core::{Error, Result};

pub use closure::narrower_closure;
pub use concepts::{ConceptClient, ConceptFetcher};
pub use config::BackendConfig;
pub use documents::DocumentClient;
pub use query::{Filter, ListQuery, OrderBy, Paging};
pub use schemes::ConceptSchemeClient;
pub use sparql::{ConceptSearch, LabelMatch, SparqlClient};
pub use transport::{JsonStore, Listing};

/// All backend clients behind one handle.
///
/// Both stores are reached through a single shared connection pool; cloning
/// the aggregate is cheap and every clone keeps sharing it.
#[derive(Debug, Clone)]
pub struct Datasources {
    /// SKOS concepts in the JSON store.
    pub concepts: ConceptClient,
    /// SKOS concept schemes in the JSON store.
    pub schemes: ConceptSchemeClient,
    /// Typed documents, content, and references in the JSON store.
    pub documents: DocumentClient,
    /// Label search over the triple store.
    pub search: SparqlClient,
}

impl Datasources {
    /// Create all clients from one configuration.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        let store = JsonStore::with_client(client.clone(), &config.json_db_url);

        Ok(Self {
            concepts: ConceptClient::new(store.clone()),
            schemes: ConceptSchemeClient::new(store.clone()),
            documents: DocumentClient::new(store),
            search: SparqlClient::with_client(client, &config.sparql_url),
        })
    }
}
