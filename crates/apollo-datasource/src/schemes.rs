//! Concept-scheme access against the JSON store.

use tracing::instrument;

use apollo_core::{ConceptSchemeRecord, Result};

use crate::query::ListQuery;
use crate::transport::{JsonStore, Listing};

const SCHEMES_PATH: &str = "/conceptschemes";

/// Read access to SKOS concept schemes.
#[derive(Debug, Clone)]
pub struct ConceptSchemeClient {
    store: JsonStore,
}

impl ConceptSchemeClient {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Fetch one scheme by internal id.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Option<ConceptSchemeRecord>> {
        self.store.get_one(&format!("{}/{}", SCHEMES_PATH, id)).await
    }

    /// List schemes matching a query.
    #[instrument(skip(self, query))]
    pub async fn list(&self, query: &ListQuery) -> Result<Listing<ConceptSchemeRecord>> {
        if query.is_vacuous() {
            return Ok(Listing::empty());
        }
        self.store.get_list(SCHEMES_PATH, &query.to_params()).await
    }
}
