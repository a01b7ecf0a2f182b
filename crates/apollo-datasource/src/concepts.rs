//! Concept access against the JSON store.

use async_trait::async_trait;
use tracing::instrument;

use apollo_core::{ConceptRecord, Result};

use crate::query::{Filter, ListQuery};
use crate::transport::{JsonStore, Listing};

const CONCEPTS_PATH: &str = "/concepts";

/// Read access to SKOS concepts.
#[derive(Debug, Clone)]
pub struct ConceptClient {
    store: JsonStore,
}

impl ConceptClient {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Fetch one concept by internal id.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Option<ConceptRecord>> {
        self.store
            .get_one(&format!("{}/{}", CONCEPTS_PATH, id))
            .await
    }

    /// List concepts matching a query.
    ///
    /// A query with an empty ids filter can never match anything; it
    /// short-circuits to an empty listing without a round trip.
    #[instrument(skip(self, query))]
    pub async fn list(&self, query: &ListQuery) -> Result<Listing<ConceptRecord>> {
        if query.is_vacuous() {
            return Ok(Listing::empty());
        }
        self.store.get_list(CONCEPTS_PATH, &query.to_params()).await
    }

    /// Fetch a batch of concepts by id in one request.
    ///
    /// Records come back in store order, not `ids` order, and ids that match
    /// nothing are silently absent.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn get_by_ids(&self, ids: &[String]) -> Result<Vec<ConceptRecord>> {
        let listing = self.get_by_ids_filtered(ids, &ListQuery::new()).await?;
        Ok(listing.items)
    }

    /// Batch-fetch `ids` with extra filters, ordering, and a window applied.
    ///
    /// An explicit ids filter already on the query takes precedence over the
    /// relation ids. Empty relation ids with no explicit filter short-circuit
    /// to an empty listing without a round trip.
    #[instrument(skip(self, ids, query), fields(count = ids.len()))]
    pub async fn get_by_ids_filtered(
        &self,
        ids: &[String],
        query: &ListQuery,
    ) -> Result<Listing<ConceptRecord>> {
        let has_explicit_ids = query
            .filters
            .iter()
            .any(|f| matches!(f, Filter::Ids(_)));

        let effective = if has_explicit_ids {
            query.clone()
        } else {
            query.clone().filter(Filter::Ids(ids.to_vec()))
        };

        if effective.is_vacuous() {
            return Ok(Listing::empty());
        }
        self.store
            .get_list(CONCEPTS_PATH, &effective.to_params())
            .await
    }
}

/// Batched concept lookup, the seam the narrower expansion walks through.
#[async_trait]
pub trait ConceptFetcher: Send + Sync {
    async fn fetch_by_ids(&self, ids: &[String]) -> Result<Vec<ConceptRecord>>;
}

#[async_trait]
impl ConceptFetcher for ConceptClient {
    async fn fetch_by_ids(&self, ids: &[String]) -> Result<Vec<ConceptRecord>> {
        self.get_by_ids(ids).await
    }
}
