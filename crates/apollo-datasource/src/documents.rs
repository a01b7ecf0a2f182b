//! Document, content, and reference access against the JSON store.

use tracing::{info, instrument};

use apollo_core::{ApolloDocumentRecord, BibliographicReferenceRecord, ContentRecord, Result};

use crate::query::ListQuery;
use crate::transport::{JsonStore, Listing};

const DOCUMENTS_PATH: &str = "/apollodocuments";
const CONTENT_PATH: &str = "/content";
const REFERENCES_PATH: &str = "/bibliographicreferences";

/// Access to typed documents and their attached records.
///
/// All document variants share one collection; callers narrow by publication
/// with an `InPublication` filter.
#[derive(Debug, Clone)]
pub struct DocumentClient {
    store: JsonStore,
}

impl DocumentClient {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Fetch one document by internal id.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Option<ApolloDocumentRecord>> {
        self.store
            .get_one(&format!("{}/{}", DOCUMENTS_PATH, id))
            .await
    }

    /// List documents matching a query.
    #[instrument(skip(self, query))]
    pub async fn list(&self, query: &ListQuery) -> Result<Listing<ApolloDocumentRecord>> {
        if query.is_vacuous() {
            return Ok(Listing::empty());
        }
        self.store
            .get_list(DOCUMENTS_PATH, &query.to_params())
            .await
    }

    /// Replace a stored document with `record`.
    ///
    /// The store has no partial update, so the record must carry every field
    /// to keep, including the fields this layer does not model.
    #[instrument(skip(self, record), fields(id = %record.id))]
    pub async fn update(&self, record: &ApolloDocumentRecord) -> Result<ApolloDocumentRecord> {
        info!(
            id = %record.id,
            about = record.about.len(),
            "Updating document"
        );
        self.store
            .put(&format!("{}/{}", DOCUMENTS_PATH, record.id), record)
            .await
    }

    /// Fetch a content record by internal id.
    #[instrument(skip(self))]
    pub async fn get_content_by_id(&self, id: &str) -> Result<Option<ContentRecord>> {
        self.store.get_one(&format!("{}/{}", CONTENT_PATH, id)).await
    }

    /// Fetch a bibliographic reference by internal id.
    #[instrument(skip(self))]
    pub async fn get_bibliographic_reference_by_id(
        &self,
        id: &str,
    ) -> Result<Option<BibliographicReferenceRecord>> {
        self.store
            .get_one(&format!("{}/{}", REFERENCES_PATH, id))
            .await
    }
}
