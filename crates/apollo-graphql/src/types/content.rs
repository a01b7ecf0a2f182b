//! Content payloads and bibliographic references.

use async_graphql::{Context, Object, ID};

use apollo_core::{BibliographicReferenceRecord, ContentRecord, GlobalId};
use apollo_datasource::Datasources;

use crate::enums::{language_or_default, Language};
use crate::errors::GatewayResultExt;
use crate::types::Concept;

/// Stored content attached to an HRLP document, exposed in several
/// renditions of the same payload.
pub struct ContentData {
    record: ContentRecord,
}

impl ContentData {
    pub fn new(record: ContentRecord) -> Self {
        Self { record }
    }
}

#[Object]
impl ContentData {
    /// Opaque global identifier.
    pub async fn id(&self) -> ID {
        GlobalId::new("ContentData", &self.record.id).encode().into()
    }

    /// Unique URI within Apollo.
    #[graphql(name = "_id")]
    async fn uri(&self) -> Option<String> {
        self.record.uri.clone()
    }

    async fn identifier(&self) -> Option<String> {
        self.record.identifier.clone()
    }

    /// The content-type concept (creation, change, ...).
    #[graphql(name = "type")]
    async fn content_kind(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Concept>> {
        let Some(type_id) = self.record.type_id.as_deref() else {
            return Ok(None);
        };
        let sources = ctx.data_unchecked::<Datasources>();
        let concept = sources.concepts.get_by_id(type_id).await.extend()?;
        Ok(concept.map(Concept::new))
    }

    async fn title(&self, language: Option<Language>) -> Option<String> {
        self.record
            .title(language_or_default(language))
            .map(str::to_string)
    }

    /// The payload as stored.
    async fn as_string(&self) -> Option<String> {
        self.record.content.clone()
    }

    /// The payload, base64-encoded.
    async fn as_base64(&self) -> Option<String> {
        self.record.as_base64()
    }

    /// The payload as a `data:` URL.
    async fn as_data_url(&self) -> Option<String> {
        self.record.as_data_url()
    }

    async fn download_url(&self) -> Option<String> {
        self.record.download_url.clone()
    }

    async fn size(&self) -> Option<u64> {
        self.record.byte_size()
    }
}

/// Citation record attached to legislation documents.
pub struct BibliographicReference {
    record: BibliographicReferenceRecord,
}

impl BibliographicReference {
    pub fn new(record: BibliographicReferenceRecord) -> Self {
        Self { record }
    }
}

#[Object]
impl BibliographicReference {
    /// Opaque global identifier.
    async fn id(&self) -> ID {
        GlobalId::new("BibliographicReference", &self.record.id)
            .encode()
            .into()
    }

    /// Unique URI within Apollo.
    #[graphql(name = "_id")]
    async fn uri(&self) -> Option<String> {
        self.record.uri.clone()
    }

    async fn identifier(&self) -> Option<String> {
        self.record.identifier.clone()
    }

    async fn citation(&self) -> Option<String> {
        self.record.citation.clone()
    }

    async fn title(&self, language: Option<Language>) -> Option<String> {
        self.record
            .title(language_or_default(language))
            .map(str::to_string)
    }

    async fn issued(&self) -> Option<String> {
        self.record.issued.clone()
    }
}
