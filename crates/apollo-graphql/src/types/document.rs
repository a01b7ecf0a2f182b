//! Typed documents.
//!
//! One record shape backs three graph types; [`IApolloDocument::classify`]
//! dispatches on the `inPublication` slug and refuses records it cannot
//! place. The shared field surface is stamped out per variant by
//! `document_object!`.

use async_graphql::{Context, Interface, Object, ID};

use apollo_core::{ApolloDocumentRecord, GlobalId, NodeKind};
use apollo_datasource::Datasources;

use crate::connection::{connection_args, Connection};
use crate::enums::{language_or_default, Language};
use crate::errors::GatewayResultExt;
use crate::inputs::{ConceptFilter, ConceptOrderBy};
use crate::types::{
    related_concepts, ApolloPublication, BibliographicReference, ContentData, IConcept,
};

/// Document fields shared by all three publication variants.
#[derive(Interface)]
#[graphql(
    name = "IApolloDocument",
    field(name = "id", ty = "ID"),
    field(name = "identifier", ty = "Option<String>"),
    field(
        name = "title",
        ty = "Option<String>",
        arg(name = "language", ty = "Option<Language>")
    ),
    field(
        name = "inPublication",
        method = "in_publication",
        ty = "Option<ApolloPublication>"
    ),
    field(
        name = "about",
        ty = "Connection<IConcept>",
        arg(name = "first", ty = "Option<i32>"),
        arg(name = "after", ty = "Option<String>"),
        arg(name = "last", ty = "Option<i32>"),
        arg(name = "before", ty = "Option<String>"),
        arg(name = "orderBy", ty = "Option<ConceptOrderBy>"),
        arg(name = "filters", ty = "Option<ConceptFilter>")
    )
)]
pub enum IApolloDocument {
    HrlpDocument(HrlpDocument),
    WkbeNews(WkbeNews),
    WkbeLegislation(WkbeLegislation),
}

impl IApolloDocument {
    /// Wrap a record as its concrete document type.
    pub fn classify(record: ApolloDocumentRecord) -> apollo_core::Result<Self> {
        Ok(match NodeKind::of_document(&record)? {
            NodeKind::WkbeNews => Self::WkbeNews(WkbeNews::new(record)),
            NodeKind::WkbeLegislation => Self::WkbeLegislation(WkbeLegislation::new(record)),
            _ => Self::HrlpDocument(HrlpDocument::new(record)),
        })
    }
}

/// Fetch the publication concept a document belongs to.
async fn publication_of(
    ctx: &Context<'_>,
    record: &ApolloDocumentRecord,
) -> async_graphql::Result<Option<ApolloPublication>> {
    let Some(slug) = record.in_publication.as_deref() else {
        return Ok(None);
    };
    let sources = ctx.data_unchecked::<Datasources>();
    let concept = sources.concepts.get_by_id(slug).await.extend()?;
    Ok(concept.map(ApolloPublication::new))
}

/// Generate a document's `#[Object]` impl: the shared variant fields plus
/// any variant-specific resolvers passed in the trailing block.
macro_rules! document_object {
    ($rust_type:ident, $graphql_name:literal $(, { $($extra:tt)* })?) => {
        #[Object(name = $graphql_name)]
        impl $rust_type {
            /// Opaque global identifier.
            pub async fn id(&self) -> ID {
                GlobalId::new($graphql_name, &self.record.id).encode().into()
            }

            /// Unique URI within Apollo.
            #[graphql(name = "_id")]
            async fn uri(&self) -> Option<String> {
                self.record.uri.clone()
            }

            async fn identifier(&self) -> Option<String> {
                self.record.identifier.clone()
            }

            async fn title(&self, language: Option<Language>) -> Option<String> {
                self.record
                    .title(language_or_default(language))
                    .map(str::to_string)
            }

            async fn created(&self) -> Option<String> {
                self.record.created.clone()
            }

            async fn modified(&self) -> Option<String> {
                self.record.modified.clone()
            }

            /// The publication this document appears in.
            async fn in_publication(
                &self,
                ctx: &Context<'_>,
            ) -> async_graphql::Result<Option<ApolloPublication>> {
                publication_of(ctx, &self.record).await
            }

            /// The leaf concepts classifying this document.
            #[allow(clippy::too_many_arguments)]
            async fn about(
                &self,
                ctx: &Context<'_>,
                first: Option<i32>,
                after: Option<String>,
                last: Option<i32>,
                before: Option<String>,
                order_by: Option<ConceptOrderBy>,
                filters: Option<ConceptFilter>,
            ) -> async_graphql::Result<Connection<IConcept>> {
                related_concepts(
                    ctx,
                    &self.record.about,
                    connection_args(first, after, last, before),
                    order_by,
                    filters,
                )
                .await
            }

            $($($extra)*)?
        }
    };
}

/// A Lippincott procedure document with attached content.
pub struct HrlpDocument {
    record: ApolloDocumentRecord,
}

impl HrlpDocument {
    pub fn new(record: ApolloDocumentRecord) -> Self {
        Self { record }
    }
}

document_object!(HrlpDocument, "HRLPDocument", {
    /// The document's content payload.
    async fn content(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<ContentData>> {
        let Some(content_id) = self.record.content.as_deref() else {
            return Ok(None);
        };
        let sources = ctx.data_unchecked::<Datasources>();
        let content = sources
            .documents
            .get_content_by_id(content_id)
            .await
            .extend()?;
        Ok(content.map(ContentData::new))
    }
});

/// A WKBE news item.
pub struct WkbeNews {
    record: ApolloDocumentRecord,
}

impl WkbeNews {
    pub fn new(record: ApolloDocumentRecord) -> Self {
        Self { record }
    }
}

document_object!(WkbeNews, "WKBENews");

/// A WKBE legislation document with its bibliographic reference.
pub struct WkbeLegislation {
    record: ApolloDocumentRecord,
}

impl WkbeLegislation {
    pub fn new(record: ApolloDocumentRecord) -> Self {
        Self { record }
    }
}

document_object!(WkbeLegislation, "WKBELegislation", {
    /// Enactment date.
    async fn issued(&self) -> Option<String> {
        self.record.issued.clone()
    }

    /// Official-journal publication date.
    async fn publication_date(&self) -> Option<String> {
        self.record.publication_date.clone()
    }

    /// The attached citation record.
    async fn bibliographic_reference(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Option<BibliographicReference>> {
        let Some(reference_id) = self.record.bibliographic_reference.as_deref() else {
            return Ok(None);
        };
        let sources = ctx.data_unchecked::<Datasources>();
        let reference = sources
            .documents
            .get_bibliographic_reference_by_id(reference_id)
            .await
            .extend()?;
        Ok(reference.map(BibliographicReference::new))
    }
});
