//! Concepts and publication concepts.
//!
//! Both types wrap the same record shape; publication concepts are the ones
//! carrying the publication object type, and surface a display title plus
//! the object-type concept on top of the shared SKOS fields.

use async_graphql::{Context, Interface, Object, ID};

use apollo_core::{ConceptRecord, GlobalId, NodeKind};
use apollo_datasource::Datasources;

use crate::connection::{connection_args, Connection};
use crate::enums::{language_or_default, Language};
use crate::errors::GatewayResultExt;
use crate::inputs::{ConceptFilter, ConceptOrderBy};
use crate::types::{related_concepts, ConceptScheme};

/// Concept-family fields shared by [`Concept`] and [`ApolloPublication`],
/// queryable without knowing which of the two a node is.
#[derive(Interface)]
#[graphql(
    name = "IConcept",
    field(name = "id", ty = "ID"),
    field(name = "created", ty = "Option<String>"),
    field(name = "creator", ty = "Option<String>"),
    field(name = "contributor", ty = "Option<String>"),
    field(name = "modified", ty = "Option<String>"),
    field(
        name = "prefLabel",
        method = "pref_label",
        ty = "Option<String>",
        arg(name = "language", ty = "Option<Language>")
    ),
    field(
        name = "altLabel",
        method = "alt_label",
        ty = "Option<String>",
        arg(name = "language", ty = "Option<Language>")
    ),
    field(
        name = "definition",
        ty = "Option<String>",
        arg(name = "language", ty = "Option<Language>")
    ),
    field(name = "notation", ty = "Option<String>"),
    field(name = "hasNarrower", method = "has_narrower", ty = "bool"),
    field(
        name = "conceptScheme",
        method = "concept_scheme",
        ty = "Option<ConceptScheme>"
    ),
    field(
        name = "broader",
        ty = "Connection<IConcept>",
        arg(name = "first", ty = "Option<i32>"),
        arg(name = "after", ty = "Option<String>"),
        arg(name = "last", ty = "Option<i32>"),
        arg(name = "before", ty = "Option<String>"),
        arg(name = "orderBy", ty = "Option<ConceptOrderBy>"),
        arg(name = "filters", ty = "Option<ConceptFilter>")
    ),
    field(
        name = "narrower",
        ty = "Connection<IConcept>",
        arg(name = "first", ty = "Option<i32>"),
        arg(name = "after", ty = "Option<String>"),
        arg(name = "last", ty = "Option<i32>"),
        arg(name = "before", ty = "Option<String>"),
        arg(name = "orderBy", ty = "Option<ConceptOrderBy>"),
        arg(name = "filters", ty = "Option<ConceptFilter>")
    )
)]
pub enum IConcept {
    Concept(Concept),
    ApolloPublication(ApolloPublication),
}

impl IConcept {
    /// Wrap a record as its concrete concept-family type.
    pub fn classify(record: ConceptRecord) -> Self {
        match NodeKind::of_concept(&record) {
            NodeKind::ApolloPublication => Self::ApolloPublication(ApolloPublication::new(record)),
            _ => Self::Concept(Concept::new(record)),
        }
    }
}

/// Fetch the owning scheme of a concept record, if it names one.
async fn owning_scheme(
    ctx: &Context<'_>,
    record: &ConceptRecord,
) -> async_graphql::Result<Option<ConceptScheme>> {
    let Some(scheme_id) = record.scheme_id() else {
        return Ok(None);
    };
    let sources = ctx.data_unchecked::<Datasources>();
    let scheme = sources.schemes.get_by_id(scheme_id).await.extend()?;
    Ok(scheme.map(ConceptScheme::new))
}

/// A plain SKOS concept.
pub struct Concept {
    record: ConceptRecord,
}

impl Concept {
    pub fn new(record: ConceptRecord) -> Self {
        Self { record }
    }
}

#[Object]
impl Concept {
    /// Opaque global identifier.
    pub async fn id(&self) -> ID {
        GlobalId::new("Concept", &self.record.id).encode().into()
    }

    /// Unique URI within Apollo.
    #[graphql(name = "_id")]
    async fn uri(&self) -> Option<String> {
        self.record.uri.clone()
    }

    async fn created(&self) -> Option<String> {
        self.record.created.clone()
    }

    async fn creator(&self) -> Option<String> {
        self.record.creator.clone()
    }

    async fn contributor(&self) -> Option<String> {
        self.record.contributor.clone()
    }

    async fn modified(&self) -> Option<String> {
        self.record.modified.clone()
    }

    async fn pref_label(&self, language: Option<Language>) -> Option<String> {
        self.record
            .pref_label(language_or_default(language))
            .map(str::to_string)
    }

    async fn alt_label(&self, language: Option<Language>) -> Option<String> {
        self.record
            .alt_label(language_or_default(language))
            .map(str::to_string)
    }

    async fn definition(&self, language: Option<Language>) -> Option<String> {
        self.record
            .definition(language_or_default(language))
            .map(str::to_string)
    }

    async fn notation(&self) -> Option<String> {
        self.record.notation.clone()
    }

    async fn has_narrower(&self) -> bool {
        self.record.has_narrower()
    }

    /// The scheme this concept belongs to.
    async fn concept_scheme(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<ConceptScheme>> {
        owning_scheme(ctx, &self.record).await
    }

    /// Broader concepts, one hierarchy level up.
    #[allow(clippy::too_many_arguments)]
    async fn broader(
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
            &self.record.broader,
            connection_args(first, after, last, before),
            order_by,
            filters,
        )
        .await
    }

    /// Narrower concepts, one hierarchy level down.
    #[allow(clippy::too_many_arguments)]
    async fn narrower(
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
            &self.record.narrower,
            connection_args(first, after, last, before),
            order_by,
            filters,
        )
        .await
    }
}

/// A concept carrying the publication object type; publications group the
/// typed documents.
pub struct ApolloPublication {
    record: ConceptRecord,
}

impl ApolloPublication {
    pub fn new(record: ConceptRecord) -> Self {
        Self { record }
    }

    /// The publication slug, used as the document discriminator.
    pub fn slug(&self) -> &str {
        &self.record.id
    }
}

#[Object]
impl ApolloPublication {
    /// Opaque global identifier.
    pub async fn id(&self) -> ID {
        GlobalId::new("ApolloPublication", &self.record.id)
            .encode()
            .into()
    }

    /// Unique URI within Apollo.
    #[graphql(name = "_id")]
    async fn uri(&self) -> Option<String> {
        self.record.uri.clone()
    }

    async fn created(&self) -> Option<String> {
        self.record.created.clone()
    }

    async fn creator(&self) -> Option<String> {
        self.record.creator.clone()
    }

    async fn contributor(&self) -> Option<String> {
        self.record.contributor.clone()
    }

    async fn modified(&self) -> Option<String> {
        self.record.modified.clone()
    }

    /// Display title of the publication.
    async fn title(&self, language: Option<Language>) -> Option<String> {
        self.record
            .title(language_or_default(language))
            .map(str::to_string)
    }

    async fn pref_label(&self, language: Option<Language>) -> Option<String> {
        self.record
            .pref_label(language_or_default(language))
            .map(str::to_string)
    }

    async fn alt_label(&self, language: Option<Language>) -> Option<String> {
        self.record
            .alt_label(language_or_default(language))
            .map(str::to_string)
    }

    async fn definition(&self, language: Option<Language>) -> Option<String> {
        self.record
            .definition(language_or_default(language))
            .map(str::to_string)
    }

    async fn notation(&self) -> Option<String> {
        self.record.notation.clone()
    }

    async fn has_narrower(&self) -> bool {
        self.record.has_narrower()
    }

    /// The object-type concept behind `bibliographicResourceType`.
    async fn bibliographic_resource_type(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Option<Concept>> {
        let Some(type_id) = self.record.bibliographic_resource_type_id() else {
            return Ok(None);
        };
        let sources = ctx.data_unchecked::<Datasources>();
        let concept = sources.concepts.get_by_id(type_id).await.extend()?;
        Ok(concept.map(Concept::new))
    }

    /// The scheme this publication concept belongs to.
    async fn concept_scheme(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<ConceptScheme>> {
        owning_scheme(ctx, &self.record).await
    }

    /// Broader concepts, one hierarchy level up.
    #[allow(clippy::too_many_arguments)]
    async fn broader(
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
            &self.record.broader,
            connection_args(first, after, last, before),
            order_by,
            filters,
        )
        .await
    }

    /// Narrower concepts, one hierarchy level down.
    #[allow(clippy::too_many_arguments)]
    async fn narrower(
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
            &self.record.narrower,
            connection_args(first, after, last, before),
            order_by,
            filters,
        )
        .await
    }
}
