//! Concept schemes.

use async_graphql::{Context, Object, ID};

use apollo_core::{ConceptSchemeRecord, GlobalId};

use crate::connection::{connection_args, Connection};
use crate::enums::{language_or_default, Language};
use crate::inputs::{ConceptFilter, ConceptOrderBy};
use crate::types::{related_concepts, IConcept};

/// A SKOS concept scheme: a named vocabulary with an ordered set of top
/// concepts.
pub struct ConceptScheme {
    record: ConceptSchemeRecord,
}

impl ConceptScheme {
    pub fn new(record: ConceptSchemeRecord) -> Self {
        Self { record }
    }
}

#[Object]
impl ConceptScheme {
    /// Opaque global identifier.
    pub async fn id(&self) -> ID {
        GlobalId::new("ConceptScheme", &self.record.id)
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

    async fn modified(&self) -> Option<String> {
        self.record.modified.clone()
    }

    async fn identifier(&self) -> Option<String> {
        self.record.identifier.clone()
    }

    async fn title(&self, language: Option<Language>) -> Option<String> {
        self.record
            .title(language_or_default(language))
            .map(str::to_string)
    }

    async fn definition(&self, language: Option<Language>) -> Option<String> {
        self.record
            .definition(language_or_default(language))
            .map(str::to_string)
    }

    /// The scheme's top concepts.
    #[allow(clippy::too_many_arguments)]
    async fn top_concepts(
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
            &self.record.top_concepts,
            connection_args(first, after, last, before),
            order_by,
            filters,
        )
        .await
    }
}
