//! Classification mutations.
//!
//! Both mutations are all-or-nothing read-modify-writes: every validation
//! runs against freshly fetched records before a single PUT replaces the
//! document. There is no optimistic-concurrency check; concurrent writers
//! on the same document can clobber each other.

use std::collections::HashSet;

use async_graphql::{Context, Object, ID};
use tracing::info;

use apollo_core::{ApolloDocumentRecord, Error, GlobalId, NodeKind};
use apollo_datasource::Datasources;

use crate::errors::GatewayResultExt;
use crate::inputs::{decode_id, decode_ids};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Classify a document with additional leaf concepts.
    ///
    /// Idempotent: concepts already present stay where they are. Fails
    /// before writing when any named concept is missing or still has
    /// narrower terms.
    #[graphql(name = "addConceptToHRLPDocument")]
    async fn add_concept_to_hrlp_document(
        &self,
        ctx: &Context<'_>,
        id: ID,
        concept_ids: Vec<ID>,
    ) -> async_graphql::Result<ID> {
        let sources = ctx.data_unchecked::<Datasources>();
        let document_id = decode_id(&id).extend()?;
        let added = decode_ids(&concept_ids).extend()?;

        let concepts = sources.concepts.get_by_ids(&added).await.extend()?;

        let found: HashSet<&str> = concepts.iter().map(|c| c.id.as_str()).collect();
        let missing: Vec<&str> = added
            .iter()
            .map(String::as_str)
            .filter(|id| !found.contains(id))
            .collect();
        if !missing.is_empty() {
            return Err(graphql_missing_concepts(&missing));
        }

        let non_leaf: Vec<String> = concepts
            .iter()
            .filter(|concept| !concept.is_leaf())
            .map(|concept| GlobalId::new("Concept", &concept.id).encode())
            .collect();
        if !non_leaf.is_empty() {
            return Err(Error::NonLeafConcepts(non_leaf)).extend();
        }

        let (mut document, kind) = fetch_document(sources, &document_id).await?;
        let mut seen: HashSet<String> = document.about.iter().cloned().collect();
        document
            .about
            .extend(added.into_iter().filter(|id| seen.insert(id.clone())));

        let updated = sources.documents.update(&document).await.extend()?;
        info!(id = %updated.id, about = updated.about.len(), "Classification added");
        Ok(GlobalId::new(kind.as_str(), &updated.id).encode().into())
    }

    /// Remove concepts from a document's classification.
    ///
    /// Fails before writing when the removal would leave the document
    /// without any classification.
    #[graphql(name = "removeConceptFromHRLPDocument")]
    async fn remove_concept_from_hrlp_document(
        &self,
        ctx: &Context<'_>,
        id: ID,
        concept_ids: Vec<ID>,
    ) -> async_graphql::Result<ID> {
        let sources = ctx.data_unchecked::<Datasources>();
        let document_id = decode_id(&id).extend()?;
        let removed: HashSet<String> = decode_ids(&concept_ids).extend()?.into_iter().collect();

        let (mut document, kind) = fetch_document(sources, &document_id).await?;
        let remaining: Vec<String> = document
            .about
            .iter()
            .filter(|id| !removed.contains(*id))
            .cloned()
            .collect();
        if remaining.is_empty() {
            return Err(Error::MinimumClassification(document.id.clone())).extend();
        }
        document.about = remaining;

        let updated = sources.documents.update(&document).await.extend()?;
        info!(id = %updated.id, about = updated.about.len(), "Classification removed");
        Ok(GlobalId::new(kind.as_str(), &updated.id).encode().into())
    }
}

/// Fetch the document to mutate and classify it up front, so an
/// unclassifiable record aborts before any write.
async fn fetch_document(
    sources: &Datasources,
    document_id: &str,
) -> async_graphql::Result<(ApolloDocumentRecord, NodeKind)> {
    let document = sources
        .documents
        .get_by_id(document_id)
        .await
        .extend()?
        .ok_or_else(|| Error::NotFound(format!("document {}", document_id)))
        .extend()?;
    let kind = NodeKind::of_document(&document).extend()?;
    Ok((document, kind))
}

fn graphql_missing_concepts(missing: &[&str]) -> async_graphql::Error {
    crate::errors::graphql_error(Error::NotFound(format!(
        "concepts: {}",
        missing.join(", ")
    )))
}
