//! Global-id node resolution.
//!
//! `node(id)` decodes the opaque id, dispatches on the embedded type name,
//! and re-classifies the fetched record, so an id minted under one concept
//! type still resolves to the record's actual type. An unknown type name is
//! graph-null; a record that cannot be classified is a server error.

use async_graphql::{Interface, ID};

use apollo_core::{GlobalId, NodeKind};
use apollo_datasource::Datasources;

use crate::errors::GatewayResultExt;
use crate::types::{
    ApolloPublication, Concept, ConceptScheme, ContentData, HrlpDocument, IApolloDocument,
    IConcept, WkbeLegislation, WkbeNews,
};

/// Anything addressable by a global id.
#[derive(Interface)]
#[graphql(field(name = "id", ty = "ID"))]
pub enum Node {
    ConceptScheme(ConceptScheme),
    Concept(Concept),
    ApolloPublication(ApolloPublication),
    HrlpDocument(HrlpDocument),
    WkbeNews(WkbeNews),
    WkbeLegislation(WkbeLegislation),
    ContentData(ContentData),
}

impl From<IConcept> for Node {
    fn from(concept: IConcept) -> Self {
        match concept {
            IConcept::Concept(c) => Self::Concept(c),
            IConcept::ApolloPublication(p) => Self::ApolloPublication(p),
        }
    }
}

impl From<IApolloDocument> for Node {
    fn from(document: IApolloDocument) -> Self {
        match document {
            IApolloDocument::HrlpDocument(d) => Self::HrlpDocument(d),
            IApolloDocument::WkbeNews(d) => Self::WkbeNews(d),
            IApolloDocument::WkbeLegislation(d) => Self::WkbeLegislation(d),
        }
    }
}

/// Resolve one global id to its node, or `None` when the id names an
/// unknown type or a missing record.
pub async fn resolve_node(
    sources: &Datasources,
    id: &ID,
) -> async_graphql::Result<Option<Node>> {
    let global_id = GlobalId::decode(id.as_str()).extend()?;
    let Some(kind) = NodeKind::parse(&global_id.type_name) else {
        return Ok(None);
    };

    let node = match kind {
        NodeKind::ConceptScheme => sources
            .schemes
            .get_by_id(&global_id.id)
            .await
            .extend()?
            .map(|record| Node::ConceptScheme(ConceptScheme::new(record))),
        NodeKind::Concept | NodeKind::ApolloPublication => sources
            .concepts
            .get_by_id(&global_id.id)
            .await
            .extend()?
            .map(|record| Node::from(IConcept::classify(record))),
        NodeKind::HrlpDocument | NodeKind::WkbeNews | NodeKind::WkbeLegislation => {
            match sources.documents.get_by_id(&global_id.id).await.extend()? {
                Some(record) => Some(Node::from(IApolloDocument::classify(record).extend()?)),
                None => None,
            }
        }
        NodeKind::ContentData => sources
            .documents
            .get_content_by_id(&global_id.id)
            .await
            .extend()?
            .map(|record| Node::ContentData(ContentData::new(record))),
    };

    Ok(node)
}

/// Resolve a batch of global ids concurrently, preserving order.
pub async fn resolve_nodes(
    sources: &Datasources,
    ids: &[ID],
) -> async_graphql::Result<Vec<Option<Node>>> {
    futures::future::try_join_all(ids.iter().map(|id| resolve_node(sources, id))).await
}
