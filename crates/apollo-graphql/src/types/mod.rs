//! Graph object types wrapping backend records.
//!
//! Each wrapper owns its record and resolves relations lazily through the
//! [`Datasources`] aggregate in the schema context. Classification into the
//! concrete graph type happens once, when a record is wrapped, via the core
//! node discriminator.

mod concept;
mod content;
mod document;
mod scheme;

pub use concept::{ApolloPublication, Concept, IConcept};
pub use content::{BibliographicReference, ContentData};
pub use document::{HrlpDocument, IApolloDocument, WkbeLegislation, WkbeNews};
pub use scheme::ConceptScheme;

use async_graphql::Context;

use apollo_core::connection::ConnectionArgs;
use apollo_datasource::{Datasources, ListQuery};

use crate::connection::Connection;
use crate::errors::GatewayResultExt;
use crate::inputs::{ConceptFilter, ConceptOrderBy};

/// Resolve a relation id array into a concept connection.
///
/// One batched fetch covers the whole array; field-level filters and
/// ordering ride along on the same request. An empty array never reaches
/// the backend.
pub(crate) async fn related_concepts(
    ctx: &Context<'_>,
    ids: &[String],
    args: ConnectionArgs,
    order_by: Option<ConceptOrderBy>,
    filters: Option<ConceptFilter>,
) -> async_graphql::Result<Connection<IConcept>> {
    let sources = ctx.data_unchecked::<Datasources>();

    let mut query = ListQuery::new();
    if let Some(filters) = &filters {
        for filter in filters.to_filters().extend()? {
            query = query.filter(filter);
        }
    }
    if let Some(order_by) = &order_by {
        for order in order_by.to_order() {
            query = query.order_by(order);
        }
    }

    let listing = sources
        .concepts
        .get_by_ids_filtered(ids, &query)
        .await
        .extend()?;
    let nodes: Vec<IConcept> = listing.items.into_iter().map(IConcept::classify).collect();
    Connection::paginate(nodes, &args, listing.total)
}
