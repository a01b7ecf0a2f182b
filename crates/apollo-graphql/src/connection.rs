//! Relay-style connection types over the core pagination primitives.
//!
//! One generic `Connection<T>`/`Edge<T>` pair backs every list field; the
//! `concrete` attributes pin the schema names of each instantiation. Slicing
//! itself lives in `apollo_core::connection`; this module only reshapes a
//! [`Page`] into graph objects.

use async_graphql::{OutputType, SimpleObject};

use apollo_core::connection::{ConnectionArgs, Page};

use crate::errors::GatewayResultExt;
use crate::types::{
    ApolloPublication, Concept, ConceptScheme, HrlpDocument, IApolloDocument, IConcept, WkbeNews,
    WkbeLegislation,
};

/// Slice bounds and continuation hints for a connection.
#[derive(SimpleObject, Debug, Clone)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

/// One node plus the cursor addressing its position in the full listing.
#[derive(SimpleObject)]
#[graphql(concrete(name = "ConceptSchemeEdge", params(ConceptScheme)))]
#[graphql(concrete(name = "ConceptEdge", params(Concept)))]
#[graphql(concrete(name = "IConceptEdge", params(IConcept)))]
#[graphql(concrete(name = "ApolloPublicationEdge", params(ApolloPublication)))]
#[graphql(concrete(name = "IApolloDocumentEdge", params(IApolloDocument)))]
#[graphql(concrete(name = "HRLPDocumentEdge", params(HrlpDocument)))]
#[graphql(concrete(name = "WKBENewsEdge", params(WkbeNews)))]
#[graphql(concrete(name = "WKBELegislationEdge", params(WkbeLegislation)))]
pub struct Edge<T: OutputType> {
    pub cursor: String,
    pub node: T,
}

/// A paginated window over a backend listing, with the backend-reported
/// total for the whole (unwindowed) result set.
#[derive(SimpleObject)]
#[graphql(concrete(name = "ConceptSchemeConnection", params(ConceptScheme)))]
#[graphql(concrete(name = "ConceptConnection", params(Concept)))]
#[graphql(concrete(name = "IConceptConnection", params(IConcept)))]
#[graphql(concrete(name = "ApolloPublicationConnection", params(ApolloPublication)))]
#[graphql(concrete(name = "IApolloDocumentConnection", params(IApolloDocument)))]
#[graphql(concrete(name = "HRLPDocumentConnection", params(HrlpDocument)))]
#[graphql(concrete(name = "WKBENewsConnection", params(WkbeNews)))]
#[graphql(concrete(name = "WKBELegislationConnection", params(WkbeLegislation)))]
pub struct Connection<T: OutputType>
where
    Edge<T>: OutputType,
{
    pub total_count: u64,
    pub page_info: PageInfo,
    pub edges: Vec<Edge<T>>,
}

impl<T: OutputType> Connection<T>
where
    Edge<T>: OutputType,
{
    /// Reshape a sliced page into a connection.
    pub fn from_page(page: Page<T>) -> Self {
        Self {
            total_count: page.total_count,
            page_info: PageInfo {
                has_next_page: page.page_info.has_next_page,
                has_previous_page: page.page_info.has_previous_page,
                start_cursor: page.page_info.start_cursor,
                end_cursor: page.page_info.end_cursor,
            },
            edges: page
                .edges
                .into_iter()
                .map(|edge| Edge {
                    cursor: edge.cursor,
                    node: edge.node,
                })
                .collect(),
        }
    }

    /// Slice `items` with `args` and wrap the window.
    pub fn paginate(
        items: Vec<T>,
        args: &ConnectionArgs,
        total: u64,
    ) -> async_graphql::Result<Self> {
        let page = apollo_core::paginate(items, args, total).extend()?;
        Ok(Self::from_page(page))
    }
}

/// Bundle the four relay slicing arguments.
pub fn connection_args(
    first: Option<i32>,
    after: Option<String>,
    last: Option<i32>,
    before: Option<String>,
) -> ConnectionArgs {
    ConnectionArgs {
        first,
        after,
        last,
        before,
    }
}
