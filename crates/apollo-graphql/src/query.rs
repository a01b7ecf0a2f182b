//! Query root.
//!
//! Every listing resolver follows the same shape: translate the public
//! arguments into a [`ListQuery`], let the backend filter and window, then
//! slice the returned page with the relay arguments and thread the
//! backend-reported total through to `totalCount`.

use std::collections::HashMap;

use async_graphql::{Context, Object, ID};

use apollo_core::{
    uri_tail, Error, GlobalId, SortOrder, HRLP_PUBLICATION, PUBLICATION_OBJECT_TYPE_ID,
    WKBE_LEGISLATION_PUBLICATION, WKBE_NEWS_PUBLICATION,
};
use apollo_datasource::{narrower_closure, Datasources, Filter, ListQuery, OrderBy};

use crate::connection::{connection_args, Connection};
use crate::errors::GatewayResultExt;
use crate::inputs::{
    decode_ids, ApolloDocumentFilter, ApolloDocumentOrderBy, ConceptFilter, ConceptOrderBy,
    ConceptSchemeFilter, ConceptSchemeOrderBy, SearchConceptFilter, SearchConceptOrderBy,
};
use crate::node::{resolve_node, resolve_nodes, Node};
use crate::types::{
    ApolloPublication, ConceptScheme, HrlpDocument, IApolloDocument, IConcept, WkbeLegislation,
    WkbeNews,
};

/// Resolve the `id`/`_id` argument pair to an internal id.
///
/// Exactly one of the two must be present: `id` is the opaque global form,
/// `_id` is the raw backend URI escape hatch (its trailing segment is the
/// internal id).
fn lookup_id(id: Option<ID>, raw_id: Option<String>) -> apollo_core::Result<String> {
    match (id, raw_id) {
        (Some(id), None) => Ok(GlobalId::decode(id.as_str())?.id),
        (None, Some(uri)) => Ok(uri_tail(&uri).to_string()),
        _ => Err(Error::InvalidInput(
            "provide exactly one of 'id' and '_id'".to_string(),
        )),
    }
}

fn with_order(mut query: ListQuery, order: Vec<OrderBy>) -> ListQuery {
    for order_by in order {
        query = query.order_by(order_by);
    }
    query
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All concept schemes.
    #[allow(clippy::too_many_arguments)]
    async fn concept_schemes(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
        order_by: Option<ConceptSchemeOrderBy>,
        filters: Option<ConceptSchemeFilter>,
    ) -> async_graphql::Result<Connection<ConceptScheme>> {
        let sources = ctx.data_unchecked::<Datasources>();

        let mut query = ListQuery::new();
        if let Some(filters) = &filters {
            for filter in filters.to_filters().extend()? {
                query = query.filter(filter);
            }
        }
        query = with_order(query, order_by.map(|o| o.to_order()).unwrap_or_default());

        let listing = sources.schemes.list(&query).await.extend()?;
        let nodes: Vec<ConceptScheme> =
            listing.items.into_iter().map(ConceptScheme::new).collect();
        Connection::paginate(
            nodes,
            &connection_args(first, after, last, before),
            listing.total,
        )
    }

    /// One concept scheme, by global id or raw URI.
    async fn concept_scheme(
        &self,
        ctx: &Context<'_>,
        id: Option<ID>,
        #[graphql(name = "_id")] raw_id: Option<String>,
    ) -> async_graphql::Result<Option<ConceptScheme>> {
        let sources = ctx.data_unchecked::<Datasources>();
        let internal_id = lookup_id(id, raw_id).extend()?;
        let scheme = sources.schemes.get_by_id(&internal_id).await.extend()?;
        Ok(scheme.map(ConceptScheme::new))
    }

    /// All concepts, optionally narrowed to one scheme.
    #[allow(clippy::too_many_arguments)]
    async fn concepts(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
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
        query = with_order(query, order_by.map(|o| o.to_order()).unwrap_or_default());

        let listing = sources.concepts.list(&query).await.extend()?;
        let nodes: Vec<IConcept> = listing.items.into_iter().map(IConcept::classify).collect();
        Connection::paginate(
            nodes,
            &connection_args(first, after, last, before),
            listing.total,
        )
    }

    /// One concept, by global id or raw URI.
    async fn concept(
        &self,
        ctx: &Context<'_>,
        id: Option<ID>,
        #[graphql(name = "_id")] raw_id: Option<String>,
    ) -> async_graphql::Result<Option<IConcept>> {
        let sources = ctx.data_unchecked::<Datasources>();
        let internal_id = lookup_id(id, raw_id).extend()?;
        let concept = sources.concepts.get_by_id(&internal_id).await.extend()?;
        Ok(concept.map(IConcept::classify))
    }

    /// Label search over the triple store.
    ///
    /// Matching ids hydrate through one batched JSON-store fetch, keeping
    /// the search order; `totalCount` comes from the search's COUNT
    /// companion.
    #[allow(clippy::too_many_arguments)]
    async fn search_concepts(
        &self,
        ctx: &Context<'_>,
        filters: SearchConceptFilter,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
        order_by: Option<SearchConceptOrderBy>,
    ) -> async_graphql::Result<Connection<IConcept>> {
        let sources = ctx.data_unchecked::<Datasources>();

        let direction = order_by
            .and_then(|o| o.direction())
            .unwrap_or(SortOrder::Asc);
        let search = filters.to_search(
            direction,
            apollo_core::DEFAULT_LIMIT,
            apollo_core::DEFAULT_OFFSET,
        );
        let found = sources.search.search_concepts(&search).await.extend()?;

        let records = sources.concepts.get_by_ids(&found.items).await.extend()?;
        let mut by_id: HashMap<String, _> = records
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        let nodes: Vec<IConcept> = found
            .items
            .iter()
            .filter_map(|id| by_id.remove(id))
            .map(IConcept::classify)
            .collect();

        Connection::paginate(
            nodes,
            &connection_args(first, after, last, before),
            found.total,
        )
    }

    /// The publication concepts grouping the typed documents.
    async fn publications(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> async_graphql::Result<Connection<ApolloPublication>> {
        let sources = ctx.data_unchecked::<Datasources>();

        let query = ListQuery::new().filter(Filter::BibliographicResourceType(
            PUBLICATION_OBJECT_TYPE_ID.to_string(),
        ));
        let listing = sources.concepts.list(&query).await.extend()?;
        let nodes: Vec<ApolloPublication> = listing
            .items
            .into_iter()
            .map(ApolloPublication::new)
            .collect();
        Connection::paginate(
            nodes,
            &connection_args(first, after, last, before),
            listing.total,
        )
    }

    /// HRLP procedure documents.
    #[allow(clippy::too_many_arguments)]
    async fn hrlp_documents(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
        order_by: Option<ApolloDocumentOrderBy>,
    ) -> async_graphql::Result<Connection<HrlpDocument>> {
        let sources = ctx.data_unchecked::<Datasources>();
        let listing = sources
            .documents
            .list(&publication_query(HRLP_PUBLICATION, order_by))
            .await
            .extend()?;
        let nodes: Vec<HrlpDocument> = listing.items.into_iter().map(HrlpDocument::new).collect();
        Connection::paginate(
            nodes,
            &connection_args(first, after, last, before),
            listing.total,
        )
    }

    /// WKBE news documents.
    #[allow(clippy::too_many_arguments)]
    async fn wkbe_news_documents(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
        order_by: Option<ApolloDocumentOrderBy>,
    ) -> async_graphql::Result<Connection<WkbeNews>> {
        let sources = ctx.data_unchecked::<Datasources>();
        let listing = sources
            .documents
            .list(&publication_query(WKBE_NEWS_PUBLICATION, order_by))
            .await
            .extend()?;
        let nodes: Vec<WkbeNews> = listing.items.into_iter().map(WkbeNews::new).collect();
        Connection::paginate(
            nodes,
            &connection_args(first, after, last, before),
            listing.total,
        )
    }

    /// WKBE legislation documents.
    #[allow(clippy::too_many_arguments)]
    async fn wkbe_legislation_documents(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
        order_by: Option<ApolloDocumentOrderBy>,
    ) -> async_graphql::Result<Connection<WkbeLegislation>> {
        let sources = ctx.data_unchecked::<Datasources>();
        let listing = sources
            .documents
            .list(&publication_query(WKBE_LEGISLATION_PUBLICATION, order_by))
            .await
            .extend()?;
        let nodes: Vec<WkbeLegislation> = listing
            .items
            .into_iter()
            .map(WkbeLegislation::new)
            .collect();
        Connection::paginate(
            nodes,
            &connection_args(first, after, last, before),
            listing.total,
        )
    }

    /// One document of any variant, by global id or raw URI.
    async fn apollo_document(
        &self,
        ctx: &Context<'_>,
        id: Option<ID>,
        #[graphql(name = "_id")] raw_id: Option<String>,
    ) -> async_graphql::Result<Option<IApolloDocument>> {
        let sources = ctx.data_unchecked::<Datasources>();
        let internal_id = lookup_id(id, raw_id).extend()?;
        match sources.documents.get_by_id(&internal_id).await.extend()? {
            Some(record) => Ok(Some(IApolloDocument::classify(record).extend()?)),
            None => Ok(None),
        }
    }

    /// Documents across all variants, filtered by id or classification.
    ///
    /// Classification ids expand through the narrower closure first, so a
    /// broad concept matches documents classified under any of its leaf
    /// descendants.
    #[allow(clippy::too_many_arguments)]
    async fn search_documents(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
        order_by: Option<ApolloDocumentOrderBy>,
        filters: Option<ApolloDocumentFilter>,
    ) -> async_graphql::Result<Connection<IApolloDocument>> {
        let sources = ctx.data_unchecked::<Datasources>();

        let mut query = ListQuery::new();
        if let Some(filters) = &filters {
            if let Some(ids) = &filters.ids {
                query = query.filter(Filter::Ids(decode_ids(ids).extend()?));
            }
            if let Some(about_ids) = &filters.about_ids {
                let roots = decode_ids(about_ids).extend()?;
                let leaves = narrower_closure(&sources.concepts, &roots)
                    .await
                    .extend()?;
                query = query.filter(Filter::About(leaves));
            }
        }
        query = with_order(query, order_by.map(|o| o.to_order()).unwrap_or_default());

        let listing = sources.documents.list(&query).await.extend()?;
        let nodes: Vec<IApolloDocument> = listing
            .items
            .into_iter()
            .map(|record| IApolloDocument::classify(record).extend())
            .collect::<async_graphql::Result<_>>()?;
        Connection::paginate(
            nodes,
            &connection_args(first, after, last, before),
            listing.total,
        )
    }

    /// Resolve any global id to its node.
    async fn node(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<Node>> {
        resolve_node(ctx.data_unchecked::<Datasources>(), &id).await
    }

    /// Resolve a batch of global ids, preserving order.
    async fn nodes(
        &self,
        ctx: &Context<'_>,
        ids: Vec<ID>,
    ) -> async_graphql::Result<Vec<Option<Node>>> {
        resolve_nodes(ctx.data_unchecked::<Datasources>(), &ids).await
    }
}

fn publication_query(slug: &str, order_by: Option<ApolloDocumentOrderBy>) -> ListQuery {
    with_order(
        ListQuery::new().filter(Filter::InPublication(slug.to_string())),
        order_by.map(|o| o.to_order()).unwrap_or_default(),
    )
}
