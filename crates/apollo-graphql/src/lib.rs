//! # apollo-graphql
//!
//! GraphQL schema and HTTP handlers for the Apollo taxonomy gateway.
//!
//! The schema is a read-through façade: query resolvers translate graph
//! arguments into backend queries, and the only mutation surface is a
//! document's classification set. The [`Datasources`] aggregate rides in
//! the schema context; resolvers hold no state of their own.

pub mod connection;
pub mod enums;
pub mod errors;
pub mod inputs;
pub mod mutation;
pub mod node;
pub mod query;
pub mod types;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

use async_graphql::{EmptySubscription, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::response::{Html, IntoResponse};

use apollo_datasource::Datasources;

/// The gateway's executable schema.
pub type ApolloSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema over a set of backend clients.
pub fn build_schema(sources: Datasources) -> ApolloSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(sources)
        .finish()
}

/// GraphQL query/mutation handler.
pub async fn graphql_handler(
    State(schema): State<ApolloSchema>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

/// Interactive playground, served on GET.
pub async fn graphql_playground() -> impl IntoResponse {
    Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}
