//! Mapping gateway errors onto GraphQL error extensions.
//!
//! Every error carries a stable `code` extension; the leaf-constraint
//! violation additionally lists the offending concept ids so clients can
//! highlight them without parsing the message.

use async_graphql::ErrorExtensions;

use apollo_core::Error;

/// Convert a gateway error into a GraphQL error with extensions.
pub fn graphql_error(err: Error) -> async_graphql::Error {
    (&err).extend_with(|_, ext| {
        ext.set("code", err.code());
        if let Error::NonLeafConcepts(ids) = &err {
            let ids = ids
                .iter()
                .map(|id| async_graphql::Value::String(id.clone()))
                .collect();
            ext.set("concepts", async_graphql::Value::List(ids));
        }
    })
}

/// Shorthand for propagating gateway errors out of resolvers.
pub trait GatewayResultExt<T> {
    fn extend(self) -> async_graphql::Result<T>;
}

impl<T> GatewayResultExt<T> for apollo_core::Result<T> {
    fn extend(self) -> async_graphql::Result<T> {
        self.map_err(graphql_error)
    }
}
