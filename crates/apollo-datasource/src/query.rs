//! Query-string construction for JSON store listings.
//!
//! json-server operators in use: repeated `key=` pairs are OR-matched,
//! `key_like=` matches a regular expression against scalar fields or any
//! element of an array field, and `_start`/`_limit`/`_sort`/`_order` window
//! and order the result. The filter vocabulary is a closed enum so a new
//! filter cannot be added without deciding how it serializes.

use apollo_core::{SortOrder, DEFAULT_LIMIT, DEFAULT_OFFSET};

/// One backend filter. Multiple filters on a query are AND-combined by the
/// store; the ids inside a single [`Filter::Ids`] are OR-combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Match records by internal id.
    Ids(Vec<String>),
    /// Concepts belonging to a scheme, matched on the `inscheme` URI tail.
    ConceptSchemeId(String),
    /// Concepts carrying an object type, matched on the URI tail.
    BibliographicResourceType(String),
    /// Documents in a publication, matched exactly on the slug.
    InPublication(String),
    /// Documents classified with any of these concept ids.
    About(Vec<String>),
}

/// Sort instruction: a store field plus a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: SortOrder,
}

impl OrderBy {
    pub fn new(field: impl Into<String>, direction: SortOrder) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

/// Result window. The store treats a missing limit as "everything", so the
/// default window is always sent explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub start: u32,
    pub limit: u32,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            start: DEFAULT_OFFSET,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// A complete listing query: filters, ordering, and a window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub filters: Vec<Filter>,
    /// Sort instructions, composing left to right.
    pub order_by: Vec<OrderBy>,
    pub paging: Paging,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Append a sort instruction.
    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by.push(order_by);
        self
    }

    /// Set the result window.
    pub fn paging(mut self, start: u32, limit: u32) -> Self {
        self.paging = Paging { start, limit };
        self
    }

    /// True iff any ids filter is present but empty, meaning the query can
    /// never match and no request needs to be made.
    pub fn is_vacuous(&self) -> bool {
        self.filters.iter().any(|f| match f {
            Filter::Ids(ids) => ids.is_empty(),
            Filter::About(ids) => ids.is_empty(),
            _ => false,
        })
    }

    /// Serialize to query-string pairs.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("_limit".to_string(), self.paging.limit.to_string()),
            ("_start".to_string(), self.paging.start.to_string()),
        ];

        for filter in &self.filters {
            match filter {
                Filter::Ids(ids) => {
                    for id in ids {
                        params.push(("id".to_string(), id.clone()));
                    }
                }
                Filter::ConceptSchemeId(id) => {
                    params.push(("inscheme_like".to_string(), format!("/{}$", id)));
                }
                Filter::BibliographicResourceType(id) => {
                    params.push((
                        "bibliographicResourceType_like".to_string(),
                        format!("/{}$", id),
                    ));
                }
                Filter::InPublication(slug) => {
                    params.push(("inPublication".to_string(), slug.clone()));
                }
                Filter::About(ids) => {
                    for id in ids {
                        params.push(("about_like".to_string(), id.clone()));
                    }
                }
            }
        }

        for order_by in &self.order_by {
            params.push(("_sort".to_string(), order_by.field.clone()));
            params.push((
                "_order".to_string(),
                order_by.direction.as_query_value().to_string(),
            ));
        }

        params
    }
}
