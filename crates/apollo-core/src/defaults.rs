//! Shared constants: vocabulary URIs, publication discriminators, paging.

/// SKOS type URI marking a concept record.
pub const SKOS_CONCEPT: &str = "http://www.w3.org/2004/02/skos/core#Concept";

/// SKOS type URI marking a concept-scheme record.
pub const SKOS_CONCEPT_SCHEME: &str = "http://www.w3.org/2004/02/skos/core#ConceptScheme";

/// Object-type id distinguishing publication concepts from plain concepts.
pub const PUBLICATION_OBJECT_TYPE_ID: &str = "7c688f91-55e0-4a65-aec4-2185b30ef494";

/// Full URI form of [`PUBLICATION_OBJECT_TYPE_ID`] as stored on records.
pub const PUBLICATION_OBJECT_TYPE_URI: &str =
    "http://data.wolterskluwer.com/apollo/resource/object-type/7c688f91-55e0-4a65-aec4-2185b30ef494";

/// Publication slug for HRLP Lippincott procedure documents.
pub const HRLP_PUBLICATION: &str = "hrlp-lippincott-procedures";

/// Publication slug for WKBE news documents.
pub const WKBE_NEWS_PUBLICATION: &str = "wkbe-news";

/// Publication slug for WKBE legislation documents.
pub const WKBE_LEGISLATION_PUBLICATION: &str = "wkbe-legislation";

/// Default paging offset (`_start`) when a query omits one.
pub const DEFAULT_OFFSET: u32 = 0;

/// Default paging limit (`_limit`) when a query omits one.
pub const DEFAULT_LIMIT: u32 = 1000;

/// Maximum broader-to-leaf levels the narrower expansion will walk before
/// treating the hierarchy as cyclic.
pub const MAX_NARROWER_DEPTH: usize = 32;

/// Everything after the last `/` of a URI; backend references store full URIs
/// while lookups use the trailing id segment.
pub fn uri_tail(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}
