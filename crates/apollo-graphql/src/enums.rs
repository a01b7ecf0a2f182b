//! Graph-side enums, mirroring the core enums one-to-one.
//!
//! The schema names (`LANGUAGE`, `SORT`, `CONCEPT_TYPE`) follow the backend
//! vocabulary rather than GraphQL naming conventions; the `remote` attribute
//! generates the conversions to and from the core types.

use async_graphql::Enum;

/// Languages carried by the taxonomy backend.
#[derive(Enum, Debug, Copy, Clone, Eq, PartialEq)]
#[graphql(name = "LANGUAGE", remote = "apollo_core::Language")]
pub enum Language {
    Nl,
    Fr,
    En,
    De,
}

/// Sort direction for orderBy arguments.
#[derive(Enum, Debug, Copy, Clone, Eq, PartialEq)]
#[graphql(name = "SORT", remote = "apollo_core::SortOrder")]
pub enum Sort {
    Asc,
    Desc,
}

/// Which part of the hierarchy a concept search targets.
#[derive(Enum, Debug, Copy, Clone, Eq, PartialEq)]
#[graphql(name = "CONCEPT_TYPE", remote = "apollo_core::ConceptKind")]
pub enum ConceptType {
    /// Concepts with no narrower terms.
    OnlyLeaf,
    /// Concepts with no broader terms.
    OnlyTop,
    /// The whole hierarchy.
    All,
}

/// The language a field resolver falls back to when its `language` argument
/// is omitted.
pub fn language_or_default(language: Option<Language>) -> apollo_core::Language {
    language
        .map(apollo_core::Language::from)
        .unwrap_or(apollo_core::DEFAULT_LANGUAGE)
}
