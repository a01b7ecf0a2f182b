//! Node kinds and record classification.
//!
//! Every globally addressable object resolves to exactly one [`NodeKind`].
//! Concepts split on their object type (publication concepts are a distinct
//! graph type) and documents split on their `inPublication` slug. A document
//! with an unrecognized slug is an error, not a silent `null`.

use std::fmt;

use crate::defaults::{HRLP_PUBLICATION, WKBE_LEGISLATION_PUBLICATION, WKBE_NEWS_PUBLICATION};
use crate::error::{Error, Result};
use crate::models::{ApolloDocumentRecord, ConceptRecord};

/// The closed set of node types a global id can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    ConceptScheme,
    Concept,
    ApolloPublication,
    HrlpDocument,
    WkbeNews,
    WkbeLegislation,
    ContentData,
}

impl NodeKind {
    /// Parses a graph type name as carried in global ids.
    pub fn parse(type_name: &str) -> Option<Self> {
        match type_name {
            "ConceptScheme" => Some(Self::ConceptScheme),
            "Concept" => Some(Self::Concept),
            "ApolloPublication" => Some(Self::ApolloPublication),
            "HRLPDocument" => Some(Self::HrlpDocument),
            "WKBENews" => Some(Self::WkbeNews),
            "WKBELegislation" => Some(Self::WkbeLegislation),
            "ContentData" => Some(Self::ContentData),
            _ => None,
        }
    }

    /// The graph type name, as used in global ids and the schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConceptScheme => "ConceptScheme",
            Self::Concept => "Concept",
            Self::ApolloPublication => "ApolloPublication",
            Self::HrlpDocument => "HRLPDocument",
            Self::WkbeNews => "WKBENews",
            Self::WkbeLegislation => "WKBELegislation",
            Self::ContentData => "ContentData",
        }
    }

    /// Classifies a concept record. The publication object type wins over
    /// the plain concept type when both are present.
    pub fn of_concept(record: &ConceptRecord) -> Self {
        if record.is_publication() {
            Self::ApolloPublication
        } else {
            Self::Concept
        }
    }

    /// Classifies a document record by its `inPublication` slug.
    pub fn of_document(record: &ApolloDocumentRecord) -> Result<Self> {
        match record.in_publication.as_deref() {
            Some(HRLP_PUBLICATION) => Ok(Self::HrlpDocument),
            Some(WKBE_NEWS_PUBLICATION) => Ok(Self::WkbeNews),
            Some(WKBE_LEGISLATION_PUBLICATION) => Ok(Self::WkbeLegislation),
            Some(other) => Err(Error::UnresolvableType(format!(
                "document '{}' belongs to unknown publication '{}'",
                record.id, other
            ))),
            None => Err(Error::UnresolvableType(format!(
                "document '{}' carries no publication",
                record.id
            ))),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
