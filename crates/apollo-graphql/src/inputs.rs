//! Filter and orderBy input objects.
//!
//! Input fields speak the public surface: ids are opaque global ids, orderBy
//! fields are named after the store's language-suffixed columns. Conversion
//! into datasource types happens here, at the boundary, so everything below
//! the schema works with internal ids only.

use async_graphql::{InputObject, ID};

use apollo_core::{GlobalId, Result, SortOrder};
use apollo_datasource::{ConceptSearch, Filter, LabelMatch, OrderBy};

use crate::enums::{ConceptType, Language, Sort};

/// Decode one opaque id, keeping only the internal part.
pub fn decode_id(id: &ID) -> Result<String> {
    Ok(GlobalId::decode(id.as_str())?.id)
}

/// Decode a batch of opaque ids; any malformed id fails the whole batch.
pub fn decode_ids(ids: &[ID]) -> Result<Vec<String>> {
    ids.iter().map(decode_id).collect()
}

#[derive(InputObject, Debug, Default)]
pub struct ConceptSchemeFilter {
    /// Global ids of the schemes to match.
    pub ids: Option<Vec<ID>>,
}

impl ConceptSchemeFilter {
    pub fn to_filters(&self) -> Result<Vec<Filter>> {
        let mut filters = Vec::new();
        if let Some(ids) = &self.ids {
            filters.push(Filter::Ids(decode_ids(ids)?));
        }
        Ok(filters)
    }
}

#[derive(InputObject, Debug, Default)]
pub struct ConceptFilter {
    /// Global ids of the concepts to match.
    pub ids: Option<Vec<ID>>,
    /// Restrict to concepts of one scheme, by its global id.
    pub concept_scheme_id: Option<ID>,
}

impl ConceptFilter {
    pub fn to_filters(&self) -> Result<Vec<Filter>> {
        let mut filters = Vec::new();
        if let Some(ids) = &self.ids {
            filters.push(Filter::Ids(decode_ids(ids)?));
        }
        if let Some(scheme) = &self.concept_scheme_id {
            filters.push(Filter::ConceptSchemeId(decode_id(scheme)?));
        }
        Ok(filters)
    }
}

#[derive(InputObject, Debug, Default)]
pub struct ApolloDocumentFilter {
    /// Global ids of the documents to match.
    pub ids: Option<Vec<ID>>,
    /// Global ids of classification concepts; expanded to their narrower
    /// closure before matching.
    pub about_ids: Option<Vec<ID>>,
}

#[derive(InputObject, Debug, Default)]
pub struct LabelSearchOption {
    pub starts_with: Option<String>,
    pub contains: Option<String>,
    pub ends_with: Option<String>,
    pub exact_match: Option<String>,
}

impl LabelSearchOption {
    fn to_match(&self) -> LabelMatch {
        LabelMatch {
            starts_with: self.starts_with.clone(),
            contains: self.contains.clone(),
            ends_with: self.ends_with.clone(),
            exact_match: self.exact_match.clone(),
        }
    }
}

#[derive(InputObject, Debug, Default)]
pub struct SearchConceptFilter {
    pub pref_label_value: Option<LabelSearchOption>,
    pub alt_label_value: Option<LabelSearchOption>,
    /// Hierarchy position constraint; defaults to ONLY_LEAF.
    pub concept_type: Option<ConceptType>,
    /// Language of the labels to match; defaults to EN.
    pub language: Option<Language>,
}

impl SearchConceptFilter {
    /// Build the SPARQL search, with ordering and window supplied separately.
    pub fn to_search(&self, order: SortOrder, limit: u32, offset: u32) -> ConceptSearch {
        ConceptSearch {
            pref_label: self.pref_label_value.as_ref().map(LabelSearchOption::to_match),
            alt_label: self.alt_label_value.as_ref().map(LabelSearchOption::to_match),
            kind: self
                .concept_type
                .map(apollo_core::ConceptKind::from)
                .unwrap_or_default(),
            language: crate::enums::language_or_default(self.language),
            order,
            limit,
            offset,
        }
    }
}

/// Collect `(field, direction)` pairs in declared order, skipping absent
/// fields.
fn collect_order(pairs: &[(&str, Option<Sort>)]) -> Vec<OrderBy> {
    pairs
        .iter()
        .filter_map(|(field, sort)| {
            sort.map(|s| OrderBy::new(*field, SortOrder::from(s)))
        })
        .collect()
}

#[derive(InputObject, Debug, Default)]
pub struct ConceptSchemeOrderBy {
    #[graphql(name = "title_nl")]
    pub title_nl: Option<Sort>,
    #[graphql(name = "title_en")]
    pub title_en: Option<Sort>,
    #[graphql(name = "title_fr")]
    pub title_fr: Option<Sort>,
}

impl ConceptSchemeOrderBy {
    pub fn to_order(&self) -> Vec<OrderBy> {
        collect_order(&[
            ("title_nl", self.title_nl),
            ("title_en", self.title_en),
            ("title_fr", self.title_fr),
        ])
    }
}

#[derive(InputObject, Debug, Default)]
pub struct ConceptOrderBy {
    #[graphql(name = "prefLabel_nl")]
    pub pref_label_nl: Option<Sort>,
    #[graphql(name = "prefLabel_en")]
    pub pref_label_en: Option<Sort>,
    #[graphql(name = "prefLabel_fr")]
    pub pref_label_fr: Option<Sort>,
}

impl ConceptOrderBy {
    pub fn to_order(&self) -> Vec<OrderBy> {
        collect_order(&[
            ("prefLabel_nl", self.pref_label_nl),
            ("prefLabel_en", self.pref_label_en),
            ("prefLabel_fr", self.pref_label_fr),
        ])
    }
}

#[derive(InputObject, Debug, Default)]
pub struct SearchConceptOrderBy {
    #[graphql(name = "prefLabel_nl")]
    pub pref_label_nl: Option<Sort>,
    #[graphql(name = "prefLabel_en")]
    pub pref_label_en: Option<Sort>,
    #[graphql(name = "prefLabel_fr")]
    pub pref_label_fr: Option<Sort>,
}

impl SearchConceptOrderBy {
    /// The search orders on one label variable; the first supplied field
    /// decides the direction.
    pub fn direction(&self) -> Option<SortOrder> {
        [self.pref_label_nl, self.pref_label_en, self.pref_label_fr]
            .into_iter()
            .flatten()
            .next()
            .map(SortOrder::from)
    }
}

#[derive(InputObject, Debug, Default)]
pub struct ApolloDocumentOrderBy {
    #[graphql(name = "title_nl")]
    pub title_nl: Option<Sort>,
    #[graphql(name = "title_en")]
    pub title_en: Option<Sort>,
    #[graphql(name = "title_fr")]
    pub title_fr: Option<Sort>,
}

impl ApolloDocumentOrderBy {
    pub fn to_order(&self) -> Vec<OrderBy> {
        collect_order(&[
            ("title_nl", self.title_nl),
            ("title_en", self.title_en),
            ("title_fr", self.title_fr),
        ])
    }
}
