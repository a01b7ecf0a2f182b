//! Concept search against the SPARQL endpoint.
//!
//! Label search runs over the triple store rather than the JSON store: the
//! store's `_like` operator cannot express per-language anchored matching.
//! A search yields concept ids only; callers hydrate full records from the
//! JSON store afterwards. Every search query has a COUNT companion built
//! from the same graph pattern, so the reported total covers the whole
//! result set and not just the fetched window.

use std::collections::HashMap;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use apollo_core::{
    uri_tail, ConceptKind, Error, Language, Result, SortOrder, DEFAULT_LANGUAGE, DEFAULT_LIMIT,
    DEFAULT_OFFSET,
};

use crate::config::BackendConfig;
use crate::transport::Listing;

const SKOS_PREFIX: &str = "PREFIX skos: <http://www.w3.org/2004/02/skos/core#>";
const RESULTS_JSON: &str = "application/sparql-results+json";

/// Match modes for one label property. All present modes are AND-combined,
/// and matching is case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMatch {
    pub starts_with: Option<String>,
    pub contains: Option<String>,
    pub ends_with: Option<String>,
    pub exact_match: Option<String>,
}

impl LabelMatch {
    pub fn is_empty(&self) -> bool {
        self.starts_with.is_none()
            && self.contains.is_none()
            && self.ends_with.is_none()
            && self.exact_match.is_none()
    }
}

/// A concept label search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptSearch {
    pub pref_label: Option<LabelMatch>,
    pub alt_label: Option<LabelMatch>,
    /// Hierarchy position constraint.
    pub kind: ConceptKind,
    /// Language of the label literals to match against.
    pub language: Language,
    /// Direction for the preferred-label ordering.
    pub order: SortOrder,
    pub limit: u32,
    pub offset: u32,
}

impl Default for ConceptSearch {
    fn default() -> Self {
        Self {
            pref_label: None,
            alt_label: None,
            kind: ConceptKind::default(),
            language: DEFAULT_LANGUAGE,
            order: SortOrder::Asc,
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl ConceptSearch {
    /// The shared WHERE block of the search and count queries.
    fn pattern(&self) -> String {
        let lang = self.language.suffix();
        let mut lines = vec![
            "?concept a skos:Concept .".to_string(),
            "?concept skos:prefLabel ?prefLabel .".to_string(),
            format!("FILTER (LANG(?prefLabel) = \"{}\")", lang),
        ];

        if let Some(pref) = &self.pref_label {
            push_label_filters(&mut lines, "prefLabel", pref);
        }
        if let Some(alt) = &self.alt_label {
            if !alt.is_empty() {
                lines.push("?concept skos:altLabel ?altLabel .".to_string());
                lines.push(format!("FILTER (LANG(?altLabel) = \"{}\")", lang));
                push_label_filters(&mut lines, "altLabel", alt);
            }
        }

        match self.kind {
            ConceptKind::OnlyLeaf => {
                lines.push("FILTER NOT EXISTS { ?concept skos:narrower ?anyNarrower . }".to_string())
            }
            ConceptKind::OnlyTop => {
                lines.push("FILTER NOT EXISTS { ?concept skos:broader ?anyBroader . }".to_string())
            }
            ConceptKind::All => {}
        }

        lines.join("\n  ")
    }

    /// The windowed id query, ordered by preferred label.
    pub fn to_sparql(&self) -> String {
        format!(
            "{SKOS_PREFIX}\nSELECT DISTINCT ?concept ?prefLabel\nWHERE {{\n  {}\n}}\nORDER BY {}(?prefLabel)\nLIMIT {}\nOFFSET {}",
            self.pattern(),
            self.order.as_sparql(),
            self.limit,
            self.offset,
        )
    }

    /// The COUNT companion over the same pattern, without window or order.
    pub fn to_count_sparql(&self) -> String {
        format!(
            "{SKOS_PREFIX}\nSELECT (COUNT(DISTINCT ?concept) AS ?total)\nWHERE {{\n  {}\n}}",
            self.pattern(),
        )
    }
}

fn push_label_filters(lines: &mut Vec<String>, var: &str, label_match: &LabelMatch) {
    if let Some(value) = &label_match.exact_match {
        lines.push(format!("FILTER (?{} = \"{}\")", var, escape_literal(value)));
    }
    if let Some(value) = &label_match.starts_with {
        lines.push(format!(
            "FILTER (STRSTARTS(?{}, \"{}\"))",
            var,
            escape_literal(value)
        ));
    }
    if let Some(value) = &label_match.contains {
        lines.push(format!(
            "FILTER (CONTAINS(?{}, \"{}\"))",
            var,
            escape_literal(value)
        ));
    }
    if let Some(value) = &label_match.ends_with {
        lines.push(format!(
            "FILTER (STRENDS(?{}, \"{}\"))",
            var,
            escape_literal(value)
        ));
    }
}

/// Escape a string for embedding in a SPARQL literal.
fn escape_literal(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

// =============================================================================
// CLIENT
// =============================================================================

/// Client for the SPARQL query endpoint.
#[derive(Debug, Clone)]
pub struct SparqlClient {
    client: Client,
    endpoint: String,
}

impl SparqlClient {
    /// Create a client with its own connection pool.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, &config.sparql_url))
    }

    /// Create from an existing client, sharing its connection pool.
    pub(crate) fn with_client(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }

    /// Run a SELECT query and return its bindings.
    async fn select(&self, query: &str) -> Result<Vec<HashMap<String, SparqlTerm>>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("query", query)])
            .header("Accept", RESULTS_JSON)
            .send()
            .await
            .map_err(|e| Error::Request(format!("SPARQL request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Backend {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: SparqlResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse SPARQL response: {}", e)))?;

        Ok(body.results.bindings)
    }

    /// Find concept ids matching `search`, with the unwindowed total.
    ///
    /// The id query and its COUNT companion run concurrently. Ids come back
    /// in label order; bindings without a `concept` variable are skipped.
    #[instrument(skip(self, search), fields(language = %search.language, kind = %search.kind))]
    pub async fn search_concepts(&self, search: &ConceptSearch) -> Result<Listing<String>> {
        let query = search.to_sparql();
        let count_query = search.to_count_sparql();
        let (rows, count_rows) =
            tokio::try_join!(self.select(&query), self.select(&count_query))?;

        let items: Vec<String> = rows
            .iter()
            .filter_map(|binding| binding.get("concept"))
            .map(|term| uri_tail(&term.value).to_string())
            .collect();

        let total = count_rows
            .first()
            .and_then(|binding| binding.get("total"))
            .and_then(|term| term.value.parse().ok())
            .unwrap_or(items.len() as u64);

        debug!(matched = items.len(), total, "Concept search complete");

        Ok(Listing { items, total })
    }
}

/// One RDF term of a result binding. Only the lexical value is used.
#[derive(Debug, Deserialize)]
struct SparqlTerm {
    value: String,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    bindings: Vec<HashMap<String, SparqlTerm>>,
}

#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}
