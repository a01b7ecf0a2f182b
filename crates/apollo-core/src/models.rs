//! Backend record models.
//!
//! The JSON store keeps localized text in flat language-suffixed keys
//! (`prefLabel_en`, `title_nl`, ...) and relations as arrays of internal ids.
//! These structs mirror that wire shape one-to-one; typed accessors pick the
//! slot for a [`Language`]. Records are read-through projections: nothing
//! here is cached, and only the document `about` set is ever written back.

use serde::{Deserialize, Serialize};

use crate::defaults::{uri_tail, PUBLICATION_OBJECT_TYPE_ID};
use crate::language::Language;

fn localized<'a>(
    language: Language,
    nl: Option<&'a str>,
    fr: Option<&'a str>,
    en: Option<&'a str>,
    de: Option<&'a str>,
) -> Option<&'a str> {
    match language {
        Language::Nl => nl,
        Language::Fr => fr,
        Language::En => en,
        Language::De => de,
    }
}

// =============================================================================
// CONCEPT
// =============================================================================

/// A SKOS concept as stored in the JSON store.
///
/// `broader`/`narrower` reference other concepts by id and are lazy-resolved;
/// publication concepts carry a `bibliographicResourceType` URI that marks
/// them as publications rather than plain concepts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConceptRecord {
    pub id: String,
    /// Unique URI within Apollo.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// SKOS type URI.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_uri: Option<String>,
    #[serde(rename = "prefLabel_nl", skip_serializing_if = "Option::is_none")]
    pub pref_label_nl: Option<String>,
    #[serde(rename = "prefLabel_fr", skip_serializing_if = "Option::is_none")]
    pub pref_label_fr: Option<String>,
    #[serde(rename = "prefLabel_en", skip_serializing_if = "Option::is_none")]
    pub pref_label_en: Option<String>,
    #[serde(rename = "prefLabel_de", skip_serializing_if = "Option::is_none")]
    pub pref_label_de: Option<String>,
    #[serde(rename = "altLabel_nl", skip_serializing_if = "Option::is_none")]
    pub alt_label_nl: Option<String>,
    #[serde(rename = "altLabel_fr", skip_serializing_if = "Option::is_none")]
    pub alt_label_fr: Option<String>,
    #[serde(rename = "altLabel_en", skip_serializing_if = "Option::is_none")]
    pub alt_label_en: Option<String>,
    #[serde(rename = "altLabel_de", skip_serializing_if = "Option::is_none")]
    pub alt_label_de: Option<String>,
    #[serde(rename = "definition_nl", skip_serializing_if = "Option::is_none")]
    pub definition_nl: Option<String>,
    #[serde(rename = "definition_fr", skip_serializing_if = "Option::is_none")]
    pub definition_fr: Option<String>,
    #[serde(rename = "definition_en", skip_serializing_if = "Option::is_none")]
    pub definition_en: Option<String>,
    #[serde(rename = "definition_de", skip_serializing_if = "Option::is_none")]
    pub definition_de: Option<String>,
    /// Display title, only present on publication concepts.
    #[serde(rename = "title_nl", skip_serializing_if = "Option::is_none")]
    pub title_nl: Option<String>,
    #[serde(rename = "title_fr", skip_serializing_if = "Option::is_none")]
    pub title_fr: Option<String>,
    #[serde(rename = "title_en", skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    #[serde(rename = "title_de", skip_serializing_if = "Option::is_none")]
    pub title_de: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notation: Option<String>,
    /// Full URI of the owning concept scheme.
    #[serde(rename = "inscheme", skip_serializing_if = "Option::is_none")]
    pub in_scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub broader: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub narrower: Vec<String>,
    /// Object-type URI; publications carry the publication object type.
    #[serde(
        rename = "bibliographicResourceType",
        skip_serializing_if = "Option::is_none"
    )]
    pub bibliographic_resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributor: Option<String>,
}

impl ConceptRecord {
    /// Preferred label in the given language.
    pub fn pref_label(&self, language: Language) -> Option<&str> {
        localized(
            language,
            self.pref_label_nl.as_deref(),
            self.pref_label_fr.as_deref(),
            self.pref_label_en.as_deref(),
            self.pref_label_de.as_deref(),
        )
    }

    /// Alternative label in the given language.
    pub fn alt_label(&self, language: Language) -> Option<&str> {
        localized(
            language,
            self.alt_label_nl.as_deref(),
            self.alt_label_fr.as_deref(),
            self.alt_label_en.as_deref(),
            self.alt_label_de.as_deref(),
        )
    }

    /// Definition in the given language.
    pub fn definition(&self, language: Language) -> Option<&str> {
        localized(
            language,
            self.definition_nl.as_deref(),
            self.definition_fr.as_deref(),
            self.definition_en.as_deref(),
            self.definition_de.as_deref(),
        )
    }

    /// Publication title in the given language.
    pub fn title(&self, language: Language) -> Option<&str> {
        localized(
            language,
            self.title_nl.as_deref(),
            self.title_fr.as_deref(),
            self.title_en.as_deref(),
            self.title_de.as_deref(),
        )
    }

    /// True iff the concept has narrower terms.
    pub fn has_narrower(&self) -> bool {
        !self.narrower.is_empty()
    }

    /// A leaf carries no narrower terms; only leaves may classify documents.
    pub fn is_leaf(&self) -> bool {
        self.narrower.is_empty()
    }

    /// Owning scheme id, extracted from the `inscheme` URI tail.
    pub fn scheme_id(&self) -> Option<&str> {
        self.in_scheme.as_deref().map(uri_tail)
    }

    /// Object-type id from the `bibliographicResourceType` URI tail.
    pub fn bibliographic_resource_type_id(&self) -> Option<&str> {
        self.bibliographic_resource_type.as_deref().map(uri_tail)
    }

    /// Publication concepts double as document-collection discriminators.
    pub fn is_publication(&self) -> bool {
        self.bibliographic_resource_type_id() == Some(PUBLICATION_OBJECT_TYPE_ID)
    }
}

// =============================================================================
// CONCEPT SCHEME
// =============================================================================

/// A SKOS concept scheme: a named vocabulary with an ordered set of
/// top-concept ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConceptSchemeRecord {
    pub id: String,
    /// Unique URI within Apollo.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// SKOS type URI.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(rename = "title_nl", skip_serializing_if = "Option::is_none")]
    pub title_nl: Option<String>,
    #[serde(rename = "title_fr", skip_serializing_if = "Option::is_none")]
    pub title_fr: Option<String>,
    #[serde(rename = "title_en", skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    #[serde(rename = "title_de", skip_serializing_if = "Option::is_none")]
    pub title_de: Option<String>,
    #[serde(rename = "definition_nl", skip_serializing_if = "Option::is_none")]
    pub definition_nl: Option<String>,
    #[serde(rename = "definition_fr", skip_serializing_if = "Option::is_none")]
    pub definition_fr: Option<String>,
    #[serde(rename = "definition_en", skip_serializing_if = "Option::is_none")]
    pub definition_en: Option<String>,
    #[serde(rename = "definition_de", skip_serializing_if = "Option::is_none")]
    pub definition_de: Option<String>,
    #[serde(rename = "topconcepts", default, skip_serializing_if = "Vec::is_empty")]
    pub top_concepts: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

impl ConceptSchemeRecord {
    /// Scheme title in the given language.
    pub fn title(&self, language: Language) -> Option<&str> {
        localized(
            language,
            self.title_nl.as_deref(),
            self.title_fr.as_deref(),
            self.title_en.as_deref(),
            self.title_de.as_deref(),
        )
    }

    /// Scheme definition in the given language.
    pub fn definition(&self, language: Language) -> Option<&str> {
        localized(
            language,
            self.definition_nl.as_deref(),
            self.definition_fr.as_deref(),
            self.definition_en.as_deref(),
            self.definition_de.as_deref(),
        )
    }
}

// =============================================================================
// APOLLO DOCUMENT
// =============================================================================

/// A typed document. One wire shape backs all three graph variants; the
/// `inPublication` slug decides which variant a record is.
///
/// Unknown backend fields survive in `extra`, so a read-modify-write PUT
/// never drops data this layer does not model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApolloDocumentRecord {
    pub id: String,
    /// Unique URI within Apollo.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(rename = "title_nl", skip_serializing_if = "Option::is_none")]
    pub title_nl: Option<String>,
    #[serde(rename = "title_fr", skip_serializing_if = "Option::is_none")]
    pub title_fr: Option<String>,
    #[serde(rename = "title_en", skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    #[serde(rename = "title_de", skip_serializing_if = "Option::is_none")]
    pub title_de: Option<String>,
    /// Publication concept id (variant discriminator).
    #[serde(rename = "inPublication", skip_serializing_if = "Option::is_none")]
    pub in_publication: Option<String>,
    /// Classification: ids of the concepts this document is about.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub about: Vec<String>,
    /// Content record id (HRLP documents).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Enactment date (legislation).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued: Option<String>,
    /// Official-journal publication date (legislation).
    #[serde(rename = "publicationDate", skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
    /// Bibliographic-reference record id (legislation).
    #[serde(
        rename = "bibliographicReference",
        skip_serializing_if = "Option::is_none"
    )]
    pub bibliographic_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributor: Option<String>,
    /// Backend fields this layer does not model, preserved across PUTs.
    #[serde(flatten, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ApolloDocumentRecord {
    /// Document title in the given language.
    pub fn title(&self, language: Language) -> Option<&str> {
        localized(
            language,
            self.title_nl.as_deref(),
            self.title_fr.as_deref(),
            self.title_en.as_deref(),
            self.title_de.as_deref(),
        )
    }
}

// =============================================================================
// CONTENT
// =============================================================================

/// Stored content payload attached to an HRLP document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: String,
    /// Unique URI within Apollo.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Content-type concept id (creation vs. change, etc.).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_id: Option<String>,
    #[serde(rename = "title_nl", skip_serializing_if = "Option::is_none")]
    pub title_nl: Option<String>,
    #[serde(rename = "title_fr", skip_serializing_if = "Option::is_none")]
    pub title_fr: Option<String>,
    #[serde(rename = "title_en", skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    #[serde(rename = "title_de", skip_serializing_if = "Option::is_none")]
    pub title_de: Option<String>,
    /// Text payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "contentType", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(rename = "downloadUrl", skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

impl ContentRecord {
    /// Content title in the given language.
    pub fn title(&self, language: Language) -> Option<&str> {
        localized(
            language,
            self.title_nl.as_deref(),
            self.title_fr.as_deref(),
            self.title_en.as_deref(),
            self.title_de.as_deref(),
        )
    }

    /// Payload as base64.
    pub fn as_base64(&self) -> Option<String> {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine as _;
        self.content.as_deref().map(|c| STANDARD.encode(c))
    }

    /// Payload as a `data:` URL using the stored content type.
    pub fn as_data_url(&self) -> Option<String> {
        let media_type = self.content_type.as_deref().unwrap_or("text/html");
        self.as_base64()
            .map(|b64| format!("data:{};base64,{}", media_type, b64))
    }

    /// Reported size, falling back to the payload's byte length.
    pub fn byte_size(&self) -> Option<u64> {
        self.size
            .or_else(|| self.content.as_deref().map(|c| c.len() as u64))
    }
}

// =============================================================================
// BIBLIOGRAPHIC REFERENCE
// =============================================================================

/// Citation record attached to legislation documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BibliographicReferenceRecord {
    pub id: String,
    /// Unique URI within Apollo.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
    #[serde(rename = "title_nl", skip_serializing_if = "Option::is_none")]
    pub title_nl: Option<String>,
    #[serde(rename = "title_fr", skip_serializing_if = "Option::is_none")]
    pub title_fr: Option<String>,
    #[serde(rename = "title_en", skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    #[serde(rename = "title_de", skip_serializing_if = "Option::is_none")]
    pub title_de: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued: Option<String>,
}

impl BibliographicReferenceRecord {
    /// Reference title in the given language.
    pub fn title(&self, language: Language) -> Option<&str> {
        localized(
            language,
            self.title_nl.as_deref(),
            self.title_fr.as_deref(),
            self.title_en.as_deref(),
            self.title_de.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_concept_deserializes_flat_language_keys() {
        let concept: ConceptRecord = serde_json::from_value(json!({
            "id": "123",
            "_id": "http://data.example.com/apollo/concepts/123",
            "type": "http://www.w3.org/2004/02/skos/core#Concept",
            "prefLabel_en": "Foo",
            "prefLabel_nl": "Foe",
            "altLabel_en": "Foo alt",
            "definition_en": "A thing",
            "notation": "F-1",
            "inscheme": "http://data.example.com/apollo/conceptschemes/subjects",
            "narrower": ["456"],
            "broader": []
        }))
        .unwrap();

        assert_eq!(concept.pref_label(Language::En), Some("Foo"));
        assert_eq!(concept.pref_label(Language::Nl), Some("Foe"));
        assert_eq!(concept.pref_label(Language::De), None);
        assert_eq!(concept.alt_label(Language::En), Some("Foo alt"));
        assert_eq!(concept.definition(Language::En), Some("A thing"));
        assert_eq!(concept.scheme_id(), Some("subjects"));
        assert!(concept.has_narrower());
        assert!(!concept.is_leaf());
        assert!(!concept.is_publication());
    }

    #[test]
    fn test_concept_missing_relations_default_empty() {
        let concept: ConceptRecord =
            serde_json::from_value(json!({"id": "solo", "prefLabel_en": "Solo"})).unwrap();
        assert!(concept.broader.is_empty());
        assert!(concept.narrower.is_empty());
        assert!(concept.is_leaf());
        assert!(!concept.has_narrower());
    }

    #[test]
    fn test_publication_concept_is_detected_from_uri_tail() {
        let publication: ConceptRecord = serde_json::from_value(json!({
            "id": "hrlp-lippincott-procedures",
            "bibliographicResourceType":
                "http://data.wolterskluwer.com/apollo/resource/object-type/7c688f91-55e0-4a65-aec4-2185b30ef494",
            "title_en": "Lippincott Procedures"
        }))
        .unwrap();
        assert!(publication.is_publication());
        assert_eq!(
            publication.bibliographic_resource_type_id(),
            Some("7c688f91-55e0-4a65-aec4-2185b30ef494")
        );
        assert_eq!(
            publication.title(Language::En),
            Some("Lippincott Procedures")
        );
    }

    #[test]
    fn test_scheme_title_and_top_concepts() {
        let scheme: ConceptSchemeRecord = serde_json::from_value(json!({
            "id": "subjects",
            "title_en": "Subject register",
            "title_fr": "Registre des sujets",
            "topconcepts": ["a", "b"]
        }))
        .unwrap();
        assert_eq!(scheme.title(Language::En), Some("Subject register"));
        assert_eq!(scheme.title(Language::Fr), Some("Registre des sujets"));
        assert_eq!(scheme.top_concepts, vec!["a", "b"]);
    }

    #[test]
    fn test_document_round_trip_preserves_unknown_fields() {
        let wire = json!({
            "id": "doc-1",
            "title_en": "Procedure",
            "inPublication": "hrlp-lippincott-procedures",
            "about": ["c1", "c2"],
            "legacyField": {"nested": true},
            "revision": 7
        });
        let doc: ApolloDocumentRecord = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(doc.about, vec!["c1", "c2"]);
        assert_eq!(doc.extra.get("revision"), Some(&json!(7)));

        let back = serde_json::to_value(&doc).unwrap();
        assert_eq!(back.get("legacyField"), wire.get("legacyField"));
        assert_eq!(back.get("revision"), Some(&json!(7)));
        assert_eq!(back.get("inPublication"), wire.get("inPublication"));
    }

    #[test]
    fn test_document_serializes_camel_case_keys() {
        let doc = ApolloDocumentRecord {
            id: "leg-1".to_string(),
            in_publication: Some("wkbe-legislation".to_string()),
            about: vec!["c1".to_string()],
            publication_date: Some("2019-03-01".to_string()),
            bibliographic_reference: Some("bib-1".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["inPublication"], "wkbe-legislation");
        assert_eq!(value["publicationDate"], "2019-03-01");
        assert_eq!(value["bibliographicReference"], "bib-1");
        assert!(value.get("title_en").is_none());
    }

    #[test]
    fn test_content_derivations() {
        let content = ContentRecord {
            id: "content-1".to_string(),
            content: Some("<p>hello</p>".to_string()),
            content_type: Some("text/html".to_string()),
            ..Default::default()
        };
        assert_eq!(content.as_base64().as_deref(), Some("PHA+aGVsbG88L3A+"));
        assert_eq!(
            content.as_data_url().as_deref(),
            Some("data:text/html;base64,PHA+aGVsbG88L3A+")
        );
        assert_eq!(content.byte_size(), Some(12));
    }

    #[test]
    fn test_content_reported_size_wins() {
        let content = ContentRecord {
            id: "content-2".to_string(),
            content: Some("abc".to_string()),
            size: Some(9999),
            ..Default::default()
        };
        assert_eq!(content.byte_size(), Some(9999));
    }
}
