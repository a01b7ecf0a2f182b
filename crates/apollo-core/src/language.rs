//! Language, sort-order, and concept-kind enums shared across the gateway.
//!
//! Backend records store localized text under flat language-suffixed keys
//! (`prefLabel_en`, `title_nl`, ...); [`Language::suffix`] selects the key
//! and doubles as the SPARQL language tag.

use serde::{Deserialize, Serialize};

/// Languages carried by the taxonomy backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    /// Dutch
    Nl,
    /// French
    Fr,
    /// English
    En,
    /// German
    De,
}

/// Language used when a field omits its `language` argument.
pub const DEFAULT_LANGUAGE: Language = Language::En;

impl Language {
    /// Lowercase wire suffix, e.g. `en` in `prefLabel_en`.
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Nl => "nl",
            Self::Fr => "fr",
            Self::En => "en",
            Self::De => "de",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        DEFAULT_LANGUAGE
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nl => write!(f, "NL"),
            Self::Fr => write!(f, "FR"),
            Self::En => write!(f, "EN"),
            Self::De => write!(f, "DE"),
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nl" => Ok(Self::Nl),
            "fr" => Ok(Self::Fr),
            "en" => Ok(Self::En),
            "de" => Ok(Self::De),
            _ => Err(format!("Invalid language: {}", s)),
        }
    }
}

/// Sort direction for orderBy arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Lower-cased value the JSON store expects in `_order=`.
    pub const fn as_query_value(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// SPARQL order modifier.
    pub const fn as_sparql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "ASC"),
            Self::Desc => write!(f, "DESC"),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(format!("Invalid sort order: {}", s)),
        }
    }
}

/// Which part of the hierarchy a concept search targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConceptKind {
    /// Concepts with no narrower terms.
    OnlyLeaf,
    /// Concepts with no broader terms.
    OnlyTop,
    /// The whole hierarchy.
    All,
}

impl Default for ConceptKind {
    fn default() -> Self {
        Self::OnlyLeaf
    }
}

impl std::fmt::Display for ConceptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OnlyLeaf => write!(f, "ONLY_LEAF"),
            Self::OnlyTop => write!(f, "ONLY_TOP"),
            Self::All => write!(f, "ALL"),
        }
    }
}

impl std::str::FromStr for ConceptKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ONLY_LEAF" => Ok(Self::OnlyLeaf),
            "ONLY_TOP" => Ok(Self::OnlyTop),
            "ALL" => Ok(Self::All),
            _ => Err(format!("Invalid concept kind: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_language_suffixes() {
        assert_eq!(Language::Nl.suffix(), "nl");
        assert_eq!(Language::Fr.suffix(), "fr");
        assert_eq!(Language::En.suffix(), "en");
        assert_eq!(Language::De.suffix(), "de");
    }

    #[test]
    fn test_language_default_is_english() {
        assert_eq!(Language::default(), Language::En);
        assert_eq!(DEFAULT_LANGUAGE, Language::En);
    }

    #[test]
    fn test_language_round_trip() {
        for lang in [Language::Nl, Language::Fr, Language::En, Language::De] {
            assert_eq!(Language::from_str(&lang.to_string()).unwrap(), lang);
        }
    }

    #[test]
    fn test_language_serde_uppercase() {
        assert_eq!(serde_json::to_string(&Language::De).unwrap(), "\"DE\"");
        let lang: Language = serde_json::from_str("\"NL\"").unwrap();
        assert_eq!(lang, Language::Nl);
    }

    #[test]
    fn test_sort_order_query_values() {
        assert_eq!(SortOrder::Asc.as_query_value(), "asc");
        assert_eq!(SortOrder::Desc.as_query_value(), "desc");
    }

    #[test]
    fn test_sort_order_from_str_case_insensitive() {
        assert_eq!(SortOrder::from_str("DESC").unwrap(), SortOrder::Desc);
        assert_eq!(SortOrder::from_str("asc").unwrap(), SortOrder::Asc);
        assert!(SortOrder::from_str("sideways").is_err());
    }

    #[test]
    fn test_concept_kind_default() {
        assert_eq!(ConceptKind::default(), ConceptKind::OnlyLeaf);
    }

    #[test]
    fn test_concept_kind_round_trip() {
        for kind in [ConceptKind::OnlyLeaf, ConceptKind::OnlyTop, ConceptKind::All] {
            assert_eq!(ConceptKind::from_str(&kind.to_string()).unwrap(), kind);
        }
    }
}
