//! Naming-convention transforms between wire names and record field names
//!
//! Wire names are lower-case words joined by a separator and pluralized for
//! collection keys ("blog-posts"). Record field names are CamelCase
//! ("BlogPost", "AuthorID"). `to_wire_case` and `to_field_case` are inverses
//! for every field name whose acronyms are listed in the configuration.

use crate::types::DecodeConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

// "HTMLBody" -> "HTML Body"
static ACRONYM_HUMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Z]+)([A-Z][a-z])").unwrap()
});

// "blogPost" -> "blog Post"
static CAMEL_HUMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([a-z0-9])([A-Z])").unwrap()
});

static WORD_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[-_\s]+").unwrap()
});

static FIELD_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][A-Za-z0-9]*$").unwrap()
});

static SIBILANT_SUFFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(s|x|z|ch|sh)$").unwrap()
});

static CONSONANT_Y_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^aeiou]y$").unwrap()
});

/// Whether `name` is a valid CamelCase record field or type name
pub fn is_field_name(name: &str) -> bool {
    FIELD_NAME_REGEX.is_match(name)
}

/// Split a name in any supported convention into its words
fn split_words(name: &str) -> Vec<String> {
    let spaced = ACRONYM_HUMP_REGEX.replace_all(name, "${1} ${2}");
    let spaced = CAMEL_HUMP_REGEX.replace_all(&spaced, "${1} ${2}");
    WORD_SEPARATOR_REGEX
        .split(&spaced)
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect()
}

/// Naming transforms configured from a `DecodeConfig`
#[derive(Debug, Clone)]
pub struct Naming {
    separator: String,
    acronyms: HashSet<String>,
    irregular_plurals: HashMap<String, String>,
}

impl Naming {
    pub fn new(config: &DecodeConfig) -> Self {
        Naming {
            separator: config.separator.clone(),
            acronyms: config.acronyms.iter().map(|a| a.to_uppercase()).collect(),
            irregular_plurals: config
                .irregular_plurals
                .iter()
                .map(|(singular, plural)| (singular.to_lowercase(), plural.to_lowercase()))
                .collect(),
        }
    }

    /// Convert a record field or type name to the wire convention
    ///
    /// `"BlogPost"` becomes `"blog-post"` with the default separator.
    pub fn to_wire_case(&self, field_name: &str) -> String {
        split_words(field_name)
            .iter()
            .map(|w| w.to_lowercase())
            .collect::<Vec<_>>()
            .join(&self.separator)
    }

    /// Convert a wire name to the record field convention
    ///
    /// Accepts dashed, underscored and camel-cased input:
    /// `"author-id"`, `"author_id"` and `"authorId"` all become `"AuthorID"`.
    pub fn to_field_case(&self, wire_name: &str) -> String {
        split_words(wire_name)
            .iter()
            .map(|w| self.capitalize(w))
            .collect()
    }

    fn capitalize(&self, word: &str) -> String {
        let upper = word.to_uppercase();
        if self.acronyms.contains(&upper) {
            return upper;
        }

        let lower = word.to_lowercase();
        let mut chars = lower.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Pluralize the last word of a wire name
    ///
    /// `"blog-post"` becomes `"blog-posts"`, `"category"` becomes `"categories"`.
    pub fn pluralize(&self, singular: &str) -> String {
        let split_at = singular
            .char_indices()
            .rev()
            .find(|(_, c)| !c.is_alphanumeric())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        let (head, last) = singular.split_at(split_at);

        if let Some(plural) = self.irregular_plurals.get(&last.to_lowercase()) {
            return format!("{}{}", head, plural);
        }

        if last.is_empty() {
            singular.to_string()
        } else if SIBILANT_SUFFIX_REGEX.is_match(last) {
            format!("{}es", singular)
        } else if CONSONANT_Y_REGEX.is_match(last) {
            format!("{}ies", &singular[..singular.len() - 1])
        } else {
            format!("{}s", singular)
        }
    }

    /// The wire collection key for a record type name
    pub fn collection_name(&self, type_name: &str) -> String {
        self.pluralize(&self.to_wire_case(type_name))
    }
}

impl Default for Naming {
    fn default() -> Self {
        Naming::new(&DecodeConfig::default())
    }
}
