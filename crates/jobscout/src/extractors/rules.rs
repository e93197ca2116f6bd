// ABOUTME: Declarative rule tables: which selectors or element patterns each job field tries, in order.
// ABOUTME: Defines Field, SelectorRule, ElementPattern and the immutable FieldRules mapping.

//! Field rule definitions.
//!
//! A rule is either a CSS selector or an [`ElementPattern`]. Each field owns an
//! ordered list of rules; the runner in [`crate::extractors::select`] tries them
//! in order and the first rule that produces non-empty text wins. There is no
//! scoring or voting across rules.
//!
//! The built-in tables are compiled once per process and cloned into each
//! [`FieldRules`] value. Config files can replace the list for individual
//! fields with [`FieldRules::with_overrides`].

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A named attribute of a job record that is extracted from a posting element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Location,
    Description,
    Url,
    DatePosted,
    Department,
    EmploymentType,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Title,
        Field::Location,
        Field::Description,
        Field::Url,
        Field::DatePosted,
        Field::Department,
        Field::EmploymentType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Location => "location",
            Field::Description => "description",
            Field::Url => "url",
            Field::DatePosted => "date_posted",
            Field::Department => "department",
            Field::EmploymentType => "employment_type",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a selector cascade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectorRule {
    /// A CSS selector, e.g. `[class*="location"]` or `time`
    Css(String),
    /// A predicate over elements that CSS cannot express
    Pattern(ElementPattern),
}

impl SelectorRule {
    pub fn css(selector: impl Into<String>) -> Self {
        SelectorRule::Css(selector.into())
    }
}

/// Element predicates used where a plain selector is not enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementPattern {
    /// Tag name is one of `tags` (any tag when empty) and a class token or the
    /// element's own text contains one of `keywords`, ignoring ASCII case.
    Keywords {
        #[serde(default)]
        tags: Vec<String>,
        keywords: Vec<String>,
    },
    /// The element has an `h1`-`h6` descendant.
    ContainsHeading,
}

impl ElementPattern {
    pub fn keywords<T, K>(tags: T, keywords: K) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        K: IntoIterator,
        K::Item: Into<String>,
    {
        ElementPattern::Keywords {
            tags: tags.into_iter().map(Into::into).collect(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

const TITLE_RULES: &[&str] = &[
    "h1, h2, h3, h4, h5, h6",
    "[class*=\"title\"]",
    "[class*=\"position\"]",
    "[class*=\"role\"]",
    "[class*=\"job-name\"]",
    "a",
];

const LOCATION_RULES: &[&str] = &[
    "[class*=\"location\"]",
    "[class*=\"place\"]",
    "[class*=\"city\"]",
    "[class*=\"region\"]",
    "[data-location]",
    "[class*=\"address\"]",
];

const DESCRIPTION_RULES: &[&str] = &[
    "[class*=\"description\"]",
    "[class*=\"summary\"]",
    "[class*=\"details\"]",
    "[class*=\"content\"]",
    "p",
];

const DEPARTMENT_RULES: &[&str] = &[
    "[class*=\"department\"]",
    "[class*=\"team\"]",
    "[class*=\"category\"]",
    "[class*=\"function\"]",
];

const EMPLOYMENT_TYPE_RULES: &[&str] = &[
    "[class*=\"type\"]",
    "[class*=\"employment\"]",
    "[class*=\"contract\"]",
    "[class*=\"work-type\"]",
];

const DATE_POSTED_RULES: &[&str] = &[
    "[class*=\"date\"]",
    "[class*=\"posted\"]",
    "[class*=\"published\"]",
    "time",
    "[datetime]",
];

// Links are resolved by href, not text
const URL_RULES: &[&str] = &["a[href]"];

fn table(field: Field) -> &'static [&'static str] {
    match field {
        Field::Title => TITLE_RULES,
        Field::Location => LOCATION_RULES,
        Field::Description => DESCRIPTION_RULES,
        Field::Url => URL_RULES,
        Field::DatePosted => DATE_POSTED_RULES,
        Field::Department => DEPARTMENT_RULES,
        Field::EmploymentType => EMPLOYMENT_TYPE_RULES,
    }
}

static DEFAULT_FIELD_RULES: Lazy<FieldRules> = Lazy::new(|| {
    let rules = Field::ALL
        .iter()
        .map(|&field| {
            let list = table(field).iter().map(|&css| SelectorRule::css(css)).collect();
            (field, list)
        })
        .collect();
    FieldRules { rules }
});

/// Immutable mapping from field to its ordered rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldRules {
    rules: HashMap<Field, Vec<SelectorRule>>,
}

impl FieldRules {
    /// Rules with no entries for any field. Every lookup misses.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// The ordered rules for `field`; empty when the field has none.
    pub fn get(&self, field: Field) -> &[SelectorRule] {
        self.rules.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace the rule list of each field present in `overrides`.
    pub fn with_overrides(mut self, overrides: HashMap<Field, Vec<SelectorRule>>) -> Self {
        self.rules.extend(overrides);
        self
    }

    /// Replace the rule list of a single field.
    pub fn with_field(mut self, field: Field, rules: Vec<SelectorRule>) -> Self {
        self.rules.insert(field, rules);
        self
    }

    /// All CSS selector strings across every field, for cache warm-up.
    pub fn css_selectors(&self) -> impl Iterator<Item = &str> {
        self.rules.values().flatten().filter_map(|rule| match rule {
            SelectorRule::Css(css) => Some(css.as_str()),
            SelectorRule::Pattern(_) => None,
        })
    }
}

impl Default for FieldRules {
    fn default() -> Self {
        DEFAULT_FIELD_RULES.clone()
    }
}
