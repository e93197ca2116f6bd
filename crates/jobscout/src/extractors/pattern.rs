// ABOUTME: Compiled form of ElementPattern predicates for repeated matching over a DOM.
// ABOUTME: Keyword patterns use an ASCII case-insensitive Aho-Corasick automaton over class tokens and own text.

use aho_corasick::AhoCorasick;
use ego_tree::NodeRef;
use scraper::{ElementRef, Node};

use crate::extractors::compiled::get_or_compile;
use crate::extractors::rules::ElementPattern;

const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

/// An [`ElementPattern`] ready to be tested against many elements.
#[derive(Debug)]
pub enum PatternMatcher {
    Keywords {
        tags: Vec<String>,
        keywords: Option<AhoCorasick>,
    },
    ContainsHeading,
}

impl PatternMatcher {
    pub fn compile(pattern: &ElementPattern) -> Self {
        match pattern {
            ElementPattern::Keywords { tags, keywords } => {
                let automaton = AhoCorasick::builder()
                    .ascii_case_insensitive(true)
                    .build(keywords)
                    .ok();
                PatternMatcher::Keywords {
                    tags: tags.iter().map(|t| t.to_ascii_lowercase()).collect(),
                    keywords: automaton,
                }
            }
            ElementPattern::ContainsHeading => PatternMatcher::ContainsHeading,
        }
    }

    pub fn matches(&self, element: ElementRef<'_>) -> bool {
        match self {
            PatternMatcher::Keywords { tags, keywords } => {
                let Some(ac) = keywords else {
                    return false;
                };
                let name = element.value().name();
                if !tags.is_empty() && !tags.iter().any(|t| t == name) {
                    return false;
                }
                element.value().classes().any(|class| ac.is_match(class))
                    || ac.is_match(&own_text(*element))
            }
            PatternMatcher::ContainsHeading => match get_or_compile(HEADING_SELECTOR) {
                Some(sel) => element.select(&sel).next().is_some(),
                None => false,
            },
        }
    }
}

/// Text of the node's direct text children, without descending into child elements.
fn own_text(node: NodeRef<'_, Node>) -> String {
    node.children()
        .filter_map(|child| child.value().as_text())
        .map(|text| &**text)
        .collect()
}
