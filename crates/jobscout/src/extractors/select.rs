// ABOUTME: Generic first-match-wins rule runner shared by every field of a posting element.
// ABOUTME: Resolves a rule to the first matching descendant and returns its trimmed text content.

//! Rule-based lookups inside one posting element.
//!
//! Key behaviors:
//! - Rules are tried in order; the first rule yielding non-empty text wins.
//! - A CSS rule runs as a structural query first. When it finds nothing and the
//!   rule is a bare tag name, a tag-name-only scan of the descendants follows
//!   as a second probe within the same step.
//! - Only the first element a rule matches is considered. If its text is blank
//!   the rule counts as a miss and the next rule is tried.
//! - Invalid selectors are misses, never errors.

use scraper::ElementRef;

use crate::extractors::compiled::get_or_compile;
use crate::extractors::pattern::PatternMatcher;
use crate::extractors::rules::SelectorRule;

/// Text content of an element and its descendants, trimmed at both ends.
///
/// Text nodes are concatenated as-is, so inline markup inside a word does not
/// split it and internal whitespace is kept.
pub fn element_text(element: ElementRef<'_>) -> String {
    let text: String = element.text().collect();
    text.trim().to_string()
}

/// Returns the text of the first rule that produces a non-empty result.
pub fn first_text(element: ElementRef<'_>, rules: &[SelectorRule]) -> Option<String> {
    rules.iter().find_map(|rule| {
        let found = first_match(element, rule)?;
        let text = element_text(found);
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    })
}

/// Returns the trimmed `attr` value of the first rule whose match carries a
/// non-empty value for it.
pub fn first_attr(element: ElementRef<'_>, rules: &[SelectorRule], attr: &str) -> Option<String> {
    rules.iter().find_map(|rule| {
        let found = first_match(element, rule)?;
        let value = found.value().attr(attr)?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    })
}

/// Resolves one rule to the first matching descendant of `element`.
pub fn first_match<'a>(element: ElementRef<'a>, rule: &SelectorRule) -> Option<ElementRef<'a>> {
    match rule {
        SelectorRule::Css(css) => select_first(element, css).or_else(|| find_by_tag(element, css)),
        SelectorRule::Pattern(pattern) => {
            let matcher = PatternMatcher::compile(pattern);
            descendants(element).find(|el| matcher.matches(*el))
        }
    }
}

fn select_first<'a>(element: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = get_or_compile(css)?;
    element.select(&selector).next()
}

/// Tag-name-only probe; covers tag names the CSS parser rejects, such as
/// namespaced custom elements.
fn find_by_tag<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    let tag = tag.trim();
    if !is_bare_tag_name(tag) {
        return None;
    }
    descendants(element).find(|el| el.value().name().eq_ignore_ascii_case(tag))
}

fn is_bare_tag_name(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':')
}

/// Element descendants in document order, excluding `element` itself.
pub fn descendants<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.descendants().skip(1).filter_map(ElementRef::wrap)
}
