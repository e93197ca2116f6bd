// ABOUTME: Link and source-URL helpers: posting URL lookup with ancestor fallback and company derivation.
// ABOUTME: All failures degrade to an empty string or the raw input; nothing here returns an error.

use scraper::ElementRef;
use url::Url;

use crate::extractors::rules::SelectorRule;
use crate::extractors::select::first_attr;

/// How many ancestor levels the posting URL lookup climbs by default.
pub const DEFAULT_ANCESTOR_DEPTH: usize = 3;

/// Joins `href` onto `base` with standard URL resolution.
///
/// Relative paths, protocol-relative and absolute hrefs all go through
/// [`Url::join`]. Returns `None` when either side cannot be parsed.
pub fn resolve_href(base: &str, href: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    base.join(href.trim()).ok().map(String::from)
}

/// Finds the posting's link and returns it as an absolute URL.
///
/// Looks inside `element` first, then inside each ancestor up to
/// `ancestor_depth` levels up. The first link found is the answer, even when
/// it cannot be resolved against `source_url`.
pub fn extract_posting_url(
    element: ElementRef<'_>,
    link_rules: &[SelectorRule],
    source_url: &str,
    ancestor_depth: usize,
) -> String {
    let mut scopes = std::iter::once(element).chain(
        element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .take(ancestor_depth),
    );

    scopes
        .find_map(|scope| first_attr(scope, link_rules, "href"))
        .and_then(|href| resolve_href(source_url, &href))
        .unwrap_or_default()
}

/// Derives a display company name from a career page URL.
///
/// `https://www.acme.io/careers` becomes `Acme`. Input without a `//`
/// separator, or whose host yields no usable label, is returned unchanged.
pub fn company_from_url(url: &str) -> String {
    let Some((_, rest)) = url.split_once("//") else {
        return url.to_string();
    };
    let host = rest.split('/').next().unwrap_or(rest);
    let host = host.strip_prefix("www.").unwrap_or(host);
    let label = host.split('.').next().unwrap_or(host);
    if label.is_empty() {
        return url.to_string();
    }
    capitalize(label)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
