// ABOUTME: Pre-compiled CSS selector cache shared by the listing locator and field rules.
// ABOUTME: Each selector string is parsed once per process; invalid selectors are cached as misses.

//! Selector caching for repeated DOM queries.
//!
//! Every posting element on a page runs the same few dozen selectors, so
//! parsing them per call would dominate extraction time. The cache compiles a
//! selector string on first use and hands out clones afterwards.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use scraper::Selector;

static SELECTOR_CACHE: Lazy<RwLock<HashMap<String, Option<Selector>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Gets or compiles a CSS selector, caching the result.
///
/// Returns `None` for selectors that fail to parse. A poisoned lock is treated
/// as a cold cache and the selector is compiled without caching.
pub fn get_or_compile(css: &str) -> Option<Selector> {
    if let Ok(cache) = SELECTOR_CACHE.read() {
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
    }

    let compiled = Selector::parse(css).ok();
    if let Ok(mut cache) = SELECTOR_CACHE.write() {
        // Another thread may have inserted while we were compiling
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
        cache.insert(css.to_string(), compiled.clone());
    }
    compiled
}

/// Precompiles a batch of selectors into the cache.
pub fn precompile_selectors<I, S>(selectors: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let Ok(mut cache) = SELECTOR_CACHE.write() else {
        return;
    };
    for css in selectors {
        let css = css.as_ref();
        if !cache.contains_key(css) {
            cache.insert(css.to_string(), Selector::parse(css).ok());
        }
    }
}
