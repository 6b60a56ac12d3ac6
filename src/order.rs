//! Provider ordering: preference, fallbacks, and the CJK locale override.

use tracing::debug;

use crate::query::contains_cjk;

/// Curated provider order for queries written in CJK ideographs.
pub const CJK_PROVIDER_ORDER: &[&str] = &[
    "ali_unified_search",
    "baidu",
    "bing",
    "duckduckgo",
    "google",
];

/// Computes the order in which providers are consulted for `query`.
///
/// `registered` lists the available provider names in registry order.
/// The preferred provider comes first, then the fallbacks, then every other
/// registered provider. A CJK query uses [`CJK_PROVIDER_ORDER`] restricted to
/// registered names instead; that list is empty when none of them is
/// registered.
pub fn provider_order(
    query: &str,
    registered: &[String],
    preferred: &str,
    fallbacks: &[String],
) -> Vec<String> {
    let is_registered = |name: &str| registered.iter().any(|r| r == name);

    if contains_cjk(query) {
        let curated: Vec<String> = CJK_PROVIDER_ORDER
            .iter()
            .filter(|name| is_registered(name))
            .map(|name| name.to_string())
            .collect();
        debug!(order = ?curated, "using CJK provider order");
        return curated;
    }

    let mut order: Vec<String> = Vec::with_capacity(registered.len());
    let candidates = std::iter::once(preferred)
        .chain(fallbacks.iter().map(String::as_str))
        .map(str::to_lowercase)
        .chain(registered.iter().cloned());

    for name in candidates {
        if is_registered(&name) && !order.contains(&name) {
            order.push(name);
        }
    }

    order
}
