//! URL normalisation, deduplication, and provider-preference ranking.

use std::collections::HashSet;

use url::Url;

use crate::MergedResult;

/// Computes the deduplication key of a URL: scheme, host, and path,
/// lowercased, with query string and fragment removed.
///
/// A non-default port stays part of the key. Input that does not parse as
/// an absolute URL is lowercased unchanged.
pub fn normalize_url_key(raw: &str) -> String {
    let Ok(parsed) = Url::parse(raw.trim()) else {
        return raw.trim().to_lowercase();
    };

    let host = parsed.host_str().unwrap_or_default();
    let key = match parsed.port() {
        Some(port) => format!("{}://{}:{}{}", parsed.scheme(), host, port, parsed.path()),
        None => format!("{}://{}{}", parsed.scheme(), host, parsed.path()),
    };
    key.to_lowercase()
}

/// Removes duplicate URLs and orders the survivors by provider preference,
/// then by each provider's own position.
///
/// Items are first sorted by (provider rank, native position); the first
/// occurrence of a normalised URL in that order wins. Sources missing from
/// `order` sort after all known ones. Positions are reassigned from 1 and
/// the list is cut to `limit`.
pub fn dedup_and_rank(mut items: Vec<MergedResult>, order: &[String], limit: usize) -> Vec<MergedResult> {
    let provider_rank = |source: &str| {
        order
            .iter()
            .position(|name| name.eq_ignore_ascii_case(source))
            .unwrap_or(order.len())
    };
    items.sort_by_key(|item| (provider_rank(&item.source), item.position));

    let mut seen = HashSet::new();
    let mut ranked: Vec<MergedResult> = items
        .into_iter()
        .filter(|item| seen.insert(normalize_url_key(&item.url)))
        .take(limit)
        .collect();

    for (i, item) in ranked.iter_mut().enumerate() {
        item.position = i as u32 + 1;
    }
    ranked
}
