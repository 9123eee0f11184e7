use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

static ANCHOR_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
static DETAIL_HREF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^/company/[0-9]{4}/").unwrap());

/// Collect absolute detail-page URLs (`/company/YYYY/...`) from the listing page,
/// in document order. A company linked twice appears twice.
pub fn extract_detail_urls(doc: &Html, base_url: &str) -> Vec<String> {
    let base = base_url.trim_end_matches('/');
    let mut urls = Vec::new();

    for a in doc.select(&ANCHOR_SEL) {
        let Some(href) = a.value().attr("href") else {
            continue;
        };
        if href.is_empty() || !DETAIL_HREF_RE.is_match(href) {
            continue;
        }
        urls.push(format!("{}{}", base, href));
    }

    urls
}

// ── Tests ──
