use std::collections::HashMap;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use scraper::Html;
use tracing::debug;
use url::Url;

use crate::models::Listing;
use crate::text::{extract_price, normalize_whitespace};

/// Characters searched on each side of an anchor for nearby price text.
const PRICE_WINDOW: usize = 1500;

// Product anchors look like <a href=".../product/12345/...">…</a>; the id is
// the digit run right after /product/.
static PRODUCT_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a[^>]+href="([^"]*/product/([0-9]+)(?:/[^"]*)?)"[^>]*>(.*?)</a>"#).unwrap()
});

/// Scan raw category-page markup for product anchors.
///
/// Listings come back keyed by product id in document order; when an id's
/// anchor appears more than once only the first occurrence counts. The grid
/// rarely puts the price inside the anchor itself, so each listing's price
/// is picked up in a second pass over the text surrounding its anchor.
pub fn extract_listings(html: &str, base_url: &str) -> IndexMap<String, Listing> {
    let mut found: IndexMap<String, Listing> = IndexMap::new();
    let mut anchor_offsets: HashMap<String, usize> = HashMap::new();

    for caps in PRODUCT_ANCHOR.captures_iter(html) {
        let id = &caps[2];
        if found.contains_key(id) {
            continue;
        }

        let title = anchor_text(&caps[3]);
        let title = if title.is_empty() {
            format!("商品 {id}")
        } else {
            title
        };

        anchor_offsets.insert(id.to_string(), caps.get(0).map_or(0, |m| m.start()));
        found.insert(
            id.to_string(),
            Listing {
                id: id.to_string(),
                url: absolutize(base_url, &caps[1]),
                title,
                price: None,
            },
        );
    }

    for (id, listing) in found.iter_mut() {
        let pos = anchor_offsets.get(id).copied().unwrap_or(0);
        let neighborhood = normalize_whitespace(char_window(html, pos, PRICE_WINDOW));
        if let Some(price) = extract_price(&neighborhood) {
            listing.price = Some(price);
        }
    }

    debug!("{} unique product ids in markup", found.len());
    found
}

// Anchor bodies are usually an <img> wrapped in layout markup; parse the
// fragment and keep just its text.
fn anchor_text(inner_html: &str) -> String {
    let fragment = Html::parse_fragment(inner_html);
    let text = fragment.root_element().text().collect::<Vec<_>>().join(" ");
    normalize_whitespace(&text)
}

// A href that resolves against the page URL becomes absolute; anything the
// URL parser rejects is kept verbatim.
fn absolutize(base: &str, href: &str) -> String {
    Url::parse(base)
        .and_then(|b| b.join(href))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

// Slice `radius` characters around byte position `pos` without splitting a
// code point. `pos` must sit on a char boundary; regex match offsets do.
fn char_window(html: &str, pos: usize, radius: usize) -> &str {
    let start = html[..pos]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map_or(pos, |(i, _)| i);
    let end = html[pos..]
        .char_indices()
        .nth(radius)
        .map_or(html.len(), |(i, _)| pos + i);
    &html[start..end]
}
