use std::sync::LazyLock;

use regex::Regex;

// Currency-prefixed digits win over a bare number that only has a yen or
// tax-included suffix.
static SYMBOL_PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[¥￥]\s*([0-9,]{3,})").unwrap());
static SUFFIX_PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{4,})\s*(?:円|税込|税込み)").unwrap());

/// Collapse every whitespace run (newlines and full-width spaces included)
/// to a single space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Pull a yen price out of arbitrary listing text.
///
/// A ¥/￥-prefixed group of at least three digits is preferred; otherwise a
/// bare number of four or more digits counts if 円, 税込 or 税込み follows.
/// The result is re-grouped in thousands and prefixed with ￥.
pub fn extract_price(text: &str) -> Option<String> {
    if let Some(caps) = SYMBOL_PRICE.captures(text) {
        return Some(format_yen(&caps[1].replace(',', "")));
    }
    if let Some(caps) = SUFFIX_PRICE.captures(text) {
        return Some(format_yen(&caps[1]));
    }
    None
}

fn format_yen(digits: &str) -> String {
    let digits = digits.trim_start_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };
    format!("￥{}", group_thousands(digits))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
