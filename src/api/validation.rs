use crate::constants::limits::DEFAULT_PAGE;

/// Reads `page` from a raw query string. Missing, non-numeric and
/// non-positive values fall back to page 1; a leading run of digits is
/// honoured (`2abc` is page 2).
#[must_use]
pub fn page_from_query(query: Option<&str>) -> u32 {
    query
        .and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(key, _)| key == "page")
                .map(|(_, value)| parse_page(&value))
        })
        .unwrap_or(DEFAULT_PAGE)
}

#[must_use]
pub fn parse_page(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end]
        .parse::<u32>()
        .ok()
        .filter(|page| *page >= 1)
        .unwrap_or(DEFAULT_PAGE)
}
