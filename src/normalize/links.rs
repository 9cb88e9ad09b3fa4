/// Resolve an href against the source's base URL. Absolute hrefs pass
/// through; anything else is joined with exactly one slash.
pub fn absolute(base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        href.trim_start_matches('/')
    )
}

/// Infer a link title from an anchor label. Low-information labels get a
/// canonical replacement ("map it" anchors are map links on boardbook).
pub fn infer_title(label: &str) -> String {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return "Link".to_string();
    }
    if trimmed.eq_ignore_ascii_case("map it") {
        return "Map Link".to_string();
    }
    trimmed.to_string()
}
