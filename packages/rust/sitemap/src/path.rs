//! Site path helpers shared by the indexer and the navigation views.

/// Non-empty `/`-separated segments of a path.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Ensure a trimmed URL starts with `/`. Returns `None` for blank input.
pub fn normalize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('/') {
        Some(trimmed.to_string())
    } else {
        Some(format!("/{trimmed}"))
    }
}

/// Lowercased first segment, or `home_section` for the root path.
pub fn first_segment(path: &str, home_section: &str) -> String {
    segments(path)
        .next()
        .map(str::to_lowercase)
        .unwrap_or_else(|| home_section.to_string())
}

/// Path without its last segment. One or zero segments → `/`.
pub fn parent_path(path: &str) -> String {
    let parts: Vec<&str> = segments(path).collect();
    if parts.len() <= 1 {
        return "/".to_string();
    }
    format!("/{}", parts[..parts.len() - 1].join("/"))
}

/// Readable label for a raw segment (`hill-forts` → `hill forts`).
pub fn humanize_segment(segment: &str) -> String {
    segment.replace('-', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_prepends_slash() {
        assert_eq!(normalize_url("india").as_deref(), Some("/india"));
        assert_eq!(normalize_url("  /india/ ").as_deref(), Some("/india/"));
        assert_eq!(normalize_url("   "), None);
        assert_eq!(normalize_url(""), None);
    }

    #[test]
    fn first_segment_lowercases_and_falls_back() {
        assert_eq!(first_segment("/India/Heritage", "home"), "india");
        assert_eq!(first_segment("/", "home"), "home");
        assert_eq!(first_segment("//", "start"), "start");
    }

    #[test]
    fn parent_path_drops_last_segment() {
        assert_eq!(parent_path("/india/heritage/temples"), "/india/heritage");
        assert_eq!(parent_path("/india/heritage/"), "/india");
        assert_eq!(parent_path("/india"), "/");
        assert_eq!(parent_path("/"), "/");
    }

    #[test]
    fn humanize_replaces_dashes() {
        assert_eq!(humanize_segment("hill-forts-of-rajasthan"), "hill forts of rajasthan");
    }
}
