//! Core domain types for SiteNav.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// One sitemap row that survived indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Opaque identifier from the `page_id` column.
    pub page_id: String,
    /// Display title.
    pub title: String,
    /// Site path, always starting with `/`.
    pub url: String,
    /// Pre-rendered ancestor chain markup, if the sitemap provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breadcrumb_html: Option<String>,
}

impl Page {
    /// Whether this page carries its own breadcrumb markup.
    pub fn has_breadcrumb(&self) -> bool {
        self.breadcrumb_html
            .as_deref()
            .is_some_and(|html| !html.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(breadcrumb_html: Option<&str>) -> Page {
        Page {
            page_id: "1".into(),
            title: "Temples".into(),
            url: "/india/heritage/temples".into(),
            breadcrumb_html: breadcrumb_html.map(String::from),
        }
    }

    #[test]
    fn page_serialization_skips_missing_breadcrumb() {
        let json = serde_json::to_string(&page(None)).expect("serialize");
        assert!(!json.contains("breadcrumb_html"));

        let parsed: Page = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.url, "/india/heritage/temples");
        assert!(parsed.breadcrumb_html.is_none());
    }

    #[test]
    fn blank_breadcrumb_does_not_count() {
        assert!(!page(Some("   ")).has_breadcrumb());
        assert!(page(Some("<a href=\"/india\">India</a>")).has_breadcrumb());
    }
}
