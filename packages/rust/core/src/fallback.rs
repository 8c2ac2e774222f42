//! Static navigation for when the sitemap cannot be retrieved.

use serde::Serialize;

use sitenav_shared::WidgetConfig;

use crate::view::PageLink;

/// Minimal navigation built from configured links only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegradedView {
    pub current_path: String,
    pub links: Vec<PageLink>,
}

pub fn degraded(current_path: &str, config: &WidgetConfig) -> DegradedView {
    DegradedView {
        current_path: current_path.to_string(),
        links: config
            .fallback_links
            .iter()
            .map(|link| PageLink {
                title: link.label.clone(),
                url: link.href.clone(),
            })
            .collect(),
    }
}
