//! Top-level section links.

use serde::Serialize;

use sitenav_shared::WidgetConfig;
use sitenav_sitemap::SitemapIndex;
use sitenav_sitemap::path::first_segment;

use crate::view::display_title;

/// Quick link to a section's representative page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopLink {
    /// Section key (first path segment).
    pub key: String,
    pub title: String,
    pub url: String,
    /// Icon name from config, or the fallback icon.
    pub icon: String,
    /// Accessible name for the link.
    pub aria_label: String,
    /// The current path belongs to this section.
    pub active: bool,
}

/// Links for each configured section key present in the sitemap, in the
/// configured order.
pub fn derive(index: &SitemapIndex, current_path: &str, config: &WidgetConfig) -> Vec<TopLink> {
    let current_key = first_segment(current_path, &config.home_section);

    config
        .top_level_order
        .iter()
        .filter_map(|key| {
            let page = index.representative(key)?;
            let title = display_title(page);

            Some(TopLink {
                key: key.clone(),
                aria_label: format!("Go to {title}"),
                title,
                url: page.url.clone(),
                icon: config.icon_for(key).to_string(),
                active: *key == current_key,
            })
        })
        .collect()
}
