//! Plain-data view of the whole widget.
//!
//! Derivation is pure: index + current path + config in, view out. The
//! [`render`](crate::render) module turns a view into markup.

use serde::Serialize;
use tracing::debug;

use sitenav_shared::{Page, WidgetConfig};
use sitenav_sitemap::SitemapIndex;
use sitenav_sitemap::path::{humanize_segment, segments};

use crate::breadcrumb::{self, BreadcrumbView};
use crate::fallback::{self, DegradedView};
use crate::related::{self, RelatedView};
use crate::resolver;
use crate::toplinks::{self, TopLink};

/// A titled link to a sitemap page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub title: String,
    pub url: String,
}

impl PageLink {
    /// Link for a page; untitled pages are named after their last segment.
    pub fn from_page(page: &Page) -> Self {
        Self {
            title: display_title(page),
            url: page.url.clone(),
        }
    }
}

/// Title to show for a page.
pub(crate) fn display_title(page: &Page) -> String {
    if !page.title.is_empty() {
        return page.title.clone();
    }
    segments(&page.url)
        .last()
        .map(humanize_segment)
        .unwrap_or_else(|| page.url.clone())
}

/// Navigation derived from a loaded sitemap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveView {
    pub current_path: String,
    /// The sitemap row for the current path, if there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_page: Option<Page>,
    pub breadcrumb: BreadcrumbView,
    pub related: RelatedView,
    pub top_links: Vec<TopLink>,
}

/// What the widget shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum NavView {
    Live(LiveView),
    /// The sitemap could not be retrieved.
    Degraded(DegradedView),
}

impl NavView {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }

    pub fn current_path(&self) -> &str {
        match self {
            Self::Live(live) => &live.current_path,
            Self::Degraded(degraded) => &degraded.current_path,
        }
    }
}

/// Project the index onto the current path.
pub fn derive_view(index: &SitemapIndex, current_path: &str, config: &WidgetConfig) -> LiveView {
    let page = resolver::current_page(index, current_path);
    if page.is_none() {
        debug!(path = current_path, "current path not in sitemap");
    }

    let breadcrumb = breadcrumb::derive(index, current_path, page);
    let related = related::derive(
        index,
        current_path,
        page,
        config.sibling_limit,
        &config.empty_message,
    );
    let top_links = toplinks::derive(index, current_path, config);

    LiveView {
        current_path: current_path.to_string(),
        current_page: page.cloned(),
        breadcrumb,
        related,
        top_links,
    }
}

/// View shown when the sitemap is unavailable.
pub fn degraded_view(current_path: &str, config: &WidgetConfig) -> NavView {
    NavView::Degraded(fallback::degraded(current_path, config))
}
