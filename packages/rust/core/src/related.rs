//! Sibling ("related pages") view model.

use serde::Serialize;

use sitenav_shared::Page;
use sitenav_sitemap::SitemapIndex;
use sitenav_sitemap::path::parent_path;

use crate::view::PageLink;

/// Siblings of the current page, split at the visible limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RelatedView {
    /// No siblings; render the message instead of an empty list.
    Empty { message: String },
    /// At least one sibling.
    List {
        /// Shown immediately.
        visible: Vec<PageLink>,
        /// Revealed by the "show more" control.
        hidden: Vec<PageLink>,
    },
}

impl RelatedView {
    /// Links to display, given whether "show more" has been activated.
    pub fn shown(&self, expanded: bool) -> Vec<&PageLink> {
        match self {
            Self::Empty { .. } => Vec::new(),
            Self::List { visible, hidden } if expanded => visible.iter().chain(hidden).collect(),
            Self::List { visible, .. } => visible.iter().collect(),
        }
    }

    /// Whether a "show more" control is needed.
    pub fn has_more(&self) -> bool {
        matches!(self, Self::List { hidden, .. } if !hidden.is_empty())
    }

    pub fn total(&self) -> usize {
        match self {
            Self::Empty { .. } => 0,
            Self::List { visible, hidden } => visible.len() + hidden.len(),
        }
    }
}

/// List the pages sharing the current page's parent, excluding the page itself.
///
/// The parent comes from the resolved page's URL when there is one, else from
/// the raw current path.
pub fn derive(
    index: &SitemapIndex,
    current_path: &str,
    page: Option<&Page>,
    limit: usize,
    empty_message: &str,
) -> RelatedView {
    let own_url = page.map_or(current_path, |p| p.url.as_str());
    let trimmed = own_url.strip_suffix('/').filter(|u| !u.is_empty());
    let is_self = |url: &str| url == own_url || Some(url) == trimmed;

    let mut siblings: Vec<PageLink> = index
        .children(&parent_path(own_url))
        .into_iter()
        .filter(|p| !is_self(p.url.as_str()))
        .map(PageLink::from_page)
        .collect();

    if siblings.is_empty() {
        return RelatedView::Empty {
            message: empty_message.to_string(),
        };
    }

    let hidden = siblings.split_off(limit.min(siblings.len()));
    RelatedView::List {
        visible: siblings,
        hidden,
    }
}
