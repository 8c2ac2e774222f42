//! Breadcrumb view model.
//!
//! A page's stored `breadcrumb_html` is preferred. Without it (or when it
//! yields nothing usable) the trail is synthesized from the path segments.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use sitenav_shared::Page;
use sitenav_sitemap::SitemapIndex;
use sitenav_sitemap::path::{humanize_segment, segments};
use url::Url;

/// Anchors and spans, in document order.
static CRUMB_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a, span").expect("crumb selector"));

static ANCHOR_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("anchor selector"));

/// One step of the trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub label: String,
    /// Link target; `None` for plain-text crumbs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Marks the crumb for the page being viewed.
    pub current: bool,
}

impl Crumb {
    fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: Some(href.into()),
            current: false,
        }
    }

    fn text(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: None,
            current: false,
        }
    }
}

/// Where the crumbs came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrumbSource {
    /// Parsed from the page's `breadcrumb_html`.
    Stored,
    /// Built from the current path's segments.
    Synthesized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbView {
    pub source: CrumbSource,
    pub crumbs: Vec<Crumb>,
}

/// Build the trail for `current_path`, preferring the page's stored markup.
pub fn derive(index: &SitemapIndex, current_path: &str, page: Option<&Page>) -> BreadcrumbView {
    let stored = page
        .and_then(|p| p.breadcrumb_html.as_deref())
        .map(from_markup)
        .filter(|crumbs| !crumbs.is_empty());

    match stored {
        Some(crumbs) => BreadcrumbView {
            source: CrumbSource::Stored,
            crumbs,
        },
        None => BreadcrumbView {
            source: CrumbSource::Synthesized,
            crumbs: synthesize(index, current_path),
        },
    }
}

/// Extract crumbs from breadcrumb markup.
///
/// `<a href>` with a relative or `http(s)` target becomes a link; other
/// anchors become text. A `<span>` outside any anchor becomes the
/// current (unlinked) crumb. Separators and other text are ignored.
pub fn from_markup(html: &str) -> Vec<Crumb> {
    let fragment = Html::parse_fragment(html);

    fragment
        .select(&CRUMB_SEL)
        .filter_map(|el| {
            let label = collapse_whitespace(el);
            if label.is_empty() {
                return None;
            }

            match el.value().name() {
                "a" => Some(match el.value().attr("href").map(str::trim) {
                    Some(href) if is_navigable(href) => Crumb::link(label, href),
                    _ => Crumb::text(label),
                }),
                _ if inside_anchor(el) || el.select(&ANCHOR_SEL).next().is_some() => None,
                _ => Some(Crumb {
                    current: true,
                    ..Crumb::text(label)
                }),
            }
        })
        .collect()
}

/// Relative references and `http(s)` URLs. Other schemes (`javascript:`,
/// `data:`) are rendered as plain text.
fn is_navigable(href: &str) -> bool {
    if href.is_empty() {
        return false;
    }
    match Url::parse(href) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(url::ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}

/// Walk the path left to right, naming each prefix after its page if the
/// sitemap has one and after the raw segment otherwise.
pub fn synthesize(index: &SitemapIndex, current_path: &str) -> Vec<Crumb> {
    let mut prefix = String::new();
    let mut crumbs: Vec<Crumb> = segments(current_path)
        .map(|segment| {
            prefix.push('/');
            prefix.push_str(segment);

            match index.get(&prefix) {
                Some(page) if !page.title.is_empty() => Crumb::link(&page.title, &page.url),
                Some(page) => Crumb::link(humanize_segment(segment), &page.url),
                None => Crumb::text(humanize_segment(segment)),
            }
        })
        .collect();

    if let Some(last) = crumbs.last_mut() {
        last.href = None;
        last.current = true;
    }

    crumbs
}

fn collapse_whitespace(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn inside_anchor(el: ElementRef<'_>) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| a.value().name() == "a")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> SitemapIndex {
        SitemapIndex::from_csv(
            "title,url,breadcrumb_html\n\
             India,/india,\n\
             Temples,/india/heritage/temples,\"<a href=\"\"/india\"\">India</a> &rsaquo; <span>Temples</span>\"\n\
             Broken,/broken,\"&rsaquo;\"\n",
            "home",
        )
    }

    #[test]
    fn stored_markup_is_preferred() {
        let idx = index();
        let page = idx.get("/india/heritage/temples");
        let view = derive(&idx, "/india/heritage/temples", page);

        assert_eq!(view.source, CrumbSource::Stored);
        assert_eq!(
            view.crumbs,
            vec![
                Crumb::link("India", "/india"),
                Crumb {
                    label: "Temples".into(),
                    href: None,
                    current: true,
                },
            ]
        );
    }

    #[test]
    fn unusable_markup_falls_back_to_synthesis() {
        let idx = index();
        let view = derive(&idx, "/broken", idx.get("/broken"));
        assert_eq!(view.source, CrumbSource::Synthesized);
        assert_eq!(view.crumbs.len(), 1);
        assert_eq!(view.crumbs[0].label, "Broken");
    }

    #[test]
    fn synthesized_trail_mixes_pages_and_segments() {
        let idx = index();
        let view = derive(&idx, "/india/hill-forts/amber-fort", None);

        assert_eq!(view.source, CrumbSource::Synthesized);
        assert_eq!(
            view.crumbs,
            vec![
                Crumb::link("India", "/india"),
                Crumb::text("hill forts"),
                Crumb {
                    label: "amber fort".into(),
                    href: None,
                    current: true,
                },
            ]
        );
    }

    #[test]
    fn known_current_page_uses_its_title_without_link() {
        let idx = index();
        let crumbs = synthesize(&idx, "/india/");
        assert_eq!(crumbs.len(), 1);
        assert_eq!(crumbs[0].label, "India");
        assert!(crumbs[0].href.is_none());
        assert!(crumbs[0].current);
    }

    #[test]
    fn root_path_has_no_crumbs() {
        assert!(synthesize(&index(), "/").is_empty());
    }

    #[test]
    fn markup_with_nested_elements() {
        let crumbs = from_markup(
            "<nav><a href=\"/\"><span>Home</span></a> / \
             <a href=\" /india \">  India\n </a> / \
             <a>No link</a> / <span><b>Here</b></span></nav>",
        );
        assert_eq!(
            crumbs,
            vec![
                Crumb::link("Home", "/"),
                Crumb::link("India", "/india"),
                Crumb::text("No link"),
                Crumb {
                    label: "Here".into(),
                    href: None,
                    current: true,
                },
            ]
        );
    }

    #[test]
    fn script_hrefs_become_plain_text() {
        let crumbs = from_markup(
            "<a href=\"javascript:alert(1)\">Evil</a> \
             <a href=\" JavaScript:alert(1)\">Mixed</a> \
             <a href=\"data:text/html,x\">Data</a> \
             <a href=\"https://example.com/india\">India</a> \
             <a href=\"//example.com/about\">About</a> \
             <a href=\"../temples\">Temples</a>",
        );
        assert_eq!(
            crumbs,
            vec![
                Crumb::text("Evil"),
                Crumb::text("Mixed"),
                Crumb::text("Data"),
                Crumb::link("India", "https://example.com/india"),
                Crumb::link("About", "//example.com/about"),
                Crumb::link("Temples", "../temples"),
            ]
        );
    }

    #[test]
    fn span_wrapping_anchor_is_not_duplicated() {
        let crumbs = from_markup("<span><a href=\"/india\">India</a></span>");
        assert_eq!(crumbs, vec![Crumb::link("India", "/india")]);
    }
}
