//! Sitemap indexer.
//!
//! Turns tokenized CSV rows into an immutable [`SitemapIndex`]: the ordered
//! page list plus lookups by URL, by first path segment and by parent path,
//! and one representative page per section.

use std::collections::HashMap;

use tracing::{debug, instrument};

use sitenav_shared::Page;

use crate::csv::{self, Row};
use crate::path::{first_segment, normalize_url, parent_path};

/// Recognized header names.
const COL_PAGE_ID: &str = "page_id";
const COL_TITLE: &str = "title";
const COL_URL: &str = "url";
const COL_BREADCRUMB: &str = "breadcrumb_html";

// ---------------------------------------------------------------------------
// Header lookup
// ---------------------------------------------------------------------------

/// Column positions resolved from the header row. Missing columns are `None`.
#[derive(Debug, Clone, Copy, Default)]
struct Columns {
    page_id: Option<usize>,
    title: Option<usize>,
    url: Option<usize>,
    breadcrumb_html: Option<usize>,
}

impl Columns {
    fn from_header(header: &[String]) -> Self {
        let position = |name: &str| {
            header
                .iter()
                .position(|cell| cell.trim_start_matches('\u{feff}').trim() == name)
        };

        Self {
            page_id: position(COL_PAGE_ID),
            title: position(COL_TITLE),
            url: position(COL_URL),
            breadcrumb_html: position(COL_BREADCRUMB),
        }
    }

    /// Build a page from a data row, or `None` if its URL is blank.
    fn page(&self, row: &[String]) -> Option<Page> {
        let cell = |col: Option<usize>| {
            col.and_then(|i| row.get(i))
                .map(|v| v.trim())
                .unwrap_or_default()
        };

        let url = normalize_url(cell(self.url))?;
        let breadcrumb = cell(self.breadcrumb_html);

        Some(Page {
            page_id: cell(self.page_id).to_string(),
            title: cell(self.title).to_string(),
            url,
            breadcrumb_html: (!breadcrumb.is_empty()).then(|| breadcrumb.to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// SitemapIndex
// ---------------------------------------------------------------------------

/// Read-only navigation index built from one sitemap.
///
/// Pages are stored once; every lookup holds positions into `pages`.
#[derive(Debug, Clone, Default)]
pub struct SitemapIndex {
    pages: Vec<Page>,
    by_url: HashMap<String, usize>,
    by_first_segment: HashMap<String, Vec<usize>>,
    children_of: HashMap<String, Vec<usize>>,
    top_representative: HashMap<String, usize>,
    /// Section keys in first-encounter order.
    section_order: Vec<String>,
}

impl SitemapIndex {
    /// Tokenize CSV text and index it in one step.
    pub fn from_csv(text: &str, home_section: &str) -> Self {
        build_index(&csv::parse(text), home_section)
    }

    /// All indexed pages in sitemap order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Exact URL lookup. With duplicate URLs the last row wins.
    pub fn get(&self, url: &str) -> Option<&Page> {
        self.by_url.get(url).map(|&i| &self.pages[i])
    }

    /// Lookup for a resolved current path: the exact path first, then the
    /// same path without its trailing slash.
    pub fn lookup(&self, path: &str) -> Option<&Page> {
        self.get(path).or_else(|| {
            path.strip_suffix('/')
                .filter(|p| !p.is_empty())
                .and_then(|p| self.get(p))
        })
    }

    /// Pages grouped under a first-level section key, in sitemap order.
    pub fn section(&self, key: &str) -> Vec<&Page> {
        self.resolve(self.by_first_segment.get(key))
    }

    /// Pages whose parent path equals `parent`, in sitemap order.
    pub fn children(&self, parent: &str) -> Vec<&Page> {
        self.resolve(self.children_of.get(parent))
    }

    /// Shortest-URL page of a section.
    pub fn representative(&self, key: &str) -> Option<&Page> {
        self.top_representative.get(key).map(|&i| &self.pages[i])
    }

    /// Section keys in the order they first appear in the sitemap.
    pub fn section_keys(&self) -> &[String] {
        &self.section_order
    }

    fn resolve(&self, positions: Option<&Vec<usize>>) -> Vec<&Page> {
        positions
            .map(|ps| ps.iter().map(|&i| &self.pages[i]).collect())
            .unwrap_or_default()
    }
}

/// Build the index from tokenized rows. The first row is the header.
///
/// Never fails: unknown columns are ignored, missing ones read as empty,
/// and rows without a URL are dropped.
#[instrument(skip_all, fields(rows = rows.len()))]
pub fn build_index(rows: &[Row], home_section: &str) -> SitemapIndex {
    let Some((header, body)) = rows.split_first() else {
        debug!("sitemap has no header row");
        return SitemapIndex::default();
    };

    let columns = Columns::from_header(header);
    if columns.url.is_none() {
        debug!(?header, "sitemap header has no url column");
    }

    let pages: Vec<Page> = body.iter().filter_map(|row| columns.page(row)).collect();
    let dropped = body.len() - pages.len();

    let index = pages.iter().enumerate().fold(
        SitemapIndex::default(),
        |mut index, (i, page)| {
            let key = first_segment(&page.url, home_section);

            index.by_url.insert(page.url.clone(), i);
            index
                .children_of
                .entry(parent_path(&page.url))
                .or_default()
                .push(i);

            let shorter = index
                .top_representative
                .get(&key)
                .is_none_or(|&best| url_len(&page.url) < url_len(&pages[best].url));
            if shorter {
                index.top_representative.insert(key.clone(), i);
            }

            let group = index.by_first_segment.entry(key.clone()).or_default();
            if group.is_empty() {
                index.section_order.push(key);
            }
            group.push(i);

            index
        },
    );

    debug!(
        pages = pages.len(),
        dropped,
        sections = index.section_order.len(),
        "sitemap indexed"
    );

    SitemapIndex { pages, ..index }
}

/// URL length in characters, not bytes.
fn url_len(url: &str) -> usize {
    url.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = "home";

    fn index(text: &str) -> SitemapIndex {
        SitemapIndex::from_csv(text, HOME)
    }

    fn urls(pages: &[&Page]) -> Vec<String> {
        pages.iter().map(|p| p.url.clone()).collect()
    }

    #[test]
    fn worked_example() {
        let idx = index(
            "page_id,title,url,breadcrumb_html\n1,Home,india,\n2,Temples,india/heritage/temples,",
        );

        assert_eq!(idx.len(), 2);
        assert_eq!(idx.pages()[0].url, "/india");
        assert_eq!(idx.pages()[1].url, "/india/heritage/temples");
        assert_eq!(
            urls(&idx.section("india")),
            vec!["/india", "/india/heritage/temples"]
        );
        assert_eq!(
            urls(&idx.children("/india/heritage")),
            vec!["/india/heritage/temples"]
        );
        assert_eq!(idx.representative("india").unwrap().title, "Home");
        assert!(idx.pages().iter().all(|p| p.breadcrumb_html.is_none()));
    }

    #[test]
    fn blank_and_missing_urls_are_dropped() {
        let idx = index("page_id,title,url\n1,A,/a\n2,B,   \n3,C\n4,D,d\n");
        assert_eq!(idx.len(), 2);
        assert!(idx.pages().iter().all(|p| p.url.starts_with('/')));
        assert!(idx.get("/a").is_some());
        assert!(idx.get("/d").is_some());
    }

    #[test]
    fn missing_url_column_yields_empty_index() {
        let idx = index("page_id,title\n1,A\n2,B\n");
        assert!(idx.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_index() {
        assert!(index("").is_empty());
        assert!(index("page_id,title,url\n").is_empty());
    }

    #[test]
    fn columns_are_found_by_trimmed_name_in_any_order() {
        let idx = index("\u{feff} url , extra ,title,page_id\n/docs,x,Docs,7\n");
        let page = idx.get("/docs").unwrap();
        assert_eq!(page.title, "Docs");
        assert_eq!(page.page_id, "7");
        assert!(page.breadcrumb_html.is_none());
    }

    #[test]
    fn breadcrumb_markup_is_kept() {
        let idx = index(
            "page_id,title,url,breadcrumb_html\n\
             1,Temples,/india/temples,\"<a href=\"\"/india\"\">India</a> › <span>Temples</span>\"\n",
        );
        let page = idx.get("/india/temples").unwrap();
        assert_eq!(
            page.breadcrumb_html.as_deref(),
            Some("<a href=\"/india\">India</a> › <span>Temples</span>")
        );
    }

    #[test]
    fn root_path_uses_home_section() {
        let idx = SitemapIndex::from_csv("title,url\nHome,/\nAbout,/about\n", "start");
        assert_eq!(urls(&idx.section("start")), vec!["/"]);
        assert_eq!(idx.representative("start").unwrap().title, "Home");
        assert_eq!(idx.section_keys(), ["start", "about"]);
    }

    #[test]
    fn first_segment_is_lowercased() {
        let idx = index("title,url\nA,/Docs/Intro\nB,/docs\n");
        assert_eq!(urls(&idx.section("docs")), vec!["/Docs/Intro", "/docs"]);
        assert!(idx.section("Docs").is_empty());
    }

    #[test]
    fn representative_is_shortest_with_first_winning_ties() {
        let idx = index(
            "title,url\n\
             Deep,/blog/2024/post\n\
             First,/blog/aa\n\
             Second,/blog/bb\n\
             Longer,/blog/ccc\n",
        );
        assert_eq!(idx.representative("blog").unwrap().title, "First");

        let idx = index("title,url\nDeep,/blog/2024/post\nRoot,/blog\n");
        assert_eq!(idx.representative("blog").unwrap().title, "Root");
    }

    #[test]
    fn representative_counts_characters_not_bytes() {
        // "/x/é" is 4 characters but 5 bytes, same byte length as "/x/ab"
        let idx = index("title,url
Ascii,/x/ab
Accent,/x/é
");
        assert_eq!(idx.representative("x").unwrap().title, "Accent");
    }

    #[test]
    fn duplicate_urls_last_row_wins_lookup() {
        let idx = index("title,url\nOld,/about\nNew,/about\n");
        assert_eq!(idx.len(), 2);
        assert_eq!(idx.get("/about").unwrap().title, "New");
        // Both rows still appear in the groupings
        assert_eq!(idx.section("about").len(), 2);
        assert_eq!(idx.representative("about").unwrap().title, "Old");
    }

    #[test]
    fn children_group_by_parent_path() {
        let idx = index(
            "title,url\n\
             India,/india\n\
             Heritage,/india/heritage\n\
             Food,/india/food\n\
             Temples,/india/heritage/temples\n\
             Forts,/india/heritage/forts\n",
        );
        assert_eq!(urls(&idx.children("/")), vec!["/india"]);
        assert_eq!(
            urls(&idx.children("/india")),
            vec!["/india/heritage", "/india/food"]
        );
        assert_eq!(
            urls(&idx.children("/india/heritage")),
            vec!["/india/heritage/temples", "/india/heritage/forts"]
        );
        assert!(idx.children("/nowhere").is_empty());
    }

    #[test]
    fn lookup_tolerates_trailing_slash() {
        let idx = index("title,url\nIndia,/india\nRoot,/\n");
        assert_eq!(idx.lookup("/india/").unwrap().title, "India");
        assert_eq!(idx.lookup("/india").unwrap().title, "India");
        assert_eq!(idx.lookup("/").unwrap().title, "Root");
        assert!(idx.lookup("/nepal/").is_none());
    }

    #[test]
    fn fixture_sitemap_indexes() {
        let content = std::fs::read_to_string("../../../fixtures/csv/sitemap.csv")
            .expect("read sitemap fixture");
        let idx = index(&content);

        assert_eq!(idx.len(), 15);
        assert_eq!(idx.representative("home").unwrap().url, "/");
        assert_eq!(idx.representative("india").unwrap().url, "/india");
        assert_eq!(idx.children("/india/heritage").len(), 9);
        assert!(idx.get("/india/heritage/temples").unwrap().has_breadcrumb());
    }
}
