//! Current-page resolution.

use tracing::debug;
use url::Url;

use sitenav_shared::Page;
use sitenav_sitemap::SitemapIndex;

use crate::env::{CURRENT_PARAM, Environment};

/// Work out which site path the widget is showing navigation for.
///
/// Order of preference:
/// 1. the referrer's path, when it parses and is not the bare root
/// 2. the `current` query parameter, when it starts with `/`
/// 3. `home_path`
///
/// Never fails; unparseable hints are skipped.
pub fn detect_current_path(env: &Environment, home_path: &str) -> String {
    if let Some(referrer) = env.referrer() {
        match Url::parse(referrer) {
            Ok(url) if url.path().starts_with('/') && url.path() != "/" => {
                debug!(path = url.path(), "current path from referrer");
                return url.path().to_string();
            }
            Ok(_) => debug!(referrer, "referrer points at site root, ignoring"),
            Err(e) => debug!(referrer, error = %e, "unparseable referrer, ignoring"),
        }
    }

    if let Some(current) = env.query_param(CURRENT_PARAM) {
        if current.starts_with('/') {
            debug!(path = %current, "current path from query");
            return current;
        }
        debug!(value = %current, "ignoring current parameter without leading slash");
    }

    debug!(path = home_path, "current path defaulted to home");
    home_path.to_string()
}

/// The indexed page for `path`: exact match, then without trailing slash.
pub fn current_page<'a>(index: &'a SitemapIndex, path: &str) -> Option<&'a Page> {
    index.lookup(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = "/";

    #[test]
    fn no_hints_yields_home_path() {
        assert_eq!(detect_current_path(&Environment::new(), HOME), "/");
        assert_eq!(detect_current_path(&Environment::new(), "/india"), "/india");
    }

    #[test]
    fn referrer_path_wins() {
        let env = Environment::new()
            .with_referrer("https://example.com/india/heritage/?x=1#top")
            .with_query("current=/about");
        assert_eq!(detect_current_path(&env, HOME), "/india/heritage/");
    }

    #[test]
    fn root_referrer_falls_through_to_query() {
        let env = Environment::new()
            .with_referrer("https://example.com/")
            .with_query("current=/about");
        assert_eq!(detect_current_path(&env, HOME), "/about");
    }

    #[test]
    fn bad_referrer_falls_through() {
        let env = Environment::new()
            .with_referrer("not a url")
            .with_query("current=/contact");
        assert_eq!(detect_current_path(&env, HOME), "/contact");

        let env = Environment::new().with_referrer("about:blank");
        assert_eq!(detect_current_path(&env, "/india"), "/india");
    }

    #[test]
    fn relative_current_param_is_ignored() {
        let env = Environment::new().with_query("current=about");
        assert_eq!(detect_current_path(&env, HOME), "/");
    }

    #[test]
    fn current_page_tries_without_trailing_slash() {
        let index = SitemapIndex::from_csv("title,url\nIndia,/india\n", "home");
        assert_eq!(current_page(&index, "/india/").unwrap().title, "India");
        assert!(current_page(&index, "/nepal").is_none());
    }
}
