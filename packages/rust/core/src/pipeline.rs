//! Widget load: environment → sitemap fetch → index → view.
//!
//! The fetch is the only await point. Everything after it is synchronous,
//! and every failure degrades to the static navigation instead of erroring.

use std::time::Instant;

use tracing::{info, instrument, warn};
use url::Url;

use sitenav_shared::{Result, WidgetConfig};
use sitenav_sitemap::{FetchOptions, SitemapIndex, SitemapSource};

use crate::env::Environment;
use crate::resolver::detect_current_path;
use crate::view::{NavView, degraded_view, derive_view};

/// Result of one widget load.
#[derive(Debug)]
pub struct LoadedWidget {
    /// Where the sitemap was looked for, if the location resolved at all.
    pub source: Option<SitemapSource>,
    /// Path the navigation was built for.
    pub current_path: String,
    /// Number of pages in the index (0 when degraded).
    pub page_count: usize,
    pub view: NavView,
    pub elapsed: std::time::Duration,
}

/// Sitemap location for this load: `data=` from the query string if present,
/// else the configured file name, resolved against the widget's `base` URL.
pub fn sitemap_source(
    env: &Environment,
    base: Option<&Url>,
    config: &WidgetConfig,
) -> Result<SitemapSource> {
    let raw = env
        .data_location()
        .unwrap_or_else(|| config.data_file.clone());
    SitemapSource::resolve(&raw, base)
}

/// Load the widget for the given host environment.
///
/// Never fails: an unresolvable location or a failed fetch yields
/// [`NavView::Degraded`].
#[instrument(skip_all, fields(base = base.map(Url::as_str)))]
pub async fn load_widget(
    env: &Environment,
    base: Option<&Url>,
    config: &WidgetConfig,
) -> LoadedWidget {
    match sitemap_source(env, base, config) {
        Ok(source) => load_widget_from(source, env, config).await,
        Err(e) => {
            let start = Instant::now();
            let current_path = detect_current_path(env, &config.home_path);
            warn!(error = %e, "sitemap location unusable, showing static navigation");
            LoadedWidget {
                source: None,
                page_count: 0,
                view: degraded_view(&current_path, config),
                current_path,
                elapsed: start.elapsed(),
            }
        }
    }
}

/// Load the widget from an explicit sitemap source.
#[instrument(skip_all, fields(source = %source))]
pub async fn load_widget_from(
    source: SitemapSource,
    env: &Environment,
    config: &WidgetConfig,
) -> LoadedWidget {
    let start = Instant::now();
    let current_path = detect_current_path(env, &config.home_path);

    let opts = FetchOptions {
        timeout_secs: config.timeout_secs,
    };

    let (view, page_count) = match sitenav_sitemap::fetch_sitemap(&source, &opts).await {
        Ok(text) => {
            let index = SitemapIndex::from_csv(&text, &config.home_section);
            let view = derive_view(&index, &current_path, config);
            (NavView::Live(view), index.len())
        }
        Err(e) => {
            warn!(error = %e, "sitemap fetch failed, showing static navigation");
            (degraded_view(&current_path, config), 0)
        }
    };

    let elapsed = start.elapsed();
    info!(
        path = %current_path,
        pages = page_count,
        degraded = view.is_degraded(),
        elapsed_ms = elapsed.as_millis() as u64,
        "widget loaded"
    );

    LoadedWidget {
        source: Some(source),
        current_path,
        page_count,
        view,
        elapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const FIXTURE: &str = "../../../fixtures/csv/sitemap.csv";

    fn fixture_text() -> String {
        std::fs::read_to_string(FIXTURE).expect("read sitemap fixture")
    }

    #[test]
    fn data_param_overrides_configured_file() {
        let base = Url::parse("https://example.com/widget/nav.html").unwrap();
        let config = WidgetConfig::default();

        let source = sitemap_source(&Environment::new(), Some(&base), &config).unwrap();
        assert_eq!(source.to_string(), "https://example.com/widget/sitemap.csv");

        let env = Environment::new().with_query("data=https%3A%2F%2Fcdn.example.com%2Fnav.csv");
        let source = sitemap_source(&env, Some(&base), &config).unwrap();
        assert_eq!(source.to_string(), "https://cdn.example.com/nav.csv");
    }

    #[tokio::test]
    async fn loads_live_view_over_http() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/sitemap.csv"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(fixture_text()))
            .mount(&server)
            .await;

        let base = Url::parse(&format!("{}/nav.html", server.uri())).unwrap();
        let env = Environment::new()
            .with_referrer("https://example.com/india/heritage/temples")
            .with_query("current=/about");

        let loaded = load_widget(&env, Some(&base), &WidgetConfig::default()).await;

        assert_eq!(loaded.current_path, "/india/heritage/temples");
        assert_eq!(loaded.page_count, 15);
        match loaded.view {
            NavView::Live(live) => {
                assert_eq!(live.current_page.unwrap().title, "Temples");
                assert_eq!(live.related.total(), 8);
            }
            NavView::Degraded(_) => panic!("expected live view"),
        }
    }

    #[tokio::test]
    async fn http_error_degrades() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/sitemap.csv"))
            .respond_with(wiremock::ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let base = Url::parse(&format!("{}/nav.html", server.uri())).unwrap();
        let env = Environment::new().with_query("current=/india");

        let loaded = load_widget(&env, Some(&base), &WidgetConfig::default()).await;

        assert!(loaded.view.is_degraded());
        assert_eq!(loaded.view.current_path(), "/india");
        assert_eq!(loaded.page_count, 0);
        assert!(loaded.source.is_some());
    }

    #[tokio::test]
    async fn unsupported_location_degrades() {
        let env = Environment::new().with_query("data=ftp://example.com/sitemap.csv");
        let loaded = load_widget(&env, None, &WidgetConfig::default()).await;

        assert!(loaded.view.is_degraded());
        assert!(loaded.source.is_none());
        assert_eq!(loaded.current_path, "/");
    }

    #[tokio::test]
    async fn loads_from_local_file() {
        let source = SitemapSource::File(PathBuf::from(FIXTURE));
        let env = Environment::new().with_query("current=/india/heritage/");

        let loaded = load_widget_from(source, &env, &WidgetConfig::default()).await;

        match loaded.view {
            NavView::Live(live) => {
                assert_eq!(live.current_page.unwrap().title, "Heritage");
                // Siblings of /india/heritage under /india
                assert_eq!(live.related.total(), 1);
            }
            NavView::Degraded(_) => panic!("expected live view"),
        }
    }
}
