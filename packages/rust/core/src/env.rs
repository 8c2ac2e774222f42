//! Host environment the widget runs in.
//!
//! Everything the widget would otherwise read from ambient globals (the
//! embedding page's referrer, its own query string) is captured here so the
//! resolver stays a pure function.

use url::Url;

/// Query parameter naming the current page path.
pub const CURRENT_PARAM: &str = "current";

/// Query parameter overriding the sitemap location.
pub const DATA_PARAM: &str = "data";

/// Injected host context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// URL of the page embedding the widget, if the host reports one.
    pub referrer: Option<String>,
    /// Raw query string of the widget's own location, with or without `?`.
    pub query: Option<String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the query string of the widget's own URL.
    pub fn from_location(location: &Url) -> Self {
        Self {
            referrer: None,
            query: location.query().map(String::from),
        }
    }

    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Referrer, treating an empty string as absent.
    pub fn referrer(&self) -> Option<&str> {
        self.referrer
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }

    /// First value of a form-urlencoded query parameter.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        let query = query.strip_prefix('?').unwrap_or(query);

        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Sitemap location requested through `data=`, if non-empty.
    pub fn data_location(&self) -> Option<String> {
        self.query_param(DATA_PARAM)
            .filter(|value| !value.trim().is_empty())
    }
}
