//! Application configuration for SiteNav.
//!
//! User config lives at `~/.sitenav/sitenav.toml`.
//! CLI flags override config file values, which override defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiteNavError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "sitenav.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".sitenav";

// ---------------------------------------------------------------------------
// Config structs (matching sitenav.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Site conventions (home section, home path, data file).
    #[serde(default)]
    pub site: SiteConfig,

    /// Widget presentation settings.
    #[serde(default)]
    pub widget: WidgetSettings,

    /// Curated top-level sections.
    #[serde(default)]
    pub top_level: TopLevelConfig,

    /// HTTP settings for the sitemap fetch.
    #[serde(default)]
    pub http: HttpConfig,

    /// Static links shown when the sitemap cannot be fetched.
    #[serde(default = "default_fallback_links")]
    pub fallback_links: Vec<FallbackLink>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            widget: WidgetSettings::default(),
            top_level: TopLevelConfig::default(),
            http: HttpConfig::default(),
            fallback_links: default_fallback_links(),
        }
    }
}

/// `[site]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Section key used for pages whose URL has no segments.
    #[serde(default = "default_home_section")]
    pub home_section: String,

    /// Path assumed when no referrer or `current` parameter is available.
    #[serde(default = "default_home_path")]
    pub home_path: String,

    /// Sitemap file name, resolved against the widget's base URL.
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            home_section: default_home_section(),
            home_path: default_home_path(),
            data_file: default_data_file(),
        }
    }
}

fn default_home_section() -> String {
    "home".into()
}
fn default_home_path() -> String {
    "/".into()
}
fn default_data_file() -> String {
    "sitemap.csv".into()
}

/// `[widget]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetSettings {
    /// Siblings visible before the "show more" control.
    #[serde(default = "default_sibling_limit")]
    pub sibling_limit: usize,

    /// Message shown when the current page has no siblings.
    #[serde(default = "default_empty_message")]
    pub empty_message: String,

    /// Label of the "show more" control.
    #[serde(default = "default_show_more_label")]
    pub show_more_label: String,

    /// Label of the open/close toggle.
    #[serde(default = "default_toggle_label")]
    pub toggle_label: String,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            sibling_limit: default_sibling_limit(),
            empty_message: default_empty_message(),
            show_more_label: default_show_more_label(),
            toggle_label: default_toggle_label(),
        }
    }
}

fn default_sibling_limit() -> usize {
    6
}
fn default_empty_message() -> String {
    "No related pages.".into()
}
fn default_show_more_label() -> String {
    "Show more".into()
}
fn default_toggle_label() -> String {
    "Navigation".into()
}

/// `[top_level]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopLevelConfig {
    /// Section keys in display order. Keys absent from the sitemap are skipped.
    #[serde(default = "default_top_level_order")]
    pub order: Vec<String>,

    /// Icon name per section key.
    #[serde(default = "default_icons")]
    pub icons: BTreeMap<String, String>,

    /// Icon used for keys without an entry in `icons`.
    #[serde(default = "default_fallback_icon")]
    pub fallback_icon: String,
}

impl Default for TopLevelConfig {
    fn default() -> Self {
        Self {
            order: default_top_level_order(),
            icons: default_icons(),
            fallback_icon: default_fallback_icon(),
        }
    }
}

fn default_top_level_order() -> Vec<String> {
    ["home", "about", "docs", "blog", "contact"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_icons() -> BTreeMap<String, String> {
    [
        ("home", "house"),
        ("about", "info"),
        ("docs", "book"),
        ("blog", "pen"),
        ("contact", "mail"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}
fn default_fallback_icon() -> String {
    "link".into()
}

/// `[http]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Timeout for the sitemap request in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

/// `[[fallback_links]]` entry: one link of the degraded navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackLink {
    /// Visible link text.
    pub label: String,
    /// Link target.
    pub href: String,
}

fn default_fallback_links() -> Vec<FallbackLink> {
    vec![FallbackLink {
        label: "Home".into(),
        href: "/".into(),
    }]
}

// ---------------------------------------------------------------------------
// Widget config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime widget configuration, merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Section key for root-path pages.
    pub home_section: String,
    /// Default current path.
    pub home_path: String,
    /// Default sitemap file name.
    pub data_file: String,
    /// Visible sibling count before "show more".
    pub sibling_limit: usize,
    /// Empty-state text of the related list.
    pub empty_message: String,
    /// "Show more" control label.
    pub show_more_label: String,
    /// Toggle control label.
    pub toggle_label: String,
    /// Curated top-level order.
    pub top_level_order: Vec<String>,
    /// Icon per section key.
    pub icons: BTreeMap<String, String>,
    /// Icon for unknown keys.
    pub fallback_icon: String,
    /// Degraded-mode links.
    pub fallback_links: Vec<FallbackLink>,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl WidgetConfig {
    /// Icon for a section key, falling back to the configured default.
    pub fn icon_for(&self, key: &str) -> &str {
        self.icons
            .get(key)
            .map(String::as_str)
            .unwrap_or(&self.fallback_icon)
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for WidgetConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            home_section: config.site.home_section.clone(),
            home_path: config.site.home_path.clone(),
            data_file: config.site.data_file.clone(),
            sibling_limit: config.widget.sibling_limit,
            empty_message: config.widget.empty_message.clone(),
            show_more_label: config.widget.show_more_label.clone(),
            toggle_label: config.widget.toggle_label.clone(),
            top_level_order: config.top_level.order.clone(),
            icons: config.top_level.icons.clone(),
            fallback_icon: config.top_level.fallback_icon.clone(),
            fallback_links: config.fallback_links.clone(),
            timeout_secs: config.http.timeout_secs,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.sitenav/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| SiteNavError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.sitenav/sitenav.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| SiteNavError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content)
        .map_err(|e| SiteNavError::config(format!("failed to parse {}: {e}", path.display())))?;

    validate_config(&config)?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| SiteNavError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| SiteNavError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| SiteNavError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Reject values the widget cannot work with.
pub fn validate_config(config: &AppConfig) -> Result<()> {
    if !config.site.home_path.starts_with('/') {
        return Err(SiteNavError::config(format!(
            "site.home_path must start with '/', got '{}'",
            config.site.home_path
        )));
    }
    if config.site.home_section.trim().is_empty() {
        return Err(SiteNavError::config("site.home_section must not be empty"));
    }
    if config.site.data_file.trim().is_empty() {
        return Err(SiteNavError::config("site.data_file must not be empty"));
    }
    Ok(())
}
