//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use sitenav_core::render::{render_text, render_widget};
use sitenav_core::{Environment, LoadedWidget, WidgetState};
use sitenav_shared::{AppConfig, WidgetConfig, init_config, load_config, load_config_from};
use sitenav_sitemap::{FetchOptions, SitemapIndex, SitemapSource};
use tracing::info;
use url::Url;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// SiteNav: contextual navigation from a CSV sitemap.
#[derive(Parser)]
#[command(
    name = "sitenav",
    version,
    about = "Build breadcrumbs, sibling links and section links from a CSV sitemap.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Config file (defaults to ~/.sitenav/sitenav.toml).
    #[arg(long, global = true, env = "SITENAV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Output format for `render`.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum RenderFormat {
    Text,
    Json,
    Html,
}

/// Output format for `index`.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum IndexFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Render the navigation widget for one page.
    Render(RenderArgs),

    /// Print the pages and sections of a sitemap.
    Index {
        /// Sitemap URL or file path (defaults to the configured data file).
        #[arg(short, long)]
        data: Option<String>,

        /// Output format.
        #[arg(short, long, default_value = "text")]
        format: IndexFormat,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments for `render`. Mirrors what the widget sees when embedded.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Sitemap URL or file path. Overrides `data=` in --query.
    #[arg(short, long)]
    pub data: Option<String>,

    /// Current page path, as passed in `current=`.
    #[arg(short, long)]
    pub current: Option<String>,

    /// Referrer URL of the embedding page.
    #[arg(short, long)]
    pub referrer: Option<String>,

    /// The widget's own URL; relative sitemap locations resolve against it.
    #[arg(short, long)]
    pub base: Option<String>,

    /// Extra query string of the widget URL (e.g. "data=nav.csv").
    #[arg(short, long)]
    pub query: Option<String>,

    /// Output format.
    #[arg(short, long, default_value = "text")]
    pub format: RenderFormat,

    /// Render with the panel open.
    #[arg(long)]
    pub open: bool,

    /// Render with all siblings revealed.
    #[arg(long)]
    pub expanded: bool,

    /// Siblings shown before "show more".
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "sitenav=info",
        1 => "sitenav=debug",
        _ => "sitenav=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.config.as_deref())?;

    match cli.command {
        Command::Render(args) => cmd_render(&config, &args).await,
        Command::Index { data, format } => cmd_index(&config, data.as_deref(), format).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_render(config: &AppConfig, args: &RenderArgs) -> Result<()> {
    let mut widget_config = WidgetConfig::from(config);
    if let Some(limit) = args.limit {
        widget_config.sibling_limit = limit;
    }

    let base = args
        .base
        .as_deref()
        .map(|b| Url::parse(b).map_err(|e| eyre!("invalid base URL '{b}': {e}")))
        .transpose()?;
    let env = build_environment(args);

    info!(
        current = args.current.as_deref().unwrap_or("-"),
        data = args.data.as_deref().unwrap_or("-"),
        "rendering navigation"
    );

    let spinner = Spinner::new("Loading sitemap");
    let loaded: LoadedWidget = match &args.data {
        Some(data) => {
            let source = SitemapSource::resolve(data, base.as_ref())?;
            sitenav_core::load_widget_from(source, &env, &widget_config).await
        }
        None => sitenav_core::load_widget(&env, base.as_ref(), &widget_config).await,
    };
    spinner.finish();

    let state = WidgetState {
        open: args.open,
        related_expanded: args.expanded,
    };

    match args.format {
        RenderFormat::Text => println!("{}", render_text(&loaded.view, state)),
        RenderFormat::Json => println!("{}", serde_json::to_string_pretty(&loaded.view)?),
        RenderFormat::Html => println!("{}", render_widget(&loaded.view, state, &widget_config)),
    }

    Ok(())
}

/// Environment equivalent to the widget URL `?current=..&<query>` embedded
/// on the referrer page.
fn build_environment(args: &RenderArgs) -> Environment {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    if let Some(current) = &args.current {
        query.append_pair("current", current);
    }
    let mut query = query.finish();

    if let Some(extra) = args.query.as_deref().map(|q| q.trim_start_matches('?')) {
        if !extra.is_empty() {
            if !query.is_empty() {
                query.push('&');
            }
            query.push_str(extra);
        }
    }

    Environment {
        referrer: args.referrer.clone(),
        query: (!query.is_empty()).then_some(query),
    }
}

async fn cmd_index(config: &AppConfig, data: Option<&str>, format: IndexFormat) -> Result<()> {
    let raw = data.unwrap_or(&config.site.data_file);
    let source = SitemapSource::resolve(raw, None)?;
    let opts = FetchOptions {
        timeout_secs: config.http.timeout_secs,
    };

    let spinner = Spinner::new("Loading sitemap");
    let result = sitenav_sitemap::load_index(&source, &opts, &config.site.home_section).await;
    spinner.finish();
    let index = result?;

    match format {
        IndexFormat::Text => println!("{}", index_text(&index)),
        IndexFormat::Json => println!("{}", serde_json::to_string_pretty(&index_json(&index))?),
    }

    Ok(())
}

fn index_text(index: &SitemapIndex) -> String {
    let mut lines = vec![format!("Pages ({}):", index.len())];
    for page in index.pages() {
        lines.push(format!("  {:<6} {}  {}", page.page_id, page.url, page.title));
    }

    lines.push(format!("Sections ({}):", index.section_keys().len()));
    for key in index.section_keys() {
        let representative = index
            .representative(key)
            .map(|p| p.url.as_str())
            .unwrap_or("-");
        lines.push(format!(
            "  {key}  {} page(s), representative {representative}",
            index.section(key).len()
        ));
    }

    lines.join("\n")
}

fn index_json(index: &SitemapIndex) -> serde_json::Value {
    let sections: Vec<_> = index
        .section_keys()
        .iter()
        .map(|key| {
            serde_json::json!({
                "key": key,
                "representative": index.representative(key).map(|p| &p.url),
                "pages": index.section(key).iter().map(|p| &p.url).collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::json!({
        "pages": index.pages(),
        "sections": sections,
    })
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Spinner
// ---------------------------------------------------------------------------

/// Spinner shown on stderr while the sitemap loads.
struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            bar.set_style(
                style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
