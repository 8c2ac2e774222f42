//! Navigation widget logic for SiteNav.
//!
//! Resolves the current page from the host [`env::Environment`], projects the
//! sitemap index into plain view models (breadcrumb, related pages, top-level
//! links), and renders them. [`pipeline::load_widget`] runs the whole load.

pub mod breadcrumb;
pub mod env;
pub mod fallback;
pub mod pipeline;
pub mod related;
pub mod render;
pub mod resolver;
pub mod toplinks;
pub mod view;
pub mod widget;

pub use env::Environment;
pub use pipeline::{LoadedWidget, load_widget, load_widget_from, sitemap_source};
pub use view::{LiveView, NavView, PageLink, derive_view};
pub use widget::{WidgetEvent, WidgetState};
