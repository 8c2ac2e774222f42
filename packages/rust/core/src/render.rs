//! Markup and plain-text rendering of a [`NavView`].
//!
//! Fragment renderers produce the inner markup of each host container
//! (breadcrumb list, related list, top-level list). [`render_widget`] wraps
//! them in the complete widget root. All text goes through `html-escape`.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use sitenav_shared::WidgetConfig;

use crate::breadcrumb::BreadcrumbView;
use crate::fallback::DegradedView;
use crate::related::RelatedView;
use crate::toplinks::TopLink;
use crate::view::{LiveView, NavView};
use crate::widget::WidgetState;

/// Id shared by the panel and the toggle's `aria-controls`.
const PANEL_ID: &str = "sitenav-panel";

// ---------------------------------------------------------------------------
// Fragments
// ---------------------------------------------------------------------------

/// `<li>` items for the breadcrumb container.
pub fn render_breadcrumb(view: &BreadcrumbView) -> String {
    let mut out = String::new();
    for crumb in &view.crumbs {
        let label = text(&crumb.label);
        match (&crumb.href, crumb.current) {
            (Some(href), _) => out.push_str(&format!(
                "<li><a href=\"{}\">{label}</a></li>",
                attr(href)
            )),
            (None, true) => out.push_str(&format!(
                "<li><span aria-current=\"page\">{label}</span></li>"
            )),
            (None, false) => out.push_str(&format!("<li><span>{label}</span></li>")),
        }
    }
    out
}

/// `<li>` items for the related container. Items past the limit carry
/// `hidden` until the list is expanded.
pub fn render_related(view: &RelatedView, expanded: bool) -> String {
    match view {
        RelatedView::Empty { message } => {
            format!("<li class=\"sitenav-empty\">{}</li>", text(message))
        }
        RelatedView::List { visible, hidden } => {
            let mut out = String::new();
            for link in visible {
                out.push_str(&format!(
                    "<li><a href=\"{}\">{}</a></li>",
                    attr(&link.url),
                    text(&link.title)
                ));
            }
            let hidden_attr = if expanded { "" } else { " hidden" };
            for link in hidden {
                out.push_str(&format!(
                    "<li class=\"sitenav-extra\"{hidden_attr}><a href=\"{}\">{}</a></li>",
                    attr(&link.url),
                    text(&link.title)
                ));
            }
            out
        }
    }
}

/// `<li>` items for the top-level container.
pub fn render_top_links(links: &[TopLink]) -> String {
    let mut out = String::new();
    for link in links {
        let class = if link.active {
            "sitenav-top-link is-active"
        } else {
            "sitenav-top-link"
        };
        out.push_str(&format!(
            "<li><a class=\"{class}\" href=\"{}\" aria-label=\"{}\">\
             <span class=\"sitenav-icon\" data-icon=\"{}\" aria-hidden=\"true\"></span>\
             <span class=\"sitenav-label\">{}</span></a></li>",
            attr(&link.url),
            attr(&link.aria_label),
            attr(&link.icon),
            text(&link.title)
        ));
    }
    out
}

/// `<li>` items of the static degraded-mode navigation.
pub fn render_degraded(view: &DegradedView) -> String {
    let mut out = String::new();
    for link in &view.links {
        out.push_str(&format!(
            "<li><a class=\"sitenav-top-link\" href=\"{}\">{}</a></li>",
            attr(&link.url),
            text(&link.title)
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// Whole widget
// ---------------------------------------------------------------------------

/// The complete widget: root, toggle, panel and the three containers.
pub fn render_widget(view: &NavView, state: WidgetState, config: &WidgetConfig) -> String {
    let (mode, breadcrumb, related, top, has_more) = match view {
        NavView::Live(live) => (
            "live",
            render_breadcrumb(&live.breadcrumb),
            render_related(&live.related, state.related_expanded),
            render_top_links(&live.top_links),
            live.related.has_more() && !state.related_expanded,
        ),
        NavView::Degraded(degraded) => (
            "degraded",
            String::new(),
            String::new(),
            render_degraded(degraded),
            false,
        ),
    };

    let data_state = state.data_state();
    let panel_hidden = if state.open { "" } else { " hidden" };
    let more_hidden = if has_more { "" } else { " hidden" };

    format!(
        "<nav class=\"sitenav sitenav--{data_state}\" data-state=\"{data_state}\" \
         data-mode=\"{mode}\" aria-label=\"Site navigation\">\
         <button type=\"button\" class=\"sitenav-toggle\" aria-expanded=\"{expanded}\" \
         aria-controls=\"{PANEL_ID}\">{toggle}</button>\
         <div id=\"{PANEL_ID}\" class=\"sitenav-panel\"{panel_hidden}>\
         <ol class=\"sitenav-breadcrumb\">{breadcrumb}</ol>\
         <ul class=\"sitenav-related\">{related}</ul>\
         <button type=\"button\" class=\"sitenav-more\"{more_hidden}>{more}</button>\
         <ul class=\"sitenav-top\">{top}</ul>\
         </div></nav>",
        expanded = state.aria_expanded(),
        toggle = text(&config.toggle_label),
        more = text(&config.show_more_label),
    )
}

// ---------------------------------------------------------------------------
// Plain text
// ---------------------------------------------------------------------------

/// Human-readable summary for terminals.
pub fn render_text(view: &NavView, state: WidgetState) -> String {
    match view {
        NavView::Live(live) => live_text(live, state),
        NavView::Degraded(degraded) => {
            let mut lines = vec![
                format!("Current:    {}", degraded.current_path),
                "Mode:       degraded (sitemap unavailable)".to_string(),
                "Links:".to_string(),
            ];
            lines.extend(
                degraded
                    .links
                    .iter()
                    .map(|l| format!("  - {}  {}", l.title, l.url)),
            );
            lines.join("\n")
        }
    }
}

fn live_text(live: &LiveView, state: WidgetState) -> String {
    let title = live
        .current_page
        .as_ref()
        .map(|p| format!(" ({})", p.title))
        .unwrap_or_else(|| " (not in sitemap)".to_string());

    let trail = live
        .breadcrumb
        .crumbs
        .iter()
        .map(|c| {
            if c.current {
                format!("[{}]", c.label)
            } else {
                c.label.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" › ");

    let mut lines = vec![
        format!("Current:    {}{title}", live.current_path),
        format!("Breadcrumb: {trail}"),
    ];

    match &live.related {
        RelatedView::Empty { message } => lines.push(format!("Related:    {message}")),
        related => {
            lines.push(format!("Related ({}):", related.total()));
            for link in related.shown(state.related_expanded) {
                lines.push(format!("  - {}  {}", link.title, link.url));
            }
            if related.has_more() && !state.related_expanded {
                let remaining = related.total() - related.shown(false).len();
                lines.push(format!("  + {remaining} more"));
            }
        }
    }

    lines.push("Sections:".to_string());
    for link in &live.top_links {
        let marker = if link.active { "*" } else { " " };
        lines.push(format!("{marker} [{}] {}  {}", link.icon, link.title, link.url));
    }

    lines.join("\n")
}
