//! HTML site generation.
//!
//! Stage 2 of the build. Takes the merged night dataset and writes a static
//! site that needs nothing but a file server.
//!
//! ## Generated Pages
//!
//! - **Index page** (`/index.html`): night list, empty content panel
//! - **Night pages** (`/nights/{night}.html`): night list with the night
//!   selected and its thumbnail placeholders already in the panel
//!
//! Night pages are rendered by clicking each night on a [`NightGallery`], so
//! the markup is exactly what the controller produces. The embedded runtime
//! (`static/gallery.js`) repeats the controller's steps in the browser:
//! clicks on the list are intercepted and the panel is rebuilt in place, and
//! an `IntersectionObserver` fetches each thumbnail once it comes within the
//! configured threshold of the scroll container's viewport.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! └── nights/
//!     ├── 20190912.html
//!     └── 20190913.html
//! ```
//!
//! ## DOM Contract
//!
//! The runtime relies on `#nightlist` (list container), `#content` (panel),
//! the scroll container selector from `[lazy]`, and two JSON script blocks:
//! `#night-data` (the dataset) and `#gallery-config`.

use crate::config::{self, GalleryConfig, NavOrder};
use crate::controller::{GalleryError, NightGallery};
use crate::dataset::NightDataset;
use crate::lazy::{LazyLoader, ObserverLoader};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Gallery error: {0}")]
    Gallery(#[from] GalleryError),
}

/// What was written, for CLI output.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub index: String,
    /// In navigation order.
    pub nights: Vec<NightPage>,
}

#[derive(Debug, Clone)]
pub struct NightPage {
    pub night: String,
    /// Relative to the output directory.
    pub path: String,
    pub exposures: usize,
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/gallery.js");

const NIGHTS_DIR: &str = "nights";

/// Settings the browser runtime reads from `#gallery-config`.
///
/// Lazy-loading settings are not here: the runtime takes them from the
/// `data-lazy-*` attributes of `#content`, rendered from the loader's plan.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RuntimeConfig<'a> {
    image_base: &'a str,
    summary_template: Option<&'a str>,
    order: NavOrder,
    /// Link target of a list entry, `{night}` substituted.
    night_href: &'a str,
}

/// Where a page sits relative to the output root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageLocation {
    Root,
    NightsDir,
}

impl PageLocation {
    fn night_href(self) -> &'static str {
        match self {
            PageLocation::Root => "nights/{night}.html",
            PageLocation::NightsDir => "{night}.html",
        }
    }

    fn home_href(self) -> &'static str {
        match self {
            PageLocation::Root => "index.html",
            PageLocation::NightsDir => "../index.html",
        }
    }
}

/// Shared, page-independent rendering inputs.
struct SiteContext<'a> {
    config: &'a GalleryConfig,
    css: String,
    data_json: String,
}

pub fn generate(
    dataset: &NightDataset,
    config: &GalleryConfig,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let css = format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        config::generate_theme_css(&config.theme),
        CSS_STATIC
    );
    let ctx = SiteContext {
        config,
        css,
        data_json: script_safe_json(&serde_json::to_string(dataset)?),
    };

    let mut gallery = NightGallery::new(config, ObserverLoader::new());
    gallery.initialize();
    gallery.init_nights(dataset.clone());

    fs::create_dir_all(output_dir.join(NIGHTS_DIR))?;

    let index_html = render_page(&gallery, &ctx, PageLocation::Root)?;
    fs::write(output_dir.join("index.html"), index_html.into_string())?;
    tracing::debug!("wrote index.html");

    let nights: Vec<String> = gallery
        .nav()
        .entries()
        .iter()
        .map(|e| e.night.clone())
        .collect();

    let mut pages = Vec::with_capacity(nights.len());
    for night in nights {
        gallery.click(&night)?;
        let html = render_page(&gallery, &ctx, PageLocation::NightsDir)?;
        let rel_path = format!("{NIGHTS_DIR}/{night}.html");
        fs::write(output_dir.join(&rel_path), html.into_string())?;
        tracing::debug!(path = %rel_path, "wrote night page");
        pages.push(NightPage {
            exposures: gallery.content().placeholders().len(),
            night,
            path: rel_path,
        });
    }

    tracing::info!(
        nights = pages.len(),
        output = %output_dir.display(),
        "site generated"
    );
    Ok(GenerateReport {
        index: "index.html".to_string(),
        nights: pages,
    })
}

/// Keep `</script>` sequences inside JSON from closing the script element.
fn script_safe_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the night list.
fn render_nightlist<L: LazyLoader>(gallery: &NightGallery<L>, location: PageLocation) -> Markup {
    html! {
        nav.mdl-navigation id="nightlist" {
            @for entry in gallery.nav().entries() {
                a.mdl-navigation__link.selected[entry.selected]
                    href=(location.night_href().replace("{night}", &entry.night)) {
                    (entry.night)
                }
            }
        }
    }
}

/// Renders the content panel as the controller left it.
fn render_content(gallery: &NightGallery<ObserverLoader>) -> Markup {
    let panel = gallery.content();
    let options = gallery.lazy_options();
    let (threshold, direction, scroller) = match gallery.loader().plan() {
        Some(plan) => (
            plan.threshold,
            plan.scroll_direction.as_str(),
            plan.scroll_container.as_str(),
        ),
        None => (
            options.threshold,
            options.scroll_direction.as_str(),
            options.scroll_container.as_str(),
        ),
    };

    html! {
        div id="content"
            data-night=[gallery.selection().night()]
            data-lazy-threshold=(threshold)
            data-lazy-direction=(direction)
            data-lazy-scroller=(scroller) {
            @if let Some(link) = panel.summary_link() {
                a.nightsum href=(link) target="_blank" rel="noopener" { "Night summary" }
            }
            @for placeholder in panel.placeholders() {
                div.thumb title=(placeholder.title) {
                    img.lazy data-src=(placeholder.deferred_src) alt=(placeholder.title);
                }
            }
            @if gallery.selection().night().is_none() {
                p.empty { "Select a night." }
            }
        }
    }
}

/// Renders a full page: header, night list, panel, data and runtime.
fn render_page(
    gallery: &NightGallery<ObserverLoader>,
    ctx: &SiteContext<'_>,
    location: PageLocation,
) -> Result<Markup, GenerateError> {
    let config = ctx.config;
    let runtime = RuntimeConfig {
        image_base: &config.images.base_url,
        summary_template: config
            .summary
            .enabled
            .then_some(config.summary.url_template.as_str()),
        order: config.navigation.order,
        night_href: location.night_href(),
    };
    let runtime_json = script_safe_json(&serde_json::to_string(&runtime)?);

    let page_title = match gallery.selection().night() {
        Some(night) => format!("{} - {}", config.title, night),
        None => config.title.clone(),
    };

    let content = html! {
        div.mdl-layout {
            header.mdl-layout__header {
                a.mdl-layout-title href=(location.home_href()) { (config.title) }
            }
            div.mdl-layout__drawer {
                (render_nightlist(gallery, location))
            }
            main.mdl-layout__content {
                (render_content(gallery))
            }
        }
        script id="night-data" type="application/json" { (PreEscaped(&ctx.data_json)) }
        script id="gallery-config" type="application/json" { (PreEscaped(runtime_json)) }
        script { (PreEscaped(JS)) }
    };

    Ok(base_document(&page_title, &ctx.css, content))
}

// ============================================================================
// Tests
// ============================================================================
