//! Gallery configuration.
//!
//! Handles loading, validating, and layering `night-gallery.toml`. Stock
//! defaults are serialized to a TOML table and the user file is merged on top,
//! so a config file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "CI Nightly Thumbnails"
//!
//! [navigation]
//! order = "descending"      # "ascending" or "descending" by night id
//!
//! [summary]
//! enabled = true            # Show a link to the per-night summary page
//! url_template = "http://desi-www.kpno.noao.edu:8090/nightsum/nightsum-{year}-{month}-{day}/nightsum.html"
//!
//! [images]
//! base_url = "https://portal.nersc.gov/project/desi/users/dkirkby/CI/"
//!
//! [lazy]
//! threshold = 1500          # Pixels ahead of the viewport to start fetching
//! scroll_direction = "vertical"
//! scroll_container = ".mdl-layout__content"
//!
//! [theme]
//! nav_width = "11rem"
//! thumbnail_size = "240px"
//! thumbnail_gap = "0.5rem"
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#111111"
//! text_muted = "#666666"
//! border = "#e0e0e0"
//! link = "#333333"
//! selected = "#e8eefc"
//!
//! [colors.dark]
//! background = "#0a0a0a"
//! text = "#eeeeee"
//! text_muted = "#999999"
//! border = "#333333"
//! link = "#cccccc"
//! selected = "#1f2a44"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::lazy::ScrollDirection;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `night-gallery.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Page title and header text.
    pub title: String,
    pub navigation: NavigationConfig,
    pub summary: SummaryConfig,
    pub images: ImagesConfig,
    pub lazy: LazyConfig,
    pub theme: ThemeConfig,
    pub colors: ColorConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            title: "CI Nightly Thumbnails".to_string(),
            navigation: NavigationConfig::default(),
            summary: SummaryConfig::default(),
            images: ImagesConfig::default(),
            lazy: LazyConfig::default(),
            theme: ThemeConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "images.base_url must not be empty".into(),
            ));
        }
        if self.summary.enabled
            && !["{year}", "{month}", "{day}", "{night}"]
                .iter()
                .any(|p| self.summary.url_template.contains(p))
        {
            return Err(ConfigError::Validation(
                "summary.url_template must contain {year}, {month}, {day} or {night}".into(),
            ));
        }
        if self.lazy.scroll_container.trim().is_empty() {
            return Err(ConfigError::Validation(
                "lazy.scroll_container must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Order of entries in the night list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavOrder {
    /// Oldest night first.
    Ascending,
    /// Newest night first.
    Descending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    pub order: NavOrder,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            order: NavOrder::Descending,
        }
    }
}

/// Link to the external per-night summary page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SummaryConfig {
    pub enabled: bool,
    /// Placeholders: `{year}`, `{month}`, `{day}`, `{night}`.
    pub url_template: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url_template: crate::urls::DEFAULT_SUMMARY_TEMPLATE.to_string(),
        }
    }
}

/// Remote thumbnail host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Prefix joined with `{night}/{EXPID}.jpg`.
    pub base_url: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            base_url: crate::urls::DEFAULT_IMAGE_BASE.to_string(),
        }
    }
}

/// Visibility-triggered loading settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LazyConfig {
    /// Distance in pixels ahead of the visible area at which fetching starts.
    pub threshold: u32,
    pub scroll_direction: ScrollDirection,
    /// CSS selector of the element that scrolls the thumbnails.
    pub scroll_container: String,
}

impl Default for LazyConfig {
    fn default() -> Self {
        Self {
            threshold: 1500,
            scroll_direction: ScrollDirection::Vertical,
            scroll_container: ".mdl-layout__content".to_string(),
        }
    }
}

/// Theme/layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Width of the night list column (CSS value).
    pub nav_width: String,
    /// Edge length of a thumbnail tile (CSS value).
    pub thumbnail_size: String,
    /// Gap between thumbnail tiles (CSS value).
    pub thumbnail_gap: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            nav_width: "11rem".to_string(),
            thumbnail_size: "240px".to_string(),
            thumbnail_gap: "0.5rem".to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Secondary text (summary link, tile captions).
    pub text_muted: String,
    pub border: String,
    pub link: String,
    /// Background of the selected night in the list.
    pub selected: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#111111".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            link: "#333333".to_string(),
            selected: "#e8eefc".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0a0a0a".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#999999".to_string(),
            border: "#333333".to_string(),
            link: "#cccccc".to_string(),
            selected: "#1f2a44".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(GalleryConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the base, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<GalleryConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file, falling back to stock defaults when the
/// file is absent.
pub fn load_config(path: &Path) -> Result<GalleryConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    if overlay.is_some() {
        tracing::debug!(path = %path.display(), "loaded config overrides");
    }
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `night-gallery.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Night Gallery Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Page title and header text.
title = "CI Nightly Thumbnails"

# ---------------------------------------------------------------------------
# Night list
# ---------------------------------------------------------------------------
[navigation]
# "descending" lists the newest night first, "ascending" the oldest.
order = "descending"

# ---------------------------------------------------------------------------
# Per-night summary link
# ---------------------------------------------------------------------------
[summary]
enabled = true
# {year}, {month} and {day} are sliced from the YYYYMMDD night id.
# {night} is the id itself.
url_template = "http://desi-www.kpno.noao.edu:8090/nightsum/nightsum-{year}-{month}-{day}/nightsum.html"

# ---------------------------------------------------------------------------
# Thumbnail host
# ---------------------------------------------------------------------------
[images]
# Thumbnails are fetched from {base_url}{night}/{EXPID}.jpg
base_url = "https://portal.nersc.gov/project/desi/users/dkirkby/CI/"

# ---------------------------------------------------------------------------
# Lazy loading
# ---------------------------------------------------------------------------
[lazy]
# Start fetching this many pixels before a thumbnail scrolls into view.
threshold = 1500
# "vertical", "horizontal" or "both".
scroll_direction = "vertical"
# Element whose scrolling reveals thumbnails.
scroll_container = ".mdl-layout__content"

# ---------------------------------------------------------------------------
# Theme / layout
# ---------------------------------------------------------------------------
[theme]
nav_width = "11rem"
thumbnail_size = "240px"
thumbnail_gap = "0.5rem"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#111111"
text_muted = "#666666"
border = "#e0e0e0"
link = "#333333"
selected = "#e8eefc"      # Selected night in the list

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0a0a0a"
text = "#eeeeee"
text_muted = "#999999"
border = "#333333"
link = "#cccccc"
selected = "#1f2a44"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-link: {light_link};
    --color-selected: {light_selected};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-link: {dark_link};
        --color-selected: {dark_selected};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_link = colors.light.link,
        light_selected = colors.light.selected,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_link = colors.dark.link,
        dark_selected = colors.dark.selected,
    )
}

/// Generate CSS custom properties from theme config.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(
        r#":root {{
    --nav-width: {nav_width};
    --thumb-size: {thumbnail_size};
    --thumb-gap: {thumbnail_gap};
}}"#,
        nav_width = theme.nav_width,
        thumbnail_size = theme.thumbnail_size,
        thumbnail_gap = theme.thumbnail_gap,
    )
}
