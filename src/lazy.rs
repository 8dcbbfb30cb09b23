//! Visibility-triggered image loading.
//!
//! The controller never fetches anything itself. After rebuilding the content
//! panel it hands every placeholder to a [`LazyLoader`], which decides when
//! each deferred source is actually requested. In the generated site that is
//! an `IntersectionObserver` in the browser runtime; [`ObserverLoader`]
//! captures the activation as a [`LazyPlan`] for the page renderer.
//!
//! Results come back to the controller as [`LoadEvent`]s. Failures go to the
//! [`ErrorCallback`], which by default logs the deferred source.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Axis along which the scroll container reveals images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Vertical,
    Horizontal,
    Both,
}

impl ScrollDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrollDirection::Vertical => "vertical",
            ScrollDirection::Horizontal => "horizontal",
            ScrollDirection::Both => "both",
        }
    }
}

/// Invoked with the deferred source of every image that fails to load.
#[derive(Clone)]
pub struct ErrorCallback(Arc<dyn Fn(&str) + Send + Sync>);

impl ErrorCallback {
    pub fn new(f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, src: &str) {
        (self.0)(src)
    }
}

impl Default for ErrorCallback {
    fn default() -> Self {
        Self::new(log_load_error)
    }
}

impl fmt::Debug for ErrorCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ErrorCallback")
    }
}

/// Default error callback.
pub fn log_load_error(src: &str) {
    tracing::warn!(src, "ERROR lazy loading");
}

/// Loader settings fixed for the lifetime of a controller.
#[derive(Debug, Clone)]
pub struct LazyOptions {
    pub scroll_direction: ScrollDirection,
    /// Selector of the element whose scrolling reveals images.
    pub scroll_container: String,
    /// Pixels ahead of the visible area at which fetching starts.
    pub threshold: u32,
    pub on_error: ErrorCallback,
}

impl LazyOptions {
    pub fn from_config(config: &crate::config::LazyConfig) -> Self {
        Self {
            scroll_direction: config.scroll_direction,
            scroll_container: config.scroll_container.clone(),
            threshold: config.threshold,
            on_error: ErrorCallback::default(),
        }
    }
}

impl Default for LazyOptions {
    fn default() -> Self {
        Self::from_config(&crate::config::LazyConfig::default())
    }
}

/// A placeholder image whose source has not been requested yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredImage<'a> {
    pub title: &'a str,
    pub src: &'a str,
}

/// Everything a loader needs to schedule one panel's images.
#[derive(Debug, Clone)]
pub struct LazyRequest<'a> {
    /// Selector of the element holding the placeholders.
    pub container: &'a str,
    pub images: Vec<DeferredImage<'a>>,
    pub options: &'a LazyOptions,
}

/// Outcome of a deferred fetch, keyed by deferred source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadEvent {
    Loaded(String),
    Failed(String),
}

/// Capability: schedule visibility-triggered loads for a set of images.
///
/// A new activation supersedes the previous one. Loads still in flight for
/// an earlier panel are not cancelled; their events simply no longer match
/// any placeholder.
pub trait LazyLoader {
    fn activate(&mut self, request: LazyRequest<'_>);
}

/// Owned snapshot of the most recent activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LazyPlan {
    pub container: String,
    pub scroll_container: String,
    pub scroll_direction: ScrollDirection,
    pub threshold: u32,
    pub sources: Vec<String>,
}

/// Loader backed by the browser runtime's `IntersectionObserver`.
///
/// Rust-side it only records what to observe; the page renderer turns the
/// plan into `data-*` attributes the runtime reads.
#[derive(Debug, Default)]
pub struct ObserverLoader {
    plan: Option<LazyPlan>,
    activations: usize,
}

impl ObserverLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plan(&self) -> Option<&LazyPlan> {
        self.plan.as_ref()
    }

    pub fn activations(&self) -> usize {
        self.activations
    }
}

impl LazyLoader for ObserverLoader {
    fn activate(&mut self, request: LazyRequest<'_>) {
        self.activations += 1;
        tracing::debug!(
            container = request.container,
            images = request.images.len(),
            threshold = request.options.threshold,
            "observing placeholders"
        );
        self.plan = Some(LazyPlan {
            container: request.container.to_string(),
            scroll_container: request.options.scroll_container.clone(),
            scroll_direction: request.options.scroll_direction,
            threshold: request.options.threshold,
            sources: request.images.iter().map(|i| i.src.to_string()).collect(),
        });
    }
}
