//! The night gallery controller.
//!
//! Owns the dataset, the night list, the content panel and the selection, and
//! performs the three interactions a visitor can trigger:
//!
//! ```text
//! init_nights(data)  →  one list entry per night
//! click(night)       →  marker moves, selection advances, load_night(night)
//! load_night(night)  →  panel cleared, summary link, placeholders, loader activated
//! ```
//!
//! Nothing here touches a real DOM. The site generator drives a controller per
//! night to pre-render pages, and the browser runtime repeats the same steps
//! client-side.

use crate::config::{GalleryConfig, NavOrder};
use crate::dataset::NightDataset;
use crate::lazy::{DeferredImage, LazyLoader, LazyOptions, LazyRequest, LoadEvent};
use crate::panel::{ContentPanel, NavList, Placeholder};
use crate::selection::Selection;
use crate::urls;
use thiserror::Error;

/// Selector of the content panel handed to the loader.
pub const CONTENT_SELECTOR: &str = "#content";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GalleryError {
    #[error("Night {0} is not in the dataset")]
    UnknownNight(String),
}

pub struct NightGallery<L: LazyLoader> {
    dataset: NightDataset,
    order: NavOrder,
    summary_template: Option<String>,
    image_base: String,
    lazy: LazyOptions,
    nav: NavList,
    content: ContentPanel,
    selection: Selection,
    loader: L,
}

impl<L: LazyLoader> NightGallery<L> {
    pub fn new(config: &GalleryConfig, loader: L) -> Self {
        Self {
            dataset: NightDataset::new(),
            order: config.navigation.order,
            summary_template: config
                .summary
                .enabled
                .then(|| config.summary.url_template.clone()),
            image_base: config.images.base_url.clone(),
            lazy: LazyOptions::from_config(&config.lazy),
            nav: NavList::default(),
            content: ContentPanel::default(),
            selection: Selection::None,
            loader,
        }
    }

    /// Replace the default logging error callback.
    #[cfg(test)]
    pub(crate) fn with_error_callback(mut self, on_error: crate::lazy::ErrorCallback) -> Self {
        self.lazy.on_error = on_error;
        self
    }

    /// Readiness marker.
    pub fn initialize(&self) {
        tracing::info!("Initialize");
    }

    /// Take ownership of the dataset and rebuild the night list.
    ///
    /// Any previous selection is dropped along with the panel showing it.
    pub fn init_nights(&mut self, data: NightDataset) {
        self.dataset = data;
        self.nav.clear();
        self.content.clear();
        self.selection = Selection::None;
        let nights: Vec<&str> = match self.order {
            NavOrder::Ascending => self.dataset.nights().collect(),
            NavOrder::Descending => self.dataset.nights().rev().collect(),
        };
        for night in nights {
            let count = self.dataset.get(night).map_or(0, <[_]>::len);
            tracing::debug!(night, exposures = count, "night listed");
            self.nav.push(night);
        }
    }

    /// Click on the list entry for `night`.
    ///
    /// Unknown nights are rejected before anything changes.
    pub fn click(&mut self, night: &str) -> Result<(), GalleryError> {
        if !self.dataset.contains(night) {
            return Err(GalleryError::UnknownNight(night.to_string()));
        }
        self.nav.select(night);
        self.selection = self.selection.transition(night);
        self.load_night(night)
    }

    /// Rebuild the content panel for `night`.
    ///
    /// Does not move the list marker or the selection; [`click`](Self::click)
    /// does both before calling this.
    pub fn load_night(&mut self, night: &str) -> Result<(), GalleryError> {
        let exposures = self
            .dataset
            .get(night)
            .ok_or_else(|| GalleryError::UnknownNight(night.to_string()))?;

        self.content.clear();
        tracing::info!(
            "Loading {} with {} exposures...",
            night,
            exposures.len()
        );

        if let Some(template) = &self.summary_template {
            if let Some(url) = urls::summary_url(template, night) {
                self.content.set_summary_link(url);
            }
        }

        for exposure in exposures {
            self.content.push(Placeholder::new(
                exposure.expid.clone(),
                urls::image_url(&self.image_base, night, &exposure.expid),
            ));
        }

        let images = self
            .content
            .placeholders()
            .iter()
            .map(|p| DeferredImage {
                title: &p.title,
                src: &p.deferred_src,
            })
            .collect();
        self.loader.activate(LazyRequest {
            container: CONTENT_SELECTOR,
            images,
            options: &self.lazy,
        });
        Ok(())
    }

    /// Feed back the outcome of a deferred fetch.
    ///
    /// Failures only reach the error callback; the panel is left as it was.
    /// Loads whose source is no longer in the panel (a night switched away
    /// from) change nothing.
    pub fn handle_load_event(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::Loaded(src) => {
                for p in self.content.find_mut(&src) {
                    p.resolve();
                }
            }
            LoadEvent::Failed(src) => self.lazy.on_error.call(&src),
        }
    }

    /// Source a click on placeholder `index` would open in a new tab.
    pub fn open(&self, index: usize) -> Option<&str> {
        self.content.placeholders().get(index)?.open_target()
    }

    pub fn dataset(&self) -> &NightDataset {
        &self.dataset
    }

    pub fn nav(&self) -> &NavList {
        &self.nav
    }

    pub fn content(&self) -> &ContentPanel {
        &self.content
    }

    /// Stand-in for the visitor scrolling the panel.
    #[cfg(test)]
    pub(crate) fn scroll_content(&mut self, top: u32) {
        self.content.scroll_to(top);
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn lazy_options(&self) -> &LazyOptions {
        &self.lazy
    }
}
