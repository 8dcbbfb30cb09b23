//! # Night Gallery
//!
//! A static thumbnail gallery for nightly telescope exposure sets. A night is
//! one observing session (`YYYYMMDD`); each night holds the exposures taken
//! during it, and each exposure has a thumbnail JPEG on a remote host.
//!
//! # Pipeline
//!
//! ```text
//! 1. Merge     scratch/YYYYMMDD/YYYYMMDD.yaml  →  merged.json
//! 2. Generate  merged.json                     →  dist/
//! ```
//!
//! The generated site lists every night; selecting one fills the content
//! panel with placeholders whose images are fetched only as they scroll near
//! the viewport.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | The gallery controller: night list, selection, panel rebuild |
//! | [`selection`] | Two-state selection model, pure transitions |
//! | [`panel`] | In-memory night list and content panel |
//! | [`lazy`] | Lazy-loading capability trait and the observer-backed loader |
//! | [`urls`] | Thumbnail and night summary URL derivation |
//! | [`dataset`] | The night → exposures mapping (`merged.json`) |
//! | [`merge`] | Stage 1: collect per-night YAML lists into a dataset |
//! | [`generate`] | Stage 2: render the static site with Maud |
//! | [`config`] | `night-gallery.toml` loading, layering, validation, CSS variables |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Controller Without a DOM
//!
//! The controller works on plain data ([`panel::NavList`],
//! [`panel::ContentPanel`]) and talks to image loading only through
//! [`lazy::LazyLoader`]. The site generator drives it to pre-render one page
//! per night, tests drive it directly, and the browser runtime mirrors its
//! steps. There is no global state; the dataset and selection live on the
//! controller.
//!
//! ## Variants by Configuration
//!
//! Night order (`ascending`/`descending`) and the summary link are config
//! switches rather than separate code paths. The defaults list the newest
//! night first and show the summary link.

pub mod config;
pub mod controller;
pub mod dataset;
pub mod generate;
pub mod lazy;
pub mod merge;
pub mod output;
pub mod panel;
pub mod selection;
pub mod urls;

#[cfg(test)]
pub(crate) mod test_helpers;
