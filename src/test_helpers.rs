//! Shared test utilities for the night-gallery test suite.
//!
//! Provides an in-memory sample dataset, a scratch-directory fixture for the
//! merge stage, and a recording lazy loader.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut gallery = NightGallery::new(&GalleryConfig::default(), RecordingLoader::default());
//! gallery.init_nights(sample_dataset());
//! gallery.click("20230615").unwrap();
//! assert_eq!(gallery.loader().requests.len(), 1);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::config::{GalleryConfig, NavOrder};
use crate::dataset::{Exposure, NightDataset};
use crate::lazy::{LazyLoader, LazyRequest};

// =========================================================================
// Datasets and config
// =========================================================================

/// Three nights, deliberately inserted out of order:
///
/// - `20230101`: 2 exposures
/// - `20230615`: 3 exposures (`00012345`..`00012347`)
/// - `20221231`: 1 exposure (`00009001`)
pub fn sample_dataset() -> NightDataset {
    [
        (
            "20230101".to_string(),
            vec![Exposure::new("00010001"), Exposure::new("00010002")],
        ),
        (
            "20230615".to_string(),
            vec![
                Exposure::new("00012345"),
                Exposure::new("00012346"),
                Exposure::new("00012347"),
            ],
        ),
        ("20221231".to_string(), vec![Exposure::new("00009001")]),
    ]
    .into_iter()
    .collect()
}

pub fn config_with(order: NavOrder, summary: bool) -> GalleryConfig {
    let mut config = GalleryConfig::default();
    config.navigation.order = order;
    config.summary.enabled = summary;
    config
}

// =========================================================================
// Scratch directory fixture
// =========================================================================

/// Build a scratch root the merge stage can read:
///
/// ```text
/// 20190912/20190912.yaml   2 exposures, with RA/DEC
/// 20190913/20190913.yaml   1 exposure, numeric EXPID
/// 20190914/                no YAML
/// 20200101/20200101.yaml   empty list
/// notes/                   not a night
/// README.txt               not a directory
/// ```
pub fn setup_scratch() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write_night_yaml(
        root,
        "20190912",
        "- DEC: 2.2\n  EXPID: '00004521'\n  RA: 150.1\n- DEC: 2.3\n  EXPID: '00004522'\n  RA: 150.2\n",
    );
    write_night_yaml(root, "20190913", "- EXPID: 4602\n");
    std::fs::create_dir_all(root.join("20190914")).unwrap();
    write_night_yaml(root, "20200101", "[]\n");
    std::fs::create_dir_all(root.join("notes")).unwrap();
    std::fs::write(root.join("README.txt"), "scratch").unwrap();

    tmp
}

/// Write `{root}/{night}/{night}.yaml`, creating the directory.
pub fn write_night_yaml(root: &Path, night: &str, yaml: &str) {
    let dir = root.join(night);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(format!("{night}.yaml")), yaml).unwrap();
}

// =========================================================================
// Loaders
// =========================================================================

/// Owned copy of one `LazyRequest`.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub container: String,
    pub scroll_container: String,
    pub threshold: u32,
    pub sources: Vec<String>,
    pub titles: Vec<String>,
}

/// Loader that remembers every activation.
#[derive(Debug, Default)]
pub struct RecordingLoader {
    pub requests: Vec<RecordedRequest>,
}

impl LazyLoader for RecordingLoader {
    fn activate(&mut self, request: LazyRequest<'_>) {
        self.requests.push(RecordedRequest {
            container: request.container.to_string(),
            scroll_container: request.options.scroll_container.clone(),
            threshold: request.options.threshold,
            sources: request.images.iter().map(|i| i.src.to_string()).collect(),
            titles: request.images.iter().map(|i| i.title.to_string()).collect(),
        });
    }
}
