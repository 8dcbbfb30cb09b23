//! Merge per-night exposure lists into one dataset.
//!
//! Stage 1 of the build. The thumbnail producer leaves one directory per
//! night under a scratch root, each holding the rendered JPEGs and a YAML list
//! of the exposures it processed:
//!
//! ```text
//! $SCRATCH/CI/
//! ├── 20190912/
//! │   ├── 20190912.yaml      # [{EXPID: '00004521', RA: 150.1, DEC: 2.2}, ...]
//! │   ├── 00004521.jpg
//! │   └── ...
//! ├── 20190913/              # no YAML yet → skipped
//! └── notes/                 # not a night id → ignored
//! ```
//!
//! The result is a [`NightDataset`], written out as `merged.json`.
//!
//! Only top-level directories whose name is an eight-digit night id (and that
//! start with the optional prefix, e.g. `2019`) are considered. YAML files are
//! parsed in parallel; outcomes are reported in night order.

use crate::dataset::{Exposure, NightDataset};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Scratch directory does not exist: {0}")]
    MissingRoot(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("YAML error in {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What happened to one night directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NightOutcome {
    Merged { night: String, exposures: usize },
    /// The directory has no `{night}.yaml`.
    Skipped { night: String },
}

impl NightOutcome {
    pub fn night(&self) -> &str {
        match self {
            NightOutcome::Merged { night, .. } | NightOutcome::Skipped { night } => night,
        }
    }
}

#[derive(Debug)]
pub struct MergeResult {
    pub dataset: NightDataset,
    /// One entry per night directory, ascending.
    pub outcomes: Vec<NightOutcome>,
}

impl MergeResult {
    pub fn total_exposures(&self) -> usize {
        self.dataset.total_exposures()
    }
}

/// `YYYYMMDD`: exactly eight ASCII digits.
pub fn is_night_id(name: &str) -> bool {
    name.len() == 8 && name.bytes().all(|b| b.is_ascii_digit())
}

pub fn merge(root: &Path, prefix: &str) -> Result<MergeResult, MergeError> {
    if !root.is_dir() {
        return Err(MergeError::MissingRoot(root.to_path_buf()));
    }

    let nights = find_night_dirs(root, prefix)?;
    tracing::debug!(root = %root.display(), count = nights.len(), "night directories found");

    let outcomes: Vec<(NightOutcome, Option<Vec<Exposure>>)> = nights
        .par_iter()
        .map(|(night, dir)| read_night(night, dir))
        .collect::<Result<_, _>>()?;

    let mut dataset = NightDataset::new();
    let mut report = Vec::with_capacity(outcomes.len());
    for (outcome, exposures) in outcomes {
        if let Some(exposures) = exposures {
            dataset.insert(outcome.night(), exposures);
        }
        report.push(outcome);
    }

    Ok(MergeResult {
        dataset,
        outcomes: report,
    })
}

/// Write the dataset as pretty JSON.
pub fn write_merged(dataset: &NightDataset, path: &Path) -> Result<(), MergeError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(dataset)?;
    fs::write(path, json)?;
    Ok(())
}

fn find_night_dirs(root: &Path, prefix: &str) -> Result<Vec<(String, PathBuf)>, MergeError> {
    let mut nights = Vec::new();
    // Night directories are often links into a bulk scratch area.
    for entry in WalkDir::new(root)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_night_id(&name) && name.starts_with(prefix) {
            nights.push((name, entry.into_path()));
        }
    }
    Ok(nights)
}

fn read_night(
    night: &str,
    dir: &Path,
) -> Result<(NightOutcome, Option<Vec<Exposure>>), MergeError> {
    let path = dir.join(format!("{night}.yaml"));
    if !path.is_file() {
        tracing::debug!(night, "no exposure list");
        return Ok((
            NightOutcome::Skipped {
                night: night.to_string(),
            },
            None,
        ));
    }

    let content = fs::read_to_string(&path)?;
    let exposures: Option<Vec<Exposure>> =
        serde_yaml::from_str(&content).map_err(|source| MergeError::Yaml {
            path: path.clone(),
            source,
        })?;
    let exposures = exposures.unwrap_or_default();

    Ok((
        NightOutcome::Merged {
            night: night.to_string(),
            exposures: exposures.len(),
        },
        Some(exposures),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn night_id_shape() {
        assert!(is_night_id("20190912"));
        assert!(!is_night_id("2019091"));
        assert!(!is_night_id("201909120"));
        assert!(!is_night_id("2019-9-1"));
    }

    #[test]
    fn merges_nights_with_exposure_lists() {
        let scratch = setup_scratch();
        let result = merge(scratch.path(), "").unwrap();

        // 20190912 (2), 20190913 (1), 20200101 (empty list)
        assert_eq!(result.dataset.len(), 3);
        assert_eq!(result.total_exposures(), 3);
        let first = result.dataset.get("20190912").unwrap();
        assert_eq!(first[0].expid, "00004521");
        assert_eq!(first[0].ra, Some(150.1));
    }

    #[test]
    fn skips_nights_without_yaml() {
        let scratch = setup_scratch();
        let result = merge(scratch.path(), "").unwrap();

        assert!(result.outcomes.contains(&NightOutcome::Skipped {
            night: "20190914".to_string()
        }));
        assert!(!result.dataset.contains("20190914"));
    }

    #[test]
    fn outcomes_are_in_night_order() {
        let scratch = setup_scratch();
        let result = merge(scratch.path(), "").unwrap();
        let nights: Vec<&str> = result.outcomes.iter().map(NightOutcome::night).collect();
        assert_eq!(nights, vec!["20190912", "20190913", "20190914", "20200101"]);
    }

    #[test]
    fn ignores_non_night_entries() {
        let scratch = setup_scratch();
        let result = merge(scratch.path(), "").unwrap();
        assert!(result.outcomes.iter().all(|o| is_night_id(o.night())));
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlinked_night_dirs() {
        let scratch = setup_scratch();
        let elsewhere = TempDir::new().unwrap();
        write_night_yaml(elsewhere.path(), "20190920", "- EXPID: '00004700'\n");
        std::os::unix::fs::symlink(
            elsewhere.path().join("20190920"),
            scratch.path().join("20190920"),
        )
        .unwrap();

        let result = merge(scratch.path(), "").unwrap();
        let linked = result.dataset.get("20190920").unwrap();
        assert_eq!(linked[0].expid, "00004700");
        assert!(result.outcomes.contains(&NightOutcome::Merged {
            night: "20190920".to_string(),
            exposures: 1,
        }));
    }

    #[test]
    fn prefix_restricts_nights() {
        let scratch = setup_scratch();
        let result = merge(scratch.path(), "2020").unwrap();
        let nights: Vec<&str> = result.outcomes.iter().map(NightOutcome::night).collect();
        assert_eq!(nights, vec!["20200101"]);
        // An empty YAML list still counts as merged
        assert_eq!(result.dataset.get("20200101"), Some(&[][..]));
    }

    #[test]
    fn missing_root_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = merge(&tmp.path().join("absent"), "");
        assert!(matches!(result, Err(MergeError::MissingRoot(_))));
    }

    #[test]
    fn malformed_yaml_names_the_file() {
        let scratch = setup_scratch();
        write_night_yaml(scratch.path(), "20190915", "EXPID: [unterminated");
        let err = merge(scratch.path(), "").unwrap_err();
        match err {
            MergeError::Yaml { path, .. } => assert!(path.ends_with("20190915/20190915.yaml")),
            other => panic!("expected YAML error, got {other:?}"),
        }
    }

    #[test]
    fn write_merged_round_trips() {
        let scratch = setup_scratch();
        let result = merge(scratch.path(), "").unwrap();
        let out = scratch.path().join("out/merged.json");
        write_merged(&result.dataset, &out).unwrap();

        let loaded = NightDataset::load(&out).unwrap();
        assert_eq!(loaded, result.dataset);
    }
}
