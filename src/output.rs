//! CLI output formatting for all stages.
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Merge
//!
//! ```text
//! Nights
//! 001 20190912 (2 exposures)
//! 002 20190913 (1 exposure)
//! 003 20190914
//!     Skipped: no 20190914.yaml
//!
//! Merged 3 exposures from 2 nights
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! 001 20190913 → nights/20190913.html (1 exposure)
//! 002 20190912 → nights/20190912.html (2 exposures)
//!
//! Generated 2 night pages
//! ```
//!
//! ## Show
//!
//! ```text
//! 20190912 (2 exposures)
//!     Summary: http://.../nightsum-2019-09-12/nightsum.html
//!     001 00004521 → https://.../20190912/00004521.jpg
//!     002 00004522 → https://.../20190912/00004522.jpg
//! ```

use crate::controller::NightGallery;
use crate::generate::GenerateReport;
use crate::lazy::LazyLoader;
use crate::merge::{MergeResult, NightOutcome};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn exposures_label(n: usize) -> String {
    match n {
        1 => "1 exposure".to_string(),
        n => format!("{n} exposures"),
    }
}

/// Format merge stage output.
pub fn format_merge_output(result: &MergeResult) -> Vec<String> {
    let mut lines = vec!["Nights".to_string()];
    let mut merged_nights = 0;

    for (i, outcome) in result.outcomes.iter().enumerate() {
        match outcome {
            NightOutcome::Merged { night, exposures } => {
                merged_nights += 1;
                lines.push(format!(
                    "{} {} ({})",
                    format_index(i + 1),
                    night,
                    exposures_label(*exposures)
                ));
            }
            NightOutcome::Skipped { night } => {
                lines.push(format!("{} {}", format_index(i + 1), night));
                lines.push(format!("{}Skipped: no {}.yaml", indent(1), night));
            }
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Merged {} from {} night{}",
        exposures_label(result.total_exposures()),
        merged_nights,
        if merged_nights == 1 { "" } else { "s" }
    ));
    lines
}

pub fn print_merge_output(result: &MergeResult) {
    for line in format_merge_output(result) {
        println!("{}", line);
    }
}

/// Format generate stage output.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = vec![format!("Home → {}", report.index)];
    for (i, page) in report.nights.iter().enumerate() {
        lines.push(format!(
            "{} {} → {} ({})",
            format_index(i + 1),
            page.night,
            page.path,
            exposures_label(page.exposures)
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated {} night page{}",
        report.nights.len(),
        if report.nights.len() == 1 { "" } else { "s" }
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

/// Format the content panel of a gallery after a click.
pub fn format_panel<L: LazyLoader>(gallery: &NightGallery<L>) -> Vec<String> {
    let Some(night) = gallery.selection().night() else {
        return vec!["No night selected".to_string()];
    };
    let panel = gallery.content();
    let mut lines = vec![format!(
        "{} ({})",
        night,
        exposures_label(panel.placeholders().len())
    )];

    if let Some(link) = panel.summary_link() {
        lines.push(format!("{}Summary: {}", indent(1), link));
    }

    let exposures = gallery.dataset().get(night).unwrap_or_default();
    for (i, placeholder) in panel.placeholders().iter().enumerate() {
        lines.push(format!(
            "{}{} {} → {}",
            indent(1),
            format_index(i + 1),
            placeholder.title,
            placeholder.deferred_src
        ));
        if let Some((ra, dec)) = exposures.get(i).and_then(|e| e.ra.zip(e.dec)) {
            lines.push(format!("{}RA {:.4}, DEC {:.4}", indent(2), ra, dec));
        }
    }
    lines
}

pub fn print_panel<L: LazyLoader>(gallery: &NightGallery<L>) {
    for line in format_panel(gallery) {
        println!("{}", line);
    }
}
