// src/report.rs
// =============================================================================
// Per-file and per-run results, and how they are printed.
//
// Validity is folded bottom-up, never tracked in a shared flag:
// - a link is valid unless it is NotFound or ExternalError (skips are valid)
// - a file is valid iff it could be read and all of its links are valid
// - a run is valid iff all of its files are valid
//
// Two output formats:
// - text: one block per file, one line per link, then a summary
// - JSON: the whole RunReport, for scripts
// =============================================================================

use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::checker::{LinkReport, LinkStatus};
use crate::error::Result;

// Everything we found out about one document
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Path relative to the content root
    pub path: PathBuf,
    pub valid: bool,
    pub links: Vec<LinkReport>,
    /// Set when the document couldn't be read; the file then counts as invalid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_error: Option<String>,
}

impl FileReport {
    pub fn checked(path: PathBuf, links: Vec<LinkReport>) -> Self {
        let valid = links.iter().all(LinkReport::is_valid);
        Self {
            path,
            valid,
            links,
            read_error: None,
        }
    }

    pub fn unreadable(path: PathBuf, error: &std::io::Error) -> Self {
        Self {
            path,
            valid: false,
            links: Vec::new(),
            read_error: Some(error.to_string()),
        }
    }
}

// Counters shown at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub files: usize,
    pub invalid_files: usize,
    pub links: usize,
    pub checked: usize,
    pub skipped: usize,
    pub broken: usize,
}

// The whole run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub valid: bool,
    pub summary: Summary,
    pub files: Vec<FileReport>,
}

impl RunReport {
    pub fn from_files(files: Vec<FileReport>) -> Self {
        let summary = files.iter().fold(Summary::default(), |mut acc, file| {
            acc.files += 1;
            acc.invalid_files += usize::from(!file.valid);
            for link in &file.links {
                acc.links += 1;
                if link.status.is_skipped() {
                    acc.skipped += 1;
                } else {
                    acc.checked += 1;
                }
                acc.broken += usize::from(!link.is_valid());
            }
            acc
        });

        Self {
            valid: files.iter().all(|f| f.valid),
            summary,
            files,
        }
    }

    /// Process exit code: 0 when everything is valid, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.valid {
            0
        } else {
            1
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// Renders the text block for one file
//
// Example:
//   📄 guide/setup.md
//      ✅ /docs/intro
//      ❌ /docs/missing (file not found)
//         tried: docs/missing.mdx
//      ⏭️  #install (same-file anchor, skipped)
pub fn render_file(file: &FileReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📄 {}", file.path.display());

    if let Some(error) = &file.read_error {
        let _ = writeln!(out, "   ❌ could not read file: {}", error);
        return out;
    }

    if file.links.is_empty() {
        let _ = writeln!(out, "   ℹ️  No links found");
        return out;
    }

    for link in &file.links {
        let target = &link.link.url;
        let detail = link.detail.as_deref().unwrap_or("");
        match link.status {
            LinkStatus::Found | LinkStatus::ExternalOk => {
                let _ = writeln!(out, "   ✅ {}", target);
            }
            LinkStatus::NotFound | LinkStatus::ExternalError => {
                let _ = writeln!(out, "   ❌ {} ({})", target, detail);
                for candidate in &link.tried {
                    let _ = writeln!(out, "      tried: {}", candidate.display());
                }
            }
            LinkStatus::SkippedAnchor => {
                let _ = writeln!(out, "   ⏭️  {} (same-file anchor, skipped)", target);
            }
            LinkStatus::SkippedOther => {
                let _ = writeln!(out, "   ⚠️  {} (unclassified link, skipped)", target);
            }
        }
    }

    out
}

// Renders the closing summary, ending with the single pass/fail line
pub fn render_summary(report: &RunReport) -> String {
    let s = &report.summary;
    let mut out = String::new();
    let _ = writeln!(out, "📊 Summary:");
    let _ = writeln!(out, "   📄 Files: {}", s.files);
    let _ = writeln!(
        out,
        "   🔗 Links: {} ({} checked, {} skipped)",
        s.links, s.checked, s.skipped
    );
    let _ = writeln!(out, "   ❌ Broken: {}", s.broken);
    let _ = writeln!(out);

    if report.valid {
        let _ = writeln!(out, "✅ All links are valid!");
    } else {
        let _ = writeln!(
            out,
            "❌ Some links are invalid: {} broken link(s) in {} file(s)",
            s.broken, s.invalid_files
        );
    }

    out
}
