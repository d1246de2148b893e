// src/checker/local.rs
// =============================================================================
// Resolves internal links ("/docs/guide/setup") to files in the content tree.
//
// A documentation site drops the file extension from its URLs and serves a
// folder's index page at the folder URL, so one link can correspond to
// several files. We build the list of candidate paths and accept the link if
// any of them exists:
//
//   /docs/guide/setup#install
//     -> strip "#install"                 /docs/guide/setup
//     -> strip route prefix "/docs"       /guide/setup
//     -> join under content root          docs/guide/setup
//     -> candidates                       docs/guide/setup.mdx
//                                         docs/guide/setup.md
//                                         docs/guide/setup/index.mdx
//                                         docs/guide/setup/index.md
//
// When the link already names a file ("/docs/index.md") that exact path is
// tried first.
//
// "." and ".." segments are folded the way a browser folds them before any
// of this happens, so a candidate can never point outside the content root.
// =============================================================================

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::classify::{classify, LinkKind};

/// Outcome of checking one internal link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalCheck {
    /// The first candidate that exists, if any
    pub found: Option<PathBuf>,
    /// Every candidate, in the order they were tried
    pub tried: Vec<PathBuf>,
}

/// Maps internal link targets onto the content root.
#[derive(Debug, Clone)]
pub struct Resolver {
    content_root: PathBuf,
    route_prefix: String,
}

impl Resolver {
    pub fn new(content_root: impl Into<PathBuf>, route_prefix: impl Into<String>) -> Self {
        Self {
            content_root: content_root.into(),
            route_prefix: route_prefix.into(),
        }
    }

    // Candidate files for an internal target, or None if `target` isn't
    // internal at all (anchors, URLs, mailto: ...).
    pub fn candidates(&self, target: &str) -> Option<Vec<PathBuf>> {
        if classify(target) != LinkKind::Internal {
            return None;
        }

        let path = normalize_url_path(strip_fragment(target));
        let path = self.strip_route_prefix(&path);
        let relative = path.trim_matches('/');

        let mut candidates = Vec::with_capacity(5);

        if relative.is_empty() {
            // The route prefix itself: only the root index page can answer.
            candidates.push(self.content_root.join("index.mdx"));
            candidates.push(self.content_root.join("index.md"));
            return Some(candidates);
        }

        let base = self.content_root.join(relative);

        if base.extension().is_some() {
            candidates.push(base.clone());
        }
        candidates.push(with_suffix(&base, ".mdx"));
        candidates.push(with_suffix(&base, ".md"));
        candidates.push(base.join("index.mdx"));
        candidates.push(base.join("index.md"));

        Some(candidates)
    }

    /// Checks an internal target against the filesystem.
    ///
    /// Returns `None` when the target is not an internal link, so callers can
    /// tell "not subject to this check" apart from "checked and missing".
    pub fn check(&self, target: &str) -> Option<LocalCheck> {
        let tried = self.candidates(target)?;
        let found = tried.iter().find(|candidate| candidate.exists()).cloned();

        match &found {
            Some(path) => {
                tracing::debug!(link = target, path = %path.display(), "internal link resolved")
            }
            None => {
                tracing::debug!(link = target, tried = tried.len(), "internal link not found")
            }
        }

        Some(LocalCheck { found, tried })
    }

    // "/docs/intro" -> "/intro" for prefix "/docs"; "/docsearch" stays as is.
    fn strip_route_prefix<'a>(&self, path: &'a str) -> &'a str {
        let prefix = self.route_prefix.trim_end_matches('/');
        if prefix.is_empty() {
            return path;
        }
        match path.strip_prefix(prefix) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => path,
        }
    }
}

fn strip_fragment(target: &str) -> &str {
    target.split_once('#').map_or(target, |(path, _)| path)
}

// "/a/./b/../c" -> "/a/c". A ".." at the top is dropped, as in a browser,
// so "/../../etc" becomes "/etc".
fn normalize_url_path(path: &str) -> String {
    let segments = path
        .split('/')
        .fold(Vec::new(), |mut kept, segment| {
            match segment {
                "" | "." => {}
                ".." => {
                    kept.pop();
                }
                name => kept.push(name),
            }
            kept
        });
    format!("/{}", segments.join("/"))
}

// Appends to the file name itself: "setup" + ".md" = "setup.md",
// "index.md" + ".md" = "index.md.md" (with_extension would replace instead).
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Option<Vec<PathBuf>> instead of an empty Vec for non-internal links?
//    - An empty list would look like "nothing to try, so it's missing"
//    - None says "this function doesn't apply", which the caller must handle
//
// 2. What does the '?' do in `self.candidates(target)?` inside check()?
//    - On Option, '?' returns None early, just like it returns Err for Result
//
// 3. Why does normalize_url_path return a String?
//    - Folding ".." removes pieces from the middle, so the result is no
//      longer one contiguous slice of the input
//
// 4. Why the lifetime 'a on strip_route_prefix?
//    - The returned &str is a slice of `path`, not of `self`
//    - Naming the lifetime tells the compiler which input it borrows from
// -----------------------------------------------------------------------------
