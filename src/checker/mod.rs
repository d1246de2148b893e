// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - markdown: Extracts inline links from Markdown/MDX text
// - classify: Decides whether a target is an anchor, internal, external...
// - local: Resolves internal links against the content tree
// - http: Makes HTTP requests to check if external links are alive
//
// This file (mod.rs) ties them together: Checker takes one document's text
// and returns a LinkReport for every link in it.
// =============================================================================

mod classify;
mod http;
mod local;
mod markdown;

pub use classify::LinkKind;
pub use http::UrlChecker;
pub use local::Resolver;
pub use markdown::LinkRecord;

use classify::classify;
use markdown::extract_links;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;

// What happened to one link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    /// Internal link, a candidate file exists
    Found,
    /// Internal link, no candidate file exists
    NotFound,
    /// External link answered with a success status
    ExternalOk,
    /// External link failed (bad status or transport error)
    ExternalError,
    /// `#anchor` inside the same document, not checked
    SkippedAnchor,
    /// mailto:, relative paths, etc. Not checked
    SkippedOther,
}

impl LinkStatus {
    /// Skipped links count as valid: they never fail a file.
    pub fn is_valid(self) -> bool {
        !matches!(self, Self::NotFound | Self::ExternalError)
    }

    pub fn is_skipped(self) -> bool {
        matches!(self, Self::SkippedAnchor | Self::SkippedOther)
    }

    /// Short tag used in diagnostics
    pub fn tag(self) -> &'static str {
        match self {
            Self::Found => "found",
            Self::NotFound => "not-found",
            Self::ExternalOk => "external-ok",
            Self::ExternalError => "external-error",
            Self::SkippedAnchor => "skipped-anchor",
            Self::SkippedOther => "skipped-other",
        }
    }
}

// The verdict for one link, plus whatever explains it
#[derive(Debug, Clone, Serialize)]
pub struct LinkReport {
    #[serde(flatten)]
    pub link: LinkRecord,
    pub kind: LinkKind,
    pub status: LinkStatus,
    /// Resolved file, HTTP status, or error text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Candidate files tried for a missing internal link
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tried: Vec<PathBuf>,
}

impl LinkReport {
    fn new(link: LinkRecord, kind: LinkKind, status: LinkStatus) -> Self {
        Self {
            link,
            kind,
            status,
            detail: None,
            tried: Vec::new(),
        }
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }
}

/// Dispatches every link of a document to the right check.
#[derive(Debug, Clone)]
pub struct Checker {
    resolver: Resolver,
    url_checker: UrlChecker,
    concurrency: usize,
}

impl Checker {
    pub fn new(resolver: Resolver, url_checker: UrlChecker, concurrency: usize) -> Self {
        Self {
            resolver,
            url_checker,
            concurrency: concurrency.max(1),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let resolver = Resolver::new(&config.content_root, config.route_prefix.clone());
        let url_checker = UrlChecker::new(config.timeout(), config.max_redirects)?;
        Ok(Self::new(resolver, url_checker, config.concurrency))
    }

    // Checks every link in one document
    //
    // buffered() keeps up to `concurrency` checks in flight but yields the
    // results in the original order, so the report reads top to bottom
    // exactly like the document does. With concurrency = 1 this is a plain
    // sequential loop.
    pub async fn check_document(&self, markdown: &str) -> Vec<LinkReport> {
        stream::iter(extract_links(markdown))
            .map(|link| self.check_link(link))
            .buffered(self.concurrency)
            .collect()
            .await
    }

    pub async fn check_link(&self, link: LinkRecord) -> LinkReport {
        let kind = classify(&link.url);
        let report = match kind {
            LinkKind::Anchor => LinkReport::new(link, kind, LinkStatus::SkippedAnchor),
            LinkKind::Other => LinkReport::new(link, kind, LinkStatus::SkippedOther),
            LinkKind::Internal => self.check_internal(link),
            LinkKind::External => self.check_external(link).await,
        };
        tracing::trace!(url = %report.link.url, status = report.status.tag(), "link checked");
        report
    }

    fn check_internal(&self, link: LinkRecord) -> LinkReport {
        let Some(check) = self.resolver.check(&link.url) else {
            return LinkReport::new(link, LinkKind::Other, LinkStatus::SkippedOther);
        };

        match check.found {
            Some(path) => LinkReport::new(link, LinkKind::Internal, LinkStatus::Found)
                .with_detail(path.display().to_string()),
            None => LinkReport {
                tried: check.tried,
                ..LinkReport::new(link, LinkKind::Internal, LinkStatus::NotFound)
                    .with_detail("file not found")
            },
        }
    }

    async fn check_external(&self, link: LinkRecord) -> LinkReport {
        let result = self.url_checker.check(&link.url).await;
        let status = if result.is_ok() {
            LinkStatus::ExternalOk
        } else {
            LinkStatus::ExternalError
        };
        LinkReport::new(link, LinkKind::External, status).with_detail(result.message)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is mod.rs?
//    - When a directory is a module (like src/checker/), mod.rs is its root
//    - `pub use` re-exports items so callers write checker::Resolver
//      instead of checker::local::Resolver
//
// 2. What is `let ... else`?
//    - Destructure, or run the else block (which must return/break)
//    - Keeps the happy path unindented
//
// 3. What is `..LinkReport::new(...)` inside a struct literal?
//    - Struct update syntax: fields not listed are taken from that value
// -----------------------------------------------------------------------------
