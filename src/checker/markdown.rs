// src/checker/markdown.rs
// =============================================================================
// This module extracts links from Markdown/MDX text.
//
// We only care about inline links: `[text](target)`. A single regex pass
// finds them, in order of appearance. We deliberately do NOT run a full
// Markdown parser here:
// - MDX files contain JSX that CommonMark parsers misread
// - inline link syntax is all the checker needs
//
// Not recognized: reference-style links (`[text][ref]`), raw HTML <a> tags,
// and targets that wrap onto the next line.
//
// Rust concepts:
// - LazyLock: compile the regex once, on first use
// - Iterators: links() is lazy and can be called again for a fresh pass
// =============================================================================

use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::LazyLock;

// Bracketed label, then immediately a parenthesized target on the same line.
// The pattern is a constant, so a failure here is a programmer error.
static INLINE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\(([^)\n]+)\)").expect("inline link pattern is valid")
});

/// One inline link found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRecord {
    /// The display text between the brackets
    pub text: String,
    /// The raw target between the parentheses
    pub url: String,
    /// The full matched syntax, e.g. `[Home](/docs/index.md)`
    pub full: String,
}

impl LinkRecord {
    fn from_captures(caps: &Captures<'_>) -> Self {
        Self {
            text: caps[1].to_string(),
            url: caps[2].to_string(),
            full: caps[0].to_string(),
        }
    }
}

// Lazily yields every inline link in `markdown`
//
// Example input:
//   "See [Home](/docs/index.md) and [Rust](https://www.rust-lang.org)"
//
// Yields:
//   LinkRecord { text: "Home", url: "/docs/index.md", .. }
//   LinkRecord { text: "Rust", url: "https://www.rust-lang.org", .. }
pub fn links(markdown: &str) -> impl Iterator<Item = LinkRecord> + '_ {
    INLINE_LINK
        .captures_iter(markdown)
        .map(|caps| LinkRecord::from_captures(&caps))
}

// Same as links(), materialized. Documents are small enough for this.
pub fn extract_links(markdown: &str) -> Vec<LinkRecord> {
    links(markdown).collect()
}
