// src/checker/classify.rs
// =============================================================================
// Decides which checker a link target goes to.
//
// Rules, first match wins:
//   1. "#..."               -> same-document anchor (never checked)
//   2. "/..." but not "//"  -> internal content reference (filesystem check)
//   3. "http://", "https://" -> external URL (network request)
//   4. anything else        -> unclassified (mailto:, ./relative, //cdn, ...)
// =============================================================================

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Anchor,
    Internal,
    External,
    Other,
}

pub fn classify(target: &str) -> LinkKind {
    if target.starts_with('#') {
        LinkKind::Anchor
    } else if target.starts_with('/') && !target.starts_with("//") {
        LinkKind::Internal
    } else if target.starts_with("http://") || target.starts_with("https://") {
        LinkKind::External
    } else {
        LinkKind::Other
    }
}
