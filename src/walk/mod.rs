// src/walk/mod.rs
// =============================================================================
// This module drives a whole run over the content tree.
//
// Start -> walk directories -> per file: read, extract, check each link
//       -> fold file reports into a RunReport -> caller prints and exits
//
// Files are processed one after another. Within a file the Checker decides
// how many links are in flight (see Checker::check_document).
// =============================================================================

mod tree;

use tree::collect_documents;

use std::path::Path;

use crate::checker::Checker;
use crate::config::Config;
use crate::error::Result;
use crate::report::{FileReport, RunReport};

// Checks every document under the configured content root
//
// `on_file` is called as soon as each file is done, so the text report can
// be printed while the run is still going.
//
// Returns an error only for problems with the tree itself (missing root,
// unlistable directory). Unreadable documents become failed FileReports.
pub async fn check_tree(
    config: &Config,
    checker: &Checker,
    mut on_file: impl FnMut(&FileReport),
) -> Result<RunReport> {
    let root = config.content_root.as_path();
    let documents = collect_documents(root, &|path: &Path| config.is_document(path))?;

    tracing::info!(root = %root.display(), documents = documents.len(), "starting link check");

    let mut files = Vec::with_capacity(documents.len());
    for path in documents {
        let report = check_file(root, &path, checker).await;
        on_file(&report);
        files.push(report);
    }

    let run = RunReport::from_files(files);
    tracing::info!(valid = run.valid, broken = run.summary.broken, "link check finished");
    Ok(run)
}

// Checks one document. Reads failures into the report instead of bailing out.
pub async fn check_file(root: &Path, path: &Path, checker: &Checker) -> FileReport {
    let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();

    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read document");
            return FileReport::unreadable(relative, &e);
        }
    };

    let links = checker.check_document(&contents).await;
    tracing::debug!(path = %relative.display(), links = links.len(), "document checked");
    FileReport::checked(relative, links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{LinkStatus, Resolver};
    use crate::report::render_file;
    use crate::testing::{serve_status, test_url_checker, write_doc};
    use std::path::PathBuf;

    fn setup(root: &Path) -> (Config, Checker) {
        let config = Config {
            content_root: root.to_path_buf(),
            ..Config::default()
        };
        let checker = Checker::new(
            Resolver::new(root, config.route_prefix.clone()),
            test_url_checker(),
            config.concurrency,
        );
        (config, checker)
    }

    async fn run(root: &Path) -> RunReport {
        let (config, checker) = setup(root);
        check_tree(&config, &checker, |_| {}).await.expect("run")
    }

    #[tokio::test]
    async fn test_scenario_internal_link_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_doc(dir.path(), "index.md", "# Home\n");
        write_doc(dir.path(), "guide.md", "Go [Home](/docs/index.md)\n");

        let report = run(dir.path()).await;
        let guide = &report.files[0];
        assert_eq!(guide.path, PathBuf::from("guide.md"));
        assert_eq!(guide.links[0].status, LinkStatus::Found);
        assert!(guide.valid);
        assert!(report.valid);
        assert_eq!(report.exit_code(), 0);
    }

    #[tokio::test]
    async fn test_scenario_internal_link_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_doc(dir.path(), "guide.md", "See [Broken](/docs/missing-page.md)\n");

        let report = run(dir.path()).await;
        let guide = &report.files[0];
        assert_eq!(guide.links[0].status, LinkStatus::NotFound);
        assert!(!guide.valid);
        assert_eq!(report.exit_code(), 1);

        let text = render_file(guide);
        assert!(text.contains("❌ /docs/missing-page.md"));
        assert!(text.contains("missing-page.md.mdx"));
        assert!(text.contains("missing-page.md/index.md"));
    }

    #[tokio::test]
    async fn test_scenario_external_link_ok() {
        let url = serve_status("200 OK").await;
        let dir = tempfile::tempdir().expect("tempdir");
        write_doc(dir.path(), "ext.md", &format!("[External]({})\n", url));

        let report = run(dir.path()).await;
        assert_eq!(report.files[0].links[0].status, LinkStatus::ExternalOk);
        assert!(report.valid);
    }

    #[tokio::test]
    async fn test_scenario_anchor_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_doc(dir.path(), "a.md", "# Intro\n\n[Anchor](#section-two)\n");

        let report = run(dir.path()).await;
        assert_eq!(report.files[0].links[0].status, LinkStatus::SkippedAnchor);
        assert!(report.files[0].valid);
        assert!(report.valid);
    }

    #[tokio::test]
    async fn test_scenario_unclassified_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_doc(dir.path(), "a.md", "[Ambiguous](mailto:user@example.com)\n");

        let report = run(dir.path()).await;
        assert_eq!(report.files[0].links[0].status, LinkStatus::SkippedOther);
        assert!(report.valid);
    }

    #[tokio::test]
    async fn test_file_without_links_reported_valid() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_doc(dir.path(), "plain.md", "# Nothing to see\n");

        let mut printed = Vec::new();
        let (config, checker) = setup(dir.path());
        let report = check_tree(&config, &checker, |file| printed.push(render_file(file)))
            .await
            .expect("run");

        assert!(report.valid);
        assert_eq!(printed.len(), 1);
        assert!(printed[0].contains("No links found"));
    }

    #[tokio::test]
    async fn test_one_bad_file_fails_run() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_doc(dir.path(), "a.md", "[ok](/docs/b)\n");
        write_doc(dir.path(), "b.md", "[bad](/docs/nowhere)\n");

        let report = run(dir.path()).await;
        assert!(report.files[0].valid);
        assert!(!report.files[1].valid);
        assert!(!report.valid);
        assert_eq!(report.summary.invalid_files, 1);
    }

    #[tokio::test]
    async fn test_runs_are_idempotent() {
        let url = serve_status("404 Not Found").await;
        let dir = tempfile::tempdir().expect("tempdir");
        write_doc(dir.path(), "index.mdx", "[x](/docs/guide) [y](#top)\n");
        write_doc(dir.path(), "guide/index.md", &format!("[u]({}) [v](/docs)\n", url));

        let first = run(dir.path()).await;
        let second = run(dir.path()).await;

        let render = |r: &RunReport| r.files.iter().map(render_file).collect::<String>();
        assert_eq!(render(&first), render(&second));
        assert_eq!(first.valid, second.valid);
        assert_eq!(first.summary, second.summary);
    }

    #[tokio::test]
    async fn test_missing_root_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (config, checker) = setup(&dir.path().join("docs"));
        assert!(check_tree(&config, &checker, |_| {}).await.is_err());
    }

    #[tokio::test]
    async fn test_unreadable_file_is_reported_not_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_doc(dir.path(), "a.md", "[ok](#x)\n");
        // Invalid UTF-8 makes read_to_string fail regardless of permissions
        std::fs::write(dir.path().join("b.md"), [0xff, 0xfe, 0x00]).expect("write bytes");

        let report = run(dir.path()).await;
        assert_eq!(report.files.len(), 2);
        assert!(report.files[0].valid);
        assert!(report.files[1].read_error.is_some());
        assert!(!report.valid);
    }
}
