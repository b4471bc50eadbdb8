use std::fs;
use std::path::Path;

use log::info;

use crate::cache::Cache;
use crate::checker::Checker;
use crate::extract;
use crate::ignore::IgnoreList;
use crate::{DeadLink, DocumentList, ErrorKind, Result};

/// Drives a whole scan: every root, every document, every reference.
///
/// For each extracted reference the scanner consults the outcome cache,
/// then the ignore list; both short-circuit before any verification work.
/// Documents are processed one at a time and references verified one at a
/// time, so the memoization needs no synchronization. The dead-link list is
/// sorted before being returned, so verification order never leaks into the
/// output.
#[derive(Debug)]
pub struct Scanner {
    checker: Checker,
    ignored: IgnoreList,
    cache: Cache,
}

impl Scanner {
    /// Create a scanner with a fresh, empty outcome cache.
    #[must_use]
    pub fn new(checker: Checker, ignored: IgnoreList) -> Self {
        Self {
            checker,
            ignored,
            cache: Cache::new(),
        }
    }

    /// Scan every document in every list, returning the references whose
    /// outcome was dead, sorted lexicographically by href.
    ///
    /// # Errors
    ///
    /// Fails if any document cannot be read. A document that cannot be read
    /// is an input problem, not a link-liveness problem, and it invalidates
    /// the whole scan's output.
    pub async fn scan(mut self, lists: &[DocumentList]) -> Result<Vec<DeadLink>> {
        for list in lists {
            for relative in list.relative_paths() {
                self.scan_document(list.root(), relative).await?;
            }
        }
        Ok(self.cache.dead_links())
    }

    async fn scan_document(&mut self, root: &Path, relative: &Path) -> Result<()> {
        let path = root.join(relative);
        info!("scanning {}", path.display());

        let html = fs::read_to_string(&path).map_err(|e| ErrorKind::IoError(path.clone(), e))?;
        let extraction = extract::extract(&html);

        for href in &extraction.references {
            if self.cache.contains(href) {
                continue;
            }
            if self.ignored.is_ignored(href) {
                info!("ignoring {href}");
                continue;
            }
            let checker = &self.checker;
            self.cache
                .lookup_or_compute(href, || {
                    checker.check(href, root, relative, &extraction.fragments)
                })
                .await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{find_documents, DEFAULT_MAX_RETRIES};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use std::time::Duration;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn write(root: &Path, relative: &str, html: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, html).unwrap();
    }

    fn scanner() -> Scanner {
        let checker = Checker::new(Duration::from_secs(5), DEFAULT_MAX_RETRIES).unwrap();
        Scanner::new(checker, IgnoreList::default())
    }

    async fn scan(root: &Path, scanner: Scanner) -> Vec<DeadLink> {
        let lists = find_documents(&[root.to_path_buf()], &[]).unwrap();
        scanner.scan(&lists).await.unwrap()
    }

    #[tokio::test]
    async fn reports_missing_targets_sorted_by_href() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "index.html",
            r#"
                <a href="/dead.html">a</a>
                <a href="dead/">b</a>
                <a href="../dead.html">c</a>
                <a href="/live.html">d</a>
            "#,
        );
        write(dir.path(), "live.html", "<html></html>");

        let dead = scan(dir.path(), scanner()).await;
        let hrefs: Vec<&str> = dead.iter().map(|d| d.href.as_str()).collect();
        assert_eq!(hrefs, vec!["../dead.html", "/dead.html", "dead/"]);
    }

    #[tokio::test]
    async fn repeated_references_are_verified_once() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1) // three occurrences, one probe
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let link = format!(r#"<a href="{}/page">x</a>"#, server.uri());
        write(dir.path(), "a.html", &link);
        write(dir.path(), "b.html", &link);
        write(dir.path(), "c.html", &format!("{link}{link}"));

        let dead = scan(dir.path(), scanner()).await;
        assert_eq!(dead, Vec::<DeadLink>::new());
    }

    #[tokio::test]
    async fn ignored_references_are_never_verified() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(404))
            .expect(0)
            .mount(&server)
            .await;

        let url = format!("{}/gone", server.uri());
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "index.html",
            &format!(r#"<a href="{url}">x</a><a href="/draft.html">y</a>"#),
        );

        let checker = Checker::new(Duration::from_secs(5), 0).unwrap();
        let ignored = IgnoreList::new(vec![url, "/draft.html".into()]);
        let dead = scan(dir.path(), Scanner::new(checker, ignored)).await;
        assert_eq!(dead, Vec::<DeadLink>::new());
    }

    #[tokio::test]
    async fn same_page_fragments_resolve_against_their_own_document() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "index.html",
            r##"<a href="#section-1">good</a><a href="#nowhere">bad</a><h2 id="section-1">One</h2>"##,
        );

        let dead = scan(dir.path(), scanner()).await;
        let hrefs: Vec<&str> = dead.iter().map(|d| d.href.as_str()).collect();
        assert_eq!(hrefs, vec!["#nowhere"]);
        assert_eq!(dead[0].diagnostic, "<#nowhere>: not found");
    }

    #[tokio::test]
    async fn repeated_scans_are_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "index.html",
            r#"<a href="missing.html">x</a><a href="also-missing.html">y</a>"#,
        );

        let first = scan(dir.path(), scanner()).await;
        let second = scan(dir.path(), scanner()).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn unreadable_document_aborts_the_scan() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "index.html", "<html></html>");
        let lists = vec![DocumentList::new(
            dir.path().to_path_buf(),
            vec![PathBuf::from("vanished.html")],
        )];

        let result = scanner().scan(&lists).await;
        assert!(matches!(result, Err(ErrorKind::IoError(_, _))));
    }
}
