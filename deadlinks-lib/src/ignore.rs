use std::io::{BufRead, BufReader, Read};

/// Exact-match hrefs that are exempt from verification.
///
/// An ignored reference short-circuits before any verification or caching
/// occurs: it is never passed to a verifier, never cached, and never
/// reported, regardless of its actual liveness.
#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    // Sorted ascending for binary search. Duplicates are harmless.
    hrefs: Vec<String>,
}

impl IgnoreList {
    /// Build a list from raw href strings.
    #[must_use]
    pub fn new(mut hrefs: Vec<String>) -> Self {
        hrefs.sort();
        Self { hrefs }
    }

    /// Read the ignore-file format: one literal href per line, surrounding
    /// whitespace trimmed. Blank lines become empty strings, which never
    /// match because empty references are never extracted.
    ///
    /// # Errors
    ///
    /// Fails on any read error; a partially loaded ignore list would make
    /// the scan's output unreliable.
    pub fn from_reader<R: Read>(reader: R) -> std::io::Result<Self> {
        let mut hrefs = Vec::new();
        for line in BufReader::new(reader).lines() {
            hrefs.push(line?.trim().to_string());
        }
        Ok(Self::new(hrefs))
    }

    /// Whether `href` is exempt from checking.
    #[must_use]
    pub fn is_ignored(&self, href: &str) -> bool {
        self.hrefs
            .binary_search_by(|probe| probe.as_str().cmp(href))
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_exact_hrefs_only() {
        let ignored = IgnoreList::new(vec![
            "https://example.com/flaky".into(),
            "/draft.html".into(),
        ]);
        assert!(ignored.is_ignored("/draft.html"));
        assert!(ignored.is_ignored("https://example.com/flaky"));
        assert!(!ignored.is_ignored("/draft.htm"));
        assert!(!ignored.is_ignored("https://example.com/flaky/"));
    }

    #[test]
    fn reads_one_href_per_line_trimmed() {
        let file = "  /draft.html\n\nhttps://example.com/flaky  \n";
        let ignored = IgnoreList::from_reader(file.as_bytes()).unwrap();
        assert!(ignored.is_ignored("/draft.html"));
        assert!(ignored.is_ignored("https://example.com/flaky"));
        assert!(ignored.is_ignored(""));
    }

    #[test]
    fn duplicates_are_harmless() {
        let ignored = IgnoreList::new(vec!["a".into(), "a".into(), "b".into()]);
        assert!(ignored.is_ignored("a"));
        assert!(ignored.is_ignored("b"));
        assert!(!ignored.is_ignored("c"));
    }

    #[test]
    fn empty_list_ignores_nothing() {
        assert!(!IgnoreList::default().is_ignored("anything"));
    }
}
