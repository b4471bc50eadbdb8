use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::future::Future;

use crate::{DeadLink, Outcome};

/// Memoized verification outcomes, keyed by the raw reference string.
///
/// The cache is what turns O(links) network calls into O(distinct hrefs):
/// each distinct reference is verified at most once per scan, no matter how
/// many documents mention it. It is created empty at scan start, owned by
/// the [`Scanner`](crate::Scanner), and discarded after the dead-link list
/// has been extracted.
#[derive(Debug, Default)]
pub struct Cache {
    outcomes: HashMap<String, Outcome>,
}

impl Cache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an outcome for `href` has already been recorded.
    #[must_use]
    pub fn contains(&self, href: &str) -> bool {
        self.outcomes.contains_key(href)
    }

    /// Return the stored outcome for `href`, computing and recording it
    /// first when absent. `compute` runs at most once per distinct `href`
    /// for the lifetime of the cache.
    pub async fn lookup_or_compute<F, Fut>(&mut self, href: &str, compute: F) -> &Outcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Outcome>,
    {
        match self.outcomes.entry(href.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(compute().await),
        }
    }

    /// Number of distinct references recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Extract every reference with a dead outcome, sorted lexicographically
    /// by href for deterministic output.
    #[must_use]
    pub fn dead_links(&self) -> Vec<DeadLink> {
        let mut dead: Vec<DeadLink> = self
            .outcomes
            .iter()
            .filter_map(|(href, outcome)| {
                outcome.diagnostic().map(|diagnostic| DeadLink {
                    href: href.clone(),
                    diagnostic,
                })
            })
            .collect();
        dead.sort();
        dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn compute_runs_at_most_once_per_reference() {
        let mut cache = Cache::new();
        let mut calls = 0;

        for _ in 0..3 {
            cache
                .lookup_or_compute("https://example.com", || {
                    calls += 1;
                    async { Outcome::Alive }
                })
                .await;
        }

        assert_eq!(calls, 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn stored_outcome_is_returned_verbatim() {
        let mut cache = Cache::new();
        cache
            .lookup_or_compute("gone.html", || async {
                Outcome::Dead(ErrorKind::NotFoundInRoot("gone.html".into()))
            })
            .await;

        let outcome = cache
            .lookup_or_compute("gone.html", || async { Outcome::Alive })
            .await;
        assert!(!outcome.is_alive());
    }

    #[tokio::test]
    async fn dead_links_are_sorted_by_href() {
        let mut cache = Cache::new();
        for href in ["dead/", "../dead.html", "/dead.html"] {
            cache
                .lookup_or_compute(href, || async {
                    Outcome::Dead(ErrorKind::NotFoundInRoot(href.to_string()))
                })
                .await;
        }
        cache
            .lookup_or_compute("fine.html", || async { Outcome::Alive })
            .await;

        let dead = cache.dead_links();
        let hrefs: Vec<&str> = dead.iter().map(|d| d.href.as_str()).collect();
        assert_eq!(hrefs, vec!["../dead.html", "/dead.html", "dead/"]);
    }
}
