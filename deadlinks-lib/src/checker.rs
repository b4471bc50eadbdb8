use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use path_clean::PathClean;
use url::Url;

use crate::accept::AcceptedStatuses;
use crate::target::Target;
use crate::{ErrorKind, Outcome, Result};

/// Default timeout in seconds before a HEAD request is deemed failed, 10.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Default number of retries per request, 0.
pub const DEFAULT_MAX_RETRIES: u64 = 0;
/// Wait time between retries of a failed request.
const RETRY_WAIT_TIME: Duration = Duration::from_secs(1);

// Pretend a bit to be a real browser; anti-scraper firewalls tend to block
// obvious scripted clients outright.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:134.0) Gecko/20100101 Firefox/134.0";

/// Verifies single references against the network, the filesystem, or the
/// referring document itself.
///
/// The checker is a pure function of (reference, referring document,
/// document root): it holds no per-scan state. Memoization lives in the
/// [`Cache`](crate::Cache).
#[derive(Debug, Clone)]
pub struct Checker {
    reqwest_client: reqwest::Client,
    accepted: AcceptedStatuses,
    max_retries: u64,
}

impl Checker {
    /// Create a checker with the given per-request timeout and retry count.
    ///
    /// # Errors
    ///
    /// Fails if the underlying HTTP client cannot be constructed.
    pub fn new(timeout: Duration, max_retries: u64) -> Result<Self> {
        let reqwest_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(ErrorKind::BuildClient)?;
        Ok(Self {
            reqwest_client,
            accepted: AcceptedStatuses::default(),
            max_retries,
        })
    }

    /// Verify a single raw reference found in the document at
    /// `<root>/<document>`. `anchors` is the set of `id` values of that
    /// document, used for same-page fragment references.
    ///
    /// This never fails: every per-reference problem becomes a dead
    /// [`Outcome`] carrying its diagnostic.
    pub async fn check(
        &self,
        raw: &str,
        root: &Path,
        document: &Path,
        anchors: &HashSet<String>,
    ) -> Outcome {
        let target = match Target::classify(raw) {
            Ok(target) => target,
            Err(e) => return Outcome::Dead(e),
        };
        match target {
            Target::Website(url) => self.check_website(url).await,
            Target::Mail | Target::Phone => Outcome::Alive,
            Target::Path(path) => Self::check_path(raw, &path, root, document),
            Target::Fragment { raw, decoded } => {
                Self::check_fragment(&raw, decoded.as_deref(), anchors)
            }
            Target::Unknown => Outcome::Dead(ErrorKind::UnclearHowToTest(raw.to_string())),
        }
    }

    /// Probe an `http(s)` URL with a HEAD request, retrying up to the
    /// configured count. Retries are a resilience measure against transient
    /// failures; zero retries is the default.
    async fn check_website(&self, mut url: Url) -> Outcome {
        // Fragments are never sent over the wire.
        url.set_fragment(None);

        let mut retries: u64 = 0;
        let mut outcome = self.head(&url).await;
        while retries < self.max_retries && !outcome.is_alive() {
            retries += 1;
            debug!("retrying {url} ({retries}/{})", self.max_retries);
            tokio::time::sleep(RETRY_WAIT_TIME).await;
            outcome = self.head(&url).await;
        }
        outcome
    }

    async fn head(&self, url: &Url) -> Outcome {
        match self.reqwest_client.head(url.clone()).send().await {
            Ok(response) => {
                let status = response.status();
                if status.as_u16() < 400 || self.accepted.permits(status, url.host_str()) {
                    Outcome::Alive
                } else {
                    Outcome::Dead(ErrorKind::RejectedStatusCode(url.clone(), status))
                }
            }
            Err(e) => Outcome::Dead(ErrorKind::NetworkError(url.clone(), e)),
        }
    }

    /// Stat a path reference inside the document root.
    ///
    /// Root-relative paths (`/…`) resolve against the root; everything else
    /// resolves against the referring document's directory. A directory
    /// style target is alive when it contains an `index.html`.
    fn check_path(raw: &str, path: &str, root: &Path, document: &Path) -> Outcome {
        let relative = if let Some(rooted) = path.strip_prefix('/') {
            PathBuf::from(rooted).clean()
        } else {
            let dir = document.parent().unwrap_or_else(|| Path::new(""));
            dir.join(path).clean()
        };
        let resolved = root.join(relative);

        if is_existing_file(&resolved) || is_existing_file(&resolved.join("index.html")) {
            Outcome::Alive
        } else {
            Outcome::Dead(ErrorKind::NotFoundInRoot(raw.to_string()))
        }
    }

    /// Test a same-page fragment against the referring document's anchors,
    /// first as written, then in percent-decoded form.
    fn check_fragment(raw: &str, decoded: Option<&str>, anchors: &HashSet<String>) -> Outcome {
        if anchors.contains(raw) || decoded.is_some_and(|decoded| anchors.contains(decoded)) {
            Outcome::Alive
        } else {
            Outcome::Dead(ErrorKind::FragmentNotFound(raw.to_string()))
        }
    }
}

/// Whether `path` stats to something that is not a directory. Stat failures
/// of any kind count as "does not exist".
fn is_existing_file(path: &Path) -> bool {
    std::fs::metadata(path).map(|meta| !meta.is_dir()).unwrap_or(false)
}
