use percent_encoding::percent_decode_str;
use url::Url;

use crate::{ErrorKind, Result};

/// How a raw reference will be verified, selected by scheme and shape.
///
/// One closed variant per verification strategy, so adding a scheme is an
/// exhaustive-match error at compile time instead of a silent fall-through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// An `http` or `https` URL, probed over the network.
    Website(Url),
    /// A `mailto:` address. Unconditionally treated as resolvable; we are
    /// not going to connect to SMTP servers to verify mailboxes.
    Mail,
    /// A `tel:` number. Unconditionally treated as resolvable.
    Phone,
    /// A scheme-less reference with a path, resolved inside the document
    /// root. The path component is percent-decoded and any query or
    /// fragment is dropped: a fragment on another page is not checked.
    Path(String),
    /// A bare `#fragment`, checked against the current document's anchors.
    Fragment {
        /// The fragment exactly as written in the document.
        raw: String,
        /// The percent-decoded form, when decoding yields a different
        /// string. Covers authors who write human-readable fragments that
        /// the browser percent-encodes.
        decoded: Option<String>,
    },
    /// Empty scheme, empty path, empty fragment, or a scheme we cannot
    /// probe. Nothing to test.
    Unknown,
}

impl Target {
    /// Classify a raw reference by scheme precedence: `http`/`https` are
    /// probed over the network, `mailto` and `tel` pass trivially, a
    /// scheme-less path is resolved on disk, and a bare fragment is checked
    /// against the referring document.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MalformedReference`] if the reference cannot be
    /// parsed as a URL at all. Callers record this as a dead outcome rather
    /// than aborting the scan.
    pub fn classify(raw: &str) -> Result<Self> {
        match Url::parse(raw) {
            Ok(url) => Ok(match url.scheme() {
                "http" | "https" => Target::Website(url),
                "mailto" => Target::Mail,
                "tel" => Target::Phone,
                _ => Target::Unknown,
            }),
            // Relative references have no scheme; the `url` crate cannot
            // represent them, so split path and fragment by hand.
            Err(url::ParseError::RelativeUrlWithoutBase) => Ok(Self::classify_relative(raw)),
            Err(e) => Err(ErrorKind::MalformedReference(raw.to_string(), e)),
        }
    }

    fn classify_relative(raw: &str) -> Self {
        let (before_fragment, fragment) = match raw.split_once('#') {
            Some((path, fragment)) => (path, fragment),
            None => (raw, ""),
        };
        let path = before_fragment
            .split_once('?')
            .map_or(before_fragment, |(path, _query)| path);

        if !path.is_empty() {
            let decoded = percent_decode_str(path).decode_utf8_lossy().into_owned();
            return Target::Path(decoded);
        }
        if !fragment.is_empty() {
            let decoded = percent_decode_str(fragment)
                .decode_utf8()
                .ok()
                .map(std::borrow::Cow::into_owned)
                .filter(|decoded| decoded != fragment);
            return Target::Fragment {
                raw: fragment.to_string(),
                decoded,
            };
        }
        Target::Unknown
    }
}
