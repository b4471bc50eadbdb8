use std::path::PathBuf;

use http::StatusCode;
use thiserror::Error;
use url::Url;

/// Result type alias for `deadlinks` operations.
pub type Result<T> = std::result::Result<T, ErrorKind>;

/// Possible errors when scanning a document tree for dead links.
///
/// Two kinds of variants live here. Per-reference failures (a rejected
/// status code, a path missing from the document root, a fragment without a
/// matching anchor) are recorded inside an [`Outcome`](crate::Outcome) and
/// never abort a scan. Fatal failures (I/O while reading or enumerating
/// documents) propagate to the caller, because an unreadable input set
/// invalidates the whole scan's output.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Any form of I/O error occurred while reading from a given path.
    #[error("Failed to read from path: `{}`, reason: {}", .0.display(), .1)]
    IoError(PathBuf, std::io::Error),
    /// Document enumeration failed below one of the given roots.
    #[error("Failed to enumerate documents under `{}`: {}", .0.display(), .1)]
    WalkError(PathBuf, walkdir::Error),
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    BuildClient(reqwest::Error),
    /// The given string cannot be parsed as a URL at all.
    #[error("<{0}>: {1}")]
    MalformedReference(String, url::ParseError),
    /// The request failed on the transport level (DNS failure, connection
    /// refused, timeout).
    #[error("<{0}>: {1}")]
    NetworkError(Url, reqwest::Error),
    /// The endpoint answered with a status code outside the accepted set.
    #[error("<{0}>: {1}")]
    RejectedStatusCode(Url, StatusCode),
    /// The referenced path does not resolve inside the document root.
    #[error("<{0}>: not found in document root")]
    NotFoundInRoot(String),
    /// The referenced fragment has no matching `id` in the document.
    #[error("<#{0}>: not found")]
    FragmentNotFound(String),
    /// The reference has no scheme, no path, and no fragment.
    #[error("<{0}>: unclear how to test")]
    UnclearHowToTest(String),
}
