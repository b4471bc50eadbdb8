use std::path::PathBuf;

use clap::Parser;
use deadlinks_lib::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};

/// Scan trees of HTML documents for dead links.
///
/// Every `<a>`, `<form>`, `<img>`, `<link rel="stylesheet">`, `<script>`,
/// and `<style>` element under the given document roots is checked. Dead
/// hrefs are printed to standard output, one per line, sorted; the exit
/// code is 1 when any are found.
#[derive(Debug, Parser)]
#[command(name = "deadlinks", version)]
pub(crate) struct Options {
    /// Print the diagnostic for every dead link to standard error
    #[arg(short, long)]
    pub(crate) errors: bool,

    /// File containing links to ignore, one per line
    #[arg(short, long, value_name = "FILE")]
    pub(crate) ignore: Option<PathBuf>,

    /// Retries per HEAD request before a failure is final
    #[arg(short = 'r', long, value_name = "COUNT", default_value_t = DEFAULT_MAX_RETRIES)]
    pub(crate) max_retries: u64,

    /// Timeout (in seconds) for HEAD requests
    #[arg(short, long, value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub(crate) timeout: u64,

    /// Print the name of each scanned file to standard error
    #[arg(short, long)]
    pub(crate) verbose: bool,

    /// Subdirectory of <DOCROOT> to exclude (may be repeated)
    #[arg(short = 'x', long = "exclude", value_name = "SUBDIR")]
    pub(crate) exclude: Vec<PathBuf>,

    /// Document root directories to scan (defaults to the current directory)
    #[arg(value_name = "DOCROOT")]
    pub(crate) docroots: Vec<PathBuf>,
}

impl Options {
    /// The roots to scan; the current working directory when none given.
    pub(crate) fn docroots(&self) -> Vec<PathBuf> {
        if self.docroots.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.docroots.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Options::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let options = Options::parse_from(["deadlinks"]);
        assert_eq!(options.timeout, 10);
        assert_eq!(options.max_retries, 0);
        assert_eq!(options.docroots(), vec![PathBuf::from(".")]);
        assert!(!options.verbose);
    }

    #[test]
    fn excludes_may_be_repeated() {
        let options = Options::parse_from(["deadlinks", "-x", "drafts", "-x", "tmp", "public"]);
        assert_eq!(
            options.exclude,
            vec![PathBuf::from("drafts"), PathBuf::from("tmp")]
        );
        assert_eq!(options.docroots(), vec![PathBuf::from("public")]);
    }
}
