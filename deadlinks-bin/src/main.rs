//! `deadlinks` scans all the HTML documents under one or more document
//! roots for dead links — hyperlink, image, stylesheet, script, and form
//! targets that cannot be resolved on disk, over the network, or against
//! the referring document's own anchors.
//!
//! Check the current directory:
//!
//! ```sh
//! deadlinks
//! ```
//!
//! Check a built site, ignoring a known-flaky URL:
//!
//! ```sh
//! deadlinks -i .deadlinksignore -x drafts public/
//! ```
//!
//! Dead hrefs are printed to standard output, one per line, sorted. The
//! exit code is 1 when any are found and 0 otherwise; `-v` adds a
//! per-document trace and a summary on standard error.
#![warn(clippy::all, clippy::pedantic)]

use std::fs::File;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use deadlinks_lib::{find_documents, Checker, IgnoreList, Scanner};
use log::info;

mod options;

use options::Options;

/// A C-like enum that can be cast to `i32` and used as process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitCode {
    Success = 0,
    DeadLinks = 1,
}

fn main() -> Result<()> {
    // std::process::exit doesn't guarantee that all destructors will be
    // run, therefore we wrap the main code in another function to ensure
    // that they are.
    let exit_code = run_main()?;
    std::process::exit(exit_code as i32);
}

fn run_main() -> Result<ExitCode> {
    let options = Options::parse();
    init_logging(options.verbose);

    let ignored = load_ignore_list(&options)?;
    let lists = find_documents(&options.docroots(), &options.exclude)?;

    let checker = Checker::new(Duration::from_secs(options.timeout), options.max_retries)?;
    let scanner = Scanner::new(checker, ignored);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let dead_links = runtime.block_on(scanner.scan(&lists))?;

    info!("found {} dead links", dead_links.len());

    for dead in &dead_links {
        if options.errors {
            eprintln!("{}", dead.diagnostic);
        }
        println!("{dead}");
    }

    if dead_links.is_empty() {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::DeadLinks)
    }
}

fn load_ignore_list(options: &Options) -> Result<IgnoreList> {
    let Some(path) = &options.ignore else {
        return Ok(IgnoreList::default());
    };
    let file = File::open(path)
        .with_context(|| format!("Cannot open ignore file `{}`", path.display()))?;
    IgnoreList::from_reader(file)
        .with_context(|| format!("Cannot read ignore file `{}`", path.display()))
}

/// Route the scan trace through `env_logger`. `--verbose` raises the level
/// to `info`, which carries the per-document and per-reference traces;
/// `RUST_LOG` still overrides when set.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let env = env_logger::Env::default().filter_or("RUST_LOG", default_level);
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .init();
}
