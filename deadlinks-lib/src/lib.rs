//! `deadlinks-lib` scans trees of built HTML documents and reports every
//! hyperlink, image, stylesheet, script, or form target that cannot be
//! resolved.
//!
//! References are classified by scheme: `http(s)` URLs are probed with HEAD
//! requests, scheme-less paths are resolved inside the document root (with
//! an `index.html` fallback for directory-style links), bare `#fragment`
//! references are checked against the referring document's own anchors, and
//! `mailto:`/`tel:` pass unconditionally. Each distinct reference is
//! verified at most once per scan.
//!
//! ```no_run
//! use std::path::PathBuf;
//! use std::time::Duration;
//!
//! use deadlinks_lib::{find_documents, Checker, IgnoreList, Result, Scanner};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let lists = find_documents(&[PathBuf::from("public")], &[])?;
//!     let checker = Checker::new(Duration::from_secs(10), 0)?;
//!     let scanner = Scanner::new(checker, IgnoreList::default());
//!     for dead in scanner.scan(&lists).await? {
//!         println!("{dead}");
//!     }
//!     Ok(())
//! }
//! ```
#![warn(clippy::all, clippy::pedantic)]
#![deny(missing_docs)]

mod accept;
mod cache;
mod checker;
pub mod extract;
mod ignore;
mod scanner;
mod target;
mod types;

pub use accept::{AcceptRule, AcceptedStatuses};
pub use cache::Cache;
pub use checker::{Checker, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
pub use ignore::IgnoreList;
pub use scanner::Scanner;
pub use target::Target;
pub use types::*;
