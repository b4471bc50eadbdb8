mod document;
mod error;
mod outcome;

pub use document::{find_documents, DocumentList};
pub use error::{ErrorKind, Result};
pub use outcome::{DeadLink, Outcome};
