use std::fmt::Display;

use crate::ErrorKind;

/// The verdict for a single reference.
///
/// Once written into the [`Cache`](crate::Cache), an outcome is immutable
/// for the remainder of the scan.
#[derive(Debug)]
pub enum Outcome {
    /// The reference resolved.
    Alive,
    /// The reference could not be resolved; carries the reason.
    Dead(ErrorKind),
}

impl Outcome {
    /// Returns `true` if the reference resolved.
    #[inline]
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        matches!(self, Outcome::Alive)
    }

    /// The human-readable reason for a dead outcome, `None` when alive.
    #[must_use]
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Outcome::Alive => None,
            Outcome::Dead(e) => Some(e.to_string()),
        }
    }
}

impl From<ErrorKind> for Outcome {
    fn from(e: ErrorKind) -> Self {
        Outcome::Dead(e)
    }
}

/// A reference whose outcome was dead at scan completion.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DeadLink {
    /// The raw reference as it appeared in the document.
    pub href: String,
    /// Why the reference could not be resolved.
    pub diagnostic: String,
}

impl Display for DeadLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.href)
    }
}
