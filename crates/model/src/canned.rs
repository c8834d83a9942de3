use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::ErrorKind;

/// A non-empty pool of fixed reply lines, used in place of a reply that
/// could not be obtained.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct CannedReplies(Vec<String>);

impl CannedReplies {
    /// Creates a pool from the given lines. Returns `None` if there are
    /// no lines.
    pub fn new<I, S>(lines: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if lines.is_empty() {
            return None;
        }
        Some(Self(lines))
    }

    /// Creates a pool holding a single line.
    #[inline]
    pub fn single<S: Into<String>>(line: S) -> Self {
        Self(vec![line.into()])
    }

    /// Picks one line uniformly at random.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // The pool is never empty.
        self.0.choose(rng).map_or("", String::as_str)
    }

    /// Picks one line using the thread-local generator.
    #[inline]
    pub fn pick_random(&self) -> &str {
        self.pick(&mut rand::thread_rng())
    }

    /// Returns all lines in the pool.
    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.0
    }
}

impl TryFrom<Vec<String>> for CannedReplies {
    type Error = &'static str;

    fn try_from(lines: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(lines).ok_or("canned reply pool must not be empty")
    }
}

impl From<CannedReplies> for Vec<String> {
    #[inline]
    fn from(replies: CannedReplies) -> Self {
        replies.0
    }
}

/// The failure line shown in the chat when a reply could not be obtained
/// and no pool was configured.
pub fn default_failure_notice(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::UpstreamError => "Error: Failed to get response from server.",
        _ => "Error: Could not communicate with the server.",
    }
}

/// The replies the proxy falls back to when the upstream fails.
pub fn default_fallback_replies() -> CannedReplies {
    CannedReplies::single("Sorry, I couldn't process your request.")
}
