//! File-qualified source locations.

use std::fmt;
use std::sync::Arc;

use crate::Range;

/// A range inside a named file.
///
/// The filename is shared (`Arc<str>`) because every pin and problem in a
/// file carries the same name.
#[derive(Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub filename: Arc<str>,
    pub range: Range,
}

impl Location {
    pub fn new(filename: impl Into<Arc<str>>, range: Range) -> Self {
        Location {
            filename: filename.into(),
            range,
        }
    }

    /// Check if this location is in `filename` and covers `other`'s start.
    pub fn contains(&self, other: &Location) -> bool {
        self.filename == other.filename && self.range.contains(other.range.start)
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:?}", self.filename, self.range)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.filename, self.range.start)
    }
}
