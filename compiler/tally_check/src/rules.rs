//! Strictness levels and the checks they enable.
//!
//! A [`Level`] is resolved once, through a fixed table, into a [`Rules`]
//! record of named toggles. Checks only ever read `Rules`; nothing compares
//! level names.
//!
//! ```text
//! level   rank  ignore_undefined  tags  tag_or_infer  consts  calls  require_tags
//! normal   0          yes          no       no          no     no        no
//! typed    1          yes          yes      no          no     no        no
//! strict   2          no           yes      yes         yes    yes       no
//! strong   3          no           yes      yes         yes    yes       yes
//! ```

use std::fmt;
use std::str::FromStr;

/// A named strictness level.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Level {
    #[default]
    Normal,
    Typed,
    Strict,
    Strong,
}

impl Level {
    /// Every level, weakest first.
    pub const ALL: &'static [Level] = &[Level::Normal, Level::Typed, Level::Strict, Level::Strong];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Normal => "normal",
            Level::Typed => "typed",
            Level::Strict => "strict",
            Level::Strong => "strong",
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            Level::Normal => 0,
            Level::Typed => 1,
            Level::Strict => 2,
            Level::Strong => 3,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`Level`] name.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum LevelError {
    #[error("unknown strictness level `{0}` (expected normal, typed, strict or strong)")]
    Unknown(String),
}

/// Case-insensitive; derived from [`Level::ALL`].
impl FromStr for Level {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .find(|level| level.as_str() == lower)
            .copied()
            .ok_or_else(|| LevelError::Unknown(s.to_owned()))
    }
}

/// The checks a run performs.
///
/// Immutable for the lifetime of a checker.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rules {
    pub level: Level,
    /// Suppress problems whose only cause is a type the analysis could not
    /// determine.
    pub ignore_all_undefined: bool,
    /// Compare declared types with inferred ones.
    pub validate_tags: bool,
    /// Report untagged methods whose return type cannot be inferred.
    pub must_tag_or_infer: bool,
    /// Report constant references that resolve to nothing.
    pub validate_consts: bool,
    /// Check argument types at call sites.
    pub validate_calls: bool,
    /// Require `@return` and `@param` tags.
    pub require_type_tags: bool,
    /// Return types must be fully covered (`types_match`). Every level that
    /// compares return types sets this; clearing it on a hand-built record
    /// only requires an overlap (`any_types_match`).
    pub exact_returns: bool,
    /// Check required argument counts. Never enabled by a level.
    pub validate_arity: bool,
}

impl Rules {
    pub fn new(level: Level) -> Self {
        let rank = level.rank();
        Rules {
            level,
            ignore_all_undefined: rank < 2,
            validate_tags: rank > 0,
            must_tag_or_infer: rank > 1,
            validate_consts: rank >= 2,
            validate_calls: rank >= 2,
            require_type_tags: rank >= 3,
            exact_returns: rank > 0,
            validate_arity: false,
        }
    }

    /// Also report calls with too few positional arguments, and calls that
    /// pass no keywords to a method with required keywords.
    #[must_use]
    pub fn with_arity_checks(mut self) -> Self {
        self.validate_arity = true;
        self
    }
}

impl Default for Rules {
    fn default() -> Self {
        Rules::new(Level::default())
    }
}

impl From<Level> for Rules {
    fn from(level: Level) -> Self {
        Rules::new(level)
    }
}
