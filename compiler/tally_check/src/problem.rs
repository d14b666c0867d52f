//! Problems: the checker's output.

use std::fmt;

use tally_index::{Pin, SymbolIndex};
use tally_ir::Location;

/// What a problem is about.
///
/// Every problem message is produced for exactly one kind, so callers can
/// filter or group without matching message text.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum ProblemKind {
    // Return types
    /// Method without a `@return` tag (strong only).
    MissingReturnTag,
    /// `@return` text that names nothing the index knows.
    UnresolvedReturnType,
    /// Untagged method whose return type cannot be inferred either.
    UninferredMethod,
    /// Tagged method whose body cannot be inferred.
    UninferredReturn,
    /// Declared and inferred return types disagree.
    ReturnMismatch,

    // Parameters
    MissingParamTag,
    UnresolvedParamType,

    // Variables
    UninferredVariable,
    VariableMismatch,
    UnresolvedVariableType,

    // References and calls
    UnresolvedConstant,
    UnresolvedCall,
    NotEnoughArguments,
    ArgumentMismatch,
    MissingKeywordArgument,
}

impl ProblemKind {
    /// Every kind, in report order.
    pub const ALL: &'static [ProblemKind] = &[
        ProblemKind::MissingReturnTag,
        ProblemKind::UnresolvedReturnType,
        ProblemKind::UninferredMethod,
        ProblemKind::UninferredReturn,
        ProblemKind::ReturnMismatch,
        ProblemKind::MissingParamTag,
        ProblemKind::UnresolvedParamType,
        ProblemKind::UninferredVariable,
        ProblemKind::VariableMismatch,
        ProblemKind::UnresolvedVariableType,
        ProblemKind::UnresolvedConstant,
        ProblemKind::UnresolvedCall,
        ProblemKind::NotEnoughArguments,
        ProblemKind::ArgumentMismatch,
        ProblemKind::MissingKeywordArgument,
    ];

    /// Stable identifier, e.g. `return-mismatch`.
    pub fn as_str(self) -> &'static str {
        match self {
            ProblemKind::MissingReturnTag => "missing-return-tag",
            ProblemKind::UnresolvedReturnType => "unresolved-return-type",
            ProblemKind::UninferredMethod => "uninferred-method",
            ProblemKind::UninferredReturn => "uninferred-return",
            ProblemKind::ReturnMismatch => "return-mismatch",
            ProblemKind::MissingParamTag => "missing-param-tag",
            ProblemKind::UnresolvedParamType => "unresolved-param-type",
            ProblemKind::UninferredVariable => "uninferred-variable",
            ProblemKind::VariableMismatch => "variable-mismatch",
            ProblemKind::UnresolvedVariableType => "unresolved-variable-type",
            ProblemKind::UnresolvedConstant => "unresolved-constant",
            ProblemKind::UnresolvedCall => "unresolved-call",
            ProblemKind::NotEnoughArguments => "not-enough-arguments",
            ProblemKind::ArgumentMismatch => "argument-mismatch",
            ProblemKind::MissingKeywordArgument => "missing-keyword-argument",
        }
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported problem.
///
/// `pin` is the declaration the problem is about, when there is one; call
/// site problems carry none.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Problem<'a> {
    pub kind: ProblemKind,
    pub location: Location,
    pub message: String,
    pub pin: Option<&'a Pin>,
}

impl<'a> Problem<'a> {
    pub fn new(kind: ProblemKind, location: Location, message: impl Into<String>) -> Self {
        Problem {
            kind,
            location,
            message: message.into(),
            pin: None,
        }
    }

    #[must_use]
    pub fn with_pin(mut self, pin: &'a Pin) -> Self {
        self.pin = Some(pin);
        self
    }

    /// Check if the problem's declaration belongs to the analysed project.
    ///
    /// Problems without a declaration are never internal.
    pub fn is_internal<I: SymbolIndex + ?Sized>(&self, index: &I) -> bool {
        self.pin.is_some_and(|pin| is_internal(pin, index))
    }
}

impl fmt::Display for Problem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.location, self.message, self.kind)
    }
}

/// A declaration is internal when it has a location in a file the index
/// counts as part of the project.
pub fn is_internal<I: SymbolIndex + ?Sized>(pin: &Pin, index: &I) -> bool {
    pin.location
        .as_ref()
        .is_some_and(|location| index.bundled(&location.filename))
}
