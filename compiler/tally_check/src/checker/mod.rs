//! The checking engine.
//!
//! A `TypeChecker` checks one file against a symbol index under one set of
//! rules. The problem list is computed on first request and kept for the
//! checker's lifetime.
//!
//! # Module Structure
//!
//! - `methods`: return-type and `@param` checks per method or attribute
//! - `variables`: `@type` checks per variable and constant declaration
//! - `constants`: unresolved constant references
//! - `calls`: unresolved calls and the call-site argument matcher
//!
//! # Order
//!
//! Categories are independent, so they run in parallel under
//! `rayon::join`, but the result is always concatenated as methods,
//! variables, constants, calls.

mod calls;
mod constants;
mod methods;
mod variables;

use std::sync::OnceLock;

use tally_index::{Pin, PinKind, SourceMap, SymbolIndex};
use tally_ir::{Location, Range};

use crate::{Level, Problem, Rules};

/// Checks one file.
pub struct TypeChecker<'a, I: SymbolIndex + ?Sized> {
    filename: String,
    index: &'a I,
    rules: Rules,
    source_map: OnceLock<Option<&'a SourceMap>>,
    problems: OnceLock<Vec<Problem<'a>>>,
}

impl<'a, I: SymbolIndex + ?Sized> TypeChecker<'a, I> {
    pub fn new(filename: impl Into<String>, index: &'a I, level: Level) -> Self {
        TypeChecker::with_rules(filename, index, Rules::new(level))
    }

    pub fn with_rules(filename: impl Into<String>, index: &'a I, rules: Rules) -> Self {
        TypeChecker {
            filename: filename.into(),
            index,
            rules,
            source_map: OnceLock::new(),
            problems: OnceLock::new(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn index(&self) -> &'a I {
        self.index
    }

    /// The checked file's source map, looked up once.
    pub fn source_map(&self) -> Option<&'a SourceMap> {
        *self
            .source_map
            .get_or_init(|| self.index.source_map(&self.filename))
    }

    /// Every problem in the file, in report order.
    ///
    /// Computed on the first call; later calls return the same list.
    pub fn problems(&self) -> &[Problem<'a>] {
        self.problems.get_or_init(|| self.run())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(file = %self.filename, level = %self.rules.level))]
    fn run(&self) -> Vec<Problem<'a>> {
        let Some(map) = self.source_map() else {
            tracing::warn!(file = %self.filename, "file is not in the index");
            return Vec::new();
        };
        let ((methods, variables), (constants, calls)) = rayon::join(
            || {
                rayon::join(
                    || self.method_problems(map),
                    || self.variable_problems(map),
                )
            },
            || rayon::join(|| self.const_problems(map), || self.call_problems(map)),
        );
        tracing::debug!(
            methods = methods.len(),
            variables = variables.len(),
            constants = constants.len(),
            calls = calls.len(),
            "checked"
        );

        let mut problems = methods;
        problems.extend(variables);
        problems.extend(constants);
        problems.extend(calls);
        problems
    }

    /// Check if a pin's documented type names a constant (`@return [VERSION]`)
    /// rather than a class, which is why it did not resolve as a type.
    fn tag_names_constant(&self, pin: &Pin) -> bool {
        let Some(first) = pin.type_tag_strings().and_then(<[String]>::first) else {
            return false;
        };
        let name = first.split(|c| c == '<' || c == '{').next().unwrap_or(first).trim();
        self.index
            .qualify(name, &pin.context.namespace)
            .is_some_and(|path| {
                self.index
                    .get_path_pins(&path)
                    .iter()
                    .any(|p| matches!(p.kind, PinKind::Constant { .. }))
            })
    }
}

/// Where to report a problem about `pin`.
///
/// Declarations without a location are reported at the top of the file.
fn location_of(pin: &Pin, map: &SourceMap) -> Location {
    pin.location
        .clone()
        .unwrap_or_else(|| map.location(Range::default()))
}
