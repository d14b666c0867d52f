//! `@type` checks for variables and constants.

use tally_index::{Pin, PinKind, SourceMap, SymbolIndex};

use super::{location_of, TypeChecker};
use crate::compat::any_types_match;
use crate::problem::is_internal;
use crate::{Problem, ProblemKind};

impl<'a, I: SymbolIndex + ?Sized> TypeChecker<'a, I> {
    pub(super) fn variable_problems(&self, map: &'a SourceMap) -> Vec<Problem<'a>> {
        let locals = map
            .locals()
            .iter()
            .filter(|p| matches!(p.kind, PinKind::LocalVariable { .. }));
        let mut problems = Vec::new();
        for pin in map.pins().iter().filter(|p| p.is_variable()).chain(locals) {
            let Some(tags) = pin.type_tag_strings() else {
                continue;
            };
            let report = |kind: ProblemKind, message: String| {
                Problem::new(kind, location_of(pin, map), message).with_pin(pin)
            };

            let declared = pin.typify(self.index);
            if declared.is_undefined() {
                if !self.tag_names_constant(pin) {
                    problems.push(report(
                        ProblemKind::UnresolvedVariableType,
                        format!("Unresolved type {} for variable {}", tags.join(", "), pin.name),
                    ));
                }
                continue;
            }
            if declared.is_duck_type() || !self.rules.validate_tags {
                continue;
            }

            let inferred = pin.probe(self.index);
            if inferred.is_undefined() {
                if !self.rules.ignore_all_undefined && !self.declared_externally(pin, map) {
                    problems.push(report(
                        ProblemKind::UninferredVariable,
                        format!("Variable type could not be inferred for {}", pin.name),
                    ));
                }
            } else if !any_types_match(self.index, &declared, &inferred) {
                problems.push(report(
                    ProblemKind::VariableMismatch,
                    format!(
                        "Declared type {declared} does not match inferred type {inferred} for variable {}",
                        pin.name
                    ),
                ));
            }
        }
        problems
    }

    /// Check if a variable gets its value from code outside the project,
    /// where a failed inference is not the project's fault.
    ///
    /// Walks the assignment toward its base; the first segment that
    /// resolves to a method decides. Unassigned variables count as external.
    fn declared_externally(&self, pin: &'a Pin, map: &'a SourceMap) -> bool {
        let (Some(assignment), Some(location)) = (pin.assignment(), &pin.location) else {
            return true;
        };
        let block = map.locate_block_pin(location.range.start.line, location.range.start.column);
        let locals = map.locals_at(location);
        let mut base = assignment.clone();
        while !(base.links().len() == 1 && base.is_undefined()) {
            let pins = base.define(self.index, block, &locals);
            if let Some(first) = pins.first().filter(|p| p.is_method_like()) {
                return !is_internal(first, self.index);
            }
            base = base.base();
        }
        false
    }
}
