//! Return-type and `@param` checks for methods and attributes.

use tally_index::{Pin, SourceMap, SymbolIndex};

use super::{location_of, TypeChecker};
use crate::compat::{any_types_match, types_match};
use crate::problem::is_internal;
use crate::{ParamModel, Problem, ProblemKind};

impl<'a, I: SymbolIndex + ?Sized> TypeChecker<'a, I> {
    pub(super) fn method_problems(&self, map: &'a SourceMap) -> Vec<Problem<'a>> {
        let mut problems = Vec::new();
        for pin in map.pins().iter().filter(|p| p.is_method_like()) {
            self.return_type_problems(pin, map, &mut problems);
            self.param_type_problems(pin, map, &mut problems);
        }
        problems
    }

    fn return_type_problems(&self, pin: &'a Pin, map: &'a SourceMap, out: &mut Vec<Problem<'a>>) {
        if pin.is_alias() {
            return;
        }
        let report = |kind: ProblemKind, message: String| {
            Problem::new(kind, location_of(pin, map), message).with_pin(pin)
        };
        let namespace = pin.full_namespace();
        let declared = pin.typify(self.index).self_to(&namespace);

        if declared.is_undefined() {
            match pin.type_tag_strings() {
                None if self.rules.require_type_tags => out.push(report(
                    ProblemKind::MissingReturnTag,
                    format!("Missing @return tag for {pin}"),
                )),
                Some(tags) if !self.tag_names_constant(pin) => out.push(report(
                    ProblemKind::UnresolvedReturnType,
                    format!("Unresolved return type {} for {pin}", tags.join(", ")),
                )),
                _ if self.rules.must_tag_or_infer && pin.probe(self.index).is_undefined() => {
                    out.push(report(
                        ProblemKind::UninferredMethod,
                        format!("Untyped method {pin} could not be inferred"),
                    ));
                }
                _ => {}
            }
            return;
        }

        if !self.rules.validate_tags
            || declared.is_void()
            || pin.is_attribute()
            || !pin.has_body()
            || pin.is_abstract()
            || is_macro_generated(pin, map)
        {
            return;
        }

        let inferred = pin.probe(self.index).self_to(&namespace);
        if inferred.is_undefined() {
            if !self.rules.ignore_all_undefined && is_internal(pin, self.index) {
                out.push(report(
                    ProblemKind::UninferredReturn,
                    format!("{pin} return type could not be inferred"),
                ));
            }
            return;
        }

        let matched = if self.rules.exact_returns {
            types_match(self.index, &declared, &inferred)
        } else {
            any_types_match(self.index, &declared, &inferred)
        };
        if !matched {
            out.push(report(
                ProblemKind::ReturnMismatch,
                format!(
                    "Declared return type {declared} does not match inferred type {inferred} for {pin}"
                ),
            ));
        }
    }

    fn param_type_problems(&self, pin: &'a Pin, map: &'a SourceMap, out: &mut Vec<Problem<'a>>) {
        let stack = self
            .index
            .get_method_stack(&pin.context.namespace, &pin.name, pin.context.scope);
        let model = if stack.is_empty() {
            ParamModel::of(pin, self.index)
        } else {
            ParamModel::first_of(&stack, self.index)
        };

        if self.rules.require_type_tags {
            for param in pin.parameters() {
                if param.decl.is_variadic() {
                    break;
                }
                if model.get(&param.name).is_none() {
                    out.push(
                        Problem::new(
                            ProblemKind::MissingParamTag,
                            location_of(pin, map),
                            format!("Missing @param tag for {} on {pin}", param.name),
                        )
                        .with_pin(pin),
                    );
                }
            }
        }

        for (name, ty) in model.iter() {
            if ty.qualified.is_undefined() {
                out.push(
                    Problem::new(
                        ProblemKind::UnresolvedParamType,
                        location_of(pin, map),
                        format!("Unresolved type {} for {name} param on {pin}", ty.tagged),
                    )
                    .with_pin(pin),
                );
            }
        }
    }
}

/// Methods generated by a macro call end right where a comment begins;
/// they have no body of their own to infer from.
fn is_macro_generated(pin: &Pin, map: &SourceMap) -> bool {
    pin.location
        .as_ref()
        .is_some_and(|location| map.comment_at(location.range.ending))
}
