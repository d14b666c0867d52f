//! Call sites: unresolved calls and argument types.
//!
//! Every call node is checked twice. First the whole chain is inferred; a
//! chain that infers to nothing is walked toward its base to find the link
//! that failed to resolve. Then each resolvable method link along the chain
//! has its arguments matched against the callee's `@param` types, whether
//! or not an outer link failed.
//!
//! Arguments are matched in two phases. Positional arguments pair up with
//! positional parameters in order; once a keyword parameter is reached, a
//! trailing hash literal supplies the keyword arguments by name.

use tally_index::{
    CallNode, Chain, HashKey, Link, ParamDecl, Parameter, Pin, PinKind, SourceMap, SymbolIndex,
};
use tally_ir::Location;
use tally_types::ComplexType;

use super::TypeChecker;
use crate::compat::any_types_match;
use crate::{ParamModel, Problem, ProblemKind};

/// Where a call is made: the enclosing block and the locals visible to it.
struct Site<'a> {
    block: &'a Pin,
    locals: Vec<&'a Pin>,
    location: Location,
}

/// A call's arguments, split into positional ones and a trailing keyword
/// hash.
struct Arguments<'c> {
    positional: &'c [Chain],
    keywords: Option<&'c Chain>,
}

impl<'c> Arguments<'c> {
    /// The last argument is the keyword hash only when it is a hash literal
    /// and the callee takes keywords at all.
    fn split(callee: &Pin, arguments: &'c [Chain]) -> Self {
        let takes_keywords = callee.parameters().iter().any(|p| p.decl.is_keyword());
        match arguments.split_last() {
            Some((last, rest)) if takes_keywords && matches!(last.links(), [Link::Hash(_)]) => {
                Arguments {
                    positional: rest,
                    keywords: Some(last),
                }
            }
            _ => Arguments {
                positional: arguments,
                keywords: None,
            },
        }
    }
}

impl<'a, I: SymbolIndex + ?Sized> TypeChecker<'a, I> {
    pub(super) fn call_problems(&self, map: &'a SourceMap) -> Vec<Problem<'a>> {
        let mut marked = self.unresolved_constant_ranges(map);
        let mut nodes: Vec<&CallNode> = map.calls().iter().collect();
        nodes.sort_by_key(|node| node.range.start);

        let mut problems = Vec::new();
        for node in nodes {
            let Some(chain) = &node.chain else {
                tracing::trace!(range = ?node.range, "call without a chain");
                continue;
            };
            if marked.iter().any(|range| range.contains(node.range.start)) {
                continue;
            }
            let location = map.location(node.range);
            let site = Site {
                block: map.locate_block_pin(node.range.start.line, node.range.start.column),
                locals: map.locals_at(&location),
                location,
            };

            if !self.rules.ignore_all_undefined
                && chain.infer(self.index, site.block, &site.locals).is_undefined()
            {
                if let Some(word) = self.unresolved_word(chain, &site) {
                    problems.push(Problem::new(
                        ProblemKind::UnresolvedCall,
                        site.location.clone(),
                        format!("Unresolved call to {word}"),
                    ));
                    marked.push(node.range);
                }
            }
            self.argument_problems(chain, &site, &mut problems);
        }
        problems
    }

    /// The word of the innermost link that failed to resolve.
    ///
    /// `None` when the nearest resolvable declaration has no type of its
    /// own: the call is unresolvable because of that declaration, not
    /// because of the call.
    fn unresolved_word(&self, chain: &Chain, site: &Site<'a>) -> Option<String> {
        let mut base = chain.clone();
        let mut missing = chain.clone();
        let mut found = Vec::new();
        while base.links().first().is_some_and(|link| !link.is_undefined()) {
            found = base.define(self.index, site.block, &site.locals);
            if !found.is_empty() {
                break;
            }
            missing = base.clone();
            base = base.base();
        }
        if found.is_empty() || base.infer(self.index, site.block, &site.locals).is_defined() {
            Some(missing.last().word())
        } else {
            None
        }
    }

    fn argument_problems(&self, chain: &Chain, site: &Site<'a>, out: &mut Vec<Problem<'a>>) {
        let mut base = chain.clone();
        while !base.is_single_undefined() {
            let pins = base.define(self.index, site.block, &site.locals);
            if let Some(callee) = pins
                .first()
                .copied()
                .filter(|pin| matches!(pin.kind, PinKind::Method(_)))
            {
                let arguments = Arguments::split(callee, base.last().arguments());
                if self.rules.validate_arity {
                    if let Some(problem) = arity_problem(callee, &arguments, &site.location) {
                        out.push(problem);
                        break;
                    }
                }
                if !self.rules.validate_calls {
                    break;
                }
                let model = ParamModel::first_of(&pins, self.index);
                tracing::trace!(
                    callee = %callee,
                    params = ?callee.parameter_names().collect::<Vec<_>>(),
                    tagged = model.len(),
                    "matching arguments"
                );
                self.positional_problems(callee, &model, &arguments, site, out);
            }
            base = base.base();
        }
    }

    fn positional_problems(
        &self,
        callee: &Pin,
        model: &ParamModel,
        arguments: &Arguments<'_>,
        site: &Site<'a>,
        out: &mut Vec<Problem<'a>>,
    ) {
        let mut next = 0;
        let params = callee.parameters();
        for (idx, param) in params.iter().enumerate() {
            if param.decl.is_keyword() {
                if let Some(keywords) = arguments.keywords {
                    self.keyword_problems(callee, model, &params[idx..], keywords, site, out);
                }
                break;
            }
            if param.decl == ParamDecl::RestArg {
                // Everything left over belongs to the splat.
                next = arguments.positional.len();
                continue;
            }
            if !param.decl.is_positional() {
                continue;
            }
            let Some(argument) = arguments.positional.get(next) else {
                continue;
            };
            next += 1;
            if let Some(expected) = model.declared(&param.name) {
                out.extend(self.argument_type_problem(callee, &param.name, expected, argument, site));
            }
        }
    }

    fn keyword_problems(
        &self,
        callee: &Pin,
        model: &ParamModel,
        params: &[Parameter],
        keywords: &Chain,
        site: &Site<'a>,
        out: &mut Vec<Problem<'a>>,
    ) {
        let supplied = keywords.keyword_map();
        for param in params {
            match param.decl {
                ParamDecl::KwRestArg => {
                    let unmatched = supplied.iter().filter(|(name, _)| {
                        !params.iter().any(|p| {
                            p.name == *name && matches!(p.decl, ParamDecl::KwArg | ParamDecl::KwOptArg)
                        })
                    });
                    for (name, value) in unmatched {
                        if let Some(expected) = model.declared(name) {
                            out.extend(self.argument_type_problem(callee, name, expected, value, site));
                        }
                    }
                }
                ParamDecl::KwArg | ParamDecl::KwOptArg => {
                    match supplied.iter().find(|(name, _)| *name == param.name) {
                        Some((_, value)) => {
                            if let Some(expected) = model.declared(&param.name) {
                                out.extend(self.argument_type_problem(
                                    callee,
                                    &param.name,
                                    expected,
                                    value,
                                    site,
                                ));
                            }
                        }
                        // Computed keys may supply anything.
                        None if param.decl == ParamDecl::KwArg && is_literal_hash(keywords) => {
                            out.push(Problem::new(
                                ProblemKind::MissingKeywordArgument,
                                site.location.clone(),
                                format!("Call to {callee} is missing keyword argument {}", param.name),
                            ));
                        }
                        None => {}
                    }
                }
                ParamDecl::Arg | ParamDecl::OptArg | ParamDecl::RestArg | ParamDecl::BlockArg => {}
            }
        }
    }

    fn argument_type_problem(
        &self,
        callee: &Pin,
        name: &str,
        expected: &ComplexType,
        argument: &Chain,
        site: &Site<'a>,
    ) -> Option<Problem<'a>> {
        let received = argument.infer(self.index, site.block, &site.locals);
        if received.is_undefined() || any_types_match(self.index, expected, &received) {
            return None;
        }
        Some(Problem::new(
            ProblemKind::ArgumentMismatch,
            site.location.clone(),
            format!("Wrong argument type for {callee}: {name} expected {expected}, received {received}"),
        ))
    }
}

/// Count checks: required positionals present, and some keyword hash when
/// a keyword is required.
fn arity_problem<'a>(callee: &Pin, arguments: &Arguments<'_>, location: &Location) -> Option<Problem<'a>> {
    let params = callee.parameters();
    let required = params.iter().filter(|p| p.decl == ParamDecl::Arg).count();
    if arguments.positional.len() < required {
        return Some(Problem::new(
            ProblemKind::NotEnoughArguments,
            location.clone(),
            format!("Not enough arguments to {callee}"),
        ));
    }
    if arguments.keywords.is_some() {
        return None;
    }
    params
        .iter()
        .find(|p| p.decl == ParamDecl::KwArg)
        .map(|param| {
            Problem::new(
                ProblemKind::MissingKeywordArgument,
                location.clone(),
                format!("Call to {callee} is missing keyword argument {}", param.name),
            )
        })
}

/// A hash literal whose keys are all literal symbols.
fn is_literal_hash(chain: &Chain) -> bool {
    matches!(
        chain.links(),
        [Link::Hash(entries)] if entries.iter().all(|(key, _)| matches!(key, HashKey::Symbol(_)))
    )
}
