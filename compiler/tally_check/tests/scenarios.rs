//! End-to-end scenarios: a small shop class checked through the public API.
//!
//! Every call site sits inside `Shop#checkout`, so calls resolve against
//! `Shop`'s instance methods.

use pretty_assertions::assert_eq;
use tally_check::{init_tracing, Level, ProblemKind, Rules, TypeChecker};
use tally_index::{ApiMap, Chain, HashKey, Link, NamespaceKind, Pin, Scope, SourceMap};
use tally_ir::{Location, Range};

const FILE: &str = "shop.rb";

fn at(l1: u32, c1: u32, l2: u32, c2: u32) -> Location {
    Location::new(FILE, Range::from_coords(l1, c1, l2, c2))
}

/// A clean fixture: no problems at any level.
fn shop() -> SourceMap {
    SourceMap::new(FILE)
        .with_pin(Pin::namespace("Shop", NamespaceKind::Class).at(at(0, 0, 60, 3)))
        .with_pin(Pin::namespace("Shop::Item", NamespaceKind::Class).at(at(50, 2, 58, 5)))
        .with_pin(
            Pin::method("Shop", "add", Scope::Instance)
                .with_parameters(&["item", "count = 1"])
                .with_docs("@param item [String]\n@param count [Integer]\n@return [void]")
                .at(at(1, 2, 3, 5)),
        )
        .with_pin(
            Pin::method("Shop", "configure", Scope::Instance)
                .with_parameters(&["z:", "mode: :fast", "**opts"])
                .with_docs(
                    "@param z [Integer]\n\
                     @param mode [Symbol]\n\
                     @param verbose [Boolean]\n\
                     @return [void]",
                )
                .at(at(4, 2, 6, 5)),
        )
        .with_pin(
            Pin::method("Shop", "label", Scope::Instance)
                .with_docs("@return [String]")
                .returning(Chain::literal("String"))
                .at(at(7, 2, 9, 5)),
        )
        .with_pin(
            Pin::method("Shop", "checkout", Scope::Instance)
                .with_docs("@return [void]")
                .at(at(20, 2, 40, 5)),
        )
        .with_pin(
            Pin::method("Shop::Item", "initialize", Scope::Instance)
                .with_parameters(&["name"])
                .with_docs("@param name [String]\n@return [void]")
                .at(at(51, 4, 53, 7)),
        )
}

/// A call on line `line` of `Shop#checkout`.
fn calling(line: u32, chain: Chain) -> SourceMap {
    let mut source = shop();
    source.add_call(Range::from_coords(line, 4, line, 30), Some(chain));
    source
}

fn problems(source: SourceMap, rules: Rules) -> Vec<(ProblemKind, String)> {
    init_tracing();
    let api = ApiMap::new().with_source(source);
    let checker = TypeChecker::with_rules(FILE, &api, rules);
    checker
        .problems()
        .iter()
        .map(|p| (p.kind, p.message.clone()))
        .collect()
}

fn strict(source: SourceMap) -> Vec<(ProblemKind, String)> {
    problems(source, Rules::new(Level::Strict))
}

fn int() -> Chain {
    Chain::literal("Integer")
}

fn string() -> Chain {
    Chain::literal("String")
}

#[test]
fn fixture_is_clean_at_every_level() {
    for level in Level::ALL {
        assert_eq!(problems(shop(), Rules::new(*level)), Vec::new(), "{level}");
    }
}

#[test]
fn idempotent_problem_lists() {
    let api = ApiMap::new().with_source(calling(21, Chain::call("bar", Vec::new())));
    let checker = TypeChecker::new(FILE, &api, Level::Strict);
    let first: Vec<String> = checker.problems().iter().map(ToString::to_string).collect();
    let second: Vec<String> = checker.problems().iter().map(ToString::to_string).collect();
    assert_eq!(first, second);
    assert_eq!(first, vec!["shop.rb:22:5: Unresolved call to bar [unresolved-call]"]);
}

// === Scenario A: return mismatch ===

#[test]
fn scenario_a_return_mismatch() {
    let source = shop().with_pin(
        Pin::method("Shop", "total", Scope::Instance)
            .with_docs("@return [String]")
            .returning(int())
            .at(at(10, 2, 12, 5)),
    );
    assert_eq!(
        strict(source),
        vec![(
            ProblemKind::ReturnMismatch,
            "Declared return type String does not match inferred type Integer for Shop#total".to_owned()
        )]
    );
}

// === Scenario B: wrong argument type ===

#[test]
fn scenario_b_wrong_argument_type() {
    let source = || calling(21, Chain::call("add", vec![int()]));
    assert_eq!(
        strict(source()),
        vec![(
            ProblemKind::ArgumentMismatch,
            "Wrong argument type for Shop#add: item expected String, received Integer".to_owned()
        )]
    );
    assert_eq!(problems(source(), Rules::new(Level::Typed)), Vec::new());
}

#[test]
fn every_positional_argument_is_checked() {
    let source = calling(21, Chain::call("add", vec![string(), string()]));
    assert_eq!(
        strict(source),
        vec![(
            ProblemKind::ArgumentMismatch,
            "Wrong argument type for Shop#add: count expected Integer, received String".to_owned()
        )]
    );
}

#[test]
fn splats_absorb_the_remaining_positionals() {
    let each = || {
        Pin::method("Shop", "each", Scope::Instance)
            .with_parameters(&["first", "*rest", "&blk"])
            .with_docs("@param first [String]\n@param rest [Array]\n@return [void]")
            .at(at(10, 2, 12, 5))
    };
    let clean = calling(21, Chain::call("each", vec![string(), int(), int()])).with_pin(each());
    assert_eq!(strict(clean), Vec::new());

    let wrong = calling(21, Chain::call("each", vec![int(), string()])).with_pin(each());
    assert_eq!(
        strict(wrong),
        vec![(
            ProblemKind::ArgumentMismatch,
            "Wrong argument type for Shop#each: first expected String, received Integer".to_owned()
        )]
    );
}

#[test]
fn constructors_check_initialize() {
    let chain = Chain::constant("Item").then_call("new", vec![int()]);
    assert_eq!(
        strict(calling(21, chain)),
        vec![(
            ProblemKind::ArgumentMismatch,
            "Wrong argument type for Shop::Item#initialize: name expected String, received Integer"
                .to_owned()
        )]
    );
}

#[test]
fn uninferable_arguments_are_not_compared() {
    let source = calling(21, Chain::call("add", vec![Chain::call("bar", Vec::new())]));
    assert_eq!(strict(source), Vec::new());
}

// === Scenario C: unresolved calls ===

#[test]
fn scenario_c_unresolved_call() {
    let source = || calling(21, Chain::call("bar", Vec::new()));
    assert_eq!(
        strict(source()),
        vec![(ProblemKind::UnresolvedCall, "Unresolved call to bar".to_owned())]
    );
    assert_eq!(problems(source(), Rules::new(Level::Typed)), Vec::new());
}

#[test]
fn unresolved_calls_name_the_innermost_failure() {
    let chain = Chain::call("label", Vec::new()).then_call("nope", Vec::new());
    assert_eq!(
        strict(calling(21, chain)),
        vec![(ProblemKind::UnresolvedCall, "Unresolved call to nope".to_owned())]
    );
}

#[test]
fn unresolved_outer_links_still_check_inner_arguments() {
    let chain = Chain::call("wrap", vec![int()]).then_call("nonexistent", Vec::new());
    let source = calling(21, chain).with_pin(
        Pin::method("Shop", "wrap", Scope::Instance)
            .with_parameters(&["s"])
            .with_docs("@param s [String]\n@return [String]")
            .returning(string())
            .at(at(10, 2, 12, 5)),
    );
    assert_eq!(
        strict(source),
        vec![
            (ProblemKind::UnresolvedCall, "Unresolved call to nonexistent".to_owned()),
            (
                ProblemKind::ArgumentMismatch,
                "Wrong argument type for Shop#wrap: s expected String, received Integer".to_owned()
            ),
        ]
    );
}

#[test]
fn untyped_receivers_are_not_the_call_at_fault() {
    let source = calling(21, Chain::call("mystery", Vec::new()).then_call("nope", Vec::new()))
        .with_pin(Pin::method("Shop", "mystery", Scope::Instance).at(at(10, 2, 12, 5)));
    let calls: Vec<(ProblemKind, String)> = strict(source)
        .into_iter()
        .filter(|(kind, _)| *kind == ProblemKind::UnresolvedCall)
        .collect();
    assert_eq!(calls, Vec::new());
}

#[test]
fn nested_calls_are_reported_once() {
    let mut source = shop();
    source.add_call(Range::from_coords(22, 8, 22, 12), Some(Chain::call("baz", Vec::new())));
    source.add_call(
        Range::from_coords(22, 4, 22, 13),
        Some(Chain::call("bar", vec![Chain::call("baz", Vec::new())])),
    );
    source.add_call(Range::from_coords(23, 4, 23, 10), None);
    assert_eq!(
        strict(source),
        vec![(ProblemKind::UnresolvedCall, "Unresolved call to bar".to_owned())]
    );
}

#[test]
fn calls_inside_unresolved_constants_are_not_reported() {
    let mut source = calling(24, Chain::constant("Missing").then_call("go", Vec::new()));
    source.add_constant(Range::from_coords(24, 4, 24, 11), "Missing", Some(Chain::constant("Missing")));
    assert_eq!(
        strict(source),
        vec![(ProblemKind::UnresolvedConstant, "Unresolved constant Missing".to_owned())]
    );
}

// === Scenario D: keyword arguments ===

#[test]
fn scenario_d_missing_keyword_argument() {
    let chain = Chain::call("configure", vec![Chain::keywords([("y", int())])]);
    assert_eq!(
        strict(calling(21, chain)),
        vec![(
            ProblemKind::MissingKeywordArgument,
            "Call to Shop#configure is missing keyword argument z".to_owned()
        )]
    );
}

#[test]
fn keyword_argument_types() {
    let chain = Chain::call("configure", vec![Chain::keywords([("z", string()), ("mode", Chain::literal("Symbol"))])]);
    assert_eq!(
        strict(calling(21, chain)),
        vec![(
            ProblemKind::ArgumentMismatch,
            "Wrong argument type for Shop#configure: z expected Integer, received String".to_owned()
        )]
    );
}

#[test]
fn keyword_rest_catches_documented_extras() {
    let chain = Chain::call("configure", vec![Chain::keywords([("z", int()), ("verbose", int()), ("other", int())])]);
    assert_eq!(
        strict(calling(21, chain)),
        vec![(
            ProblemKind::ArgumentMismatch,
            "Wrong argument type for Shop#configure: verbose expected Boolean, received Integer".to_owned()
        )]
    );
}

#[test]
fn computed_keys_may_supply_required_keywords() {
    let hash = Chain::new(vec![Link::Hash(vec![(HashKey::Dynamic, int())])]);
    assert_eq!(strict(calling(21, Chain::call("configure", vec![hash]))), Vec::new());
}

// === Arity ===

#[test]
fn arity_checks_are_opt_in() {
    let short = || calling(21, Chain::call("add", Vec::new()));
    assert_eq!(strict(short()), Vec::new());
    assert_eq!(
        problems(short(), Rules::new(Level::Strict).with_arity_checks()),
        vec![(ProblemKind::NotEnoughArguments, "Not enough arguments to Shop#add".to_owned())]
    );

    let no_keywords = || calling(21, Chain::call("configure", Vec::new()));
    assert_eq!(strict(no_keywords()), Vec::new());
    assert_eq!(
        problems(no_keywords(), Rules::new(Level::Strict).with_arity_checks()),
        vec![(
            ProblemKind::MissingKeywordArgument,
            "Call to Shop#configure is missing keyword argument z".to_owned()
        )]
    );
}
