//! The symbol index interface.

use crate::{Pin, Scope, SourceMap};

/// Whole-program knowledge the checker and chain inference query.
///
/// Implementations are read-only while a check runs, so every method takes
/// `&self` and the trait requires `Sync` for checks that fan out across
/// threads. Returned pins borrow from the index.
pub trait SymbolIndex: Sync {
    /// The source map for a mapped file.
    fn source_map(&self, filename: &str) -> Option<&SourceMap>;

    /// Check if `filename` is part of the analysed project rather than a
    /// dependency or stub.
    fn bundled(&self, filename: &str) -> bool;

    /// Resolve a (possibly relative) namespace or constant name as seen
    /// from `context`. `None` if nothing by that name exists.
    fn qualify(&self, name: &str, context: &str) -> Option<String>;

    /// Check if `sub` is `sup` or inherits from / includes it.
    fn super_and_sub(&self, sup: &str, sub: &str) -> bool;

    /// Methods named `name` visible on `namespace` in `scope`, nearest
    /// definition first.
    fn get_method_stack(&self, namespace: &str, name: &str, scope: Scope) -> Vec<&Pin>;

    /// Instance variables declared in `namespace` (and its ancestors for
    /// instance scope).
    fn get_instance_variable_pins(&self, namespace: &str, scope: Scope) -> Vec<&Pin>;

    fn get_class_variable_pins(&self, namespace: &str) -> Vec<&Pin>;

    /// Declarations with the given fully qualified path.
    fn get_path_pins(&self, path: &str) -> Vec<&Pin>;
}
