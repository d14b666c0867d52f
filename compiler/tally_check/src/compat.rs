//! The type compatibility relation.
//!
//! Two strengths of "does `inferred` satisfy `declared`":
//!
//! - [`types_match`]: every inferred branch must be covered by a declared
//!   branch. Used for return types, where the body may produce any branch.
//! - [`any_types_match`]: one acceptable overlap is enough. Used for
//!   arguments and variables.
//!
//! A declared branch satisfies an inferred branch when the tags are equal,
//! when the index reports a subtype relationship between their bare names
//! (generics compare by name only), or, for duck types, when the inferred
//! type responds to the named method.

use tally_index::{Scope, SymbolIndex};
use tally_types::{ComplexType, UniqueType};

/// Check if every branch of `inferred` is satisfied by some branch of
/// `declared`.
pub fn types_match<I: SymbolIndex + ?Sized>(
    index: &I,
    declared: &ComplexType,
    inferred: &ComplexType,
) -> bool {
    if declared.to_string() == inferred.to_string() {
        return true;
    }
    inferred
        .iter()
        .all(|inf| declared.iter().any(|dec| satisfies(index, dec, inf)))
}

/// Check if some declared branch is satisfied by some inferred branch.
///
/// An all-duck declaration is a capability list instead: every listed
/// method must be provided.
pub fn any_types_match<I: SymbolIndex + ?Sized>(
    index: &I,
    declared: &ComplexType,
    inferred: &ComplexType,
) -> bool {
    if declared.is_duck_type() {
        return duck_types_match(index, declared, inferred);
    }
    declared
        .iter()
        .filter(|dec| !dec.is_duck_type())
        .any(|dec| inferred.iter().any(|inf| is_subtype(index, dec, inf)))
}

/// Check if every inferred branch provides every method the duck branches
/// of `declared` require.
pub fn duck_types_match<I: SymbolIndex + ?Sized>(
    index: &I,
    declared: &ComplexType,
    inferred: &ComplexType,
) -> bool {
    if inferred.is_undefined() {
        return false;
    }
    declared
        .iter()
        .filter_map(UniqueType::duck_method)
        .all(|method| inferred.iter().all(|inf| responds_to(index, inf, method)))
}

fn satisfies<I: SymbolIndex + ?Sized>(index: &I, declared: &UniqueType, inferred: &UniqueType) -> bool {
    match declared.duck_method() {
        Some(method) => responds_to(index, inferred, method),
        None => is_subtype(index, declared, inferred),
    }
}

fn is_subtype<I: SymbolIndex + ?Sized>(index: &I, declared: &UniqueType, inferred: &UniqueType) -> bool {
    declared.tag() == inferred.tag() || index.super_and_sub(&declared.fuzz(), &inferred.fuzz())
}

/// Check if values of type `ty` have a method named `method`.
fn responds_to<I: SymbolIndex + ?Sized>(index: &I, ty: &UniqueType, method: &str) -> bool {
    let scope = if ty.is_class_reference() {
        Scope::Class
    } else {
        Scope::Instance
    };
    !index.get_method_stack(ty.namespace(), method, scope).is_empty()
}
