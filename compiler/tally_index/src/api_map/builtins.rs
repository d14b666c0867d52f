//! Built-in class hierarchy.
//!
//! Enough of the core library for subtype questions about literal types to
//! have answers without mapping a stub file. Core *methods* are not listed;
//! map a stub source with [`super::ApiMap::map_external`] for those.

use crate::NamespaceKind;

/// `(path, superclass, kind, includes)`
pub(super) const CORE_NAMESPACES: &[(&str, Option<&str>, NamespaceKind, &[&str])] = &[
    ("BasicObject", None, NamespaceKind::Class, &[]),
    ("Kernel", None, NamespaceKind::Module, &[]),
    ("Comparable", None, NamespaceKind::Module, &[]),
    ("Enumerable", None, NamespaceKind::Module, &[]),
    ("Object", Some("BasicObject"), NamespaceKind::Class, &["Kernel"]),
    ("Module", Some("Object"), NamespaceKind::Class, &[]),
    ("Class", Some("Module"), NamespaceKind::Class, &[]),
    ("Numeric", Some("Object"), NamespaceKind::Class, &["Comparable"]),
    ("Integer", Some("Numeric"), NamespaceKind::Class, &[]),
    ("Float", Some("Numeric"), NamespaceKind::Class, &[]),
    ("String", Some("Object"), NamespaceKind::Class, &["Comparable"]),
    ("Symbol", Some("Object"), NamespaceKind::Class, &["Comparable"]),
    ("Array", Some("Object"), NamespaceKind::Class, &["Enumerable"]),
    ("Hash", Some("Object"), NamespaceKind::Class, &["Enumerable"]),
    ("Range", Some("Object"), NamespaceKind::Class, &["Enumerable"]),
    ("NilClass", Some("Object"), NamespaceKind::Class, &[]),
    ("TrueClass", Some("Object"), NamespaceKind::Class, &[]),
    ("FalseClass", Some("Object"), NamespaceKind::Class, &[]),
    ("Boolean", Some("Object"), NamespaceKind::Class, &[]),
    ("Proc", Some("Object"), NamespaceKind::Class, &[]),
    ("Exception", Some("Object"), NamespaceKind::Class, &[]),
    ("StandardError", Some("Exception"), NamespaceKind::Class, &[]),
];

/// Map literal type tags onto their classes.
pub(super) fn literal_class(name: &str) -> &str {
    match name {
        "nil" => "NilClass",
        "true" => "TrueClass",
        "false" => "FalseClass",
        other => other,
    }
}
