use pretty_assertions::assert_eq;

use super::*;
use crate::{Access, Context};

fn paths(pins: &[&Pin]) -> Vec<String> {
    pins.iter().map(|p| p.path()).collect()
}

/// ```text
/// module Named; def label; end; end
/// class Animal; include Named; def speak; end; def self.create; end; end
/// class Dog < Animal; def speak; end; attr_reader :name; end
/// module Outer; class Inner; end; end
/// def helper; end
/// ```
fn zoo() -> ApiMap {
    let source = SourceMap::new("zoo.rb")
        .with_pin(Pin::namespace("Named", NamespaceKind::Module))
        .with_pin(Pin::method("Named", "label", Scope::Instance))
        .with_pin(Pin::namespace("Animal", NamespaceKind::Class).including("Named"))
        .with_pin(Pin::method("Animal", "speak", Scope::Instance))
        .with_pin(Pin::method("Animal", "create", Scope::Class))
        .with_pin(Pin::namespace("Dog", NamespaceKind::Class).with_superclass("Animal"))
        .with_pin(Pin::method("Dog", "speak", Scope::Instance))
        .with_pin(Pin::attribute("Dog", "name", Access::Reader))
        .with_pin(Pin::instance_variable("@name", Context::new("Dog", Scope::Instance), None))
        .with_pin(Pin::instance_variable("@legs", Context::new("Animal", Scope::Instance), None))
        .with_pin(Pin::class_variable("@@count", "Animal", None))
        .with_pin(Pin::namespace("Outer", NamespaceKind::Module))
        .with_pin(Pin::namespace("Outer::Inner", NamespaceKind::Class))
        .with_pin(Pin::method("", "helper", Scope::Instance));
    ApiMap::new().with_source(source)
}

#[test]
fn core_hierarchy_without_sources() {
    let api = ApiMap::default();
    assert!(api.super_and_sub("Numeric", "Integer"));
    assert!(api.super_and_sub("Object", "String"));
    assert!(api.super_and_sub("Comparable", "String"));
    assert!(api.super_and_sub("Enumerable", "Array"));
    assert!(api.super_and_sub("Exception", "StandardError"));
    assert!(!api.super_and_sub("Integer", "Numeric"));
    assert!(!api.super_and_sub("String", "Symbol"));
}

#[test]
fn literal_tags_map_onto_classes() {
    let api = ApiMap::new();
    assert!(api.super_and_sub("NilClass", "nil"));
    assert!(api.super_and_sub("Boolean", "true"));
    assert!(api.super_and_sub("Boolean", "FalseClass"));
    assert!(api.super_and_sub("Object", "nil"));
    assert!(!api.super_and_sub("Boolean", "nil"));
}

#[test]
fn ancestors_walk_includes_then_superclasses() {
    let api = zoo();
    assert_eq!(
        api.ancestors("Dog"),
        vec!["Dog", "Animal", "Named", "Object", "Kernel", "BasicObject"]
    );
    assert_eq!(api.ancestors("Named"), vec!["Named", "Object", "BasicObject"]);
    assert_eq!(api.ancestors("BasicObject"), vec!["BasicObject"]);
    assert_eq!(api.ancestors("Kernel"), vec!["Kernel", "Object", "BasicObject"]);
    assert_eq!(api.ancestors("Unknown"), vec!["Unknown"]);
}

#[test]
fn user_classes_subclass_their_ancestors() {
    let api = zoo();
    assert!(api.super_and_sub("Animal", "Dog"));
    assert!(api.super_and_sub("Named", "Dog"));
    assert!(api.super_and_sub("Object", "Dog"));
    assert!(!api.super_and_sub("Dog", "Animal"));
}

#[test]
fn qualify_walks_outward() {
    let api = zoo();
    assert_eq!(api.qualify("Inner", "Outer"), Some("Outer::Inner".to_owned()));
    assert_eq!(api.qualify("Inner", "Outer::Inner"), Some("Outer::Inner".to_owned()));
    assert_eq!(api.qualify("Dog", "Outer::Inner"), Some("Dog".to_owned()));
    assert_eq!(api.qualify("String", "Dog"), Some("String".to_owned()));
    assert_eq!(api.qualify("::Dog", "Outer"), Some("Dog".to_owned()));
    assert_eq!(api.qualify("Inner", ""), None);
    assert_eq!(api.qualify("::Inner", "Outer"), None);
}

#[test]
fn method_stack_nearest_first() {
    let api = zoo();
    assert_eq!(
        paths(&api.get_method_stack("Dog", "speak", Scope::Instance)),
        vec!["Dog#speak", "Animal#speak"]
    );
    assert_eq!(
        paths(&api.get_method_stack("Dog", "label", Scope::Instance)),
        vec!["Named#label"]
    );
    assert_eq!(
        paths(&api.get_method_stack("Dog", "name", Scope::Instance)),
        vec!["Dog#name"]
    );
    assert!(api.get_method_stack("Dog", "create", Scope::Instance).is_empty());
}

#[test]
fn class_methods_are_inherited() {
    let api = zoo();
    assert_eq!(
        paths(&api.get_method_stack("Dog", "create", Scope::Class)),
        vec!["Animal.create"]
    );
}

#[test]
fn top_level_methods_are_visible_everywhere() {
    let api = zoo();
    assert_eq!(paths(&api.get_method_stack("Dog", "helper", Scope::Instance)), vec!["#helper"]);
    assert_eq!(paths(&api.get_method_stack("", "helper", Scope::Instance)), vec!["#helper"]);
    assert_eq!(paths(&api.get_method_stack("Dog", "helper", Scope::Class)), vec!["#helper"]);
}

#[test]
fn method_stacks_are_cached_until_remapped() {
    let mut api = zoo();
    assert_eq!(api.get_method_stack("Dog", "fetch", Scope::Instance).len(), 0);
    assert_eq!(api.get_method_stack("Dog", "fetch", Scope::Instance).len(), 0);

    api.map(SourceMap::new("tricks.rb").with_pin(Pin::method("Dog", "fetch", Scope::Instance)));
    assert_eq!(
        paths(&api.get_method_stack("Dog", "fetch", Scope::Instance)),
        vec!["Dog#fetch"]
    );
}

#[test]
fn remapping_a_file_replaces_it() {
    let mut api = zoo();
    api.map(SourceMap::new("zoo.rb").with_pin(Pin::namespace("Cat", NamespaceKind::Class)));
    assert!(api.get_path_pins("Dog").is_empty());
    assert_eq!(paths(&api.get_path_pins("Cat")), vec!["Cat"]);
}

#[test]
fn variables_by_owner() {
    let api = zoo();
    let ivars = api.get_instance_variable_pins("Dog", Scope::Instance);
    assert_eq!(ivars.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(), vec!["@name", "@legs"]);
    assert!(api.get_instance_variable_pins("Dog", Scope::Class).is_empty());

    let cvars = api.get_class_variable_pins("Dog");
    assert_eq!(cvars.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(), vec!["@@count"]);
}

#[test]
fn bundled_tracks_how_a_file_was_mapped() {
    let api = zoo().with_external(SourceMap::new("gems/core.rbs"));
    assert!(api.bundled("zoo.rb"));
    assert!(!api.bundled("gems/core.rbs"));
    assert!(!api.bundled("missing.rb"));
    assert!(api.source_map("gems/core.rbs").is_some());
    assert!(api.source_map("missing.rb").is_none());
}

#[test]
fn pins_resolve_into_the_source_that_owns_them() {
    let mut api = zoo();
    for n in 0..40 {
        let class = format!("Stub{n}");
        api.map(
            SourceMap::new(format!("stubs/{n}.rb"))
                .with_pin(Pin::namespace(&class, NamespaceKind::Class))
                .with_pin(Pin::method(&class, "run", Scope::Instance)),
        );
    }
    api.map(SourceMap::new("stubs/7.rb").with_pin(Pin::method("Stub7", "halt", Scope::Instance)));

    assert_eq!(paths(&api.get_method_stack("Stub39", "run", Scope::Instance)), vec!["Stub39#run"]);
    assert_eq!(paths(&api.get_method_stack("Stub7", "halt", Scope::Instance)), vec!["Stub7#halt"]);
    assert!(api.get_method_stack("Stub7", "run", Scope::Instance).is_empty());
    assert_eq!(paths(&api.get_path_pins("Dog#speak")), vec!["Dog#speak"]);
}
