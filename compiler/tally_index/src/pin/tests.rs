use pretty_assertions::assert_eq;
use tally_ir::Range;

use super::*;

#[test]
fn parameter_declaration_forms() {
    let cases = [
        ("x", ParamDecl::Arg, "x"),
        ("x = 1", ParamDecl::OptArg, "x"),
        ("*rest", ParamDecl::RestArg, "rest"),
        ("key:", ParamDecl::KwArg, "key"),
        ("key: 1", ParamDecl::KwOptArg, "key"),
        ("**opts", ParamDecl::KwRestArg, "opts"),
        ("&block", ParamDecl::BlockArg, "block"),
    ];
    for (text, decl, name) in cases {
        let param = Parameter::from_declaration(text);
        assert_eq!(param.decl, decl, "{text}");
        assert_eq!(param.name, name, "{text}");
    }
    assert_eq!(Parameter::from_declaration(" key: ").name, "key");
}

#[test]
fn decl_predicates() {
    assert!(ParamDecl::Arg.is_positional());
    assert!(ParamDecl::OptArg.is_positional());
    assert!(!ParamDecl::KwArg.is_positional());
    assert!(!ParamDecl::RestArg.is_positional());
    assert!(ParamDecl::KwArg.is_keyword());
    assert!(ParamDecl::KwOptArg.is_keyword());
    assert!(ParamDecl::KwRestArg.is_keyword());
    assert!(!ParamDecl::RestArg.is_keyword());
    assert!(!ParamDecl::BlockArg.is_keyword());
    assert!(ParamDecl::BlockArg.is_variadic());
    assert!(!ParamDecl::KwOptArg.is_variadic());
}

#[test]
fn paths_by_kind() {
    assert_eq!(Pin::namespace("Foo::Bar", NamespaceKind::Class).path(), "Foo::Bar");
    assert_eq!(Pin::namespace("Foo", NamespaceKind::Module).path(), "Foo");
    assert_eq!(Pin::method("Foo", "bar", Scope::Instance).path(), "Foo#bar");
    assert_eq!(Pin::method("Foo", "make", Scope::Class).path(), "Foo.make");
    assert_eq!(Pin::method("", "helper", Scope::Instance).path(), "#helper");
    assert_eq!(Pin::constant("MAX", "Foo", None).path(), "Foo::MAX");
    assert_eq!(Pin::constant("MAX", "", None).path(), "MAX");
    assert_eq!(Pin::instance_variable("@x", Context::new("Foo", Scope::Instance), None).path(), "@x");
}

#[test]
fn namespace_pins_open_their_own_namespace() {
    let ns = Pin::namespace("Foo::Bar", NamespaceKind::Class);
    assert_eq!(ns.context.namespace, "Foo");
    assert_eq!(ns.full_namespace(), "Foo::Bar");
    assert_eq!(ns.body_scope(), Scope::Class);

    let method = Pin::method("Foo::Bar", "baz", Scope::Instance);
    assert_eq!(method.full_namespace(), "Foo::Bar");
    assert_eq!(method.body_scope(), Scope::Instance);

    let root = Pin::root();
    assert_eq!(root.path(), "");
    assert_eq!(root.full_namespace(), "");
}

#[test]
fn method_builders() {
    let pin = Pin::method("Foo", "bar", Scope::Instance)
        .with_parameters(&["a", "b = 2", "c:"])
        .with_docs("@abstract");
    assert_eq!(pin.parameter_names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert!(pin.is_abstract());
    assert!(pin.has_body());
    assert!(!pin.without_body().has_body());

    let alias = Pin::method("Foo", "baz", Scope::Instance).alias_of("bar");
    assert!(alias.is_alias());
    assert!(!Pin::method("Foo", "bar", Scope::Instance).is_alias());
}

#[test]
fn builders_ignore_the_wrong_kind() {
    let constant = Pin::constant("X", "", None)
        .with_parameters(&["a"])
        .returning(Chain::literal("Integer"))
        .with_superclass("Object");
    assert!(constant.parameters().is_empty());
    assert_eq!(constant.kind, PinKind::Constant { assignment: None });
}

#[test]
fn parameter_pins_take_the_method_docs() {
    let method = Pin::method("Foo", "bar", Scope::Instance)
        .with_parameters(&["name", "**opts"])
        .with_docs("@param name [String]");
    let presence = Range::from_coords(1, 0, 3, 3);

    let name = Pin::parameter_of(&method, 0, presence).unwrap_or_else(|| panic!("parameter"));
    assert_eq!(name.name, "name");
    assert_eq!(name.presence(), Some(presence));
    assert_eq!(name.type_tag_strings(), Some(&["String".to_owned()][..]));
    assert_eq!(name.return_type().to_string(), "String");

    let opts = Pin::parameter_of(&method, 1, presence).unwrap_or_else(|| panic!("parameter"));
    assert_eq!(opts.type_tag_strings(), None);
    assert!(opts.return_type().is_undefined());

    assert!(Pin::parameter_of(&method, 2, presence).is_none());
}

#[test]
fn type_tags_by_kind() {
    let method = Pin::method("Foo", "bar", Scope::Instance).with_docs("@return [Integer, nil]");
    assert_eq!(method.return_type().to_string(), "Integer, nil");

    let ivar = Pin::instance_variable("@x", Context::new("Foo", Scope::Instance), None)
        .with_docs("@type [Array<String>]");
    assert_eq!(ivar.return_type().to_string(), "Array<String>");

    let empty = Pin::method("Foo", "bar", Scope::Instance).with_docs("@return []");
    assert_eq!(empty.type_tag_strings(), None);

    let ns = Pin::namespace("Foo", NamespaceKind::Class);
    assert_eq!(ns.return_type().to_string(), "Class<Foo>");
}

#[test]
fn classification() {
    let reader = Pin::attribute("Foo", "name", Access::Reader);
    assert!(reader.is_method_like());
    assert!(reader.is_attribute());

    let local = Pin::local("x", Context::root(), None, Range::from_coords(0, 0, 1, 0));
    assert!(local.is_variable());
    assert!(local.presence().is_some());

    let assigned = Pin::class_variable("@@count", "Foo", Some(Chain::literal("Integer")));
    assert!(assigned.is_variable());
    assert_eq!(assigned.assignment(), Some(&Chain::literal("Integer")));

    assert!(!Pin::method("Foo", "bar", Scope::Class).is_variable());
}

#[test]
fn display_is_the_path() {
    assert_eq!(Pin::method("Foo", "bar", Scope::Instance).to_string(), "Foo#bar");
}
