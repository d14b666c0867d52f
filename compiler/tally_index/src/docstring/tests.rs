use pretty_assertions::assert_eq;

use super::*;

#[test]
fn parses_param_return_and_type_tags() {
    let doc = Docstring::parse(
        "Does a thing.\n\
         @param name [String, nil] the name\n\
         @param [Integer] count\n\
         @return [Array<String>] the result\n\
         @type [Hash{Symbol => Integer}]",
    );

    let name = doc.param_tag("name").unwrap_or_else(|| panic!("name tag"));
    assert_eq!(name.types, vec!["String", "nil"]);
    assert_eq!(name.tagged(), "String, nil");

    let count = doc.param_tag("count").unwrap_or_else(|| panic!("count tag"));
    assert_eq!(count.types, vec!["Integer"]);

    let ret = doc.return_tag().unwrap_or_else(|| panic!("return tag"));
    assert_eq!(ret.types, vec!["Array<String>"]);

    let ty = doc.type_tag().unwrap_or_else(|| panic!("type tag"));
    assert_eq!(ty.types, vec!["Hash{Symbol => Integer}"]);
}

#[test]
fn comment_markers_are_stripped() {
    let doc = Docstring::parse("# @return [void]\n# @abstract");
    assert_eq!(doc.return_tag().map(Tag::tagged), Some("void".to_owned()));
    assert!(doc.has_tag(TagKind::Abstract));
}

#[test]
fn nested_commas_stay_in_one_type() {
    let doc = Docstring::parse("@return [Hash<Symbol, String>, Hash{Symbol => String, nil}, nil]");
    assert_eq!(
        doc.return_tag().map(|t| t.types.clone()),
        Some(vec![
            "Hash<Symbol, String>".to_owned(),
            "Hash{Symbol => String, nil}".to_owned(),
            "nil".to_owned(),
        ])
    );
}

#[test]
fn untyped_tags_have_no_types() {
    let doc = Docstring::parse("@param value the value\n@return");
    let value = doc.param_tag("value").unwrap_or_else(|| panic!("value tag"));
    assert!(value.types.is_empty());
    assert!(doc.return_tag().is_some_and(|t| t.types.is_empty()));
    assert!(!doc.has_tag(TagKind::Type));
}

#[test]
fn unknown_tags_are_ignored() {
    let doc = Docstring::parse("@example\n  foo(1)\n@see Other");
    assert_eq!(doc, Docstring::default());
}
