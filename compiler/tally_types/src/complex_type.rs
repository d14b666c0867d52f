//! Union types and their branches.

use std::fmt;
use std::ops::BitOr;

use crate::parse::{self, TypeParseError};

const UNDEFINED: &str = "undefined";
const VOID: &str = "void";
const SELF: &str = "self";
const CLASS: &str = "Class";

/// Names that are never resolved against the symbol index.
const SPECIAL: &[&str] = &[UNDEFINED, VOID, SELF, "nil", "true", "false", "Boolean"];

/// Type parameters attached to a named branch.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum Parameters {
    /// `String`
    #[default]
    None,
    /// `Array<String>`, `Class<Foo>`
    List(Vec<ComplexType>),
    /// `Hash{Symbol => Integer}`
    Hash {
        key: ComplexType,
        value: ComplexType,
    },
}

/// One branch of a union type.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct UniqueType {
    name: String,
    parameters: Parameters,
}

impl UniqueType {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let name = name.strip_prefix("::").map(str::to_owned).unwrap_or(name);
        UniqueType {
            name,
            parameters: Parameters::None,
        }
    }

    pub fn with_parameters(name: impl Into<String>, parameters: Parameters) -> Self {
        UniqueType {
            parameters,
            ..UniqueType::new(name)
        }
    }

    /// The bare name without parameters (`Array` for `Array<String>`).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn has_parameters(&self) -> bool {
        !matches!(self.parameters, Parameters::None)
    }

    /// The full tag text, including parameters.
    pub fn tag(&self) -> String {
        self.to_string()
    }

    pub fn is_undefined(&self) -> bool {
        self.name == UNDEFINED
    }

    pub fn is_void(&self) -> bool {
        self.name == VOID
    }

    pub fn is_self(&self) -> bool {
        self.name == SELF
    }

    /// Duck types name a method instead of a class: `#to_s`.
    pub fn is_duck_type(&self) -> bool {
        self.name.starts_with('#')
    }

    /// The method a duck type requires, without the leading `#`.
    pub fn duck_method(&self) -> Option<&str> {
        self.name.strip_prefix('#')
    }

    /// Check if this branch is exempt from name resolution.
    pub fn is_special(&self) -> bool {
        self.is_duck_type() || SPECIAL.contains(&self.name.as_str())
    }

    /// `Class<Foo>` refers to the class object `Foo` itself.
    pub fn is_class_reference(&self) -> bool {
        self.name == CLASS && matches!(&self.parameters, Parameters::List(p) if p.len() == 1)
    }

    /// The namespace whose methods this branch responds to.
    ///
    /// `Class<Foo>` answers `Foo` (to be looked up in class scope); every
    /// other branch answers its own name.
    pub fn namespace(&self) -> &str {
        if let Parameters::List(params) = &self.parameters {
            if self.name == CLASS && params.len() == 1 {
                if let Some(inner) = params[0].iter().next() {
                    return inner.name();
                }
            }
        }
        &self.name
    }

    /// Name used for subtype comparison: generics compare by bare name.
    pub fn fuzz(&self) -> String {
        if self.has_parameters() {
            self.name.clone()
        } else {
            self.tag()
        }
    }

    fn map_parameters(&self, f: &impl Fn(&ComplexType) -> ComplexType) -> Parameters {
        match &self.parameters {
            Parameters::None => Parameters::None,
            Parameters::List(items) => Parameters::List(items.iter().map(f).collect()),
            Parameters::Hash { key, value } => Parameters::Hash {
                key: f(key),
                value: f(value),
            },
        }
    }

    fn self_to(&self, namespace: &str) -> UniqueType {
        if self.is_self() {
            return UniqueType::new(namespace);
        }
        UniqueType {
            name: self.name.clone(),
            parameters: self.map_parameters(&|p| p.self_to(namespace)),
        }
    }

    fn qualify<R>(&self, resolve: &R, context: &str) -> Option<UniqueType>
    where
        R: Fn(&str, &str) -> Option<String>,
    {
        let name = if self.is_special() {
            self.name.clone()
        } else {
            resolve(&self.name, context)?
        };
        let parameters = match &self.parameters {
            Parameters::None => Parameters::None,
            Parameters::List(items) => Parameters::List(
                items
                    .iter()
                    .map(|p| p.qualify_strict(resolve, context))
                    .collect::<Option<_>>()?,
            ),
            Parameters::Hash { key, value } => Parameters::Hash {
                key: key.qualify_strict(resolve, context)?,
                value: value.qualify_strict(resolve, context)?,
            },
        };
        Some(UniqueType { name, parameters })
    }
}

impl fmt::Display for UniqueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        match &self.parameters {
            Parameters::None => Ok(()),
            Parameters::List(items) => {
                f.write_str("<")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(">")
            }
            Parameters::Hash { key, value } => write!(f, "{{{key} => {value}}}"),
        }
    }
}

/// A union of one or more `UniqueType` branches.
///
/// The empty union is `undefined`. Branches keep their source order and are
/// never duplicated.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Default)]
pub struct ComplexType {
    items: Vec<UniqueType>,
}

impl ComplexType {
    /// The type of something the analysis could not determine.
    pub const UNDEFINED: ComplexType = ComplexType { items: Vec::new() };

    pub fn new(items: impl IntoIterator<Item = UniqueType>) -> Self {
        let mut result = ComplexType::UNDEFINED;
        for item in items {
            result.push(item);
        }
        result
    }

    /// A single named branch.
    pub fn named(name: impl Into<String>) -> Self {
        ComplexType::new([UniqueType::new(name)])
    }

    pub fn void() -> Self {
        ComplexType::named(VOID)
    }

    pub fn nil() -> Self {
        ComplexType::named("nil")
    }

    /// `Class<name>`: the type of the class object itself.
    pub fn class_of(name: &str) -> Self {
        ComplexType::new([UniqueType::with_parameters(
            CLASS,
            Parameters::List(vec![ComplexType::named(name)]),
        )])
    }

    /// Parse tag text such as `Array<String>, nil`.
    pub fn parse(text: &str) -> Result<Self, TypeParseError> {
        parse::parse(text)
    }

    /// Parse each tag string of a documentation tag and union the results.
    ///
    /// Unparseable or empty input yields `undefined`.
    pub fn try_parse<S: AsRef<str>>(tags: &[S]) -> Self {
        tags.iter()
            .map(|t| ComplexType::parse(t.as_ref()).unwrap_or_default())
            .fold(ComplexType::UNDEFINED, |acc, t| acc | t)
    }

    fn push(&mut self, item: UniqueType) {
        if item.is_undefined() || self.items.contains(&item) {
            return;
        }
        self.items.push(item);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UniqueType> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_undefined(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_defined(&self) -> bool {
        !self.is_undefined()
    }

    /// Check if any branch is `void`.
    pub fn is_void(&self) -> bool {
        self.items.iter().any(UniqueType::is_void)
    }

    /// Check if every branch is a duck type.
    pub fn is_duck_type(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(UniqueType::is_duck_type)
    }

    /// Replace `self` branches (and `self` inside parameters) with `namespace`.
    #[must_use]
    pub fn self_to(&self, namespace: &str) -> ComplexType {
        if namespace.is_empty() {
            return self.clone();
        }
        ComplexType::new(self.items.iter().map(|t| t.self_to(namespace)))
    }

    /// Resolve every name through `resolve(name, context)`.
    ///
    /// Special tags and duck types pass through unchanged. If any branch (or
    /// any of its parameters) fails to resolve, the whole type is
    /// `undefined`.
    #[must_use]
    pub fn qualify<R>(&self, resolve: R, context: &str) -> ComplexType
    where
        R: Fn(&str, &str) -> Option<String>,
    {
        self.qualify_strict(&resolve, context).unwrap_or_default()
    }

    fn qualify_strict<R>(&self, resolve: &R, context: &str) -> Option<ComplexType>
    where
        R: Fn(&str, &str) -> Option<String>,
    {
        if self.is_undefined() {
            return None;
        }
        self.items
            .iter()
            .map(|t| t.qualify(resolve, context))
            .collect::<Option<Vec<_>>>()
            .map(ComplexType::new)
    }
}

impl BitOr for ComplexType {
    type Output = ComplexType;

    fn bitor(mut self, rhs: ComplexType) -> ComplexType {
        for item in rhs.items {
            self.push(item);
        }
        self
    }
}

impl From<UniqueType> for ComplexType {
    fn from(item: UniqueType) -> Self {
        ComplexType::new([item])
    }
}

impl<'a> IntoIterator for &'a ComplexType {
    type Item = &'a UniqueType;
    type IntoIter = std::slice::Iter<'a, UniqueType>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for ComplexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            return f.write_str(UNDEFINED);
        }
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}
