//! Declarations ("pins").
//!
//! A `Pin` is any named declaration the index knows about. Shared data
//! (name, location, enclosing context, documentation) lives on the struct;
//! everything specific to one kind of declaration lives in [`PinKind`].
//!
//! # Kinds
//!
//! ```text
//! Namespace        class/module; context is the *enclosing* namespace
//! Method           def, with parameters and returned expressions
//! Attribute        attr_reader/attr_writer accessor
//! Parameter        a method parameter, visible as a local
//! LocalVariable    x = ...
//! InstanceVariable @x = ...
//! ClassVariable    @@x = ...
//! Constant         X = ...
//! ```

use std::fmt;

use tally_ir::{Location, Range};
use tally_types::ComplexType;

use crate::{Chain, Docstring, TagKind};

/// Whether a member belongs to instances or to the class object.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Scope {
    Instance,
    Class,
}

/// The namespace and scope a declaration lives in.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Context {
    /// Fully qualified namespace path; the root namespace is `""`.
    pub namespace: String,
    pub scope: Scope,
}

impl Context {
    pub fn new(namespace: impl Into<String>, scope: Scope) -> Self {
        Context {
            namespace: namespace.into(),
            scope,
        }
    }

    pub fn root() -> Self {
        Context::new("", Scope::Class)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NamespaceKind {
    Class,
    Module,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Access {
    Reader,
    Writer,
}

/// How a parameter is declared.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ParamDecl {
    /// `x`
    Arg,
    /// `x = 1`
    OptArg,
    /// `*rest`
    RestArg,
    /// `x:`
    KwArg,
    /// `x: 1`
    KwOptArg,
    /// `**opts`
    KwRestArg,
    /// `&block`
    BlockArg,
}

impl ParamDecl {
    /// Plain positional parameters, required or optional.
    pub fn is_positional(self) -> bool {
        matches!(self, ParamDecl::Arg | ParamDecl::OptArg)
    }

    /// Parameters supplied by name from a trailing hash.
    pub fn is_keyword(self) -> bool {
        matches!(self, ParamDecl::KwArg | ParamDecl::KwOptArg | ParamDecl::KwRestArg)
    }

    /// Rest, keyword-rest and block parameters never need a `@param` tag.
    pub fn is_variadic(self) -> bool {
        matches!(
            self,
            ParamDecl::RestArg | ParamDecl::KwRestArg | ParamDecl::BlockArg
        )
    }
}

/// A parameter as written in a method signature.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Parameter {
    pub name: String,
    pub decl: ParamDecl,
}

impl Parameter {
    pub fn new(name: impl Into<String>, decl: ParamDecl) -> Self {
        Parameter {
            name: name.into(),
            decl,
        }
    }

    /// Read a parameter from its declaration form: `x`, `x = 1`, `*rest`,
    /// `x:`, `x: 1`, `**opts`, `&block`.
    pub fn from_declaration(text: &str) -> Self {
        let text = text.trim();
        if let Some(name) = text.strip_prefix("**") {
            return Parameter::new(name.trim(), ParamDecl::KwRestArg);
        }
        if let Some(name) = text.strip_prefix('*') {
            return Parameter::new(name.trim(), ParamDecl::RestArg);
        }
        if let Some(name) = text.strip_prefix('&') {
            return Parameter::new(name.trim(), ParamDecl::BlockArg);
        }
        if let Some((name, default)) = text.split_once(':') {
            let decl = if default.trim().is_empty() {
                ParamDecl::KwArg
            } else {
                ParamDecl::KwOptArg
            };
            return Parameter::new(name.trim(), decl);
        }
        if let Some((name, _)) = text.split_once('=') {
            return Parameter::new(name.trim(), ParamDecl::OptArg);
        }
        Parameter::new(text, ParamDecl::Arg)
    }
}

/// Method-specific declaration data.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Default)]
pub struct MethodData {
    pub parameters: Vec<Parameter>,
    /// Expressions the method body can return.
    pub returns: Vec<Chain>,
    /// False for methods generated without a body (macros, stubs).
    pub has_body: bool,
    /// Set for `alias_method` declarations: the aliased method name.
    pub alias_of: Option<String>,
}

/// Kind-specific payload of a declaration.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum PinKind {
    Namespace {
        kind: NamespaceKind,
        superclass: Option<String>,
        includes: Vec<String>,
    },
    Method(MethodData),
    Attribute {
        access: Access,
    },
    Parameter {
        decl: ParamDecl,
        /// Range in which the parameter is visible.
        presence: Range,
    },
    LocalVariable {
        assignment: Option<Chain>,
        presence: Range,
    },
    InstanceVariable {
        assignment: Option<Chain>,
    },
    ClassVariable {
        assignment: Option<Chain>,
    },
    Constant {
        assignment: Option<Chain>,
    },
}

/// A declaration.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Pin {
    pub name: String,
    pub location: Option<Location>,
    /// Enclosing namespace and scope.
    pub context: Context,
    pub docstring: Docstring,
    pub kind: PinKind,
}

impl Pin {
    fn new(name: impl Into<String>, context: Context, kind: PinKind) -> Self {
        Pin {
            name: name.into(),
            location: None,
            context,
            docstring: Docstring::default(),
            kind,
        }
    }

    /// A class or module. `path` is fully qualified (`Foo::Bar`).
    pub fn namespace(path: &str, kind: NamespaceKind) -> Self {
        let (parent, name) = match path.rsplit_once("::") {
            Some((parent, name)) => (parent, name),
            None => ("", path),
        };
        Pin::new(
            name,
            Context::new(parent, Scope::Class),
            PinKind::Namespace {
                kind,
                superclass: None,
                includes: Vec::new(),
            },
        )
    }

    /// The root namespace every file starts in.
    pub fn root() -> Self {
        Pin::namespace("", NamespaceKind::Class)
    }

    pub fn method(namespace: &str, name: &str, scope: Scope) -> Self {
        Pin::new(
            name,
            Context::new(namespace, scope),
            PinKind::Method(MethodData {
                has_body: true,
                ..MethodData::default()
            }),
        )
    }

    pub fn attribute(namespace: &str, name: &str, access: Access) -> Self {
        Pin::new(
            name,
            Context::new(namespace, Scope::Instance),
            PinKind::Attribute { access },
        )
    }

    /// The `index`th parameter of `method`, visible throughout `presence`.
    ///
    /// Returns `None` if the method has no such parameter.
    pub fn parameter_of(method: &Pin, index: usize, presence: Range) -> Option<Self> {
        let param = method.parameters().get(index)?;
        let mut pin = Pin::new(
            param.name.clone(),
            method.context.clone(),
            PinKind::Parameter {
                decl: param.decl,
                presence,
            },
        );
        pin.location.clone_from(&method.location);
        pin.docstring = method.docstring.clone();
        Some(pin)
    }

    pub fn local(name: &str, context: Context, assignment: Option<Chain>, presence: Range) -> Self {
        Pin::new(name, context, PinKind::LocalVariable { assignment, presence })
    }

    pub fn instance_variable(name: &str, context: Context, assignment: Option<Chain>) -> Self {
        Pin::new(name, context, PinKind::InstanceVariable { assignment })
    }

    pub fn class_variable(name: &str, namespace: &str, assignment: Option<Chain>) -> Self {
        Pin::new(
            name,
            Context::new(namespace, Scope::Class),
            PinKind::ClassVariable { assignment },
        )
    }

    pub fn constant(name: &str, namespace: &str, assignment: Option<Chain>) -> Self {
        Pin::new(
            name,
            Context::new(namespace, Scope::Class),
            PinKind::Constant { assignment },
        )
    }

    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn with_docs(mut self, comments: &str) -> Self {
        self.docstring = Docstring::parse(comments);
        self
    }

    /// Set method parameters from their declaration forms.
    #[must_use]
    pub fn with_parameters<S: AsRef<str>>(mut self, params: &[S]) -> Self {
        if let PinKind::Method(data) = &mut self.kind {
            data.parameters = params
                .iter()
                .map(|p| Parameter::from_declaration(p.as_ref()))
                .collect();
        }
        self
    }

    /// Add an expression the method can return.
    #[must_use]
    pub fn returning(mut self, chain: Chain) -> Self {
        if let PinKind::Method(data) = &mut self.kind {
            data.returns.push(chain);
        }
        self
    }

    /// Mark a method as having no body to analyse.
    #[must_use]
    pub fn without_body(mut self) -> Self {
        if let PinKind::Method(data) = &mut self.kind {
            data.has_body = false;
        }
        self
    }

    #[must_use]
    pub fn alias_of(mut self, original: &str) -> Self {
        if let PinKind::Method(data) = &mut self.kind {
            data.alias_of = Some(original.to_owned());
        }
        self
    }

    #[must_use]
    pub fn with_superclass(mut self, name: &str) -> Self {
        if let PinKind::Namespace { superclass, .. } = &mut self.kind {
            *superclass = Some(name.to_owned());
        }
        self
    }

    #[must_use]
    pub fn including(mut self, module: &str) -> Self {
        if let PinKind::Namespace { includes, .. } = &mut self.kind {
            includes.push(module.to_owned());
        }
        self
    }

    // === Queries ===

    /// The namespace this pin opens, or the one it lives in.
    pub fn full_namespace(&self) -> String {
        match &self.kind {
            PinKind::Namespace { .. } => self.path(),
            _ => self.context.namespace.clone(),
        }
    }

    /// The scope `self` has inside this pin's body.
    pub fn body_scope(&self) -> Scope {
        match &self.kind {
            PinKind::Namespace { .. } => Scope::Class,
            _ => self.context.scope,
        }
    }

    /// Human-readable qualified name: `Foo::Bar`, `Foo#bar`, `Foo.bar`.
    pub fn path(&self) -> String {
        let ns = &self.context.namespace;
        match &self.kind {
            PinKind::Namespace { .. } | PinKind::Constant { .. } => {
                if ns.is_empty() {
                    self.name.clone()
                } else {
                    format!("{ns}::{}", self.name)
                }
            }
            PinKind::Method(_) | PinKind::Attribute { .. } => {
                let sep = match self.context.scope {
                    Scope::Instance => '#',
                    Scope::Class => '.',
                };
                format!("{ns}{sep}{}", self.name)
            }
            _ => self.name.clone(),
        }
    }

    pub fn is_method_like(&self) -> bool {
        matches!(self.kind, PinKind::Method(_) | PinKind::Attribute { .. })
    }

    pub fn is_attribute(&self) -> bool {
        matches!(self.kind, PinKind::Attribute { .. })
    }

    pub fn is_alias(&self) -> bool {
        matches!(&self.kind, PinKind::Method(data) if data.alias_of.is_some())
    }

    pub fn is_variable(&self) -> bool {
        matches!(
            self.kind,
            PinKind::LocalVariable { .. }
                | PinKind::InstanceVariable { .. }
                | PinKind::ClassVariable { .. }
                | PinKind::Constant { .. }
        )
    }

    /// Methods without a body have nothing to infer from.
    pub fn has_body(&self) -> bool {
        match &self.kind {
            PinKind::Method(data) => data.has_body,
            _ => true,
        }
    }

    pub fn is_abstract(&self) -> bool {
        self.docstring.has_tag(TagKind::Abstract)
    }

    pub fn parameters(&self) -> &[Parameter] {
        match &self.kind {
            PinKind::Method(data) => &data.parameters,
            _ => &[],
        }
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters().iter().map(|p| p.name.as_str())
    }

    /// The range in which a local or parameter is visible.
    pub fn presence(&self) -> Option<Range> {
        match &self.kind {
            PinKind::LocalVariable { presence, .. } | PinKind::Parameter { presence, .. } => {
                Some(*presence)
            }
            _ => None,
        }
    }

    /// The right-hand side of a variable or constant assignment.
    pub fn assignment(&self) -> Option<&Chain> {
        match &self.kind {
            PinKind::LocalVariable { assignment, .. }
            | PinKind::InstanceVariable { assignment }
            | PinKind::ClassVariable { assignment }
            | PinKind::Constant { assignment } => assignment.as_ref(),
            _ => None,
        }
    }

    /// The raw type strings this pin was documented with.
    ///
    /// Methods and attributes use `@return`, parameters their `@param`
    /// entry, variables and constants `@type`.
    pub fn type_tag_strings(&self) -> Option<&[String]> {
        let tag = match &self.kind {
            PinKind::Namespace { .. } => None,
            PinKind::Method(_) | PinKind::Attribute { .. } => self.docstring.return_tag(),
            PinKind::Parameter { .. } => self.docstring.param_tag(&self.name),
            _ => self.docstring.type_tag(),
        }?;
        (!tag.types.is_empty()).then_some(tag.types.as_slice())
    }

    /// The declared type before qualification.
    pub fn return_type(&self) -> ComplexType {
        match &self.kind {
            PinKind::Namespace { .. } => ComplexType::class_of(&self.path()),
            _ => self
                .type_tag_strings()
                .map(ComplexType::try_parse)
                .unwrap_or_default(),
        }
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests;
