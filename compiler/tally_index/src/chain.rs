//! Call chains.
//!
//! A chain is the flattened form of a dotted expression: `a.b(x).c(y)` is
//! the links `[Variable(a), Call(b, [x]), Call(c, [y])]`, where each
//! argument is itself a chain.
//!
//! Resolution (`define`) and inference (`infer`) only ever look at the last
//! link; everything before it is the chain's `base`, inferred first to find
//! the receiver.

use tally_types::{ComplexType, UniqueType};

use crate::{Pin, Scope, SymbolIndex};

/// Inference past this depth gives up with `undefined`.
///
/// Bounds mutually recursive methods and self-referencing assignments.
pub const MAX_INFERENCE_DEPTH: usize = 24;

static UNDEFINED_LINK: Link = Link::Undefined;

/// A key in a hash literal argument.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum HashKey {
    /// `name: value` or `:name => value`
    Symbol(String),
    /// Any key that is not a literal symbol.
    Dynamic,
}

/// A method call link.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Call {
    pub word: String,
    pub arguments: Vec<Chain>,
}

/// One segment of a chain.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Link {
    Call(Call),
    Variable(String),
    InstanceVariable(String),
    ClassVariable(String),
    Constant(String),
    /// A literal with a known type: `1`, `"str"`, `nil`.
    Literal(ComplexType),
    /// A hash literal, the form keyword arguments take.
    Hash(Vec<(HashKey, Chain)>),
    /// `self`
    Head,
    /// Placeholder for a missing link.
    Undefined,
}

impl Link {
    /// The source word for messages.
    pub fn word(&self) -> String {
        match self {
            Link::Call(call) => call.word.clone(),
            Link::Variable(name)
            | Link::InstanceVariable(name)
            | Link::ClassVariable(name)
            | Link::Constant(name) => name.clone(),
            Link::Literal(ty) => format!("<{ty}>"),
            Link::Hash(_) => "<Hash>".to_owned(),
            Link::Head => "self".to_owned(),
            Link::Undefined => "<undefined>".to_owned(),
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Link::Undefined)
    }

    pub fn arguments(&self) -> &[Chain] {
        match self {
            Link::Call(call) => &call.arguments,
            _ => &[],
        }
    }
}

/// A dotted/chained expression.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Chain {
    links: Vec<Link>,
}

impl Chain {
    /// A chain of `links`; an empty list becomes a single undefined link.
    pub fn new(links: Vec<Link>) -> Self {
        if links.is_empty() {
            return Chain {
                links: vec![Link::Undefined],
            };
        }
        Chain { links }
    }

    // === Constructors for single-link chains ===

    pub fn call(word: &str, arguments: Vec<Chain>) -> Self {
        Chain::new(vec![Link::Call(Call {
            word: word.to_owned(),
            arguments,
        })])
    }

    pub fn variable(name: &str) -> Self {
        Chain::new(vec![Link::Variable(name.to_owned())])
    }

    pub fn instance_variable(name: &str) -> Self {
        Chain::new(vec![Link::InstanceVariable(name.to_owned())])
    }

    pub fn class_variable(name: &str) -> Self {
        Chain::new(vec![Link::ClassVariable(name.to_owned())])
    }

    pub fn constant(name: &str) -> Self {
        Chain::new(vec![Link::Constant(name.to_owned())])
    }

    /// A literal of the named type.
    pub fn literal(type_name: &str) -> Self {
        Chain::new(vec![Link::Literal(ComplexType::named(type_name))])
    }

    /// A hash literal with symbol keys: `{ a: 1, b: 2 }` or trailing
    /// keyword arguments `foo(a: 1, b: 2)`.
    pub fn keywords<S: Into<String>>(entries: impl IntoIterator<Item = (S, Chain)>) -> Self {
        Chain::new(vec![Link::Hash(
            entries
                .into_iter()
                .map(|(k, v)| (HashKey::Symbol(k.into()), v))
                .collect(),
        )])
    }

    pub fn head() -> Self {
        Chain::new(vec![Link::Head])
    }

    /// Append a method call: `chain.word(arguments)`.
    #[must_use]
    pub fn then_call(mut self, word: &str, arguments: Vec<Chain>) -> Self {
        if self.is_single_undefined() {
            self.links.clear();
        }
        self.links.push(Link::Call(Call {
            word: word.to_owned(),
            arguments,
        }));
        self
    }

    // === Structure ===

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn last(&self) -> &Link {
        self.links.last().unwrap_or(&UNDEFINED_LINK)
    }

    /// The chain without its last link.
    ///
    /// The base of a single-link chain is the undefined chain.
    #[must_use]
    pub fn base(&self) -> Chain {
        let rest = self.links.split_last().map_or(&[][..], |(_, rest)| rest);
        Chain::new(rest.to_vec())
    }

    /// Check if any link is undefined.
    pub fn is_undefined(&self) -> bool {
        self.links.iter().any(Link::is_undefined)
    }

    /// A chain reduced to nothing but an undefined link.
    pub fn is_single_undefined(&self) -> bool {
        self.links.len() == 1 && self.links[0].is_undefined()
    }

    /// The literal keyword map of a hash-literal chain.
    ///
    /// Non-symbol keys are skipped; a chain that is not a hash literal gives
    /// an empty map.
    pub fn keyword_map(&self) -> Vec<(&str, &Chain)> {
        match self.links.as_slice() {
            [Link::Hash(entries)] => entries
                .iter()
                .filter_map(|(key, value)| match key {
                    HashKey::Symbol(name) => Some((name.as_str(), value)),
                    HashKey::Dynamic => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    // === Resolution ===

    /// Resolve the last link to its candidate declarations.
    ///
    /// `block` is the innermost method or namespace enclosing the
    /// expression; `locals` are the local variables visible at it.
    pub fn define<'a, I: SymbolIndex + ?Sized>(
        &self,
        index: &'a I,
        block: &'a Pin,
        locals: &[&'a Pin],
    ) -> Vec<&'a Pin> {
        self.define_at(index, block, locals, 0)
    }

    /// Infer the type of the whole expression.
    pub fn infer<'a, I: SymbolIndex + ?Sized>(
        &self,
        index: &'a I,
        block: &'a Pin,
        locals: &[&'a Pin],
    ) -> ComplexType {
        self.infer_at(index, block, locals, 0)
    }

    pub(crate) fn define_at<'a, I: SymbolIndex + ?Sized>(
        &self,
        index: &'a I,
        block: &'a Pin,
        locals: &[&'a Pin],
        depth: usize,
    ) -> Vec<&'a Pin> {
        if depth > MAX_INFERENCE_DEPTH {
            return Vec::new();
        }
        if self.links.len() == 1 {
            return define_head(self.last(), index, block, locals);
        }
        let Link::Call(call) = self.last() else {
            return Vec::new();
        };
        let receiver = self.base().infer_at(index, block, locals, depth + 1);
        let mut pins: Vec<&'a Pin> = Vec::new();
        for branch in &receiver {
            for pin in define_member(index, branch, &call.word) {
                if !pins.iter().any(|p| std::ptr::eq(*p, pin)) {
                    pins.push(pin);
                }
            }
        }
        pins
    }

    pub(crate) fn infer_at<'a, I: SymbolIndex + ?Sized>(
        &self,
        index: &'a I,
        block: &'a Pin,
        locals: &[&'a Pin],
        depth: usize,
    ) -> ComplexType {
        if depth > MAX_INFERENCE_DEPTH {
            tracing::trace!(depth, "inference depth exceeded");
            return ComplexType::UNDEFINED;
        }
        crate::stack::ensure_sufficient_stack(|| match self.last() {
            Link::Literal(ty) => ty.clone(),
            Link::Hash(_) => ComplexType::named("Hash"),
            Link::Head => self_type(block),
            Link::Undefined => ComplexType::UNDEFINED,
            _ => self.infer_from_pins(index, block, locals, depth),
        })
    }

    fn infer_from_pins<'a, I: SymbolIndex + ?Sized>(
        &self,
        index: &'a I,
        block: &'a Pin,
        locals: &[&'a Pin],
        depth: usize,
    ) -> ComplexType {
        let receiver = if self.links.len() > 1 {
            self.base().infer_at(index, block, locals, depth + 1)
        } else {
            self_type(block)
        };
        if let Link::Call(call) = self.last() {
            if call.word == "new"
                && self.links.len() > 1
                && receiver.is_defined()
                && receiver.iter().all(UniqueType::is_class_reference)
            {
                return ComplexType::new(receiver.iter().map(|t| UniqueType::new(t.namespace())));
            }
        }
        let self_namespace = receiver
            .iter()
            .next()
            .map(|t| t.namespace().to_owned())
            .unwrap_or_default();
        for pin in self.define_at(index, block, locals, depth + 1) {
            let mut ty = pin.typify(index);
            if ty.is_undefined() {
                ty = pin.probe_at(index, depth + 1);
            }
            if ty.is_defined() {
                return ty.self_to(&self_namespace);
            }
        }
        ComplexType::UNDEFINED
    }
}

/// The type of `self` inside `block`.
fn self_type(block: &Pin) -> ComplexType {
    let namespace = block.full_namespace();
    if namespace.is_empty() {
        return ComplexType::named("Object");
    }
    match block.body_scope() {
        Scope::Instance => ComplexType::named(namespace),
        Scope::Class => ComplexType::class_of(&namespace),
    }
}

fn define_head<'a, I: SymbolIndex + ?Sized>(
    link: &Link,
    index: &'a I,
    block: &'a Pin,
    locals: &[&'a Pin],
) -> Vec<&'a Pin> {
    let namespace = block.full_namespace();
    let scope = block.body_scope();
    match link {
        Link::Call(call) => {
            // A bare word may be a local shadowing a method.
            let local: Vec<&'a Pin> = locals
                .iter()
                .rev()
                .filter(|p| p.name == call.word && call.arguments.is_empty())
                .copied()
                .collect();
            if !local.is_empty() {
                return local;
            }
            index.get_method_stack(&namespace, &call.word, scope)
        }
        Link::Variable(name) => locals.iter().rev().filter(|p| &p.name == name).copied().collect(),
        Link::InstanceVariable(name) => index
            .get_instance_variable_pins(&namespace, scope)
            .into_iter()
            .filter(|p| &p.name == name)
            .collect(),
        Link::ClassVariable(name) => index
            .get_class_variable_pins(&namespace)
            .into_iter()
            .filter(|p| &p.name == name)
            .collect(),
        Link::Constant(name) => match index.qualify(name, &namespace) {
            Some(path) => index.get_path_pins(&path),
            None => Vec::new(),
        },
        Link::Literal(_) | Link::Hash(_) | Link::Head | Link::Undefined => Vec::new(),
    }
}

/// Resolve `word` as a member of one receiver branch.
fn define_member<'a, I: SymbolIndex + ?Sized>(
    index: &'a I,
    receiver: &UniqueType,
    word: &str,
) -> Vec<&'a Pin> {
    if receiver.is_class_reference() {
        let namespace = receiver.namespace();
        if word == "new" {
            let init = index.get_method_stack(namespace, "initialize", Scope::Instance);
            if !init.is_empty() {
                return init;
            }
            let explicit = index.get_method_stack(namespace, "new", Scope::Class);
            if !explicit.is_empty() {
                return explicit;
            }
            return index.get_path_pins(namespace);
        }
        return index.get_method_stack(namespace, word, Scope::Class);
    }
    index.get_method_stack(receiver.name(), word, Scope::Instance)
}
