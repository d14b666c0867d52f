//! Declared and inferred types of pins.
//!
//! `typify` reads what the documentation says; `probe` works out what the
//! code does, from method return expressions and variable assignments.

use tally_types::ComplexType;

use crate::chain::MAX_INFERENCE_DEPTH;
use crate::{Access, Chain, Pin, PinKind, Scope, SymbolIndex};

impl Pin {
    /// The documented type, qualified against the enclosing namespace.
    ///
    /// `undefined` when there is no tag or the tag names something the
    /// index cannot resolve.
    pub fn typify<I: SymbolIndex + ?Sized>(&self, index: &I) -> ComplexType {
        match &self.kind {
            PinKind::Namespace { .. } => ComplexType::class_of(&self.path()),
            _ => self
                .return_type()
                .qualify(|name, context| index.qualify(name, context), &self.context.namespace),
        }
    }

    /// The statically inferred type, ignoring documentation.
    pub fn probe<'a, I: SymbolIndex + ?Sized>(&'a self, index: &'a I) -> ComplexType {
        self.probe_at(index, 0)
    }

    pub(crate) fn probe_at<'a, I: SymbolIndex + ?Sized>(
        &'a self,
        index: &'a I,
        depth: usize,
    ) -> ComplexType {
        if depth > MAX_INFERENCE_DEPTH {
            return ComplexType::UNDEFINED;
        }
        match &self.kind {
            PinKind::Namespace { .. } => ComplexType::class_of(&self.path()),
            PinKind::Method(data) => {
                let locals = self
                    .location
                    .as_ref()
                    .and_then(|l| index.source_map(&l.filename).map(|m| m.locals_in(l.range)))
                    .unwrap_or_default();
                data.returns
                    .iter()
                    .map(|chain| chain.infer_at(index, self, &locals, depth + 1))
                    .fold(ComplexType::UNDEFINED, |acc, ty| acc | ty)
            }
            PinKind::Attribute {
                access: Access::Reader,
            } => {
                let ivar = format!("@{}", self.name);
                index
                    .get_instance_variable_pins(&self.context.namespace, Scope::Instance)
                    .into_iter()
                    .filter(|p| p.name == ivar)
                    .map(|p| {
                        let declared = p.typify(index);
                        if declared.is_defined() {
                            declared
                        } else {
                            p.probe_at(index, depth + 1)
                        }
                    })
                    .fold(ComplexType::UNDEFINED, |acc, ty| acc | ty)
            }
            PinKind::Attribute {
                access: Access::Writer,
            }
            | PinKind::Parameter { .. } => ComplexType::UNDEFINED,
            PinKind::LocalVariable { assignment, .. }
            | PinKind::InstanceVariable { assignment }
            | PinKind::ClassVariable { assignment }
            | PinKind::Constant { assignment } => match assignment {
                Some(chain) => self.infer_in_place(chain, index, depth),
                None => ComplexType::UNDEFINED,
            },
        }
    }

    /// Infer `chain` as if it appeared where this pin is declared.
    fn infer_in_place<'a, I: SymbolIndex + ?Sized>(
        &'a self,
        chain: &Chain,
        index: &'a I,
        depth: usize,
    ) -> ComplexType {
        let Some(location) = &self.location else {
            return ComplexType::UNDEFINED;
        };
        let Some(map) = index.source_map(&location.filename) else {
            return ComplexType::UNDEFINED;
        };
        let block = map.locate_block_pin(location.range.start.line, location.range.start.column);
        let locals: Vec<&'a Pin> = map
            .locals_at(location)
            .into_iter()
            .filter(|p| !std::ptr::eq(*p, self))
            .collect();
        chain.infer_at(index, block, &locals, depth + 1)
    }
}
