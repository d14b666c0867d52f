//! Unresolved constant references.

use tally_index::{ConstantNode, SourceMap, SymbolIndex};
use tally_ir::Range;

use super::TypeChecker;
use crate::{Problem, ProblemKind};

impl<'a, I: SymbolIndex + ?Sized> TypeChecker<'a, I> {
    pub(super) fn const_problems(&self, map: &'a SourceMap) -> Vec<Problem<'a>> {
        if !self.rules.validate_consts {
            return Vec::new();
        }
        self.unresolved_constants(map)
            .into_iter()
            .map(|node| {
                Problem::new(
                    ProblemKind::UnresolvedConstant,
                    map.location(node.range),
                    format!("Unresolved constant {}", node.name),
                )
            })
            .collect()
    }

    /// Ranges of unresolved constant references. Calls inside them are not
    /// reported again as unresolved calls.
    pub(super) fn unresolved_constant_ranges(&self, map: &'a SourceMap) -> Vec<Range> {
        if !self.rules.validate_consts {
            return Vec::new();
        }
        self.unresolved_constants(map)
            .into_iter()
            .map(|node| node.range)
            .collect()
    }

    fn unresolved_constants(&self, map: &'a SourceMap) -> Vec<&'a ConstantNode> {
        map.constants()
            .iter()
            .filter(|node| {
                let Some(chain) = &node.chain else {
                    return false;
                };
                let location = map.location(node.range);
                let block = map.locate_block_pin(node.range.start.line, node.range.start.column);
                let locals = map.locals_at(&location);
                chain.define(self.index, block, &locals).is_empty()
            })
            .collect()
    }
}
