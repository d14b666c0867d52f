//! Per-file view over declarations, locals and expression nodes.
//!
//! A `SourceMap` is what a parser hands the index for one file: the
//! declarations it found, local variables with their visibility ranges,
//! comment ranges, and every call and constant reference already reduced
//! to a [`Chain`]. A node whose chain could not be built carries `None`.

use std::sync::Arc;

use tally_ir::{Location, Position, Range};

use crate::{Chain, Pin, PinKind};

/// A call expression in the file.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CallNode {
    pub range: Range,
    pub chain: Option<Chain>,
}

/// A constant reference in the file.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ConstantNode {
    pub range: Range,
    /// The constant as written, e.g. `Foo::Bar`.
    pub name: String,
    pub chain: Option<Chain>,
}

/// Declarations and nodes of one file.
#[derive(Clone, Debug)]
pub struct SourceMap {
    filename: Arc<str>,
    /// Declarations; the root namespace is always first.
    pins: Vec<Pin>,
    locals: Vec<Pin>,
    comments: Vec<Range>,
    calls: Vec<CallNode>,
    constants: Vec<ConstantNode>,
}

impl SourceMap {
    pub fn new(filename: impl Into<Arc<str>>) -> Self {
        let filename = filename.into();
        let root = Pin::root();
        SourceMap {
            filename,
            pins: vec![root],
            locals: Vec::new(),
            comments: Vec::new(),
            calls: Vec::new(),
            constants: Vec::new(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// A location in this file.
    pub fn location(&self, range: Range) -> Location {
        Location::new(Arc::clone(&self.filename), range)
    }

    // === Building ===

    /// Add a declaration. Locals and parameters go to [`Self::locals`].
    pub fn add_pin(&mut self, pin: Pin) {
        if pin.presence().is_some() {
            self.locals.push(pin);
        } else {
            self.pins.push(pin);
        }
    }

    #[must_use]
    pub fn with_pin(mut self, pin: Pin) -> Self {
        self.add_pin(pin);
        self
    }

    pub fn add_comment(&mut self, range: Range) {
        self.comments.push(range);
    }

    pub fn add_call(&mut self, range: Range, chain: Option<Chain>) {
        self.calls.push(CallNode { range, chain });
    }

    pub fn add_constant(&mut self, range: Range, name: &str, chain: Option<Chain>) {
        self.constants.push(ConstantNode {
            range,
            name: name.to_owned(),
            chain,
        });
    }

    // === Queries ===

    /// All non-local declarations in the file.
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Local variables and parameters.
    pub fn locals(&self) -> &[Pin] {
        &self.locals
    }

    pub fn calls(&self) -> &[CallNode] {
        &self.calls
    }

    pub fn constants(&self) -> &[ConstantNode] {
        &self.constants
    }

    /// Locals visible at the start of `location`.
    pub fn locals_at(&self, location: &Location) -> Vec<&Pin> {
        if *location.filename != *self.filename {
            return Vec::new();
        }
        self.locals
            .iter()
            .filter(|p| p.presence().is_some_and(|r| r.contains(location.range.start)))
            .collect()
    }

    /// Locals whose visibility lies inside `range`.
    pub fn locals_in(&self, range: Range) -> Vec<&Pin> {
        self.locals
            .iter()
            .filter(|p| p.presence().is_some_and(|r| range.contains_range(r)))
            .collect()
    }

    /// The innermost method or namespace enclosing a position.
    ///
    /// Falls back to the root namespace.
    pub fn locate_block_pin(&self, line: u32, column: u32) -> &Pin {
        let position = Position::new(line, column);
        let mut best: &Pin = &self.pins[0];
        let mut best_range: Option<Range> = None;
        for pin in &self.pins {
            if !matches!(pin.kind, PinKind::Method(_) | PinKind::Namespace { .. }) {
                continue;
            }
            let Some(location) = &pin.location else {
                continue;
            };
            if !location.range.contains(position) {
                continue;
            }
            if best_range.map_or(true, |r| r.contains_range(location.range)) {
                best = pin;
                best_range = Some(location.range);
            }
        }
        best
    }

    /// Check if a comment covers `position`.
    pub fn comment_at(&self, position: Position) -> bool {
        self.comments.iter().any(|c| c.contains(position))
    }
}
