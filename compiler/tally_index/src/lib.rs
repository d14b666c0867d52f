//! Declarations and the symbol index for the Tally checker.
//!
//! This crate holds everything the checker reads but does not own:
//!
//! - [`Pin`]: a declaration (namespace, method, attribute, variable, ...)
//! - [`Docstring`]: the `@param`/`@return`/`@type` tags attached to a pin
//! - [`Chain`]: an expression flattened into links, with resolution and
//!   inference against an index
//! - [`SourceMap`]: the pins, locals and call/constant nodes of one file
//! - [`SymbolIndex`]: the whole-program query interface, and [`ApiMap`],
//!   its in-memory implementation
//!
//! Source parsing is out of scope; callers build source maps directly.

mod api_map;
mod chain;
mod docstring;
mod index;
mod infer;
mod pin;
mod source_map;
mod stack;

pub use api_map::ApiMap;
pub use chain::{Call, Chain, HashKey, Link, MAX_INFERENCE_DEPTH};
pub use docstring::{Docstring, Tag, TagKind};
pub use index::SymbolIndex;
pub use pin::{
    Access, Context, MethodData, NamespaceKind, ParamDecl, Parameter, Pin, PinKind, Scope,
};
pub use source_map::{CallNode, ConstantNode, SourceMap};
