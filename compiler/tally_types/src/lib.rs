//! Type tags for Tally.
//!
//! Documentation tags such as `@return [Array<String>, nil]` are parsed into
//! a `ComplexType`: a union of `UniqueType` branches. Each branch is a named
//! type with optional parameters (`Array<String>`, `Hash{Symbol => Integer}`),
//! a duck type naming a required method (`#to_s`), or one of the special tags:
//!
//! - `undefined`: the analysis could not determine a type
//! - `void`: the method's return value is meaningless
//! - `self`: the receiver's own type, substituted with [`ComplexType::self_to`]
//!
//! The algebra is purely syntactic. Name resolution against a symbol index
//! goes through [`ComplexType::qualify`] with a caller-supplied resolver.

mod complex_type;
mod parse;

pub use complex_type::{ComplexType, Parameters, UniqueType};
pub use parse::TypeParseError;
