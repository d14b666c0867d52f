//! Tally IR - source coordinates shared by every checker crate.
//!
//! - `Position`: zero-based line/column pair
//! - `Range`: half-open pair of positions
//! - `Location`: a range inside a named file
//!
//! All types are `Clone + Eq + Hash + Debug` so they can key maps and be
//! compared in tests without ceremony.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod location;
mod position;

pub use location::Location;
pub use position::{Position, Range};
