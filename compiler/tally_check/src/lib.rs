//! Tag/inference consistency checking.
//!
//! Given a [`SymbolIndex`](tally_index::SymbolIndex) and a file name, a
//! [`TypeChecker`] compares what the documentation says about each
//! declaration (`@return`, `@param`, `@type`) with what the code does, and
//! reports every disagreement as a [`Problem`].
//!
//! How much is checked depends on the strictness [`Level`], which expands
//! into a [`Rules`] record:
//!
//! | Level    | Checks added                                               |
//! |----------|------------------------------------------------------------|
//! | `normal` | unresolved tag types                                       |
//! | `typed`  | declared vs inferred types, exact return coverage          |
//! | `strict` | undefined inference results, call arguments, constants,    |
//! |          | untagged methods must infer                                |
//! | `strong` | missing `@return` and `@param` tags                        |
//!
//! # Example
//!
//! ```ignore
//! let checker = TypeChecker::new("app/shop.rb", &api_map, Level::Strict);
//! for problem in checker.problems() {
//!     println!("{problem}");
//! }
//! ```

mod checker;
mod compat;
mod params;
mod problem;
mod rules;

use std::sync::Once;

pub use checker::TypeChecker;
pub use compat::{any_types_match, duck_types_match, types_match};
pub use params::{ParamModel, ParamType};
pub use problem::{is_internal, Problem, ProblemKind};
pub use rules::{Level, LevelError, Rules};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=tally_check=debug`
/// or `RUST_LOG=tally_check=trace` for per-call matching.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
