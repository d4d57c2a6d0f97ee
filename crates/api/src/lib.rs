//! Public API traits and types for the ecseal crates
//!
//! Every component crate converts its own failures into [`Error`], so callers
//! of the engine deal with one taxonomy and one exit-code mapping.

pub mod error;
pub mod traits;

pub use error::{Error, Result, ResultExt};
pub use traits::Pke;

pub use traits::pke;
