//! Trait definitions shared by the ecseal scheme crates

pub mod pke;

pub use pke::Pke;
