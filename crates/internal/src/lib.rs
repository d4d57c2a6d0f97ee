//! Internal utilities for the ecseal crates. Not a stable API.

pub mod constant_time;

pub use constant_time::{ct_eq, ct_eq_choice, secure_zero};
