//! Matcher builder API
//!
//! Fluent construction of matchers with a pattern, a modifier and engine
//! budgets.

pub mod core;

pub use self::core::*;
