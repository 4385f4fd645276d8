//! Rendering of package ratings
//!
//! # Implementation Model
//!
//! Two report generators are provided, each accessed through a `generate` function:
//! - **Console**: Terminal summary with ANSI colors, one block per package
//! - **JSON**: One registry rating object per line, keyed by package `URL`
//!
//! Both operate on the same input: a slice of [`RatedPackage`] holding the
//! identifier the user asked for and either the rating or the reason there is
//! none. Generators write to any `core::fmt::Write`.

mod console;
mod json;
mod rated_package;

pub use console::generate as generate_console;
pub use json::generate as generate_json;
pub use rated_package::RatedPackage;
