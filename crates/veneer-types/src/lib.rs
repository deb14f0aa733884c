//! Veneer value model and argument container
//!
//! This crate provides the type-erased plumbing shared by Veneer proxies
//! and their consumers:
//! - [`Value`] — tagged-union value with explicit, fallible coercion
//! - [`TypeTag`] — the representable value kinds (used in signatures)
//! - [`FromValue`] / [`IntoValue`] — conversion seams for Rust types
//! - [`Args`] — immutable positional argument container

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod args;
pub mod convert;
pub mod value;

pub use args::Args;
pub use convert::{FromValue, IntoValue};
pub use value::{TypeTag, Value, ValueError};
