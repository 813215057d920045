//! Foundation types for Tiller.
//!
//! This crate contains the types shared by every Tiller crate: the error
//! taxonomy and the `Identifier` pair used to name commands, directories,
//! and parameters.

pub mod error;
pub mod ident;

pub use error::{Result, ShellError};
pub use ident::Identifier;
