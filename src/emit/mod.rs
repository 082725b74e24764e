//! Single-line g-code emission: tokens, command constructors, and the
//! line-oriented sink the composers write through.

pub mod command;
mod format;
mod token;

pub use format::LineSink;
pub use token::{Field, Flag, Token, Value};
