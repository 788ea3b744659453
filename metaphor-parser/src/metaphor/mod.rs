//! Main module for Metaphor library functionality

pub mod assembling;
pub mod ast;
pub mod formats;
pub mod lexing;
pub mod loader;
pub mod parsing;
pub mod testing;
pub mod token;
