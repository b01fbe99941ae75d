//! Type definitions for pokedex

mod error;
mod pokemon;

pub use error::*;
pub use pokemon::*;
