pub mod action;
pub mod coherence;
pub mod config;
pub mod error;
pub mod grouper;
pub mod intensity;
pub mod io;
pub mod merger;
pub mod parser;
pub mod pipeline;
pub mod record;
pub mod select;
pub mod sequence;
pub mod table;

pub use error::{ProfileError, Result};
