mod mutations;
mod parsing;

pub use super::*;
