mod documents;

pub use super::*;
pub use xmlgraft::Document;
