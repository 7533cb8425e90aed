pub mod inventory;
pub mod normalizer;
pub mod tokenizer;

pub use normalizer::{canonical_reference, normalize};
pub use tokenizer::tokenize;
