//! Inline motion markup: tokenizing, range resolution, validation and the parse cache.

pub(crate) mod filter;
pub(crate) mod preprocess;
pub(crate) mod resolver;
pub(crate) mod token;
pub(crate) mod tokenizer;
