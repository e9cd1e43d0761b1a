//! Provider services built on the shared request layer.

pub mod openai;
