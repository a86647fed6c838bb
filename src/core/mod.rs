// src/core/mod.rs
pub mod engine;
pub mod patterns;
pub mod resolver;
pub mod stats;
pub mod tokenizer;
pub mod types;
