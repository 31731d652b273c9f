//! Core translation pipeline module

pub mod client;
pub mod config;
pub mod dispatcher;
pub mod errors;
pub mod instructions;
pub mod language;
pub mod models;
pub mod pipeline;
pub mod segmenter;
pub mod tokenizer;
