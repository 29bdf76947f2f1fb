//! Generative fallback adapters.

pub mod openai;

pub use openai::OpenAiGenerator;
