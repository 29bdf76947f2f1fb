//! Embedding provider adapters.

pub mod hugging_face;
pub mod offline;

pub use hugging_face::HuggingFaceEmbedder;
pub use offline::OfflineEmbedder;
