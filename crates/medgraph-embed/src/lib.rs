//! Question embedding via the Hugging Face Inference API.

pub mod config;
pub mod error;
pub mod hugging_face;

pub use config::HuggingFaceConfig;
pub use error::EmbedError;
pub use hugging_face::HuggingFaceBackend;
