pub mod gemini;

pub use gemini::{GeminiReconciler, LlmConfig};
