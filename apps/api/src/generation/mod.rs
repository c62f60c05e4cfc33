// Resume text generation.
// Model calls go through llm_client::TextGenerator; nothing here talks HTTP.

pub mod fallback;
pub mod generator;
pub mod prompt_builder;
pub mod prompts;
pub mod segmenter;

pub use generator::{generate_resume, GeneratedResume, ResumeOrigin};
