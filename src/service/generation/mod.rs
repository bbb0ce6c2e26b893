pub mod content_generation;

pub use content_generation::{ContentGenerationService, GenerationParams};
