pub mod content;

pub use content::generate_content;
