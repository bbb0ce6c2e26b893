//! AI Content Service
//!
//! This crate provides the AI content generation API used by the digital
//! signage CMS. It exposes a single generation endpoint backed by a
//! pretrained DistilGPT-2 model loaded from the HuggingFace Hub.
//!
//! # Modules
//! - `controller`: Handles HTTP requests
//! - `entities`: Defines shared data structures
//! - `error`: Provides error handling and custom error types
//! - `routes`: Defines API endpoints and routing
//! - `service`: Implements generation and model management
//! - `utils`: Contains configuration, download and init helpers

rust_i18n::i18n!("locales", fallback = "en");

pub mod controller;
pub mod entities;
pub mod error;
pub mod locales;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod utils;

pub use error::{AppError, Result};
pub use locales::Locales;
pub use utils::AppConfig;
