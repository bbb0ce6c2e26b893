pub mod models;

pub use models::list_models;
