pub mod env;
mod loader;

pub use env::{AppConfig, DirectoryConfig, InferenceConfig};
pub use loader::load_config;
