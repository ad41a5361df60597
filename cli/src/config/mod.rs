pub mod settings;

pub use settings::{Config, ConfigManager, API_URL_ENV, DEFAULT_API_URL};
