pub mod settings;

pub use settings::{LoggingConfig, MenuConfig, Settings};
