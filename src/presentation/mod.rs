pub mod config;

pub use config::{
    BoilerplateSettings, ChunkingSettings, Environment, IngestionSettings, LoggingSettings,
    Settings, SettingsError,
};
