mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    BoilerplateSettings, ChunkingSettings, IngestionSettings, LoggingSettings, Settings,
    SettingsError,
};
