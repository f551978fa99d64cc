use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::validation::DEFAULT_ISBN_PATTERN;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub use_in_memory_db: bool,
    pub hostname: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    pub service_name: String,
    pub jaeger_enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidationSettings {
    pub isbn_pattern: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub telemetry: TelemetrySettings,
    pub validation: ValidationSettings,
}

impl Settings {
    /// Loads defaults, then optional `library.toml` from the working directory,
    /// then `LIBRARY_` prefixed environment variables, e.g. `LIBRARY_DATABASE__HOSTNAME`
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name("library").required(false))
            .add_source(
                Environment::with_prefix("LIBRARY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("database.use_in_memory_db", false)?
            .set_default("database.hostname", "127.0.0.1")?
            .set_default("database.username", "postgres")?
            .set_default("database.password", "postgres")?
            .set_default("telemetry.service_name", "library_books")?
            .set_default("telemetry.jaeger_enabled", true)?
            .set_default("validation.isbn_pattern", DEFAULT_ISBN_PATTERN)
    }
}

#[cfg(test)]
mod settings_tests {
    use config::{File, FileFormat};

    use crate::settings::Settings;
    use crate::validation::DEFAULT_ISBN_PATTERN;

    #[test]
    fn test_defaults() {
        let settings: Settings = Settings::builder()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .expect("Failed to deserialize defaults");
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8080);
        assert!(!settings.database.use_in_memory_db);
        assert_eq!(settings.database.hostname, "127.0.0.1");
        assert_eq!(settings.telemetry.service_name, "library_books");
        assert_eq!(settings.validation.isbn_pattern, DEFAULT_ISBN_PATTERN);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let settings: Settings = Settings::builder()
            .unwrap()
            .add_source(File::from_str(
                "
                [server]
                port = 9000
                [database]
                use_in_memory_db = true
                [validation]
                isbn_pattern = '\\d{10}'
                ",
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .expect("Failed to deserialize settings");
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert!(settings.database.use_in_memory_db);
        assert_eq!(settings.validation.isbn_pattern, r"\d{10}");
    }
}
