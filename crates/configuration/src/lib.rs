use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{DatabaseSettings, ServerSettings, Settings};
#[cfg(feature = "clap")]
pub use settings::ServerOverrides;

/// Name of the optional settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Prefix of the environment variables that override settings,
/// e.g. `JOKES__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "JOKES";

/// Loads the application settings from `config.toml` and the environment.
///
/// Sources are layered, later ones winning: built-in defaults, the optional
/// `config.toml`, then `JOKES__*` environment variables. `DATABASE_URL` fills
/// in the database URL when nothing else set it. Any `.env` file must already
/// have been loaded by the caller.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(Path::new(CONFIG_FILE), std::env::var("DATABASE_URL").ok())
}

/// Same as [`load_settings`] with an explicit file path and fallback database URL.
pub fn load_settings_from(
    path: &Path,
    database_url: Option<String>,
) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .set_default("server.host", settings::DEFAULT_HOST)?
        .set_default("server.port", i64::from(settings::DEFAULT_PORT))?
        .set_default("database.url", "")?
        .set_default(
            "database.max_connections",
            i64::from(settings::DEFAULT_MAX_CONNECTIONS),
        )?
        .set_default(
            "database.acquire_timeout_secs",
            settings::DEFAULT_ACQUIRE_TIMEOUT_SECS as i64,
        )?
        // The settings file is optional; the service runs on defaults and env alone.
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut settings = builder.try_deserialize::<Settings>()?;

    if settings.database.url.is_empty() {
        if let Some(url) = database_url {
            settings.database.url = url;
        }
    }

    settings.validate()?;
    tracing::debug!(
        host = %settings.server.host,
        port = settings.server.port,
        max_connections = settings.database.max_connections,
        "Settings loaded."
    );

    Ok(settings)
}
