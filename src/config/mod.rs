mod settings;

use config::{Config, ConfigError, Environment, File};

use crate::utils::error::Result;
use settings::PartialSettings;

pub use settings::{LogSettings, PublisherSettings, ServerSettings, Settings};

/// Environment variable prefix, e.g. `POPSTREAM_SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "POPSTREAM";

/// Loads the configuration from `config/default.*` and `POPSTREAM_*`
/// environment variables, merged over the built-in defaults.
pub fn load_config() -> Result<Settings> {
    let config = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let partial: PartialSettings = config.try_deserialize()?;
    let settings = partial.merge_over(Settings::default());
    validate(&settings)?;
    Ok(settings)
}

/// Rejects values that deserialize fine but cannot run.
pub fn validate(settings: &Settings) -> Result<()> {
    if settings.publisher.interval_ms == 0 {
        return Err(ConfigError::Message(
            "publisher.interval_ms must be greater than zero".to_string(),
        )
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests;
