use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub db_path: String,
    pub bind_address: String,
    pub max_connections: u32,
}

impl Settings {
    /// Reads `.env`, an optional `trivia.{toml,yaml,json}` file and `TRIVIA_*` variables, in
    /// increasing order of precedence.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        defaults()?
            .add_source(File::with_name("trivia").required(false))
            .add_source(Environment::with_prefix("TRIVIA").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("db_path", "trivia.db")?
        .set_default("bind_address", "0.0.0.0:8080")?
        .set_default("max_connections", 5)
}
