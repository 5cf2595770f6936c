use thiserror::Error;

const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for environment variable {0}")]
    Invalid(&'static str),
}

/// Process configuration, read once at startup from the environment
/// (after dotenvy has loaded any `.env` file).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub access_token_secret: String,
    pub stripe_secret_key: String,
    pub contact_webhook_url: String,
    pub decrement_on_cancel: bool,
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    dotenvy::var(name).map_err(|_| ConfigError::Missing(name))
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match dotenvy::var("PORT") {
            Ok(value) => value.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            Err(_) => DEFAULT_PORT,
        };
        // absent or anything but "true" keeps the counter untouched on cancel
        let decrement_on_cancel = dotenvy::var("DECREMENT_ON_CANCEL")
            .map(|value| value == "true")
            .unwrap_or(false);
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            port,
            access_token_secret: required("ACCESS_TOKEN_SECRET")?,
            stripe_secret_key: required("STRIPE_SECRET_KEY")?,
            contact_webhook_url: required("CONTACT_WEBHOOK_URL")?,
            decrement_on_cancel,
        })
    }
}
