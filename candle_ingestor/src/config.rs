use secrecy::SecretString;
use serde::Deserialize;
use shared_utils::{config::load_toml, env::get_env_var};

use shared_utils::config::ConfigError;

/// Fully assembled connection settings for one run.
///
/// Constructed explicitly and passed to the provider; nothing here lives in
/// process-wide state.
#[derive(Debug, Clone)]
pub struct OandaConfig {
    /// Base REST endpoint, e.g. `https://api-fxpractice.oanda.com/v3`.
    pub api_url: String,
    /// Account whose instrument listing is used, e.g. `101-004-1234567-001`.
    pub account_id: String,
    /// Bearer credential, attached once at session creation.
    pub api_key: SecretString,
}

#[derive(Deserialize)]
struct FileSettings {
    api_url: String,
    account_id: String,
}

impl OandaConfig {
    /// Environment variable holding the bearer credential.
    pub const API_KEY_ENV: &'static str = "OANDA_API_KEY";

    /// Loads endpoint and account from a TOML file and the credential from
    /// [`Self::API_KEY_ENV`].
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let settings: FileSettings = load_toml(path)?;
        let api_key = SecretString::from(get_env_var(Self::API_KEY_ENV)?);
        Ok(Self {
            api_url: settings.api_url,
            account_id: settings.account_id,
            api_key,
        })
    }
}
