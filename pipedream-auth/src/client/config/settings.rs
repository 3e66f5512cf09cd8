use config::{Config, ConfigError, File};
use secrecy::SecretString;
use serde::Deserialize;
use std::fmt::Display;
use url::Url;

use crate::error::AuthError;

/// Value of the `X-PD-Environment` header sent with every request
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default = "default_connect_url")]
    pub connect_url: String,

    #[serde(default = "default_rest_url")]
    pub rest_url: String,

    #[serde(default)]
    pub project_id: String,

    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub client_id: String,

    #[serde(default = "empty_secret")]
    pub client_secret: SecretString,

    #[serde(default = "empty_secret")]
    pub api_key: SecretString,

    #[serde(default)]
    pub allowed_origins: Vec<String>,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_connect_url() -> String {
    "https://api.pipedream.com/v1/connect".to_string()
}

fn default_rest_url() -> String {
    "https://api.pipedream.com/v1".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

impl Settings {
    /// Load settings from an optional TOML file and `PIPEDREAM__*` environment variables.
    ///
    /// The file defaults to `pipedream.toml` and can be moved with `PIPEDREAM_CONFIG`.
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("PIPEDREAM_CONFIG").unwrap_or_else(|_| "pipedream.toml".to_string());

        let settings = Config::builder()
            .add_source(File::with_name(&config_path).required(false))
            .add_source(
                config::Environment::with_prefix("PIPEDREAM")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Settings for `project_id` with every other field at its default.
    pub fn for_project(project_id: impl Into<String>) -> Self {
        Self {
            connect_url: default_connect_url(),
            rest_url: default_rest_url(),
            project_id: project_id.into(),
            environment: Environment::default(),
            client_id: String::new(),
            client_secret: empty_secret(),
            api_key: empty_secret(),
            allowed_origins: Vec::new(),
            timeout_seconds: default_timeout_seconds(),
        }
    }

    pub fn client_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = client_id.into();
        self.client_secret = SecretString::from(client_secret.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = SecretString::from(api_key.into());
        self
    }

    pub fn connect_url(mut self, url: impl Into<String>) -> Self {
        self.connect_url = url.into();
        self
    }

    pub fn rest_url(mut self, url: impl Into<String>) -> Self {
        self.rest_url = url.into();
        self
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn allowed_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_origins = origins.into_iter().map(Into::into).collect();
        self
    }

    pub fn timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.project_id.trim().is_empty() {
            return Err("project_id is required".to_string());
        }
        for (name, url) in [("connect_url", &self.connect_url), ("rest_url", &self.rest_url)] {
            if !url.starts_with("http") {
                return Err(format!("{} must be a valid HTTP(S) URL", name));
            }
            Url::parse(url).map_err(|e| format!("{} is not a valid URL: {}", name, e))?;
        }
        if self.timeout_seconds == 0 {
            return Err("timeout_seconds must be greater than zero".to_string());
        }
        Ok(())
    }

    pub fn connect_base(&self) -> Result<Url, AuthError> {
        Ok(Url::parse(&self.connect_url)?)
    }

    pub fn rest_base(&self) -> Result<Url, AuthError> {
        Ok(Url::parse(&self.rest_url)?)
    }
}
