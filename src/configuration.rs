use anyhow::Context;
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;

/// Environment variable holding the document store credential blob.
pub const SERVICE_ACCOUNT_ENV: &str = "FIRESTORE_SERVICE_ACCOUNT";

pub enum Environment {
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

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. `development` and `production` are acceptable.",
                other
            )),
        }
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub store: StoreSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct StoreSettings {
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl StoreSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }
}

/// Service-account credentials for the document store, provided as a JSON
/// blob in `FIRESTORE_SERVICE_ACCOUNT`. Parsed once at startup; a missing or
/// malformed blob fails `Application::build` before any request is served.
#[derive(serde::Deserialize, Clone)]
pub struct ServiceAccount {
    pub project_id: String,
    pub access_token: Secret<String>,
}

impl ServiceAccount {
    pub fn from_env() -> anyhow::Result<ServiceAccount> {
        let blob = std::env::var(SERVICE_ACCOUNT_ENV)
            .with_context(|| format!("{} is not set", SERVICE_ACCOUNT_ENV))?;
        serde_json::from_str(&blob)
            .with_context(|| format!("Failed to parse {} as a service account", SERVICE_ACCOUNT_ENV))
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine current directory");
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("RUST_ENV")
        .unwrap_or_else(|_| "development".into())
        .try_into()
        .expect("Failed to parse RUST_ENV");

    let environment_filename = format!("{}.yaml", environment.as_str());
    // Init our config reader
    let settings = config::Config::builder()
        // Add configuration values from a file named `configuration.yaml`
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(&environment_filename),
        ))
        .build()?;
    // Try to convert the configuation values it read into our settings type
    settings.try_deserialize::<Settings>()
}
