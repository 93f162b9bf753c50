use crate::Result;

use serde::Deserialize;
use url::Url;

/// Settings for one named connection.
///
/// Deserializable so hosts can read it from their own configuration files:
///
/// ```
/// # use crumb_core::driver::ConnectionConfig;
/// let config: ConnectionConfig =
///     serde_json::from_str(r#"{ "url": "memory://library" }"#).unwrap();
/// assert_eq!(config.name, "primary");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectionConfig {
    /// Registry name, `"primary"` unless set
    #[serde(default = "ConnectionConfig::default_name")]
    pub name: String,

    /// Database location; the scheme selects the adapter
    pub url: Url,
}

impl ConnectionConfig {
    pub const DEFAULT_NAME: &'static str = "primary";

    pub fn new(url: Url) -> ConnectionConfig {
        ConnectionConfig {
            name: Self::default_name(),
            url,
        }
    }

    pub fn from_url(url: &str) -> Result<ConnectionConfig> {
        Ok(ConnectionConfig::new(Url::parse(url)?))
    }

    pub fn name(mut self, name: impl Into<String>) -> ConnectionConfig {
        self.name = name.into();
        self
    }

    fn default_name() -> String {
        Self::DEFAULT_NAME.to_string()
    }
}
