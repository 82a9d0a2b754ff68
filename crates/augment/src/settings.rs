use crate::error::{ErrorKind, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// AniDB asks HTTP API clients to wait at least this long between requests.
pub const MIN_COOLDOWN: Duration = Duration::from_secs(2);

/// Connection details for the AniDB HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Base URL of the HTTP API
    pub endpoint: String,
    /// Registered client name
    pub client: String,
    /// Registered client version
    pub client_version: u32,
    /// API protocol version
    pub protocol_version: u32,
    /// Minimum time between the starts of two consecutive requests
    pub cooldown_secs: u64,
    /// Overall timeout for one request
    pub timeout_secs: u64,
}
impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://api.anidb.net:9001/httpapi".to_string(),
            client: "script".to_string(),
            client_version: 1,
            protocol_version: 1,
            cooldown_secs: MIN_COOLDOWN.as_secs(),
            timeout_secs: 30,
        }
    }
}
impl HttpSettings {
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cooldown() < MIN_COOLDOWN {
            exn::bail!(ErrorKind::Settings(format!(
                "cooldown of {}s is below the AniDB minimum of {}s",
                self.cooldown_secs,
                MIN_COOLDOWN.as_secs()
            )));
        }
        if self.timeout_secs == 0 {
            exn::bail!(ErrorKind::Settings("timeout must be at least 1s".to_string()));
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            exn::bail!(ErrorKind::Settings(format!("endpoint `{}` is not an HTTP URL", self.endpoint)));
        }
        if self.client.is_empty() {
            exn::bail!(ErrorKind::Settings("client name must not be empty".to_string()));
        }
        Ok(())
    }
}
