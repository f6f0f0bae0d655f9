use std::time::Duration;

use serde::{Deserialize, Deserializer};

pub const GAME_PATH: &str = "/ws/spicy-dice";
pub const SPIN_DURATION: Duration = Duration::from_millis(3000);
pub const RECONNECT_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub game_path: String,
    #[serde(rename = "reveal_delay_ms", deserialize_with = "millis")]
    pub reveal_delay: Duration,
    #[serde(rename = "reconnect_delay_ms", deserialize_with = "millis")]
    pub reconnect_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            game_path: GAME_PATH.to_string(),
            reveal_delay: SPIN_DURATION,
            reconnect_delay: RECONNECT_DELAY,
        }
    }
}

impl ClientConfig {
    /// Reads overrides from a JSON object, falling back to defaults for
    /// anything left out.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn endpoint(&self, protocol: &str, host: &str) -> String {
        endpoint_url(protocol, host, &self.game_path)
    }
}

fn millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_millis)
}

/// Builds the socket URL on the page's own host. `protocol` is the page's
/// `location.protocol` (with or without the trailing colon).
pub fn endpoint_url(protocol: &str, host: &str, path: &str) -> String {
    let scheme = match protocol.trim_end_matches(':') {
        "https" => "wss",
        _ => "ws",
    };
    let path = path.trim_start_matches('/');
    format!("{scheme}://{host}/{path}")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn endpoint_follows_page_scheme() {
        assert_eq!(
            endpoint_url("http:", "localhost:8080", GAME_PATH),
            "ws://localhost:8080/ws/spicy-dice"
        );
        assert_eq!(
            endpoint_url("https:", "dice.example.com", GAME_PATH),
            "wss://dice.example.com/ws/spicy-dice"
        );
        assert_eq!(
            endpoint_url("file:", "", "ws/spicy-dice"),
            "ws:///ws/spicy-dice"
        );
    }

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.game_path, "/ws/spicy-dice");
        assert_eq!(config.reveal_delay, Duration::from_millis(3000));
        assert_eq!(config.reconnect_delay, Duration::from_millis(3000));
        assert_eq!(
            config.endpoint("http:", "127.0.0.1"),
            "ws://127.0.0.1/ws/spicy-dice"
        );
    }

    #[test]
    fn partial_overrides() {
        let config = ClientConfig::from_json(r#"{"reconnect_delay_ms": 500}"#).unwrap();
        assert_eq!(config.reconnect_delay, Duration::from_millis(500));
        assert_eq!(config.reveal_delay, SPIN_DURATION);
        assert_eq!(config.game_path, GAME_PATH);

        let config = ClientConfig::from_json("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn bad_overrides_error() {
        assert!(ClientConfig::from_json(r#"{"reveal_delay_ms": "soon"}"#).is_err());
    }
}
