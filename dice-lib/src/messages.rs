use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::bet::BetType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ClientId(u32);

impl ClientId {
    pub const MAX: u32 = 1000;

    pub fn new(id: u32) -> Self {
        ClientId(id)
    }

    /// Draws a fresh per-load identity in `[0, 1000)`.
    pub fn random<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        ClientId(rng.random_range(0..Self::MAX))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClientRef {
    pub client_id: ClientId,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayRequest {
    pub client_id: ClientId,
    pub bet_amount: f64,
    pub bet_type: BetType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum ClientMessage {
    Wallet(ClientRef),
    Play(PlayRequest),
    EndPlay(ClientRef),
}

impl ClientMessage {
    pub fn into_json(self) -> Result<String, ProtocolError> {
        serde_json::to_string(&self).map_err(ProtocolError::Encode)
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            ClientMessage::Wallet(_) => MessageKind::Wallet,
            ClientMessage::Play(_) => MessageKind::Play,
            ClientMessage::EndPlay(_) => MessageKind::EndPlay,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Wallet,
    Play,
    EndPlay,
    Error,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Wallet => "wallet",
            MessageKind::Play => "play",
            MessageKind::EndPlay => "endplay",
            MessageKind::Error => "error",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "wallet" => Some(MessageKind::Wallet),
            "play" => Some(MessageKind::Play),
            "endplay" => Some(MessageKind::EndPlay),
            "error" => Some(MessageKind::Error),
            _ => None,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BalanceUpdate {
    pub balance: f64,
}

/// Outcome of one round as asserted by the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoundResult {
    pub balance: f64,
    pub dice_result: Value,
    pub won: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Internal,
    InvalidInput,
    InsufficientFunds,
    InvalidBetAmount,
    UserNotFound,
    ActiveSession,
    DiceRoll,
    Unknown(i64),
}

impl From<i64> for ErrorCode {
    fn from(code: i64) -> Self {
        match code {
            1000 => ErrorCode::Internal,
            1001 => ErrorCode::InvalidInput,
            1002 => ErrorCode::InsufficientFunds,
            1003 => ErrorCode::InvalidBetAmount,
            1004 => ErrorCode::UserNotFound,
            1005 => ErrorCode::ActiveSession,
            1006 => ErrorCode::DiceRoll,
            other => ErrorCode::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GameError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub details: Option<String>,
}

impl GameError {
    pub fn error_code(&self) -> ErrorCode {
        ErrorCode::from(self.code)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{} ({}): {}", self.message, self.code, details),
            None => write!(f, "{} ({})", self.message, self.code),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    Wallet(BalanceUpdate),
    Play(RoundResult),
    EndPlay(BalanceUpdate),
    Error(GameError),
    Unrecognized(String),
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("inbound frame is not valid JSON: {0}")]
    Envelope(#[source] serde_json::Error),

    #[error("malformed `{kind}` payload: {source}")]
    Payload {
        kind: MessageKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode outbound message: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ServerMessage {
    /// Decodes one inbound frame. Anything whose `type` is not one of the
    /// known string tags (missing, `null`, a number, an unknown name) decodes
    /// to [`ServerMessage::Unrecognized`] regardless of payload. Only invalid
    /// JSON, or a known tag with a payload that doesn't fit, is an error.
    pub fn parse(frame: &str) -> Result<Self, ProtocolError> {
        let mut envelope: Value = serde_json::from_str(frame).map_err(ProtocolError::Envelope)?;
        let known = match envelope.get("type") {
            Some(Value::String(tag)) => match MessageKind::from_tag(tag) {
                Some(known) => known,
                None => return Ok(ServerMessage::Unrecognized(tag.clone())),
            },
            other => {
                let kind = other.map_or_else(|| "null".to_string(), Value::to_string);
                return Ok(ServerMessage::Unrecognized(kind));
            }
        };
        let payload = envelope
            .get_mut("payload")
            .map(Value::take)
            .unwrap_or(Value::Null);
        let payload_err = |source: serde_json::Error| ProtocolError::Payload {
            kind: known,
            source,
        };
        let msg = match known {
            MessageKind::Wallet => {
                ServerMessage::Wallet(serde_json::from_value(payload).map_err(payload_err)?)
            }
            MessageKind::Play => {
                ServerMessage::Play(serde_json::from_value(payload).map_err(payload_err)?)
            }
            MessageKind::EndPlay => {
                ServerMessage::EndPlay(serde_json::from_value(payload).map_err(payload_err)?)
            }
            MessageKind::Error => {
                ServerMessage::Error(serde_json::from_value(payload).map_err(payload_err)?)
            }
        };
        Ok(msg)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use serde_json::json;

    const CLIENT: ClientId = ClientId(42);

    #[test]
    fn wallet_request_wire_format() {
        let msg = ClientMessage::Wallet(ClientRef { client_id: CLIENT });
        let value: Value = serde_json::from_str(&msg.into_json().unwrap()).unwrap();
        assert_eq!(value, json!({"type": "wallet", "payload": {"client_id": 42}}));
    }

    #[test]
    fn play_request_wire_format() {
        let msg = ClientMessage::Play(PlayRequest {
            client_id: CLIENT,
            bet_amount: 12.5,
            bet_type: BetType::Odd,
        });
        let value: Value = serde_json::from_str(&msg.into_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "play",
                "payload": {"client_id": 42, "bet_amount": 12.5, "bet_type": "odd"}
            })
        );
    }

    #[test]
    fn endplay_request_wire_format() {
        let msg = ClientMessage::EndPlay(ClientRef { client_id: CLIENT });
        assert_eq!(msg.kind(), MessageKind::EndPlay);
        let value: Value = serde_json::from_str(&msg.into_json().unwrap()).unwrap();
        assert_eq!(value, json!({"type": "endplay", "payload": {"client_id": 42}}));
    }

    #[test]
    fn parses_wallet_with_extra_fields() {
        let msg =
            ServerMessage::parse(r#"{"type":"wallet","payload":{"client_id":42,"balance":500}}"#)
                .unwrap();
        assert_eq!(msg, ServerMessage::Wallet(BalanceUpdate { balance: 500.0 }));
    }

    #[test]
    fn parses_play_result() {
        let msg = ServerMessage::parse(
            r#"{"type":"play","payload":{"dice_result":4,"won":true,"balance":120.5,"bet_amount":10}}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            ServerMessage::Play(RoundResult {
                balance: 120.5,
                dice_result: json!(4),
                won: true,
            })
        );
    }

    #[test]
    fn parses_server_error() {
        let msg = ServerMessage::parse(
            r#"{"type":"error","payload":{"code":1002,"message":"Bet amount exceeds available balance","details":"balance 5"}}"#,
        )
        .unwrap();
        let ServerMessage::Error(err) = msg else {
            panic!("expected error message, got {msg:?}");
        };
        assert_eq!(err.error_code(), ErrorCode::InsufficientFunds);
        assert_eq!(
            err.to_string(),
            "Bet amount exceeds available balance (1002): balance 5"
        );
    }

    #[test]
    fn unknown_type_is_unrecognized_even_without_payload() {
        let msg = ServerMessage::parse(r#"{"type":"leaderboard"}"#).unwrap();
        assert_eq!(msg, ServerMessage::Unrecognized("leaderboard".to_string()));

        let msg = ServerMessage::parse(r#"{"type":"chat","payload":[1,2,3]}"#).unwrap();
        assert_eq!(msg, ServerMessage::Unrecognized("chat".to_string()));
    }

    #[test]
    fn malformed_known_payload_is_an_error() {
        let res = ServerMessage::parse(r#"{"type":"wallet","payload":{"balance":"lots"}}"#);
        assert!(matches!(
            res,
            Err(ProtocolError::Payload {
                kind: MessageKind::Wallet,
                ..
            })
        ));

        let res = ServerMessage::parse(r#"{"type":"play","payload":{"balance":1.0}}"#);
        assert!(matches!(
            res,
            Err(ProtocolError::Payload {
                kind: MessageKind::Play,
                ..
            })
        ));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            ServerMessage::parse("not json"),
            Err(ProtocolError::Envelope(_))
        ));
        assert!(matches!(
            ServerMessage::parse(r#"{"type":"wallet""#),
            Err(ProtocolError::Envelope(_))
        ));
    }

    #[test]
    fn missing_or_non_string_type_is_unrecognized() {
        let msg = ServerMessage::parse(r#"{"payload":{}}"#).unwrap();
        assert_eq!(msg, ServerMessage::Unrecognized("null".to_string()));

        let msg = ServerMessage::parse(r#"{"type":5,"payload":{"balance":1}}"#).unwrap();
        assert_eq!(msg, ServerMessage::Unrecognized("5".to_string()));

        let msg = ServerMessage::parse(r#"{"type":null}"#).unwrap();
        assert_eq!(msg, ServerMessage::Unrecognized("null".to_string()));

        for frame in ["[1,2]", "42", "\"wallet\"", "null"] {
            assert!(
                matches!(ServerMessage::parse(frame), Ok(ServerMessage::Unrecognized(_))),
                "{frame}"
            );
        }
    }

    #[test]
    fn random_ids_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            assert!(ClientId::random(&mut rng).value() < ClientId::MAX);
        }
    }

    #[test]
    fn error_codes_map() {
        assert_eq!(ErrorCode::from(1000), ErrorCode::Internal);
        assert_eq!(ErrorCode::from(1006), ErrorCode::DiceRoll);
        assert_eq!(ErrorCode::from(42), ErrorCode::Unknown(42));
    }
}
