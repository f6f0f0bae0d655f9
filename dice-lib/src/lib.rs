pub mod bet;
pub mod client;
pub mod config;
pub mod display;
pub mod messages;

pub use bet::{BetError, BetType};
pub use client::{ConnectionState, DiceClient, DiceFace, Effect, GameView};
pub use config::ClientConfig;
pub use messages::{ClientId, ClientMessage, ProtocolError, RoundResult, ServerMessage};
