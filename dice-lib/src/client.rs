use std::time::Duration;

use crate::bet::{validate_bet, BetError, BetType};
use crate::config::ClientConfig;
use crate::display::{format_balance, format_dice, ResultBanner, DICE_IDLE};
use crate::messages::{
    BalanceUpdate, ClientId, ClientMessage, ClientRef, PlayRequest, ProtocolError, RoundResult,
    ServerMessage,
};

/// Side effects requested by the client. The host runs them; the client
/// never touches the socket or a timer itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Connect,
    Send(ClientMessage),
    ScheduleReveal { after: Duration, round: RoundResult },
    ScheduleReconnect { after: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Idle,
    Connecting,
    Open,
    Reconnecting,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DiceFace {
    #[default]
    Idle,
    Spinning,
    Rolled(String),
}

impl DiceFace {
    pub fn text(&self) -> &str {
        match self {
            DiceFace::Idle | DiceFace::Spinning => DICE_IDLE,
            DiceFace::Rolled(face) => face.as_str(),
        }
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self, DiceFace::Spinning)
    }
}

/// Everything the page shows, derived from a [`DiceClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct GameView {
    pub balance: String,
    pub dice: DiceFace,
    pub result: ResultBanner,
    pub selection: Option<BetType>,
    pub controls_enabled: bool,
}

impl Default for GameView {
    fn default() -> Self {
        GameView {
            balance: format_balance(0.0),
            dice: DiceFace::Idle,
            result: ResultBanner::Hidden,
            selection: None,
            controls_enabled: true,
        }
    }
}

impl GameView {
    pub fn is_selected(&self, bet_type: BetType) -> bool {
        self.selection == Some(bet_type)
    }
}

pub struct DiceClient {
    client_id: ClientId,
    config: ClientConfig,
    connection: ConnectionState,
    selection: Option<BetType>,
    round_in_flight: bool,
    balance: Option<f64>,
    dice: DiceFace,
    result: ResultBanner,
}

impl DiceClient {
    pub fn new(client_id: ClientId, config: ClientConfig) -> Self {
        DiceClient {
            client_id,
            config,
            connection: ConnectionState::Idle,
            selection: None,
            round_in_flight: false,
            balance: None,
            dice: DiceFace::Idle,
            result: ResultBanner::Hidden,
        }
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn balance(&self) -> Option<f64> {
        self.balance
    }

    pub fn selection(&self) -> Option<BetType> {
        self.selection
    }

    pub fn controls_enabled(&self) -> bool {
        !self.round_in_flight
    }

    pub fn view(&self) -> GameView {
        GameView {
            balance: format_balance(self.balance.unwrap_or_default()),
            dice: self.dice.clone(),
            result: self.result,
            selection: self.selection,
            controls_enabled: self.controls_enabled(),
        }
    }

    pub fn start(&mut self) -> Vec<Effect> {
        self.connection = ConnectionState::Connecting;
        vec![Effect::Connect]
    }

    pub fn on_open(&mut self) -> Vec<Effect> {
        log::info!("Connected as client {}", self.client_id);
        self.connection = ConnectionState::Open;
        vec![Effect::Send(ClientMessage::Wallet(self.client_ref()))]
    }

    pub fn on_error(&self, description: &str) {
        log::error!("Connection error: {description}");
    }

    /// Any close, clean or not, schedules one reconnect. Closes that arrive
    /// while a reconnect is already pending are absorbed.
    pub fn on_close(&mut self) -> Vec<Effect> {
        if self.connection == ConnectionState::Reconnecting {
            log::debug!("Close while reconnect already pending");
            return Vec::new();
        }
        log::info!(
            "Disconnected, reconnecting in {}ms",
            self.config.reconnect_delay.as_millis()
        );
        self.connection = ConnectionState::Reconnecting;
        vec![Effect::ScheduleReconnect {
            after: self.config.reconnect_delay,
        }]
    }

    /// Reconnect timer fired.
    pub fn reconnect(&mut self) -> Vec<Effect> {
        if self.connection != ConnectionState::Reconnecting {
            return Vec::new();
        }
        self.connection = ConnectionState::Connecting;
        vec![Effect::Connect]
    }

    pub fn handle_message(&mut self, frame: &str) -> Result<Vec<Effect>, ProtocolError> {
        let msg = ServerMessage::parse(frame)?;
        Ok(self.dispatch(msg))
    }

    pub fn dispatch(&mut self, msg: ServerMessage) -> Vec<Effect> {
        match msg {
            ServerMessage::Wallet(BalanceUpdate { balance }) => {
                log::debug!("wallet: {balance}");
                self.balance = Some(balance);
                Vec::new()
            }
            ServerMessage::Play(round) => {
                log::debug!("play: {round:?}");
                self.balance = Some(round.balance);
                vec![Effect::ScheduleReveal {
                    after: self.config.reveal_delay,
                    round,
                }]
            }
            ServerMessage::EndPlay(BalanceUpdate { balance }) => {
                log::debug!("endplay: {balance}");
                self.balance = Some(balance);
                Vec::new()
            }
            ServerMessage::Error(e) => {
                log::warn!("Server error {:?}: {e}", e.error_code());
                Vec::new()
            }
            ServerMessage::Unrecognized(kind) => {
                log::debug!("Ignoring message of type {kind:?}");
                Vec::new()
            }
        }
    }

    /// Returns whether the selection was applied; picks are ignored while a
    /// round is running.
    pub fn select_bet(&mut self, bet_type: BetType) -> bool {
        if self.round_in_flight {
            return false;
        }
        self.selection = Some(bet_type);
        true
    }

    pub fn try_play(&mut self, amount: &str) -> Result<Vec<Effect>, BetError> {
        if self.round_in_flight {
            return Err(BetError::RoundInProgress);
        }
        let (bet_type, bet_amount) = validate_bet(self.selection, amount)?;
        self.round_in_flight = true;
        self.dice = DiceFace::Spinning;
        self.result = ResultBanner::Hidden;
        Ok(vec![Effect::Send(ClientMessage::Play(PlayRequest {
            client_id: self.client_id,
            bet_amount,
            bet_type,
        }))])
    }

    /// Called when the spin timer fires.
    pub fn reveal(&mut self, round: RoundResult) -> Vec<Effect> {
        self.dice = DiceFace::Rolled(format_dice(&round.dice_result));
        self.result = ResultBanner::from_won(round.won);
        self.round_in_flight = false;
        vec![Effect::Send(ClientMessage::EndPlay(self.client_ref()))]
    }

    fn client_ref(&self) -> ClientRef {
        ClientRef {
            client_id: self.client_id,
        }
    }
}
