use anyhow::{bail, Result};
use leptos::prelude::*;
use std::sync::{Arc, RwLock, RwLockWriteGuard};

use dice_lib::{
    display::PLAY_REJECTED, BetType, ClientMessage, DiceClient, Effect, GameView,
};

use crate::transport::{Transport, TransportEvent};

/// Browser-side controller: runs the effects the [`DiceClient`] asks for and
/// mirrors its view into signals.
#[derive(Clone)]
pub struct FrontendGame {
    pub view: ReadSignal<GameView>,
    pub bet_amount: ReadSignal<String>,
    pub set_bet_amount: WriteSignal<String>,
    set_view: WriteSignal<GameView>,
    game: Arc<RwLock<DiceClient>>,
    transport: StoredValue<Option<Transport>>,
}

impl FrontendGame {
    pub fn new(client: DiceClient, url: &str) -> Self {
        let (view, set_view) = signal(client.view());
        let (bet_amount, set_bet_amount) = signal(String::new());
        let game = FrontendGame {
            view,
            bet_amount,
            set_bet_amount,
            set_view,
            game: Arc::new(RwLock::new(client)),
            transport: StoredValue::new(None),
        };
        let handler = {
            let game = game.clone();
            move |event: TransportEvent| game.handle_event(event)
        };
        game.transport.set_value(Some(Transport::new(url, handler)));
        game
    }

    pub fn start(&self) {
        log::info!("Starting client {}", self.client().client_id());
        let effects = self.update(|game| game.start());
        self.run(effects);
    }

    pub fn select_bet(&self, bet_type: BetType) {
        if !self.update(|game| game.select_bet(bet_type)) {
            log::debug!("Ignored {bet_type} pick during round");
        }
    }

    pub fn try_play(&self) {
        let amount = self.bet_amount.get_untracked();
        match self.update(|game| game.try_play(&amount)) {
            Ok(effects) => self.run(effects),
            Err(e) => {
                log::debug!("Play rejected: {e}");
                _ = window().alert_with_message(PLAY_REJECTED);
            }
        }
    }

    pub fn handle_event(&self, event: TransportEvent) {
        match event {
            TransportEvent::Open => {
                let effects = self.update(|game| game.on_open());
                self.run(effects);
            }
            TransportEvent::Message(frame) => {
                log::debug!("received {frame}");
                match self.update(|game| game.handle_message(&frame)) {
                    Ok(effects) => self.run(effects),
                    Err(e) => log::error!("Failed handling message {frame:?}: {e}"),
                }
            }
            TransportEvent::Error(description) => self.client().on_error(&description),
            TransportEvent::Close { code, reason } => {
                log::info!("Socket closed ({code}) {reason}");
                let effects = self.update(|game| game.on_close());
                self.run(effects);
            }
        }
    }

    fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Connect => self.connect(),
                Effect::Send(msg) => {
                    if let Err(e) = self.send(msg) {
                        log::error!("{e:?}");
                    }
                }
                Effect::ScheduleReveal { after, round } => {
                    let game = self.clone();
                    set_timeout(
                        move || {
                            let effects = game.update(|g| g.reveal(round));
                            game.run(effects);
                        },
                        after,
                    );
                }
                Effect::ScheduleReconnect { after } => {
                    let game = self.clone();
                    set_timeout(
                        move || {
                            let effects = game.update(|g| g.reconnect());
                            game.run(effects);
                        },
                        after,
                    );
                }
            }
        }
    }

    fn connect(&self) {
        match self.transport.get_value() {
            Some(transport) => transport.open(),
            None => log::error!("No transport to connect"),
        }
    }

    fn send(&self, msg: ClientMessage) -> Result<()> {
        log::debug!("sending {} {msg:?}", msg.kind());
        let Some(transport) = self.transport.get_value() else {
            bail!("No transport to send {}", msg.kind())
        };
        transport.send(&msg.into_json()?)
    }

    fn client(&self) -> RwLockWriteGuard<'_, DiceClient> {
        self.game.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn update<T>(&self, f: impl FnOnce(&mut DiceClient) -> T) -> T {
        let (out, view) = {
            let mut game = self.client();
            let out = f(&mut game);
            (out, game.view())
        };
        self.set_view.set(view);
        out
    }
}
