use leptos::{either::Either, prelude::*};

use dice_lib::{BetType, ClientConfig, ClientId, DiceClient};

use crate::components::{
    Balance, BetAmount, BetButton, DiceDisplay, PlayButton, ResultDisplay, Unsupported,
};
use crate::game::FrontendGame;
use crate::transport::websocket_supported;

const CONFIG_META: &str = "meta[name=\"spicy-dice-config\"]";

/// Page-level overrides, embedded by whoever serves the page as
/// `<meta name="spicy-dice-config" content="{...}">`.
fn page_config() -> ClientConfig {
    let content = document()
        .query_selector(CONFIG_META)
        .ok()
        .flatten()
        .and_then(|meta| meta.get_attribute("content"));
    let Some(content) = content else {
        return ClientConfig::default();
    };
    ClientConfig::from_json(&content).unwrap_or_else(|e| {
        log::warn!("Ignoring bad page config {content:?}: {e}");
        ClientConfig::default()
    })
}

fn page_endpoint(config: &ClientConfig) -> String {
    let location = window().location();
    let protocol = location.protocol().unwrap_or_default();
    let host = location.host().unwrap_or_default();
    config.endpoint(&protocol, &host)
}

#[component]
pub fn App() -> impl IntoView {
    if websocket_supported() {
        Either::Right(view! { <DiceGame /> })
    } else {
        log::warn!("WebSocket unavailable");
        Either::Left(view! { <Unsupported /> })
    }
}

#[component]
fn DiceGame() -> impl IntoView {
    let config = page_config();
    let url = page_endpoint(&config);
    let client = DiceClient::new(ClientId::random(&mut rand::rng()), config);
    let game = FrontendGame::new(client, &url);
    game.start();

    view! {
        <div class="flex flex-col items-center min-h-screen bg-neutral-800 text-neutral-50 py-8">
            <h1 class="text-4xl font-bold mb-4">"Spicy Dice"</h1>
            <div class="flex flex-col items-center w-full max-w-xs space-y-4">
                <Balance game=game.clone() />
                <DiceDisplay game=game.clone() />
                <ResultDisplay game=game.clone() />
                <div class="flex w-full space-x-2">
                    <BetButton game=game.clone() bet_type=BetType::Even id="betEven" />
                    <BetButton game=game.clone() bet_type=BetType::Odd id="betOdd" />
                </div>
                <BetAmount game=game.clone() />
                <PlayButton game=game />
            </div>
        </div>
    }
}
