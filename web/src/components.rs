use leptos::prelude::*;

use dice_lib::{display::UNSUPPORTED, BetType};

use crate::game::FrontendGame;

#[macro_export]
macro_rules! button_class {
    () => {
        concat!(
            "inline-flex items-center justify-center text-md font-medium border border-solid border-black ",
            "disabled:pointer-events-none disabled:opacity-50 h-10 px-4 py-2 ",
            "bg-neutral-500 text-neutral-50 hover:bg-neutral-600/90"
        )
    };
    ($extra:literal) => {
        concat!($crate::button_class!(), " ", $extra)
    };
    ($extra:literal, $colors:literal) => {
        concat!(
            "inline-flex items-center justify-center text-md font-medium border border-solid border-black ",
            "disabled:pointer-events-none disabled:opacity-50 h-10 px-4 py-2 ",
            $colors,
            " ",
            $extra
        )
    };
}

#[component]
pub fn Balance(game: FrontendGame) -> impl IntoView {
    let game_view = game.view;
    let balance = move || game_view.with(|v| v.balance.clone());
    view! {
        <div class="text-lg text-neutral-300">
            "Balance: " <span id="balance" class="font-bold text-neutral-50">{balance}</span>
        </div>
    }
}

#[component]
pub fn DiceDisplay(game: FrontendGame) -> impl IntoView {
    let game_view = game.view;
    let dice = move || game_view.with(|v| v.dice.clone());
    view! {
        <div
            id="diceContainer"
            class="text-6xl h-24 flex items-center justify-center select-none"
            class=("dice-spin", move || dice().is_spinning())
        >
            {move || dice().text().to_string()}
        </div>
    }
}

#[component]
pub fn ResultDisplay(game: FrontendGame) -> impl IntoView {
    let game_view = game.view;
    let result = move || game_view.with(|v| v.result);
    view! {
        <div id="result" class=move || result().class()>
            {move || result().text()}
        </div>
    }
}

#[component]
pub fn BetButton(game: FrontendGame, bet_type: BetType, id: &'static str) -> impl IntoView {
    let game_view = game.view;
    let class = move || {
        if game_view.with(|v| v.is_selected(bet_type)) {
            button_class!("w-full rounded rounded-lg ring-2 ring-white")
        } else {
            button_class!("w-full rounded rounded-lg")
        }
    };
    let disabled = move || !game_view.with(|v| v.controls_enabled);
    let label = match bet_type {
        BetType::Even => "Even",
        BetType::Odd => "Odd",
    };
    let on_click = move |_| game.select_bet(bet_type);
    view! {
        <div class="flex-1">
            <button type="button" id=id class=class disabled=disabled on:click=on_click>
                {label}
            </button>
        </div>
    }
}

#[component]
pub fn BetAmount(game: FrontendGame) -> impl IntoView {
    let bet_amount = game.bet_amount;
    let set_bet_amount = game.set_bet_amount;
    view! {
        <input
            id="betAmount"
            type="number"
            min="0"
            step="0.01"
            placeholder="Bet amount"
            class="flex h-10 w-full border border-blue-950 bg-white px-3 py-2 text-sm text-neutral-950"
            prop:value=move || bet_amount.get()
            on:input=move |ev| set_bet_amount.set(event_target_value(&ev))
        />
    }
}

#[component]
pub fn PlayButton(game: FrontendGame) -> impl IntoView {
    let game_view = game.view;
    let disabled = move || !game_view.with(|v| v.controls_enabled);
    let on_click = move |_| game.try_play();
    view! {
        <button
            type="button"
            id="playButton"
            class=button_class!("w-full rounded rounded-lg", "bg-green-700 text-neutral-50 hover:bg-green-800/90")
            disabled=disabled
            on:click=on_click
        >
            "Play"
        </button>
    }
}

#[component]
pub fn Unsupported() -> impl IntoView {
    view! { <b class="text-center text-2xl">{UNSUPPORTED}</b> }
}
