//! Browser entry point for the walking pace calculator.
//! Wires the keypad, live tracking and incline readout into one Yew page.

use walk_pace::Field;
use yew::prelude::*;

mod components;
mod hooks;

use components::{EntryField, InclinePrompt, KeypadGrid, PaceDisplay, TrackingPanel};
use hooks::{use_incline_readout, use_tracking, KeypadAction, KeypadState};

/// Primary application component.
#[function_component(App)]
fn app() -> Html {
    let keypad = use_reducer(KeypadState::default);
    let tracking = use_tracking();
    let incline = use_incline_readout();

    let on_key = {
        let keypad = keypad.clone();
        Callback::from(move |key| keypad.dispatch(KeypadAction::Press(key)))
    };
    let select = |field: Field| {
        let keypad = keypad.clone();
        Callback::from(move |_: MouseEvent| keypad.dispatch(KeypadAction::Select(field)))
    };

    let pad = &keypad.keypad;

    html! {
        <div class="container">
            <h1>{ "Walking Pace" }</h1>

            <div class="entry">
                <EntryField
                    id="distance"
                    label="Distance:"
                    unit="metres"
                    text={pad.display(Field::Distance)}
                    selected={pad.selected() == Field::Distance}
                    onclick={select(Field::Distance)}
                />
                <EntryField
                    id="time"
                    label="Time:"
                    unit="mins"
                    text={pad.display(Field::Time)}
                    selected={pad.selected() == Field::Time}
                    onclick={select(Field::Time)}
                />
            </div>

            <PaceDisplay pace={pad.pace()} />
            <KeypadGrid {on_key} />

            <TrackingPanel
                is_tracking={tracking.is_tracking}
                live_distance={tracking.live_distance}
                average_pace={tracking.average_pace}
                error={tracking.error.clone()}
                on_toggle={tracking.on_toggle.clone()}
            />

            <InclinePrompt text={incline.text.clone()} onclick={incline.on_tap.clone()} />
        </div>
    }
}

/// Entry point: installs the panic hook and renders the app.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
