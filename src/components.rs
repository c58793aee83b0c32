//! Pure Yew view components for the pace calculator.
//!
//! Components render from props only; all state lives in `hooks`.

use walk_pace::pace::{format_average_pace, format_live_distance, format_manual_pace};
use walk_pace::Key;
use yew::prelude::*;

const KEY_ROWS: [[Key; 3]; 4] = [
    [Key::Digit(1), Key::Digit(2), Key::Digit(3)],
    [Key::Digit(4), Key::Digit(5), Key::Digit(6)],
    [Key::Digit(7), Key::Digit(8), Key::Digit(9)],
    [Key::Clear, Key::Digit(0), Key::Backspace],
];

fn key_id(key: Key) -> String {
    match key {
        Key::Digit(d) => format!("b{}", d),
        Key::Clear => "bC".to_string(),
        Key::Backspace => "bBack".to_string(),
    }
}

/// One tappable entry field (distance or time).
#[derive(Properties, PartialEq)]
pub struct EntryFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub unit: AttrValue,
    pub text: String,
    pub selected: bool,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(EntryField)]
pub fn entry_field(props: &EntryFieldProps) -> Html {
    let class = classes!("entry-field", props.selected.then_some("selected"));
    html! {
        <div class="form-group">
            <label for={props.id.clone()}>{ props.label.clone() }</label>
            <p id={props.id.clone()} {class} onclick={props.onclick.clone()}>{ props.text.clone() }</p>
            <span class="unit">{ props.unit.clone() }</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct KeypadGridProps {
    pub on_key: Callback<Key>,
}

/// The 4x3 keypad: digits, clear and backspace.
#[function_component(KeypadGrid)]
pub fn keypad_grid(props: &KeypadGridProps) -> Html {
    html! {
        <div class="keypad">
            { KEY_ROWS.iter().map(|row| html! {
                <div class="keypad-row">
                    { row.iter().map(|&key| {
                        let on_key = props.on_key.clone();
                        html! {
                            <button id={key_id(key)} class="key"
                                onclick={Callback::from(move |_: MouseEvent| on_key.emit(key))}>
                                { key.label() }
                            </button>
                        }
                    }).collect::<Html>() }
                </div>
            }).collect::<Html>() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PaceDisplayProps {
    pub pace: Option<u32>,
}

#[function_component(PaceDisplay)]
pub fn pace_display(props: &PaceDisplayProps) -> Html {
    html! {
        <div class="pace-display">
            <label for="pace">{ "Pace:" }</label>
            <p id="pace">{ format_manual_pace(props.pace) }</p>
        </div>
    }
}

/// Start/Stop button with live distance and average pace.
#[derive(Properties, PartialEq)]
pub struct TrackingPanelProps {
    pub is_tracking: bool,
    pub live_distance: Option<f64>,
    pub average_pace: Option<f64>,
    pub error: Option<String>,
    pub on_toggle: Callback<MouseEvent>,
}

#[function_component(TrackingPanel)]
pub fn tracking_panel(props: &TrackingPanelProps) -> Html {
    html! {
        <div class="tracking">
            <button id="start" class="btn-primary" onclick={props.on_toggle.clone()}>
                { if props.is_tracking { "Stop" } else { "Start" } }
            </button>
            if let Some(meters) = props.live_distance {
                <p id="live-distance">{ format_live_distance(meters) }</p>
            }
            <p id="average-pace">{ format_average_pace(props.average_pace) }</p>
            if let Some(err) = &props.error {
                <div class="current-error compact">{ err.clone() }</div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct InclinePromptProps {
    pub text: String,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(InclinePrompt)]
pub fn incline_prompt(props: &InclinePromptProps) -> Html {
    html! {
        <p id="incline-prompt" class="incline" onclick={props.onclick.clone()}>
            { props.text.clone() }
        </p>
    }
}
