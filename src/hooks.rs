use gloo_timers::callback::Timeout;
use log::warn;
use std::cell::RefCell;
use std::rc::Rc;
use walk_pace::browser::{now_ms, GeolocationSource, OrientationSource};
use walk_pace::config::INCLINE_DISPLAY_MS;
use walk_pace::incline::IDLE_PROMPT;
use walk_pace::source::{drive_session, sample_stream, ErrorCallback, SourceError};
use walk_pace::{
    Field, InclineReadout, Key, Keypad, SampleFilter, Subscription, TrackingSession, WalkLog,
};
use yew::prelude::*;

/// Keypad state for `use_reducer`; re-renders only when an action changes it.
#[derive(Default, PartialEq)]
pub struct KeypadState {
    pub keypad: Keypad,
}

pub enum KeypadAction {
    Press(Key),
    Select(Field),
}

impl Reducible for KeypadState {
    type Action = KeypadAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut keypad = self.keypad.clone();
        let changed = match action {
            KeypadAction::Press(key) => keypad.press(key),
            KeypadAction::Select(field) => {
                let changed = keypad.selected() != field;
                keypad.select(field);
                changed
            }
        };
        if changed {
            Rc::new(Self { keypad })
        } else {
            self
        }
    }
}

/// Live tracking state exposed to the view.
pub struct TrackingHandle {
    pub is_tracking: bool,
    /// Running total of the current (or last) session, if one has started.
    pub live_distance: Option<f64>,
    pub average_pace: Option<f64>,
    pub error: Option<String>,
    /// Start/Stop button handler.
    pub on_toggle: Callback<MouseEvent>,
}

/// Custom hook owning the tracking session, the walk log and the geolocation
/// subscription.
#[hook]
pub fn use_tracking() -> TrackingHandle {
    let session = use_mut_ref(|| TrackingSession::new(SampleFilter::default()));
    let walk_log = use_mut_ref(WalkLog::new);
    let subscription: Rc<RefCell<Option<Subscription>>> = use_mut_ref(|| None);
    let is_tracking = use_state(|| false);
    let live_distance = use_state(|| None::<f64>);
    let average_pace = use_state(|| None::<f64>);
    let error = use_state(|| None::<String>);

    let on_toggle = {
        let session = session.clone();
        let is_tracking = is_tracking.clone();
        let live_distance = live_distance.clone();
        let average_pace = average_pace.clone();
        let error = error.clone();

        Callback::from(move |_: MouseEvent| {
            if session.borrow().is_tracking() {
                // dropping the subscription clears the watch and ends the stream
                subscription.borrow_mut().take();
                let summary = session.borrow_mut().stop(now_ms());
                if let Some(summary) = summary {
                    if !walk_log.borrow_mut().record(summary) {
                        warn!("No position fix during the session; not logged");
                    }
                }
                average_pace.set(walk_log.borrow().average_pace());
                is_tracking.set(false);
                return;
            }

            let on_error: ErrorCallback = {
                let error = error.clone();
                Rc::new(move |e: SourceError| error.set(Some(e.to_string())))
            };
            let started =
                GeolocationSource::new(on_error).and_then(|source| sample_stream(&source));
            match started {
                Ok((sub, samples)) => {
                    // the session only starts once the watch is in place
                    session.borrow_mut().start(now_ms());
                    *subscription.borrow_mut() = Some(sub);
                    live_distance.set(Some(0.0));
                    is_tracking.set(true);
                    error.set(None);

                    let session = session.clone();
                    let live_distance = live_distance.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        drive_session(samples, session, move |total| {
                            live_distance.set(Some(total))
                        })
                        .await;
                    });
                }
                Err(e) => {
                    warn!("Live distance unavailable: {}", e);
                    error.set(Some(e.to_string()));
                }
            }
        })
    };

    TrackingHandle {
        is_tracking: *is_tracking,
        live_distance: *live_distance,
        average_pace: *average_pace,
        error: (*error).clone(),
        on_toggle,
    }
}

/// Incline prompt text plus its tap handler.
pub struct InclineHandle {
    pub text: String,
    pub on_tap: Callback<MouseEvent>,
}

/// Custom hook listening to device orientation for the incline readout.
///
/// Tapping arms the readout; it returns to the idle prompt after
/// `INCLINE_DISPLAY_MS`.
#[hook]
pub fn use_incline_readout() -> InclineHandle {
    let readout = use_mut_ref(InclineReadout::new);
    let text = use_state(|| IDLE_PROMPT.to_string());
    let expiry: Rc<RefCell<Option<Timeout>>> = use_mut_ref(|| None);

    {
        let readout = readout.clone();
        let text = text.clone();
        use_effect_with((), move |_| {
            let listener = OrientationSource::listen(Box::new(move |beta: Option<f64>| {
                let shown = readout.borrow_mut().observe(beta);
                if let Some(incline) = shown {
                    text.set(incline.label());
                }
            }));
            let listener = match listener {
                Ok(sub) => Some(sub),
                Err(e) => {
                    warn!("Device orientation event not supported: {}", e);
                    None
                }
            };
            move || drop(listener)
        });
    }

    let on_tap = {
        let text = text.clone();
        Callback::from(move |_: MouseEvent| {
            let incline = readout.borrow_mut().arm();
            text.set(incline.label());

            let readout = readout.clone();
            let text = text.clone();
            // replacing the handle cancels any pending expiry
            *expiry.borrow_mut() = Some(Timeout::new(INCLINE_DISPLAY_MS, move || {
                readout.borrow_mut().expire();
                let idle = readout.borrow().text();
                text.set(idle);
            }));
        })
    };

    InclineHandle {
        text: (*text).clone(),
        on_tap,
    }
}
