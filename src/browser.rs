//! `web-sys` bindings that expose browser sensors as subscriptions.

use crate::sample::PositionSample;
use crate::source::{ErrorCallback, PositionSource, SampleCallback, SourceError, Subscription};
use gloo_utils::errors::JsError;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DeviceOrientationEvent, Geolocation, Position, PositionError};

const ORIENTATION_EVENT: &str = "deviceorientation";

fn js_error(context: &str, err: JsValue) -> SourceError {
    let detail = JsError::try_from(err.clone())
        .map(|e| e.to_string())
        .unwrap_or_else(|_| format!("{:?}", err));
    SourceError::Unavailable(format!("{}: {}", context, detail))
}

fn no_window() -> SourceError {
    SourceError::Unavailable("no window".to_string())
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Sample stream backed by `navigator.geolocation.watchPosition`.
///
/// Errors the browser reports after the watch is running (permission denied,
/// no fix, timeout) go to the error handler given at construction.
pub struct GeolocationSource {
    geolocation: Geolocation,
    on_error: ErrorCallback,
}

impl GeolocationSource {
    pub fn new(on_error: ErrorCallback) -> Result<Self, SourceError> {
        let geolocation = web_sys::window()
            .ok_or_else(no_window)?
            .navigator()
            .geolocation()
            .map_err(|e| js_error("Geolocation not supported", e))?;
        Ok(Self {
            geolocation,
            on_error,
        })
    }
}

impl PositionSource for GeolocationSource {
    fn subscribe(&self, mut on_sample: SampleCallback) -> Result<Subscription, SourceError> {
        let callback = Closure::<dyn FnMut(Position)>::new(move |position: Position| {
            let coords = position.coords();
            on_sample(
                PositionSample::new(coords.latitude(), coords.longitude())
                    .with_accuracy(coords.accuracy()),
            );
        });

        let on_error = self.on_error.clone();
        let error_callback = Closure::<dyn FnMut(PositionError)>::new(move |err: PositionError| {
            let error = SourceError::from_position_error(err.code(), &err.message());
            warn!("Geolocation error: {}", error);
            on_error(error);
        });

        let watch_id = self
            .geolocation
            .watch_position_with_error_callback(
                callback.as_ref().unchecked_ref(),
                Some(error_callback.as_ref().unchecked_ref()),
            )
            .map_err(|e| js_error("watchPosition failed", e))?;
        debug!("Watching position (id {})", watch_id);

        let geolocation = self.geolocation.clone();
        Ok(Subscription::new(move || {
            geolocation.clear_watch(watch_id);
            // the browser no longer holds the callbacks once the watch is cleared
            drop(callback);
            drop(error_callback);
            debug!("Cleared position watch {}", watch_id);
        }))
    }
}

/// `deviceorientation` listener reporting the front-to-back tilt (`beta`).
pub struct OrientationSource;

impl OrientationSource {
    pub fn listen(mut on_beta: Box<dyn FnMut(Option<f64>)>) -> Result<Subscription, SourceError> {
        let window = web_sys::window().ok_or_else(no_window)?;

        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            match event.dyn_into::<DeviceOrientationEvent>() {
                Ok(orientation) => on_beta(orientation.beta()),
                Err(_) => warn!("Unexpected event on {} listener", ORIENTATION_EVENT),
            }
        });

        window
            .add_event_listener_with_callback_and_bool(
                ORIENTATION_EVENT,
                callback.as_ref().unchecked_ref(),
                true,
            )
            .map_err(|e| js_error("Device orientation not supported", e))?;

        Ok(Subscription::new(move || {
            if let Err(e) = window.remove_event_listener_with_callback_and_bool(
                ORIENTATION_EVENT,
                callback.as_ref().unchecked_ref(),
                true,
            ) {
                warn!("Failed to remove orientation listener: {:?}", e);
            }
        }))
    }
}
