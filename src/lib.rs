//! Walking pace calculator.
//!
//! Pure models for manual pace entry, live GPS distance tracking and the
//! incline readout, plus the browser bindings the Yew front-end wires them to.

use log::info;
use wasm_bindgen::prelude::*;

pub mod accumulator;
pub mod browser;
pub mod config;
pub mod geo;
pub mod incline;
pub mod keypad;
pub mod pace;
pub mod sample;
pub mod session;
pub mod source;

pub use accumulator::DistanceAccumulator;
pub use geo::{haversine_distance_meters, Position};
pub use incline::{Direction, Incline, InclineReadout};
pub use keypad::{Field, Key, Keypad};
pub use sample::{PositionSample, SampleError, SampleFilter};
pub use session::{SampleOutcome, SessionSummary, TrackingSession, WalkLog};
pub use source::{ManualSource, PositionSource, SourceError, Subscription};

/// Great-circle distance in metres between two fixes, for plain-JS callers.
#[wasm_bindgen]
pub fn distance_between(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    haversine_distance_meters(&Position::new(lat1, lon1), &Position::new(lat2, lon2))
}

/// Total path length in metres of a sequence of positions.
///
/// Every position is validated first; the first invalid one aborts with an
/// error string naming its index.
pub fn track_distance_of(positions: &[Position]) -> Result<f64, String> {
    let filter = SampleFilter::permissive();
    let mut accumulator = DistanceAccumulator::new();
    for (idx, position) in positions.iter().enumerate() {
        let valid = filter
            .validate(&PositionSample::from(*position))
            .map_err(|e| format!("Position {}: {}", idx, e))?;
        accumulator.add_sample(valid);
    }
    info!(
        "Measured {} positions: {:.2} m",
        positions.len(),
        accumulator.current_total()
    );
    Ok(accumulator.current_total())
}

/// JS entry point for [`track_distance_of`].
///
/// Returns the distance as a number, or an error message string.
#[wasm_bindgen]
pub fn track_distance(positions_js: JsValue) -> JsValue {
    let positions: Vec<Position> = match serde_wasm_bindgen::from_value(positions_js) {
        Ok(p) => p,
        Err(e) => {
            return serde_wasm_bindgen::to_value(&format!("Failed to deserialize positions: {}", e))
                .unwrap_or(JsValue::NULL);
        }
    };

    match track_distance_of(&positions) {
        Ok(total) => JsValue::from_f64(total),
        Err(e) => serde_wasm_bindgen::to_value(&e).unwrap_or(JsValue::NULL),
    }
}
