//! Pace arithmetic and the strings the page shows for it.

use crate::config::{MIN_PACE_DISTANCE_M, MIN_PACE_TIME_MIN};

/// Whole minutes per kilometre for a manually entered walk.
///
/// Returns `None` until at least `MIN_PACE_DISTANCE_M` metres and
/// `MIN_PACE_TIME_MIN` minutes have been entered. Fractional minutes are
/// floored.
pub fn manual_pace(distance_m: u32, time_min: u32) -> Option<u32> {
    if distance_m < MIN_PACE_DISTANCE_M || time_min < MIN_PACE_TIME_MIN {
        return None;
    }
    let km = distance_m as f64 / 1000.0;
    Some((time_min as f64 / km).floor() as u32)
}

/// Minutes per kilometre over tracked walking, when both totals are positive.
pub fn average_pace(walk_minutes: f64, distance_m: f64) -> Option<f64> {
    if walk_minutes > 0.0 && distance_m > 0.0 {
        Some(walk_minutes / (distance_m / 1000.0))
    } else {
        None
    }
}

pub fn format_manual_pace(pace: Option<u32>) -> String {
    match pace {
        Some(p) => format!("{} mins/km", p),
        None => "--".to_string(),
    }
}

pub fn format_average_pace(pace: Option<f64>) -> String {
    match pace {
        Some(p) => format!("Average Pace: {:.2} mins/km", p),
        None => "Average Pace: -- mins/km".to_string(),
    }
}

pub fn format_live_distance(meters: f64) -> String {
    format!("Live Distance: {:.2} metres", meters)
}
