//! Application-level configuration constants.

// UI Behavior
pub const INCLINE_DISPLAY_MS: u32 = 30_000;
pub const CURSOR: char = '|';

// Keypad input limits
pub const MAX_DISTANCE_DIGITS: usize = 5;
pub const MAX_TIME_DIGITS: usize = 3;

// Pace thresholds for the manual calculator
pub const MIN_PACE_DISTANCE_M: u32 = 10;
pub const MIN_PACE_TIME_MIN: u32 = 5;

// Geodesy
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

// Sample filtering
pub const MAX_ACCEPTED_ACCURACY_M: f64 = 100.0;
