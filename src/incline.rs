//! Device tilt to walking incline.

use crate::geo::to_radians;
use std::fmt;

pub const IDLE_PROMPT: &str = "◬ Tap to show incline ◬";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Uphill,
    Downhill,
    Flat,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Uphill => "uphill",
            Direction::Downhill => "downhill",
            Direction::Flat => "flat",
        };
        f.write_str(s)
    }
}

/// Grade in percent for a tilt angle; sign is dropped.
pub fn degrees_to_percent(degrees: f64) -> f64 {
    to_radians(degrees.abs()).tan() * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Incline {
    pub percent: f64,
    pub degrees: f64,
    pub direction: Direction,
}

impl Incline {
    /// Build from the front-to-back tilt (`beta`) of a DeviceOrientation event.
    pub fn from_beta(beta: f64) -> Self {
        let direction = if beta > 0.0 {
            Direction::Uphill
        } else if beta < 0.0 {
            Direction::Downhill
        } else {
            Direction::Flat
        };
        Self {
            percent: degrees_to_percent(beta),
            degrees: beta,
            direction,
        }
    }

    pub fn label(&self) -> String {
        format!(
            "◬ Incline: {:.0}% {} ({:.0}°) ◬",
            self.percent, self.direction, self.degrees
        )
    }
}

/// Tap-to-show readout. Readings only surface while armed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InclineReadout {
    armed: bool,
    last_beta: Option<f64>,
    current: Option<Incline>,
}

impl InclineReadout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Start showing readings; returns the reading for the last known tilt,
    /// or flat when no orientation event has arrived yet.
    pub fn arm(&mut self) -> Incline {
        self.armed = true;
        let incline = Incline::from_beta(self.last_beta.unwrap_or(0.0));
        self.current = Some(incline);
        incline
    }

    pub fn observe(&mut self, beta: Option<f64>) -> Option<Incline> {
        let beta = beta.filter(|b| b.is_finite())?;
        self.last_beta = Some(beta);
        if !self.armed {
            return None;
        }
        let incline = Incline::from_beta(beta);
        self.current = Some(incline);
        Some(incline)
    }

    pub fn expire(&mut self) {
        self.armed = false;
        self.current = None;
    }

    pub fn text(&self) -> String {
        match &self.current {
            Some(incline) => incline.label(),
            None => IDLE_PROMPT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_from_degrees() {
        assert_eq!(degrees_to_percent(0.0), 0.0);
        assert!((degrees_to_percent(45.0) - 100.0).abs() < 1e-9);
        assert!((degrees_to_percent(-7.0) - 12.278).abs() < 1e-3);
    }

    #[test]
    fn direction_follows_sign() {
        assert_eq!(Incline::from_beta(3.0).direction, Direction::Uphill);
        assert_eq!(Incline::from_beta(-3.0).direction, Direction::Downhill);
        assert_eq!(Incline::from_beta(0.0).direction, Direction::Flat);
    }

    #[test]
    fn label_rounds_to_whole_numbers() {
        assert_eq!(Incline::from_beta(7.0).label(), "◬ Incline: 12% uphill (7°) ◬");
        assert_eq!(Incline::from_beta(0.0).label(), "◬ Incline: 0% flat (0°) ◬");
    }

    #[test]
    fn readout_ignores_tilt_until_armed() {
        let mut readout = InclineReadout::new();
        assert_eq!(readout.observe(Some(5.0)), None);
        assert_eq!(readout.text(), IDLE_PROMPT);

        let shown = readout.arm();
        assert_eq!(shown.degrees, 5.0);
        assert_eq!(readout.observe(Some(-2.0)).map(|i| i.direction), Some(Direction::Downhill));
        assert!(readout.text().contains("downhill"));
    }

    #[test]
    fn arming_without_readings_shows_flat() {
        let mut readout = InclineReadout::new();
        assert_eq!(readout.arm().direction, Direction::Flat);
        assert_eq!(readout.observe(None), None);
    }

    #[test]
    fn expire_returns_to_prompt() {
        let mut readout = InclineReadout::new();
        readout.arm();
        readout.expire();
        assert!(!readout.is_armed());
        assert_eq!(readout.text(), IDLE_PROMPT);
        assert_eq!(readout.observe(Some(10.0)), None);
    }
}
