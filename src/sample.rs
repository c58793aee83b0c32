//! Raw fixes as reported by a location provider, and the filter that decides
//! which of them may reach the accumulator.

use crate::config::MAX_ACCEPTED_ACCURACY_M;
use crate::geo::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fix plus the provider's reported accuracy radius in metres, if any.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    pub position: Position,
    pub accuracy: Option<f64>,
}

impl PositionSample {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            position: Position::new(latitude, longitude),
            accuracy: None,
        }
    }

    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }
}

impl From<Position> for PositionSample {
    fn from(position: Position) -> Self {
        Self {
            position,
            accuracy: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SampleError {
    NonFinite,
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
    InaccurateFix { accuracy: f64, limit: f64 },
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleError::NonFinite => write!(f, "Coordinates must be finite numbers"),
            SampleError::LatitudeOutOfRange(lat) => {
                write!(f, "Latitude {} is outside -90..90", lat)
            }
            SampleError::LongitudeOutOfRange(lon) => {
                write!(f, "Longitude {} is outside -180..180", lon)
            }
            SampleError::InaccurateFix { accuracy, limit } => write!(
                f,
                "Fix accuracy {} m is worse than the accepted {} m",
                accuracy, limit
            ),
        }
    }
}

impl std::error::Error for SampleError {}

/// Host-side policy for dropping fixes before they are accumulated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleFilter {
    /// Largest accuracy radius accepted; `None` accepts any reported accuracy.
    pub max_accuracy_meters: Option<f64>,
}

impl Default for SampleFilter {
    fn default() -> Self {
        Self {
            max_accuracy_meters: Some(MAX_ACCEPTED_ACCURACY_M),
        }
    }
}

impl SampleFilter {
    pub fn permissive() -> Self {
        Self {
            max_accuracy_meters: None,
        }
    }

    pub fn validate(&self, sample: &PositionSample) -> Result<Position, SampleError> {
        let Position {
            latitude,
            longitude,
        } = sample.position;

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(SampleError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(SampleError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(SampleError::LongitudeOutOfRange(longitude));
        }

        if let Some(accuracy) = sample.accuracy {
            let limit = self.max_accuracy_meters.unwrap_or(f64::INFINITY);
            if !accuracy.is_finite() || accuracy < 0.0 || accuracy > limit {
                return Err(SampleError::InaccurateFix { accuracy, limit });
            }
        }

        Ok(sample.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_fix() {
        let filter = SampleFilter::default();
        let sample = PositionSample::new(51.5, -0.12);
        assert_eq!(filter.validate(&sample), Ok(Position::new(51.5, -0.12)));
    }

    #[test]
    fn accepts_range_boundaries() {
        let filter = SampleFilter::default();
        assert!(filter.validate(&PositionSample::new(90.0, 180.0)).is_ok());
        assert!(filter.validate(&PositionSample::new(-90.0, -180.0)).is_ok());
    }

    #[test]
    fn rejects_bad_coordinates() {
        let filter = SampleFilter::default();
        assert_eq!(
            filter.validate(&PositionSample::new(f64::NAN, 0.0)),
            Err(SampleError::NonFinite)
        );
        assert_eq!(
            filter.validate(&PositionSample::new(0.0, f64::INFINITY)),
            Err(SampleError::NonFinite)
        );
        assert_eq!(
            filter.validate(&PositionSample::new(90.5, 0.0)),
            Err(SampleError::LatitudeOutOfRange(90.5))
        );
        assert_eq!(
            filter.validate(&PositionSample::new(0.0, -181.0)),
            Err(SampleError::LongitudeOutOfRange(-181.0))
        );
    }

    #[test]
    fn accuracy_limit() {
        let filter = SampleFilter {
            max_accuracy_meters: Some(25.0),
        };
        assert!(filter.validate(&PositionSample::new(1.0, 1.0).with_accuracy(25.0)).is_ok());
        assert_eq!(
            filter.validate(&PositionSample::new(1.0, 1.0).with_accuracy(40.0)),
            Err(SampleError::InaccurateFix {
                accuracy: 40.0,
                limit: 25.0
            })
        );
        assert!(filter
            .validate(&PositionSample::new(1.0, 1.0).with_accuracy(-1.0))
            .is_err());
    }

    #[test]
    fn permissive_filter_still_checks_coordinates() {
        let filter = SampleFilter::permissive();
        assert!(filter.validate(&PositionSample::new(1.0, 1.0).with_accuracy(5_000.0)).is_ok());
        assert!(filter.validate(&PositionSample::new(100.0, 1.0)).is_err());
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            SampleError::LatitudeOutOfRange(91.0).to_string(),
            "Latitude 91 is outside -90..90"
        );
        assert_eq!(
            SampleError::InaccurateFix {
                accuracy: 150.0,
                limit: 100.0
            }
            .to_string(),
            "Fix accuracy 150 m is worse than the accepted 100 m"
        );
    }
}
