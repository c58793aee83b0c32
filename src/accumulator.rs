//! Running great-circle distance over a stream of fixes.

use crate::geo::{haversine_distance_meters, Position};

/// Sums the haversine distance between consecutive positions.
///
/// The total never decreases: each new position adds the distance from the
/// previous one, and the very first position only anchors the path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceAccumulator {
    last_position: Option<Position>,
    cumulative_distance_meters: f64,
}

impl DistanceAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous position and zero the total.
    pub fn reset(&mut self) {
        self.last_position = None;
        self.cumulative_distance_meters = 0.0;
    }

    /// Feed one position and return the updated total in metres.
    pub fn add_sample(&mut self, position: Position) -> f64 {
        if let Some(last) = self.last_position {
            self.cumulative_distance_meters += haversine_distance_meters(&last, &position);
        }
        self.last_position = Some(position);
        self.cumulative_distance_meters
    }

    pub fn current_total(&self) -> f64 {
        self.cumulative_distance_meters
    }

    pub fn has_prior_sample(&self) -> bool {
        self.last_position.is_some()
    }

    pub fn last_position(&self) -> Option<Position> {
        self.last_position
    }
}

impl Extend<Position> for DistanceAccumulator {
    fn extend<I: IntoIterator<Item = Position>>(&mut self, iter: I) {
        for position in iter {
            self.add_sample(position);
        }
    }
}

impl FromIterator<Position> for DistanceAccumulator {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}
