//! Live tracking sessions and the log of completed walks.

use crate::accumulator::DistanceAccumulator;
use crate::pace::average_pace;
use crate::sample::{PositionSample, SampleError, SampleFilter};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// What happened to a sample handed to [`TrackingSession::record`].
#[derive(Debug, Clone, PartialEq)]
pub enum SampleOutcome {
    /// The session is not tracking.
    Ignored,
    Rejected(SampleError),
    /// First accepted fix of the session; the path starts here.
    Anchored { total: f64 },
    Advanced { increment: f64, total: f64 },
}

impl SampleOutcome {
    /// Running total after this sample, if the sample was accumulated.
    pub fn total(&self) -> Option<f64> {
        match self {
            SampleOutcome::Anchored { total } | SampleOutcome::Advanced { total, .. } => {
                Some(*total)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub distance_meters: f64,
    pub walk_minutes: f64,
    /// Accepted fixes, the anchor included.
    pub fixes: usize,
}

/// One start/stop tracking session. Owns its accumulator exclusively.
#[derive(Debug, Clone, Default)]
pub struct TrackingSession {
    accumulator: DistanceAccumulator,
    filter: SampleFilter,
    started_at_ms: Option<f64>,
    fixes: usize,
}

impl TrackingSession {
    pub fn new(filter: SampleFilter) -> Self {
        Self {
            accumulator: DistanceAccumulator::new(),
            filter,
            started_at_ms: None,
            fixes: 0,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.started_at_ms.is_some()
    }

    /// Begin a fresh session at `now_ms`. Restarts if already tracking.
    pub fn start(&mut self, now_ms: f64) {
        if self.is_tracking() {
            debug!("Restarting tracking session");
        }
        self.accumulator.reset();
        self.fixes = 0;
        self.started_at_ms = Some(now_ms);
        info!("Tracking started");
    }

    pub fn record(&mut self, sample: PositionSample) -> SampleOutcome {
        if !self.is_tracking() {
            return SampleOutcome::Ignored;
        }

        let position = match self.filter.validate(&sample) {
            Ok(p) => p,
            Err(e) => {
                warn!("Dropping position sample: {}", e);
                return SampleOutcome::Rejected(e);
            }
        };

        self.fixes += 1;
        if !self.accumulator.has_prior_sample() {
            let total = self.accumulator.add_sample(position);
            debug!("Anchored session at {:?}", position);
            return SampleOutcome::Anchored { total };
        }

        let before = self.accumulator.current_total();
        let total = self.accumulator.add_sample(position);
        SampleOutcome::Advanced {
            increment: total - before,
            total,
        }
    }

    /// End the session. Returns `None` when nothing was being tracked.
    pub fn stop(&mut self, now_ms: f64) -> Option<SessionSummary> {
        let started = self.started_at_ms.take()?;
        let summary = SessionSummary {
            distance_meters: self.accumulator.current_total(),
            walk_minutes: ((now_ms - started) / 60_000.0).max(0.0),
            fixes: self.fixes,
        };
        info!(
            "Tracking stopped: {:.2} m in {:.2} min",
            summary.distance_meters, summary.walk_minutes
        );
        Some(summary)
    }

    pub fn live_distance(&self) -> f64 {
        self.accumulator.current_total()
    }
}

/// Totals over every completed session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalkLog {
    sessions: Vec<SessionSummary>,
}

impl WalkLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a completed session. Sessions without a single fix say nothing
    /// about distance and are left out; returns whether it was kept.
    pub fn record(&mut self, summary: SessionSummary) -> bool {
        if summary.fixes == 0 {
            debug!("Skipping session without fixes");
            return false;
        }
        self.sessions.push(summary);
        true
    }

    pub fn sessions(&self) -> &[SessionSummary] {
        &self.sessions
    }

    pub fn total_distance_meters(&self) -> f64 {
        self.sessions.iter().map(|s| s.distance_meters).sum()
    }

    pub fn total_walk_minutes(&self) -> f64 {
        self.sessions.iter().map(|s| s.walk_minutes).sum()
    }

    pub fn average_pace(&self) -> Option<f64> {
        average_pace(self.total_walk_minutes(), self.total_distance_meters())
    }
}
