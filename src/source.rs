//! Subscription interface between position providers and tracking.
//!
//! A provider (browser geolocation, a replayed trace, a test) hands samples to
//! a callback until the returned [`Subscription`] is cancelled or dropped.

use crate::sample::PositionSample;
use crate::session::TrackingSession;
use futures::channel::mpsc::{self, UnboundedReceiver};
use futures::{Stream, StreamExt};
use log::debug;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

pub type SampleCallback = Box<dyn FnMut(PositionSample)>;

/// Receives errors a provider reports after delivery has started.
pub type ErrorCallback = Rc<dyn Fn(SourceError)>;

#[derive(Debug, Clone, PartialEq)]
pub enum SourceError {
    /// The host has no such capability, or refused to start it.
    Unavailable(String),
    PermissionDenied,
    PositionUnavailable(String),
    Timeout,
}

impl SourceError {
    /// Map a geolocation error code (1 denied, 2 unavailable, 3 timeout).
    pub fn from_position_error(code: u16, message: &str) -> Self {
        match code {
            1 => SourceError::PermissionDenied,
            3 => SourceError::Timeout,
            _ => SourceError::PositionUnavailable(message.to_string()),
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Unavailable(reason) => write!(f, "Source unavailable: {}", reason),
            SourceError::PermissionDenied => write!(f, "Location permission denied"),
            SourceError::PositionUnavailable(reason) => {
                write!(f, "Position unavailable: {}", reason)
            }
            SourceError::Timeout => write!(f, "Timed out waiting for a position"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Live registration with a provider. Delivery stops on drop.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

pub trait PositionSource {
    fn subscribe(&self, on_sample: SampleCallback) -> Result<Subscription, SourceError>;
}

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    active: Vec<(u64, SampleCallback)>,
    // ids cancelled while their callbacks were checked out for delivery
    cancelled: Vec<u64>,
    delivering: bool,
    // samples pushed from inside a callback, delivered after the current one
    pending: VecDeque<PositionSample>,
}

/// Push-driven source: every [`ManualSource::push`] reaches all live
/// subscribers synchronously, in subscription order. A push made from inside
/// a callback is queued and delivered once the current sample has reached
/// every subscriber.
#[derive(Clone, Default)]
pub struct ManualSource {
    subscribers: Rc<RefCell<Subscribers>>,
}

impl ManualSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().active.len()
    }

    pub fn push(&self, sample: PositionSample) {
        {
            let mut subs = self.subscribers.borrow_mut();
            if subs.delivering {
                subs.pending.push_back(sample);
                return;
            }
            subs.delivering = true;
        }

        let mut next = Some(sample);
        while let Some(sample) = next {
            self.deliver(sample);
            next = self.subscribers.borrow_mut().pending.pop_front();
        }
        self.subscribers.borrow_mut().delivering = false;
    }

    fn deliver(&self, sample: PositionSample) {
        let mut delivering = std::mem::take(&mut self.subscribers.borrow_mut().active);
        for (_, callback) in delivering.iter_mut() {
            callback(sample);
        }

        let mut subs = self.subscribers.borrow_mut();
        let cancelled = std::mem::take(&mut subs.cancelled);
        delivering.retain(|(id, _)| !cancelled.contains(id));
        // keep anyone who subscribed during delivery after the existing ones
        delivering.append(&mut subs.active);
        subs.active = delivering;
    }

    /// Push every sample in order.
    pub fn replay(&self, samples: impl IntoIterator<Item = PositionSample>) {
        for sample in samples {
            self.push(sample);
        }
    }
}

impl PositionSource for ManualSource {
    fn subscribe(&self, on_sample: SampleCallback) -> Result<Subscription, SourceError> {
        let id = {
            let mut subs = self.subscribers.borrow_mut();
            let id = subs.next_id;
            subs.next_id += 1;
            subs.active.push((id, on_sample));
            id
        };

        let subscribers = Rc::downgrade(&self.subscribers);
        Ok(Subscription::new(move || {
            let Some(subscribers) = subscribers.upgrade() else {
                return;
            };
            let mut subs = subscribers.borrow_mut();
            let before = subs.active.len();
            subs.active.retain(|(sid, _)| *sid != id);
            if subs.active.len() == before {
                subs.cancelled.push(id);
            }
        }))
    }
}

/// Forward a subscription into an unbounded stream of samples.
///
/// The stream ends once the subscription is dropped and every queued sample
/// has been read.
pub fn sample_stream(
    source: &dyn PositionSource,
) -> Result<(Subscription, UnboundedReceiver<PositionSample>), SourceError> {
    let (tx, rx) = mpsc::unbounded();
    let subscription = source.subscribe(Box::new(move |sample: PositionSample| {
        // receiver gone means nobody is tracking any more
        let _ = tx.unbounded_send(sample);
    }))?;
    Ok((subscription, rx))
}

/// Record every sample from `samples` into `session`, reporting each new
/// running total. Returns the final live distance when the stream ends.
///
/// The session is only borrowed while a sample is being recorded, so other
/// handlers may start or stop it between samples.
pub async fn drive_session<S>(
    mut samples: S,
    session: Rc<RefCell<TrackingSession>>,
    mut on_total: impl FnMut(f64),
) -> f64
where
    S: Stream<Item = PositionSample> + Unpin,
{
    while let Some(sample) = samples.next().await {
        let outcome = session.borrow_mut().record(sample);
        if let Some(total) = outcome.total() {
            on_total(total);
        }
    }
    debug!("Sample stream ended");
    let total = session.borrow().live_distance();
    total
}
