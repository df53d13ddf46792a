//! Pinch detection from streamed hand skeletons
//!
//! Each hand runs an independent state machine:
//!
//! ```text
//! NotTracked ──tracked sample──▶ Tracked { pinch }
//!     ▲                              │
//!     └────────untracked sample──────┘
//! ```
//!
//! While tracked, a sample with both thumb tip and index tip tracked decides
//! the pinch: tips closer than the threshold pinch at their midpoint,
//! otherwise the pinch is released and its position cleared. Samples
//! missing either tip leave the pinch untouched.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use futures::StreamExt;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, trace, warn};

use super::{Chirality, HandSample, HandTrackingProvider, JointName};
use crate::config::PinchConfig;
use crate::error::TrackingError;
use crate::spatial::Point3D;

/// Pinch status of one hand
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PinchState {
    pub is_pinching: bool,
    /// Midpoint between thumb and index tips; `None` whenever not pinching
    pub position: Option<Point3D>,
}

impl PinchState {
    fn pinching_at(position: Point3D) -> Self {
        Self {
            is_pinching: true,
            position: Some(position),
        }
    }
}

/// Tracking state of one hand
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HandTrackingState {
    #[default]
    NotTracked,
    Tracked {
        /// Latest sample, kept for joint lookups
        sample: HandSample,
        pinch: PinchState,
    },
}

impl HandTrackingState {
    pub fn pinch(&self) -> PinchState {
        match self {
            HandTrackingState::NotTracked => PinchState::default(),
            HandTrackingState::Tracked { pinch, .. } => *pinch,
        }
    }

    pub fn is_tracked(&self) -> bool {
        matches!(self, HandTrackingState::Tracked { .. })
    }
}

/// Pinch transitions, published to subscribers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinchEvent {
    Started { chirality: Chirality, position: Point3D },
    Moved { chirality: Chirality, position: Point3D },
    Ended { chirality: Chirality },
}

impl PinchEvent {
    pub fn chirality(&self) -> Chirality {
        match self {
            PinchEvent::Started { chirality, .. }
            | PinchEvent::Moved { chirality, .. }
            | PinchEvent::Ended { chirality } => *chirality,
        }
    }

    pub fn position(&self) -> Option<Point3D> {
        match self {
            PinchEvent::Started { position, .. } | PinchEvent::Moved { position, .. } => {
                Some(*position)
            }
            PinchEvent::Ended { .. } => None,
        }
    }
}

/// How a call to [`PinchDetector::start`] ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The host cannot track hands; the detector stays inactive
    Unsupported,
    /// The sample stream ran dry
    Finished,
    /// [`PinchDetector::stop`] was called
    Stopped,
}

#[derive(Debug, Default)]
struct Hands {
    left: HandTrackingState,
    right: HandTrackingState,
    /// Id of the consuming session, `None` when idle
    session: Option<u64>,
}

impl Hands {
    fn get(&self, chirality: Chirality) -> &HandTrackingState {
        match chirality {
            Chirality::Left => &self.left,
            Chirality::Right => &self.right,
        }
    }

    fn get_mut(&mut self, chirality: Chirality) -> &mut HandTrackingState {
        match chirality {
            Chirality::Left => &mut self.left,
            Chirality::Right => &mut self.right,
        }
    }
}

/// Compute the next state of a hand from a new sample.
fn transition(
    current: &HandTrackingState,
    sample: HandSample,
    threshold: f32,
) -> (HandTrackingState, Option<PinchEvent>) {
    let chirality = sample.chirality;
    let previous = current.pinch();

    if !sample.tracked {
        let event = previous.is_pinching.then_some(PinchEvent::Ended { chirality });
        return (HandTrackingState::NotTracked, event);
    }

    let thumb = sample.joint_world_position(JointName::ThumbTip);
    let index = sample.joint_world_position(JointName::IndexFingerTip);

    let pinch = match (thumb, index) {
        (Some(thumb), Some(index)) if thumb.distance(&index) < threshold => {
            PinchState::pinching_at(thumb.midpoint(&index))
        }
        (Some(_), Some(_)) => PinchState::default(),
        _ => {
            trace!(hand = %chirality, "Pinch joints not tracked, keeping previous pinch state");
            previous
        }
    };

    let event = match (previous.is_pinching, pinch.is_pinching, pinch.position) {
        (false, true, Some(position)) => Some(PinchEvent::Started { chirality, position }),
        (true, true, Some(position)) if previous.position != Some(position) => {
            Some(PinchEvent::Moved { chirality, position })
        }
        (true, false, _) => Some(PinchEvent::Ended { chirality }),
        _ => None,
    };

    (HandTrackingState::Tracked { sample, pinch }, event)
}

/// Classifies pinches for both hands from a single sample stream.
///
/// State is shared between the consuming task and readers; readers always
/// receive copies.
pub struct PinchDetector {
    provider: Arc<dyn HandTrackingProvider>,
    config: PinchConfig,
    hands: RwLock<Hands>,
    next_session: AtomicU64,
    stop_signal: watch::Sender<u64>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<PinchEvent>>>,
}

impl PinchDetector {
    pub fn new(provider: impl HandTrackingProvider + 'static, config: PinchConfig) -> Self {
        Self::with_provider(Arc::new(provider), config)
    }

    pub fn with_provider(provider: Arc<dyn HandTrackingProvider>, config: PinchConfig) -> Self {
        let (stop_signal, _) = watch::channel(0);
        Self {
            provider,
            config,
            hands: RwLock::new(Hands::default()),
            next_session: AtomicU64::new(1),
            stop_signal,
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &PinchConfig {
        &self.config
    }

    fn read(&self) -> RwLockReadGuard<'_, Hands> {
        self.hands.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Hands> {
        self.hands.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Receive pinch transitions from now on
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<PinchEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    fn publish(&self, events: impl IntoIterator<Item = PinchEvent>) {
        let mut subscribers = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        for event in events {
            debug!(?event, "Pinch transition");
            subscribers.retain(|tx| tx.send(event).is_ok());
        }
    }

    /// Consume the provider's sample stream until it ends or [`stop`] is called.
    ///
    /// An unsupported host is not an error: the detector stays inactive and
    /// `Ok(StartOutcome::Unsupported)` is returned. Only one session may run
    /// at a time.
    ///
    /// [`stop`]: PinchDetector::stop
    pub async fn start(&self) -> Result<StartOutcome, TrackingError> {
        if !self.provider.is_supported() {
            warn!("Hand tracking not supported on this host, pinch detection disabled");
            return Ok(StartOutcome::Unsupported);
        }

        let mut stop_rx = self.stop_signal.subscribe();
        let session = {
            let mut hands = self.write();
            if hands.session.is_some() {
                return Err(TrackingError::SessionFailed(
                    "hand tracking session already running".to_string(),
                ));
            }
            let id = self.next_session.fetch_add(1, Ordering::Relaxed);
            hands.session = Some(id);
            id
        };

        let mut samples = match self.provider.run().await {
            Ok(samples) => samples,
            Err(err) => {
                self.end_session(session);
                return match err {
                    TrackingError::Unsupported => {
                        warn!("Hand tracking provider reported unsupported host");
                        Ok(StartOutcome::Unsupported)
                    }
                    other => {
                        warn!(error = %other, "Failed to start hand tracking");
                        Err(other)
                    }
                };
            }
        };

        info!(session, "Hand tracking started");

        let outcome = loop {
            tokio::select! {
                _ = stop_rx.changed() => break StartOutcome::Stopped,
                next = samples.next() => match next {
                    Some(sample) => {
                        if !self.apply_in_session(session, sample) {
                            break StartOutcome::Stopped;
                        }
                    }
                    None => break StartOutcome::Finished,
                },
            }
        };

        self.end_session(session);
        info!(session, ?outcome, "Hand tracking session ended");
        Ok(outcome)
    }

    fn end_session(&self, session: u64) {
        let mut hands = self.write();
        if hands.session == Some(session) {
            hands.session = None;
        }
    }

    /// Apply a sample only while `session` is the live one, so nothing a
    /// consumer pulled before `stop` can land after it.
    fn apply_in_session(&self, session: u64, sample: HandSample) -> bool {
        let event = {
            let mut hands = self.write();
            if hands.session != Some(session) {
                return false;
            }
            self.apply_locked(&mut hands, sample)
        };
        self.publish(event);
        true
    }

    fn apply_locked(&self, hands: &mut Hands, sample: HandSample) -> Option<PinchEvent> {
        let slot = hands.get_mut(sample.chirality);
        let (next, event) = transition(slot, sample, self.config.threshold);
        *slot = next;
        event
    }

    /// Feed one sample directly, bypassing the provider stream.
    pub fn process_sample(&self, sample: HandSample) -> Option<PinchEvent> {
        let event = {
            let mut hands = self.write();
            self.apply_locked(&mut hands, sample)
        };
        self.publish(event);
        event
    }

    /// Stop consuming samples and clear both hands.
    ///
    /// Idempotent. Readers observe the cleared state as soon as this returns,
    /// even if the consuming task has not unwound yet.
    pub fn stop(&self) {
        let (was_running, ended) = {
            let mut hands = self.write();
            let was_running = hands.session.take().is_some();
            let ended: Vec<PinchEvent> = Chirality::ALL
                .into_iter()
                .filter(|c| hands.get(*c).pinch().is_pinching)
                .map(|chirality| PinchEvent::Ended { chirality })
                .collect();
            hands.left = HandTrackingState::NotTracked;
            hands.right = HandTrackingState::NotTracked;
            (was_running, ended)
        };

        self.stop_signal.send_modify(|generation| *generation = generation.wrapping_add(1));
        self.publish(ended);

        if was_running {
            self.provider.stop();
            info!("Hand tracking stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.read().session.is_some()
    }

    /// Copy of a hand's full tracking state
    pub fn hand_state(&self, chirality: Chirality) -> HandTrackingState {
        self.read().get(chirality).clone()
    }

    pub fn pinch_state(&self, chirality: Chirality) -> PinchState {
        self.read().get(chirality).pinch()
    }

    pub fn is_pinching(&self, chirality: Chirality) -> bool {
        self.pinch_state(chirality).is_pinching
    }

    /// First hand currently pinching, left before right
    pub fn active_pinch(&self) -> Option<(Chirality, Point3D)> {
        let hands = self.read();
        Chirality::ALL.into_iter().find_map(|chirality| {
            let pinch = hands.get(chirality).pinch();
            pinch.position.filter(|_| pinch.is_pinching).map(|p| (chirality, p))
        })
    }

    /// World position of a joint from the latest sample of that hand
    pub fn joint_position(&self, joint: JointName, chirality: Chirality) -> Option<Point3D> {
        match self.read().get(chirality) {
            HandTrackingState::Tracked { sample, .. } => sample.joint_world_position(joint),
            HandTrackingState::NotTracked => None,
        }
    }
}
