//! Scripted sensor input for headless sessions

use async_stream::stream;
use async_trait::async_trait;
use futures::StreamExt;
use std::time::Duration;

use spatial_travel_oui::{
    error::TrackingError,
    input::{Chirality, HandSample, HandSampleStream, HandTrackingProvider, JointName},
    spatial::{Point3D, Transform, Vector3D},
};

use crate::handlers::SessionEvent;

/// Plays back a fixed sequence of hand samples
pub struct ScriptedHands {
    samples: Vec<HandSample>,
    interval: Duration,
}

impl ScriptedHands {
    pub fn new(samples: Vec<HandSample>) -> Self {
        Self {
            samples,
            interval: Duration::ZERO,
        }
    }

    /// Pause between samples, roughly a sensor frame period
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Right hand reaches in, pinches, drags a little, releases and
    /// leaves the sensor's view
    pub fn pinch_and_release() -> Self {
        let root = Point3D::new(0.15, 1.1, -0.45);
        Self::new(vec![
            hand(Chirality::Right, root, 0.06),
            hand(Chirality::Right, root, 0.03),
            hand(Chirality::Right, root, 0.01),
            hand(Chirality::Right, root + Vector3D::new(0.02, 0.0, 0.0), 0.012),
            hand(Chirality::Right, root + Vector3D::new(0.04, 0.0, 0.0), 0.05),
            HandSample::lost(Chirality::Right),
        ])
    }
}

#[async_trait]
impl HandTrackingProvider for ScriptedHands {
    fn is_supported(&self) -> bool {
        true
    }

    async fn run(&self) -> Result<HandSampleStream, TrackingError> {
        let samples = self.samples.clone();
        let interval = self.interval;
        let stream = stream! {
            for sample in samples {
                if !interval.is_zero() {
                    tokio::time::sleep(interval).await;
                }
                yield sample;
            }
        };
        Ok(stream.boxed())
    }
}

/// Thumb and index tips `gap` apart, both tracked
fn hand(chirality: Chirality, root: Point3D, gap: f32) -> HandSample {
    HandSample::new(chirality, Transform::from_position(root))
        .with_joint(JointName::Wrist, Point3D::new(0.0, -0.08, 0.05))
        .with_joint(JointName::ThumbTip, Point3D::ORIGIN)
        .with_joint(JointName::IndexFingerTip, Point3D::new(gap, 0.0, 0.0))
}

/// Host gestures for a short tour: spin the globe, look around, pick the
/// destination named `pick`
pub fn gesture_tour(glance: &[&str], pick: &str, ticks: u32) -> Vec<SessionEvent> {
    let mut events = vec![
        SessionEvent::Drag(Vector3D::new(120.0, 0.0, 0.0)),
        SessionEvent::Drag(Vector3D::new(-40.0, 10.0, 0.0)),
    ];
    for name in glance {
        events.push(SessionEvent::GazeAt((*name).to_string()));
        events.push(SessionEvent::Tick(ticks / 4));
    }
    events.push(SessionEvent::GazeAt(pick.to_string()));
    events.push(SessionEvent::Tick(ticks));
    events.push(SessionEvent::Tap);
    events
}
