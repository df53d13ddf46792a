use async_stream::stream;
use async_trait::async_trait;
use futures::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use spatial_travel_oui::animation::HighlightAnimator;
use spatial_travel_oui::config::{InteractionConfig, PinchConfig};
use spatial_travel_oui::destination::{AppModel, DestinationSelector};
use spatial_travel_oui::error::TrackingError;
use spatial_travel_oui::globe::GlobeLayout;
use spatial_travel_oui::input::{
    Chirality, HandSample, HandSampleStream, HandTrackingProvider, InputArbiter, InputMethod,
    JointName, PinchDetector, PinchEvent, SelectionOutcome, SpatialInputHandler, StartOutcome,
};
use spatial_travel_oui::spatial::{Point3D, Transform};

/// Plays a fixed list of samples, optionally holding the session open
/// afterwards like a live sensor would.
struct ScriptedProvider {
    samples: Vec<HandSample>,
    hold_open: bool,
    stopped: Arc<AtomicBool>,
}

impl ScriptedProvider {
    fn new(samples: Vec<HandSample>, hold_open: bool) -> (Self, Arc<AtomicBool>) {
        let stopped = Arc::new(AtomicBool::new(false));
        let provider = Self {
            samples,
            hold_open,
            stopped: stopped.clone(),
        };
        (provider, stopped)
    }
}

#[async_trait]
impl HandTrackingProvider for ScriptedProvider {
    fn is_supported(&self) -> bool {
        true
    }

    async fn run(&self) -> Result<HandSampleStream, TrackingError> {
        let samples = self.samples.clone();
        let hold_open = self.hold_open;
        let stream = stream! {
            for sample in samples {
                yield sample;
            }
            if hold_open {
                futures::future::pending::<()>().await;
            }
        };
        Ok(stream.boxed())
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

struct FailingProvider;

#[async_trait]
impl HandTrackingProvider for FailingProvider {
    fn is_supported(&self) -> bool {
        true
    }

    async fn run(&self) -> Result<HandSampleStream, TrackingError> {
        Err(TrackingError::SessionFailed("sensor busy".to_string()))
    }
}

fn hand(chirality: Chirality, gap: f32) -> HandSample {
    HandSample::new(chirality, Transform::from_position(Point3D::new(0.1, 1.2, -0.5)))
        .with_joint(JointName::ThumbTip, Point3D::ORIGIN)
        .with_joint(JointName::IndexFingerTip, Point3D::new(gap, 0.0, 0.0))
}

#[tokio::test]
async fn scripted_session_runs_to_completion() {
    let samples = vec![
        hand(Chirality::Right, 0.05),
        hand(Chirality::Right, 0.01),
        hand(Chirality::Right, 0.012),
        hand(Chirality::Right, 0.04),
    ];
    let (provider, _) = ScriptedProvider::new(samples, false);
    let detector = PinchDetector::new(provider, PinchConfig::default());
    let mut events = detector.subscribe();

    assert_eq!(detector.start().await, Ok(StartOutcome::Finished));
    assert!(!detector.is_running());

    let mut received = Vec::new();
    while let Ok(event) = events.try_recv() {
        received.push(event);
    }
    assert_eq!(received.len(), 3);
    assert!(matches!(received[0], PinchEvent::Started { chirality: Chirality::Right, .. }));
    assert!(matches!(received[1], PinchEvent::Moved { chirality: Chirality::Right, .. }));
    assert_eq!(received[2], PinchEvent::Ended { chirality: Chirality::Right });

    let state = detector.pinch_state(Chirality::Right);
    assert!(!state.is_pinching);
    assert_eq!(state.position, None);
    assert!(detector.joint_position(JointName::ThumbTip, Chirality::Right).is_some());
}

#[tokio::test]
async fn stop_interrupts_a_live_session() {
    let (provider, stopped) = ScriptedProvider::new(vec![hand(Chirality::Left, 0.01)], true);
    let detector = Arc::new(PinchDetector::new(provider, PinchConfig::default()));
    let mut events = detector.subscribe();

    let session = tokio::spawn({
        let detector = detector.clone();
        async move { detector.start().await }
    });

    let started = tokio::time::timeout(Duration::from_secs(2), events.recv())
        .await
        .expect("pinch start within timeout")
        .expect("event channel open");
    assert!(matches!(started, PinchEvent::Started { chirality: Chirality::Left, .. }));
    assert!(detector.is_running());
    assert!(detector.is_pinching(Chirality::Left));

    detector.stop();
    assert!(!detector.is_pinching(Chirality::Left));
    assert!(detector.joint_position(JointName::ThumbTip, Chirality::Left).is_none());

    let outcome = tokio::time::timeout(Duration::from_secs(2), session)
        .await
        .expect("session ends after stop")
        .expect("session task did not panic");
    assert_eq!(outcome, Ok(StartOutcome::Stopped));
    assert!(stopped.load(Ordering::SeqCst));
    assert_eq!(events.recv().await, Some(PinchEvent::Ended { chirality: Chirality::Left }));

    detector.stop();
    assert!(!detector.is_running());
}

#[tokio::test]
async fn provider_failure_is_reported() {
    let detector = PinchDetector::new(FailingProvider, PinchConfig::default());
    assert_eq!(
        detector.start().await,
        Err(TrackingError::SessionFailed("sensor busy".to_string()))
    );
    assert!(!detector.is_running());
}

#[tokio::test]
async fn gaze_tap_selects_destination() {
    let config = InteractionConfig::default();
    let mut model = AppModel::default();
    model.load_destinations().await;

    let layout = GlobeLayout::from_config(&config);
    let markers = layout.markers(model.destinations());
    let mut animator = HighlightAnimator::new(config.highlight.clone());
    layout.register_markers(&markers, &mut animator);

    let target = &markers[2];
    assert!(animator.set_highlighted(target.entity, true));
    for _ in 0..60 {
        animator.tick();
    }
    let scale = animator.scale(target.entity).unwrap();
    assert!(scale > 1.49 && scale <= 1.5);

    let mut arbiter = InputArbiter::new(config.drag.clone());
    let highlight = animator.highlight(target.entity).cloned();
    let outcome = arbiter.handle_tap(highlight.as_ref(), &mut model);

    assert_eq!(outcome, SelectionOutcome::Selected(target.destination_id));
    assert_eq!(model.selected().map(|d| d.id), Some(target.destination_id));
    assert!(model.is_showing_detail());
    assert_eq!(arbiter.active_method(), InputMethod::Gesture);
}

#[tokio::test]
async fn stale_marker_leaves_selection_alone() {
    let mut model = AppModel::default();
    model.load_destinations().await;
    let first = model.destinations()[0].clone();
    model.select_destination(first.clone());

    let mut arbiter = InputArbiter::default();
    let stale = spatial_travel_oui::GazeHighlight::new("00000000-0000-0000-0000-000000000000");
    let outcome = arbiter.handle_tap(Some(&stale), &mut model);

    assert!(matches!(outcome, SelectionOutcome::Unresolved { .. }));
    assert_eq!(model.selected(), Some(&first));
}
