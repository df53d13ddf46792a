//! Sensor host abstraction for hand tracking

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc;

use super::HandSample;
use crate::error::TrackingError;

/// Stream of hand samples in sensor order, both hands interleaved
pub type HandSampleStream = BoxStream<'static, HandSample>;

/// Source of hand samples.
///
/// Implemented by the host integration; tests supply scripted streams.
#[async_trait]
pub trait HandTrackingProvider: Send + Sync {
    /// Whether this host can track hands at all
    fn is_supported(&self) -> bool;

    /// Start a tracking session and hand back its sample stream
    async fn run(&self) -> Result<HandSampleStream, TrackingError>;

    /// Release sensor resources. Called by the detector on stop.
    fn stop(&self) {}
}

/// Sending half used by the host to push samples into a [`ChannelHandTracking`]
pub type HandSampleSender = mpsc::UnboundedSender<HandSample>;

/// Provider fed by the host over an in-process channel.
///
/// The channel backs a single session; a second `run` fails.
pub struct ChannelHandTracking {
    receiver: Mutex<Option<mpsc::UnboundedReceiver<HandSample>>>,
}

impl ChannelHandTracking {
    pub fn new() -> (Self, HandSampleSender) {
        let (tx, rx) = mpsc::unbounded_channel();
        let provider = Self {
            receiver: Mutex::new(Some(rx)),
        };
        (provider, tx)
    }
}

#[async_trait]
impl HandTrackingProvider for ChannelHandTracking {
    fn is_supported(&self) -> bool {
        true
    }

    async fn run(&self) -> Result<HandSampleStream, TrackingError> {
        let rx = self
            .receiver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or_else(|| {
                TrackingError::SessionFailed("sample channel already consumed".to_string())
            })?;

        let samples = stream::unfold(rx, |mut rx| async move {
            let sample = rx.recv().await?;
            Some((sample, rx))
        });
        Ok(samples.boxed())
    }
}

/// Provider for hosts without hand tracking
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedHandTracking;

#[async_trait]
impl HandTrackingProvider for UnsupportedHandTracking {
    fn is_supported(&self) -> bool {
        false
    }

    async fn run(&self) -> Result<HandSampleStream, TrackingError> {
        Err(TrackingError::Unsupported)
    }
}
