//! Hand input: skeleton samples, the tracking provider seam, pinch
//! detection and input-method arbitration

mod arbiter;
mod hand;
mod pinch;
mod provider;

pub use arbiter::{
    InputArbiter, InputMethod, SelectionIntent, SelectionOutcome, SpatialInputHandler,
};
pub use hand::{Chirality, HandSample, Joint, JointName};
pub use pinch::{HandTrackingState, PinchDetector, PinchEvent, PinchState, StartOutcome};
pub use provider::{
    ChannelHandTracking, HandSampleSender, HandSampleStream, HandTrackingProvider,
    UnsupportedHandTracking,
};
