//! Hand skeleton samples delivered by the sensor host

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::spatial::{Point3D, Transform};

/// Which hand a sample belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chirality {
    Left,
    Right,
}

impl Chirality {
    pub const ALL: [Chirality; 2] = [Chirality::Left, Chirality::Right];
}

impl fmt::Display for Chirality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chirality::Left => f.write_str("left"),
            Chirality::Right => f.write_str("right"),
        }
    }
}

/// Joints of the tracked hand skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointName {
    Wrist,
    ThumbKnuckle,
    ThumbIntermediateBase,
    ThumbIntermediateTip,
    ThumbTip,
    IndexFingerMetacarpal,
    IndexFingerKnuckle,
    IndexFingerIntermediateBase,
    IndexFingerIntermediateTip,
    IndexFingerTip,
    MiddleFingerMetacarpal,
    MiddleFingerKnuckle,
    MiddleFingerIntermediateBase,
    MiddleFingerIntermediateTip,
    MiddleFingerTip,
    RingFingerMetacarpal,
    RingFingerKnuckle,
    RingFingerIntermediateBase,
    RingFingerIntermediateTip,
    RingFingerTip,
    LittleFingerMetacarpal,
    LittleFingerKnuckle,
    LittleFingerIntermediateBase,
    LittleFingerIntermediateTip,
    LittleFingerTip,
    ForearmWrist,
    ForearmArm,
}

/// One joint of a sample, expressed in the hand anchor's frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    pub anchor_from_joint: Transform,
    pub tracked: bool,
}

impl Joint {
    pub fn tracked(anchor_from_joint: Transform) -> Self {
        Self {
            anchor_from_joint,
            tracked: true,
        }
    }

    pub fn untracked(anchor_from_joint: Transform) -> Self {
        Self {
            anchor_from_joint,
            tracked: false,
        }
    }
}

/// A single sensor frame for one hand.
///
/// Frames: `origin` is the world, `anchor` is the hand root reported by the
/// sensor, each joint has its own frame relative to the anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandSample {
    pub chirality: Chirality,
    pub tracked: bool,
    pub origin_from_anchor: Transform,
    pub joints: HashMap<JointName, Joint>,
}

impl HandSample {
    /// A tracked hand with no joints yet
    pub fn new(chirality: Chirality, origin_from_anchor: Transform) -> Self {
        Self {
            chirality,
            tracked: true,
            origin_from_anchor,
            joints: HashMap::new(),
        }
    }

    /// A sample reporting the hand as lost
    pub fn lost(chirality: Chirality) -> Self {
        Self {
            chirality,
            tracked: false,
            origin_from_anchor: Transform::identity(),
            joints: HashMap::new(),
        }
    }

    /// Add a tracked joint at `position` in the anchor frame
    pub fn with_joint(mut self, name: JointName, position: Point3D) -> Self {
        self.joints.insert(name, Joint::tracked(Transform::from_position(position)));
        self
    }

    /// Add a joint the sensor reported but could not track this frame
    pub fn with_untracked_joint(mut self, name: JointName, position: Point3D) -> Self {
        self.joints.insert(name, Joint::untracked(Transform::from_position(position)));
        self
    }

    /// World-space position of a joint, if the hand and joint are tracked.
    ///
    /// Computed as `origin_from_anchor ∘ anchor_from_joint` applied to the
    /// joint origin.
    pub fn joint_world_position(&self, name: JointName) -> Option<Point3D> {
        if !self.tracked {
            return None;
        }
        let joint = self.joints.get(&name).filter(|j| j.tracked)?;
        Some(self.origin_from_anchor.compose(&joint.anchor_from_joint).position)
    }
}
