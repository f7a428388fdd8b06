//! Versioned pose model and validation.
//!
//! A [`Pose`] is a complete or partial snapshot of skeletal rotation state:
//! a mapping from bone name to Euler rotation in degrees. Bone order is the
//! insertion order of the mapping and is preserved through serialization,
//! which keeps apply reports deterministic.

use std::fmt;

use chrono::{DateTime, Utc};
use glam::{EulerRot, Quat};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::EngineResult;
use crate::math::{degrees_to_radians, lerp, normalize_angle, radians_to_degrees};

/// Default pose schema version.
pub const DEFAULT_POSE_VERSION: &str = "1.0";

/// Default rig compatibility tag.
pub const DEFAULT_RIG_TYPE: &str = "humanoid-v2";

/// Bone name to rotation, in insertion order.
pub type BoneMap = IndexMap<String, BoneRotation>;

/// Euler rotation of a single bone, in degrees (XYZ order).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoneRotation {
    /// Rotation about X in degrees.
    pub x: f32,
    /// Rotation about Y in degrees.
    pub y: f32,
    /// Rotation about Z in degrees.
    pub z: f32,
}

impl BoneRotation {
    /// The identity rotation.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a rotation from its three angles in degrees.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Whether every component is finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Fold every component into `(-180, 180]`.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self::new(
            normalize_angle(self.x),
            normalize_angle(self.y),
            normalize_angle(self.z),
        )
    }

    /// Componentwise linear interpolation towards `other`.
    ///
    /// This is Euler interpolation, not a slerp: across the ±180° seam it
    /// takes the long way round.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            lerp(self.x, other.x, t),
            lerp(self.y, other.y, t),
            lerp(self.z, other.z, t),
        )
    }

    /// Convert to a quaternion using intrinsic XYZ order.
    #[must_use]
    pub fn to_quat(self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            degrees_to_radians(self.x),
            degrees_to_radians(self.y),
            degrees_to_radians(self.z),
        )
    }

    /// Decompose a quaternion into normalized XYZ Euler degrees.
    ///
    /// At exactly ±90° about Y the decomposition is ambiguous (gimbal lock);
    /// any equivalent triple may come back.
    #[must_use]
    pub fn from_quat(orientation: Quat) -> Self {
        let (x, y, z) = orientation.to_euler(EulerRot::XYZ);
        Self::new(
            radians_to_degrees(x),
            radians_to_degrees(y),
            radians_to_degrees(z),
        )
        .normalized()
    }

    /// Components paired with their axis.
    #[must_use]
    pub fn axes(self) -> [(Axis, f32); 3] {
        [(Axis::X, self.x), (Axis::Y, self.y), (Axis::Z, self.z)]
    }
}

/// A rotation axis, used to pinpoint validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis.
    Y,
    /// Z axis.
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        };
        f.write_str(name)
    }
}

/// Optional authorship information carried by pose files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseMetadata {
    /// Free-form author name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Creation time (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A named, versioned mapping from bone identifier to rotation.
///
/// `version` and `rig_type` are opaque compatibility tags; the engine carries
/// them but never enforces them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pose {
    /// Schema version tag.
    #[serde(default = "Pose::default_version")]
    pub version: String,
    /// Rig compatibility tag.
    #[serde(default = "Pose::default_rig_type")]
    pub rig_type: String,
    /// Optional authorship information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PoseMetadata>,
    /// Per-bone rotations.
    pub bones: BoneMap,
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(BoneMap::new())
    }
}

impl Pose {
    fn default_version() -> String {
        DEFAULT_POSE_VERSION.to_string()
    }

    fn default_rig_type() -> String {
        DEFAULT_RIG_TYPE.to_string()
    }

    /// Create a pose with the default version and rig tags.
    #[must_use]
    pub fn new(bones: BoneMap) -> Self {
        Self {
            version: Self::default_version(),
            rig_type: Self::default_rig_type(),
            metadata: None,
            bones,
        }
    }

    /// Build a pose from `(name, rotation)` pairs, keeping their order.
    #[must_use]
    pub fn from_bones<I, S>(bones: I) -> Self
    where
        I: IntoIterator<Item = (S, BoneRotation)>,
        S: Into<String>,
    {
        Self::new(bones.into_iter().map(|(n, r)| (n.into(), r)).collect())
    }

    /// Set the rig compatibility tag.
    #[must_use]
    pub fn with_rig_type(mut self, rig_type: impl Into<String>) -> Self {
        self.rig_type = rig_type.into();
        self
    }

    /// Set the metadata block.
    #[must_use]
    pub fn with_metadata(mut self, metadata: PoseMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Number of bones in the pose.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    /// Whether the pose has no bones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// A copy with every rotation folded into `(-180, 180]`.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut pose = self.clone();
        for rotation in pose.bones.values_mut() {
            *rotation = rotation.normalized();
        }
        pose
    }

    /// Check the pose against the interchange schema.
    ///
    /// Every offending component is reported, not just the first.
    ///
    /// # Errors
    ///
    /// Returns [`PoseValidationError`] listing each issue found.
    pub fn validate(&self) -> Result<(), PoseValidationError> {
        let mut issues = Vec::new();
        for (bone, rotation) in &self.bones {
            if bone.trim().is_empty() {
                issues.push(ValidationIssue::EmptyBoneName);
            }
            for (axis, value) in rotation.axes() {
                if !value.is_finite() {
                    issues.push(ValidationIssue::NonFinite {
                        bone: bone.clone(),
                        axis,
                    });
                } else if !(-180.0..=180.0).contains(&value) {
                    issues.push(ValidationIssue::OutOfRange {
                        bone: bone.clone(),
                        axis,
                        value,
                    });
                }
            }
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(PoseValidationError { issues })
        }
    }

    /// Blend two poses componentwise.
    ///
    /// `alpha` is clamped to `[0, 1]` (NaN counts as 0). The key set of `a`
    /// is authoritative: bones only in `b` are ignored, and bones missing
    /// from `b` keep `a`'s rotation outright.
    #[must_use]
    pub fn blend(a: &Self, b: &Self, alpha: f32) -> Self {
        let alpha = if alpha.is_nan() {
            0.0
        } else {
            alpha.clamp(0.0, 1.0)
        };
        let bones = a
            .bones
            .iter()
            .map(|(name, rot_a)| {
                let blended = match b.bones.get(name) {
                    Some(rot_b) => rot_a.lerp(*rot_b, alpha),
                    None => *rot_a,
                };
                (name.clone(), blended)
            })
            .collect();
        Self {
            version: a.version.clone(),
            rig_type: a.rig_type.clone(),
            metadata: None,
            bones,
        }
    }

    /// Parse and validate a pose file.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the pose fails validation.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let pose: Self = serde_json::from_str(json)?;
        pose.validate()?;
        Ok(pose)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A single schema violation in a pose.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    /// A bone has an empty or whitespace-only name.
    EmptyBoneName,
    /// A rotation component is NaN or infinite.
    NonFinite {
        /// Offending bone.
        bone: String,
        /// Offending axis.
        axis: Axis,
    },
    /// A rotation component lies outside `[-180, 180]`.
    OutOfRange {
        /// Offending bone.
        bone: String,
        /// Offending axis.
        axis: Axis,
        /// The rejected value.
        value: f32,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBoneName => f.write_str("bone name must not be empty"),
            Self::NonFinite { bone, axis } => {
                write!(f, "{bone}.{axis} is not a finite number")
            }
            Self::OutOfRange { bone, axis, value } => {
                write!(f, "{bone}.{axis} = {value} is outside [-180, 180]")
            }
        }
    }
}

/// A pose failed validation.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Pose failed validation: {}", join_issues(.issues))]
pub struct PoseValidationError {
    /// Every issue found, in bone order.
    pub issues: Vec<ValidationIssue>,
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
