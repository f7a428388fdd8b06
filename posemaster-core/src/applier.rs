//! Pose application engine.
//!
//! Projects a [`Pose`] onto a [`SkeletonIndex`] and reads rotations back.
//!
//! ## Failure semantics
//!
//! ```text
//! bone missing from rig      -> failed_bones + warning, success stays true
//! bone rejects orientation   -> failed_bones + warning, success = false
//! ```
//!
//! A pose that only partially fits a rig still applies every bone it can.
//! Only a bone that exists but refuses its orientation marks the whole
//! application as failed, since that points at bad data rather than an
//! ordinary rig mismatch.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::bone::normalize_bone_name;
use crate::pose::{BoneRotation, Pose};
use crate::skeleton::{Bone, SkeletonIndex};

/// How pose bone names are matched against skeleton bones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoneLookup {
    /// Match raw names only.
    #[default]
    Raw,
    /// Match raw names, then fall back to the canonical name.
    RawThenCanonical,
}

/// Configuration for pose application.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyConfig {
    /// Bone name matching strategy.
    pub lookup: BoneLookup,
}

/// Outcome of applying a pose to a skeleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyReport {
    /// False only if a bone rejected its orientation.
    pub success: bool,
    /// Number of bones whose orientation was assigned.
    pub applied_bones: usize,
    /// Bones that were missing or rejected, in pose order.
    pub failed_bones: Vec<String>,
    /// Human-readable explanation per failure, in pose order.
    pub warnings: Vec<String>,
}

impl Default for ApplyReport {
    fn default() -> Self {
        Self {
            success: true,
            applied_bones: 0,
            failed_bones: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl ApplyReport {
    /// Whether every bone in the pose was applied.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.success && self.failed_bones.is_empty()
    }
}

/// Applies poses to skeletons.
#[derive(Debug, Clone, Default)]
pub struct PoseApplier {
    config: ApplyConfig,
}

impl PoseApplier {
    /// Create an applier with raw-name lookup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an applier with a custom configuration.
    #[must_use]
    pub fn with_config(config: ApplyConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ApplyConfig {
        &self.config
    }

    /// Apply every bone of `pose` to `skeleton`.
    ///
    /// Angles are normalized before conversion. Bones of the skeleton that the
    /// pose does not mention are left untouched.
    pub fn apply_pose(&self, pose: &Pose, skeleton: &mut SkeletonIndex) -> ApplyReport {
        let mut report = ApplyReport::default();

        for (name, rotation) in &pose.bones {
            let Some(bone) = self.resolve(skeleton, name) else {
                tracing::warn!("Bone not found in rig: {name}");
                report.failed_bones.push(name.clone());
                report.warnings.push(format!("Bone not found in rig: {name}"));
                continue;
            };

            match bone.set_orientation(rotation.normalized().to_quat()) {
                Ok(()) => report.applied_bones += 1,
                Err(e) => {
                    tracing::error!("Failed to apply rotation to {name}: {e}");
                    report.success = false;
                    report.failed_bones.push(name.clone());
                    report
                        .warnings
                        .push(format!("Failed to apply rotation to {name}: {e}"));
                }
            }
        }

        tracing::debug!(
            "Applied {} of {} bones ({} failed)",
            report.applied_bones,
            pose.len(),
            report.failed_bones.len()
        );
        report
    }

    /// Blend `a` towards `b` by `alpha` and apply the result.
    ///
    /// See [`Pose::blend`] for the blending rules. Bones only in `b` are never
    /// applied.
    pub fn blend_poses(
        &self,
        a: &Pose,
        b: &Pose,
        skeleton: &mut SkeletonIndex,
        alpha: f32,
    ) -> ApplyReport {
        self.apply_pose(&Pose::blend(a, b, alpha), skeleton)
    }

    fn resolve<'a>(&self, skeleton: &'a mut SkeletonIndex, name: &str) -> Option<&'a mut Bone> {
        if skeleton.has_bone(name) {
            return skeleton.get_bone_mut(name);
        }
        match self.config.lookup {
            BoneLookup::Raw => None,
            BoneLookup::RawThenCanonical => {
                skeleton.get_bone_by_normalized_name_mut(normalize_bone_name(name))
            }
        }
    }
}

/// Read every bone's current orientation as normalized Euler degrees, keyed by
/// raw name in rig order.
#[must_use]
pub fn get_bone_rotations(skeleton: &SkeletonIndex) -> IndexMap<String, BoneRotation> {
    skeleton
        .bones()
        .map(|bone| {
            (
                bone.name().to_string(),
                BoneRotation::from_quat(bone.orientation()),
            )
        })
        .collect()
}

/// Capture the skeleton's current orientations as a [`Pose`].
#[must_use]
pub fn extract_pose(skeleton: &SkeletonIndex) -> Pose {
    Pose::new(get_bone_rotations(skeleton))
}

/// Return every bone to the identity orientation.
pub fn reset_bones(skeleton: &mut SkeletonIndex) {
    for bone in skeleton.bones_mut() {
        bone.reset();
    }
    tracing::debug!("Reset {} bones to identity", skeleton.len());
}
