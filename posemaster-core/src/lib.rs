//! # PoseMaster Core
//!
//! State and history engine for interactive 3D character posing.
//! Rendering and asset loading live elsewhere and consume this crate's data.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               posemaster-core               │
//! ├─────────────────────────────────────────────┤
//! │  Stores            │  Pose Engine           │
//! │  - Pose + history  │  - Pose model          │
//! │  - Camera          │  - Skeleton index      │
//! │  - Scene           │  - Apply / blend       │
//! ├─────────────────────────────────────────────┤
//! │  Bone name registry  │  Math utilities      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use posemaster_core::{BoneRotation, BoneSpec, PoseApplier, PoseStore, SkeletonIndex};
//!
//! let mut rig = SkeletonIndex::build(&[
//!     BoneSpec::root("Hips"),
//!     BoneSpec::child("Spine", "Hips"),
//! ])
//! .expect("valid rig");
//!
//! let mut store = PoseStore::new();
//! store.set_bone_rotation("Spine", BoneRotation::new(30.0, 0.0, 0.0));
//!
//! let report = PoseApplier::new().apply_pose(&store.to_pose("humanoid-v2"), &mut rig);
//! assert!(report.success);
//! assert_eq!(report.applied_bones, 1);
//!
//! store.undo();
//! assert!(store.bones().is_empty());
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod applier;
pub mod bone;
pub mod camera;
pub mod error;
pub mod history;
mod lenient;
pub mod math;
pub mod pose;
pub mod scene;
pub mod skeleton;

pub use applier::{
    extract_pose, get_bone_rotations, reset_bones, ApplyConfig, ApplyReport, BoneLookup,
    PoseApplier,
};
pub use bone::{normalize_bone_name, BoneAlias};
pub use camera::{CameraSnapshot, CameraStore};
pub use error::{EngineError, EngineResult};
pub use history::{HistoryConfig, HistoryEntry, PoseStore};
pub use math::Vec3;
pub use pose::{BoneMap, BoneRotation, Pose, PoseMetadata, PoseValidationError, ValidationIssue};
pub use scene::{Prop, PropUpdate, ReferenceImage, ReferenceImageUpdate, SceneStore};
pub use skeleton::{Bone, BoneError, BoneInfo, BoneSpec, RigDescription, SkeletonError, SkeletonIndex};

/// PoseMaster core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
