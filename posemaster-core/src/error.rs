//! Error types for engine operations.

use thiserror::Error;

use crate::pose::PoseValidationError;
use crate::skeleton::SkeletonError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur in engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Pose or store serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A pose failed schema validation.
    #[error(transparent)]
    InvalidPose(#[from] PoseValidationError),

    /// A rig description could not be turned into a skeleton.
    #[error("Invalid skeleton: {0}")]
    Skeleton(#[from] SkeletonError),
}
