//! Skeleton index over a loaded rig.
//!
//! The rig loader hands over a flat list of named bones with parent
//! references ([`BoneSpec`]). [`SkeletonIndex::build`] resolves the hierarchy
//! once, rejects malformed input, and indexes every bone by its raw name and
//! by its canonical name (see [`crate::bone`]). The index is rebuilt wholesale
//! when a rig is reloaded; it is never patched incrementally.
//!
//! Canonical lookup assumes one bone per canonical role. When two raw names
//! normalize to the same canonical name the later bone wins the canonical
//! slot, while both stay reachable by raw name.

use std::collections::HashMap;

use glam::Quat;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bone::normalize_bone_name;
use crate::error::EngineResult;
use crate::pose::BoneRotation;

/// Errors raised while building a skeleton from a rig description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkeletonError {
    /// A bone has an empty name.
    #[error("Bone at position {0} has an empty name")]
    EmptyName(usize),
    /// Two bones share a raw name.
    #[error("Duplicate bone name: {0}")]
    DuplicateBone(String),
    /// A bone references a parent that is not in the rig.
    #[error("Bone {bone} references unknown parent {parent}")]
    UnknownParent {
        /// The child bone.
        bone: String,
        /// The missing parent name.
        parent: String,
    },
    /// Parent links form a cycle.
    #[error("Bone hierarchy contains a cycle through {0}")]
    Cycle(String),
    /// A rest rotation has NaN or infinite components.
    #[error("Bone {0} has a non-finite rest rotation")]
    NonFiniteRestRotation(String),
}

/// Errors raised when assigning an orientation to a bone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoneError {
    /// The orientation has NaN or infinite components.
    #[error("Non-finite orientation for bone {0}")]
    NonFinite(String),
}

/// One bone as described by the rig loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneSpec {
    /// Raw bone name as exported.
    pub name: String,
    /// Raw name of the parent bone, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Rest rotation in Euler degrees. Identity when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<BoneRotation>,
}

impl BoneSpec {
    /// A root bone.
    #[must_use]
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            rotation: None,
        }
    }

    /// A bone parented to `parent`.
    #[must_use]
    pub fn child(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent.into()),
            rotation: None,
        }
    }

    /// Set the rest rotation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: BoneRotation) -> Self {
        self.rotation = Some(rotation);
        self
    }
}

/// A rig description document: `{ "bones": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RigDescription {
    /// Bones in rig order.
    pub bones: Vec<BoneSpec>,
}

/// A bone in a built skeleton.
#[derive(Debug, Clone)]
pub struct Bone {
    name: String,
    parent: Option<usize>,
    children: Vec<usize>,
    depth: usize,
    orientation: Quat,
}

impl Bone {
    /// Raw bone name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index of the parent bone.
    #[must_use]
    pub fn parent_index(&self) -> Option<usize> {
        self.parent
    }

    /// Indices of the direct children, in rig order.
    #[must_use]
    pub fn child_indices(&self) -> &[usize] {
        &self.children
    }

    /// Number of parent links between this bone and its root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Current local orientation.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Assign a local orientation.
    ///
    /// # Errors
    ///
    /// Returns [`BoneError::NonFinite`] if any component is NaN or infinite;
    /// the bone keeps its previous orientation.
    pub fn set_orientation(&mut self, orientation: Quat) -> Result<(), BoneError> {
        if !orientation.is_finite() {
            return Err(BoneError::NonFinite(self.name.clone()));
        }
        self.orientation = orientation;
        Ok(())
    }

    /// Return to the identity orientation.
    pub fn reset(&mut self) {
        self.orientation = Quat::IDENTITY;
    }
}

/// Metadata row for a bone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoneInfo {
    /// Raw bone name.
    pub name: String,
    /// Canonical name from the registry (or the raw name).
    pub normalized_name: String,
    /// Position in rig order.
    pub index: usize,
    /// Index of the parent bone.
    pub parent: Option<usize>,
}

/// Hierarchy and name index over a rig's bones.
#[derive(Debug, Clone, Default)]
pub struct SkeletonIndex {
    bones: Vec<Bone>,
    by_name: HashMap<String, usize>,
    by_normalized: HashMap<String, usize>,
    info: Vec<BoneInfo>,
}

impl SkeletonIndex {
    /// Build the index from a rig's bone list.
    ///
    /// # Errors
    ///
    /// Returns a [`SkeletonError`] if a name is empty or duplicated, a parent
    /// is unknown, or the parent links contain a cycle.
    pub fn build(specs: &[BoneSpec]) -> Result<Self, SkeletonError> {
        let mut by_name = HashMap::with_capacity(specs.len());
        for (index, spec) in specs.iter().enumerate() {
            if spec.name.is_empty() {
                return Err(SkeletonError::EmptyName(index));
            }
            if by_name.insert(spec.name.clone(), index).is_some() {
                return Err(SkeletonError::DuplicateBone(spec.name.clone()));
            }
            if spec.rotation.is_some_and(|rotation| !rotation.is_finite()) {
                return Err(SkeletonError::NonFiniteRestRotation(spec.name.clone()));
            }
        }

        let parents = specs
            .iter()
            .map(|spec| match &spec.parent {
                None => Ok(None),
                Some(parent) => by_name.get(parent).copied().map(Some).ok_or_else(|| {
                    SkeletonError::UnknownParent {
                        bone: spec.name.clone(),
                        parent: parent.clone(),
                    }
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let depths = resolve_depths(&parents, specs)?;

        let mut bones: Vec<Bone> = specs
            .iter()
            .zip(parents.iter().zip(depths))
            .map(|(spec, (&parent, depth))| Bone {
                name: spec.name.clone(),
                parent,
                children: Vec::new(),
                depth,
                orientation: spec.rotation.map_or(Quat::IDENTITY, BoneRotation::to_quat),
            })
            .collect();
        for (index, parent) in parents.iter().enumerate() {
            if let Some(parent) = *parent {
                bones[parent].children.push(index);
            }
        }

        let mut by_normalized = HashMap::with_capacity(specs.len());
        let mut info = Vec::with_capacity(specs.len());
        for (index, bone) in bones.iter().enumerate() {
            let normalized = normalize_bone_name(&bone.name).to_string();
            if let Some(previous) = by_normalized.insert(normalized.clone(), index) {
                tracing::debug!(
                    "Canonical slot {normalized} moved from {} to {}",
                    bones[previous].name,
                    bone.name
                );
            }
            info.push(BoneInfo {
                name: bone.name.clone(),
                normalized_name: normalized,
                index,
                parent: bone.parent,
            });
        }

        tracing::debug!("Built skeleton index with {} bones", bones.len());
        Ok(Self {
            bones,
            by_name,
            by_normalized,
            info,
        })
    }

    /// Parse a [`RigDescription`] document and build the index.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the rig is invalid.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let rig: RigDescription = serde_json::from_str(json)?;
        Ok(Self::build(&rig.bones)?)
    }

    /// Get a bone by raw name.
    #[must_use]
    pub fn get_bone(&self, name: &str) -> Option<&Bone> {
        self.by_name.get(name).map(|&i| &self.bones[i])
    }

    /// Get a mutable bone by raw name.
    pub fn get_bone_mut(&mut self, name: &str) -> Option<&mut Bone> {
        self.by_name.get(name).map(|&i| &mut self.bones[i])
    }

    /// Get a bone by canonical name.
    #[must_use]
    pub fn get_bone_by_normalized_name(&self, name: &str) -> Option<&Bone> {
        self.by_normalized.get(name).map(|&i| &self.bones[i])
    }

    /// Get a mutable bone by canonical name.
    pub fn get_bone_by_normalized_name_mut(&mut self, name: &str) -> Option<&mut Bone> {
        self.by_normalized.get(name).map(|&i| &mut self.bones[i])
    }

    /// Check if a bone exists by raw name.
    #[must_use]
    pub fn has_bone(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Check if a bone exists by canonical name.
    #[must_use]
    pub fn has_normalized_bone(&self, name: &str) -> bool {
        self.by_normalized.contains_key(name)
    }

    /// Parent of the named bone. `None` for roots and unknown names.
    #[must_use]
    pub fn get_bone_parent(&self, name: &str) -> Option<&Bone> {
        self.get_bone(name)?.parent.map(|i| &self.bones[i])
    }

    /// Direct children of the named bone. Empty for leaves and unknown names.
    #[must_use]
    pub fn get_bone_children(&self, name: &str) -> Vec<&Bone> {
        self.get_bone(name)
            .map(|bone| bone.children.iter().map(|&i| &self.bones[i]).collect())
            .unwrap_or_default()
    }

    /// Number of parent links from the named bone up to its root.
    ///
    /// Cycles are rejected at build time, so this always terminates.
    /// Returns `None` for unknown names.
    #[must_use]
    pub fn get_bone_hierarchy_depth(&self, name: &str) -> Option<usize> {
        self.get_bone(name).map(Bone::depth)
    }

    /// Metadata for every bone, in rig order.
    #[must_use]
    pub fn bone_info(&self) -> &[BoneInfo] {
        &self.info
    }

    /// All bones in rig order.
    pub fn bones(&self) -> impl Iterator<Item = &Bone> {
        self.bones.iter()
    }

    /// Mutable access to all bones in rig order.
    pub fn bones_mut(&mut self) -> impl Iterator<Item = &mut Bone> {
        self.bones.iter_mut()
    }

    /// Bones without a parent, in rig order.
    pub fn roots(&self) -> impl Iterator<Item = &Bone> {
        self.bones.iter().filter(|bone| bone.parent.is_none())
    }

    /// Number of bones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    /// Whether the skeleton has no bones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }
}

/// Compute each bone's depth, failing on parent cycles.
///
/// Every bone is visited once; a walk stops as soon as it reaches a bone whose
/// depth is already known, so the whole pass is linear in the bone count.
fn resolve_depths(parents: &[Option<usize>], specs: &[BoneSpec]) -> Result<Vec<usize>, SkeletonError> {
    let mut depths: Vec<Option<usize>> = vec![None; parents.len()];
    let mut stamp = vec![usize::MAX; parents.len()];
    let mut chain = Vec::new();

    for start in 0..parents.len() {
        chain.clear();
        let mut cursor = Some(start);
        let mut known = None;
        while let Some(i) = cursor {
            if let Some(depth) = depths[i] {
                known = Some(depth);
                break;
            }
            if stamp[i] == start {
                return Err(SkeletonError::Cycle(specs[i].name.clone()));
            }
            stamp[i] = start;
            chain.push(i);
            cursor = parents[i];
        }

        let mut next = known.map_or(0, |depth| depth + 1);
        for &i in chain.iter().rev() {
            depths[i] = Some(next);
            next += 1;
        }
    }

    Ok(depths.into_iter().map(Option::unwrap_or_default).collect())
}
