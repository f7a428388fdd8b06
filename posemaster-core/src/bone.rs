//! Bone name registry.
//!
//! Rigs exported from different tools name the same joint differently
//! (`mixamorig:Hips`, `Armature|Hips`, ...). The registry maps those raw names
//! onto a fixed set of canonical identifiers so poses can be authored once and
//! matched against any supported rig.

/// A canonical bone identifier together with the raw names that denote it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoneAlias {
    /// Canonical, rig-independent name.
    pub standard: &'static str,
    /// Known exporter-specific spellings, in lookup order.
    pub variations: &'static [&'static str],
}

impl BoneAlias {
    /// Whether `raw` is one of this alias' variations.
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        self.variations.contains(&raw)
    }
}

macro_rules! alias {
    ($name:literal) => {
        BoneAlias {
            standard: $name,
            variations: &[
                concat!("mixamorig:", $name),
                concat!("mixamorig_", $name),
                concat!("Armature|", $name),
            ],
        }
    };
}

/// The fixed registry, in lookup order.
static REGISTRY: &[BoneAlias] = &[
    alias!("Hips"),
    alias!("Spine"),
    alias!("Chest"),
    alias!("Neck"),
    alias!("Head"),
    alias!("LeftShoulder"),
    alias!("LeftArm"),
    alias!("LeftForeArm"),
    alias!("LeftHand"),
    alias!("RightShoulder"),
    alias!("RightArm"),
    alias!("RightForeArm"),
    alias!("RightHand"),
    alias!("LeftUpLeg"),
    alias!("LeftLeg"),
    alias!("LeftFoot"),
    alias!("LeftToeBase"),
    alias!("RightUpLeg"),
    alias!("RightLeg"),
    alias!("RightFoot"),
    alias!("RightToeBase"),
];

/// All registered aliases, in lookup order.
#[must_use]
pub fn registry() -> &'static [BoneAlias] {
    REGISTRY
}

/// Map a raw bone name to its canonical identifier.
///
/// Returns the first canonical name whose variations contain `raw`, or `raw`
/// itself when nothing matches. Never fails.
///
/// ```
/// use posemaster_core::bone::normalize_bone_name;
///
/// assert_eq!(normalize_bone_name("mixamorig:Hips"), "Hips");
/// assert_eq!(normalize_bone_name("tail_03"), "tail_03");
/// ```
#[must_use]
pub fn normalize_bone_name(raw: &str) -> &str {
    REGISTRY
        .iter()
        .find(|alias| alias.matches(raw))
        .map_or(raw, |alias| alias.standard)
}

/// Whether `name` is one of the registry's canonical identifiers.
#[must_use]
pub fn is_canonical(name: &str) -> bool {
    REGISTRY.iter().any(|alias| alias.standard == name)
}
