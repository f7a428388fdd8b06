//! Camera framing state and named snapshots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::history::current_timestamp_ms;
use crate::lenient;
use crate::math::{clamp, Vec3};

/// Narrowest allowed field of view, in degrees.
pub const MIN_FOV: f32 = 1.0;
/// Widest allowed field of view, in degrees.
pub const MAX_FOV: f32 = 179.0;
/// Field of view after construction or [`CameraStore::reset`].
pub const DEFAULT_FOV: f32 = 75.0;
/// Camera position after construction or [`CameraStore::reset`].
pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 0.0, 5.0);

/// A named, timestamped copy of the camera framing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraSnapshot {
    /// Name the snapshot was saved under.
    pub name: String,
    /// Camera position.
    pub position: Vec3,
    /// Look-at point.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov: f32,
    /// Save time (ms since epoch).
    pub timestamp: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CameraDocument<'a> {
    position: Vec3,
    target: Vec3,
    fov: f32,
    grid_visible: bool,
    orbit_locked: bool,
    auto_rotate: bool,
    snapshots: &'a BTreeMap<String, CameraSnapshot>,
}

/// Camera position, target, field of view, and viewport toggles.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraStore {
    position: Vec3,
    target: Vec3,
    fov: f32,
    grid_visible: bool,
    orbit_locked: bool,
    auto_rotate: bool,
    snapshots: BTreeMap<String, CameraSnapshot>,
}

impl Default for CameraStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraStore {
    /// Create a camera store at the default framing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: DEFAULT_POSITION,
            target: Vec3::ZERO,
            fov: DEFAULT_FOV,
            grid_visible: true,
            orbit_locked: false,
            auto_rotate: false,
            snapshots: BTreeMap::new(),
        }
    }

    /// Camera position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Look-at point.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Field of view in degrees, always within `[MIN_FOV, MAX_FOV]`.
    #[must_use]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Whether the ground grid is shown.
    #[must_use]
    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }

    /// Whether orbit controls are locked.
    #[must_use]
    pub fn orbit_locked(&self) -> bool {
        self.orbit_locked
    }

    /// Whether the camera orbits on its own.
    #[must_use]
    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    /// Move the camera.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Change the look-at point.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Set the field of view, clamped to `[MIN_FOV, MAX_FOV]`.
    ///
    /// NaN and infinities are ignored.
    pub fn set_fov(&mut self, fov: f32) {
        if !fov.is_finite() {
            tracing::warn!("Ignoring non-finite field of view {fov}");
            return;
        }
        self.fov = clamp(fov, MIN_FOV, MAX_FOV);
    }

    /// Show or hide the ground grid.
    pub fn set_grid_visible(&mut self, visible: bool) {
        self.grid_visible = visible;
    }

    /// Flip grid visibility.
    pub fn toggle_grid(&mut self) {
        self.grid_visible = !self.grid_visible;
    }

    /// Flip the orbit lock.
    pub fn toggle_orbit_lock(&mut self) {
        self.orbit_locked = !self.orbit_locked;
    }

    /// Flip auto-rotation.
    pub fn toggle_auto_rotate(&mut self) {
        self.auto_rotate = !self.auto_rotate;
    }

    /// Save the current framing under `name`, replacing any snapshot with
    /// that name.
    pub fn save_snapshot(&mut self, name: impl Into<String>) {
        let name = name.into();
        let snapshot = CameraSnapshot {
            name: name.clone(),
            position: self.position,
            target: self.target,
            fov: self.fov,
            timestamp: current_timestamp_ms(),
        };
        if self.snapshots.insert(name.clone(), snapshot).is_some() {
            tracing::debug!("Overwrote camera snapshot {name}");
        } else {
            tracing::debug!("Saved camera snapshot {name}");
        }
    }

    /// Restore the framing saved under `name`. Returns whether it existed.
    pub fn load_snapshot(&mut self, name: &str) -> bool {
        let Some(snapshot) = self.snapshots.get(name) else {
            tracing::debug!("No camera snapshot named {name}");
            return false;
        };
        self.position = snapshot.position;
        self.target = snapshot.target;
        self.fov = snapshot.fov;
        true
    }

    /// Remove the snapshot saved under `name`, returning it.
    pub fn delete_snapshot(&mut self, name: &str) -> Option<CameraSnapshot> {
        self.snapshots.remove(name)
    }

    /// Look up a snapshot by name.
    #[must_use]
    pub fn snapshot(&self, name: &str) -> Option<&CameraSnapshot> {
        self.snapshots.get(name)
    }

    /// All snapshots, sorted by name.
    #[must_use]
    pub fn list_snapshots(&self) -> Vec<&CameraSnapshot> {
        self.snapshots.values().collect()
    }

    /// Restore the default framing and toggles, and drop all snapshots.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Serialize the camera state to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> EngineResult<String> {
        let doc = CameraDocument {
            position: self.position,
            target: self.target,
            fov: self.fov,
            grid_visible: self.grid_visible,
            orbit_locked: self.orbit_locked,
            auto_rotate: self.auto_rotate,
            snapshots: &self.snapshots,
        };
        Ok(serde_json::to_string(&doc)?)
    }

    /// Replace the camera state from JSON produced by [`Self::to_json`].
    ///
    /// Never fails; missing or invalid fields take their defaults and the
    /// field of view is clamped.
    pub fn load_json(&mut self, json: &str) {
        *self = Self::new();
        let Some(doc) = lenient::parse_document(json, "camera") else {
            return;
        };

        self.position = lenient::field(&doc, "position", || DEFAULT_POSITION);
        self.target = lenient::field(&doc, "target", || Vec3::ZERO);
        self.set_fov(lenient::field(&doc, "fov", || DEFAULT_FOV));
        self.grid_visible = lenient::field(&doc, "gridVisible", || true);
        self.orbit_locked = lenient::field(&doc, "orbitLocked", || false);
        self.auto_rotate = lenient::field(&doc, "autoRotate", || false);
        self.snapshots = lenient::entries::<CameraSnapshot>(&doc, "snapshots")
            .into_iter()
            .map(|(name, mut snapshot)| {
                snapshot.fov = clamp(snapshot.fov, MIN_FOV, MAX_FOV);
                (name, snapshot)
            })
            .collect();
    }
}
