//! Pose state with linear undo/redo history.
//!
//! [`PoseStore`] owns the current bone rotations, the active model id, and a
//! linear log of whole-pose snapshots with a cursor:
//!
//! ```text
//! history:  [ e0 ][ e1 ][ e2 ][ e3 ]
//!                        ^ history_index
//! undo  -> cursor moves left, bones := e1
//! redo  -> cursor moves right, bones := e3
//! edit  -> e3 discarded, new entry appended, cursor at tail
//! ```
//!
//! Every entry is a deep copy of the bone mapping at the time of the edit, so
//! later edits can never reach back into recorded history.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::lenient;
use crate::pose::{BoneMap, BoneRotation, Pose};

/// Default number of history entries retained.
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// History retention settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum number of entries kept; oldest entries are dropped first.
    /// Values below 1 are treated as 1.
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_HISTORY,
        }
    }
}

/// One recorded state of the pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Snapshot of every bone rotation.
    pub bones: BoneMap,
    /// Wall-clock time of the edit (ms since epoch).
    pub timestamp: u64,
    /// What the edit did, for history UIs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl HistoryEntry {
    fn capture(bones: &BoneMap, description: impl Into<String>) -> Self {
        Self {
            bones: bones.clone(),
            timestamp: current_timestamp_ms(),
            description: Some(description.into()),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PoseDocument<'a> {
    model_id: Option<&'a str>,
    bones: &'a BoneMap,
    history: &'a [HistoryEntry],
    history_index: usize,
}

/// Current pose, active model, and undo/redo log.
#[derive(Debug, Clone)]
pub struct PoseStore {
    model_id: Option<String>,
    bones: BoneMap,
    history: Vec<HistoryEntry>,
    history_index: usize,
    config: HistoryConfig,
}

impl Default for PoseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PoseStore {
    /// Create a store with empty bones and a single initial history entry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HistoryConfig::default())
    }

    /// Create a store with custom history retention.
    #[must_use]
    pub fn with_config(config: HistoryConfig) -> Self {
        let bones = BoneMap::new();
        Self {
            model_id: None,
            history: vec![HistoryEntry::capture(&bones, "Initial pose")],
            bones,
            history_index: 0,
            config,
        }
    }

    /// The history retention settings.
    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Identifier of the model the pose belongs to.
    #[must_use]
    pub fn model_id(&self) -> Option<&str> {
        self.model_id.as_deref()
    }

    /// Set the active model. Not recorded in history.
    pub fn set_model_id(&mut self, model_id: Option<String>) {
        self.model_id = model_id;
    }

    /// Current bone rotations.
    #[must_use]
    pub fn bones(&self) -> &BoneMap {
        &self.bones
    }

    /// Current rotation of one bone.
    #[must_use]
    pub fn bone(&self, name: &str) -> Option<BoneRotation> {
        self.bones.get(name).copied()
    }

    /// The recorded history, oldest first.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Position of the cursor in [`Self::history`].
    #[must_use]
    pub fn history_index(&self) -> usize {
        self.history_index
    }

    /// Set one bone's rotation (normalized) and record it.
    ///
    /// A rotation with a NaN or infinite component is ignored.
    pub fn set_bone_rotation(&mut self, name: impl Into<String>, rotation: BoneRotation) {
        let name = name.into();
        if !rotation.is_finite() {
            tracing::warn!("Ignoring non-finite rotation for {name}: {rotation:?}");
            return;
        }
        let description = format!("Rotate {name}");
        self.bones.insert(name, rotation.normalized());
        self.commit(description);
    }

    /// Set several bone rotations as one recorded edit.
    ///
    /// Non-finite rotations are skipped. A batch with nothing left to apply
    /// changes nothing and records nothing.
    pub fn set_bone_rotations<I, S>(&mut self, rotations: I)
    where
        I: IntoIterator<Item = (S, BoneRotation)>,
        S: Into<String>,
    {
        let accepted = sanitize_bones(rotations.into_iter().map(|(n, r)| (n.into(), r)));
        if accepted.is_empty() {
            return;
        }
        let count = accepted.len();
        self.bones.extend(accepted);
        self.commit(format!("Rotate {count} bones"));
    }

    /// Clear every bone rotation and record it.
    pub fn reset_pose(&mut self) {
        self.bones.clear();
        self.commit("Reset pose".to_string());
    }

    /// Replace the current bones with a pose's bones (normalized) and record it.
    ///
    /// Bones with non-finite rotations are dropped.
    pub fn load_pose(&mut self, pose: &Pose, description: Option<&str>) {
        self.bones = sanitize_bones(pose.bones.clone());
        self.commit(description.unwrap_or("Load pose").to_string());
    }

    /// Step back one entry. Returns whether the cursor moved.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.history_index -= 1;
        self.restore_cursor();
        true
    }

    /// Step forward one entry. Returns whether the cursor moved.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.history_index += 1;
        self.restore_cursor();
        true
    }

    /// Whether [`Self::undo`] would move the cursor.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history_index > 0
    }

    /// Whether [`Self::redo`] would move the cursor.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history_index + 1 < self.history.len()
    }

    /// Collapse history to a single entry holding the current bones.
    ///
    /// Marks a save point that undo cannot go past.
    pub fn clear_history(&mut self) {
        self.history = vec![HistoryEntry::capture(&self.bones, "History cleared")];
        self.history_index = 0;
        tracing::debug!("Pose history cleared");
    }

    /// Export the current bones as an interchange pose.
    #[must_use]
    pub fn to_pose(&self, rig_type: &str) -> Pose {
        Pose::new(self.bones.clone()).with_rig_type(rig_type)
    }

    /// Serialize model id, bones, and history to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> EngineResult<String> {
        let doc = PoseDocument {
            model_id: self.model_id.as_deref(),
            bones: &self.bones,
            history: &self.history,
            history_index: self.history_index,
        };
        Ok(serde_json::to_string(&doc)?)
    }

    /// Replace the store's state from JSON produced by [`Self::to_json`].
    ///
    /// Never fails. Unparseable input leaves the store at its defaults;
    /// missing or invalid fields fall back individually (empty bones, a single
    /// history entry holding the loaded bones, cursor at the last entry).
    ///
    /// Every loaded rotation is normalized and non-finite ones are dropped.
    /// When history is present, the entry at the cursor is authoritative and
    /// the stored `bones` field is ignored.
    pub fn load_json(&mut self, json: &str) {
        *self = Self::with_config(self.config);
        let Some(doc) = lenient::parse_document(json, "pose") else {
            return;
        };

        self.model_id = lenient::field(&doc, "modelId", || None);
        let bones = sanitize_bones(lenient::entries::<BoneRotation>(&doc, "bones"));

        let mut history: Vec<HistoryEntry> = lenient::list(&doc, "history");
        for entry in &mut history {
            entry.bones = sanitize_bones(std::mem::take(&mut entry.bones));
        }
        if history.is_empty() {
            history.push(HistoryEntry::capture(&bones, "Loaded pose"));
        }
        let last = history.len() - 1;
        let index = lenient::field(&doc, "historyIndex", || last).min(last);

        self.history = history;
        self.history_index = index;
        self.enforce_limit();
        self.bones = self.history[self.history_index].bones.clone();
        if self.bones != bones {
            tracing::warn!("Pose bones disagree with history, using the entry at the cursor");
        }
        tracing::debug!(
            "Loaded pose with {} bones and {} history entries",
            self.bones.len(),
            self.history.len()
        );
    }

    fn commit(&mut self, description: String) {
        self.history.truncate(self.history_index + 1);
        self.history
            .push(HistoryEntry::capture(&self.bones, description));
        self.history_index = self.history.len() - 1;
        self.enforce_limit();
        tracing::debug!(
            "Recorded history entry {} of {}",
            self.history_index + 1,
            self.history.len()
        );
    }

    fn enforce_limit(&mut self) {
        let max = self.config.max_entries.max(1);
        if self.history.len() > max {
            let excess = self.history.len() - max;
            self.history.drain(..excess);
            self.history_index = self.history_index.saturating_sub(excess);
        }
    }

    fn restore_cursor(&mut self) {
        self.bones = self.history[self.history_index].bones.clone();
        tracing::debug!(
            "Moved to history entry {} of {}",
            self.history_index + 1,
            self.history.len()
        );
    }
}

/// Normalize rotations, dropping any with a NaN or infinite component.
fn sanitize_bones<I>(bones: I) -> BoneMap
where
    I: IntoIterator<Item = (String, BoneRotation)>,
{
    bones
        .into_iter()
        .filter_map(|(name, rotation)| {
            if rotation.is_finite() {
                Some((name, rotation.normalized()))
            } else {
                tracing::warn!("Dropping non-finite rotation for {name}: {rotation:?}");
                None
            }
        })
        .collect()
}

/// Current Unix time in milliseconds.
#[must_use]
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rot(x: f32, y: f32, z: f32) -> BoneRotation {
        BoneRotation::new(x, y, z)
    }

    #[test]
    fn test_new_store_defaults() {
        let store = PoseStore::new();
        assert!(store.bones().is_empty());
        assert!(store.model_id().is_none());
        assert_eq!(store.history().len(), 1);
        assert_eq!(store.history_index(), 0);
        assert!(!store.can_undo());
        assert!(!store.can_redo());
    }

    #[test]
    fn test_set_bone_rotation() {
        let mut store = PoseStore::new();
        store.set_bone_rotation("Hips", rot(45.0, 90.0, 0.0));
        assert_eq!(store.bone("Hips"), Some(rot(45.0, 90.0, 0.0)));
        assert_eq!(store.history().len(), 2);
        assert_eq!(
            store.history()[1].description.as_deref(),
            Some("Rotate Hips")
        );
    }

    #[test]
    fn test_set_bone_rotation_normalizes() {
        let mut store = PoseStore::new();
        store.set_bone_rotation("Hips", rot(270.0, -180.0, 0.0));
        assert_eq!(store.bone("Hips"), Some(rot(-90.0, 180.0, 0.0)));
    }

    #[test]
    fn test_undo_redo_cycle() {
        let mut store = PoseStore::new();
        store.set_bone_rotation("Hips", rot(45.0, 0.0, 0.0));
        assert!(store.can_undo());
        assert!(!store.can_redo());

        assert!(store.undo());
        assert!(store.bones().is_empty());
        assert!(!store.can_undo());
        assert!(store.can_redo());

        assert!(store.redo());
        assert_eq!(store.bone("Hips"), Some(rot(45.0, 0.0, 0.0)));
        assert!(store.can_undo());
        assert!(!store.can_redo());
    }

    #[test]
    fn test_undo_redo_at_bounds_are_noops() {
        let mut store = PoseStore::new();
        assert!(!store.undo());
        assert!(!store.redo());
        assert_eq!(store.history_index(), 0);
    }

    #[test]
    fn test_edit_after_undo_truncates_redo() {
        let mut store = PoseStore::new();
        store.set_bone_rotation("Hips", rot(10.0, 0.0, 0.0));
        store.set_bone_rotation("Hips", rot(20.0, 0.0, 0.0));
        store.undo();
        assert!(store.can_redo());

        store.set_bone_rotation("Spine", rot(5.0, 0.0, 0.0));
        assert!(!store.can_redo());
        assert_eq!(store.history().len(), 3);
        assert_eq!(store.bone("Hips"), Some(rot(10.0, 0.0, 0.0)));
        assert_eq!(store.bone("Spine"), Some(rot(5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_history_is_deep_copied() {
        let mut store = PoseStore::new();
        store.set_bone_rotation("Hips", rot(10.0, 0.0, 0.0));
        store.set_bone_rotation("Hips", rot(99.0, 0.0, 0.0));
        assert_eq!(store.history()[1].bones["Hips"], rot(10.0, 0.0, 0.0));
        assert_eq!(store.history()[2].bones["Hips"], rot(99.0, 0.0, 0.0));
    }

    #[test]
    fn test_set_bone_rotations_is_one_entry() {
        let mut store = PoseStore::new();
        store.set_bone_rotations([("Hips", rot(1.0, 0.0, 0.0)), ("Spine", rot(2.0, 0.0, 0.0))]);
        assert_eq!(store.history().len(), 2);
        assert_eq!(store.bones().len(), 2);

        store.undo();
        assert!(store.bones().is_empty());
    }

    #[test]
    fn test_empty_batch_records_nothing() {
        let mut store = PoseStore::new();
        store.set_bone_rotations(Vec::<(String, BoneRotation)>::new());
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_reset_pose_is_undoable() {
        let mut store = PoseStore::new();
        store.set_bone_rotation("Spine", rot(25.0, 0.0, 0.0));
        store.reset_pose();
        assert!(store.bones().is_empty());

        store.undo();
        assert_eq!(store.bone("Spine"), Some(rot(25.0, 0.0, 0.0)));
    }

    #[test]
    fn test_load_pose_replaces_bones() {
        let mut store = PoseStore::new();
        store.set_bone_rotation("Hips", rot(10.0, 0.0, 0.0));
        let pose = Pose::from_bones([("Spine", rot(30.0, 45.0, 60.0))]);

        store.load_pose(&pose, Some("Apply library pose"));

        assert!(store.bone("Hips").is_none());
        assert_eq!(store.bone("Spine"), Some(rot(30.0, 45.0, 60.0)));
        assert_eq!(
            store.history()[2].description.as_deref(),
            Some("Apply library pose")
        );
    }

    #[test]
    fn test_clear_history_marks_save_point() {
        let mut store = PoseStore::new();
        store.set_bone_rotation("Hips", rot(10.0, 0.0, 0.0));
        store.set_bone_rotation("Spine", rot(20.0, 0.0, 0.0));
        store.clear_history();

        assert_eq!(store.history().len(), 1);
        assert_eq!(store.history()[0].bones, *store.bones());
        assert!(!store.can_undo());
        assert_eq!(store.bones().len(), 2);
    }

    #[test]
    fn test_history_limit_drops_oldest() {
        let mut store = PoseStore::with_config(HistoryConfig { max_entries: 3 });
        for i in 0..5_u8 {
            store.set_bone_rotation("Hips", rot(f32::from(i), 0.0, 0.0));
        }
        assert_eq!(store.history().len(), 3);
        assert_eq!(store.history_index(), 2);

        assert!(store.undo());
        assert!(store.undo());
        assert!(!store.undo());
        assert_eq!(store.bone("Hips"), Some(rot(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_zero_limit_keeps_one_entry() {
        let mut store = PoseStore::with_config(HistoryConfig { max_entries: 0 });
        store.set_bone_rotation("Hips", rot(1.0, 0.0, 0.0));
        assert_eq!(store.history().len(), 1);
        assert_eq!(store.bone("Hips"), Some(rot(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_model_id_not_in_history() {
        let mut store = PoseStore::new();
        store.set_model_id(Some("character-001".to_string()));
        assert_eq!(store.model_id(), Some("character-001"));
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_to_pose() {
        let mut store = PoseStore::new();
        store.set_bone_rotation("Neck", rot(15.0, 45.0, 0.0));
        let pose = store.to_pose("mixamo");
        assert_eq!(pose.rig_type, "mixamo");
        assert_eq!(pose.bones["Neck"], rot(15.0, 45.0, 0.0));
    }

    #[test]
    fn test_json_round_trip() {
        let mut store = PoseStore::new();
        store.set_model_id(Some("test-model".to_string()));
        store.set_bone_rotation("Neck", rot(15.0, 45.0, 0.0));
        store.set_bone_rotation("Head", rot(-5.0, 0.0, 10.0));
        store.undo();
        let json = store.to_json().expect("serialize");
        assert!(json.contains("\"modelId\":\"test-model\""));
        assert!(json.contains("historyIndex"));

        let mut restored = PoseStore::new();
        restored.load_json(&json);

        assert_eq!(restored.model_id(), Some("test-model"));
        assert_eq!(restored.bones(), store.bones());
        assert_eq!(restored.history(), store.history());
        assert_eq!(restored.history_index(), 1);
        assert!(restored.can_redo());
        restored.redo();
        assert_eq!(restored.bone("Head"), Some(rot(-5.0, 0.0, 10.0)));
    }

    #[test]
    fn test_load_json_garbage_resets_to_defaults() {
        let mut store = PoseStore::new();
        store.set_model_id(Some("m".to_string()));
        store.set_bone_rotation("Hips", rot(1.0, 0.0, 0.0));

        store.load_json("{{ definitely not json");

        assert!(store.model_id().is_none());
        assert!(store.bones().is_empty());
        assert_eq!(store.history().len(), 1);
        assert_eq!(store.history_index(), 0);
    }

    #[test]
    fn test_load_json_missing_fields_default() {
        let mut store = PoseStore::new();
        store.load_json(r#"{"bones": {"Hips": {"x": 10, "y": 0, "z": 0}, "Bad": "nope"}}"#);

        assert!(store.model_id().is_none());
        assert_eq!(store.bones().len(), 1);
        assert_eq!(store.history().len(), 1);
        assert_eq!(store.history()[0].bones, *store.bones());
        assert!(!store.can_undo());
    }

    #[test]
    fn test_load_json_clamps_cursor() {
        let mut store = PoseStore::new();
        store.load_json(
            r#"{"bones": {}, "history": [{"bones": {}, "timestamp": 1}], "historyIndex": 42}"#,
        );
        assert_eq!(store.history_index(), 0);

        store.load_json(r#"{"modelId": 7, "history": "oops", "historyIndex": -1}"#);
        assert!(store.model_id().is_none());
        assert_eq!(store.history().len(), 1);
        assert_eq!(store.history_index(), 0);
    }

    #[test]
    fn test_non_finite_rotation_is_ignored() {
        let mut store = PoseStore::new();
        store.set_bone_rotation("Hips", rot(10.0, 0.0, 0.0));

        store.set_bone_rotation("Hips", rot(f32::INFINITY, 0.0, 0.0));
        store.set_bone_rotation("Spine", rot(0.0, f32::NAN, 0.0));

        assert_eq!(store.bone("Hips"), Some(rot(10.0, 0.0, 0.0)));
        assert!(store.bone("Spine").is_none());
        assert_eq!(store.history().len(), 2);
    }

    #[test]
    fn test_batch_skips_non_finite_rotations() {
        let mut store = PoseStore::new();
        store.set_bone_rotations([
            ("Hips", rot(f32::NEG_INFINITY, 0.0, 0.0)),
            ("Spine", rot(190.0, 0.0, 0.0)),
        ]);
        assert!(store.bone("Hips").is_none());
        assert_eq!(store.bone("Spine"), Some(rot(-170.0, 0.0, 0.0)));
        assert_eq!(store.history().len(), 2);

        store.set_bone_rotations([("Neck", rot(f32::NAN, 0.0, 0.0))]);
        assert!(store.bone("Neck").is_none());
        assert_eq!(store.history().len(), 2);
    }

    #[test]
    fn test_load_pose_drops_non_finite_bones() {
        let mut store = PoseStore::new();
        let pose = Pose::from_bones([
            ("Hips", rot(f32::INFINITY, 0.0, 0.0)),
            ("Spine", rot(5.0, 0.0, 0.0)),
        ]);
        store.load_pose(&pose, None);

        assert_eq!(store.bones().len(), 1);
        assert_eq!(store.bone("Spine"), Some(rot(5.0, 0.0, 0.0)));

        let mut restored = PoseStore::new();
        restored.load_json(&store.to_json().expect("serialize"));
        assert_eq!(restored.bones(), store.bones());
    }

    #[test]
    fn test_load_json_normalizes_history_entries() {
        let mut store = PoseStore::new();
        store.load_json(
            r#"{
                "bones": {"Hips": {"x": 20, "y": 0, "z": 0}},
                "history": [
                    {"bones": {"Hips": {"x": 400, "y": 0, "z": 0}, "Spine": {"x": 1e39, "y": 0, "z": 0}}, "timestamp": 1},
                    {"bones": {"Hips": {"x": 20, "y": 0, "z": 0}}, "timestamp": 2}
                ],
                "historyIndex": 1
            }"#,
        );
        assert!(store.undo());
        assert_eq!(store.bone("Hips"), Some(rot(40.0, 0.0, 0.0)));
        assert!(store.bone("Spine").is_none());
    }

    #[test]
    fn test_load_json_bones_follow_history_cursor() {
        let mut store = PoseStore::new();
        store.load_json(
            r#"{"history": [{"bones": {"Hips": {"x": 10, "y": 0, "z": 0}}, "timestamp": 1}], "historyIndex": 0}"#,
        );
        assert_eq!(store.bone("Hips"), Some(rot(10.0, 0.0, 0.0)));
        assert_eq!(store.bones(), &store.history()[store.history_index()].bones);
    }

    #[test]
    fn test_load_json_cursor_survives_history_limit() {
        let mut store = PoseStore::with_config(HistoryConfig { max_entries: 1 });
        store.load_json(
            r#"{"history": [
                {"bones": {"Hips": {"x": 1, "y": 0, "z": 0}}, "timestamp": 1},
                {"bones": {"Hips": {"x": 2, "y": 0, "z": 0}}, "timestamp": 2}
            ], "historyIndex": 0}"#,
        );
        assert_eq!(store.history().len(), 1);
        assert_eq!(store.bones(), &store.history()[store.history_index()].bones);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Set(u8, f32),
        Reset,
        Undo,
        Redo,
        Clear,
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..4, -360.0f32..360.0).prop_map(|(bone, angle)| Op::Set(bone, angle)),
            Just(Op::Reset),
            Just(Op::Undo),
            Just(Op::Redo),
            Just(Op::Clear),
        ]
    }

    proptest! {
        #[test]
        fn prop_cursor_and_bones_stay_consistent(
            ops in prop::collection::vec(arb_op(), 0..40),
            max_entries in 1usize..10
        ) {
            let mut store = PoseStore::with_config(HistoryConfig { max_entries });
            for op in ops {
                match op {
                    Op::Set(bone, angle) => {
                        store.set_bone_rotation(format!("bone{bone}"), rot(angle, 0.0, 0.0));
                    }
                    Op::Reset => store.reset_pose(),
                    Op::Undo => { store.undo(); }
                    Op::Redo => { store.redo(); }
                    Op::Clear => store.clear_history(),
                }

                prop_assert!(!store.history().is_empty());
                prop_assert!(store.history().len() <= max_entries);
                prop_assert!(store.history_index() < store.history().len());
                prop_assert_eq!(store.can_undo(), store.history_index() > 0);
                prop_assert_eq!(
                    store.can_redo(),
                    store.history_index() + 1 < store.history().len()
                );
                prop_assert_eq!(store.bones(), &store.history()[store.history_index()].bones);
                for rotation in store.bones().values() {
                    prop_assert!(rotation.x > -180.0 && rotation.x <= 180.0);
                }
            }
        }
    }
}
