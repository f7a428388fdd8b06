//! # PoseMaster CLI
//!
//! Command-line front end for the PoseMaster engine. Loads pose files and rig
//! descriptions, runs them through `posemaster-core`, and prints JSON.
//!
//! ## Usage
//!
//! ```bash
//! posemaster validate pose.json
//! posemaster apply --rig rig.json pose.json --canonical
//! posemaster blend --rig rig.json a.json b.json --alpha 0.25
//! posemaster inspect --rig rig.json
//! ```
//!
//! The rig may also come from `POSEMASTER_RIG`. Each command is also exposed
//! as a function over JSON text so it can be driven without touching disk.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use indexmap::IndexMap;
use posemaster_core::{
    get_bone_rotations, ApplyConfig, ApplyReport, BoneInfo, BoneLookup, BoneRotation, Pose,
    PoseApplier, SkeletonIndex,
};
use serde::Serialize;

/// Command-line arguments for posemaster.
#[derive(Debug, Clone, Parser)]
#[command(name = "posemaster")]
#[command(about = "Validate, apply, and blend character poses")]
#[command(version)]
pub struct CliArgs {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check a pose file against the interchange schema
    Validate {
        /// Pose file
        pose: PathBuf,
    },
    /// Apply a pose to a rig and print the result
    Apply {
        /// Rig description file
        #[arg(long, env = "POSEMASTER_RIG")]
        rig: PathBuf,
        /// Pose file
        pose: PathBuf,
        /// Fall back to canonical bone names when a raw name is missing
        #[arg(long)]
        canonical: bool,
    },
    /// Blend two poses and apply the result to a rig
    Blend {
        /// Rig description file
        #[arg(long, env = "POSEMASTER_RIG")]
        rig: PathBuf,
        /// Base pose file
        a: PathBuf,
        /// Target pose file
        b: PathBuf,
        /// Blend factor, clamped to [0, 1]
        #[arg(long, default_value = "0.5")]
        alpha: f32,
        /// Fall back to canonical bone names when a raw name is missing
        #[arg(long)]
        canonical: bool,
    },
    /// List a rig's bones with their canonical names and depths
    Inspect {
        /// Rig description file
        #[arg(long, env = "POSEMASTER_RIG")]
        rig: PathBuf,
    },
}

/// Result of `validate`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutput {
    /// Whether the pose passed validation.
    pub valid: bool,
    /// Schema version tag.
    pub version: String,
    /// Rig compatibility tag.
    pub rig_type: String,
    /// Number of bones in the pose.
    pub bone_count: usize,
    /// One message per issue found.
    pub issues: Vec<String>,
}

/// Result of `apply` and `blend`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyOutput {
    /// What happened per bone.
    pub report: ApplyReport,
    /// Every rig bone's rotation after application.
    pub rotations: IndexMap<String, BoneRotation>,
}

/// One row of `inspect`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectRow {
    /// Name and hierarchy data.
    #[serde(flatten)]
    pub info: BoneInfo,
    /// Steps from the bone to its root.
    pub depth: usize,
}

fn lookup(canonical: bool) -> BoneLookup {
    if canonical {
        BoneLookup::RawThenCanonical
    } else {
        BoneLookup::Raw
    }
}

fn load_rig(rig_json: &str) -> anyhow::Result<SkeletonIndex> {
    SkeletonIndex::from_json(rig_json).context("Failed to load rig description")
}

fn load_pose(pose_json: &str) -> anyhow::Result<Pose> {
    Pose::from_json(pose_json).context("Failed to load pose")
}

/// Validate a pose document.
///
/// A pose that parses but breaks the schema is reported in the output, not
/// as an error.
///
/// # Errors
///
/// Returns an error if the document is not a pose.
pub fn validate_pose(pose_json: &str) -> anyhow::Result<String> {
    let pose: Pose = serde_json::from_str(pose_json).context("Failed to parse pose")?;
    let issues = match pose.validate() {
        Ok(()) => Vec::new(),
        Err(e) => e.issues.iter().map(ToString::to_string).collect(),
    };
    if !issues.is_empty() {
        tracing::warn!("Pose has {} validation issues", issues.len());
    }
    let output = ValidationOutput {
        valid: issues.is_empty(),
        version: pose.version,
        rig_type: pose.rig_type,
        bone_count: pose.bones.len(),
        issues,
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Apply a pose to a rig.
///
/// # Errors
///
/// Returns an error if the rig or the pose cannot be loaded.
pub fn apply_pose(rig_json: &str, pose_json: &str, canonical: bool) -> anyhow::Result<String> {
    let mut rig = load_rig(rig_json)?;
    let pose = load_pose(pose_json)?;
    let applier = PoseApplier::with_config(ApplyConfig {
        lookup: lookup(canonical),
    });
    let report = applier.apply_pose(&pose, &mut rig);
    tracing::info!(
        "Applied {} bones, {} failed",
        report.applied_bones,
        report.failed_bones.len()
    );
    let output = ApplyOutput {
        report,
        rotations: get_bone_rotations(&rig),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Blend two poses and apply the result to a rig.
///
/// # Errors
///
/// Returns an error if the rig or either pose cannot be loaded.
pub fn blend_poses(
    rig_json: &str,
    a_json: &str,
    b_json: &str,
    alpha: f32,
    canonical: bool,
) -> anyhow::Result<String> {
    let mut rig = load_rig(rig_json)?;
    let a = load_pose(a_json).context("Base pose")?;
    let b = load_pose(b_json).context("Target pose")?;
    let applier = PoseApplier::with_config(ApplyConfig {
        lookup: lookup(canonical),
    });
    let report = applier.blend_poses(&a, &b, &mut rig, alpha);
    tracing::info!("Blended at alpha {alpha}: {} bones applied", report.applied_bones);
    let output = ApplyOutput {
        report,
        rotations: get_bone_rotations(&rig),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Describe a rig's bones.
///
/// # Errors
///
/// Returns an error if the rig cannot be loaded.
pub fn inspect_rig(rig_json: &str) -> anyhow::Result<String> {
    let rig = load_rig(rig_json)?;
    let rows: Vec<InspectRow> = rig
        .bone_info()
        .iter()
        .zip(rig.bones())
        .map(|(info, bone)| InspectRow {
            info: info.clone(),
            depth: bone.depth(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Run a command, reading its input files, and return the JSON to print.
///
/// # Errors
///
/// Returns an error if a file cannot be read or the command fails.
pub fn execute(command: &Command) -> anyhow::Result<String> {
    match command {
        Command::Validate { pose } => validate_pose(&read(pose)?),
        Command::Apply {
            rig,
            pose,
            canonical,
        } => apply_pose(&read(rig)?, &read(pose)?, *canonical),
        Command::Blend {
            rig,
            a,
            b,
            alpha,
            canonical,
        } => blend_poses(&read(rig)?, &read(a)?, &read(b)?, *alpha, *canonical),
        Command::Inspect { rig } => inspect_rig(&read(rig)?),
    }
}
