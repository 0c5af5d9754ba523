//! Bone hierarchy tree and skin offset table
//!
//! Both are produced by an external skeleton build step and consumed
//! read-only by the evaluators. Slot indices in the skin table are assigned
//! once per skeleton and stay stable across every clip sharing it.

use glam::Mat4;
use serde::{Deserialize, Serialize};

/// One node of the bone hierarchy: a name, the local rest transform, and
/// child nodes. Global transforms accumulate parent-to-child during the
/// evaluator walk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoneNode {
    pub name: String,
    pub transform: Mat4,
    #[serde(default)]
    pub children: Vec<BoneNode>,
}

/// One row of the skin table: a bone name, its bind-pose offset matrix, and
/// the output slot its final matrix is written to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkinEntry {
    pub bone_name: String,
    pub offset: Mat4,
    pub slot: usize,
}
