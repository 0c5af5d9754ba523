//! TOML-based clip loading

use std::path::Path;

use marrow_core::{MarrowError, Result};
use serde::Deserialize;

use crate::bone::BoneTrack;
use crate::clip::Clip;
use crate::skeleton::{BoneNode, SkinEntry};

/// Serde mirror of a clip file; funneled through [`Clip::new`] so file data
/// gets the same validation as programmatic construction.
#[derive(Debug, Deserialize)]
struct ClipFile {
    name: String,
    duration: f32,
    ticks_per_second: f32,
    root: BoneNode,
    #[serde(default)]
    tracks: Vec<BoneTrack>,
    #[serde(default)]
    skin: Vec<SkinEntry>,
}

/// Load an animation clip from a `.clip.toml` file.
///
/// The file format mirrors the clip data model (matrices are flat arrays of
/// 16 column-major floats, quaternions are `[x, y, z, w]`):
/// ```toml
/// name = "wave"
/// duration = 2.0
/// ticks_per_second = 24.0
///
/// [root]
/// name = "Hips"
/// transform = [1.0, 0.0, ...]
///
/// [[tracks]]
/// bone_name = "Hips"
/// positions = [{ time = 0.0, value = [0.0, 0.0, 0.0] }]
/// # ...rotations, scales
///
/// [[skin]]
/// bone_name = "Hips"
/// slot = 0
/// offset = [1.0, 0.0, ...]
/// ```
pub fn load_clip_from_file(path: &Path) -> Result<Clip> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        MarrowError::ClipError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    load_clip_from_str(&content, path)
}

/// Parse an animation clip from a TOML string.
fn load_clip_from_str(content: &str, path: &Path) -> Result<Clip> {
    let file: ClipFile = toml::from_str(content).map_err(|e| {
        MarrowError::ClipError(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    Clip::new(
        file.name,
        file.duration,
        file.ticks_per_second,
        file.root,
        file.tracks,
        file.skin,
    )
}
