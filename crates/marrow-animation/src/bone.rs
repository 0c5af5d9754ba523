//! Per-bone keyframe tracks — binary search + interpolation

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A sampled value paired with the timeline position it belongs to.
///
/// `time` is plain data on purpose: the crossfade evaluator re-stamps it to
/// place two samples on a shared fade timeline before interpolating.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Keyed<T> {
    pub value: T,
    pub time: f32,
}

/// Keyframe tracks for a single bone: position, rotation, and scale keys,
/// each sorted by time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoneTrack {
    pub bone_name: String,
    #[serde(default)]
    pub positions: Vec<Keyed<Vec3>>,
    #[serde(default)]
    pub rotations: Vec<Keyed<Quat>>,
    #[serde(default)]
    pub scales: Vec<Keyed<Vec3>>,
}

impl BoneTrack {
    /// Interpolated translation at `time`, clamped to the first/last key.
    pub fn sample_position(&self, time: f32) -> Keyed<Vec3> {
        sample_keys(&self.positions, time, Vec3::ZERO, |a, b, t| a.lerp(b, t))
    }

    /// Interpolated rotation at `time`. Always returns a unit quaternion.
    pub fn sample_rotation(&self, time: f32) -> Keyed<Quat> {
        let sampled = sample_keys(&self.rotations, time, Quat::IDENTITY, |a, b, t| a.slerp(b, t));
        Keyed {
            value: sampled.value.normalize(),
            time: sampled.time,
        }
    }

    /// Interpolated scale at `time`, clamped to the first/last key.
    pub fn sample_scale(&self, time: f32) -> Keyed<Vec3> {
        sample_keys(&self.scales, time, Vec3::ONE, |a, b, t| a.lerp(b, t))
    }

    /// Composed local transform (translation * rotation * scale) at `time`.
    pub fn local_transform(&self, time: f32) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.sample_scale(time).value,
            self.sample_rotation(time).value,
            self.sample_position(time).value,
        )
    }
}

/// Sample a sorted key list at `time`.
///
/// Clamps before the first and after the last key, binary-searches the
/// surrounding pair otherwise. An empty list degrades to `rest`.
fn sample_keys<T: Copy>(keys: &[Keyed<T>], time: f32, rest: T, interp: fn(T, T, f32) -> T) -> Keyed<T> {
    let Some(first) = keys.first() else {
        return Keyed { value: rest, time };
    };

    if time <= first.time {
        return Keyed { value: first.value, time };
    }

    let last = &keys[keys.len() - 1];
    if time >= last.time {
        return Keyed { value: last.value, time };
    }

    let idx = match keys.binary_search_by(|k| k.time.partial_cmp(&time).unwrap()) {
        Ok(i) => return Keyed { value: keys[i].value, time }, // exact match
        Err(i) => i, // time lies between keys[i - 1] and keys[i]
    };

    let prev = &keys[idx - 1];
    let next = &keys[idx];

    let span = next.time - prev.time;
    if span <= 0.0 {
        return Keyed { value: prev.value, time };
    }
    let t = (time - prev.time) / span;

    Keyed {
        value: interp(prev.value, next.value, t),
        time,
    }
}
