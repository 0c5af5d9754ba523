//! Animation clip: hierarchy snapshot, per-bone tracks, and the skin table

use std::collections::{HashMap, HashSet};

use marrow_core::{MarrowError, Result};

use crate::bone::{BoneTrack, Keyed};
use crate::skeleton::{BoneNode, SkinEntry};

/// A named animation: duration and playback rate in the clip's own tick
/// units, a snapshot of the bone hierarchy, keyframe tracks per bone, and
/// the skin offset table.
///
/// Track and skin lookups are hash maps built once at construction, so the
/// per-frame tree walk resolves a node name in O(1) instead of scanning the
/// table at every visit.
#[derive(Debug, Clone)]
pub struct Clip {
    pub name: String,
    /// Total length in ticks
    pub duration: f32,
    /// Playback rate: ticks of clip time per second of wall time
    pub ticks_per_second: f32,
    root: BoneNode,
    tracks: HashMap<String, BoneTrack>,
    skin: Vec<SkinEntry>,
    skin_by_name: HashMap<String, usize>,
}

impl Clip {
    /// Build a clip, validating the data the evaluators rely on.
    ///
    /// Rejects non-positive duration or tick rate, unsorted keyframes,
    /// duplicate tracks for one bone, and skin entries that reuse a bone
    /// name or a slot. Slot capacity is the caller's concern beyond that:
    /// size the animator's buffer from [`Clip::slot_count`].
    pub fn new(
        name: impl Into<String>,
        duration: f32,
        ticks_per_second: f32,
        root: BoneNode,
        tracks: Vec<BoneTrack>,
        skin: Vec<SkinEntry>,
    ) -> Result<Self> {
        let name = name.into();

        if !(duration > 0.0) {
            return Err(MarrowError::ClipError(format!(
                "Clip '{}' has non-positive duration: {}",
                name, duration
            )));
        }
        if !(ticks_per_second > 0.0) {
            return Err(MarrowError::ClipError(format!(
                "Clip '{}' has non-positive tick rate: {}",
                name, ticks_per_second
            )));
        }

        let mut track_map = HashMap::with_capacity(tracks.len());
        for track in tracks {
            if !sorted_by_time(&track.positions)
                || !sorted_by_time(&track.rotations)
                || !sorted_by_time(&track.scales)
            {
                return Err(MarrowError::ClipError(format!(
                    "Clip '{}' bone '{}' has unsorted keyframes",
                    name, track.bone_name
                )));
            }
            let bone_name = track.bone_name.clone();
            if track_map.insert(bone_name.clone(), track).is_some() {
                return Err(MarrowError::ClipError(format!(
                    "Clip '{}' has duplicate track for bone '{}'",
                    name, bone_name
                )));
            }
        }

        let mut skin_by_name = HashMap::with_capacity(skin.len());
        let mut used_slots = HashSet::with_capacity(skin.len());
        for (i, entry) in skin.iter().enumerate() {
            if skin_by_name.insert(entry.bone_name.clone(), i).is_some() {
                return Err(MarrowError::ClipError(format!(
                    "Clip '{}' has duplicate skin entry for bone '{}'",
                    name, entry.bone_name
                )));
            }
            if !used_slots.insert(entry.slot) {
                return Err(MarrowError::ClipError(format!(
                    "Clip '{}' assigns slot {} twice",
                    name, entry.slot
                )));
            }
        }

        Ok(Self {
            name,
            duration,
            ticks_per_second,
            root,
            tracks: track_map,
            skin,
            skin_by_name,
        })
    }

    /// Root of the bone hierarchy snapshot.
    pub fn root(&self) -> &BoneNode {
        &self.root
    }

    /// Keyframe track for a bone, if the clip animates it.
    pub fn find_bone(&self, bone_name: &str) -> Option<&BoneTrack> {
        self.tracks.get(bone_name)
    }

    /// Skin table entry for a bone, if it has an output slot.
    pub fn skin_entry(&self, bone_name: &str) -> Option<&SkinEntry> {
        self.skin_by_name
            .get(bone_name)
            .map(|&i| &self.skin[i])
    }

    /// The skin table in its build order.
    pub fn skin(&self) -> &[SkinEntry] {
        &self.skin
    }

    /// Number of output slots this clip writes to (highest slot + 1).
    /// Use this to size the animator's bone matrix buffer.
    pub fn slot_count(&self) -> usize {
        self.skin.iter().map(|e| e.slot + 1).max().unwrap_or(0)
    }
}

fn sorted_by_time<T>(keys: &[Keyed<T>]) -> bool {
    keys.windows(2).all(|w| w[0].time <= w[1].time)
}
