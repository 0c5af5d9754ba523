//! Clip registry — caller-owned storage the animator borrows per call

use std::collections::HashMap;

use crate::clip::Clip;

/// Stable handle to a clip in a [`ClipLibrary`].
///
/// Handles are only minted by the owning library and clips are never
/// removed, so a stored handle cannot dangle the way a raw clip reference
/// would across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipId(u32);

/// Holds all loaded clips, addressable by handle or by name.
pub struct ClipLibrary {
    clips: Vec<Clip>,
    by_name: HashMap<String, ClipId>,
}

impl ClipLibrary {
    pub fn new() -> Self {
        Self {
            clips: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Register a clip. Re-registering a name replaces the clip in place,
    /// so handles handed out earlier stay valid.
    pub fn add_clip(&mut self, clip: Clip) -> ClipId {
        if let Some(&id) = self.by_name.get(&clip.name) {
            self.clips[id.0 as usize] = clip;
            return id;
        }
        let id = ClipId(self.clips.len() as u32);
        self.by_name.insert(clip.name.clone(), id);
        self.clips.push(clip);
        id
    }

    /// Look up a clip by handle.
    pub fn get(&self, id: ClipId) -> Option<&Clip> {
        self.clips.get(id.0 as usize)
    }

    /// Look up a clip's handle by name.
    pub fn find(&self, name: &str) -> Option<ClipId> {
        self.by_name.get(name).copied()
    }

    /// Look up a clip by name.
    pub fn get_by_name(&self, name: &str) -> Option<&Clip> {
        self.find(name).and_then(|id| self.get(id))
    }

    /// Number of registered clips.
    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }
}

impl Default for ClipLibrary {
    fn default() -> Self {
        Self::new()
    }
}
