//! Skeletal animation playback for the Marrow engine
//!
//! The pipeline, once per frame:
//! 1. Game logic requests clips via [`Animator::play`] (or drives
//!    [`Animator::blend`] directly, e.g. from locomotion speed)
//! 2. [`Animator::advance`] moves the playback clocks, picks the evaluation
//!    mode (single clip, crossfade, or blend), and walks the bone hierarchy
//! 3. The walk writes `global_transform * offset` per bone into the final
//!    bone matrix buffer, read back via [`Animator::final_bone_matrices`]
//!    for GPU skinning
//!
//! Clips are owned by a [`ClipLibrary`]; the animator only ever holds
//! [`ClipId`] handles into it.

pub mod animator;
pub mod bone;
pub mod clip;
pub mod library;
pub mod loader;
pub mod skeleton;

pub use animator::Animator;
pub use bone::{BoneTrack, Keyed};
pub use clip::Clip;
pub use library::{ClipId, ClipLibrary};
pub use loader::load_clip_from_file;
pub use skeleton::{BoneNode, SkinEntry};
