//! Playback state machine and hierarchical bone-transform evaluation
//!
//! The animator owns the final bone matrix buffer and tracks which clips
//! are active. Each frame it advances its clocks, picks one of three
//! evaluation modes (single clip, crossfade, or externally-driven blend),
//! and walks the bone hierarchy writing `global_transform * offset` into
//! the output slot of every skinned bone.

use glam::{Mat4, Quat, Vec3};

use crate::bone::Keyed;
use crate::clip::Clip;
use crate::library::{ClipId, ClipLibrary};
use crate::skeleton::BoneNode;

/// Default crossfade length, in seconds of the current clip's own time base.
const DEFAULT_FADE_SECONDS: f32 = 0.2;

/// Per-entity playback state machine and transform evaluator.
///
/// State transitions: idle → playing on the first [`Animator::play`];
/// playing → transitioning when a different clip is requested; back to
/// playing when the fade window elapses, or straight into a new fade when a
/// request was queued mid-fade. At most one queued clip is kept — the most
/// recent request wins.
///
/// The fade window is measured in the current clip's tick-scaled time, so a
/// faster clip fades over proportionally fewer wall-clock seconds.
pub struct Animator {
    final_bone_matrices: Vec<Mat4>,
    current: Option<ClipId>,
    next: Option<ClipId>,
    queued: Option<ClipId>,
    current_time: f32,
    transition_elapsed: f32,
    /// Timeline position of the outgoing clip frozen at the instant the
    /// fade began; the fade samples it there instead of letting it advance.
    halt_time: f32,
    transitioning: bool,
    fade_seconds: f32,
}

impl Animator {
    /// Create an animator with an output buffer of exactly `bone_count`
    /// slots, all initialized to identity. Size it from the same skeleton
    /// build step that assigned slot indices ([`Clip::slot_count`]).
    pub fn new(bone_count: usize) -> Self {
        Self {
            final_bone_matrices: vec![Mat4::IDENTITY; bone_count],
            current: None,
            next: None,
            queued: None,
            current_time: 0.0,
            transition_elapsed: 0.0,
            halt_time: 0.0,
            transitioning: false,
            fade_seconds: DEFAULT_FADE_SECONDS,
        }
    }

    /// Set the crossfade length in seconds of the current clip's time base.
    pub fn set_fade_seconds(&mut self, fade_seconds: f32) {
        self.fade_seconds = fade_seconds;
    }

    /// The frame's final bone matrices, one per output slot. Read after
    /// [`Animator::advance`] or [`Animator::blend`] returns for the frame.
    pub fn final_bone_matrices(&self) -> &[Mat4] {
        &self.final_bone_matrices
    }

    /// The clip currently driving the base animation.
    pub fn current_clip(&self) -> Option<ClipId> {
        self.current
    }

    /// The clip an active crossfade is heading toward.
    pub fn pending_clip(&self) -> Option<ClipId> {
        self.next
    }

    /// Whether a crossfade is in progress.
    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Elapsed time on the current clip's timeline, in ticks.
    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    /// Request a clip to play.
    ///
    /// Idle: the clip starts immediately with no fade. Mid-fade: the clip is
    /// queued behind the active fade unless it already is the fade target,
    /// replacing any earlier queued request. Steady playback: a crossfade
    /// toward the clip begins, freezing the outgoing clip at its current
    /// timeline position — unless the clip is already playing, which is a
    /// no-op.
    ///
    /// `_repeat` is accepted for call-site symmetry but not stored: a
    /// single current clip always loops, because [`Animator::advance`]
    /// wraps its clock modulo the clip duration.
    pub fn play(&mut self, library: &ClipLibrary, clip: ClipId, _repeat: bool) {
        let Some(current_id) = self.current else {
            self.current = Some(clip);
            return;
        };

        if self.transitioning {
            if Some(clip) != self.next {
                self.queued = Some(clip);
            }
            return;
        }

        if clip == current_id {
            return;
        }
        let Some(current) = library.get(current_id) else {
            return;
        };

        self.halt_time = self.current_time % current.duration;
        self.next = Some(clip);
        self.current_time = 0.0;
        self.transition_elapsed = 0.0;
        self.transitioning = true;
    }

    /// Advance playback by `dt` seconds and evaluate the frame's pose.
    ///
    /// Steady playback walks the current clip at its wrapped clock. During
    /// a crossfade the walk instead interpolates between the outgoing pose
    /// (frozen at the fade's halt time) and the incoming pose at time zero.
    /// When the fade window elapses with a clip queued, the fade target is
    /// promoted and the queued clip becomes the new target; that promotion
    /// frame evaluates no pose, so the buffer keeps the previous frame's
    /// matrices for one frame.
    pub fn advance(&mut self, library: &ClipLibrary, dt: f32) {
        let Some(current) = self.current.and_then(|id| library.get(id)) else {
            return;
        };

        self.current_time = (self.current_time + current.ticks_per_second * dt) % current.duration;
        let window = current.ticks_per_second * self.fade_seconds;

        if self.transitioning && self.transition_elapsed <= window {
            if let Some(incoming) = self.next.and_then(|id| library.get(id)) {
                self.transition_elapsed += current.ticks_per_second * dt;
                let halt_time = self.halt_time;
                let fade_time = self.transition_elapsed;
                self.crossfade_node(
                    incoming.root(),
                    Mat4::IDENTITY,
                    current,
                    incoming,
                    halt_time,
                    fade_time,
                    window,
                );
            }
            return;
        }

        if self.transitioning {
            if self.queued.is_some() {
                self.current = self.next;
                self.next = self.queued.take();
                self.halt_time = 0.0;
                self.current_time = 0.0;
                self.transition_elapsed = 0.0;
                return;
            }

            self.transitioning = false;
            self.current = self.next.take();
            self.current_time = 0.0;
            self.transition_elapsed = 0.0;
        }

        let Some(current) = self.current.and_then(|id| library.get(id)) else {
            return;
        };
        let time = self.current_time;
        self.pose_node(current.root(), Mat4::IDENTITY, current, time);
    }

    /// Evaluate a linear blend of two clips, independent of the fade state
    /// machine — `blend_factor` is caller-driven (e.g. locomotion speed).
    ///
    /// Both clips run off one shared clock, each wrapped by its own
    /// duration; the clock advances in clip A's time base. The factor is
    /// used as given: values outside `[0, 1]` extrapolate.
    pub fn blend(
        &mut self,
        library: &ClipLibrary,
        dt: f32,
        clip_a: ClipId,
        clip_b: ClipId,
        blend_factor: f32,
    ) {
        let (Some(a), Some(b)) = (library.get(clip_a), library.get(clip_b)) else {
            return;
        };

        let time_a = self.current_time % a.duration;
        let time_b = self.current_time % b.duration;

        self.blend_node(a.root(), Mat4::IDENTITY, a, b, time_a, time_b, blend_factor);

        self.current_time = (self.current_time + a.ticks_per_second * dt) % a.duration;
    }

    /// Steady-state walk: one clip drives every animated bone directly.
    fn pose_node(&mut self, node: &BoneNode, parent: Mat4, clip: &Clip, time: f32) {
        let local = match clip.find_bone(&node.name) {
            Some(track) => track.local_transform(time),
            None => node.transform,
        };

        let global = parent * local;

        if let Some(entry) = clip.skin_entry(&node.name) {
            self.final_bone_matrices[entry.slot] = global * entry.offset;
        }

        for child in &node.children {
            self.pose_node(child, global, clip, time);
        }
    }

    /// Crossfade walk over the incoming clip's hierarchy.
    ///
    /// The outgoing pose is sampled at the frozen halt time and re-stamped
    /// to the start of the fade timeline; the incoming pose is sampled at
    /// zero and re-stamped to the end of the window. `fade_time` then
    /// interpolates between them. Bones missing from either clip keep the
    /// node's rest transform.
    #[allow(clippy::too_many_arguments)]
    fn crossfade_node(
        &mut self,
        node: &BoneNode,
        parent: Mat4,
        outgoing: &Clip,
        incoming: &Clip,
        halt_time: f32,
        fade_time: f32,
        window: f32,
    ) {
        let mut local = node.transform;

        if let (Some(from), Some(to)) = (
            outgoing.find_bone(&node.name),
            incoming.find_bone(&node.name),
        ) {
            let mut from_position = from.sample_position(halt_time);
            let mut from_rotation = from.sample_rotation(halt_time);
            let mut from_scale = from.sample_scale(halt_time);
            from_position.time = 0.0;
            from_rotation.time = 0.0;
            from_scale.time = 0.0;

            let mut to_position = to.sample_position(0.0);
            let mut to_rotation = to.sample_rotation(0.0);
            let mut to_scale = to.sample_scale(0.0);
            to_position.time = window;
            to_rotation.time = window;
            to_scale.time = window;

            local = Mat4::from_scale_rotation_translation(
                lerp_keyed(&from_scale, &to_scale, fade_time),
                slerp_keyed(&from_rotation, &to_rotation, fade_time),
                lerp_keyed(&from_position, &to_position, fade_time),
            );
        }

        let global = parent * local;

        if let Some(entry) = incoming.skin_entry(&node.name) {
            self.final_bone_matrices[entry.slot] = global * entry.offset;
        }

        for child in &node.children {
            self.crossfade_node(child, global, outgoing, incoming, halt_time, fade_time, window);
        }
    }

    /// Blend walk over clip A's hierarchy: both clips sampled at their own
    /// wrapped times, combined by the caller's factor.
    #[allow(clippy::too_many_arguments)]
    fn blend_node(
        &mut self,
        node: &BoneNode,
        parent: Mat4,
        clip_a: &Clip,
        clip_b: &Clip,
        time_a: f32,
        time_b: f32,
        blend_factor: f32,
    ) {
        let mut local = node.transform;

        if let (Some(track_a), Some(track_b)) = (
            clip_a.find_bone(&node.name),
            clip_b.find_bone(&node.name),
        ) {
            let position = track_a
                .sample_position(time_a)
                .value
                .lerp(track_b.sample_position(time_b).value, blend_factor);
            let rotation = track_a
                .sample_rotation(time_a)
                .value
                .slerp(track_b.sample_rotation(time_b).value, blend_factor)
                .normalize();
            let scale = track_a
                .sample_scale(time_a)
                .value
                .lerp(track_b.sample_scale(time_b).value, blend_factor);

            local = Mat4::from_scale_rotation_translation(scale, rotation, position);
        }

        let global = parent * local;

        if let Some(entry) = clip_a.skin_entry(&node.name) {
            self.final_bone_matrices[entry.slot] = global * entry.offset;
        }

        for child in &node.children {
            self.blend_node(child, global, clip_a, clip_b, time_a, time_b, blend_factor);
        }
    }
}

/// Normalized interpolation factor for `time` between two keyed timestamps.
fn interpolation_factor(time: f32, start: f32, end: f32) -> f32 {
    let span = end - start;
    if span <= 0.0 {
        return 0.0;
    }
    (time - start) / span
}

fn lerp_keyed(a: &Keyed<Vec3>, b: &Keyed<Vec3>, time: f32) -> Vec3 {
    a.value.lerp(b.value, interpolation_factor(time, a.time, b.time))
}

fn slerp_keyed(a: &Keyed<Quat>, b: &Keyed<Quat>, time: f32) -> Quat {
    a.value
        .slerp(b.value, interpolation_factor(time, a.time, b.time))
        .normalize()
}
