//! Live pose snapshot and the pose-evaluator boundary.
//!
//! A [`Pose`] is index-aligned with the rig: `bones[i]` belongs to `rig.bones[i]`, and
//! likewise for slots and constraints.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::data::{BlendMode, ConstraintData, PathMix, Rig, Transform2, TransformMix};
use crate::error::PoseError;

/// Resolved world transform of one bone (2x2 matrix plus translation).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct BonePose {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub world_x: f32,
    pub world_y: f32,
}

impl Default for BonePose {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            world_x: 0.0,
            world_y: 0.0,
        }
    }
}

impl BonePose {
    /// Compose a local transform onto its parent's world transform.
    pub fn compose(parent: Option<&BonePose>, local: &Transform2) -> Self {
        let rot_x = (local.rotation + local.shear_x).to_radians();
        let rot_y = (local.rotation + 90.0 + local.shear_y).to_radians();
        let la = rot_x.cos() * local.scale_x;
        let lc = rot_x.sin() * local.scale_x;
        let lb = rot_y.cos() * local.scale_y;
        let ld = rot_y.sin() * local.scale_y;

        let p = parent.copied().unwrap_or_default();
        Self {
            a: p.a * la + p.b * lc,
            b: p.a * lb + p.b * ld,
            c: p.c * la + p.d * lc,
            d: p.c * lb + p.d * ld,
            world_x: p.a * local.x + p.b * local.y + p.world_x,
            world_y: p.c * local.x + p.d * local.y + p.world_y,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlotPose {
    pub attachment: Option<String>,
    pub alpha: f32,
    pub blend_mode: BlendMode,
}

impl SlotPose {
    /// Shown this frame: has an attachment and non-zero opacity.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0 && self.attachment.is_some()
    }
}

/// Current influence of a constraint, shaped by its kind.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ConstraintMix {
    Ik { mix: f32 },
    Transform(TransformMix),
    Path(PathMix),
    Physics { mix: f32 },
}

impl ConstraintMix {
    /// Setup-pose influence of a constraint.
    pub fn setup(data: &ConstraintData) -> Self {
        match data {
            ConstraintData::Ik(c) => ConstraintMix::Ik { mix: c.mix },
            ConstraintData::Transform(c) => ConstraintMix::Transform(c.mix),
            ConstraintData::Path(c) => ConstraintMix::Path(c.mix),
            ConstraintData::Physics(c) => ConstraintMix::Physics { mix: c.mix },
        }
    }

    /// True when at least one affected channel has influence above zero.
    pub fn has_influence(&self) -> bool {
        match self {
            ConstraintMix::Ik { mix } | ConstraintMix::Physics { mix } => *mix > 0.0,
            ConstraintMix::Transform(m) => m.channels().iter().any(|c| *c > 0.0),
            ConstraintMix::Path(m) => m.channels().iter().any(|c| *c > 0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ConstraintPose {
    pub active: bool,
    pub mix: ConstraintMix,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Pose {
    pub bones: Vec<BonePose>,
    pub slots: Vec<SlotPose>,
    pub constraints: Vec<ConstraintPose>,
}

impl Pose {
    /// The rig's setup pose with world transforms resolved.
    pub fn setup(rig: &Rig) -> Self {
        let locals: Vec<Transform2> = rig.bones.iter().map(|b| b.local).collect();
        let mut pose = Self {
            bones: Vec::with_capacity(rig.bones.len()),
            slots: rig
                .slots
                .iter()
                .map(|s| SlotPose {
                    attachment: s.attachment.clone(),
                    alpha: s.alpha,
                    blend_mode: s.blend_mode,
                })
                .collect(),
            constraints: rig
                .constraints
                .iter()
                .map(|c| ConstraintPose {
                    active: true,
                    mix: ConstraintMix::setup(c),
                })
                .collect(),
        };
        pose.resolve_world(rig, &locals);
        pose
    }

    /// Recompute every bone's world transform from `locals`.
    /// A parent that does not precede its child is treated as absent.
    pub fn resolve_world(&mut self, rig: &Rig, locals: &[Transform2]) {
        self.bones.clear();
        for (i, bone) in rig.bones.iter().enumerate() {
            let local = locals.get(i).copied().unwrap_or(bone.local);
            let parent = bone.parent.filter(|p| *p < i).map(|p| self.bones[p]);
            let world = BonePose::compose(parent.as_ref(), &local);
            self.bones.push(world);
        }
    }
}

/// Snapshot of what is queued on an animation track.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackEntry {
    pub animation: String,
    pub time: f32,
    pub looping: bool,
}

/// Capability surface of an external skeletal-pose evaluator.
///
/// The evaluator owns the rig's transient pose. Callers set an animation on a track,
/// position the track time, then call [`apply_and_resolve`](Self::apply_and_resolve)
/// which applies keyframe values with a zero time delta and resolves world transforms.
pub trait PoseEvaluator {
    fn rig(&self) -> Arc<Rig>;

    /// The live pose as of the last resolve.
    fn pose(&self) -> &Pose;

    fn current_track(&self, track: usize) -> Option<TrackEntry>;

    fn set_animation(&mut self, track: usize, animation: &str, looping: bool)
        -> Result<(), PoseError>;

    fn set_track_time(&mut self, track: usize, time: f32) -> Result<(), PoseError>;

    fn clear_track(&mut self, track: usize);

    /// Reset bones, slots and constraints to the setup pose.
    fn set_to_setup_pose(&mut self);

    fn apply_and_resolve(&mut self) -> Result<(), PoseError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{BoneData, IkConstraintData, SlotData};
    use approx::assert_relative_eq;

    #[test]
    fn compose_child_inherits_parent_translation_and_rotation() {
        let parent = BonePose::compose(
            None,
            &Transform2 {
                x: 10.0,
                rotation: 90.0,
                ..Transform2::default()
            },
        );
        let child = BonePose::compose(
            Some(&parent),
            &Transform2 {
                x: 5.0,
                ..Transform2::default()
            },
        );
        assert_relative_eq!(child.world_x, 10.0, epsilon = 1e-4);
        assert_relative_eq!(child.world_y, 5.0, epsilon = 1e-4);
    }

    #[test]
    fn mix_influence_rules() {
        assert!(!ConstraintMix::Ik { mix: 0.0 }.has_influence());
        assert!(ConstraintMix::Physics { mix: 0.1 }.has_influence());
        let mut t = TransformMix::default();
        assert!(!ConstraintMix::Transform(t).has_influence());
        t.shear_y = 0.25;
        assert!(ConstraintMix::Transform(t).has_influence());
        let p = PathMix {
            rotate: 0.0,
            x: 0.0,
            y: 0.5,
        };
        assert!(ConstraintMix::Path(p).has_influence());
    }

    #[test]
    fn setup_pose_is_index_aligned() {
        let mut rig = Rig::new("r");
        rig.bones.push(BoneData::new("root", None));
        rig.bones.push(BoneData::new("arm", Some(0)));
        let mut slot = SlotData::new("arm", 1);
        slot.attachment = Some("sleeve".into());
        rig.slots.push(slot);
        rig.constraints
            .push(ConstraintData::Ik(IkConstraintData::new("reach", vec![1], 0)));

        let pose = Pose::setup(&rig);
        assert_eq!(pose.bones.len(), 2);
        assert!(pose.slots[0].is_visible());
        assert_eq!(pose.constraints[0].mix, ConstraintMix::Ik { mix: 1.0 });
    }
}
