//! Fluent construction of in-memory rigs for tests and benches.
//!
//! Bones and slots are referenced by name and resolved to indices as they are added,
//! so parents and slot bones must be declared first.

use rigscore_rig_core::{
    Animation, Attachment, BlendMode, BoneData, ConstraintData, KeyValue, Rig, SlotData,
    Timeline, TimelineTarget,
};

#[derive(Debug, Default)]
pub struct RigBuilder {
    rig: Rig,
}

impl RigBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            rig: Rig::new(name),
        }
    }

    fn bone_index(&self, name: &str) -> usize {
        self.rig
            .find_bone(name)
            .unwrap_or_else(|| panic!("fixture rig has no bone '{name}'"))
    }

    fn slot_mut(&mut self, name: &str) -> &mut SlotData {
        self.rig
            .slots
            .iter_mut()
            .find(|s| s.name == name)
            .unwrap_or_else(|| panic!("fixture rig has no slot '{name}'"))
    }

    pub fn bone(mut self, name: &str, parent: Option<&str>) -> Self {
        let parent = parent.map(|p| self.bone_index(p));
        self.rig.bones.push(BoneData::new(name, parent));
        self
    }

    pub fn slot(mut self, name: &str, bone: &str) -> Self {
        let bone = self.bone_index(bone);
        self.rig.slots.push(SlotData::new(name, bone));
        self
    }

    pub fn blend_mode(mut self, slot: &str, mode: BlendMode) -> Self {
        self.slot_mut(slot).blend_mode = mode;
        self
    }

    pub fn alpha(mut self, slot: &str, alpha: f32) -> Self {
        self.slot_mut(slot).alpha = alpha;
        self
    }

    /// Register `attachment` under `name`; the first one registered becomes the setup attachment.
    pub fn attachment(mut self, slot: &str, name: &str, attachment: Attachment) -> Self {
        let s = self.slot_mut(slot);
        if s.attachment.is_none() && s.attachments.is_empty() {
            s.attachment = Some(name.to_string());
        }
        s.attachments.insert(name.to_string(), attachment);
        self
    }

    /// Override the setup attachment (`None` hides the slot at setup).
    pub fn setup_attachment(mut self, slot: &str, name: Option<&str>) -> Self {
        self.slot_mut(slot).attachment = name.map(str::to_string);
        self
    }

    pub fn constraint(mut self, constraint: impl Into<ConstraintData>) -> Self {
        self.rig.constraints.push(constraint.into());
        self
    }

    pub fn animation(mut self, animation: Animation) -> Self {
        self.rig.animations.push(animation);
        self
    }

    pub fn build(self) -> Rig {
        self.rig
    }
}

/// Builds an [`Animation`] whose timelines address slots, bones and constraints by index.
#[derive(Debug)]
pub struct AnimationBuilder {
    animation: Animation,
}

impl AnimationBuilder {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            animation: Animation::new(name, duration),
        }
    }

    pub fn timeline(mut self, timeline: Timeline) -> Self {
        self.animation.timelines.push(timeline);
        self
    }

    fn scalar_keys(self, target: TimelineTarget, keys: &[(f32, f32)]) -> Self {
        let timeline = keys.iter().fold(Timeline::new(target), |t, (time, v)| {
            t.with_key(*time, KeyValue::Scalar(*v))
        });
        self.timeline(timeline)
    }

    fn channel_keys<const N: usize>(self, target: TimelineTarget, keys: &[(f32, [f32; N])]) -> Self {
        let timeline = keys.iter().fold(Timeline::new(target), |t, (time, v)| {
            t.with_key(*time, KeyValue::Channels(v.to_vec()))
        });
        self.timeline(timeline)
    }

    pub fn attachment_keys(self, slot: usize, keys: &[(f32, Option<&str>)]) -> Self {
        let timeline = keys.iter().fold(
            Timeline::new(TimelineTarget::Attachment { slot }),
            |t, (time, name)| t.with_key(*time, KeyValue::Attachment(name.map(str::to_string))),
        );
        self.timeline(timeline)
    }

    pub fn alpha_keys(self, slot: usize, keys: &[(f32, f32)]) -> Self {
        self.scalar_keys(TimelineTarget::Alpha { slot }, keys)
    }

    pub fn rotate_keys(self, bone: usize, keys: &[(f32, f32)]) -> Self {
        self.scalar_keys(TimelineTarget::Rotate { bone }, keys)
    }

    pub fn translate_keys(self, bone: usize, keys: &[(f32, [f32; 2])]) -> Self {
        self.channel_keys(TimelineTarget::Translate { bone }, keys)
    }

    /// A deform timeline with a single empty-offset key.
    pub fn deform(self, slot: usize, attachment: &str) -> Self {
        self.timeline(
            Timeline::new(TimelineTarget::Deform {
                slot,
                attachment: attachment.to_string(),
            })
            .with_key(0.0, KeyValue::Channels(Vec::new())),
        )
    }

    pub fn ik_mix_keys(self, constraint: usize, keys: &[(f32, f32)]) -> Self {
        self.scalar_keys(TimelineTarget::Ik { constraint }, keys)
    }

    pub fn transform_mix_keys(self, constraint: usize, keys: &[(f32, [f32; 6])]) -> Self {
        self.channel_keys(TimelineTarget::Transform { constraint }, keys)
    }

    pub fn path_mix_keys(self, constraint: usize, keys: &[(f32, [f32; 3])]) -> Self {
        self.channel_keys(TimelineTarget::PathMix { constraint }, keys)
    }

    pub fn path_spacing_keys(self, constraint: usize, keys: &[(f32, f32)]) -> Self {
        self.scalar_keys(TimelineTarget::PathSpacing { constraint }, keys)
    }

    pub fn physics_mix_keys(self, constraint: usize, keys: &[(f32, f32)]) -> Self {
        self.scalar_keys(TimelineTarget::Physics { constraint }, keys)
    }

    pub fn build(self) -> Animation {
        self.animation
    }
}
