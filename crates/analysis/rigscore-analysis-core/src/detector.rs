//! Activity detection: which rig components can matter during an animation.
//!
//! Two passes feed one [`ActiveComponentSet`]:
//! - dynamic: every sampled pose contributes its visible slots, meshes, clipping masks,
//!   bone chains and influencing constraints;
//! - static: constraint and deform timelines mark their targets active regardless of what
//!   sampling saw, so a narrow keyed window between samples is never missed.

use rigscore_rig_core::{Animation, Attachment, Pose, PoseEvaluator, Rig, TimelineTarget};

use crate::active::{ActiveComponentSet, AttachmentKey};
use crate::error::AnalysisError;
use crate::sampler::TimeSampler;

pub struct ActivityDetector<'r> {
    rig: &'r Rig,
    active: ActiveComponentSet,
}

impl<'r> ActivityDetector<'r> {
    pub fn new(rig: &'r Rig) -> Self {
        Self {
            rig,
            active: ActiveComponentSet::new(),
        }
    }

    /// Dynamic pass over one pose snapshot.
    pub fn observe_pose(&mut self, pose: &Pose) {
        let rig = self.rig;
        self.active.samples_taken += 1;

        for (slot, slot_pose) in rig.slots.iter().zip(pose.slots.iter()) {
            if slot_pose.alpha <= 0.0 {
                continue;
            }
            let Some(name) = slot_pose.attachment.as_deref() else {
                continue;
            };
            if !self.active.slots.contains(&slot.name) {
                self.active.slots.insert(slot.name.clone());
            }
            match slot.attachments.get(name) {
                Some(Attachment::Mesh(_)) => {
                    self.active
                        .meshes
                        .insert(AttachmentKey::new(&slot.name, name));
                }
                Some(Attachment::Clipping(_)) => {
                    self.active.has_clipping = true;
                    self.active
                        .clipping
                        .insert(AttachmentKey::new(&slot.name, name));
                }
                Some(
                    Attachment::Region(_) | Attachment::BoundingBox(_) | Attachment::Path(_),
                ) => {}
                None => {
                    log::trace!("slot '{}' shows unknown attachment '{name}'", slot.name);
                }
            }
            if !slot_pose.blend_mode.is_normal() {
                self.active.has_blend_modes = true;
            }
            self.add_bone_chain(slot.bone);
        }

        let tracked = rig.constraints.len();
        for (index, state) in pose.constraints.iter().take(tracked).enumerate() {
            if state.active && state.mix.has_influence() {
                self.add_constraint(index);
            }
        }
    }

    /// Static pass over the animation's timelines. Stale references are skipped.
    pub fn scan_timelines(&mut self, animation: &Animation) {
        let rig = self.rig;
        for timeline in &animation.timelines {
            if let Some((index, kind)) = timeline.target.constraint() {
                match rig.constraint(index) {
                    Some(data) if data.kind() == kind => self.add_constraint(index),
                    Some(data) => log::warn!(
                        "animation '{}': {:?} timeline targets {:?} constraint '{}', skipped",
                        animation.name,
                        kind,
                        data.kind(),
                        data.name()
                    ),
                    None => log::warn!(
                        "animation '{}': timeline references missing constraint #{index}",
                        animation.name
                    ),
                }
                continue;
            }

            if let TimelineTarget::Deform { slot, attachment } = &timeline.target {
                let Some(slot_data) = rig.slot(*slot) else {
                    log::warn!(
                        "animation '{}': deform timeline references missing slot #{slot}",
                        animation.name
                    );
                    continue;
                };
                match slot_data.attachments.get(attachment.as_str()) {
                    Some(att) => {
                        if matches!(att, Attachment::Mesh(_)) {
                            self.active
                                .meshes
                                .insert(AttachmentKey::new(&slot_data.name, attachment));
                        }
                        if !self.active.slots.contains(&slot_data.name) {
                            self.active.slots.insert(slot_data.name.clone());
                        }
                        self.add_bone_chain(slot_data.bone);
                    }
                    None => log::warn!(
                        "animation '{}': deform timeline references missing attachment '{}:{}'",
                        animation.name,
                        slot_data.name,
                        attachment
                    ),
                }
            }
        }
    }

    pub fn finish(self) -> ActiveComponentSet {
        self.active
    }

    fn add_bone_chain(&mut self, bone: usize) {
        for index in self.rig.bone_chain(bone) {
            let name = &self.rig.bones[index].name;
            if !self.active.bones.contains(name) {
                self.active.bones.insert(name.clone());
            }
        }
    }

    fn add_constraint(&mut self, index: usize) {
        let Some(data) = self.rig.constraint(index) else {
            return;
        };
        self.active.insert_constraint(data.kind(), data.name());
        for bone in data.bones() {
            match self.rig.bone(*bone) {
                Some(b) => {
                    if !self.active.bones.contains(&b.name) {
                        self.active.bones.insert(b.name.clone());
                    }
                }
                None => log::warn!(
                    "constraint '{}' references missing bone #{bone}",
                    data.name()
                ),
            }
        }
    }
}

/// Run both detection passes for `animation`.
pub fn detect_active_components<E>(
    evaluator: &mut E,
    rig: &Rig,
    animation: &Animation,
    sampler: &TimeSampler,
) -> Result<ActiveComponentSet, AnalysisError>
where
    E: PoseEvaluator + ?Sized,
{
    let mut detector = ActivityDetector::new(rig);
    sampler.sample(evaluator, animation, |pose, _| {
        detector.observe_pose(pose);
        Ok(())
    })?;
    detector.scan_timelines(animation);
    Ok(detector.finish())
}
