//! Deterministic keyframe-driven pose evaluator.
//!
//! Applies timelines on top of the setup pose at the track's current time: attachment
//! keys hold the previous key, scalar and multi-channel keys interpolate linearly, and
//! nothing is keyed before its first key. Deform, path position/spacing, draw-order and
//! event timelines have no effect on the pose. Physics is not simulated.

use std::sync::Arc;

use hashbrown::{HashMap, HashSet};

use rigscore_rig_core::{
    ConstraintMix, KeyValue, Keyframe, Pose, PoseError, PoseEvaluator, Rig, TimelineTarget,
    TrackEntry, Transform2,
};

#[derive(Clone, Debug)]
struct TrackState {
    animation: usize,
    time: f32,
    looping: bool,
}

#[derive(Debug)]
pub struct KeyframeEvaluator {
    rig: Arc<Rig>,
    by_name: HashMap<String, usize>,
    pose: Pose,
    locals: Vec<Transform2>,
    tracks: Vec<Option<TrackState>>,
    inactive: HashSet<usize>,
    fail_from: Option<f32>,
    resolves: usize,
}

impl KeyframeEvaluator {
    pub fn new(rig: Rig) -> Self {
        Self::from_arc(Arc::new(rig))
    }

    pub fn from_arc(rig: Arc<Rig>) -> Self {
        let by_name = rig
            .animations
            .iter()
            .enumerate()
            .map(|(i, a)| (a.name.clone(), i))
            .collect();
        let mut eval = Self {
            pose: Pose::setup(&rig),
            locals: rig.bones.iter().map(|b| b.local).collect(),
            rig,
            by_name,
            tracks: Vec::new(),
            inactive: HashSet::new(),
            fail_from: None,
            resolves: 0,
        };
        eval.apply_inactive();
        eval
    }

    /// Report constraint `index` as inactive (e.g. gated by an unequipped skin).
    pub fn deactivate_constraint(&mut self, index: usize) {
        self.inactive.insert(index);
        self.apply_inactive();
    }

    /// Make every resolve at a track time `>= time` fail.
    pub fn fail_from(&mut self, time: f32) {
        self.fail_from = Some(time);
    }

    pub fn clear_failure(&mut self) {
        self.fail_from = None;
    }

    /// Number of successful `apply_and_resolve` calls.
    pub fn resolve_count(&self) -> usize {
        self.resolves
    }

    fn apply_inactive(&mut self) {
        for index in &self.inactive {
            if let Some(c) = self.pose.constraints.get_mut(*index) {
                c.active = false;
            }
        }
    }

    fn reset_to_setup(&mut self) {
        self.pose = Pose::setup(&self.rig);
        self.locals.clear();
        self.locals.extend(self.rig.bones.iter().map(|b| b.local));
        self.apply_inactive();
    }

    fn apply_track(&mut self, state: &TrackState) {
        let rig = Arc::clone(&self.rig);
        let Some(animation) = rig.animations.get(state.animation) else {
            return;
        };
        let time = if state.looping && animation.duration > 0.0 {
            state.time % animation.duration
        } else {
            state.time
        };

        for timeline in &animation.timelines {
            let keys = &timeline.keys;
            match &timeline.target {
                TimelineTarget::Attachment { slot } => {
                    if let (Some(s), Some(KeyValue::Attachment(name))) =
                        (self.pose.slots.get_mut(*slot), held(keys, time))
                    {
                        s.attachment = name.clone();
                    }
                }
                TimelineTarget::Alpha { slot } => {
                    if let (Some(s), Some(v)) = (self.pose.slots.get_mut(*slot), scalar(keys, time))
                    {
                        s.alpha = v;
                    }
                }
                TimelineTarget::Rotate { bone } => {
                    if let (Some(l), Some(v)) = (self.locals.get_mut(*bone), scalar(keys, time)) {
                        l.rotation = v;
                    }
                }
                TimelineTarget::Translate { bone } => {
                    if let (Some(l), Some(v)) = (self.locals.get_mut(*bone), channels(keys, time)) {
                        l.x = v.first().copied().unwrap_or(l.x);
                        l.y = v.get(1).copied().unwrap_or(l.y);
                    }
                }
                TimelineTarget::Scale { bone } => {
                    if let (Some(l), Some(v)) = (self.locals.get_mut(*bone), channels(keys, time)) {
                        l.scale_x = v.first().copied().unwrap_or(l.scale_x);
                        l.scale_y = v.get(1).copied().unwrap_or(l.scale_y);
                    }
                }
                TimelineTarget::Shear { bone } => {
                    if let (Some(l), Some(v)) = (self.locals.get_mut(*bone), channels(keys, time)) {
                        l.shear_x = v.first().copied().unwrap_or(l.shear_x);
                        l.shear_y = v.get(1).copied().unwrap_or(l.shear_y);
                    }
                }
                TimelineTarget::Ik { constraint } | TimelineTarget::Physics { constraint } => {
                    let Some(c) = self.pose.constraints.get_mut(*constraint) else {
                        continue;
                    };
                    let Some(v) = scalar(keys, time) else {
                        continue;
                    };
                    match &mut c.mix {
                        ConstraintMix::Ik { mix } | ConstraintMix::Physics { mix } => *mix = v,
                        _ => log::warn!("scalar mix timeline on non-scalar constraint"),
                    }
                }
                TimelineTarget::Transform { constraint } | TimelineTarget::PathMix { constraint } => {
                    let Some(c) = self.pose.constraints.get_mut(*constraint) else {
                        continue;
                    };
                    let Some(v) = channels(keys, time) else {
                        continue;
                    };
                    match &mut c.mix {
                        ConstraintMix::Transform(m) => {
                            let mut ch = m.channels();
                            for (dst, src) in ch.iter_mut().zip(v.iter()) {
                                *dst = *src;
                            }
                            *m = rigscore_rig_core::TransformMix::from_channels(ch);
                        }
                        ConstraintMix::Path(m) => {
                            let mut ch = m.channels();
                            for (dst, src) in ch.iter_mut().zip(v.iter()) {
                                *dst = *src;
                            }
                            *m = rigscore_rig_core::PathMix::from_channels(ch);
                        }
                        _ => log::warn!("channel mix timeline on scalar constraint"),
                    }
                }
                TimelineTarget::Deform { .. }
                | TimelineTarget::PathPosition { .. }
                | TimelineTarget::PathSpacing { .. }
                | TimelineTarget::DrawOrder
                | TimelineTarget::Event => {}
            }
        }
    }
}

/// Index of the last key at or before `time`.
fn key_index(keys: &[Keyframe], time: f32) -> Option<usize> {
    if keys.first().map_or(true, |k| time < k.time) {
        return None;
    }
    Some(keys.iter().rposition(|k| k.time <= time).unwrap_or(0))
}

fn held(keys: &[Keyframe], time: f32) -> Option<&KeyValue> {
    key_index(keys, time).map(|i| &keys[i].value)
}

fn scalar(keys: &[Keyframe], time: f32) -> Option<f32> {
    let i = key_index(keys, time)?;
    let KeyValue::Scalar(left) = keys[i].value else {
        return None;
    };
    match keys.get(i + 1) {
        Some(Keyframe {
            time: t1,
            value: KeyValue::Scalar(right),
        }) if *t1 > keys[i].time => {
            let u = (time - keys[i].time) / (t1 - keys[i].time);
            Some(left + (right - left) * u)
        }
        _ => Some(left),
    }
}

fn channels(keys: &[Keyframe], time: f32) -> Option<Vec<f32>> {
    let i = key_index(keys, time)?;
    let KeyValue::Channels(left) = &keys[i].value else {
        return None;
    };
    match keys.get(i + 1) {
        Some(Keyframe {
            time: t1,
            value: KeyValue::Channels(right),
        }) if *t1 > keys[i].time && right.len() == left.len() => {
            let u = (time - keys[i].time) / (t1 - keys[i].time);
            Some(
                left.iter()
                    .zip(right.iter())
                    .map(|(a, b)| a + (b - a) * u)
                    .collect(),
            )
        }
        _ => Some(left.clone()),
    }
}

impl PoseEvaluator for KeyframeEvaluator {
    fn rig(&self) -> Arc<Rig> {
        Arc::clone(&self.rig)
    }

    fn pose(&self) -> &Pose {
        &self.pose
    }

    fn current_track(&self, track: usize) -> Option<TrackEntry> {
        let state = self.tracks.get(track)?.as_ref()?;
        let animation = self.rig.animations.get(state.animation)?;
        Some(TrackEntry {
            animation: animation.name.clone(),
            time: state.time,
            looping: state.looping,
        })
    }

    fn set_animation(
        &mut self,
        track: usize,
        animation: &str,
        looping: bool,
    ) -> Result<(), PoseError> {
        let index = *self
            .by_name
            .get(animation)
            .ok_or_else(|| PoseError::UnknownAnimation {
                name: animation.to_string(),
            })?;
        if self.tracks.len() <= track {
            self.tracks.resize(track + 1, None);
        }
        self.tracks[track] = Some(TrackState {
            animation: index,
            time: 0.0,
            looping,
        });
        Ok(())
    }

    fn set_track_time(&mut self, track: usize, time: f32) -> Result<(), PoseError> {
        match self.tracks.get_mut(track) {
            Some(Some(state)) => {
                state.time = time;
                Ok(())
            }
            _ => Err(PoseError::InvalidTrack { track }),
        }
    }

    fn clear_track(&mut self, track: usize) {
        if let Some(slot) = self.tracks.get_mut(track) {
            *slot = None;
        }
    }

    fn set_to_setup_pose(&mut self) {
        self.reset_to_setup();
    }

    fn apply_and_resolve(&mut self) -> Result<(), PoseError> {
        if let Some(limit) = self.fail_from {
            let tripped = self.tracks.iter().flatten().any(|t| t.time >= limit);
            if tripped {
                return Err(PoseError::resolve(format!("injected failure at t>={limit}")));
            }
        }
        self.reset_to_setup();
        let tracks: Vec<TrackState> = self.tracks.iter().flatten().cloned().collect();
        for state in &tracks {
            self.apply_track(state);
        }
        let rig = Arc::clone(&self.rig);
        self.pose.resolve_world(&rig, &self.locals);
        self.resolves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{AnimationBuilder, RigBuilder};
    use rigscore_rig_core::Attachment;

    fn rig() -> Rig {
        RigBuilder::new("eval")
            .bone("root", None)
            .slot("eye", "root")
            .attachment("eye", "open", Attachment::region())
            .attachment("eye", "shut", Attachment::region())
            .animation(
                AnimationBuilder::new("blink", 1.0)
                    .attachment_keys(0, &[(0.0, Some("open")), (0.5, Some("shut"))])
                    .alpha_keys(0, &[(0.0, 1.0), (1.0, 0.0)])
                    .build(),
            )
            .build()
    }

    #[test]
    fn applies_step_and_linear_keys() {
        let mut eval = KeyframeEvaluator::new(rig());
        eval.set_animation(0, "blink", false).unwrap();
        eval.set_track_time(0, 0.25).unwrap();
        eval.apply_and_resolve().unwrap();
        assert_eq!(eval.pose().slots[0].attachment.as_deref(), Some("open"));
        assert!((eval.pose().slots[0].alpha - 0.75).abs() < 1e-6);

        eval.set_track_time(0, 0.75).unwrap();
        eval.apply_and_resolve().unwrap();
        assert_eq!(eval.pose().slots[0].attachment.as_deref(), Some("shut"));
    }

    #[test]
    fn unknown_animation_and_missing_track() {
        let mut eval = KeyframeEvaluator::new(rig());
        assert!(matches!(
            eval.set_animation(0, "nope", false),
            Err(PoseError::UnknownAnimation { .. })
        ));
        assert_eq!(
            eval.set_track_time(3, 0.0),
            Err(PoseError::InvalidTrack { track: 3 })
        );
    }

    #[test]
    fn injected_failure_trips_at_threshold() {
        let mut eval = KeyframeEvaluator::new(rig());
        eval.fail_from(0.5);
        eval.set_animation(0, "blink", true).unwrap();
        eval.set_track_time(0, 0.4).unwrap();
        assert!(eval.apply_and_resolve().is_ok());
        eval.set_track_time(0, 0.5).unwrap();
        assert!(eval.apply_and_resolve().is_err());
    }
}
