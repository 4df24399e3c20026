//! Blend-mode cost from peak concurrency.
//!
//! Render-pass cost follows the number of non-normal blend modes visible in the same
//! frame, not how many slots ever use one. This analyzer therefore runs its own,
//! finer sampling pass and keeps the per-frame maximum of each count.

use serde::{Deserialize, Serialize};

use rigscore_rig_core::{Animation, BlendMode, PoseEvaluator, Rig};

use crate::active::ActiveComponentSet;
use crate::error::AnalysisError;
use crate::sampler::TimeSampler;
use crate::scoring::blend_mode_score;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlendModeMetrics {
    pub active_non_normal_count: usize,
    pub active_additive_count: usize,
    pub active_multiply_count: usize,
    pub active_screen_count: usize,
    pub frames_sampled: usize,
    pub score: f64,
}

#[derive(Default)]
struct FrameCounts {
    non_normal: usize,
    additive: usize,
    multiply: usize,
    screen: usize,
}

pub fn analyze_blend_modes<E>(
    evaluator: &mut E,
    rig: &Rig,
    animation: &Animation,
    active: &ActiveComponentSet,
    sampler: &TimeSampler,
) -> Result<BlendModeMetrics, AnalysisError>
where
    E: PoseEvaluator + ?Sized,
{
    let candidates: Vec<usize> = rig
        .slots
        .iter()
        .enumerate()
        .filter(|(_, s)| active.slots.contains(&s.name))
        .map(|(i, _)| i)
        .collect();

    let mut m = BlendModeMetrics::default();
    let frames = sampler.sample(evaluator, animation, |pose, _| {
        let mut frame = FrameCounts::default();
        for index in &candidates {
            let Some(slot) = pose.slots.get(*index) else {
                continue;
            };
            if !slot.is_visible() {
                continue;
            }
            match slot.blend_mode {
                BlendMode::Normal => continue,
                BlendMode::Additive => frame.additive += 1,
                BlendMode::Multiply => frame.multiply += 1,
                BlendMode::Screen => frame.screen += 1,
            }
            frame.non_normal += 1;
        }
        m.active_non_normal_count = m.active_non_normal_count.max(frame.non_normal);
        m.active_additive_count = m.active_additive_count.max(frame.additive);
        m.active_multiply_count = m.active_multiply_count.max(frame.multiply);
        m.active_screen_count = m.active_screen_count.max(frame.screen);
        Ok(())
    })?;

    m.frames_sampled = frames;
    m.score = blend_mode_score(m.active_non_normal_count, m.active_additive_count);
    Ok(m)
}
