//! Clipping-mask cost.

use serde::{Deserialize, Serialize};

use rigscore_rig_core::Rig;

use crate::active::ActiveComponentSet;
use crate::scoring::clipping_score;

/// Masks with more vertices than a quad are considered complex.
pub const COMPLEX_MASK_VERTICES: usize = 4;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClippingMetrics {
    pub active_mask_count: usize,
    pub total_vertices: usize,
    pub complex_masks: usize,
    pub score: f64,
}

pub fn analyze_clipping(rig: &Rig, active: &ActiveComponentSet) -> ClippingMetrics {
    let mut m = ClippingMetrics::default();
    for key in &active.clipping {
        let Some(clip) = rig
            .find_slot(&key.slot)
            .and_then(|(index, _)| rig.attachment(index, &key.attachment))
            .and_then(|att| att.as_clipping())
        else {
            log::warn!("clipping mask '{key}' no longer resolves, skipped");
            continue;
        };
        m.active_mask_count += 1;
        m.total_vertices += clip.vertex_count;
        if clip.vertex_count > COMPLEX_MASK_VERTICES {
            m.complex_masks += 1;
        }
    }
    m.score = clipping_score(m.active_mask_count, m.total_vertices, m.complex_masks);
    m
}
