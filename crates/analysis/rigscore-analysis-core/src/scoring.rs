//! Fixed nonlinear weighting formulas turning metrics into 0..=100 scores.
//!
//! Penalties use `log2(count / ideal + 1)` so counts below the reference cost little and
//! counts far above it dominate. Every score is floored at 0; the overall score is
//! additionally floored at [`SCORE_FLOOR`].

use serde::{Deserialize, Serialize};

pub const IDEAL_BONE_COUNT: f64 = 30.0;
pub const IDEAL_MESH_COUNT: f64 = 15.0;
pub const IDEAL_VERTEX_COUNT: f64 = 300.0;
pub const IDEAL_CLIPPING_COUNT: f64 = 2.0;
pub const IDEAL_BLEND_MODE_COUNT: f64 = 2.0;

pub const MAX_SCORE: f64 = 100.0;

/// Lowest overall score any rig can receive. Valid rigs never show near-zero scores,
/// however complex they are.
pub const SCORE_FLOOR: f64 = 40.0;

pub const BONE_WEIGHT: f64 = 0.15;
pub const MESH_WEIGHT: f64 = 0.25;
pub const CLIPPING_WEIGHT: f64 = 0.20;
pub const BLEND_MODE_WEIGHT: f64 = 0.15;
pub const CONSTRAINT_WEIGHT: f64 = 0.25;

pub const IK_IMPACT_WEIGHT: f64 = 0.20;
pub const TRANSFORM_IMPACT_WEIGHT: f64 = 0.15;
pub const PATH_IMPACT_WEIGHT: f64 = 0.25;
pub const PHYSICS_IMPACT_WEIGHT: f64 = 0.40;

#[inline]
fn log_penalty(count: f64, ideal: f64) -> f64 {
    (count / ideal + 1.0).log2()
}

/// Clamp into `[0, 100]`; NaN collapses to 0.
#[inline]
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, MAX_SCORE)
    }
}

#[inline]
fn cap_impact(impact: f64) -> f64 {
    clamp_score(impact)
}

pub fn mesh_score(
    mesh_count: usize,
    total_vertices: usize,
    deformed_mesh_count: usize,
    weighted_mesh_count: usize,
) -> f64 {
    clamp_score(
        MAX_SCORE
            - log_penalty(mesh_count as f64, IDEAL_MESH_COUNT) * 15.0
            - log_penalty(total_vertices as f64, IDEAL_VERTEX_COUNT) * 10.0
            - deformed_mesh_count as f64 * 1.5
            - weighted_mesh_count as f64 * 2.0,
    )
}

pub fn clipping_score(mask_count: usize, total_vertices: usize, complex_masks: usize) -> f64 {
    clamp_score(
        MAX_SCORE
            - log_penalty(mask_count as f64, IDEAL_CLIPPING_COUNT) * 20.0
            - (total_vertices as f64 + 1.0).log2() * 5.0
            - complex_masks as f64 * 10.0,
    )
}

pub fn blend_mode_score(non_normal_count: usize, additive_count: usize) -> f64 {
    clamp_score(
        MAX_SCORE
            - log_penalty(non_normal_count as f64, IDEAL_BLEND_MODE_COUNT) * 20.0
            - additive_count as f64 * 2.0,
    )
}

pub fn bone_score(total_bones: usize, max_depth: usize) -> f64 {
    clamp_score(
        MAX_SCORE - log_penalty(total_bones as f64, IDEAL_BONE_COUNT) * 15.0
            - max_depth as f64 * 1.5,
    )
}

pub fn ik_impact(count: usize, total_bones: usize, max_chain_length: usize) -> f64 {
    let chain = if max_chain_length > 2 {
        (max_chain_length as f64).powf(1.3) * 2.0
    } else {
        0.0
    };
    cap_impact(
        (count as f64 + 1.0).log2() * 20.0 + (total_bones as f64 + 1.0).log2() * 10.0 + chain,
    )
}

pub fn transform_impact(count: usize, total_bones: usize, affected_channels: usize) -> f64 {
    cap_impact(
        (count as f64 + 1.0).log2() * 15.0
            + (total_bones as f64 + 1.0).log2() * 8.0
            + affected_channels as f64 * 5.0,
    )
}

pub fn path_impact(count: usize, total_bones: usize, mode_complexity: usize) -> f64 {
    cap_impact(
        (count as f64 + 1.0).log2() * 20.0
            + (total_bones as f64 + 1.0).log2() * 10.0
            + mode_complexity as f64 * 7.0,
    )
}

/// `weighted_channels` is `Σ affected_channels * (1 + iteration_factor)` over the
/// active physics constraints.
pub fn physics_impact(count: usize, weighted_channels: f64) -> f64 {
    cap_impact((count as f64 + 1.0).log2() * 30.0 + weighted_channels * 5.0)
}

pub fn constraint_score(ik: f64, transform: f64, path: f64, physics: f64) -> f64 {
    let weighted = ik * IK_IMPACT_WEIGHT
        + transform * TRANSFORM_IMPACT_WEIGHT
        + path * PATH_IMPACT_WEIGHT
        + physics * PHYSICS_IMPACT_WEIGHT;
    clamp_score(MAX_SCORE - weighted * 0.5)
}

/// Per-domain scores feeding the overall score.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DomainScores {
    pub bone: f64,
    pub mesh: f64,
    pub clipping: f64,
    pub blend_mode: f64,
    pub constraint: f64,
}

/// Weighted overall score, rounded, never below [`SCORE_FLOOR`].
pub fn overall_score(scores: &DomainScores) -> f64 {
    let weighted = scores.bone * BONE_WEIGHT
        + scores.mesh * MESH_WEIGHT
        + scores.clipping * CLIPPING_WEIGHT
        + scores.blend_mode * BLEND_MODE_WEIGHT
        + scores.constraint * CONSTRAINT_WEIGHT;
    clamp_score(weighted.round()).max(SCORE_FLOOR)
}

/// `sorted[floor(n / 2)]`: the upper median for even `n`, never an average.
pub fn median_score(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some(sorted[sorted.len() / 2])
}

/// Coarse verdict attached to a score.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ScoreRating {
    Excellent,
    Good,
    Moderate,
    Poor,
    VeryPoor,
}

impl ScoreRating {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            ScoreRating::Excellent
        } else if score >= 70.0 {
            ScoreRating::Good
        } else if score >= 55.0 {
            ScoreRating::Moderate
        } else if score >= SCORE_FLOOR {
            ScoreRating::Poor
        } else {
            ScoreRating::VeryPoor
        }
    }
}
