//! Analysis results handed to the reporting layer.

use serde::{Deserialize, Serialize};

use crate::active::ActiveComponentSet;
use crate::analyzers::{
    BlendModeMetrics, ClippingMetrics, ConstraintMetrics, MeshMetrics, RigStructureMetrics,
};
use crate::scoring::{DomainScores, ScoreRating};

/// Results for one animation. Built once per orchestration run, never mutated after.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationAnalysis {
    pub name: String,
    pub duration: f32,
    pub active_components: ActiveComponentSet,
    pub mesh: MeshMetrics,
    pub clipping: ClippingMetrics,
    pub blend_mode: BlendModeMetrics,
    pub constraints: ConstraintMetrics,
    /// Shared rig-structure score, repeated here for the weighted total.
    pub bone_score: f64,
    pub overall_score: f64,
    pub rating: ScoreRating,
}

impl AnimationAnalysis {
    pub fn domain_scores(&self) -> DomainScores {
        DomainScores {
            bone: self.bone_score,
            mesh: self.mesh.score,
            clipping: self.clipping.score,
            blend_mode: self.blend_mode.score,
            constraint: self.constraints.score,
        }
    }
}

/// Name and score of a notable animation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationRef {
    pub name: String,
    pub score: f64,
}

/// An animation whose analysis aborted; the rest of the report is unaffected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedAnimation {
    pub name: String,
    pub category: String,
    pub error: String,
}

/// How many animations touch each cost domain.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub total_animations: usize,
    pub analyzed_animations: usize,
    pub failed_animations: usize,
    pub with_meshes: usize,
    pub with_clipping: usize,
    pub with_blend_modes: usize,
    pub with_ik: usize,
    pub with_transform: usize,
    pub with_path: usize,
    pub with_physics: usize,
    /// Mean overall score of analysed animations (0 when none succeeded).
    pub mean_score: f64,
}

impl AggregateStats {
    pub fn collect(total: usize, analyses: &[AnimationAnalysis]) -> Self {
        let mut stats = Self {
            total_animations: total,
            analyzed_animations: analyses.len(),
            failed_animations: total.saturating_sub(analyses.len()),
            ..Self::default()
        };
        for a in analyses {
            let c = &a.active_components;
            stats.with_meshes += usize::from(!c.meshes.is_empty());
            stats.with_clipping += usize::from(c.has_clipping);
            stats.with_blend_modes += usize::from(c.has_blend_modes);
            stats.with_ik += usize::from(c.has_ik);
            stats.with_transform += usize::from(c.has_transform);
            stats.with_path += usize::from(c.has_path);
            stats.with_physics += usize::from(c.has_physics);
        }
        if !analyses.is_empty() {
            stats.mean_score =
                analyses.iter().map(|a| a.overall_score).sum::<f64>() / analyses.len() as f64;
        }
        stats
    }
}

/// Result of one full orchestration call over a rig.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub rig_name: String,
    pub animations: Vec<AnimationAnalysis>,
    pub failures: Vec<FailedAnimation>,
    pub median_score: f64,
    pub best: Option<AnimationRef>,
    pub worst: Option<AnimationRef>,
    pub rig_structure: RigStructureMetrics,
    pub stats: AggregateStats,
}

impl AnalysisReport {
    pub fn animation(&self, name: &str) -> Option<&AnimationAnalysis> {
        self.animations.iter().find(|a| a.name == name)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
