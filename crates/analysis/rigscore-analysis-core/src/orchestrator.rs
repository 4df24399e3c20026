//! Full pipeline over every animation of a rig.
//!
//! Per rig: one rig-structure pass. Per animation: detection (sampling + timeline scan),
//! the five domain analyzers, then the weighted overall score. Analysis is synchronous
//! and deterministic; a failed animation is recorded and the run continues.

use rigscore_rig_core::{Animation, PoseEvaluator, Rig};

use crate::analyzers::{
    analyze_blend_modes, analyze_clipping, analyze_constraints, analyze_meshes,
    analyze_rig_structure, RigStructureMetrics,
};
use crate::config::AnalysisConfig;
use crate::detector::detect_active_components;
use crate::error::AnalysisError;
use crate::report::{
    AggregateStats, AnalysisReport, AnimationAnalysis, AnimationRef, FailedAnimation,
};
use crate::sampler::TimeSampler;
use crate::scoring::{median_score, overall_score, ScoreRating, SCORE_FLOOR};

#[derive(Clone, Debug, Default)]
pub struct AnalysisOrchestrator {
    cfg: AnalysisConfig,
}

impl AnalysisOrchestrator {
    pub fn new(cfg: AnalysisConfig) -> Result<Self, AnalysisError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.cfg
    }

    fn detection_sampler(&self) -> TimeSampler {
        TimeSampler::new(self.cfg.sample_rate).with_track(self.cfg.track_index)
    }

    fn blend_sampler(&self) -> TimeSampler {
        TimeSampler::new(self.cfg.blend_sample_rate).with_track(self.cfg.track_index)
    }

    /// Analyse every animation of the evaluator's rig.
    pub fn analyze<E>(&self, evaluator: &mut E) -> AnalysisReport
    where
        E: PoseEvaluator + ?Sized,
    {
        let rig = evaluator.rig();
        let structure = analyze_rig_structure(&rig);

        let mut animations = Vec::with_capacity(rig.animations.len());
        let mut failures = Vec::new();
        for animation in &rig.animations {
            match self.analyze_one(evaluator, &rig, &structure, animation) {
                Ok(analysis) => animations.push(analysis),
                Err(err) => {
                    log::warn!(
                        "analysis of '{}' failed ({}): {}",
                        animation.name,
                        err.category(),
                        err
                    );
                    failures.push(FailedAnimation {
                        name: animation.name.clone(),
                        category: err.category().to_string(),
                        error: err.to_string(),
                    });
                }
            }
        }

        let scores: Vec<f64> = animations.iter().map(|a| a.overall_score).collect();
        let median = median_score(&scores).unwrap_or(SCORE_FLOOR);

        // strict comparisons: ties keep the earliest animation
        let mut best: Option<&AnimationAnalysis> = None;
        let mut worst: Option<&AnimationAnalysis> = None;
        for a in &animations {
            if best.map_or(true, |b| a.overall_score > b.overall_score) {
                best = Some(a);
            }
            if worst.map_or(true, |w| a.overall_score < w.overall_score) {
                worst = Some(a);
            }
        }
        let to_ref = |a: &AnimationAnalysis| AnimationRef {
            name: a.name.clone(),
            score: a.overall_score,
        };
        let best = best.map(to_ref);
        let worst = worst.map(to_ref);

        let stats = AggregateStats::collect(rig.animations.len(), &animations);
        log::debug!(
            "rig '{}': {} animations analysed, {} failed, median {}",
            rig.name,
            stats.analyzed_animations,
            stats.failed_animations,
            median
        );

        AnalysisReport {
            rig_name: rig.name.clone(),
            animations,
            failures,
            median_score: median,
            best,
            worst,
            rig_structure: structure,
            stats,
        }
    }

    /// Analyse a single animation by name.
    pub fn analyze_animation<E>(
        &self,
        evaluator: &mut E,
        name: &str,
    ) -> Result<AnimationAnalysis, AnalysisError>
    where
        E: PoseEvaluator + ?Sized,
    {
        let rig = evaluator.rig();
        let animation = rig
            .animation(name)
            .ok_or_else(|| AnalysisError::UnknownAnimation {
                name: name.to_string(),
            })?;
        let structure = analyze_rig_structure(&rig);
        self.analyze_one(evaluator, &rig, &structure, animation)
    }

    fn analyze_one<E>(
        &self,
        evaluator: &mut E,
        rig: &Rig,
        structure: &RigStructureMetrics,
        animation: &Animation,
    ) -> Result<AnimationAnalysis, AnalysisError>
    where
        E: PoseEvaluator + ?Sized,
    {
        let active =
            detect_active_components(evaluator, rig, animation, &self.detection_sampler())?;
        let blend_mode =
            analyze_blend_modes(evaluator, rig, animation, &active, &self.blend_sampler())?;
        let mesh = analyze_meshes(rig, animation, &active);
        let clipping = analyze_clipping(rig, &active);
        let constraints = analyze_constraints(rig, &active);

        let mut analysis = AnimationAnalysis {
            name: animation.name.clone(),
            duration: animation.duration,
            active_components: active,
            mesh,
            clipping,
            blend_mode,
            constraints,
            bone_score: structure.score,
            overall_score: SCORE_FLOOR,
            rating: ScoreRating::Poor,
        };
        // A rig without bones has nothing to render; pin it to the floor.
        if structure.total_bones > 0 {
            analysis.overall_score = overall_score(&analysis.domain_scores());
        }
        analysis.rating = ScoreRating::from_score(analysis.overall_score);

        log::debug!(
            "animation '{}': {} samples, {} slots, {} meshes, {} constraints, overall {}",
            analysis.name,
            analysis.active_components.samples_taken,
            analysis.active_components.slots.len(),
            analysis.mesh.active_mesh_count,
            analysis.active_components.constraint_count(),
            analysis.overall_score
        );
        Ok(analysis)
    }
}

/// Analyse `evaluator`'s rig with the default configuration.
pub fn analyze<E>(evaluator: &mut E) -> AnalysisReport
where
    E: PoseEvaluator + ?Sized,
{
    AnalysisOrchestrator::default().analyze(evaluator)
}
