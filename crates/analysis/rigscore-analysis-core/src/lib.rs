//! rigscore analysis core
//!
//! Temporal sampling and scoring engine for skeletal-animation rigs:
//! - [`sampler`]: steps an animation across evenly spaced time points under a scoped,
//!   self-restoring hold on the evaluator track;
//! - [`detector`]: unions sampled poses and a static timeline scan into an
//!   [`ActiveComponentSet`];
//! - [`analyzers`]: mesh, clipping, blend-mode, constraint and rig-structure metrics;
//! - [`scoring`]: the fixed weighting formulas;
//! - [`orchestrator`]: the full per-rig pipeline producing an [`AnalysisReport`].

pub mod active;
pub mod analyzers;
pub mod config;
pub mod detector;
pub mod error;
pub mod orchestrator;
pub mod report;
pub mod sampler;
pub mod scoring;

// Re-exports for hosts
pub use active::{ActiveComponentSet, AttachmentKey};
pub use analyzers::{
    BlendModeMetrics, ClippingMetrics, ConstraintMetrics, MeshMetrics, RigStructureMetrics,
};
pub use config::AnalysisConfig;
pub use detector::{detect_active_components, ActivityDetector};
pub use error::AnalysisError;
pub use orchestrator::{analyze, AnalysisOrchestrator};
pub use report::{AggregateStats, AnalysisReport, AnimationAnalysis, AnimationRef, FailedAnimation};
pub use sampler::{sample_times, PoseScope, TimeSampler};
pub use scoring::{DomainScores, ScoreRating, SCORE_FLOOR};
pub use rigscore_rig_core::{PoseEvaluator, Rig};
