//! Error types for the analysis engine

use rigscore_rig_core::PoseError;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AnalysisError {
    /// The pose evaluator failed while sampling an animation.
    #[error("Pose evaluation failed for '{animation}' at t={time}: {source}")]
    Pose {
        animation: String,
        time: f32,
        #[source]
        source: PoseError,
    },

    /// Animation not present in the rig.
    #[error("Animation not found: {name}")]
    UnknownAnimation { name: String },

    /// A sampling observer aborted the pass.
    #[error("Observer aborted sampling: {reason}")]
    Observer { reason: String },

    /// Sampling the animation would exceed the per-pass interval limit.
    #[error("Animation '{animation}' needs {intervals} sample intervals (limit {limit})")]
    SampleBudget {
        animation: String,
        intervals: usize,
        limit: usize,
    },

    #[error("Invalid analysis config: {reason}")]
    InvalidConfig { reason: String },
}

impl AnalysisError {
    /// Wrap an evaluator failure raised while sampling `animation` at `time`.
    pub fn from_pose(animation: &str, time: f32, err: PoseError) -> Self {
        match err {
            PoseError::UnknownAnimation { name } => Self::UnknownAnimation { name },
            source => Self::Pose {
                animation: animation.to_string(),
                time,
                source,
            },
        }
    }

    pub fn observer(reason: impl Into<String>) -> Self {
        Self::Observer {
            reason: reason.into(),
        }
    }

    /// Error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Pose { .. } => "pose",
            Self::UnknownAnimation { .. } | Self::SampleBudget { .. } => "data",
            Self::Observer { .. } => "observer",
            Self::InvalidConfig { .. } => "config",
        }
    }
}
