//! Errors raised by pose evaluators.

/// Failure reported by a [`PoseEvaluator`](crate::PoseEvaluator) implementation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum PoseError {
    /// The requested animation does not exist in the rig.
    #[error("Animation not found: {name}")]
    UnknownAnimation { name: String },

    /// A track operation referenced a track with nothing queued on it.
    #[error("Track {track} has no animation set")]
    InvalidTrack { track: usize },

    /// The evaluator failed while applying keyframes or resolving world transforms.
    #[error("Pose resolution failed: {reason}")]
    Resolve { reason: String },
}

impl PoseError {
    pub fn resolve(reason: impl Into<String>) -> Self {
        Self::Resolve {
            reason: reason.into(),
        }
    }
}
