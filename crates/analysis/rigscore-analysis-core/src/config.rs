//! Analysis configuration.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Sampling configuration for one orchestration run.
/// Scoring weights and reference counts are fixed in [`crate::scoring`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisConfig {
    /// Samples per second for activity detection.
    pub sample_rate: f32,
    /// Samples per second for the blend-mode peak-concurrency pass.
    pub blend_sample_rate: f32,
    /// Evaluator track driven while sampling.
    pub track_index: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate: 30.0,
            blend_sample_rate: 60.0,
            track_index: 0,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        for (field, rate) in [
            ("sampleRate", self.sample_rate),
            ("blendSampleRate", self.blend_sample_rate),
        ] {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(AnalysisError::InvalidConfig {
                    reason: format!("{field} must be finite and > 0, got {rate}"),
                });
            }
        }
        Ok(())
    }
}
