//! Deterministic time sampling of one animation.
//!
//! Model:
//! - `N = max(1, ceil(duration * rate))` intervals, `N + 1` sample points
//!   `t_i = (i / N) * duration`, so both endpoints are always visited.
//! - Passes needing more than [`MAX_SAMPLE_INTERVALS`] intervals are refused up front.
//! - The evaluator track is borrowed through a [`PoseScope`] which restores the
//!   previously queued animation (name, time, loop flag) on every exit path, including
//!   observer errors and panics.

use rigscore_rig_core::{Animation, Pose, PoseError, PoseEvaluator, TrackEntry};

use crate::error::AnalysisError;

pub const DEFAULT_SAMPLE_RATE: f32 = 30.0;
pub const BLEND_SAMPLE_RATE: f32 = 60.0;
/// Upper bound on intervals per pass (about 9.7 hours of animation at 30 Hz).
pub const MAX_SAMPLE_INTERVALS: usize = 1 << 20;

/// Non-finite and negative durations sample as zero-length.
fn sampled_duration(duration: f32) -> f32 {
    if duration.is_finite() {
        duration.max(0.0)
    } else {
        0.0
    }
}

/// Number of sampling intervals for `duration` seconds at `rate` samples per second.
/// Saturates at `usize::MAX` when the product overflows.
pub fn interval_count(duration: f32, rate: f32) -> usize {
    let span = duration.max(0.0) * rate.max(0.0);
    if span.is_nan() {
        return 1;
    }
    (span.ceil() as usize).max(1)
}

/// Evenly spaced sample times over `[0, duration]`, endpoints inclusive.
pub fn sample_times(duration: f32, rate: f32) -> impl Iterator<Item = f32> {
    let duration = sampled_duration(duration);
    let n = interval_count(duration, rate);
    (0..=n).map(move |i| (i as f32 / n as f32) * duration)
}

/// Exclusive, scoped ownership of one evaluator track.
///
/// Acquiring captures the track's current entry and forces the target animation onto it
/// with looping disabled. Releasing (explicitly or on drop) clears the track and
/// reinstates the captured entry, or the setup pose when nothing was queued.
pub struct PoseScope<'a, E: PoseEvaluator + ?Sized> {
    evaluator: &'a mut E,
    track: usize,
    animation: String,
    saved: Option<TrackEntry>,
    restored: bool,
}

impl<'a, E: PoseEvaluator + ?Sized> PoseScope<'a, E> {
    pub fn acquire(
        evaluator: &'a mut E,
        track: usize,
        animation: &str,
    ) -> Result<Self, AnalysisError> {
        let saved = evaluator.current_track(track);
        let scope = Self {
            evaluator,
            track,
            animation: animation.to_string(),
            saved,
            restored: false,
        };
        // a failure below still restores on drop
        scope
            .evaluator
            .set_animation(track, animation, false)
            .map_err(|e| AnalysisError::from_pose(animation, 0.0, e))?;
        Ok(scope)
    }

    /// Position the track at `time`, apply with zero delta and return the live pose.
    pub fn seek(&mut self, time: f32) -> Result<&Pose, AnalysisError> {
        let track = self.track;
        self.evaluator
            .set_track_time(track, time)
            .and_then(|_| self.evaluator.apply_and_resolve())
            .map_err(|e| AnalysisError::from_pose(&self.animation, time, e))?;
        Ok(self.evaluator.pose())
    }

    /// Restore the captured track state, reporting any evaluator failure.
    pub fn release(mut self) -> Result<(), AnalysisError> {
        let animation = self.animation.clone();
        self.restore()
            .map_err(|e| AnalysisError::from_pose(&animation, 0.0, e))
    }

    fn restore(&mut self) -> Result<(), PoseError> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        self.evaluator.clear_track(self.track);
        match self.saved.take() {
            Some(entry) => {
                self.evaluator
                    .set_animation(self.track, &entry.animation, entry.looping)?;
                self.evaluator.set_track_time(self.track, entry.time)?;
                self.evaluator.apply_and_resolve()
            }
            None => {
                self.evaluator.set_to_setup_pose();
                Ok(())
            }
        }
    }
}

impl<E: PoseEvaluator + ?Sized> Drop for PoseScope<'_, E> {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            log::warn!(
                "failed to restore track {} after sampling '{}': {}",
                self.track,
                self.animation,
                err
            );
        }
    }
}

/// Drives one animation across evenly spaced time points.
#[derive(Clone, Copy, Debug)]
pub struct TimeSampler {
    rate: f32,
    track: usize,
}

impl Default for TimeSampler {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}

impl TimeSampler {
    pub fn new(rate: f32) -> Self {
        Self { rate, track: 0 }
    }

    pub fn with_track(mut self, track: usize) -> Self {
        self.track = track;
        self
    }

    #[inline]
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Visit every sample point of `animation`, handing the resolved pose to `observe`.
    /// Returns the number of samples visited. The evaluator's track state is restored
    /// before this returns, whether or not sampling succeeded.
    pub fn sample<E, F>(
        &self,
        evaluator: &mut E,
        animation: &Animation,
        mut observe: F,
    ) -> Result<usize, AnalysisError>
    where
        E: PoseEvaluator + ?Sized,
        F: FnMut(&Pose, f32) -> Result<(), AnalysisError>,
    {
        let intervals = interval_count(sampled_duration(animation.duration), self.rate);
        if intervals > MAX_SAMPLE_INTERVALS {
            return Err(AnalysisError::SampleBudget {
                animation: animation.name.clone(),
                intervals,
                limit: MAX_SAMPLE_INTERVALS,
            });
        }
        let mut scope = PoseScope::acquire(evaluator, self.track, &animation.name)?;
        let mut visited = 0usize;
        for time in sample_times(animation.duration, self.rate) {
            let pose = scope.seek(time)?;
            log::trace!("sample '{}' t={time}", animation.name);
            observe(pose, time)?;
            visited += 1;
        }
        scope.release()?;
        Ok(visited)
    }
}
