use std::panic::{self, AssertUnwindSafe};

use rigscore_analysis::sampler::MAX_SAMPLE_INTERVALS;
use rigscore_analysis::{AnalysisError, TimeSampler};
use rigscore_rig_core::{Pose, PoseEvaluator, TrackEntry};
use rigscore_test_fixtures::{rigs, KeyframeEvaluator};

fn hero_with_idle_queued() -> KeyframeEvaluator {
    let mut eval = rigs::evaluator("hero").expect("hero fixture");
    eval.set_animation(0, "idle", true).unwrap();
    eval.set_track_time(0, 0.3).unwrap();
    eval.apply_and_resolve().unwrap();
    eval
}

fn idle_entry() -> TrackEntry {
    TrackEntry {
        animation: "idle".into(),
        time: 0.3,
        looping: true,
    }
}

#[test]
fn successful_sampling_restores_queued_track() {
    let mut eval = hero_with_idle_queued();
    let before = eval.pose().clone();
    let resolves = eval.resolve_count();
    let rig = eval.rig();
    let walk = rig.animation("walk").unwrap();

    let visited = TimeSampler::default()
        .sample(&mut eval, walk, |_, _| Ok(()))
        .unwrap();

    assert_eq!(visited, 31);
    // one resolve per sample plus the restore
    assert_eq!(eval.resolve_count(), resolves + 32);
    assert_eq!(eval.current_track(0), Some(idle_entry()));
    assert_eq!(eval.pose(), &before);
}

#[test]
fn observer_error_still_restores() {
    let mut eval = hero_with_idle_queued();
    let rig = eval.rig();
    let walk = rig.animation("walk").unwrap();

    let mut seen = Vec::new();
    let err = TimeSampler::default()
        .sample(&mut eval, walk, |_, t| {
            seen.push(t);
            if t > 0.5 {
                Err(AnalysisError::observer("stop"))
            } else {
                Ok(())
            }
        })
        .unwrap_err();

    assert_eq!(err.category(), "observer");
    assert_eq!(seen.len(), 17);
    assert_eq!(eval.current_track(0), Some(idle_entry()));
}

#[test]
fn pose_failure_is_tagged_and_restored() {
    let mut eval = hero_with_idle_queued();
    eval.fail_from(0.5);
    let rig = eval.rig();
    let walk = rig.animation("walk").unwrap();

    let err = TimeSampler::default()
        .sample(&mut eval, walk, |_, _| Ok(()))
        .unwrap_err();

    match err {
        AnalysisError::Pose {
            animation, time, ..
        } => {
            assert_eq!(animation, "walk");
            assert!(time >= 0.5);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(eval.current_track(0), Some(idle_entry()));
}

#[test]
fn panic_in_observer_still_restores() {
    let mut eval = hero_with_idle_queued();
    let rig = eval.rig();
    let walk = rig.animation("walk").unwrap();

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let _ = TimeSampler::default().sample(&mut eval, walk, |_, t| {
            if t > 0.2 {
                panic!("observer blew up");
            }
            Ok(())
        });
    }));

    assert!(result.is_err());
    assert_eq!(eval.current_track(0), Some(idle_entry()));
}

#[test]
fn empty_track_returns_to_setup_pose() {
    let mut eval = rigs::evaluator("hero").unwrap();
    let rig = eval.rig();
    let walk = rig.animation("walk").unwrap();

    TimeSampler::new(10.0)
        .sample(&mut eval, walk, |_, _| Ok(()))
        .unwrap();

    assert_eq!(eval.current_track(0), None);
    assert_eq!(eval.pose(), &Pose::setup(&rig));
}

#[test]
fn unknown_animation_fails_before_touching_the_track() {
    let mut eval = hero_with_idle_queued();
    let rig = eval.rig();
    let mut ghost = rig.animation("walk").unwrap().clone();
    ghost.name = "ghost".into();

    let err = TimeSampler::default()
        .sample(&mut eval, &ghost, |_, _| Ok(()))
        .unwrap_err();

    assert!(matches!(err, AnalysisError::UnknownAnimation { .. }));
    assert_eq!(eval.current_track(0), Some(idle_entry()));
}

#[test]
fn oversized_pass_is_refused_before_touching_the_track() {
    let mut eval = hero_with_idle_queued();
    let resolves = eval.resolve_count();
    let rig = eval.rig();
    let mut endless = rig.animation("walk").unwrap().clone();
    endless.duration = 1e30;

    let err = TimeSampler::default()
        .sample(&mut eval, &endless, |_, _| Ok(()))
        .unwrap_err();

    assert_eq!(err.category(), "data");
    match err {
        AnalysisError::SampleBudget {
            intervals, limit, ..
        } => {
            assert_eq!(limit, MAX_SAMPLE_INTERVALS);
            assert!(intervals > limit);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(eval.resolve_count(), resolves);
    assert_eq!(eval.current_track(0), Some(idle_entry()));
}
