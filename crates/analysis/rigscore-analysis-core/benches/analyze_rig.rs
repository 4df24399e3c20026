use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rigscore_analysis::{analyze, AnalysisOrchestrator, TimeSampler};
use rigscore_rig_core::{Attachment, PhysicsConstraintData, PoseEvaluator, Rig};
use rigscore_test_fixtures::{rigs, AnimationBuilder, KeyframeEvaluator, RigBuilder};

// A long chain of bones, each carrying a mesh slot and swinging through a rotate timeline.
fn wide_rig(bones: usize) -> Rig {
    let mut builder = RigBuilder::new("wide").bone("b0", None);
    let mut anim = AnimationBuilder::new("swing", 2.0);
    for i in 1..bones {
        let name = format!("b{i}");
        let parent = format!("b{}", i - 1);
        let slot = format!("s{i}");
        builder = builder
            .bone(&name, Some(parent.as_str()))
            .slot(&slot, &name)
            .attachment(&slot, "skin", Attachment::mesh(32, 2));
        anim = anim.rotate_keys(i, &[(0.0, 0.0), (1.0, 15.0), (2.0, 0.0)]);
    }
    builder
        .constraint(PhysicsConstraintData::new("tail", bones - 1))
        .animation(anim.build())
        .build()
}

fn bench_hero(c: &mut Criterion) {
    let mut eval = rigs::evaluator("hero").expect("hero fixture");
    c.bench_function("analyze_hero", |b| {
        b.iter(|| black_box(analyze(&mut eval)))
    });
}

fn bench_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_wide");
    for bones in [16usize, 64, 256] {
        let mut eval = KeyframeEvaluator::new(wide_rig(bones));
        let orchestrator = AnalysisOrchestrator::default();
        group.bench_with_input(BenchmarkId::from_parameter(bones), &bones, |b, _| {
            b.iter(|| black_box(orchestrator.analyze(&mut eval)))
        });
    }
    group.finish();
}

fn bench_sampling(c: &mut Criterion) {
    let mut eval = KeyframeEvaluator::new(wide_rig(64));
    let rig = eval.rig();
    let swing = rig.animation("swing").expect("swing animation");
    let sampler = TimeSampler::new(60.0);
    c.bench_function("sample_swing_60hz", |b| {
        b.iter(|| {
            let mut visible = 0usize;
            sampler
                .sample(&mut eval, swing, |pose, _| {
                    visible += pose.slots.iter().filter(|s| s.is_visible()).count();
                    Ok(())
                })
                .expect("sampling");
            black_box(visible)
        })
    });
}

criterion_group!(benches, bench_hero, bench_wide, bench_sampling);
criterion_main!(benches);
