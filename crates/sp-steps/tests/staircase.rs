mod common;

use common::staircase::{TOLERANCE_MM, describe, find_step};
use sp_core::Error;
use sp_filter::{NoiseDistribution, add_noise};
use sp_steps::{
    PipelineConfig, aggregate_steps, build_from_polygon, demo_staircase, detect_edges,
    run_pipeline, sample_count_for_resolution,
};

fn noiseless() -> PipelineConfig {
    PipelineConfig {
        sample_resolution: 50,
        enable_noise: false,
        smooth_profile: false,
        ..PipelineConfig::default()
    }
}

#[test]
fn staircase_platforms_are_measured() {
    let _ = env_logger::builder().is_test(true).try_init();

    let polygon = demo_staircase();
    let count = sample_count_for_resolution(&polygon, 50).expect("valid polygon");
    let profile = build_from_polygon(&polygon, count).expect("valid polygon");

    let edges = detect_edges(&profile).expect("detect");
    assert_eq!(edges.len() % 2, 0, "edges {edges:?}");
    assert_eq!(edges.first(), Some(&0));
    assert_eq!(edges.last(), Some(&(profile.len() - 1)));

    let steps = aggregate_steps(&profile, &edges).expect("aggregate");
    assert!(
        find_step(&steps, 0.0, 15.0, 0.0, TOLERANCE_MM).is_some(),
        "no step at 0 mm over [0, 15]:\n{}",
        describe(&steps)
    );
    assert!(
        find_step(&steps, 27.0, 35.0, 5.0, TOLERANCE_MM).is_some(),
        "no step at 5 mm over [27, 35]:\n{}",
        describe(&steps)
    );
    for s in &steps {
        assert!((s.length - (s.end - s.start)).abs() < 1e-12);
    }
}

#[test]
fn pipeline_reports_the_same_platforms() {
    let out = run_pipeline(&demo_staircase(), &noiseless()).expect("pipeline");
    assert!(out.warnings.is_empty());
    assert!(find_step(&out.median_steps, 0.0, 15.0, 0.0, TOLERANCE_MM).is_some());
    assert!(find_step(&out.median_steps, 27.0, 35.0, 5.0, TOLERANCE_MM).is_some());

    for (raw, step) in out.raw_steps.iter().zip(&out.median_steps) {
        assert_eq!(raw.positions().first(), Some(&step.start));
        assert_eq!(raw.positions().last(), Some(&step.end));
        assert_eq!(raw.median(), step.height);
    }

    let report = out.report();
    assert_eq!(report.lines().count(), out.median_steps.len());
    assert!(report.starts_with("Step nr. 1: range = [0.000mm, "));
}

#[test]
fn noiseless_runs_are_bit_reproducible() {
    let a = run_pipeline(&demo_staircase(), &noiseless()).expect("pipeline");
    let b = run_pipeline(&demo_staircase(), &noiseless()).expect("pipeline");
    assert_eq!(a, b);
}

#[test]
fn seeded_noisy_runs_are_reproducible() {
    let cfg = PipelineConfig {
        noise_seed: Some(2024),
        ..PipelineConfig::default()
    };
    let a = run_pipeline(&demo_staircase(), &cfg).expect("pipeline");
    let b = run_pipeline(&demo_staircase(), &cfg).expect("pipeline");
    assert_eq!(a.scanned_profile, b.scanned_profile);
    assert_eq!(a.edges, b.edges);
    assert_eq!(a.median_steps, b.median_steps);
}

#[test]
fn flat_segment_median_survives_uniform_noise() {
    let profile = build_from_polygon(&demo_staircase(), 1751).expect("valid polygon");

    for seed in 0..10 {
        let noisy = add_noise(&profile, NoiseDistribution::Uniform, -0.1, 0.1, Some(seed))
            .expect("noise");

        // x in [2, 14] mm on the 0 mm run and [28, 34] mm on the 5 mm run.
        let low = noisy.crop(100, 700).expect("in range").median();
        let high = noisy.crop(1400, 1700).expect("in range").median();
        assert!(low.abs() <= 0.15, "seed {seed}: {low}");
        assert!((high - 5.0).abs() <= 0.15, "seed {seed}: {high}");

        // Short runs of 20 samples as well.
        let short = noisy.crop(300, 319).expect("in range").median();
        assert!(short.abs() <= 0.15, "seed {seed}: {short}");
    }
}

#[test]
fn noisy_unsmoothed_runs_find_both_platforms() {
    for seed in 0..10 {
        let cfg = PipelineConfig {
            enable_noise: true,
            noise_range: (-0.1, 0.1),
            noise_distribution: NoiseDistribution::Uniform,
            noise_seed: Some(seed),
            smooth_profile: false,
            ..PipelineConfig::default()
        };
        let out = run_pipeline(&demo_staircase(), &cfg).expect("pipeline");
        let steps = &out.median_steps;

        let low = find_step(steps, 0.0, 15.0, 0.0, TOLERANCE_MM);
        let high = find_step(steps, 27.0, 35.0, 5.0, TOLERANCE_MM);
        assert!(low.is_some(), "seed {seed}:\n{}", describe(steps));
        assert!(high.is_some(), "seed {seed}:\n{}", describe(steps));
        for s in low.into_iter().chain(high) {
            let truth = if s.start < 20.0 { 0.0 } else { 5.0 };
            assert!((s.height - truth).abs() <= 0.15, "seed {seed}: {s}");
        }
    }
}

#[test]
fn odd_edge_count_is_reported_not_fatal() {
    let mut cfg = noiseless();
    // Only the strongest curvature peak survives, leaving three edges.
    cfg.edges.min_separation = 5000;

    let out = run_pipeline(&demo_staircase(), &cfg).expect("pipeline");
    assert_eq!(out.edges.len(), 3, "edges {:?}", out.edges);
    assert_eq!(out.median_steps.len(), 1);
    assert_eq!(out.warnings, vec![Error::DegenerateEdgeSet { count: 3 }]);
}
