use log::{debug, warn};
use serde::{Deserialize, Serialize};
use sp_core::{Error, Point2, Profile};
use sp_filter::{BorderMode, GaussianKernel1D, NoiseDistribution, add_noise, filter_profile};

use crate::aggregate::{StepResult, format_report, segment_steps};
use crate::builder::{build_from_polygon, resample_profile, sample_count_for_resolution};
use crate::edges::{EdgeDetectConfig, EdgeDetector};
use crate::error::{PipelineError, PipelineStage, StageContext};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Samples per millimeter along X.
    pub sample_resolution: usize,
    /// Re-sample the built profile to exactly this many points; `None` keeps
    /// the grid implied by `sample_resolution`.
    pub resample_count: Option<usize>,
    pub enable_noise: bool,
    /// `(low, high)` bounds of the additive noise, in millimeters.
    pub noise_range: (f64, f64),
    pub noise_distribution: NoiseDistribution,
    /// Fixed seed for reproducible noise; `None` seeds from the OS.
    pub noise_seed: Option<u64>,
    pub smooth_profile: bool,
    pub smoothing_kernel_size: usize,
    pub smoothing_border: BorderMode,
    pub edges: EdgeDetectConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_resolution: 50,
            resample_count: None,
            enable_noise: true,
            noise_range: (-0.1, 0.1),
            noise_distribution: NoiseDistribution::Uniform,
            noise_seed: None,
            smooth_profile: true,
            smoothing_kernel_size: 25,
            smoothing_border: BorderMode::Clamp,
            edges: EdgeDetectConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Sampled polygon after optional noise and smoothing.
    pub scanned_profile: Profile,
    pub first_derivative: Profile,
    pub binarized_derivative: Profile,
    pub curvature: Profile,
    pub edges: Vec<usize>,
    /// Samples of every detected platform.
    pub raw_steps: Vec<Profile>,
    pub median_steps: Vec<StepResult>,
    /// Non-fatal findings such as [`Error::DegenerateEdgeSet`].
    pub warnings: Vec<Error>,
}

impl PipelineOutput {
    pub fn report(&self) -> String {
        format_report(&self.median_steps)
    }
}

/// Samples `polygon`, optionally perturbs and smooths it, then detects and
/// measures its flat platforms.
pub fn run_pipeline(
    polygon: &[Point2],
    config: &PipelineConfig,
) -> Result<PipelineOutput, PipelineError> {
    let sample_count = sample_count_for_resolution(polygon, config.sample_resolution)
        .stage(PipelineStage::Build)?;
    let mut profile = build_from_polygon(polygon, sample_count).stage(PipelineStage::Build)?;

    if let Some(count) = config.resample_count {
        profile = resample_profile(&profile, count).stage(PipelineStage::Resample)?;
    }

    if config.enable_noise {
        let (low, high) = config.noise_range;
        profile = add_noise(
            &profile,
            config.noise_distribution,
            low,
            high,
            config.noise_seed,
        )
        .stage(PipelineStage::Noise)?;
        debug!(
            "run_pipeline: {:?} noise in [{low}, {high}] (seed {:?})",
            config.noise_distribution, config.noise_seed
        );
    }

    if config.smooth_profile {
        profile = GaussianKernel1D::from_size(config.smoothing_kernel_size)
            .and_then(|k| filter_profile(&profile, &k.g, config.smoothing_border))
            .stage(PipelineStage::Smooth)?;
    }

    let detection = EdgeDetector::new(config.edges.clone())
        .and_then(|d| d.detect(&profile))
        .stage(PipelineStage::Detect)?;

    let mut warnings = Vec::new();
    if !detection.is_pairable() {
        let err = Error::DegenerateEdgeSet {
            count: detection.edges.len(),
        };
        warn!("run_pipeline: {err}; the last edge yields no step");
        warnings.push(err);
    }

    let segments = segment_steps(&profile, &detection.edges).stage(PipelineStage::Aggregate)?;
    debug!(
        "run_pipeline: {} samples, {} edges, {} steps",
        profile.len(),
        detection.edges.len(),
        segments.len()
    );

    let (raw_steps, median_steps) = segments.into_iter().map(|s| (s.samples, s.step)).unzip();

    Ok(PipelineOutput {
        scanned_profile: profile,
        first_derivative: detection.first_derivative,
        binarized_derivative: detection.binarized,
        curvature: detection.curvature,
        edges: detection.edges,
        raw_steps,
        median_steps,
        warnings,
    })
}
