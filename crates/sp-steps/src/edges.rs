use log::debug;
use serde::{Deserialize, Serialize};
use sp_core::{Error, Profile, Result};
use sp_filter::{BorderMode, ExtremumKind, GaussianKernel1D, filter_profile, find_local_extrema};

/// Parameters of the flat-region edge detector.
///
/// Derivatives are per sample, so thresholds depend on the sampling density
/// of the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeDetectConfig {
    /// Odd size of the first-derivative-of-Gaussian kernel.
    pub slope_kernel_size: usize,
    pub slope_gain: f64,
    /// Gained slope in `[flat_low, flat_high]` marks a flat sample.
    pub flat_low: f64,
    pub flat_high: f64,
    /// Value written to flat samples; everything else becomes `0`.
    pub flat_value: f64,
    /// Odd size of the second-derivative-of-Gaussian kernel.
    pub curvature_kernel_size: usize,
    pub curvature_gain: f64,
    pub curvature_max: f64,
    pub min_separation: usize,
    pub min_prominence: f64,
    /// Border handling of both derivative filters.
    pub border: BorderMode,
}

impl Default for EdgeDetectConfig {
    fn default() -> Self {
        Self {
            slope_kernel_size: 25,
            slope_gain: 10.0,
            flat_low: -0.25,
            flat_high: 0.25,
            flat_value: 10.0,
            curvature_kernel_size: 25,
            curvature_gain: 100.0,
            curvature_max: 10000.0,
            min_separation: 5,
            min_prominence: 2.0,
            border: BorderMode::Clamp,
        }
    }
}

/// Edge indices together with the intermediate profiles that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeDetection {
    /// Gained first derivative of the input.
    pub first_derivative: Profile,
    /// Flat-region marker built from `first_derivative`.
    pub binarized: Profile,
    /// Clamped, gained second derivative of `binarized`.
    pub curvature: Profile,
    /// Sorted boundary indices, including the profile ends when they are flat.
    pub edges: Vec<usize>,
}

impl EdgeDetection {
    /// Whether the edges split evenly into `(start, end)` pairs.
    pub fn is_pairable(&self) -> bool {
        self.edges.len() % 2 == 0
    }
}

/// Finds the start and end of flat platforms in a profile.
///
/// Pipeline:
/// 1. slope = DoG(profile) * `slope_gain`;
/// 2. flat = `flat_value` where `flat_low <= slope <= flat_high`, else `0`;
/// 3. curvature = clamp(D2G(flat) * `curvature_gain`, 0, `curvature_max`),
///    which keeps the positive lobes just outside each flat run;
/// 4. local maxima of curvature;
/// 5. first/last index added when the profile starts/ends flat.
#[derive(Debug, Clone)]
pub struct EdgeDetector {
    cfg: EdgeDetectConfig,
    slope_kernel: GaussianKernel1D,
    curvature_kernel: GaussianKernel1D,
}

impl EdgeDetector {
    pub fn new(cfg: EdgeDetectConfig) -> Result<Self> {
        for size in [cfg.slope_kernel_size, cfg.curvature_kernel_size] {
            if size < 3 {
                return Err(Error::InvalidArgument(format!(
                    "derivative kernel size must be at least 3, got {size}"
                )));
            }
        }
        if cfg.flat_low > cfg.flat_high {
            return Err(Error::InvalidArgument(format!(
                "flat band [{}, {}] is empty",
                cfg.flat_low, cfg.flat_high
            )));
        }

        Ok(Self {
            slope_kernel: GaussianKernel1D::from_size(cfg.slope_kernel_size)?,
            curvature_kernel: GaussianKernel1D::from_size(cfg.curvature_kernel_size)?,
            cfg,
        })
    }

    pub fn config(&self) -> &EdgeDetectConfig {
        &self.cfg
    }

    pub fn detect(&self, profile: &Profile) -> Result<EdgeDetection> {
        let cfg = &self.cfg;

        let first_derivative = filter_profile(profile, &self.slope_kernel.dg, cfg.border)?
            .multiply_constant(cfg.slope_gain);
        let binarized = first_derivative.binarize(cfg.flat_low, cfg.flat_high, cfg.flat_value);
        let curvature = filter_profile(&binarized, &self.curvature_kernel.d2g, cfg.border)?
            .multiply_constant(cfg.curvature_gain)
            .clamp(0.0, cfg.curvature_max)?;

        let mut edges = find_local_extrema(
            &curvature,
            ExtremumKind::Max,
            cfg.min_separation,
            cfg.min_prominence,
        );
        let peaks = edges.len();

        let last = profile.len() - 1;
        if binarized.value(0)? > 0.0 {
            edges.push(0);
        }
        if binarized.value(last)? > 0.0 {
            edges.push(last);
        }
        edges.sort_unstable();
        edges.dedup();

        debug!(
            "EdgeDetector::detect {} samples: {} curvature peaks, {} edges",
            profile.len(),
            peaks,
            edges.len()
        );

        Ok(EdgeDetection {
            first_derivative,
            binarized,
            curvature,
            edges,
        })
    }
}

/// Edge indices with the default detector parameters.
pub fn detect_edges(profile: &Profile) -> Result<Vec<usize>> {
    let detector = EdgeDetector::new(EdgeDetectConfig::default())?;
    Ok(detector.detect(profile)?.edges)
}
