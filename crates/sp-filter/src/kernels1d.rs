use sp_core::{Error, Result};

/// Gaussian smoothing and derivative-of-Gaussian kernels of a fixed odd size.
///
/// Conventions:
/// - `radius = size / 2`, taps are indexed by `x = i - radius`.
/// - `sigma = 0.3 * ((size - 1) / 2 - 1) + 0.8`, the usual size-to-sigma rule
///   for aperture-specified Gaussians.
/// - `g` is normalized such that `sum(g) == 1`.
/// - `dg ~ -(x / sigma^2) * g`, scaled so a unit-slope ramp yields 1.
/// - `d2g ~ (x^2 / sigma^4 - 1 / sigma^2) * g`, made zero-mean and scaled so
///   `x^2 / 2` yields 1.
///
/// Derivative responses are therefore per sample, not per millimeter.
/// Kernels of size 1 have `dg == d2g == [0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel1D {
    pub size: usize,
    pub sigma: f64,
    pub radius: usize,
    pub g: Vec<f64>,
    pub dg: Vec<f64>,
    pub d2g: Vec<f64>,
}

impl GaussianKernel1D {
    pub fn from_size(size: usize) -> Result<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(Error::InvalidArgument(format!(
                "kernel size must be odd and positive, got {size}"
            )));
        }

        let radius = size / 2;
        let sigma = sigma_for_size(size);
        let sigma2 = sigma * sigma;

        let mut g: Vec<f64> = taps(radius)
            .map(|x| (-(x * x) / (2.0 * sigma2)).exp())
            .collect();
        let sum_g: f64 = g.iter().sum();
        for gi in &mut g {
            *gi /= sum_g;
        }

        let mut dg: Vec<f64> = taps(radius)
            .zip(&g)
            .map(|(x, &gi)| -(x / sigma2) * gi)
            .collect();
        let ramp_gain: f64 = taps(radius).zip(&dg).map(|(x, &d)| -x * d).sum();
        if ramp_gain > 0.0 {
            for d in &mut dg {
                *d /= ramp_gain;
            }
        }

        let mut d2g: Vec<f64> = taps(radius)
            .zip(&g)
            .map(|(x, &gi)| (x * x / (sigma2 * sigma2) - 1.0 / sigma2) * gi)
            .collect();
        let mean = d2g.iter().sum::<f64>() / size as f64;
        for d in &mut d2g {
            *d -= mean;
        }
        let parabola_gain: f64 = taps(radius).zip(&d2g).map(|(x, &d)| 0.5 * x * x * d).sum();
        if parabola_gain > 0.0 {
            for d in &mut d2g {
                *d /= parabola_gain;
            }
        }

        Ok(Self {
            size,
            sigma,
            radius,
            g,
            dg,
            d2g,
        })
    }
}

pub fn sigma_for_size(size: usize) -> f64 {
    0.3 * ((size as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

fn taps(radius: usize) -> impl Iterator<Item = f64> {
    let r = radius as isize;
    (-r..=r).map(|x| x as f64)
}
