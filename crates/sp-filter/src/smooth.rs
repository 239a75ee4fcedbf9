use serde::{Deserialize, Serialize};
use sp_core::{Error, Profile, Result};

use crate::border::BorderMode;
use crate::conv1d::convolve_to_vec;
use crate::kernels1d::GaussianKernel1D;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivativeOrder {
    First,
    Second,
}

/// Gaussian smoothing with replicated edges; output has the input's length.
pub fn gaussian_smooth(profile: &Profile, kernel_size: usize) -> Result<Profile> {
    let kernel = GaussianKernel1D::from_size(kernel_size)?;
    filter_profile(profile, &kernel.g, BorderMode::Clamp)
}

/// Derivative-of-Gaussian response per sample, with replicated edges.
pub fn gaussian_derivative(
    profile: &Profile,
    kernel_size: usize,
    order: DerivativeOrder,
) -> Result<Profile> {
    if kernel_size < 3 {
        return Err(Error::InvalidArgument(format!(
            "derivative kernel size must be at least 3, got {kernel_size}"
        )));
    }
    let kernel = GaussianKernel1D::from_size(kernel_size)?;
    filter_profile(profile, kernel.taps(order), BorderMode::Clamp)
}

/// Convolves the profile values with `kernel`, keeping the sampling grid.
pub fn filter_profile(profile: &Profile, kernel: &[f64], border: BorderMode) -> Result<Profile> {
    if kernel.len() % 2 == 0 {
        return Err(Error::InvalidArgument(format!(
            "kernel length must be odd, got {}",
            kernel.len()
        )));
    }
    profile.with_values(convolve_to_vec(profile.values(), kernel, border))
}

impl GaussianKernel1D {
    pub fn taps(&self, order: DerivativeOrder) -> &[f64] {
        match order {
            DerivativeOrder::First => &self.dg,
            DerivativeOrder::Second => &self.d2g,
        }
    }
}
