//! Umbrella crate for the `step-profile` workspace.
//!
//! Re-exports the profile type, the filtering primitives and the step
//! detection pipeline, so most users need a single dependency.

pub use sp_core::*;
pub use sp_filter::{
    BorderMode, DerivativeOrder, ExtremumKind, GaussianKernel1D, LocalExtremum,
    NoiseDistribution, add_noise, add_noise_with_rng, filter_profile, find_local_extrema,
    gaussian_derivative, gaussian_smooth, local_extrema,
};
pub use sp_steps::*;
