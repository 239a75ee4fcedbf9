//! 1D filtering primitives for height profiles.
//!
//! Derivatives are expressed per sample: the sampling grid of a
//! [`sp_core::Profile`] is uniform, so a response of `1.0` from the first
//! derivative means the value rises by one unit per sample step.
//!
//! All filters keep the profile length. The convenience wrappers replicate
//! edge samples ([`BorderMode::Clamp`]) so that profile ends do not produce
//! artificial slopes; [`filter_profile`] takes any [`BorderMode`].

pub mod border;
pub mod conv1d;
pub mod extrema;
pub mod kernels1d;
pub mod noise;
pub mod smooth;

pub use border::BorderMode;
pub use extrema::{ExtremumKind, LocalExtremum, find_local_extrema, local_extrema};
pub use kernels1d::GaussianKernel1D;
pub use noise::{NoiseDistribution, add_noise, add_noise_with_rng};
pub use smooth::{DerivativeOrder, filter_profile, gaussian_derivative, gaussian_smooth};
