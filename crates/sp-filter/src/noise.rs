use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sp_core::{Error, Profile, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseDistribution {
    /// Flat density over `[low, high]`.
    #[default]
    Uniform,
    /// Symmetric triangle over `[low, high]`, peaked at the midpoint.
    Triangular,
}

/// Adds independent noise drawn from `distribution` to every value.
///
/// `Some(seed)` makes the result reproducible; `None` seeds from the OS.
pub fn add_noise(
    profile: &Profile,
    distribution: NoiseDistribution,
    low: f64,
    high: f64,
    seed: Option<u64>,
) -> Result<Profile> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    add_noise_with_rng(profile, distribution, low, high, &mut rng)
}

pub fn add_noise_with_rng<R: Rng>(
    profile: &Profile,
    distribution: NoiseDistribution,
    low: f64,
    high: f64,
    rng: &mut R,
) -> Result<Profile> {
    if !low.is_finite() || !high.is_finite() || low > high {
        return Err(Error::InvalidArgument(format!(
            "noise range [{low}, {high}]"
        )));
    }

    let span = high - low;
    Ok(profile.map(|v| {
        let n = match distribution {
            NoiseDistribution::Uniform => rng.random_range(low..=high),
            NoiseDistribution::Triangular => {
                let t = 0.5 * (rng.random::<f64>() + rng.random::<f64>());
                low + span * t
            }
        };
        v + n
    }))
}

#[cfg(test)]
mod tests {
    use sp_core::Profile;

    use super::{NoiseDistribution, add_noise};

    fn flat(n: usize, level: f64) -> Profile {
        let positions = (0..n).map(|i| i as f64 * 0.02).collect();
        Profile::from_samples(vec![level; n], positions).expect("valid profile")
    }

    #[test]
    fn seeded_noise_is_reproducible() {
        let p = flat(200, 1.0);
        let a = add_noise(&p, NoiseDistribution::Uniform, -0.1, 0.1, Some(7)).expect("noise");
        let b = add_noise(&p, NoiseDistribution::Uniform, -0.1, 0.1, Some(7)).expect("noise");
        let c = add_noise(&p, NoiseDistribution::Uniform, -0.1, 0.1, Some(8)).expect("noise");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.positions(), p.positions());
    }

    #[test]
    fn noise_stays_within_bounds() {
        let p = flat(500, 5.0);
        for dist in [NoiseDistribution::Uniform, NoiseDistribution::Triangular] {
            let n = add_noise(&p, dist, -0.1, 0.1, Some(42)).expect("noise");
            for &v in n.values() {
                assert!((v - 5.0).abs() <= 0.1 + 1e-12, "{dist:?}: {v}");
            }
        }
    }

    #[test]
    fn median_is_robust_to_bounded_noise() {
        let p = flat(60, 5.0);
        for seed in 0..20 {
            let n = add_noise(&p, NoiseDistribution::Uniform, -0.1, 0.1, Some(seed))
                .expect("noise");
            let m = n.crop(10, 35).expect("in range").median();
            assert!((m - 5.0).abs() <= 0.15, "seed {seed}: {m}");
        }
    }

    #[test]
    fn rejects_inverted_range() {
        let p = flat(3, 0.0);
        assert!(add_noise(&p, NoiseDistribution::Uniform, 0.2, -0.2, Some(1)).is_err());
        assert!(add_noise(&p, NoiseDistribution::Uniform, f64::NAN, 0.2, Some(1)).is_err());
    }
}
