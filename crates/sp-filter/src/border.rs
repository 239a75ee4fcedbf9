use serde::{Deserialize, Serialize};

/// How convolution reads samples that fall outside the signal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderMode {
    /// Replicate the first/last sample.
    #[default]
    Clamp,
    /// Read a fixed value outside the signal.
    Constant(f64),
    /// Mirror around the edge samples without repeating them.
    Reflect101,
}

impl BorderMode {
    /// Maps a possibly out-of-range index onto `[0, len)`.
    ///
    /// Returns `None` for empty signals and for out-of-range indices under
    /// [`BorderMode::Constant`], where the caller substitutes the constant.
    pub fn map_index(&self, i: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        if i >= 0 && (i as usize) < len {
            return Some(i as usize);
        }

        match self {
            Self::Constant(_) => None,
            Self::Clamp => Some(if i < 0 { 0 } else { len - 1 }),
            Self::Reflect101 => {
                if len == 1 {
                    return Some(0);
                }
                let period = (2 * len - 2) as isize;
                let r = i.rem_euclid(period) as usize;
                Some(if r < len { r } else { period as usize - r })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BorderMode;

    #[test]
    fn in_range_indices_map_to_themselves() {
        for mode in [
            BorderMode::Clamp,
            BorderMode::Constant(7.0),
            BorderMode::Reflect101,
        ] {
            for i in 0..6 {
                assert_eq!(mode.map_index(i, 6), Some(i as usize));
            }
            assert_eq!(mode.map_index(0, 0), None);
        }
    }

    #[test]
    fn clamp_replicates_edges() {
        let mode = BorderMode::Clamp;
        assert_eq!(mode.map_index(-12, 50), Some(0));
        assert_eq!(mode.map_index(61, 50), Some(49));
    }

    #[test]
    fn constant_leaves_outside_unmapped() {
        let mode = BorderMode::Constant(0.0);
        assert_eq!(mode.map_index(-1, 4), None);
        assert_eq!(mode.map_index(4, 4), None);
    }

    #[test]
    fn reflect101_mirrors_without_repeating_edge() {
        let mode = BorderMode::Reflect101;
        let cases = [(-3, 3), (-2, 2), (-1, 1), (5, 3), (6, 2), (7, 1), (8, 0)];
        for (i, expected) in cases {
            assert_eq!(mode.map_index(i, 5), Some(expected), "i = {i}");
        }
        assert_eq!(mode.map_index(-9, 1), Some(0));
    }
}
