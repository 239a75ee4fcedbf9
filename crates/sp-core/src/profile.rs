use serde::Serialize;

use crate::error::{Error, Result};

/// Ordered 1D height profile: `values[i]` is measured at `positions[i]`.
///
/// Invariants:
/// - at least one sample;
/// - `positions.len() == values.len()`;
/// - positions are finite and strictly increasing.
///
/// All transformations return a new profile; the receiver is never modified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    positions: Vec<f64>,
    values: Vec<f64>,
}

impl Profile {
    pub fn from_samples(values: Vec<f64>, positions: Vec<f64>) -> Result<Self> {
        if values.len() != positions.len() {
            return Err(Error::invalid(format!(
                "{} values vs {} positions",
                values.len(),
                positions.len()
            )));
        }
        if values.is_empty() {
            return Err(Error::invalid("profile must contain at least one sample"));
        }
        if let Some(i) = positions.iter().position(|p| !p.is_finite()) {
            return Err(Error::invalid(format!("position {i} is not finite")));
        }
        if let Some(i) = positions.windows(2).position(|w| w[1] <= w[0]) {
            return Err(Error::invalid(format!(
                "positions must be strictly increasing (index {} -> {})",
                i,
                i + 1
            )));
        }

        Ok(Self { positions, values })
    }

    /// New profile on the same sampling grid.
    pub fn with_values(&self, values: Vec<f64>) -> Result<Self> {
        if values.len() != self.len() {
            return Err(Error::invalid(format!(
                "expected {} values, got {}",
                self.len(),
                values.len()
            )));
        }
        Ok(Self {
            positions: self.positions.clone(),
            values,
        })
    }

    pub fn map(&self, f: impl FnMut(f64) -> f64) -> Self {
        Self {
            positions: self.positions.clone(),
            values: self.values.iter().copied().map(f).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`: a profile holds at least one sample.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// `(position, value)` pairs in order.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = (f64, f64)> + '_ {
        self.positions
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Mean distance between adjacent samples, `0.0` for a single sample.
    pub fn spacing(&self) -> f64 {
        let n = self.len();
        if n < 2 {
            return 0.0;
        }
        (self.positions[n - 1] - self.positions[0]) / (n - 1) as f64
    }

    pub fn value(&self, index: usize) -> Result<f64> {
        self.values.get(index).copied().ok_or(Error::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    pub fn position(&self, index: usize) -> Result<f64> {
        self.positions
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    pub fn positions_at(&self, indices: &[usize]) -> Result<Vec<f64>> {
        indices.iter().map(|&i| self.position(i)).collect()
    }

    pub fn multiply_constant(&self, k: f64) -> Self {
        self.map(|v| v * k)
    }

    /// Band marker: samples with `low <= v <= high` become `high_value`, all
    /// others `0`. Used to flag near-zero derivative (flat) regions.
    pub fn binarize(&self, low: f64, high: f64, high_value: f64) -> Self {
        self.map(|v| {
            if (low..=high).contains(&v) {
                high_value
            } else {
                0.0
            }
        })
    }

    pub fn clamp(&self, lo: f64, hi: f64) -> Result<Self> {
        if lo > hi || lo.is_nan() || hi.is_nan() {
            return Err(Error::invalid(format!("clamp bounds [{lo}, {hi}]")));
        }
        Ok(self.map(|v| v.clamp(lo, hi)))
    }

    /// Inclusive sub-profile `[start, end]`.
    pub fn crop(&self, start: usize, end: usize) -> Result<Self> {
        let len = self.len();
        if start >= len {
            return Err(Error::IndexOutOfRange { index: start, len });
        }
        if end >= len {
            return Err(Error::IndexOutOfRange { index: end, len });
        }
        if start > end {
            return Err(Error::IndexOutOfRange { index: start, len });
        }

        Ok(Self {
            positions: self.positions[start..=end].to_vec(),
            values: self.values[start..=end].to_vec(),
        })
    }

    /// Linear re-sampling onto `target_sample_count` evenly spaced positions
    /// spanning the original first and last position.
    pub fn resample(&self, target_sample_count: usize) -> Result<Self> {
        if self.len() == 1 && target_sample_count == 1 {
            return Ok(self.clone());
        }
        if target_sample_count < 2 {
            return Err(Error::invalid(format!(
                "resample needs at least 2 target samples, got {target_sample_count}"
            )));
        }
        if self.len() < 2 {
            return Err(Error::invalid(
                "cannot resample a single-sample profile onto a grid",
            ));
        }

        let first = self.positions[0];
        let last = self.positions[self.len() - 1];
        let step = (last - first) / (target_sample_count - 1) as f64;

        let mut positions = Vec::with_capacity(target_sample_count);
        let mut values = Vec::with_capacity(target_sample_count);
        let mut seg = 0usize;
        for k in 0..target_sample_count {
            let x = if k + 1 == target_sample_count {
                last
            } else {
                first + step * k as f64
            };
            while seg + 2 < self.len() && self.positions[seg + 1] < x {
                seg += 1;
            }
            positions.push(x);
            values.push(self.interpolate_in_segment(seg, x));
        }

        Self::from_samples(values, positions)
    }

    /// Median of all values; mean of the two middle values for even length.
    pub fn median(&self) -> f64 {
        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        if n % 2 == 1 {
            sorted[n / 2]
        } else {
            0.5 * (sorted[n / 2 - 1] + sorted[n / 2])
        }
    }

    fn interpolate_in_segment(&self, seg: usize, x: f64) -> f64 {
        let (x0, x1) = (self.positions[seg], self.positions[seg + 1]);
        let (y0, y1) = (self.values[seg], self.values[seg + 1]);
        let t = ((x - x0) / (x1 - x0)).clamp(0.0, 1.0);
        y0 + (y1 - y0) * t
    }
}
