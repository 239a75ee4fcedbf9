use crate::border::BorderMode;

/// Same-length 1D convolution: `out[i] = sum_k signal[i + r - k] * kernel[k]`.
///
/// Panics if `out` and `signal` differ in length or the kernel length is even.
pub fn convolve_f64(signal: &[f64], kernel: &[f64], border: BorderMode, out: &mut [f64]) {
    assert_eq!(out.len(), signal.len(), "out must match signal length");
    assert!(kernel.len() % 2 == 1, "kernel len must be 2*radius+1");

    let n = signal.len();
    if n == 0 {
        return;
    }
    let radius = kernel.len() / 2;

    if n > 2 * radius {
        convolve_split(signal, kernel, radius, border, out);
    } else {
        for (i, out_i) in out.iter_mut().enumerate() {
            *out_i = convolve_at(signal, kernel, radius, border, i);
        }
    }
}

pub fn convolve_to_vec(signal: &[f64], kernel: &[f64], border: BorderMode) -> Vec<f64> {
    let mut out = vec![0.0; signal.len()];
    convolve_f64(signal, kernel, border, &mut out);
    out
}

fn convolve_split(
    signal: &[f64],
    kernel: &[f64],
    radius: usize,
    border: BorderMode,
    out: &mut [f64],
) {
    let n = signal.len();
    let klen = kernel.len();
    let interior_end = n - radius;

    for i in (0..radius).chain(interior_end..n) {
        out[i] = convolve_at(signal, kernel, radius, border, i);
    }

    // Full kernel footprint is in bounds for i in [radius, n - radius).
    for (i, out_i) in out
        .iter_mut()
        .enumerate()
        .take(interior_end)
        .skip(radius)
    {
        let base = i - radius;
        *out_i = signal[base..base + klen]
            .iter()
            .zip(kernel.iter().rev())
            .map(|(s, k)| s * k)
            .sum();
    }
}

#[inline]
fn convolve_at(signal: &[f64], kernel: &[f64], radius: usize, border: BorderMode, i: usize) -> f64 {
    let n = signal.len();
    let mut acc = 0.0;
    for (k, &kv) in kernel.iter().enumerate() {
        let idx = i as isize + radius as isize - k as isize;
        let v = match border.map_index(idx, n) {
            Some(j) => signal[j],
            None => match border {
                BorderMode::Constant(c) => c,
                _ => 0.0,
            },
        };
        acc += v * kv;
    }
    acc
}

#[cfg(test)]
mod tests {
    use crate::border::BorderMode;
    use crate::conv1d::{convolve_f64, convolve_to_vec};

    #[test]
    fn identity_kernel_copies_signal() {
        let signal = [1.0, 2.0, 3.0, 4.0];
        let out = convolve_to_vec(&signal, &[1.0], BorderMode::Clamp);
        assert_eq!(out, signal);
    }

    #[test]
    fn kernel_is_flipped() {
        // A shift kernel [0, 0, 1] reads signal[i - 1].
        let signal = [1.0, 2.0, 3.0, 4.0, 5.0];
        let out = convolve_to_vec(&signal, &[0.0, 0.0, 1.0], BorderMode::Clamp);
        assert_eq!(out, vec![1.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn border_modes_on_short_signal() {
        let signal = [1.0, 2.0, 3.0];
        let box3 = [1.0, 1.0, 1.0];

        let mut out = vec![0.0; 3];
        convolve_f64(&signal, &box3, BorderMode::Constant(0.0), &mut out);
        assert_eq!(out, vec![3.0, 6.0, 5.0]);

        convolve_f64(&signal, &box3, BorderMode::Clamp, &mut out);
        assert_eq!(out, vec![4.0, 6.0, 8.0]);

        convolve_f64(&signal, &box3, BorderMode::Reflect101, &mut out);
        assert_eq!(out, vec![5.0, 6.0, 7.0]);
    }

    #[test]
    fn split_path_matches_direct_path() {
        let signal: Vec<f64> = (0..40).map(|i| ((i * 7) % 11) as f64 - 3.0).collect();
        let kernel = [0.1, -0.4, 0.25, 0.9, 0.3];

        let fast = convolve_to_vec(&signal, &kernel, BorderMode::Clamp);
        for (i, &v) in fast.iter().enumerate() {
            let direct = super::convolve_at(&signal, &kernel, 2, BorderMode::Clamp, i);
            assert!((v - direct).abs() < 1e-12, "i = {i}");
        }
    }
}
