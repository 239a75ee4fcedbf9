use serde::{Deserialize, Serialize};
use sp_core::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtremumKind {
    Max,
    Min,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalExtremum {
    pub idx: usize,
    pub value: f64,
    pub prominence: f64,
}

/// Indices of local extrema of the profile values, sorted ascending.
///
/// See [`local_extrema`].
pub fn find_local_extrema(
    profile: &Profile,
    kind: ExtremumKind,
    min_separation: usize,
    min_prominence: f64,
) -> Vec<usize> {
    local_extrema(profile.values(), kind, min_separation, min_prominence)
        .into_iter()
        .map(|e| e.idx)
        .collect()
}

/// Local extrema filtered by prominence and minimum separation.
///
/// - A candidate is a strict local extremum; a flat top counts once, at its
///   first index. The first and last samples are never candidates.
/// - Prominence is topographic: the extremum's height above the higher of the
///   two lowest points met on each side before reaching a more extreme value
///   (or the signal end). Candidates with `prominence < min_prominence` drop.
/// - Separation is resolved greedily from the most extreme candidate down;
///   equal values keep the lowest index. No two returned indices are closer
///   than `min_separation`.
///
/// For [`ExtremumKind::Min`] the prominence is measured on the negated signal
/// and is therefore non-negative; `value` is the original sample value.
pub fn local_extrema(
    values: &[f64],
    kind: ExtremumKind,
    min_separation: usize,
    min_prominence: f64,
) -> Vec<LocalExtremum> {
    let signal: Vec<f64> = match kind {
        ExtremumKind::Max => values.to_vec(),
        ExtremumKind::Min => values.iter().map(|v| -v).collect(),
    };

    let mut candidates: Vec<LocalExtremum> = plateau_peaks(&signal)
        .into_iter()
        .map(|idx| LocalExtremum {
            idx,
            value: values[idx],
            prominence: prominence(&signal, idx),
        })
        .filter(|e| e.prominence >= min_prominence)
        .collect();

    if min_separation > 1 && candidates.len() > 1 {
        candidates = enforce_separation(&signal, candidates, min_separation);
    }

    candidates
}

fn plateau_peaks(s: &[f64]) -> Vec<usize> {
    let n = s.len();
    let mut peaks = Vec::new();

    let mut i = 1;
    while i + 1 < n {
        if s[i - 1] < s[i] {
            let mut j = i;
            while j + 1 < n && s[j + 1] == s[i] {
                j += 1;
            }
            if j + 1 < n && s[j + 1] < s[i] {
                peaks.push(i);
            }
            i = j + 1;
        } else {
            i += 1;
        }
    }

    peaks
}

fn prominence(s: &[f64], idx: usize) -> f64 {
    let top = s[idx];

    let mut left_min = top;
    for &v in s[..idx].iter().rev() {
        if v > top {
            break;
        }
        left_min = left_min.min(v);
    }

    let mut right_min = top;
    for &v in &s[idx + 1..] {
        if v > top {
            break;
        }
        right_min = right_min.min(v);
    }

    top - left_min.max(right_min)
}

fn enforce_separation(
    s: &[f64],
    candidates: Vec<LocalExtremum>,
    min_separation: usize,
) -> Vec<LocalExtremum> {
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    // Stable sort keeps ascending index order among equal values.
    order.sort_by(|&a, &b| s[candidates[b].idx].total_cmp(&s[candidates[a].idx]));

    let mut keep = vec![true; candidates.len()];
    for &c in &order {
        if !keep[c] {
            continue;
        }
        let idx = candidates[c].idx;

        for j in (0..c).rev() {
            if idx - candidates[j].idx >= min_separation {
                break;
            }
            keep[j] = false;
        }
        for j in c + 1..candidates.len() {
            if candidates[j].idx - idx >= min_separation {
                break;
            }
            keep[j] = false;
        }
    }

    candidates
        .into_iter()
        .zip(keep)
        .filter_map(|(e, k)| k.then_some(e))
        .collect()
}
