use core::fmt;

use log::debug;
use serde::{Deserialize, Serialize};
use sp_core::{Profile, Result};

/// One detected platform, positions and heights in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub start: f64,
    pub end: f64,
    /// Median of the platform samples.
    pub height: f64,
    /// `end - start`.
    pub length: f64,
}

impl StepResult {
    pub fn new(start: f64, end: f64, height: f64) -> Self {
        Self {
            start,
            end,
            height,
            length: end - start,
        }
    }

    /// `Step nr. {nr}: range = [..mm, ..mm], height = ..mm, length = ..mm`.
    pub fn report_line(&self, nr: usize) -> String {
        format!("Step nr. {nr}: {self}")
    }
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "range = [{:.3}mm, {:.3}mm], height = {:.3}mm, length = {:.3}mm",
            self.start, self.end, self.height, self.length
        )
    }
}

/// A platform with its raw samples.
#[derive(Debug, Clone, PartialEq)]
pub struct StepSegment {
    pub start_idx: usize,
    pub end_idx: usize,
    pub samples: Profile,
    pub step: StepResult,
}

/// Crops `(edges[0], edges[1])`, `(edges[2], edges[3])`, ... out of the
/// profile. An unpaired trailing edge is ignored.
pub fn segment_steps(profile: &Profile, edges: &[usize]) -> Result<Vec<StepSegment>> {
    let pairs = edges.chunks_exact(2);
    if let [tail] = pairs.remainder() {
        debug!("segment_steps: ignoring unpaired edge at index {tail}");
    }

    let mut segments = Vec::with_capacity(edges.len() / 2);
    for pair in pairs {
        let (s, e) = (pair[0], pair[1]);
        let samples = profile.crop(s, e)?;
        let step = StepResult::new(profile.position(s)?, profile.position(e)?, samples.median());
        segments.push(StepSegment {
            start_idx: s,
            end_idx: e,
            samples,
            step,
        });
    }

    debug!(
        "segment_steps: {} edges -> {} steps",
        edges.len(),
        segments.len()
    );
    Ok(segments)
}

/// Median height of every edge-bounded platform.
pub fn aggregate_steps(profile: &Profile, edges: &[usize]) -> Result<Vec<StepResult>> {
    Ok(segment_steps(profile, edges)?
        .into_iter()
        .map(|s| s.step)
        .collect())
}

/// One report line per step, numbered from 1.
pub fn format_report(steps: &[StepResult]) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(i, s)| s.report_line(i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}
