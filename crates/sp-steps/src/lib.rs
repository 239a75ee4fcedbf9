//! Step height extraction from 1D height profiles.
//!
//! Core strategy:
//! - Sample the object's cross-section polygon into a [`Profile`].
//! - Mark flat regions where the smoothed slope is close to zero.
//! - Locate platform boundaries as curvature peaks of that marker.
//! - Pair boundaries and take the median height of each platform.
//!
//! Edge pairs are consumed with stride two: `(e0, e1)`, `(e2, e3)`, ... A
//! spurious boundary therefore shifts every following pair; such runs still
//! report what they can and surface [`Error::DegenerateEdgeSet`] when the
//! edge count is odd.
//!
//! [`Profile`]: sp_core::Profile
//! [`Error::DegenerateEdgeSet`]: sp_core::Error::DegenerateEdgeSet

mod aggregate;
mod builder;
mod edges;
mod error;
mod pipeline;

pub use aggregate::{StepResult, StepSegment, aggregate_steps, format_report, segment_steps};
pub use builder::{
    MAX_SAMPLE_COUNT, build_from_polygon, demo_staircase, resample_profile,
    sample_count_for_resolution,
};
pub use edges::{EdgeDetectConfig, EdgeDetection, EdgeDetector, detect_edges};
pub use error::{PipelineError, PipelineStage};
pub use pipeline::{PipelineConfig, PipelineOutput, run_pipeline};
