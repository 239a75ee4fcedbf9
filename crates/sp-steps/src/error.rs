use core::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Build,
    Resample,
    Noise,
    Smooth,
    Detect,
    Aggregate,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Build => "build",
            Self::Resample => "resample",
            Self::Noise => "noise",
            Self::Smooth => "smooth",
            Self::Detect => "detect",
            Self::Aggregate => "aggregate",
        };
        f.write_str(name)
    }
}

/// A pipeline run failed at `stage`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{stage} stage failed: {source}")]
pub struct PipelineError {
    pub stage: PipelineStage,
    #[source]
    pub source: sp_core::Error,
}

pub(crate) trait StageContext<T> {
    fn stage(self, stage: PipelineStage) -> Result<T, PipelineError>;
}

impl<T> StageContext<T> for sp_core::Result<T> {
    fn stage(self, stage: PipelineStage) -> Result<T, PipelineError> {
        self.map_err(|source| PipelineError { stage, source })
    }
}
