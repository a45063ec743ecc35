//! JSON job descriptions binding a pattern to a target medium.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use calib_patterns_core::{
    render_with, ConvertError, GrayCanvas, Medium, PatternError, PatternSpec, RasterParams,
    RenderOptions,
};

#[derive(thiserror::Error, Debug)]
pub enum PatternIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Job validation errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum JobError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// A renderable request: what to draw and which medium to size it for.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatternJob {
    pub pattern: PatternSpec,
    #[serde(flatten)]
    pub medium: Medium,
    #[serde(default)]
    pub options: RenderOptions,
}

/// Rendered canvas together with the raster parameters that produced it.
#[derive(Clone, Debug)]
pub struct RenderedPattern {
    pub canvas: GrayCanvas,
    pub raster: RasterParams,
}

impl PatternJob {
    pub fn new(pattern: PatternSpec, medium: Medium) -> Self {
        Self {
            pattern,
            medium,
            options: RenderOptions::default(),
        }
    }

    /// Load a JSON job from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PatternIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this job to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PatternIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Check the pattern spec and the medium dimensions.
    pub fn validate(&self) -> Result<(), JobError> {
        self.pattern.validate()?;
        self.medium.raster_params()?;
        Ok(())
    }

    /// Validate the job and render its pattern.
    pub fn run(&self) -> Result<RenderedPattern, JobError> {
        self.pattern.validate()?;
        let raster = self.medium.raster_params()?;
        let canvas = render_with(&self.pattern, &raster, &self.options);
        Ok(RenderedPattern { canvas, raster })
    }

    /// File stem for artifacts produced from this job.
    pub fn artifact_stem(&self) -> String {
        crate::naming::artifact_stem(&self.pattern, &self.medium)
    }

    /// Artifact file name, `{stem}.png`.
    pub fn artifact_file_name(&self) -> String {
        crate::naming::artifact_file_name(&self.pattern, &self.medium)
    }
}
