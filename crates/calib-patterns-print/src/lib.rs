//! File output for calibration patterns.
//!
//! Takes the canvases produced by `calib-patterns-core` and turns them into
//! artifacts on disk: 8-bit grayscale PNGs with deterministic names, plus a
//! JSON job format for reproducible pattern requests.

mod encode;
mod job;
mod naming;

pub use encode::{write_png, EncodeError};
pub use job::{JobError, PatternIoError, PatternJob, RenderedPattern};
pub use naming::{artifact_file_name, artifact_stem};
