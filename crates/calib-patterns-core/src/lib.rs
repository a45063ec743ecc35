//! Core geometry for calibration pattern generation.
//!
//! This crate is intentionally small and purely computational: physical
//! sizes (millimeters, inches, DPI/PPI) turn into pixel-space grid
//! parameters, and patterns rasterize onto an in-memory grayscale canvas.
//! File output and argument handling live in the neighbouring crates.

mod canvas;
mod logger;
mod pattern;
mod units;

pub use canvas::GrayCanvas;
pub use pattern::{
    render, render_with, PatternError, PatternKind, PatternSpec, RenderOptions, UnknownPatternKind,
};
pub use units::{
    convert_for_print, convert_for_print_at, convert_for_screen, ConvertError, Medium,
    RasterParams, DEFAULT_PRINT_DPI, MM_PER_INCH,
};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
